use thiserror::Error;

/// A violation of the platform's message, component or command constraints. These are
/// programmer errors: they surface to the code that built the offending value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("embed and embeds are mutually exclusive")]
    EmbedAndEmbeds,

    #[error("embeds must not serialize to an empty object")]
    EmptyEmbed,

    #[error("a message can carry at most {max} embeds, got {got}")]
    TooManyEmbeds { max: usize, got: usize },

    #[error("content can be at most {max} characters, got {got}")]
    ContentTooLong { max: usize, got: usize },

    #[error("response data must not be empty for a non-deferred response type")]
    EmptyData,

    #[error("top-level components must be action rows")]
    NotAnActionRow,

    #[error("a message can carry at most {max} action rows, got {got}")]
    TooManyActionRows { max: usize, got: usize },

    #[error("action rows cannot be nested")]
    NestedActionRow,

    #[error("an action row must not be empty")]
    EmptyActionRow,

    #[error("an action row can hold at most {max} buttons, got {got}")]
    TooManyButtons { max: usize, got: usize },

    #[error("an action row must contain either buttons or a single select menu")]
    MixedActionRow,

    #[error("an action row can hold only one select menu")]
    MultipleSelectMenus,

    #[error("link buttons must have a url")]
    LinkButtonWithoutUrl,

    #[error("link buttons cannot have a custom id")]
    LinkButtonWithCustomId,

    #[error("non-link buttons cannot have a url")]
    ButtonWithUrl,

    #[error("non-link buttons must have a custom id")]
    ButtonWithoutCustomId,

    #[error("buttons must have a label or an emoji")]
    ButtonWithoutLabel,

    #[error("{field} can be at most {max} characters, got {got}")]
    TooLong {
        field: &'static str,
        max: usize,
        got: usize,
    },

    #[error("select menus need between {min} and {max} options, got {got}")]
    SelectOptionCount { min: usize, max: usize, got: usize },

    #[error("min_values must be between 0 and {max}, got {got}")]
    MinValuesOutOfRange { max: u8, got: u8 },

    #[error("max_values must be between 1 and {max}, got {got}")]
    MaxValuesOutOfRange { max: u8, got: u8 },

    #[error("min_values ({min}) cannot exceed max_values ({max})")]
    MinExceedsMax { min: u8, max: u8 },

    #[error("allowed mentions cannot parse {0} and list explicit {0} ids at once")]
    MentionParseConflict(&'static str),

    #[error("allowed mentions can list at most {max} {kind} ids, got {got}")]
    TooManyMentionIds {
        kind: &'static str,
        max: usize,
        got: usize,
    },

    #[error("invalid command name \"{0}\"")]
    InvalidCommandName(Box<str>),

    #[error("command descriptions must be between 1 and 100 characters")]
    InvalidDescription,

    #[error("only chat input commands can have options")]
    OptionsOnContextMenuCommand,

    #[error("only sub-commands and sub-command groups can nest options")]
    OptionsOnLeafOption,
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let got = value.chars().count();
    if got > max {
        Err(ValidationError::TooLong { field, max, got })
    } else {
        Ok(())
    }
}
