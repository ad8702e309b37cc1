use crate::interaction::application_command::{check_description, check_slash_name};
use crate::interaction::ApplicationCommandOptionChoice;
use crate::util::is_false;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// An option declared on a slash command when registering it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApplicationCommandOption {
    pub r#type: ApplicationCommandOptionType,
    pub name: Box<str>,
    pub description: Box<str>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ApplicationCommandOptionChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
}

impl ApplicationCommandOption {
    pub fn new(
        r#type: ApplicationCommandOptionType,
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        check_slash_name(&name)?;
        check_description(&description)?;

        Ok(ApplicationCommandOption {
            r#type,
            name,
            description,
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
        })
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_choice(mut self, choice: ApplicationCommandOptionChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Nests an option under a sub-command or sub-command group.
    pub fn with_option(mut self, option: ApplicationCommandOption) -> Result<Self, ValidationError> {
        if !self.r#type.is_nested() {
            return Err(ValidationError::OptionsOnLeafOption);
        }

        self.options.push(option);
        Ok(self)
    }
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ApplicationCommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl ApplicationCommandOptionType {
    /// Sub-commands and groups carry nested options instead of a value.
    pub fn is_nested(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}
