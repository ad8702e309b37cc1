use crate::interaction::{ApplicationCommandOption, ApplicationCommandType};
use crate::validation::ValidationError;
use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// A command as submitted to the bulk-overwrite endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub name: Box<str>,
    pub r#type: ApplicationCommandType,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub description: Box<str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    /// Guild the command is registered to; `None` for global commands.
    #[serde(skip)]
    pub guild_id: Option<Snowflake>,
}

impl CommandDefinition {
    pub fn slash(
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        check_slash_name(&name)?;
        check_description(&description)?;

        Ok(CommandDefinition {
            name,
            r#type: ApplicationCommandType::ChatInput,
            description,
            options: Vec::new(),
            guild_id: None,
        })
    }

    pub fn user(name: impl Into<Box<str>>) -> Result<Self, ValidationError> {
        CommandDefinition::context_menu(name.into(), ApplicationCommandType::User)
    }

    pub fn message(name: impl Into<Box<str>>) -> Result<Self, ValidationError> {
        CommandDefinition::context_menu(name.into(), ApplicationCommandType::Message)
    }

    fn context_menu(name: Box<str>, r#type: ApplicationCommandType) -> Result<Self, ValidationError> {
        let len = name.chars().count();
        if len == 0 || len > 32 {
            return Err(ValidationError::InvalidCommandName(name));
        }

        Ok(CommandDefinition {
            name,
            r#type,
            description: Box::from(""),
            options: Vec::new(),
            guild_id: None,
        })
    }

    pub fn with_option(mut self, option: ApplicationCommandOption) -> Result<Self, ValidationError> {
        if self.r#type != ApplicationCommandType::ChatInput {
            return Err(ValidationError::OptionsOnContextMenuCommand);
        }

        self.options.push(option);
        Ok(self)
    }

    pub fn in_guild(mut self, guild_id: Snowflake) -> Self {
        self.guild_id = Some(guild_id);
        self
    }
}

/// Slash command and option names: 1-32 characters, lowercase, word characters or `-`.
pub(crate) fn check_slash_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    let valid_chars = name
        .chars()
        .all(|c| (c.is_alphanumeric() && !c.is_uppercase()) || c == '-' || c == '_');

    if (1..=32).contains(&len) && valid_chars {
        Ok(())
    } else {
        Err(ValidationError::InvalidCommandName(Box::from(name)))
    }
}

pub(crate) fn check_description(description: &str) -> Result<(), ValidationError> {
    if (1..=100).contains(&description.chars().count()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDescription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ApplicationCommandOptionType;

    #[test]
    fn test_slash_name_rules() {
        assert!(CommandDefinition::slash("open-ticket", "Opens a ticket").is_ok());
        assert!(CommandDefinition::slash("Open", "Opens a ticket").is_err());
        assert!(CommandDefinition::slash("open ticket", "Opens a ticket").is_err());
        assert!(CommandDefinition::slash("", "Opens a ticket").is_err());
        assert!(CommandDefinition::slash("open", "").is_err());
    }

    #[test]
    fn test_context_menu_names_allow_spaces() {
        let command = CommandDefinition::user("User Info").unwrap();
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "User Info", "type": 2 }));
    }

    #[test]
    fn test_context_menu_rejects_options() {
        let option =
            ApplicationCommandOption::new(ApplicationCommandOptionType::String, "reason", "Why")
                .unwrap();
        assert_eq!(
            CommandDefinition::message("Report").unwrap().with_option(option),
            Err(ValidationError::OptionsOnContextMenuCommand)
        );
    }

    #[test]
    fn test_slash_serialization() {
        let command = CommandDefinition::slash("close", "Closes the ticket")
            .unwrap()
            .with_option(
                ApplicationCommandOption::new(
                    ApplicationCommandOptionType::String,
                    "reason",
                    "Reason for closing",
                )
                .unwrap()
                .required(true),
            )
            .unwrap()
            .in_guild(Snowflake(42));

        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["type"], 1);
        assert_eq!(json["options"][0]["required"], true);
        assert!(json.get("guild_id").is_none());
    }
}
