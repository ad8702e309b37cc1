use crate::channel::message::Message;
use crate::guild::Member;
use crate::interaction::{
    ApplicationCommandInteractionDataOption, ApplicationCommandInteractionDataResolved,
    ApplicationCommandType,
};
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApplicationCommandInteractionData {
    ChatInput(ChatInputCommandData),
    User(UserCommandData),
    Message(MessageCommandData),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatInputCommandData {
    pub id: Snowflake,
    pub name: Box<str>,
    /// Guild the command is registered to; `None` for global commands.
    pub guild_id: Option<Snowflake>,
    pub options: Vec<ApplicationCommandInteractionDataOption>,
    pub resolved: ApplicationCommandInteractionDataResolved,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserCommandData {
    pub id: Snowflake,
    pub name: Box<str>,
    pub guild_id: Option<Snowflake>,
    pub target_id: Snowflake,
    pub target: ResolvedUser,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessageCommandData {
    pub id: Snowflake,
    pub name: Box<str>,
    pub guild_id: Option<Snowflake>,
    pub target_id: Snowflake,
    pub message: Message,
}

/// Target of a user command. `member` is only present when invoked inside a guild.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    pub user: User,
    pub member: Option<Member>,
}

#[derive(Deserialize)]
struct RawCommandData {
    #[serde(default)]
    id: Snowflake,
    name: Box<str>,
    #[serde(default = "chat_input")]
    r#type: u64,
    #[serde(default)]
    guild_id: Option<Snowflake>,
    #[serde(default)]
    target_id: Option<Snowflake>,
    #[serde(default)]
    options: Vec<ApplicationCommandInteractionDataOption>,
    #[serde(default)]
    resolved: ApplicationCommandInteractionDataResolved,
}

fn chat_input() -> u64 {
    ApplicationCommandType::ChatInput as u64
}

impl ApplicationCommandInteractionData {
    /// Decodes the `data` object of an application command interaction. Returns `Ok(None)`
    /// for command types this crate does not know.
    pub fn decode(data: Value) -> Result<Option<Self>, serde_json::Error> {
        let raw: RawCommandData = serde_json::from_value(data)?;

        let command_type = match ApplicationCommandType::try_from(raw.r#type) {
            Ok(command_type) => command_type,
            Err(_) => return Ok(None),
        };

        let data = match command_type {
            ApplicationCommandType::ChatInput => Self::ChatInput(ChatInputCommandData {
                id: raw.id,
                name: raw.name,
                guild_id: raw.guild_id,
                options: raw.options,
                resolved: raw.resolved,
            }),

            ApplicationCommandType::User => {
                let (target_id, user) = take_target(raw.resolved.users, raw.target_id, "users")?;

                let mut members = raw.resolved.members;
                let member = members.remove(&target_id).map(|mut member| {
                    if member.user.is_none() {
                        member.user = Some(user.clone());
                    }
                    member
                });

                Self::User(UserCommandData {
                    id: raw.id,
                    name: raw.name,
                    guild_id: raw.guild_id,
                    target_id,
                    target: ResolvedUser { user, member },
                })
            }

            ApplicationCommandType::Message => {
                let (target_id, message) =
                    take_target(raw.resolved.messages, raw.target_id, "messages")?;

                Self::Message(MessageCommandData {
                    id: raw.id,
                    name: raw.name,
                    guild_id: raw.guild_id,
                    target_id,
                    message,
                })
            }
        };

        Ok(Some(data))
    }

    pub fn id(&self) -> Snowflake {
        match self {
            Self::ChatInput(data) => data.id,
            Self::User(data) => data.id,
            Self::Message(data) => data.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ChatInput(data) => &data.name,
            Self::User(data) => &data.name,
            Self::Message(data) => &data.name,
        }
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::ChatInput(data) => data.guild_id,
            Self::User(data) => data.guild_id,
            Self::Message(data) => data.guild_id,
        }
    }

    pub fn command_type(&self) -> ApplicationCommandType {
        match self {
            Self::ChatInput(_) => ApplicationCommandType::ChatInput,
            Self::User(_) => ApplicationCommandType::User,
            Self::Message(_) => ApplicationCommandType::Message,
        }
    }
}

/// Picks the targeted entry out of a resolved map. The map is expected to hold exactly the
/// target; `target_id` disambiguates if the platform ever sends more.
fn take_target<T>(
    mut map: HashMap<Snowflake, T>,
    target_id: Option<Snowflake>,
    kind: &'static str,
) -> Result<(Snowflake, T), serde_json::Error> {
    if let Some(id) = target_id {
        if let Some(entry) = map.remove(&id) {
            return Ok((id, entry));
        }
    }

    if map.len() != 1 {
        return Err(serde_json::Error::custom(format!(
            "expected exactly one resolved entry in \"{}\", found {}",
            kind,
            map.len()
        )));
    }

    map.into_iter()
        .next()
        .ok_or_else(|| serde_json::Error::custom(format!("resolved \"{}\" was empty", kind)))
}
