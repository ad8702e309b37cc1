use crate::channel::message::{Attachment, Message};
use crate::guild::Member;
use crate::user::User;
use crate::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Entities referenced by an application command, keyed by snowflake.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApplicationCommandInteractionDataResolved {
    #[serde(default)]
    pub users: HashMap<Snowflake, User>,
    #[serde(default)]
    pub members: HashMap<Snowflake, Member>,
    #[serde(default)]
    pub roles: HashMap<Snowflake, Value>,
    #[serde(default)]
    pub channels: HashMap<Snowflake, Value>,
    #[serde(default)]
    pub messages: HashMap<Snowflake, Message>,
    #[serde(default)]
    pub attachments: HashMap<Snowflake, Attachment>,
}
