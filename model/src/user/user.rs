use serde::{Deserialize, Serialize};

use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: Snowflake,
    pub username: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<Box<str>>,
    #[serde(default)]
    pub avatar: Option<Box<str>>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
}

impl User {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}
