use serde::{Deserialize, Serialize};

use crate::user::User;
use crate::Snowflake;
use chrono::{DateTime, Utc};

/// A guild member. Members taken from `resolved.members` carry no `user`; the decoder
/// pairs them with the matching entry of `resolved.users` instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<Box<str>>,
    #[serde(default)]
    pub avatar: Option<Box<str>>,
    #[serde(default, serialize_with = "Snowflake::serialize_vec_to_ints")]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Box<str>>,
}
