use crate::util::is_false;
use crate::validation::ValidationError;
use crate::Snowflake;
use serde::{Deserialize, Serialize};

const MAX_MENTION_IDS: usize = 100;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AllowedMentionType {
    Everyone,
    Users,
    Roles,
}

impl AllowedMentionType {
    fn as_str(self) -> &'static str {
        match self {
            AllowedMentionType::Everyone => "everyone",
            AllowedMentionType::Users => "users",
            AllowedMentionType::Roles => "roles",
        }
    }
}

/// Controls which mentions in a message body actually notify. An empty value suppresses
/// every mention.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedMentions {
    #[serde(default)]
    pub parse: Vec<AllowedMentionType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub replied_user: bool,
}

impl AllowedMentions {
    pub fn none() -> AllowedMentions {
        AllowedMentions::default()
    }

    pub fn all() -> AllowedMentions {
        AllowedMentions::parsing(&[
            AllowedMentionType::Everyone,
            AllowedMentionType::Users,
            AllowedMentionType::Roles,
        ])
    }

    pub fn parsing(types: &[AllowedMentionType]) -> AllowedMentions {
        let mut mentions = AllowedMentions::default();
        for kind in types {
            if !mentions.parse.contains(kind) {
                mentions.parse.push(*kind);
            }
        }
        mentions
    }

    pub fn with_users(mut self, users: impl IntoIterator<Item = Snowflake>) -> Self {
        extend_unique(&mut self.users, users);
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Snowflake>) -> Self {
        extend_unique(&mut self.roles, roles);
        self
    }

    pub fn with_replied_user(mut self, replied_user: bool) -> Self {
        self.replied_user = replied_user;
        self
    }

    /// A `parse` entry for users (or roles) and an explicit id list of the same kind are
    /// mutually exclusive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_kind(self, AllowedMentionType::Users, &self.users)?;
        check_kind(self, AllowedMentionType::Roles, &self.roles)
    }
}

fn check_kind(
    mentions: &AllowedMentions,
    kind: AllowedMentionType,
    ids: &[Snowflake],
) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Ok(());
    }

    if mentions.parse.contains(&kind) {
        return Err(ValidationError::MentionParseConflict(kind.as_str()));
    }

    if ids.len() > MAX_MENTION_IDS {
        return Err(ValidationError::TooManyMentionIds {
            kind: kind.as_str(),
            max: MAX_MENTION_IDS,
            got: ids.len(),
        });
    }

    Ok(())
}

fn extend_unique(target: &mut Vec<Snowflake>, ids: impl IntoIterator<Item = Snowflake>) {
    for id in ids {
        if !target.contains(&id) {
            target.push(id);
        }
    }
}
