use serde::{Deserialize, Serialize};

use crate::util::is_false;
use crate::Snowflake;

/// Partial emoji, as attached to buttons and select options.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
}

impl Emoji {
    pub fn unicode(name: impl Into<Box<str>>) -> Emoji {
        Emoji {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    pub fn custom(id: Snowflake, name: impl Into<Box<str>>, animated: bool) -> Emoji {
        Emoji {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }
}
