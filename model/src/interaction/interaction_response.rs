use crate::channel::message::{AllowedMentions, Embed};
use crate::interaction::Component;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Message flag that makes a response visible to the invoking user only.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
    UpdateMessage = 7,
}

impl InteractionResponseType {
    /// Acknowledgement types, which are allowed to carry no data.
    pub fn is_deferred(self) -> bool {
        matches!(
            self,
            Self::Pong | Self::DeferredChannelMessageWithSource | Self::DeferredMessageUpdate
        )
    }
}

impl TryFrom<u64> for InteractionResponseType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            5 => Self::DeferredChannelMessageWithSource,
            6 => Self::DeferredMessageUpdate,
            7 => Self::UpdateMessage,
            _ => {
                return Err(
                    format!("invalid interaction response type \"{}\"", value).into_boxed_str()
                )
            }
        })
    }
}

/// Message body shared by initial responses, follow-ups and edits.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InteractionCallbackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

impl InteractionCallbackData {
    pub fn is_empty(&self) -> bool {
        self.tts.is_none()
            && self.content.is_none()
            && self.embeds.is_none()
            && self.allowed_mentions.is_none()
            && self.flags.is_none()
            && self.components.is_none()
    }

    pub fn is_ephemeral(&self) -> bool {
        self.flags.map_or(false, |flags| flags & EPHEMERAL_FLAG != 0)
    }
}

/// The body returned to the platform as the initial response to an interaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InteractionResponse {
    pub r#type: InteractionResponseType,
    #[serde(default, skip_serializing_if = "InteractionCallbackData::is_empty")]
    pub data: InteractionCallbackData,
}

impl InteractionResponse {
    pub fn new_pong() -> InteractionResponse {
        InteractionResponse {
            r#type: InteractionResponseType::Pong,
            data: InteractionCallbackData::default(),
        }
    }
}
