use super::ComponentType;
use crate::guild::Emoji;
use crate::util::is_false;
use crate::validation::{check_len, ValidationError};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Button {
    pub r#type: ComponentType,
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

impl Button {
    /// A button that sends a component interaction carrying `custom_id` when clicked.
    pub fn new(
        style: ButtonStyle,
        custom_id: impl Into<Box<str>>,
        label: impl Into<Box<str>>,
    ) -> Result<Button, ValidationError> {
        let button = Button {
            r#type: ComponentType::Button,
            style,
            label: Some(label.into()),
            emoji: None,
            custom_id: Some(custom_id.into()),
            url: None,
            disabled: false,
        };

        button.validate()?;
        Ok(button)
    }

    /// A link button. Link buttons open `url` and never send an interaction.
    pub fn link(
        url: impl Into<Box<str>>,
        label: impl Into<Box<str>>,
    ) -> Result<Button, ValidationError> {
        let button = Button {
            r#type: ComponentType::Button,
            style: ButtonStyle::Link,
            label: Some(label.into()),
            emoji: None,
            custom_id: None,
            url: Some(url.into()),
            disabled: false,
        };

        button.validate()?;
        Ok(button)
    }

    pub fn with_emoji(mut self, emoji: Emoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.style == ButtonStyle::Link {
            if self.url.is_none() {
                return Err(ValidationError::LinkButtonWithoutUrl);
            }
            if self.custom_id.is_some() {
                return Err(ValidationError::LinkButtonWithCustomId);
            }
        } else {
            if self.url.is_some() {
                return Err(ValidationError::ButtonWithUrl);
            }
            match &self.custom_id {
                Some(custom_id) if !custom_id.is_empty() => check_len("custom_id", custom_id, 100)?,
                _ => return Err(ValidationError::ButtonWithoutCustomId),
            }
        }

        match (&self.label, &self.emoji) {
            (Some(label), _) if !label.is_empty() => check_len("label", label, 80),
            (_, Some(_)) => Ok(()),
            _ => Err(ValidationError::ButtonWithoutLabel),
        }
    }
}
