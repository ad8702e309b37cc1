use super::ComponentType;
use crate::guild::Emoji;
use crate::util::is_false;
use crate::validation::{check_len, ValidationError};
use serde::{Deserialize, Serialize};

pub const MAX_SELECT_OPTIONS: usize = 25;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectMenu {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<str>>,
    /// 0-25
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    /// 1-25
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: Box<str>,
    pub value: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

impl SelectMenu {
    pub fn new(
        custom_id: impl Into<Box<str>>,
        options: Vec<SelectOption>,
    ) -> Result<SelectMenu, ValidationError> {
        let menu = SelectMenu {
            r#type: ComponentType::SelectMenu,
            custom_id: custom_id.into(),
            options,
            placeholder: None,
            min_values: None,
            max_values: None,
            disabled: false,
        };

        menu.validate()?;
        Ok(menu)
    }

    pub fn with_placeholder(
        mut self,
        placeholder: impl Into<Box<str>>,
    ) -> Result<Self, ValidationError> {
        self.placeholder = Some(placeholder.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_values(mut self, min_values: u8, max_values: u8) -> Result<Self, ValidationError> {
        self.min_values = Some(min_values);
        self.max_values = Some(max_values);
        self.validate()?;
        Ok(self)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("custom_id", &self.custom_id, 100)?;

        if let Some(placeholder) = &self.placeholder {
            check_len("placeholder", placeholder, 100)?;
        }

        let count = self.options.len();
        if count == 0 || count > MAX_SELECT_OPTIONS {
            return Err(ValidationError::SelectOptionCount {
                min: 1,
                max: MAX_SELECT_OPTIONS,
                got: count,
            });
        }

        let max = MAX_SELECT_OPTIONS as u8;
        if let Some(min_values) = self.min_values {
            if min_values > max {
                return Err(ValidationError::MinValuesOutOfRange { max, got: min_values });
            }
        }

        if let Some(max_values) = self.max_values {
            if max_values == 0 || max_values > max {
                return Err(ValidationError::MaxValuesOutOfRange { max, got: max_values });
            }
        }

        if let (Some(min), Some(max)) = (self.min_values, self.max_values) {
            if min > max {
                return Err(ValidationError::MinExceedsMax { min, max });
            }
        }

        self.options.iter().try_for_each(SelectOption::validate)
    }
}

impl SelectOption {
    pub fn new(
        label: impl Into<Box<str>>,
        value: impl Into<Box<str>>,
    ) -> Result<SelectOption, ValidationError> {
        let option = SelectOption {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        };

        option.validate()?;
        Ok(option)
    }

    pub fn with_description(
        mut self,
        description: impl Into<Box<str>>,
    ) -> Result<Self, ValidationError> {
        self.description = Some(description.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_emoji(mut self, emoji: Emoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    pub fn selected(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("option label", &self.label, 100)?;
        check_len("option value", &self.value, 100)?;

        if let Some(description) = &self.description {
            check_len("option description", description, 100)?;
        }

        Ok(())
    }
}
