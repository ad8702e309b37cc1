use super::{Component, ComponentType};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub const MAX_ROW_BUTTONS: usize = 5;

/// Layout container for interactive components: up to five buttons, or exactly one
/// select menu.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionRow {
    pub r#type: ComponentType,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Result<ActionRow, ValidationError> {
        let row = ActionRow {
            r#type: ComponentType::ActionRow,
            components,
        };

        row.validate()?;
        Ok(row)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.components.is_empty() {
            return Err(ValidationError::EmptyActionRow);
        }

        let mut buttons = 0;
        let mut menus = 0;
        for component in &self.components {
            match component {
                Component::ActionRow(_) => return Err(ValidationError::NestedActionRow),
                Component::Button(_) => buttons += 1,
                Component::SelectMenu(_) => menus += 1,
            }
        }

        if buttons > 0 && menus > 0 {
            return Err(ValidationError::MixedActionRow);
        }

        if menus > 1 {
            return Err(ValidationError::MultipleSelectMenus);
        }

        if buttons > MAX_ROW_BUTTONS {
            return Err(ValidationError::TooManyButtons {
                max: MAX_ROW_BUTTONS,
                got: buttons,
            });
        }

        self.components.iter().try_for_each(Component::validate)
    }
}

impl TryFrom<Vec<Component>> for ActionRow {
    type Error = ValidationError;

    fn try_from(components: Vec<Component>) -> Result<Self, Self::Error> {
        ActionRow::new(components)
    }
}
