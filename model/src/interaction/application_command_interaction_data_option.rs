use crate::interaction::ApplicationCommandOptionType;
use serde::de::Error;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// An option node supplied with a slash command invocation. Leaves carry a value,
/// sub-commands and groups carry nested options; a node is never both.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationCommandInteractionDataOption {
    pub name: Box<str>,
    pub r#type: ApplicationCommandOptionType,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Leaf(Value),
    Nested(Vec<ApplicationCommandInteractionDataOption>),
}

impl ApplicationCommandInteractionDataOption {
    pub fn value(&self) -> Option<&Value> {
        match &self.value {
            OptionValue::Leaf(value) => Some(value),
            OptionValue::Nested(_) => None,
        }
    }

    pub fn options(&self) -> Option<&[ApplicationCommandInteractionDataOption]> {
        match &self.value {
            OptionValue::Leaf(_) => None,
            OptionValue::Nested(options) => Some(options),
        }
    }
}

#[derive(Deserialize)]
struct RawOption {
    name: Box<str>,
    r#type: ApplicationCommandOptionType,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    options: Option<Vec<ApplicationCommandInteractionDataOption>>,
}

impl<'de> Deserialize<'de> for ApplicationCommandInteractionDataOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawOption::deserialize(deserializer)?;

        // the option type decides the shape; a stray field of the other shape is ignored
        let value = if raw.r#type.is_nested() {
            OptionValue::Nested(raw.options.unwrap_or_default())
        } else {
            match raw.value {
                Some(value) => OptionValue::Leaf(value),
                None => return Err(D::Error::missing_field("value")),
            }
        };

        Ok(ApplicationCommandInteractionDataOption {
            name: raw.name,
            r#type: raw.r#type,
            value,
        })
    }
}

impl Serialize for ApplicationCommandInteractionDataOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApplicationCommandInteractionDataOption", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.r#type)?;

        match &self.value {
            OptionValue::Leaf(value) => state.serialize_field("value", value)?,
            OptionValue::Nested(options) => state.serialize_field("options", options)?,
        }

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_requires_value() {
        let res: Result<ApplicationCommandInteractionDataOption, _> =
            serde_json::from_value(json!({ "name": "reason", "type": 3 }));
        assert!(res.is_err());
    }

    #[test]
    fn test_sub_command_without_options_is_nested() {
        let option: ApplicationCommandInteractionDataOption =
            serde_json::from_value(json!({ "name": "list", "type": 1 })).unwrap();
        assert_eq!(option.value, OptionValue::Nested(Vec::new()));
        assert!(option.value().is_none());
    }

    #[test]
    fn test_leaf_ignores_stray_options() {
        let option: ApplicationCommandInteractionDataOption = serde_json::from_value(json!({
            "name": "amount",
            "type": 4,
            "value": 3,
            "options": [{ "name": "x", "type": 3, "value": "y" }]
        }))
        .unwrap();

        assert_eq!(option.value(), Some(&json!(3)));
        assert!(option.options().is_none());
    }

    #[test]
    fn test_serialize_keeps_shape() {
        let option: ApplicationCommandInteractionDataOption = serde_json::from_value(json!({
            "name": "add",
            "type": 1,
            "options": [{ "name": "user", "type": 6, "value": "123" }]
        }))
        .unwrap();

        let value = serde_json::to_value(&option).unwrap();
        assert!(value.get("value").is_none());
        assert_eq!(value["options"][0]["value"], "123");
    }
}
