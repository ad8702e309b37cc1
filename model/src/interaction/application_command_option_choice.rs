use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApplicationCommandOptionChoice {
    pub name: Box<str>,
    pub value: Value, // string, integer or number
}

impl ApplicationCommandOptionChoice {
    pub fn new(name: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        ApplicationCommandOptionChoice {
            name: name.into(),
            value: value.into(),
        }
    }
}
