use crate::context::InteractionContext;
use crate::Error;
use async_trait::async_trait;
use model::channel::message::Message;
use model::interaction::{
    ApplicationCommandInteractionData, ApplicationCommandInteractionDataOption,
    ComponentInteractionKind, Interaction, InteractionPayload, OptionValue, ResolvedUser,
};
use model::Snowflake;
use serde_json::Value;
use std::collections::HashMap;

/// Registered against a [`crate::registry::ListenerDescriptor`] and invoked with the
/// arguments projected from the matching interaction.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &InteractionContext, args: HandlerArgs) -> Result<(), Error>;

    /// Runs once the initial response has been handed back to the platform. Errors are
    /// logged and otherwise dropped.
    async fn after_response(&self, _ctx: &InteractionContext) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandlerArgs {
    SlashCommand(CommandArguments),
    UserCommand(ResolvedUser),
    MessageCommand(Message),
    SelectMenu(Vec<Box<str>>),
    Button,
}

impl HandlerArgs {
    /// `None` for interactions that never reach a handler, i.e. pings.
    pub fn project(interaction: &Interaction) -> Option<HandlerArgs> {
        match &interaction.payload {
            InteractionPayload::Ping => None,
            InteractionPayload::ApplicationCommand(data) => Some(match data {
                ApplicationCommandInteractionData::ChatInput(data) => {
                    HandlerArgs::SlashCommand(CommandArguments::from_options(&data.options))
                }
                ApplicationCommandInteractionData::User(data) => {
                    HandlerArgs::UserCommand(data.target.clone())
                }
                ApplicationCommandInteractionData::Message(data) => {
                    HandlerArgs::MessageCommand(data.message.clone())
                }
            }),
            InteractionPayload::MessageComponent(data) => Some(match &data.kind {
                ComponentInteractionKind::Button => HandlerArgs::Button,
                ComponentInteractionKind::SelectMenu { values } => {
                    HandlerArgs::SelectMenu(values.clone())
                }
            }),
        }
    }
}

/// Slash command options flattened to `name -> value`. Sub-command groups and
/// sub-commands are walked down to the invoked leaf, whose names are kept in
/// `subcommand`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArguments {
    pub subcommand: Vec<Box<str>>,
    pub values: HashMap<Box<str>, Value>,
}

impl CommandArguments {
    pub fn from_options(options: &[ApplicationCommandInteractionDataOption]) -> CommandArguments {
        let mut args = CommandArguments::default();
        let mut level = options;

        loop {
            let nested = level.iter().find_map(|option| match &option.value {
                OptionValue::Nested(children) => Some((&option.name, children)),
                OptionValue::Leaf(_) => None,
            });

            match nested {
                Some((name, children)) => {
                    args.subcommand.push(name.clone());
                    level = children.as_slice();
                }
                None => break,
            }
        }

        for option in level {
            if let OptionValue::Leaf(value) = &option.value {
                args.values.insert(option.name.clone(), value.clone());
            }
        }

        args
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// User, channel, role, mentionable and attachment options carry their id as a string.
    pub fn get_snowflake(&self, name: &str) -> Option<Snowflake> {
        self.get_str(name).and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Interaction {
        Interaction::decode(value).unwrap().unwrap()
    }

    #[test]
    fn test_button_has_no_args() {
        let interaction = decode(json!({
            "type": 3,
            "data": { "custom_id": "confirm", "component_type": 2 },
        }));

        assert_eq!(HandlerArgs::project(&interaction), Some(HandlerArgs::Button));
    }

    #[test]
    fn test_select_values() {
        let interaction = decode(json!({
            "type": 3,
            "data": { "custom_id": "colour", "component_type": 3, "values": ["red", "blue"] },
        }));

        assert_eq!(
            HandlerArgs::project(&interaction),
            Some(HandlerArgs::SelectMenu(vec![Box::from("red"), Box::from("blue")]))
        );
    }

    #[test]
    fn test_ping_has_no_projection() {
        let interaction = decode(json!({ "type": 1 }));
        assert_eq!(HandlerArgs::project(&interaction), None);
    }

    #[test]
    fn test_flat_options() {
        let interaction = decode(json!({
            "type": 2,
            "data": {
                "id": "1",
                "name": "echo",
                "type": 1,
                "options": [
                    { "name": "text", "type": 3, "value": "hello" },
                    { "name": "times", "type": 4, "value": 3 },
                ],
            },
        }));

        let args = match HandlerArgs::project(&interaction) {
            Some(HandlerArgs::SlashCommand(args)) => args,
            other => panic!("unexpected projection {:?}", other),
        };

        assert!(args.subcommand.is_empty());
        assert_eq!(args.get_str("text"), Some("hello"));
        assert_eq!(args.get_i64("times"), Some(3));
        assert_eq!(args.get("missing"), None);
    }

    #[test]
    fn test_nested_options() {
        let options: Vec<ApplicationCommandInteractionDataOption> = serde_json::from_value(json!([
            {
                "name": "tag",
                "type": 2,
                "options": [{
                    "name": "add",
                    "type": 1,
                    "options": [
                        { "name": "user", "type": 6, "value": "123" },
                        { "name": "public", "type": 5, "value": true },
                    ],
                }],
            }
        ]))
        .unwrap();

        let args = CommandArguments::from_options(&options);
        assert_eq!(args.subcommand, vec![Box::<str>::from("tag"), Box::from("add")]);
        assert_eq!(args.get_snowflake("user"), Some(Snowflake(123)));
        assert_eq!(args.get_bool("public"), Some(true));
        assert_eq!(args.values.len(), 2);
    }

    #[test]
    fn test_subcommand_without_options() {
        let options: Vec<ApplicationCommandInteractionDataOption> =
            serde_json::from_value(json!([{ "name": "list", "type": 1 }])).unwrap();

        let args = CommandArguments::from_options(&options);
        assert_eq!(args.subcommand, vec![Box::<str>::from("list")]);
        assert!(args.values.is_empty());
    }
}
