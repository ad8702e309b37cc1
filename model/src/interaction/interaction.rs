use crate::channel::message::Message;
use crate::guild::Member;
use crate::interaction::{ApplicationCommandInteractionData, ComponentType};
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutoComplete = 4,
    ModalSubmit = 5,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutoComplete,
            5 => Self::ModalSubmit,
            _ => return Err(format!("invalid interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

/// A decoded inbound interaction.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub token: Box<str>,
    pub version: u8,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub payload: InteractionPayload,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum InteractionPayload {
    Ping,
    ApplicationCommand(ApplicationCommandInteractionData),
    MessageComponent(MessageComponentInteractionData),
}

// ============================================================================
// Message Component Interaction
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
    pub kind: ComponentInteractionKind,
    /// Message the clicked component is attached to.
    pub message: Option<Message>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum ComponentInteractionKind {
    Button,
    SelectMenu { values: Vec<Box<str>> },
}

impl MessageComponentInteractionData {
    pub fn component_type(&self) -> ComponentType {
        match self.kind {
            ComponentInteractionKind::Button => ComponentType::Button,
            ComponentInteractionKind::SelectMenu { .. } => ComponentType::SelectMenu,
        }
    }

    /// Selected option values; empty for buttons.
    pub fn values(&self) -> &[Box<str>] {
        match &self.kind {
            ComponentInteractionKind::Button => &[],
            ComponentInteractionKind::SelectMenu { values } => values,
        }
    }
}

#[derive(Deserialize)]
struct RawComponentData {
    custom_id: Box<str>,
    component_type: u64,
    #[serde(default)]
    values: Vec<Box<str>>,
}

impl MessageComponentInteractionData {
    fn decode(data: Value, message: Option<Message>) -> Result<Option<Self>, serde_json::Error> {
        let raw: RawComponentData = serde_json::from_value(data)?;

        let kind = match ComponentType::try_from(raw.component_type) {
            Ok(ComponentType::Button) => ComponentInteractionKind::Button,
            Ok(ComponentType::SelectMenu) => ComponentInteractionKind::SelectMenu { values: raw.values },
            Ok(ComponentType::ActionRow) | Err(_) => return Ok(None),
        };

        Ok(Some(MessageComponentInteractionData {
            custom_id: raw.custom_id,
            kind,
            message,
        }))
    }
}

// ============================================================================
// Decoding
// ============================================================================

#[derive(Deserialize)]
struct RawInteraction {
    #[serde(default)]
    id: Snowflake,
    #[serde(default)]
    application_id: Snowflake,
    #[serde(default)]
    token: Box<str>,
    #[serde(default = "one")]
    version: u8,
    #[serde(default)]
    guild_id: Option<Snowflake>,
    #[serde(default)]
    channel_id: Option<Snowflake>,
    #[serde(default)]
    member: Option<Member>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    data: Option<Value>,
}

fn one() -> u8 {
    1
}

impl Interaction {
    /// Decodes a raw interaction payload into one of the supported variants.
    ///
    /// Discriminators this crate does not handle (autocomplete, modal submits, unknown
    /// command or component types) yield `Ok(None)`. A missing or non-integer `type`, a
    /// missing `data` object or a malformed variant body is an error.
    pub fn decode(value: Value) -> Result<Option<Interaction>, serde_json::Error> {
        let interaction_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| serde_json::Error::custom("interaction type was not an integer"))?;

        let interaction_type = match InteractionType::try_from(interaction_type) {
            Ok(interaction_type) => interaction_type,
            Err(_) => return Ok(None),
        };

        let raw: RawInteraction = serde_json::from_value(value)?;

        let payload = match interaction_type {
            InteractionType::Ping => Some(InteractionPayload::Ping),
            InteractionType::ApplicationCommand => {
                let data = raw.data.ok_or_else(|| serde_json::Error::missing_field("data"))?;
                ApplicationCommandInteractionData::decode(data)?
                    .map(InteractionPayload::ApplicationCommand)
            }
            InteractionType::MessageComponent => {
                let data = raw.data.ok_or_else(|| serde_json::Error::missing_field("data"))?;
                MessageComponentInteractionData::decode(data, raw.message)?
                    .map(InteractionPayload::MessageComponent)
            }
            InteractionType::ApplicationCommandAutoComplete | InteractionType::ModalSubmit => None,
        };

        Ok(payload.map(|payload| Interaction {
            id: raw.id,
            application_id: raw.application_id,
            token: raw.token,
            version: raw.version,
            guild_id: raw.guild_id,
            channel_id: raw.channel_id,
            member: raw.member,
            user: raw.user,
            payload,
        }))
    }

    pub fn interaction_type(&self) -> InteractionType {
        match self.payload {
            InteractionPayload::Ping => InteractionType::Ping,
            InteractionPayload::ApplicationCommand(_) => InteractionType::ApplicationCommand,
            InteractionPayload::MessageComponent(_) => InteractionType::MessageComponent,
        }
    }

    /// The user who triggered the interaction, from `member.user` in guilds or `user` in DMs.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{ApplicationCommandInteractionDataOption, OptionValue};
    use serde_json::json;

    fn assert_exclusive(options: &[ApplicationCommandInteractionDataOption]) {
        for option in options {
            match &option.value {
                OptionValue::Leaf(_) => assert!(!option.r#type.is_nested()),
                OptionValue::Nested(children) => {
                    assert!(option.r#type.is_nested());
                    assert_exclusive(children);
                }
            }
        }
    }

    #[test]
    fn test_decode_ping() {
        let interaction = Interaction::decode(json!({ "type": 1, "id": "1", "application_id": "2" }))
            .unwrap()
            .unwrap();
        assert_eq!(interaction.payload, InteractionPayload::Ping);
        assert_eq!(interaction.application_id, Snowflake(2));
        assert_eq!(interaction.version, 1);
    }

    #[test]
    fn test_decode_button() {
        let interaction = Interaction::decode(json!({
            "type": 3,
            "data": { "custom_id": "ok", "component_type": 2 }
        }))
        .unwrap()
        .unwrap();

        match interaction.payload {
            InteractionPayload::MessageComponent(data) => {
                assert_eq!(&*data.custom_id, "ok");
                assert_eq!(data.kind, ComponentInteractionKind::Button);
                assert!(data.values().is_empty());
            }
            other => panic!("expected component payload, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_select_with_no_values() {
        let interaction = Interaction::decode(json!({
            "type": 3,
            "token": "abc",
            "data": { "custom_id": "pick", "component_type": 3, "values": [] }
        }))
        .unwrap()
        .unwrap();

        match interaction.payload {
            InteractionPayload::MessageComponent(data) => {
                assert_eq!(data.component_type(), ComponentType::SelectMenu);
                assert!(data.values().is_empty());
            }
            other => panic!("expected component payload, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_nested_slash_command() {
        let interaction = Interaction::decode(json!({
            "type": 2,
            "id": "10",
            "application_id": "20",
            "token": "tok",
            "version": 1,
            "guild_id": "30",
            "channel_id": "40",
            "member": {
                "user": { "id": "50", "username": "alice" },
                "roles": ["60"],
                "joined_at": "2021-06-01T12:00:00.000000+00:00"
            },
            "data": {
                "id": "70",
                "name": "ticket",
                "type": 1,
                "options": [{
                    "name": "admin",
                    "type": 2,
                    "options": [{
                        "name": "add",
                        "type": 1,
                        "options": [
                            { "name": "user", "type": 6, "value": "80" },
                            { "name": "silent", "type": 5, "value": true }
                        ]
                    }]
                }]
            }
        }))
        .unwrap()
        .unwrap();

        assert_eq!(interaction.invoker().map(|user| user.id), Some(Snowflake(50)));

        let data = match interaction.payload {
            InteractionPayload::ApplicationCommand(ApplicationCommandInteractionData::ChatInput(data)) => data,
            other => panic!("expected slash command, got {:?}", other),
        };

        assert_eq!(&*data.name, "ticket");
        assert_eq!(data.guild_id, None);
        assert_exclusive(&data.options);

        let add = &data.options[0].options().unwrap()[0];
        assert_eq!(&*add.name, "add");
        assert_eq!(add.options().unwrap()[1].value(), Some(&json!(true)));
    }

    #[test]
    fn test_decode_user_command() {
        let interaction = Interaction::decode(json!({
            "type": 2,
            "guild_id": "1",
            "data": {
                "id": "2",
                "name": "User Info",
                "type": 2,
                "guild_id": "1",
                "target_id": "3",
                "resolved": {
                    "users": { "3": { "id": "3", "username": "bob" } },
                    "members": { "3": { "roles": [], "joined_at": "2021-06-01T12:00:00+00:00", "nick": "bobby" } }
                }
            }
        }))
        .unwrap()
        .unwrap();

        let data = match interaction.payload {
            InteractionPayload::ApplicationCommand(ApplicationCommandInteractionData::User(data)) => data,
            other => panic!("expected user command, got {:?}", other),
        };

        assert_eq!(data.guild_id, Some(Snowflake(1)));
        assert_eq!(&*data.target.user.username, "bob");

        let member = data.target.member.unwrap();
        assert_eq!(member.nick.as_deref(), Some("bobby"));
        assert_eq!(member.user.map(|user| user.id), Some(Snowflake(3)));
    }

    #[test]
    fn test_decode_message_command() {
        let interaction = Interaction::decode(json!({
            "type": 2,
            "data": {
                "name": "Quote",
                "type": 3,
                "resolved": {
                    "messages": {
                        "9": { "id": "9", "channel_id": "8", "content": "hello there" }
                    }
                }
            }
        }))
        .unwrap()
        .unwrap();

        match interaction.payload {
            InteractionPayload::ApplicationCommand(ApplicationCommandInteractionData::Message(data)) => {
                assert_eq!(data.target_id, Snowflake(9));
                assert_eq!(&*data.message.content, "hello there");
            }
            other => panic!("expected message command, got {:?}", other),
        }
    }

    #[test]
    fn test_user_command_without_resolved_user_fails() {
        let res = Interaction::decode(json!({
            "type": 2,
            "data": { "name": "User Info", "type": 2, "resolved": { "users": {} } }
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_types_decode_to_none() {
        assert!(Interaction::decode(json!({ "type": 42 })).unwrap().is_none());
        assert!(Interaction::decode(json!({ "type": 4, "data": {} })).unwrap().is_none());
        assert!(Interaction::decode(json!({ "type": 2, "data": { "name": "x", "type": 7 } }))
            .unwrap()
            .is_none());
        assert!(Interaction::decode(json!({
            "type": 3,
            "data": { "custom_id": "x", "component_type": 4 }
        }))
        .unwrap()
        .is_none());
    }

    #[test]
    fn test_missing_required_fields_fail() {
        assert!(Interaction::decode(json!({ "id": "1" })).is_err());
        assert!(Interaction::decode(json!({ "type": 3 })).is_err());
        assert!(Interaction::decode(json!({ "type": 3, "data": { "component_type": 2 } })).is_err());
    }
}
