use crate::handler::Handler;
use crate::Error;
use model::interaction::{
    ApplicationCommandInteractionData, ApplicationCommandType, CommandDefinition, ComponentType,
    Interaction, InteractionPayload,
};
use model::Snowflake;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandScope {
    Global,
    Guild(Snowflake),
}

impl From<Option<Snowflake>> for CommandScope {
    fn from(guild_id: Option<Snowflake>) -> Self {
        match guild_id {
            Some(guild_id) => CommandScope::Guild(guild_id),
            None => CommandScope::Global,
        }
    }
}

/// Identifies which interactions a listener receives. Two descriptors are the same
/// listener if and only if they are equal, so the registry can hold at most one handler
/// per descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerDescriptor {
    SlashCommand { name: Box<str>, scope: CommandScope },
    UserCommand { name: Box<str>, scope: CommandScope },
    MessageCommand { name: Box<str>, scope: CommandScope },
    Component {
        custom_id: Box<str>,
        component_type: ComponentType,
    },
}

impl ListenerDescriptor {
    pub fn slash(name: impl Into<Box<str>>) -> Self {
        ListenerDescriptor::SlashCommand {
            name: name.into(),
            scope: CommandScope::Global,
        }
    }

    pub fn user(name: impl Into<Box<str>>) -> Self {
        ListenerDescriptor::UserCommand {
            name: name.into(),
            scope: CommandScope::Global,
        }
    }

    pub fn message(name: impl Into<Box<str>>) -> Self {
        ListenerDescriptor::MessageCommand {
            name: name.into(),
            scope: CommandScope::Global,
        }
    }

    pub fn button(custom_id: impl Into<Box<str>>) -> Self {
        ListenerDescriptor::Component {
            custom_id: custom_id.into(),
            component_type: ComponentType::Button,
        }
    }

    pub fn select_menu(custom_id: impl Into<Box<str>>) -> Self {
        ListenerDescriptor::Component {
            custom_id: custom_id.into(),
            component_type: ComponentType::SelectMenu,
        }
    }

    /// Restricts a command descriptor to a single guild. Component descriptors have no
    /// scope and are returned unchanged.
    pub fn in_guild(self, guild_id: Snowflake) -> Self {
        let scope = CommandScope::Guild(guild_id);

        match self {
            ListenerDescriptor::SlashCommand { name, .. } => {
                ListenerDescriptor::SlashCommand { name, scope }
            }
            ListenerDescriptor::UserCommand { name, .. } => {
                ListenerDescriptor::UserCommand { name, scope }
            }
            ListenerDescriptor::MessageCommand { name, .. } => {
                ListenerDescriptor::MessageCommand { name, scope }
            }
            component => component,
        }
    }

    pub fn for_definition(definition: &CommandDefinition) -> Self {
        let name = definition.name.clone();
        let scope = CommandScope::from(definition.guild_id);

        match definition.r#type {
            ApplicationCommandType::ChatInput => ListenerDescriptor::SlashCommand { name, scope },
            ApplicationCommandType::User => ListenerDescriptor::UserCommand { name, scope },
            ApplicationCommandType::Message => ListenerDescriptor::MessageCommand { name, scope },
        }
    }

    /// The descriptor a listener must have been registered with to receive `interaction`.
    /// Commands are keyed by the guild they are registered to, not the guild they were
    /// invoked in.
    pub fn for_interaction(interaction: &Interaction) -> Option<Self> {
        match &interaction.payload {
            InteractionPayload::Ping => None,
            InteractionPayload::ApplicationCommand(data) => {
                let name = Box::from(data.name());
                let scope = CommandScope::from(data.guild_id());

                Some(match data {
                    ApplicationCommandInteractionData::ChatInput(_) => {
                        ListenerDescriptor::SlashCommand { name, scope }
                    }
                    ApplicationCommandInteractionData::User(_) => {
                        ListenerDescriptor::UserCommand { name, scope }
                    }
                    ApplicationCommandInteractionData::Message(_) => {
                        ListenerDescriptor::MessageCommand { name, scope }
                    }
                })
            }
            InteractionPayload::MessageComponent(data) => Some(ListenerDescriptor::Component {
                custom_id: data.custom_id.clone(),
                component_type: data.component_type(),
            }),
        }
    }

    pub fn matches(&self, interaction: &Interaction) -> bool {
        ListenerDescriptor::for_interaction(interaction).as_ref() == Some(self)
    }
}

impl fmt::Display for ListenerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn scope(f: &mut fmt::Formatter<'_>, scope: &CommandScope) -> fmt::Result {
            match scope {
                CommandScope::Global => Ok(()),
                CommandScope::Guild(guild_id) => write!(f, " in guild {}", guild_id),
            }
        }

        match self {
            ListenerDescriptor::SlashCommand { name, scope: s } => {
                write!(f, "slash command /{}", name)?;
                scope(f, s)
            }
            ListenerDescriptor::UserCommand { name, scope: s } => {
                write!(f, "user command \"{}\"", name)?;
                scope(f, s)
            }
            ListenerDescriptor::MessageCommand { name, scope: s } => {
                write!(f, "message command \"{}\"", name)?;
                scope(f, s)
            }
            ListenerDescriptor::Component {
                custom_id,
                component_type,
            } => write!(f, "{:?} component \"{}\"", component_type, custom_id),
        }
    }
}

pub struct Listener {
    pub descriptor: ListenerDescriptor,
    pub handler: Arc<dyn Handler>,
    pub definition: Option<CommandDefinition>,
}

/// Maps descriptors to handlers. Built once at startup and only read afterwards.
#[derive(Default)]
pub struct Registry {
    listeners: HashMap<ListenerDescriptor, Listener>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn register<H: Handler + 'static>(
        &mut self,
        descriptor: ListenerDescriptor,
        handler: H,
    ) -> Result<(), Error> {
        self.insert(Listener {
            descriptor,
            handler: Arc::new(handler),
            definition: None,
        })
    }

    /// Registers a handler together with the command definition that is submitted to the
    /// platform by [`crate::commands::sync_commands`].
    pub fn register_command<H: Handler + 'static>(
        &mut self,
        definition: CommandDefinition,
        handler: H,
    ) -> Result<(), Error> {
        self.insert(Listener {
            descriptor: ListenerDescriptor::for_definition(&definition),
            handler: Arc::new(handler),
            definition: Some(definition),
        })
    }

    fn insert(&mut self, listener: Listener) -> Result<(), Error> {
        if self.listeners.contains_key(&listener.descriptor) {
            return Err(Error::RegistryCollision(listener.descriptor));
        }

        debug!(descriptor = %listener.descriptor, "registered listener");
        self.listeners.insert(listener.descriptor.clone(), listener);
        Ok(())
    }

    pub fn route(&self, interaction: &Interaction) -> Option<&Listener> {
        let descriptor = ListenerDescriptor::for_interaction(interaction)?;
        self.listeners.get(&descriptor)
    }

    pub fn command_definitions(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.listeners
            .values()
            .filter_map(|listener| listener.definition.as_ref())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
