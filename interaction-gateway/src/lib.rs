pub mod builder;
pub mod commands;
pub mod context;
pub mod gateway;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod registry;
pub mod rest;
pub mod verify;

mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub use builder::ResponseBuilder;
pub use context::InteractionContext;
pub use handler::{CommandArguments, Handler, HandlerArgs};
pub use registry::{CommandScope, ListenerDescriptor, Registry};

#[cfg(test)]
mod testing;
