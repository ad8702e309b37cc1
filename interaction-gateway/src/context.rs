use crate::builder::ResponseBuilder;
use crate::lifecycle::{LifecycleState, ResponseLifecycle};
use crate::rest::{MessageTarget, RestTransport, Route};
use crate::Error;
use model::channel::message::Message;
use model::interaction::{Interaction, InteractionResponse};
use model::Snowflake;
use std::sync::Arc;
use tracing::debug;

/// Per-interaction handle passed to handlers. Holds the decoded interaction, its
/// response lifecycle and the transport used for follow-ups and edits.
pub struct InteractionContext {
    interaction: Interaction,
    lifecycle: ResponseLifecycle,
    rest: Arc<dyn RestTransport>,
}

impl InteractionContext {
    pub fn new(interaction: Interaction, rest: Arc<dyn RestTransport>) -> InteractionContext {
        InteractionContext {
            interaction,
            lifecycle: ResponseLifecycle::new(),
            rest,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn initial_response(&self) -> Option<&InteractionResponse> {
        self.lifecycle.initial_response()
    }

    /// Validates and records the initial response. It is serialized into the HTTP
    /// reply once the handler returns.
    pub fn create_response(&self, builder: ResponseBuilder) -> Result<(), Error> {
        let response = builder.build()?;
        self.lifecycle.record(response)?;

        debug!(interaction_id = %self.interaction.id, "recorded initial response");
        Ok(())
    }

    pub fn respond(&self, content: impl Into<Box<str>>) -> Result<(), Error> {
        self.create_response(ResponseBuilder::message().content(content))
    }

    pub fn defer(&self, ephemeral: bool) -> Result<(), Error> {
        self.create_response(ResponseBuilder::deferred(ephemeral))
    }

    pub fn defer_update(&self) -> Result<(), Error> {
        self.create_response(ResponseBuilder::deferred_update())
    }

    pub async fn followup(&self, builder: ResponseBuilder) -> Result<Message, Error> {
        self.lifecycle.ensure_responded()?;
        let data = builder.build_message()?;

        let route = Route::CreateFollowup {
            application_id: self.interaction.application_id,
            token: self.interaction.token.clone(),
        };

        self.send_message(route, serde_json::to_value(&data)?).await
    }

    pub async fn edit_followup(
        &self,
        message_id: Snowflake,
        builder: ResponseBuilder,
    ) -> Result<Message, Error> {
        self.edit_message(MessageTarget::Id(message_id), builder).await
    }

    pub async fn delete_followup(&self, message_id: Snowflake) -> Result<(), Error> {
        self.delete_message(MessageTarget::Id(message_id)).await
    }

    pub async fn edit_initial_response(&self, builder: ResponseBuilder) -> Result<Message, Error> {
        self.edit_message(MessageTarget::Original, builder).await
    }

    pub async fn delete_initial_response(&self) -> Result<(), Error> {
        self.delete_message(MessageTarget::Original).await
    }

    async fn edit_message(
        &self,
        message: MessageTarget,
        builder: ResponseBuilder,
    ) -> Result<Message, Error> {
        self.lifecycle.ensure_responded()?;
        let data = builder.build_edit()?;

        let route = Route::EditMessage {
            application_id: self.interaction.application_id,
            token: self.interaction.token.clone(),
            message,
        };

        self.send_message(route, serde_json::to_value(&data)?).await
    }

    async fn delete_message(&self, message: MessageTarget) -> Result<(), Error> {
        self.lifecycle.ensure_responded()?;

        let route = Route::DeleteMessage {
            application_id: self.interaction.application_id,
            token: self.interaction.token.clone(),
            message,
        };

        self.rest.execute(route, None).await?;
        Ok(())
    }

    async fn send_message(&self, route: Route, body: serde_json::Value) -> Result<Message, Error> {
        match self.rest.execute(route, Some(body)).await? {
            Some(message) => Ok(serde_json::from_value(message)?),
            None => Err(Error::handler("platform returned no message")),
        }
    }
}
