use crate::context::InteractionContext;
use crate::handler::{Handler, HandlerArgs};
use crate::registry::Registry;
use crate::rest::RestTransport;
use crate::verify::SignatureVerifier;
use crate::Error;
use model::interaction::{Interaction, InteractionPayload, InteractionResponse};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info_span, warn, Instrument, Span};

#[derive(Debug)]
pub enum Outcome {
    /// Missing or invalid signature. Answered with 401 and no body.
    Unauthorized,
    /// Body of a 200 response, plus the listener's after-response hook when a handler ran.
    Respond {
        body: Value,
        after: Option<AfterResponse>,
    },
}

impl Outcome {
    fn acknowledge() -> Outcome {
        Outcome::Respond {
            body: json!({}),
            after: None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Outcome::Unauthorized => None,
            Outcome::Respond { body, .. } => Some(body),
        }
    }
}

/// A handler's after-response hook, held back until the reply has been handed to the
/// connection.
pub struct AfterResponse {
    handler: Arc<dyn Handler>,
    ctx: InteractionContext,
    span: Span,
}

impl AfterResponse {
    /// Runs the hook to completion. Failures are logged and dropped.
    pub async fn run(self) {
        let AfterResponse { handler, ctx, span } = self;

        async move {
            if let Err(e) = handler.after_response(&ctx).await {
                error!(error = %e, "after-response hook failed");
            }
        }
        .instrument(span)
        .await
    }

    /// Spawns the hook once `released` fires. If the sender is dropped first the reply
    /// never went out and the hook is skipped.
    pub fn spawn_after(self, released: oneshot::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            match released.await {
                Ok(()) => self.run().await,
                Err(_) => warn!(
                    parent: &self.span,
                    "reply was dropped before it was sent, skipping after-response hook"
                ),
            }
        })
    }
}

impl fmt::Debug for AfterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AfterResponse")
            .field("interaction_id", &self.ctx.interaction().id)
            .finish_non_exhaustive()
    }
}

/// Verify, decode, route and invoke. Owns everything needed to turn one signed webhook
/// body into the HTTP reply.
pub struct Gateway {
    verifier: SignatureVerifier,
    registry: Arc<Registry>,
    rest: Arc<dyn RestTransport>,
}

impl Gateway {
    pub fn new(
        verifier: SignatureVerifier,
        registry: Registry,
        rest: Arc<dyn RestTransport>,
    ) -> Gateway {
        Gateway {
            verifier,
            registry: Arc::new(registry),
            rest,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rest(&self) -> &dyn RestTransport {
        self.rest.as_ref()
    }

    pub async fn process(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, Error> {
        let (signature, timestamp) = match (signature, timestamp) {
            (Some(signature), Some(timestamp)) => (signature, timestamp),
            _ => {
                warn!("request is missing signature headers");
                return Ok(Outcome::Unauthorized);
            }
        };

        if !self.verifier.verify(body, signature, timestamp) {
            return Ok(Outcome::Unauthorized);
        }

        let decoded = serde_json::from_slice::<Value>(body).and_then(Interaction::decode);
        let interaction = match decoded {
            Ok(Some(interaction)) => interaction,
            Ok(None) => {
                debug!("ignoring unsupported interaction");
                return Ok(Outcome::acknowledge());
            }
            Err(e) => {
                warn!(error = %e, "failed to decode interaction");
                return Ok(Outcome::acknowledge());
            }
        };

        if matches!(interaction.payload, InteractionPayload::Ping) {
            return Ok(Outcome::Respond {
                body: serde_json::to_value(InteractionResponse::new_pong())?,
                after: None,
            });
        }

        let listener = match self.registry.route(&interaction) {
            Some(listener) => listener,
            None => {
                debug!(interaction_id = %interaction.id, "no listener for interaction");
                return Ok(Outcome::acknowledge());
            }
        };

        let args = match HandlerArgs::project(&interaction) {
            Some(args) => args,
            None => return Ok(Outcome::acknowledge()),
        };

        let span = info_span!(
            "interaction",
            interaction_id = %interaction.id,
            listener = %listener.descriptor
        );

        let ctx = InteractionContext::new(interaction, self.rest.clone());
        listener
            .handler
            .handle(&ctx, args)
            .instrument(span.clone())
            .await?;

        let body = match ctx.initial_response() {
            Some(response) => serde_json::to_value(response)?,
            None => {
                debug!(parent: &span, "handler returned without an initial response");
                json!({})
            }
        };

        Ok(Outcome::Respond {
            body,
            after: Some(AfterResponse {
                handler: listener.handler.clone(),
                ctx,
                span,
            }),
        })
    }
}
