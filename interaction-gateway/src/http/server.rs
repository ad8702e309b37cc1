use crate::gateway::Gateway;
use crate::http::response::ErrorResponse;
use crate::registry::Registry;
use crate::rest::{RestClient, RestTransport};
use crate::{Config, Error};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::reply::Json;
use warp::{Filter, Rejection};

pub struct Server {
    pub config: Config,
    pub gateway: Gateway,
}

impl Server {
    pub fn new(config: Config, registry: Registry) -> Result<Server, Error> {
        let rest: Arc<dyn RestTransport> =
            Arc::new(RestClient::new(&config.api_base, &config.bot_token)?);
        let gateway = Gateway::new(config.verifier()?, registry, rest);

        Ok(Server::with_gateway(config, gateway))
    }

    pub fn with_gateway(config: Config, gateway: Gateway) -> Server {
        Server { config, gateway }
    }

    pub async fn start(self) -> Result<(), Error> {
        let address: SocketAddr = self.config.server_addr.parse()?;
        info!(%address, route = %self.config.interactions_route, "starting server");

        let filter = Arc::new(self).filter_handle();

        warp::serve(filter).run(address).await;

        Ok(())
    }

    pub fn filter_handle(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let route: Arc<str> = Arc::from(format!("/{}", self.config.interactions_route));

        warp::post()
            .and(Server::match_route(route))
            .and(warp::any().map(move || self.clone()))
            .and(warp::header::optional::<String>("x-signature-ed25519"))
            .and(warp::header::optional::<String>("x-signature-timestamp"))
            .and(warp::body::bytes())
            .and_then(super::handle)
            .with(warp::log("interaction_gateway::http"))
            .recover(|error: Rejection| async move {
                if let Some(err) = error.find::<Error>() {
                    let json: Json = ErrorResponse::from(err).into();
                    Ok(warp::reply::with_status(
                        json,
                        StatusCode::INTERNAL_SERVER_ERROR,
                    ))
                } else {
                    Err(error)
                }
            })
    }

    // the route may span several segments, which warp::path does not accept
    fn match_route(route: Arc<str>) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
        warp::path::full()
            .and_then(move |path: FullPath| {
                let route = route.clone();
                async move {
                    if path.as_str() == &*route {
                        Ok(())
                    } else {
                        Err(warp::reject::not_found())
                    }
                }
            })
            .untuple_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ResponseBuilder;
    use crate::context::InteractionContext;
    use crate::handler::{Handler, HandlerArgs};
    use crate::testing::{public_key_hex, sign, MockTransport};
    use crate::verify::SignatureVerifier;
    use async_trait::async_trait;
    use model::interaction::CommandDefinition;
    use model::Snowflake;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    const TIMESTAMP: &str = "1625603592";

    struct Echo;

    #[async_trait]
    impl Handler for Echo {
        async fn handle(&self, ctx: &InteractionContext, args: HandlerArgs) -> Result<(), Error> {
            let text = match &args {
                HandlerArgs::SlashCommand(args) => args.get_str("text").unwrap_or_default(),
                _ => "",
            };

            ctx.create_response(ResponseBuilder::message().content(text))
        }
    }

    struct Later {
        done: Mutex<Option<oneshot::Sender<Value>>>,
    }

    #[async_trait]
    impl Handler for Later {
        async fn handle(&self, ctx: &InteractionContext, _: HandlerArgs) -> Result<(), Error> {
            ctx.defer(true)
        }

        async fn after_response(&self, ctx: &InteractionContext) -> Result<(), Error> {
            let response = serde_json::to_value(ctx.initial_response())?;
            if let Some(done) = self.done.lock().unwrap().take() {
                let _ = done.send(response);
            }

            Ok(())
        }
    }

    fn config() -> Config {
        Config {
            server_addr: Box::from("127.0.0.1:0"),
            application_id: Snowflake(20),
            public_key: public_key_hex().into_boxed_str(),
            bot_token: Box::from("token"),
            guild_ids: Vec::new(),
            api_base: Box::from("http://localhost"),
            interactions_route: Box::from("discord/interactions"),
            sync_commands: false,
            json_log: false,
        }
    }

    fn server() -> Arc<Server> {
        let mut registry = Registry::new();
        registry
            .register_command(CommandDefinition::slash("echo", "Echo text").unwrap(), Echo)
            .unwrap();

        let config = config();
        let verifier = SignatureVerifier::from_hex(&config.public_key).unwrap();
        let gateway = Gateway::new(verifier, registry, Arc::new(MockTransport::default()));

        Arc::new(Server::with_gateway(config, gateway))
    }

    fn echo(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "type": 2,
            "id": "1",
            "application_id": "20",
            "token": "tok",
            "data": {
                "id": "2",
                "name": "echo",
                "type": 1,
                "options": [{ "name": "text", "type": 3, "value": text }],
            },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_signed_command() {
        let filter = server().filter_handle();
        let body = echo("hello");

        let res = warp::test::request()
            .method("POST")
            .path("/discord/interactions")
            .header("x-signature-ed25519", sign(TIMESTAMP, &body))
            .header("x-signature-timestamp", TIMESTAMP)
            .body(body)
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json, json!({ "type": 4, "data": { "content": "hello" } }));
    }

    #[tokio::test]
    async fn test_hook_runs_after_reply() {
        let (tx, rx) = oneshot::channel();
        let mut registry = Registry::new();
        registry
            .register_command(
                CommandDefinition::slash("echo", "Deferred echo").unwrap(),
                Later {
                    done: Mutex::new(Some(tx)),
                },
            )
            .unwrap();

        let config = config();
        let verifier = SignatureVerifier::from_hex(&config.public_key).unwrap();
        let gateway = Gateway::new(verifier, registry, Arc::new(MockTransport::default()));
        let filter = Arc::new(Server::with_gateway(config, gateway)).filter_handle();

        let body = echo("hello");
        let res = warp::test::request()
            .method("POST")
            .path("/discord/interactions")
            .header("x-signature-ed25519", sign(TIMESTAMP, &body))
            .header("x-signature-timestamp", TIMESTAMP)
            .body(body)
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json, json!({ "type": 5, "data": { "flags": 64 } }));

        // the hook sees the same response that went out
        assert_eq!(rx.await.unwrap(), json);
    }

    #[tokio::test]
    async fn test_unsigned_request() {
        let filter = server().filter_handle();

        let res = warp::test::request()
            .method("POST")
            .path("/discord/interactions")
            .body(echo("hello"))
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_is_500() {
        let filter = server().filter_handle();
        // empty content fails response validation inside the handler
        let body = echo("");

        let res = warp::test::request()
            .method("POST")
            .path("/discord/interactions")
            .header("x-signature-ed25519", sign(TIMESTAMP, &body))
            .header("x-signature-timestamp", TIMESTAMP)
            .body(body)
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(
            json,
            json!({
                "error": "invalid response: response data must not be empty for a non-deferred response type"
            })
        );
    }

    #[tokio::test]
    async fn test_wrong_path() {
        let filter = server().filter_handle();

        let res = warp::test::request()
            .method("POST")
            .path("/interactions")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
