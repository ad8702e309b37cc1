use crate::Error;
use async_trait::async_trait;
use model::Snowflake;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Original,
    Id(Snowflake),
}

impl fmt::Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTarget::Original => f.write_str("@original"),
            MessageTarget::Id(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateFollowup {
        application_id: Snowflake,
        token: Box<str>,
    },
    EditMessage {
        application_id: Snowflake,
        token: Box<str>,
        message: MessageTarget,
    },
    DeleteMessage {
        application_id: Snowflake,
        token: Box<str>,
        message: MessageTarget,
    },
    OverwriteGlobalCommands {
        application_id: Snowflake,
    },
    OverwriteGuildCommands {
        application_id: Snowflake,
        guild_id: Snowflake,
    },
}

impl Route {
    pub fn method(&self) -> Method {
        match self {
            Route::CreateFollowup { .. } => Method::POST,
            Route::EditMessage { .. } => Method::PATCH,
            Route::DeleteMessage { .. } => Method::DELETE,
            Route::OverwriteGlobalCommands { .. } | Route::OverwriteGuildCommands { .. } => {
                Method::PUT
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::CreateFollowup {
                application_id,
                token,
            } => format!("/webhooks/{}/{}?wait=true", application_id, token),
            Route::EditMessage {
                application_id,
                token,
                message,
            }
            | Route::DeleteMessage {
                application_id,
                token,
                message,
            } => format!("/webhooks/{}/{}/messages/{}", application_id, token, message),
            Route::OverwriteGlobalCommands { application_id } => {
                format!("/applications/{}/commands", application_id)
            }
            Route::OverwriteGuildCommands {
                application_id,
                guild_id,
            } => format!(
                "/applications/{}/guilds/{}/commands",
                application_id, guild_id
            ),
        }
    }

    /// Webhook routes are authorised by the interaction token in the path.
    pub fn requires_bot_token(&self) -> bool {
        matches!(
            self,
            Route::OverwriteGlobalCommands { .. } | Route::OverwriteGuildCommands { .. }
        )
    }
}

/// Outbound calls to the platform. Returns `None` when the platform answers with no
/// content.
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn execute(&self, route: Route, body: Option<Value>) -> Result<Option<Value>, Error>;
}

pub struct RestClient {
    http_client: reqwest::Client,
    api_base: Box<str>,
    authorization: HeaderValue,
}

impl RestClient {
    pub fn new(api_base: &str, bot_token: &str) -> Result<RestClient, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bot {}", bot_token))
            .map_err(|_| Error::InvalidBotToken)?;
        authorization.set_sensitive(true);

        Ok(RestClient {
            http_client: RestClient::build_http_client()?,
            api_base: Box::from(api_base.trim_end_matches('/')),
            authorization,
        })
    }

    fn build_http_client() -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(15))
            .gzip(true)
            .build()?;

        Ok(client)
    }
}

#[async_trait]
impl RestTransport for RestClient {
    async fn execute(&self, route: Route, body: Option<Value>) -> Result<Option<Value>, Error> {
        let url = format!("{}{}", self.api_base, route.path());
        debug!(method = %route.method(), %url, "executing rest request");

        let mut req = self.http_client.request(route.method(), &url[..]);

        if route.requires_bot_token() {
            req = req.header(AUTHORIZATION, self.authorization.clone());
        }

        if let Some(body) = &body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::RestError {
                status,
                body: body.into_boxed_str(),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if let Route::DeleteMessage { .. } = route {
            return Err(Error::RestError {
                status,
                body: Box::from("expected no content"),
            });
        }

        let bytes = res.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes[..])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_routes() {
        let followup = Route::CreateFollowup {
            application_id: Snowflake(1),
            token: Box::from("abc"),
        };
        assert_eq!(followup.method(), Method::POST);
        assert_eq!(followup.path(), "/webhooks/1/abc?wait=true");
        assert!(!followup.requires_bot_token());

        let edit = Route::EditMessage {
            application_id: Snowflake(1),
            token: Box::from("abc"),
            message: MessageTarget::Original,
        };
        assert_eq!(edit.method(), Method::PATCH);
        assert_eq!(edit.path(), "/webhooks/1/abc/messages/@original");

        let delete = Route::DeleteMessage {
            application_id: Snowflake(1),
            token: Box::from("abc"),
            message: MessageTarget::Id(Snowflake(99)),
        };
        assert_eq!(delete.method(), Method::DELETE);
        assert_eq!(delete.path(), "/webhooks/1/abc/messages/99");
    }

    #[test]
    fn test_command_routes() {
        let global = Route::OverwriteGlobalCommands {
            application_id: Snowflake(1),
        };
        assert_eq!(global.method(), Method::PUT);
        assert_eq!(global.path(), "/applications/1/commands");
        assert!(global.requires_bot_token());

        let guild = Route::OverwriteGuildCommands {
            application_id: Snowflake(1),
            guild_id: Snowflake(2),
        };
        assert_eq!(guild.path(), "/applications/1/guilds/2/commands");
    }

    #[test]
    fn test_invalid_bot_token() {
        let result = RestClient::new("https://discord.com/api/v10", "abc\ndef");
        assert!(matches!(result, Err(Error::InvalidBotToken)));
    }
}
