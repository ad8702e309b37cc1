use crate::registry::ListenerDescriptor;
use model::ValidationError;
use serde::Serializer;
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid ed25519 signature: {0}")]
    InvalidSignatureFormat(#[from] hex::FromHexError),

    #[error("invalid ed25519 signature: {0}")]
    InvalidSignature(#[from] ed25519_dalek::SignatureError),

    #[error("invalid ed25519 public key: {0}")]
    InvalidPublicKey(Box<str>),

    #[error("invalid response: {0}")]
    Validation(#[from] ValidationError),

    #[error("interaction has no initial response")]
    NoInitialResponse,

    #[error("interaction has already been responded to")]
    AlreadyResponded,

    #[error("a listener is already registered for {0}")]
    RegistryCollision(ListenerDescriptor),

    #[error("error while operating on json: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error while performing HTTP operation: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("discord responded with {status}: {body}")]
    RestError {
        status: reqwest::StatusCode,
        body: Box<str>,
    },

    #[error("bot token is not a valid authorization header value")]
    InvalidBotToken,

    #[error("error while reading config: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("invalid server address: {0}")]
    AddrParseError(#[from] std::net::AddrParseError),

    #[error("handler failed: {0}")]
    HandlerError(Box<str>),
}

impl Error {
    pub fn handler(message: impl Into<Box<str>>) -> Error {
        Error::HandlerError(message.into())
    }
}

impl Reject for Error {}

impl serde::Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}", self)[..])
    }
}
