use crate::rest::{Route, RestTransport};
use crate::Error;
use async_trait::async_trait;
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use serde_json::{json, Value};
use std::sync::Mutex;

pub fn test_keypair() -> Keypair {
    let secret = SecretKey::from_bytes(&[7u8; 32]).unwrap();
    let public = PublicKey::from(&secret);
    Keypair { secret, public }
}

pub fn public_key_hex() -> String {
    hex::encode(test_keypair().public.as_bytes())
}

/// Signs `timestamp || body` with the fixed test key, hex encoded.
pub fn sign(timestamp: &str, body: &[u8]) -> String {
    let message: Vec<u8> = timestamp.as_bytes().iter().chain(body).copied().collect();
    hex::encode(test_keypair().sign(&message).to_bytes())
}

/// Records every call and answers like the platform would: messages for webhook
/// writes, nothing for deletes, the submitted list for command overwrites.
#[derive(Default)]
pub struct MockTransport {
    pub calls: Mutex<Vec<(Route, Option<Value>)>>,
}

impl MockTransport {
    pub fn calls(&self) -> Vec<(Route, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestTransport for MockTransport {
    async fn execute(&self, route: Route, body: Option<Value>) -> Result<Option<Value>, Error> {
        self.calls.lock().unwrap().push((route.clone(), body.clone()));

        Ok(match route {
            Route::DeleteMessage { .. } => None,
            Route::CreateFollowup { .. } | Route::EditMessage { .. } => {
                let content = body
                    .as_ref()
                    .and_then(|b| b.get("content"))
                    .cloned()
                    .unwrap_or_else(|| json!(""));

                Some(json!({
                    "id": "900",
                    "channel_id": "800",
                    "content": content,
                    "type": 0,
                }))
            }
            Route::OverwriteGlobalCommands { .. } | Route::OverwriteGuildCommands { .. } => body,
        })
    }
}
