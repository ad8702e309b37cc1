use crate::verify::SignatureVerifier;
use crate::Error;
use model::Snowflake;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Config {
    pub server_addr: Box<str>,
    pub application_id: Snowflake,
    pub public_key: Box<str>,
    pub bot_token: Box<str>,
    #[serde(default)]
    pub guild_ids: Vec<Snowflake>,
    #[serde(default = "default_api_base")]
    pub api_base: Box<str>,
    #[serde(default = "default_interactions_route")]
    pub interactions_route: Box<str>,
    #[serde(default)]
    pub sync_commands: bool,
    #[serde(default)]
    pub json_log: bool,
}

fn default_api_base() -> Box<str> {
    Box::from("https://discord.com/api/v10")
}

fn default_interactions_route() -> Box<str> {
    Box::from("interactions")
}

impl Config {
    pub fn from_envvar() -> Result<Config, Error> {
        let config = envy::from_env::<Config>()?;
        Ok(config.normalised())
    }

    /// Parses the hex encoded application public key.
    pub fn verifier(&self) -> Result<SignatureVerifier, Error> {
        SignatureVerifier::from_hex(&self.public_key)
    }

    // env files edited on windows leave a trailing \r behind
    fn normalised(mut self) -> Config {
        fn strip(value: &str) -> Box<str> {
            Box::from(value.trim_end_matches('\r'))
        }

        self.server_addr = strip(&self.server_addr);
        self.public_key = strip(&self.public_key);
        self.bot_token = strip(&self.bot_token);
        self.api_base = strip(self.api_base.trim_end_matches('/'));
        self.interactions_route = strip(self.interactions_route.trim_matches('/'));
        self
    }
}
