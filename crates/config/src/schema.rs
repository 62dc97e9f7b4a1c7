/// Config schema types.
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SedbotConfig {
    pub irc: IrcConfig,
}

/// IRC connection and identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrcConfig {
    /// Server hostname. Defaults to "irc.libera.chat".
    pub server: String,
    /// Plaintext IRC port. Defaults to 6667.
    pub port: u16,
    pub nick: String,
    /// Sent as the `USER` name during registration.
    pub username: String,
    pub realname: String,
    /// Channels joined right after registration.
    pub channels: Vec<String>,
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            server: "irc.libera.chat".into(),
            port: 6667,
            nick: "sedbot".into(),
            username: "sedbot".into(),
            realname: "sedbot".into(),
            channels: Vec::new(),
        }
    }
}

impl IrcConfig {
    /// `host:port` string for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}
