// Runtime configuration read from the environment (and `.env`, loaded in main).
//
// - `DISCORD_TOKEN` (required)
// - `COMMAND_PREFIX` (optional, one non-whitespace character, default `~`)
// - `ROLE_REACTION_TITLE` (optional, default `Role Reactions`)

use crate::core::role_reactions::DEFAULT_ROLE_REACTION_TITLE;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "~";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Create a .env file with your bot token.")]
    Missing(&'static str),

    #[error("COMMAND_PREFIX must be a single non-whitespace character, got {0:?}")]
    InvalidPrefix(String),
}

#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub prefix: String,
    pub role_reaction_title: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key -> value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let prefix = lookup("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let mut chars = prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => {}
            _ => return Err(ConfigError::InvalidPrefix(prefix)),
        }

        let role_reaction_title = lookup("ROLE_REACTION_TITLE")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE_REACTION_TITLE.to_string());

        Ok(Self {
            token,
            prefix,
            role_reaction_title,
        })
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("role_reaction_title", &self.role_reaction_title)
            .finish()
    }
}
