// Discord commands module.
// Each command gets its own file and is registered in `build_registry`.

pub mod help;

pub mod presence;

pub mod user;

use crate::core::commands::{CommandRegistry, RegistryError};
use crate::core::invites::InviteTracker;
use crate::core::profiles::LastMessageIndex;
use crate::infra::invites::InMemoryInviteStore;
use poise::serenity_prelude as serenity;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Data that's shared across every event and command.
pub struct Data {
    pub prefix: String,
    pub role_reaction_title: String,
    pub commands: Arc<CommandRegistry<CommandHandler>>,
    pub invites: Arc<InviteTracker<InMemoryInviteStore>>,
    pub last_messages: Arc<LastMessageIndex>,
}

/// Everything a text command gets to look at.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub serenity: &'a serenity::Context,
    pub data: &'a Data,
    pub message: &'a serenity::Message,
}

pub type CommandFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// A text command handler: receives the context and the positional arguments.
pub type CommandHandler = for<'a> fn(CommandContext<'a>, &'a [String]) -> CommandFuture<'a>;

/// Build the registry from every command module's definition.
pub fn build_registry() -> Result<CommandRegistry<CommandHandler>, RegistryError> {
    let mut registry: CommandRegistry<CommandHandler> = CommandRegistry::new();
    registry.register(user::spec(), user::execute)?;
    registry.register(help::spec(), help::execute)?;
    Ok(registry)
}
