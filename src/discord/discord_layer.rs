// Discord layer - commands and event handlers.
//
// Everything that touches serenity/poise lives here. Handlers pull primitive
// data out of Discord types, call into core, and turn the result (usually a
// Panel) back into Discord messages.

#[path = "commands/command_catalog.rs"]
pub mod commands;

pub mod dispatcher;

pub mod error_report;

#[path = "invites/invite_events.rs"]
pub mod invites;

pub mod panels;

pub mod resolver;

#[path = "role_reactions/reaction_handler.rs"]
pub mod role_reactions;

// Re-export command types for convenience
pub use commands::{Data, Error};
