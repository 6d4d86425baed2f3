// The core module contains all business logic.
// Each feature gets its own submodule. Nothing in here imports serenity or poise.

#[path = "commands/mod.rs"]
pub mod commands;

#[path = "config/bot_config.rs"]
pub mod config;

#[path = "invites/mod.rs"]
pub mod invites;

#[path = "panels/mod.rs"]
pub mod panels;

#[path = "profiles/mod.rs"]
pub mod profiles;

#[path = "resolver/entity_resolver.rs"]
pub mod resolver;

#[path = "role_reactions/mod.rs"]
pub mod role_reactions;
