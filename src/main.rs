// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (in-memory stores)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Route gateway events to their handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::config::BotConfig;
use crate::core::invites::InviteTracker;
use crate::core::profiles::LastMessageIndex;
use crate::core::role_reactions::ReactionDirection;
use crate::discord::commands::{build_registry, presence};
use crate::discord::invites as invite_events;
use crate::discord::role_reactions::handle_reaction;
use crate::discord::{dispatcher, Data, Error};
use crate::infra::invites::InMemoryInviteStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for every gateway event we care about.
///
/// Each event is handled on its own; a failure is logged here and never stops
/// the next event from being processed.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!(user = %data_about_bot.user.name, "Ready.");
            presence::on_ready(ctx, &data.prefix);
            invite_events::handle_ready(ctx, data, data_about_bot).await;
        }
        serenity::FullEvent::Message { new_message } => {
            if let Err(e) = dispatcher::handle_message(ctx, data, new_message).await {
                tracing::error!("Error handling message: {}", e);
            }
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            if let Err(e) =
                handle_reaction(ctx, data, add_reaction, ReactionDirection::Added).await
            {
                tracing::error!("Error handling reaction add: {}", e);
            }
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            if let Err(e) =
                handle_reaction(ctx, data, removed_reaction, ReactionDirection::Removed).await
            {
                tracing::error!("Error handling reaction remove: {}", e);
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = invite_events::handle_member_join(ctx, data, new_member).await {
                tracing::error!("Error handling member join: {}", e);
            }
        }
        serenity::FullEvent::InviteCreate { data: invite } => {
            invite_events::handle_invite_change(ctx, data, invite.guild_id).await;
        }
        serenity::FullEvent::InviteDelete { data: invite } => {
            invite_events::handle_invite_change(ctx, data, invite.guild_id).await;
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            // Guilds from the ready payload are already handled in Ready.
            if is_new == &Some(true) {
                invite_events::refresh_guild(ctx, data, guild.id).await;
            }
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            // `unavailable` means an outage, not that we were removed.
            if !incomplete.unavailable {
                if let Err(e) = invite_events::handle_guild_left(data, incomplete.id).await {
                    tracing::error!("Error dropping invites for guild: {}", e);
                }
            }
        }

        _ => {}
    }

    Ok(())
}

/// Last line of defence for errors poise itself surfaces.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::EventHandler { error, event, .. } => {
            tracing::error!(event = event.snake_case_name(), "Event handler error: {}", error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().expect("Invalid bot configuration");
    tracing::info!(?config, "Configuration loaded");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let registry = build_registry().expect("Failed to build command registry");
    tracing::info!(commands = registry.len(), "Commands registered");

    let invite_tracker = Arc::new(InviteTracker::new(InMemoryInviteStore::new()));

    let data = Data {
        prefix: config.prefix.clone(),
        role_reaction_title: config.role_reaction_title.clone(),
        commands: Arc::new(registry),
        invites: invite_tracker,
        last_messages: Arc::new(LastMessageIndex::new()),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Text commands go through our own dispatcher, so poise only hosts the
    // event handler and error hook.

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::GUILD_INVITES
        | serenity::GatewayIntents::GUILD_EMOJIS_AND_STICKERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!(guilds = ready.guilds.len(), "🤖 Bot is starting up...");
                Ok(data)
            })
        })
        .build();

    // Keep recent messages around so reaction events on them skip the HTTP fetch.
    let mut settings = serenity::cache::Settings::default();
    settings.max_messages = 1000;

    let mut client = serenity::ClientBuilder::new(config.token, intents)
        .framework(framework)
        .cache_settings(settings)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
