// Failure reporting for event handlers.
//
// A failure is logged with its context and, when we know a sensible place
// for it (the invoking channel, the guild's system channel), mirrored there
// as a warning panel. Reporting never fails itself.

use crate::core::panels::error_panel;
use crate::discord::panels::send_panel;
use poise::serenity_prelude as serenity;
use std::fmt::Display;

pub async fn report_error(
    http: &serenity::Http,
    description: &str,
    error: Option<&(dyn Display + Sync)>,
    channel_id: Option<serenity::ChannelId>,
) {
    match error {
        Some(error) => tracing::error!(error = %error, "{}", description),
        None => tracing::error!("{}", description),
    }

    if let Some(channel_id) = channel_id {
        if let Err(e) = send_panel(http, channel_id, &error_panel(description)).await {
            tracing::warn!(
                channel_id = channel_id.get(),
                "Failed to mirror error to channel: {}",
                e
            );
        }
    }
}

/// The guild's system channel, if it has one and the guild is cached.
pub fn system_channel(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
) -> Option<serenity::ChannelId> {
    ctx.cache.guild(guild_id).and_then(|g| g.system_channel_id)
}
