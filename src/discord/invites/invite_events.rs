// Discord-side invite tracking.
//
// Fetches invite lists over HTTP, hands them to the core InviteTracker as
// plain snapshots and posts the join announcement to the system channel.

use crate::core::invites::{join_panel, InviteError, InviteSnapshot, InviterInfo};
use crate::discord::error_report::{report_error, system_channel};
use crate::discord::panels::send_panel;
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude as serenity;

async fn fetch_invites(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
) -> serenity::Result<Vec<InviteSnapshot>> {
    let invites = guild_id.invites(&ctx.http).await?;
    Ok(invites.iter().map(to_snapshot).collect())
}

fn to_snapshot(invite: &serenity::RichInvite) -> InviteSnapshot {
    InviteSnapshot {
        code: invite.code.clone(),
        uses: invite.uses,
        inviter: invite.inviter.as_ref().map(|user| InviterInfo {
            id: user.id.get(),
            tag: user.tag(),
        }),
    }
}

/// Fetch and cache one guild's invites, reporting (not returning) failures.
pub async fn refresh_guild(ctx: &serenity::Context, data: &Data, guild_id: serenity::GuildId) {
    match fetch_invites(ctx, guild_id).await {
        Ok(invites) => {
            let count = invites.len();
            if let Err(e) = data.invites.cache_guild(guild_id.get(), invites).await {
                tracing::error!(guild_id = guild_id.get(), "Failed to cache invites: {}", e);
            } else {
                tracing::debug!(guild_id = guild_id.get(), count, "Cached guild invites");
            }
        }
        Err(e) => {
            report_error(
                &ctx.http,
                &format!(
                    "Error fetching invites for guild [{}]. Make sure that the bot has the \"Manage Server\" permission enabled.",
                    guild_id
                ),
                Some(&e),
                system_channel(ctx, guild_id),
            )
            .await;
        }
    }
}

pub async fn handle_ready(ctx: &serenity::Context, data: &Data, ready: &serenity::Ready) {
    tracing::info!(guilds = ready.guilds.len(), "Caching invites for every guild");
    for guild in &ready.guilds {
        refresh_guild(ctx, data, guild.id).await;
    }
}

pub async fn handle_invite_change(
    ctx: &serenity::Context,
    data: &Data,
    guild_id: Option<serenity::GuildId>,
) {
    if let Some(guild_id) = guild_id {
        refresh_guild(ctx, data, guild_id).await;
    }
}

pub async fn handle_guild_left(data: &Data, guild_id: serenity::GuildId) -> Result<()> {
    data.invites.forget_guild(guild_id.get()).await?;
    Ok(())
}

pub async fn handle_member_join(
    ctx: &serenity::Context,
    data: &Data,
    member: &serenity::Member,
) -> Result<()> {
    let guild_id = member.guild_id;
    let report_channel = system_channel(ctx, guild_id);

    let attribution = match fetch_invites(ctx, guild_id).await {
        Ok(fresh) => data.invites.record_join(guild_id.get(), fresh).await,
        Err(e) => Err(InviteError::FetchFailed(e.to_string())),
    };

    let attribution = match attribution {
        Ok(attribution) => attribution,
        Err(e) => {
            report_error(
                &ctx.http,
                &format!(
                    "Member [{}] joined the server, but the invite information could not be found.",
                    member.user.tag()
                ),
                Some(&e),
                report_channel,
            )
            .await;
            return Ok(());
        }
    };

    tracing::info!(
        guild_id = guild_id.get(),
        user_id = member.user.id.get(),
        attribution = ?attribution,
        "Member joined"
    );

    let Some(channel_id) = report_channel else {
        tracing::debug!(guild_id = guild_id.get(), "No system channel for join announcement");
        return Ok(());
    };

    let avatar_url = member.user.face();
    let panel = join_panel(member.display_name(), Some(&avatar_url), &attribution);
    send_panel(&ctx.http, channel_id, &panel).await?;
    Ok(())
}
