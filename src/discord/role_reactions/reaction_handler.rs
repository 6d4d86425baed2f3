// Discord-side role reactions - translates reaction events into role changes.
//
// Core decides which roles change; this file does the fetching, the cache
// lookups, and the HTTP calls.

use crate::core::role_reactions::{
    is_role_reaction_title, plan_role_changes, ReactionDirection, ReactionEmoji, RoleAction,
    RoleEditor, RoleReactionError, RoleReactionField,
};
use crate::discord::error_report::{report_error, system_channel};
use crate::discord::resolver::{resolve_emoji, resolve_role};
use crate::discord::Data;
use anyhow::Result;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

const AUDIT_LOG_REASON: &str = "Role reaction";

/// Role edits over the REST API, tagged in the audit log.
struct HttpRoleEditor<'a> {
    http: &'a serenity::Http,
}

#[async_trait]
impl<'a> RoleEditor for HttpRoleEditor<'a> {
    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), RoleReactionError> {
        self.http
            .add_member_role(
                serenity::GuildId::new(guild_id),
                serenity::UserId::new(user_id),
                serenity::RoleId::new(role_id),
                Some(AUDIT_LOG_REASON),
            )
            .await
            .map_err(|e| RoleReactionError::EditFailed(e.to_string()))
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), RoleReactionError> {
        self.http
            .remove_member_role(
                serenity::GuildId::new(guild_id),
                serenity::UserId::new(user_id),
                serenity::RoleId::new(role_id),
                Some(AUDIT_LOG_REASON),
            )
            .await
            .map_err(|e| RoleReactionError::EditFailed(e.to_string()))
    }
}

pub async fn handle_reaction(
    ctx: &serenity::Context,
    data: &Data,
    reaction: &serenity::Reaction,
    direction: ReactionDirection,
) -> Result<()> {
    let guild_id = match reaction.guild_id {
        Some(id) => id,
        None => return Ok(()),
    };
    let user_id = match reaction.user_id {
        Some(id) => id,
        None => return Ok(()),
    };

    // Reaction payloads only carry ids; this fetches the full message
    // (from cache when possible).
    let message = reaction.message(ctx).await?;
    if message.author.id != ctx.cache.current_user().id {
        return Ok(());
    }

    let reacting_user_is_bot = match &reaction.member {
        Some(member) => member.user.bot,
        None => reaction.user(ctx).await?.bot,
    };
    if reacting_user_is_bot {
        return Ok(());
    }

    let Some(embed) = message.embeds.first() else {
        return Ok(());
    };
    if !is_role_reaction_title(embed.title.as_deref(), &data.role_reaction_title) {
        return Ok(());
    }

    let fields: Vec<RoleReactionField> = embed
        .fields
        .iter()
        .map(|field| RoleReactionField {
            emoji: field.name.clone(),
            role: field.value.clone(),
        })
        .collect();

    let Some(emoji) = reaction_emoji(&reaction.emoji) else {
        return Ok(());
    };

    let plan = plan_role_changes(
        &fields,
        &emoji,
        direction,
        |query| resolve_emoji(&ctx.cache, query).map(|e| e.id.get()),
        |query| resolve_role(&ctx.cache, guild_id, query).map(|r| r.id.get()),
    );

    let report_channel = system_channel(ctx, guild_id);

    for missing in &plan.unresolved {
        report_error(
            &ctx.http,
            &format!(
                "Error getting role [{}] for reaction [{}].",
                missing.field.role, missing.field.emoji
            ),
            None,
            report_channel,
        )
        .await;
    }

    let editor = HttpRoleEditor { http: &ctx.http };
    for change in &plan.changes {
        match change.apply(&editor, guild_id.get(), user_id.get()).await {
            Ok(()) => tracing::info!(
                guild_id = guild_id.get(),
                user_id = user_id.get(),
                role_id = change.role_id,
                action = ?change.action,
                "Role reaction applied"
            ),
            Err(e) => {
                let description = match change.action {
                    RoleAction::Add => format!(
                        "Error adding role [<@&{}>] to [<@{}>].",
                        change.role_id, user_id
                    ),
                    RoleAction::Remove => format!(
                        "Error removing role [<@&{}>] from [<@{}>].",
                        change.role_id, user_id
                    ),
                };
                report_error(&ctx.http, &description, Some(&e), report_channel).await;
            }
        }
    }

    Ok(())
}

fn reaction_emoji(reaction: &serenity::ReactionType) -> Option<ReactionEmoji> {
    match reaction {
        serenity::ReactionType::Custom { id, name, .. } => Some(ReactionEmoji::Custom {
            id: id.get(),
            name: name.clone(),
        }),
        serenity::ReactionType::Unicode(emoji) => Some(ReactionEmoji::Unicode(emoji.clone())),
        _ => None,
    }
}
