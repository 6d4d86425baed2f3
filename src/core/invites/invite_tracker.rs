// Invite tracking - figures out which invite a new member used.
//
// Discord doesn't tell us which invite was used on join. We keep every
// guild's invite list around, re-fetch it when someone joins and look for the
// invite whose use-count went up.
//
// NO Discord dependencies here - fetching happens in the Discord layer and the
// results are handed in as plain snapshots.

use super::invite_models::{InviteSnapshot, JoinAttribution};
use crate::core::panels::{Panel, Tone};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum InviteError {
    #[error("No cached invites for guild {0}")]
    NotCached(u64),

    #[error("Failed to fetch invites: {0}")]
    FetchFailed(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Where the per-guild invite lists live between events.
#[async_trait]
pub trait InviteStore: Send + Sync {
    async fn get_invites(&self, guild_id: u64) -> Result<Option<Vec<InviteSnapshot>>, InviteError>;

    /// Replace a guild's list, returning the previous one if there was any.
    async fn replace_invites(
        &self,
        guild_id: u64,
        invites: Vec<InviteSnapshot>,
    ) -> Result<Option<Vec<InviteSnapshot>>, InviteError>;

    async fn remove_guild(&self, guild_id: u64) -> Result<(), InviteError>;
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct InviteTracker<S: InviteStore> {
    store: S,
}

impl<S: InviteStore> InviteTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the cached list (ready, invite created/deleted, guild joined).
    pub async fn cache_guild(
        &self,
        guild_id: u64,
        invites: Vec<InviteSnapshot>,
    ) -> Result<(), InviteError> {
        self.store.replace_invites(guild_id, invites).await?;
        Ok(())
    }

    pub async fn forget_guild(&self, guild_id: u64) -> Result<(), InviteError> {
        self.store.remove_guild(guild_id).await
    }

    #[cfg(test)]
    pub async fn cached(&self, guild_id: u64) -> Result<Option<Vec<InviteSnapshot>>, InviteError> {
        self.store.get_invites(guild_id).await
    }

    /// Store the freshly fetched list and work out which invite was used.
    ///
    /// The fresh list is cached even when there was nothing to compare
    /// against, so the next join in that guild can be attributed.
    pub async fn record_join(
        &self,
        guild_id: u64,
        fresh: Vec<InviteSnapshot>,
    ) -> Result<JoinAttribution, InviteError> {
        let previous = self
            .store
            .replace_invites(guild_id, fresh.clone())
            .await?
            .ok_or(InviteError::NotCached(guild_id))?;

        Ok(match find_used_invite(&previous, &fresh) {
            Some(invite) => JoinAttribution::Invite(invite.clone()),
            None => JoinAttribution::Unknown,
        })
    }
}

/// The first invite in `fresh` whose use-count grew since `previous`.
///
/// Invites that weren't in `previous` count as having had 0 uses.
pub fn find_used_invite<'a>(
    previous: &[InviteSnapshot],
    fresh: &'a [InviteSnapshot],
) -> Option<&'a InviteSnapshot> {
    fresh.iter().find(|invite| {
        let old_uses = previous
            .iter()
            .find(|old| old.code == invite.code)
            .map(|old| old.uses)
            .unwrap_or(0);
        invite.uses > old_uses
    })
}

/// Welcome announcement for the guild's system channel.
pub fn join_panel(
    display_name: &str,
    avatar_url: Option<&str>,
    attribution: &JoinAttribution,
) -> Panel {
    let mut panel = Panel::new(
        Tone::Info,
        format!("User {} joined the server.", display_name),
    );
    if let Some(url) = avatar_url {
        panel = panel.image(url);
    }

    match attribution {
        JoinAttribution::Invite(invite) => {
            panel = panel.field("Invite Code", invite.code.clone(), true);
            if let Some(inviter) = &invite.inviter {
                panel = panel.field(
                    "Inviter",
                    format!("{} ({})", inviter.tag, inviter.id),
                    true,
                );
            }
            panel
        }
        JoinAttribution::Unknown => {
            panel.description("The member joined with an unknown invite.")
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
