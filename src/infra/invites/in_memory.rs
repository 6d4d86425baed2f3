// In-memory implementation of InviteStore.
//
// DashMap gives us per-guild locking, so the ready, invite and member-join
// handlers can all touch the cache without a global Mutex.

use crate::core::invites::{InviteError, InviteSnapshot, InviteStore};
use async_trait::async_trait;
use dashmap::DashMap;

pub struct InMemoryInviteStore {
    /// Maps guild_id -> invite list as of the last fetch
    guilds: DashMap<u64, Vec<InviteSnapshot>>,
}

impl InMemoryInviteStore {
    pub fn new() -> Self {
        Self {
            guilds: DashMap::new(),
        }
    }
}

#[async_trait]
impl InviteStore for InMemoryInviteStore {
    async fn get_invites(&self, guild_id: u64) -> Result<Option<Vec<InviteSnapshot>>, InviteError> {
        Ok(self.guilds.get(&guild_id).map(|entry| entry.clone()))
    }

    async fn replace_invites(
        &self,
        guild_id: u64,
        invites: Vec<InviteSnapshot>,
    ) -> Result<Option<Vec<InviteSnapshot>>, InviteError> {
        // insert() hands back the old value, which is exactly the diff baseline
        Ok(self.guilds.insert(guild_id, invites))
    }

    async fn remove_guild(&self, guild_id: u64) -> Result<(), InviteError> {
        self.guilds.remove(&guild_id);
        Ok(())
    }
}

impl Default for InMemoryInviteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(code: &str, uses: u64) -> InviteSnapshot {
        InviteSnapshot {
            code: code.to_string(),
            uses,
            inviter: None,
        }
    }

    #[tokio::test]
    async fn test_replace_returns_previous_list() {
        let store = InMemoryInviteStore::new();

        // Nothing cached yet
        assert!(store.get_invites(1).await.unwrap().is_none());
        let previous = store.replace_invites(1, vec![invite("A", 1)]).await.unwrap();
        assert!(previous.is_none());

        let previous = store
            .replace_invites(1, vec![invite("A", 2), invite("B", 0)])
            .await
            .unwrap();
        assert_eq!(previous, Some(vec![invite("A", 1)]));
        assert_eq!(store.get_invites(1).await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_guilds_are_isolated() {
        let store = InMemoryInviteStore::new();
        store.replace_invites(1, vec![invite("A", 1)]).await.unwrap();
        store.replace_invites(2, vec![invite("Z", 9)]).await.unwrap();

        store.remove_guild(1).await.unwrap();
        assert!(store.get_invites(1).await.unwrap().is_none());
        assert_eq!(
            store.get_invites(2).await.unwrap(),
            Some(vec![invite("Z", 9)])
        );
    }
}
