// Role reactions - pure decision logic.
//
// A role-reaction message is a bot-authored embed with a sentinel title where
// each field pairs an emoji (field name) with a role (field value). Reacting
// with that emoji grants the role, removing the reaction takes it away.
//
// This module decides WHICH roles change and applies them through the
// `RoleEditor` port. The Discord layer fetches the message, resolves names
// against the cache and implements the port over HTTP.

use crate::core::resolver::{could_name_custom_emoji, custom_emoji_text_matches};
use async_trait::async_trait;
use thiserror::Error;

pub const DEFAULT_ROLE_REACTION_TITLE: &str = "Role Reactions";

#[derive(Debug, Error)]
pub enum RoleReactionError {
    #[error("Failed to update member roles: {0}")]
    EditFailed(String),
}

/// Where role grants and removals actually happen.
#[async_trait]
pub trait RoleEditor: Send + Sync {
    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), RoleReactionError>;

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), RoleReactionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionDirection {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Add,
    Remove,
}

/// The emoji a member reacted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionEmoji {
    Custom { id: u64, name: Option<String> },
    Unicode(String),
}

/// One emoji -> role line of a role-reaction embed, as written by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleReactionField {
    pub emoji: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub role_id: u64,
    pub action: RoleAction,
}

impl RoleChange {
    pub async fn apply<E: RoleEditor + ?Sized>(
        &self,
        editor: &E,
        guild_id: u64,
        user_id: u64,
    ) -> Result<(), RoleReactionError> {
        match self.action {
            RoleAction::Add => editor.add_role(guild_id, user_id, self.role_id).await,
            RoleAction::Remove => editor.remove_role(guild_id, user_id, self.role_id).await,
        }
    }
}

/// A field that matched the reaction but whose role could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRole {
    pub field: RoleReactionField,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RoleReactionPlan {
    pub changes: Vec<RoleChange>,
    pub unresolved: Vec<UnresolvedRole>,
}

pub fn is_role_reaction_title(title: Option<&str>, sentinel: &str) -> bool {
    title == Some(sentinel)
}

/// Does `reaction` correspond to the emoji written in a field name?
///
/// A custom reaction first matches the field text against itself (name,
/// `name:id`, markup or id). Only then is the field text resolved through
/// `resolve_emoji`, and never for text that cannot name a custom emoji.
pub fn reaction_matches(
    field_emoji: &str,
    reaction: &ReactionEmoji,
    resolve_emoji: impl FnOnce(&str) -> Option<u64>,
) -> bool {
    match reaction {
        ReactionEmoji::Custom { id, name } => {
            custom_emoji_text_matches(field_emoji, name.as_deref(), *id)
                || (could_name_custom_emoji(field_emoji)
                    && resolve_emoji(field_emoji) == Some(*id))
        }
        ReactionEmoji::Unicode(emoji) => field_emoji.trim() == emoji,
    }
}

/// Work out which role changes a reaction triggers.
///
/// Every field is checked; normally exactly one matches. Roles are only
/// resolved for fields whose emoji matched.
pub fn plan_role_changes(
    fields: &[RoleReactionField],
    reaction: &ReactionEmoji,
    direction: ReactionDirection,
    mut resolve_emoji: impl FnMut(&str) -> Option<u64>,
    mut resolve_role: impl FnMut(&str) -> Option<u64>,
) -> RoleReactionPlan {
    let action = match direction {
        ReactionDirection::Added => RoleAction::Add,
        ReactionDirection::Removed => RoleAction::Remove,
    };

    let mut plan = RoleReactionPlan::default();
    for field in fields {
        if !reaction_matches(&field.emoji, reaction, &mut resolve_emoji) {
            continue;
        }

        match resolve_role(&field.role) {
            Some(role_id) => plan.changes.push(RoleChange { role_id, action }),
            None => plan.unresolved.push(UnresolvedRole {
                field: field.clone(),
            }),
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;
    use std::collections::HashSet;

    /// Member roles kept in memory, keyed by user id.
    struct MemoryRoles {
        roles: DashMap<u64, HashSet<u64>>,
    }

    impl MemoryRoles {
        fn with(user_id: u64, roles: &[u64]) -> Self {
            let map = DashMap::new();
            map.insert(user_id, roles.iter().copied().collect());
            Self { roles: map }
        }

        fn roles_of(&self, user_id: u64) -> HashSet<u64> {
            self.roles
                .get(&user_id)
                .map(|r| r.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl RoleEditor for MemoryRoles {
        async fn add_role(
            &self,
            _guild_id: u64,
            user_id: u64,
            role_id: u64,
        ) -> Result<(), RoleReactionError> {
            self.roles.entry(user_id).or_default().insert(role_id);
            Ok(())
        }

        async fn remove_role(
            &self,
            _guild_id: u64,
            user_id: u64,
            role_id: u64,
        ) -> Result<(), RoleReactionError> {
            self.roles.entry(user_id).or_default().remove(&role_id);
            Ok(())
        }
    }

    struct ForbiddenRoles;

    #[async_trait]
    impl RoleEditor for ForbiddenRoles {
        async fn add_role(&self, _: u64, _: u64, _: u64) -> Result<(), RoleReactionError> {
            Err(RoleReactionError::EditFailed("Missing Permissions".to_string()))
        }

        async fn remove_role(&self, _: u64, _: u64, _: u64) -> Result<(), RoleReactionError> {
            Err(RoleReactionError::EditFailed("Missing Permissions".to_string()))
        }
    }

    fn custom(id: u64, name: Option<&str>) -> ReactionEmoji {
        ReactionEmoji::Custom {
            id,
            name: name.map(str::to_string),
        }
    }

    fn fields() -> Vec<RoleReactionField> {
        vec![
            RoleReactionField {
                emoji: "<:rust:10>".to_string(),
                role: "<@&100>".to_string(),
            },
            RoleReactionField {
                emoji: "gopher".to_string(),
                role: "Gophers".to_string(),
            },
            RoleReactionField {
                emoji: "🎮".to_string(),
                role: "Gamers".to_string(),
            },
        ]
    }

    fn resolve_emoji(query: &str) -> Option<u64> {
        match query {
            "<:rust:10>" | "rust" | "10" => Some(10),
            "gopher" => Some(11),
            _ => None,
        }
    }

    fn resolve_role(query: &str) -> Option<u64> {
        match query {
            "<@&100>" => Some(100),
            "Gophers" => Some(101),
            "Gamers" => Some(102),
            _ => None,
        }
    }

    #[test]
    fn test_sentinel_title() {
        assert!(is_role_reaction_title(Some("Role Reactions"), "Role Reactions"));
        assert!(!is_role_reaction_title(Some("role reactions"), "Role Reactions"));
        assert!(!is_role_reaction_title(None, "Role Reactions"));
    }

    #[test]
    fn test_custom_emoji_adds_role() {
        let reaction = custom(11, Some("gopher"));
        let plan = plan_role_changes(
            &fields(),
            &reaction,
            ReactionDirection::Added,
            resolve_emoji,
            resolve_role,
        );

        assert_eq!(
            plan.changes,
            vec![RoleChange {
                role_id: 101,
                action: RoleAction::Add
            }]
        );
        assert!(plan.unresolved.is_empty());
    }

    #[test]
    fn test_unicode_emoji_matches_field_name() {
        let reaction = ReactionEmoji::Unicode("🎮".to_string());
        let plan = plan_role_changes(
            &fields(),
            &reaction,
            ReactionDirection::Removed,
            resolve_emoji,
            resolve_role,
        );

        assert_eq!(
            plan.changes,
            vec![RoleChange {
                role_id: 102,
                action: RoleAction::Remove
            }]
        );
    }

    #[test]
    fn test_unrelated_reaction_changes_nothing() {
        let reaction = custom(99, Some("ferris"));
        let plan = plan_role_changes(
            &fields(),
            &reaction,
            ReactionDirection::Added,
            resolve_emoji,
            resolve_role,
        );
        assert_eq!(plan, RoleReactionPlan::default());
    }

    #[test]
    fn test_missing_role_reported_not_fatal() {
        let fields = vec![
            RoleReactionField {
                emoji: "rust".to_string(),
                role: "Deleted Role".to_string(),
            },
            RoleReactionField {
                emoji: "10".to_string(),
                role: "<@&100>".to_string(),
            },
        ];
        let reaction = custom(10, Some("rust"));
        let plan = plan_role_changes(
            &fields,
            &reaction,
            ReactionDirection::Added,
            resolve_emoji,
            resolve_role,
        );

        assert_eq!(plan.unresolved.len(), 1);
        assert_eq!(plan.unresolved[0].field.role, "Deleted Role");
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0].role_id, 100);
    }

    #[test]
    fn test_same_named_emoji_from_another_guild_matches_by_name() {
        // Two cached guilds each have a `:rust:`; the cache lookup settles on
        // the older one (10), but the member reacted with the newer one (20).
        let fields = vec![RoleReactionField {
            emoji: "rust".to_string(),
            role: "<@&100>".to_string(),
        }];
        let resolve_oldest = |query: &str| (query == "rust").then_some(10_u64);

        let plan = plan_role_changes(
            &fields,
            &custom(20, Some("rust")),
            ReactionDirection::Added,
            resolve_oldest,
            resolve_role,
        );
        assert_eq!(
            plan.changes,
            vec![RoleChange {
                role_id: 100,
                action: RoleAction::Add
            }]
        );

        // Explicit markup pins one particular emoji.
        let pinned = vec![RoleReactionField {
            emoji: "<:rust:10>".to_string(),
            role: "<@&100>".to_string(),
        }];
        let plan = plan_role_changes(
            &pinned,
            &custom(20, Some("rust")),
            ReactionDirection::Added,
            resolve_oldest,
            resolve_role,
        );
        assert!(plan.changes.is_empty());
    }

    #[test]
    fn test_unicode_fields_skip_emoji_lookup() {
        let mut looked_up = Vec::new();
        let plan = plan_role_changes(
            &fields(),
            &custom(11, None),
            ReactionDirection::Added,
            |query: &str| {
                looked_up.push(query.to_string());
                resolve_emoji(query)
            },
            resolve_role,
        );

        assert_eq!(plan.changes.len(), 1);
        assert_eq!(looked_up, vec!["<:rust:10>", "gopher"]);
    }

    #[test]
    fn test_name_match_needs_no_lookup() {
        // Skip the pinned `<:rust:10>` field, which does need a lookup.
        let plan = plan_role_changes(
            &fields()[1..],
            &custom(11, Some("gopher")),
            ReactionDirection::Added,
            |query: &str| -> Option<u64> { panic!("unexpected emoji lookup for {query:?}") },
            resolve_role,
        );
        assert_eq!(plan.changes[0].role_id, 101);
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_roles() {
        let reaction = custom(10, Some("rust"));
        let editor = MemoryRoles::with(7, &[5, 6]);
        let original = editor.roles_of(7);

        for direction in [ReactionDirection::Added, ReactionDirection::Removed] {
            let plan =
                plan_role_changes(&fields(), &reaction, direction, resolve_emoji, resolve_role);
            assert_eq!(plan.changes.len(), 1);
            for change in &plan.changes {
                change.apply(&editor, 1, 7).await.unwrap();
            }
            if direction == ReactionDirection::Added {
                assert!(editor.roles_of(7).contains(&100));
            }
        }

        assert_eq!(editor.roles_of(7), original);
    }

    #[tokio::test]
    async fn test_apply_surfaces_editor_failure() {
        let change = RoleChange {
            role_id: 100,
            action: RoleAction::Add,
        };
        let err = change.apply(&ForbiddenRoles, 1, 7).await.unwrap_err();
        assert!(err.to_string().contains("Missing Permissions"));
    }
}
