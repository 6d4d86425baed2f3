pub mod role_reaction_service;

pub use role_reaction_service::{
    is_role_reaction_title, plan_role_changes, ReactionDirection, ReactionEmoji, RoleAction,
    RoleEditor, RoleReactionError, RoleReactionField, DEFAULT_ROLE_REACTION_TITLE,
};
