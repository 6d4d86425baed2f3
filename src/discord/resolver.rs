// Cache-backed entity lookups.
//
// Adapts serenity's cached users, members, roles, channels and emojis to the
// core `Resolvable` trait. Every function here is synchronous: we copy the
// candidates out of the cache so no cache guard is ever held across an await.

use crate::core::resolver::{
    custom_emoji_text_matches, find_first, member_or_user_membership, strip_mention,
    user_preferring_member, EntityKind, Resolvable,
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::collections::HashMap;

impl Resolvable for serenity::User {
    fn entity_id(&self) -> u64 {
        self.id.get()
    }

    fn matches_label(&self, query: &str) -> bool {
        self.name == query || self.tag() == query || self.global_name.as_deref() == Some(query)
    }

    fn mention(&self) -> String {
        Mentionable::mention(self).to_string()
    }
}

impl Resolvable for serenity::Member {
    fn entity_id(&self) -> u64 {
        self.user.id.get()
    }

    fn matches_label(&self, query: &str) -> bool {
        self.display_name() == query || self.nick.as_deref() == Some(query)
    }

    fn mention(&self) -> String {
        Mentionable::mention(self).to_string()
    }
}

impl Resolvable for serenity::Role {
    fn entity_id(&self) -> u64 {
        self.id.get()
    }

    fn matches_label(&self, query: &str) -> bool {
        self.name == query
    }

    fn mention(&self) -> String {
        Mentionable::mention(self).to_string()
    }
}

impl Resolvable for serenity::GuildChannel {
    fn entity_id(&self) -> u64 {
        self.id.get()
    }

    fn matches_label(&self, query: &str) -> bool {
        self.name == query
    }

    fn mention(&self) -> String {
        Mentionable::mention(self).to_string()
    }
}

impl Resolvable for serenity::Emoji {
    fn entity_id(&self) -> u64 {
        self.id.get()
    }

    fn matches_label(&self, query: &str) -> bool {
        custom_emoji_text_matches(query, Some(&self.name), self.id.get())
    }

    fn mention(&self) -> String {
        self.to_string()
    }
}

fn log_miss(kind: EntityKind, query: &str) {
    tracing::warn!(kind = kind.label(), query, "Error getting {} [{}].", kind.label(), query);
}

fn guild_members(cache: &serenity::Cache, guild_id: serenity::GuildId) -> Vec<serenity::Member> {
    cache
        .guild(guild_id)
        .map(|g| g.members.values().cloned().collect())
        .unwrap_or_default()
}

/// Every user we can see through the cache, deduplicated across guilds.
fn cached_users(cache: &serenity::Cache) -> Vec<serenity::User> {
    let mut users: HashMap<serenity::UserId, serenity::User> = HashMap::new();
    for guild_id in cache.guilds() {
        if let Some(guild) = cache.guild(guild_id) {
            for member in guild.members.values() {
                users
                    .entry(member.user.id)
                    .or_insert_with(|| member.user.clone());
            }
        }
    }
    users.into_values().collect()
}

/// User lookup only (id, username, tag, global name, mention).
pub fn find_user(cache: &serenity::Cache, query: &str) -> Option<serenity::User> {
    if let Some(found) = find_first(EntityKind::User, query, cached_users(cache)) {
        return Some(found);
    }

    // Users outside every cached guild can still sit in the user cache.
    let id = strip_mention(EntityKind::User, query)
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)?;
    cache
        .user(serenity::UserId::new(id))
        .map(|user| (*user).clone())
}

/// Member lookup only (id, display name, nickname, mention).
pub fn find_member(
    cache: &serenity::Cache,
    guild_id: serenity::GuildId,
    query: &str,
) -> Option<serenity::Member> {
    find_first(EntityKind::Member, query, guild_members(cache, guild_id))
}

/// Resolve a user, preferring a member of `guild_id` that matches the query.
pub fn resolve_user(
    cache: &serenity::Cache,
    guild_id: Option<serenity::GuildId>,
    query: &str,
) -> Option<serenity::User> {
    let user = user_preferring_member(
        || guild_id.and_then(|guild_id| find_member(cache, guild_id, query)),
        |member| member.user,
        || find_user(cache, query),
    );
    if user.is_none() {
        log_miss(EntityKind::User, query);
    }
    user
}

/// Resolve a member of `guild_id`, falling back to "a user matching the
/// query who is a member of this guild".
pub fn resolve_member(
    cache: &serenity::Cache,
    guild_id: serenity::GuildId,
    query: &str,
) -> Option<serenity::Member> {
    let member = member_or_user_membership(
        || find_member(cache, guild_id, query),
        || find_user(cache, query),
        |user| {
            cache
                .guild(guild_id)
                .and_then(|g| g.members.get(&user.id).cloned())
        },
    );
    if member.is_none() {
        log_miss(EntityKind::Member, query);
    }
    member
}

pub fn resolve_role(
    cache: &serenity::Cache,
    guild_id: serenity::GuildId,
    query: &str,
) -> Option<serenity::Role> {
    let roles: Vec<serenity::Role> = cache
        .guild(guild_id)
        .map(|g| g.roles.values().cloned().collect())
        .unwrap_or_default();

    let role = find_first(EntityKind::Role, query, roles);
    if role.is_none() {
        log_miss(EntityKind::Role, query);
    }
    role
}

pub fn resolve_channel(cache: &serenity::Cache, query: &str) -> Option<serenity::GuildChannel> {
    let channels: Vec<serenity::GuildChannel> = cache
        .guilds()
        .into_iter()
        .filter_map(|guild_id| cache.guild(guild_id).map(|g| g.channels.clone()))
        .flat_map(|channels| channels.into_values())
        .collect();

    let channel = find_first(EntityKind::Channel, query, channels);
    if channel.is_none() {
        log_miss(EntityKind::Channel, query);
    }
    channel
}

/// Custom emojis from every cached guild.
pub fn resolve_emoji(cache: &serenity::Cache, query: &str) -> Option<serenity::Emoji> {
    let emojis: Vec<serenity::Emoji> = cache
        .guilds()
        .into_iter()
        .filter_map(|guild_id| {
            cache
                .guild(guild_id)
                .map(|g| g.emojis.values().cloned().collect::<Vec<_>>())
        })
        .flatten()
        .collect();

    let emoji = find_first(EntityKind::Emoji, query, emojis);
    if emoji.is_none() {
        log_miss(EntityKind::Emoji, query);
    }
    emoji
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU16;

    fn user(id: u64, name: &str) -> serenity::User {
        let mut user = serenity::User::default();
        user.id = serenity::UserId::new(id);
        user.name = name.to_string();
        user
    }

    fn role(id: u64, name: &str) -> serenity::Role {
        let mut role = serenity::Role::default();
        role.id = serenity::RoleId::new(id);
        role.name = name.to_string();
        role
    }

    #[test]
    fn test_user_labels_and_mention() {
        let mut bob = user(123, "bob");
        bob.discriminator = NonZeroU16::new(4242);
        bob.global_name = Some("Bobby".to_string());

        assert!(Resolvable::matches_label(&bob, "bob"));
        assert!(Resolvable::matches_label(&bob, "bob#4242"));
        assert!(Resolvable::matches_label(&bob, "Bobby"));
        assert!(!Resolvable::matches_label(&bob, "bo"));
        assert_eq!(Resolvable::mention(&bob), "<@123>");
    }

    #[test]
    fn test_user_mention_resolves_like_bare_id() {
        let users = vec![user(7, "amy"), user(123, "bob")];
        let by_mention = find_first(EntityKind::User, "<@!123>", users.clone());
        let by_id = find_first(EntityKind::User, "123", users);

        assert_eq!(by_mention.map(|u| u.id.get()), Some(123));
        assert_eq!(by_id.map(|u| u.id.get()), Some(123));
    }

    #[test]
    fn test_member_matches_nickname() {
        let mut member = serenity::Member::default();
        member.user = user(123, "bob");
        member.nick = Some("Builder".to_string());

        assert!(Resolvable::matches_label(&member, "Builder"));
        assert!(!Resolvable::matches_label(&member, "Bob"));
        assert_eq!(Resolvable::entity_id(&member), 123);
        assert_eq!(Resolvable::mention(&member), "<@123>");
    }

    #[test]
    fn test_role_by_name_and_mention() {
        let roles = vec![role(456, "Mods"), role(789, "Gamers")];

        assert_eq!(Resolvable::mention(&roles[0]), "<@&456>");
        assert_eq!(
            find_first(EntityKind::Role, "Gamers", roles.clone()).map(|r| r.id.get()),
            Some(789)
        );
        assert_eq!(
            find_first(EntityKind::Role, "<@&456>", roles.clone()).map(|r| r.id.get()),
            Some(456)
        );
        assert!(find_first(EntityKind::Role, "gamers", roles).is_none());
    }

    #[test]
    fn test_empty_cache_resolves_nothing() {
        let cache = serenity::Cache::new();
        let guild_id = serenity::GuildId::new(1);

        assert!(resolve_user(&cache, Some(guild_id), "<@!123>").is_none());
        assert!(resolve_member(&cache, guild_id, "bob").is_none());
        assert!(resolve_role(&cache, guild_id, "<@&456>").is_none());
        assert!(resolve_channel(&cache, "<#789>").is_none());
        assert!(resolve_emoji(&cache, "<:rust:10>").is_none());
    }
}
