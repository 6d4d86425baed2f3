// Entity resolution - turning what a human typed into a cached entity.
//
// A query can be a raw snowflake, mention markup (`<@!123>`, `<@&456>`,
// `<#789>`, `<:wave:42>`), or a plain name/tag. Matching is exact, never fuzzy.
//
// The Discord layer implements `Resolvable` for the serenity types and feeds
// owned copies of the cache in here, so this module stays platform-agnostic.

/// The entity families a query can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Member,
    Role,
    Channel,
    Emoji,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Member => "member",
            EntityKind::Role => "role",
            EntityKind::Channel => "channel",
            EntityKind::Emoji => "emoji",
        }
    }
}

/// Anything that can be matched against a free-text query.
pub trait Resolvable {
    fn entity_id(&self) -> u64;

    /// Exact match against one of the entity's human-facing names
    /// (username, tag, nickname, display name, role name, ...).
    fn matches_label(&self, query: &str) -> bool;

    /// The entity's mention markup, e.g. `<@&456>`.
    fn mention(&self) -> String;
}

/// Remove the mention wrapper for `kind`, leaving the inner id.
///
/// Text that is not mention markup is returned unchanged (trimmed).
pub fn strip_mention(kind: EntityKind, query: &str) -> &str {
    let query = query.trim();
    let inner = match kind {
        EntityKind::User | EntityKind::Member => query
            .strip_prefix("<@!")
            .or_else(|| query.strip_prefix("<@"))
            .filter(|rest| !rest.starts_with('&'))
            .and_then(|rest| rest.strip_suffix('>')),
        EntityKind::Role => query
            .strip_prefix("<@&")
            .and_then(|rest| rest.strip_suffix('>')),
        EntityKind::Channel => query
            .strip_prefix("<#")
            .and_then(|rest| rest.strip_suffix('>')),
        // <:name:id> and <a:name:id>
        EntityKind::Emoji => query
            .strip_prefix("<a:")
            .or_else(|| query.strip_prefix("<:"))
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|rest| rest.rsplit_once(':'))
            .map(|(_, id)| id),
    };

    inner.unwrap_or(query)
}

/// Find the entity a query refers to.
///
/// An exact id match always wins. Otherwise the oldest entity (lowest
/// snowflake) among the name/mention matches is returned, so ties never depend
/// on cache iteration order.
pub fn find_first<T, I>(kind: EntityKind, query: &str, candidates: I) -> Option<T>
where
    T: Resolvable,
    I: IntoIterator<Item = T>,
{
    let raw = query.trim();
    let stripped = strip_mention(kind, raw);
    if stripped.is_empty() {
        return None;
    }
    let wanted_id = stripped.parse::<u64>().ok();

    let mut best: Option<T> = None;
    for candidate in candidates {
        let id = candidate.entity_id();
        if Some(id) == wanted_id {
            return Some(candidate);
        }

        let label_match = candidate.matches_label(stripped)
            || candidate.matches_label(raw)
            || candidate.mention() == raw;
        if !label_match {
            continue;
        }

        if best.as_ref().map_or(true, |b| id < b.entity_id()) {
            best = Some(candidate);
        }
    }

    best
}

/// Does `text` name the custom emoji `name`/`id`?
///
/// Accepts the raw id, `<:name:id>` / `<a:name:id>` markup, the bare name and
/// the `name:id` identifier used in reaction URLs.
pub fn custom_emoji_text_matches(text: &str, name: Option<&str>, id: u64) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let id = id.to_string();
    if strip_mention(EntityKind::Emoji, text) == id {
        return true;
    }
    match name {
        Some(name) => text == name || text == format!("{}:{}", name, id),
        None => false,
    }
}

/// Custom emoji names are ASCII word characters, so anything else (a unicode
/// emoji, say) can never resolve to one.
pub fn could_name_custom_emoji(text: &str) -> bool {
    let text = text.trim();
    let inner = text
        .strip_prefix("<a:")
        .or_else(|| text.strip_prefix("<:"))
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(text);

    !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// User resolution: the matching guild member's user wins, otherwise a plain
/// user lookup. Each lookup runs at most once.
pub fn user_preferring_member<M, U>(
    find_member: impl FnOnce() -> Option<M>,
    member_user: impl FnOnce(M) -> U,
    find_user: impl FnOnce() -> Option<U>,
) -> Option<U> {
    find_member().map(member_user).or_else(find_user)
}

/// Member resolution: a direct member match, otherwise the guild membership
/// of a matching user. Each lookup runs at most once.
pub fn member_or_user_membership<M, U>(
    find_member: impl FnOnce() -> Option<M>,
    find_user: impl FnOnce() -> Option<U>,
    membership: impl FnOnce(U) -> Option<M>,
) -> Option<M> {
    find_member().or_else(|| find_user().and_then(membership))
}
