// User profiles for the `user` command.
//
// The Discord layer copies what it needs out of a serenity `User` into a
// `UserProfile`; this module decides how that is presented.

use crate::core::panels::{Panel, Tone};
use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    /// Legacy 4-digit discriminator; `None` for accounts on the new username system.
    pub discriminator: Option<u16>,
    pub tag: String,
    pub bot: bool,
    pub created_at: DateTime<Utc>,
    pub avatar_url: Option<String>,
    pub last_message_id: Option<u64>,
}

pub fn profile_panel(profile: &UserProfile) -> Panel {
    let discriminator = profile
        .discriminator
        .map(|d| format!("{:04}", d))
        .unwrap_or_else(|| "0".to_string());

    let mut panel = Panel::new(
        Tone::Success,
        format!("User {} #{}", profile.name, profile.id),
    );
    if let Some(url) = &profile.avatar_url {
        panel = panel.thumbnail(url.clone());
    }

    panel = panel
        .field(
            "Created Date",
            profile
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            true,
        )
        .field("Discriminator", discriminator, true)
        .field("Tag", profile.tag.clone(), true);

    if profile.bot {
        panel = panel.field("Bot", "true", true);
    }
    if let Some(message_id) = profile.last_message_id {
        panel = panel.field("Last Message", message_id.to_string(), true);
    }

    panel
}

pub fn user_not_found_panel() -> Panel {
    Panel::new(Tone::Warning, "Error getting user.")
}

/// Most recent message id per author, fed from the message stream.
pub struct LastMessageIndex {
    // User ID -> newest Message ID seen
    latest: DashMap<u64, u64>,
}

impl LastMessageIndex {
    pub fn new() -> Self {
        Self {
            latest: DashMap::new(),
        }
    }

    /// Remember a message; older ids never overwrite newer ones.
    pub fn record(&self, user_id: u64, message_id: u64) {
        self.latest
            .entry(user_id)
            .and_modify(|current| *current = (*current).max(message_id))
            .or_insert(message_id);
    }

    pub fn last_message(&self, user_id: u64) -> Option<u64> {
        self.latest.get(&user_id).map(|id| *id)
    }
}

impl Default for LastMessageIndex {
    fn default() -> Self {
        Self::new()
    }
}
