/// Who created an invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviterInfo {
    pub id: u64,
    pub tag: String,
}

/// An invite as it looked the last time we fetched the guild's invite list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteSnapshot {
    pub code: String,
    pub uses: u64,
    pub inviter: Option<InviterInfo>,
}

/// Which invite (if any) a new member used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinAttribution {
    Invite(InviteSnapshot),
    /// No use-count went up: vanity URL, an expired one-use invite, or a race.
    Unknown,
}
