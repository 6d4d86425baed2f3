pub mod invite_models;
pub mod invite_tracker;

pub use invite_models::{InviteSnapshot, InviterInfo, JoinAttribution};
pub use invite_tracker::{join_panel, InviteError, InviteStore, InviteTracker};
