// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "invites/invite_store.rs"]
pub mod invites;
