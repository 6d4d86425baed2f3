// Implementations of the invite cache.
//
// Invites are never persisted: the cache is rebuilt from the API on every
// start, so an in-memory map is all we need.

pub mod in_memory;

// Re-export for convenience
pub use in_memory::InMemoryInviteStore;
