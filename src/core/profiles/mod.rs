pub mod user_profile;

pub use user_profile::{profile_panel, user_not_found_panel, LastMessageIndex, UserProfile};
