// Bot presence.
//
// The only presence we ever show is a pointer to the help command, so people
// who see the bot in the member list know how to talk to it.

use poise::serenity_prelude as serenity;

/// Called on every ready so the status survives reconnects.
pub fn on_ready(ctx: &serenity::Context, prefix: &str) {
    let activity = serenity::ActivityData::playing(format!("{}help", prefix));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}
