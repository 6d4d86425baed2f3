// `~user <USER>` - show a member's account details.

use super::{CommandContext, CommandFuture, Error};
use crate::core::commands::CommandSpec;
use crate::core::profiles::{profile_panel, user_not_found_panel, UserProfile};
use crate::discord::panels::send_panel;
use crate::discord::resolver::resolve_user;
use poise::serenity_prelude as serenity;

pub fn spec() -> CommandSpec {
    CommandSpec {
        name: "user",
        description: "View information about a user",
        usage: "<USER>",
        num_required_args: 1,
    }
}

pub fn execute<'a>(ctx: CommandContext<'a>, args: &'a [String]) -> CommandFuture<'a> {
    Box::pin(run(ctx, args))
}

async fn run(ctx: CommandContext<'_>, args: &[String]) -> Result<(), Error> {
    let query = args.first().map(String::as_str).unwrap_or_default();

    let panel = match resolve_user(&ctx.serenity.cache, ctx.message.guild_id, query) {
        Some(user) => {
            let last_message_id = ctx.data.last_messages.last_message(user.id.get());
            profile_panel(&to_profile(&user, last_message_id))
        }
        None => user_not_found_panel(),
    };

    send_panel(&ctx.serenity.http, ctx.message.channel_id, &panel).await?;
    Ok(())
}

fn to_profile(user: &serenity::User, last_message_id: Option<u64>) -> UserProfile {
    UserProfile {
        id: user.id.get(),
        name: user.name.clone(),
        discriminator: user.discriminator.map(|d| d.get()),
        tag: user.tag(),
        bot: user.bot,
        created_at: *user.created_at(),
        avatar_url: Some(user.face()),
        last_message_id,
    }
}
