// `~help [COMMAND]` - list commands, or show one command's usage.

use super::{CommandContext, CommandFuture, Error};
use crate::core::commands::{command_help_panel, help_panel, unknown_command_panel, CommandSpec};
use crate::discord::panels::send_panel;

pub fn spec() -> CommandSpec {
    CommandSpec {
        name: "help",
        description: "List every command, or show how to use one",
        usage: "[COMMAND]",
        num_required_args: 0,
    }
}

pub fn execute<'a>(ctx: CommandContext<'a>, args: &'a [String]) -> CommandFuture<'a> {
    Box::pin(run(ctx, args))
}

async fn run(ctx: CommandContext<'_>, args: &[String]) -> Result<(), Error> {
    let prefix = ctx.data.prefix.as_str();
    let registry = &*ctx.data.commands;

    let panel = match args.first() {
        None => help_panel(prefix, registry),
        Some(requested) => {
            // Accept both `~help user` and `~help ~user`
            let name = requested.strip_prefix(prefix).unwrap_or(requested);
            match registry.get(name) {
                Some(command) => command_help_panel(prefix, &command.spec),
                None => unknown_command_panel(&name.to_lowercase()),
            }
        }
    };

    send_panel(&ctx.serenity.http, ctx.message.channel_id, &panel).await?;
    Ok(())
}
