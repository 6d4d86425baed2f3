// Text-command dispatch for incoming messages.
//
// **The flow:**
// 1. Ask core whether the message is a command at all (prefix, bot author, ...)
// 2. Route it through the registry
// 3. Reply with a notice or run the handler
// 4. Try to delete the triggering message
//
// At most one reply is sent here; handlers may send their own.

use crate::core::commands::{parse_invocation, route, unknown_command_panel, usage_panel, Route};
use crate::discord::commands::{CommandContext, Data, Error};
use crate::discord::error_report::report_error;
use crate::discord::panels::send_panel;
use poise::serenity_prelude as serenity;

pub async fn handle_message(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    if !message.author.bot {
        data.last_messages.record(message.author.id.get(), message.id.get());
    }

    let Some(invocation) = parse_invocation(&data.prefix, &message.content, message.author.bot)
    else {
        return Ok(());
    };

    let name = invocation.name.clone();
    tracing::debug!(
        command = %name,
        args = invocation.args.len(),
        author_id = message.author.id.get(),
        "Dispatching command"
    );

    let result: Result<(), Error> = match route(&*data.commands, invocation) {
        Route::Unknown { name } => {
            send_panel(&ctx.http, message.channel_id, &unknown_command_panel(&name))
                .await
                .map(|_| ())
                .map_err(Error::from)
        }
        Route::MissingArguments { spec, supplied } => {
            tracing::debug!(
                command = spec.name,
                supplied,
                required = spec.num_required_args,
                "Not enough arguments"
            );
            send_panel(&ctx.http, message.channel_id, &usage_panel(&data.prefix, spec))
                .await
                .map(|_| ())
                .map_err(Error::from)
        }
        Route::Execute { command, args } => {
            let command_ctx = CommandContext {
                serenity: ctx,
                data,
                message,
            };
            (command.handler)(command_ctx, &args).await
        }
    };

    if let Err(e) = result {
        report_error(
            &ctx.http,
            &format!("Error running command [{}].", name),
            Some(&e),
            Some(message.channel_id),
        )
        .await;
    }

    // Missing "Manage Messages" just means the trigger stays.
    if let Err(e) = message.delete(&ctx.http).await {
        tracing::debug!("Could not delete command message: {}", e);
    }

    Ok(())
}
