// The text-command dispatcher.
//
// Dispatch is split in two pure steps so it can be tested without Discord:
// 1. `parse_invocation` decides whether a message is a command at all
// 2. `route` decides what to do with it given the registry
//
// Sending replies, running handlers and deleting the trigger message happens
// in the Discord layer.

use super::command_models::{CommandSpec, Invocation, Route};
use super::command_registry::CommandRegistry;
use crate::core::panels::{Panel, Tone};

/// Turn raw message text into an invocation, or `None` if it should be ignored.
///
/// Ignored: bot authors, text without the prefix, a bare prefix, and names
/// that start with the prefix again (`~~strikethrough~~`).
pub fn parse_invocation(prefix: &str, content: &str, author_is_bot: bool) -> Option<Invocation> {
    if author_is_bot {
        return None;
    }

    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();

    if name.starts_with(prefix) {
        return None;
    }

    Some(Invocation {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}

pub fn route<H>(registry: &CommandRegistry<H>, invocation: Invocation) -> Route<'_, H> {
    let Some(command) = registry.get(&invocation.name) else {
        return Route::Unknown {
            name: invocation.name,
        };
    };

    let supplied = invocation.args.len();
    if supplied < command.spec.num_required_args {
        return Route::MissingArguments {
            spec: &command.spec,
            supplied,
        };
    }

    Route::Execute {
        command,
        args: invocation.args,
    }
}

/// Longest command name echoed back; embed titles cap at 256 characters.
const MAX_ECHOED_NAME: usize = 200;

pub fn unknown_command_panel(name: &str) -> Panel {
    let shown = if name.chars().count() > MAX_ECHOED_NAME {
        let cut: String = name.chars().take(MAX_ECHOED_NAME).collect();
        format!("{}...", cut)
    } else {
        name.to_string()
    };
    Panel::new(Tone::Info, format!("Unknown command \"{}\"", shown))
}

pub fn usage_panel(prefix: &str, spec: &CommandSpec) -> Panel {
    Panel::new(Tone::Warning, format!("Usage: {}", usage_line(prefix, spec)))
}

/// `~user <USER>` style synopsis.
pub fn usage_line(prefix: &str, spec: &CommandSpec) -> String {
    if spec.usage.is_empty() {
        format!("{}{}", prefix, spec.name)
    } else {
        format!("{}{} {}", prefix, spec.name, spec.usage)
    }
}

/// Listing of every registered command, used by `help`.
pub fn help_panel<H>(prefix: &str, registry: &CommandRegistry<H>) -> Panel {
    registry
        .specs()
        .into_iter()
        .fold(
            Panel::new(Tone::Info, "Commands").description(format!(
                "Use `{}help <command>` for details on a single command.",
                prefix
            )),
            |panel, spec| {
                panel.field(
                    usage_line(prefix, spec),
                    spec.description.to_string(),
                    false,
                )
            },
        )
}

pub fn command_help_panel(prefix: &str, spec: &CommandSpec) -> Panel {
    Panel::new(Tone::Info, format!("{}{}", prefix, spec.name))
        .description(spec.description)
        .field("Usage", usage_line(prefix, spec), false)
        .field(
            "Required arguments",
            spec.num_required_args.to_string(),
            true,
        )
}
