// Command definitions and the outcome of routing a message to one.
//
// The handler type is left generic so the core never has to know what a
// Discord context looks like. Tests use plain values as handlers.

/// Static description of a text command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Argument synopsis shown after `<prefix><name>`, e.g. `<USER>`.
    pub usage: &'static str,
    pub num_required_args: usize,
}

/// A registered command: its metadata plus whatever runs it.
#[derive(Debug, Clone)]
pub struct Command<H> {
    pub spec: CommandSpec,
    pub handler: H,
}

/// A message that looked like a command, split into name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lowercased command name, prefix already stripped.
    pub name: String,
    pub args: Vec<String>,
}

/// What the dispatcher decided to do with an invocation.
#[derive(Debug)]
pub enum Route<'a, H> {
    Execute {
        command: &'a Command<H>,
        args: Vec<String>,
    },
    Unknown {
        name: String,
    },
    MissingArguments {
        spec: &'a CommandSpec,
        supplied: usize,
    },
}
