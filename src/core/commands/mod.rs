pub mod command_dispatcher;
pub mod command_models;
pub mod command_registry;

pub use command_dispatcher::{
    command_help_panel, help_panel, parse_invocation, route, unknown_command_panel, usage_panel,
};
pub use command_models::{Command, CommandSpec, Invocation, Route};
pub use command_registry::{CommandRegistry, RegistryError};
