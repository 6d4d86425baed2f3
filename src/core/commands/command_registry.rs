use super::command_models::{Command, CommandSpec};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command name must not be empty")]
    EmptyName,

    #[error("Command name \"{0}\" must not contain whitespace")]
    InvalidName(String),

    #[error("Command \"{0}\" is already registered")]
    Duplicate(String),
}

/// Name-keyed table of commands, built once at startup and read-only afterwards.
///
/// Keys are lowercased so lookups are case-insensitive.
pub struct CommandRegistry<H> {
    commands: HashMap<String, Command<H>>,
}

impl<H> CommandRegistry<H> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, spec: CommandSpec, handler: H) -> Result<(), RegistryError> {
        if spec.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if spec.name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(spec.name.to_string()));
        }

        let key = spec.name.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }

        self.commands.insert(key, Command { spec, handler });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command<H>> {
        self.commands.get(&name.to_lowercase())
    }

    /// All command specs, sorted by name so listings are stable.
    pub fn specs(&self) -> Vec<&CommandSpec> {
        let mut specs: Vec<&CommandSpec> = self.commands.values().map(|c| &c.spec).collect();
        specs.sort_by_key(|spec| spec.name);
        specs
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl<H> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &'static str) -> CommandSpec {
        CommandSpec {
            name,
            description: "test command",
            usage: "",
            num_required_args: 0,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(spec("User"), 1).unwrap();

        assert_eq!(registry.get("user").map(|c| c.handler), Some(1));
        assert_eq!(registry.get("USER").map(|c| c.handler), Some(1));
        assert!(registry.get("users").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(spec("help"), 1).unwrap();

        let err = registry.register(spec("HELP"), 2).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("help".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("help").map(|c| c.handler), Some(1));
    }

    #[test]
    fn test_bad_names_rejected() {
        let mut registry: CommandRegistry<u8> = CommandRegistry::new();
        assert_eq!(registry.register(spec(""), 0), Err(RegistryError::EmptyName));
        assert_eq!(
            registry.register(spec("two words"), 0),
            Err(RegistryError::InvalidName("two words".to_string()))
        );
        assert!(registry.specs().is_empty());
    }

    #[test]
    fn test_specs_sorted_by_name() {
        let mut registry = CommandRegistry::new();
        registry.register(spec("user"), ()).unwrap();
        registry.register(spec("help"), ()).unwrap();
        registry.register(spec("avatar"), ()).unwrap();

        let names: Vec<_> = registry.specs().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["avatar", "help", "user"]);
    }
}
