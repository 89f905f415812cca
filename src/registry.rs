//! Command lookup
//!
//! Maps uppercase verbs to [`Command`] implementations. The registry is built
//! once at startup and handed to the command stream; HELP lists entries in
//! registration order.

use std::collections::HashMap;
use crate::{
    command::{
        Command, Continuation, FnCommand, HelpCommand, LeftCommand, MoveCommand, PlaceCommand,
        ReportCommand, RightCommand, SessionContext,
    },
    robot::Robot,
    Result, SimError,
};

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding PLACE, LEFT, RIGHT, MOVE, REPORT and HELP
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(PlaceCommand::new()?))?;
        registry.register(Box::new(LeftCommand))?;
        registry.register(Box::new(RightCommand))?;
        registry.register(Box::new(MoveCommand))?;
        registry.register(Box::new(ReportCommand))?;
        registry.register(Box::new(HelpCommand))?;
        Ok(registry)
    }

    pub fn register(&mut self, command: Box<dyn Command>) -> Result<()> {
        let name = command.name();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(SimError::Config(format!("Invalid command name: {:?}", name)));
        }

        let key = name.to_uppercase();
        if self.index.contains_key(&key) {
            return Err(SimError::DuplicateCommand(key));
        }

        self.index.insert(key, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Register a closure under `name`
    pub fn register_fn<F>(&mut self, name: &str, usage: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut Robot, &mut SessionContext<'_>, Option<&str>) -> Result<Continuation> + 'static,
    {
        self.register(Box::new(FnCommand::new(name, usage, handler)))
    }

    /// Find the command for `line` and split off its arguments.
    ///
    /// Returns `None` for blank lines and unknown verbs.
    pub fn resolve<'l>(&self, line: &'l str) -> Option<(&dyn Command, Option<&'l str>)> {
        let (verb, args) = split_command(line)?;
        let position = *self.index.get(&verb)?;
        Some((self.commands[position].as_ref(), args))
    }

    /// Registered commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> + '_ {
        self.commands.iter().map(|command| command.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Split a raw line into an uppercase verb and the untouched remainder.
///
/// The line is trimmed and split on its first whitespace run. Blank lines
/// yield `None`.
pub fn split_command(line: &str) -> Option<(String, Option<&str>)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => Some((verb.to_uppercase(), Some(rest.trim_start()))),
        None => Some((trimmed.to_uppercase(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("MOVE"), Some(("MOVE".to_string(), None)));
        assert_eq!(split_command("  report \n"), Some(("REPORT".to_string(), None)));
        assert_eq!(
            split_command("place   1, 2 ,north  "),
            Some(("PLACE".to_string(), Some("1, 2 ,north")))
        );
        assert_eq!(split_command("PLACE\t0,0,EAST"), Some(("PLACE".to_string(), Some("0,0,EAST"))));
        assert_eq!(split_command(""), None);
        assert_eq!(split_command(" \t "), None);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = CommandRegistry::with_builtins().unwrap();
        for line in ["move", "Move", "MOVE", "  mOvE  "] {
            let (command, args) = registry.resolve(line).unwrap();
            assert_eq!(command.name(), "MOVE");
            assert_eq!(args, None);
        }
    }

    #[test]
    fn test_resolve_passes_arguments_through() {
        let registry = CommandRegistry::with_builtins().unwrap();
        let (command, args) = registry.resolve("place 1,2,NORTH").unwrap();
        assert_eq!(command.name(), "PLACE");
        assert_eq!(args, Some("1,2,NORTH"));
    }

    #[test]
    fn test_resolve_unknown_and_blank() {
        let registry = CommandRegistry::with_builtins().unwrap();
        assert!(registry.resolve("JUMP").is_none());
        assert!(registry.resolve("PLACE1,2,NORTH").is_none());
        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("   ").is_none());
    }

    #[test]
    fn test_builtins_registered_in_order() {
        let registry = CommandRegistry::with_builtins().unwrap();
        let names: Vec<&str> = registry.commands().map(|command| command.name()).collect();
        assert_eq!(names, ["PLACE", "LEFT", "RIGHT", "MOVE", "REPORT", "HELP"]);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = CommandRegistry::with_builtins().unwrap();
        let result = registry.register_fn("move", "", |_, _, _| Ok(Continuation::Continue));
        assert!(matches!(result, Err(SimError::DuplicateCommand(name)) if name == "MOVE"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry = CommandRegistry::new();
        for name in ["", "TWO WORDS"] {
            assert!(registry.register_fn(name, "", |_, _, _| Ok(Continuation::Continue)).is_err());
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_custom_command_set() {
        let mut registry = CommandRegistry::new();
        registry
            .register_fn("quit", "", |_, _, _| Ok(Continuation::Halt))
            .unwrap();
        let (command, _) = registry.resolve("QUIT").unwrap();
        assert_eq!(command.name(), "quit");
        assert!(registry.resolve("MOVE").is_none());
    }
}
