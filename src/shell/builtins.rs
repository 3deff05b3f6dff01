//! Core console commands.

use crate::host::{CommandDispatcher, CommandInfo};

/// Built-in commands that are always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// List every available command
    Help,
    /// Leave the shell
    Exit,
    /// Print the shell version
    Version,
}

impl Builtin {
    /// Resolve a command word to a builtin.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "help" | "?" => Some(Self::Help),
            "exit" | "quit" => Some(Self::Exit),
            "version" => Some(Self::Version),
            _ => None,
        }
    }
}

/// Dispatcher for the core commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreDispatcher;

impl CommandDispatcher for CoreDispatcher {
    fn name(&self) -> &str {
        "Core"
    }

    fn commands(&self) -> Option<Vec<CommandInfo>> {
        Some(vec![
            CommandInfo::new("?", "Help menu"),
            CommandInfo::new("exit", "Exit the console"),
            CommandInfo::new("help", "Help menu"),
            CommandInfo::new("quit", "Exit the console"),
            CommandInfo::new("version", "Show the console version"),
        ])
    }
}
