//! Host-side collaborators of the alias engine.
//!
//! The alias engine does not own command dispatch, execution, completion or
//! executable lookup. It talks to them through the traits in this module so
//! that the interactive [`Shell`](crate::shell::Shell) and the test fakes can
//! both play the host role.

mod console;
mod lookup;

pub use console::{Console, ConsoleMessage, MemoryConsole, MessageKind, TerminalConsole};
pub use lookup::{ExecutableLookup, PathLookup};

/// A named command exposed by a dispatcher, with its one-line description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Invocation name
    pub name: String,

    /// Short description shown by `help`
    pub description: String,
}

impl CommandInfo {
    /// Create a new command description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

/// A dispatcher in the host's active dispatcher stack.
pub trait CommandDispatcher {
    /// Dispatcher name, used as a section header by `help`.
    fn name(&self) -> &str;

    /// The commands this dispatcher exposes.
    ///
    /// `None` means the dispatcher exposes no commands at all.
    fn commands(&self) -> Option<Vec<CommandInfo>> {
        None
    }
}

/// Runs a command line as if the user had typed it.
pub trait HostExecutor {
    /// Execute a single command line. Output is not returned to the caller.
    fn run_single(&mut self, line: &str);
}

/// Resolves completion candidates for a partial command line.
pub trait CompletionResolver {
    /// Complete the last word of `line`. A trailing space means a new word.
    fn tab_complete(&mut self, line: &str) -> Vec<String>;
}

/// Read-only view over the dispatcher stack.
#[derive(Clone, Copy)]
pub struct DispatcherStack<'a> {
    dispatchers: &'a [&'a dyn CommandDispatcher],
}

impl<'a> DispatcherStack<'a> {
    /// Wrap a list of dispatchers, top of the stack last.
    pub fn new(dispatchers: &'a [&'a dyn CommandDispatcher]) -> Self {
        Self { dispatchers }
    }

    /// Iterate over the dispatchers.
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn CommandDispatcher> + '_ {
        self.dispatchers.iter().copied()
    }

    /// Check whether any dispatcher exposes a command called `name`.
    pub fn exposes(&self, name: &str) -> bool {
        self.iter()
            .filter_map(|d| d.commands())
            .any(|commands| commands.iter().any(|c| c.name == name))
    }

    /// Every command name exposed by the stack, in dispatcher order.
    pub fn command_names(&self) -> Vec<String> {
        self.iter()
            .filter_map(|d| d.commands())
            .flat_map(|commands| commands.into_iter().map(|c| c.name))
            .collect()
    }
}

impl std::fmt::Debug for DispatcherStack<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|d| d.name())).finish()
    }
}
