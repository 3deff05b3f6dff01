//! The interactive shell hosting the alias engine.
//!
//! A line is dispatched in this order: the `alias` command, registered
//! aliases, core builtins, then executables found on the search path.

mod builtins;

use std::io::{self, BufRead};

use tracing::{debug, info, warn};

pub use builtins::{Builtin, CoreDispatcher};

use crate::alias::{AliasDispatcher, AliasHandler, AliasResult, ALIAS_COMMAND};
use crate::core::{CommandRunner, Config, Executor};
use crate::host::{
    CommandDispatcher, CompletionResolver, Console, DispatcherStack, ExecutableLookup,
    HostExecutor, PathLookup, TerminalConsole,
};
use crate::ui::Table;

/// An interactive command shell with alias support.
pub struct Shell<C: Console = TerminalConsole> {
    config: Config,
    core: CoreDispatcher,
    aliases: AliasDispatcher,
    runner: Box<dyn CommandRunner>,
    lookup: Box<dyn ExecutableLookup>,
    console: C,

    /// Current nesting of alias dispatch
    depth: usize,

    running: bool,
}

impl<C: Console> std::fmt::Debug for Shell<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("aliases", &self.aliases.registry().len())
            .field("depth", &self.depth)
            .field("running", &self.running)
            .finish()
    }
}

impl<C: Console> Shell<C> {
    /// Create a shell that runs external commands through the system shell
    /// and resolves them on the current `PATH`.
    pub fn new(config: Config, console: C) -> AliasResult<Self> {
        let aliases = AliasDispatcher::from_config(&config.alias)?;
        let runner = Executor::new().with_shell(config.general.shell.clone());

        Ok(Self {
            config,
            core: CoreDispatcher,
            aliases,
            runner: Box::new(runner),
            lookup: Box::new(PathLookup::from_env()),
            console,
            depth: 0,
            running: true,
        })
    }

    /// Replace the runner used for external commands.
    #[must_use]
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Replace the executable lookup.
    #[must_use]
    pub fn with_lookup(mut self, lookup: impl ExecutableLookup + 'static) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The alias dispatcher and its registry.
    pub fn aliases(&self) -> &AliasDispatcher {
        &self.aliases
    }

    /// The console messages are written to.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Whether `exit` has not been run yet.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Every command name exposed by the dispatcher stack, aliases included.
    pub fn command_names(&self) -> Vec<String> {
        let dispatchers: [&dyn CommandDispatcher; 2] = [&self.core, &self.aliases];
        DispatcherStack::new(&dispatchers).command_names()
    }

    /// Run one command line.
    pub fn run_single(&mut self, line: &str) {
        let mut words = line.split_whitespace().map(str::to_string);
        let Some(head) = words.next() else {
            return;
        };
        let args: Vec<String> = words.collect();

        if head == ALIAS_COMMAND {
            let others: [&dyn CommandDispatcher; 1] = [&self.core];
            self.aliases.cmd_alias(
                &args,
                DispatcherStack::new(&others),
                self.lookup.as_ref(),
                &mut self.console,
            );
            return;
        }

        if let Some(handler) = self.aliases.handler(&head).cloned() {
            self.dispatch_alias(&handler, &args);
            return;
        }

        if let Some(builtin) = Builtin::from_name(&head) {
            self.run_builtin(builtin);
            return;
        }

        self.run_external(&head, line.trim());
    }

    /// Completion candidates for the last word of `line`, sorted and unique.
    ///
    /// A line ending in whitespace completes a new, empty word.
    pub fn tab_complete(&mut self, line: &str) -> Vec<String> {
        let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let partial = if line.is_empty() || line.ends_with(char::is_whitespace) {
            String::new()
        } else {
            words.pop().unwrap_or_default()
        };

        let candidates = match words.first().map(String::as_str) {
            None => self.command_names(),
            Some(ALIAS_COMMAND) => {
                let names = self.command_names();
                self.aliases.cmd_alias_tabs(&partial, &words, &names)
            }
            Some(head) => match self.aliases.handler(head).cloned() {
                Some(handler) => self.complete_alias(&handler, &partial, &words),
                None => Vec::new(),
            },
        };

        let mut matches: Vec<String> =
            candidates.into_iter().filter(|c| c.starts_with(partial.as_str())).collect();
        matches.sort();
        matches.dedup();
        matches
    }

    /// Read and run lines until end of input or `exit`.
    ///
    /// A line ending in a TAB character is a completion request: the
    /// candidates are printed instead of running the line. Bytes that are not
    /// valid UTF-8 are decoded lossily.
    pub fn run_loop<R: BufRead>(&mut self, mut input: R, interactive: bool) -> io::Result<()> {
        info!(interactive, "Shell session started");
        let mut buffer = Vec::new();

        while self.running {
            if interactive {
                let prompt = self.config.general.prompt.clone();
                self.console.print_raw(&prompt);
            }

            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }

            // Invalid UTF-8 is replaced rather than ending the session.
            let decoded = String::from_utf8_lossy(&buffer);
            let line = decoded.trim_end_matches(['\n', '\r']);
            if let Some(partial) = line.strip_suffix('\t') {
                let candidates = self.tab_complete(partial);
                if !candidates.is_empty() {
                    self.console.print_line(&candidates.join("  "));
                }
                continue;
            }

            self.run_single(line);
        }

        info!("Shell session ended");
        Ok(())
    }

    fn dispatch_alias(&mut self, handler: &AliasHandler, args: &[String]) {
        let max = self.config.general.max_alias_depth;
        if self.depth >= max {
            warn!(alias = %handler.name(), max, "Alias nesting limit reached");
            self.console.print_error(&format!(
                "Alias '{}' nests deeper than {} levels, not expanding",
                handler.name(),
                max
            ));
            return;
        }

        self.depth += 1;
        handler.invoke(args, self);
        self.depth -= 1;
    }

    fn complete_alias(
        &mut self,
        handler: &AliasHandler,
        partial: &str,
        words: &[String],
    ) -> Vec<String> {
        if self.depth >= self.config.general.max_alias_depth {
            return Vec::new();
        }

        self.depth += 1;
        let candidates = handler.complete(partial, words, self);
        self.depth -= 1;
        candidates
    }

    fn run_builtin(&mut self, builtin: Builtin) {
        match builtin {
            Builtin::Help => self.print_help(),
            Builtin::Exit => {
                debug!("Exit requested");
                self.running = false;
            }
            Builtin::Version => {
                let version = format!("{} {}", crate::APP_NAME, crate::VERSION);
                self.console.print_line(&version);
            }
        }
    }

    fn print_help(&mut self) {
        let dispatchers: [&dyn CommandDispatcher; 2] = [&self.core, &self.aliases];
        let mut rendered = String::new();
        for dispatcher in dispatchers {
            let Some(commands) = dispatcher.commands() else {
                continue;
            };
            let mut table = Table::new(["Command", "Description"])
                .header(format!("{} Commands", dispatcher.name()))
                .prefix("\n")
                .postfix("\n");
            for command in commands {
                table.add_row([command.name, command.description]);
            }
            rendered.push_str(&table.to_string());
        }
        self.console.print_raw(&rendered);
    }

    fn run_external(&mut self, head: &str, line: &str) {
        if !self.resolves(head) {
            self.console.print_error(&format!("Unknown command: {head}."));
            return;
        }

        self.console.print_status(&format!("exec: {line}"));
        match self.runner.run(line) {
            Ok(Some(0)) => {}
            Ok(code) => debug!(?code, command = %line, "Command exited unsuccessfully"),
            Err(err) => {
                warn!(command = %line, error = %err, "Command failed to start");
                self.console.print_error(&format!("Failed to execute '{line}': {err}"));
            }
        }
    }

    fn resolves(&self, head: &str) -> bool {
        std::iter::once(head.to_string())
            .chain(self.config.alias.executable_suffixes.iter().map(|s| format!("{head}{s}")))
            .any(|candidate| self.lookup.exists(&candidate))
    }
}

impl<C: Console> HostExecutor for Shell<C> {
    fn run_single(&mut self, line: &str) {
        Self::run_single(self, line);
    }
}

impl<C: Console> CompletionResolver for Shell<C> {
    fn tab_complete(&mut self, line: &str) -> Vec<String> {
        Self::tab_complete(self, line)
    }
}
