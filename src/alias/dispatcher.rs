//! The `alias` command.
//!
//! Usage: `alias [options] [name [value]]`
//!
//! | Arguments | Effect |
//! |---|---|
//! | none | list every alias |
//! | `-h` / `--help` | print the usage banner |
//! | `<name>` | show one alias |
//! | `-c <name>` / `-c *` | clear one alias / all aliases |
//! | `-f <name> <value...>` | assign, overriding name conflicts |
//! | `<name> <value...>` | assign if the name is free |

use clap::{Arg, ArgAction};
use tracing::{debug, info};

use super::completion;
use super::registry::{AliasEntry, AliasHandler, AliasRegistry};
use super::validation::{AliasError, AliasResult, AliasValidator, ValidationContext};
use super::{ALIAS_COMMAND, WILDCARD};
use crate::core::AliasConfig;
use crate::host::{CommandDispatcher, CommandInfo, Console, DispatcherStack, ExecutableLookup};
use crate::ui::Table;

const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
const FORCE_FLAG: &str = "-f";
const CLEAR_FLAG: &str = "-c";

/// Option definitions of the `alias` command, used for help and completion.
#[derive(Debug, Clone)]
pub struct AliasOptions {
    command: clap::Command,
}

impl AliasOptions {
    /// Build the option table.
    pub fn new() -> Self {
        let command = clap::Command::new(ALIAS_COMMAND)
            .override_usage("alias [options] [name [value]]")
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new("help")
                    .short('h')
                    .long("help")
                    .action(ArgAction::Help)
                    .help("Help banner."),
            )
            .arg(
                Arg::new("clear")
                    .short('c')
                    .value_name("NAME")
                    .help("Clear an alias (* to clear all)."),
            )
            .arg(
                Arg::new("force")
                    .short('f')
                    .action(ArgAction::SetTrue)
                    .help("Force an alias assignment."),
            );

        Self { command }
    }

    /// Short flags accepted by the command, e.g. `-h`.
    pub fn flags(&self) -> Vec<String> {
        self.command.get_arguments().filter_map(Arg::get_short).map(|c| format!("-{c}")).collect()
    }

    /// The rendered usage banner and option summary.
    pub fn usage(&self) -> String {
        self.command.clone().render_help().to_string()
    }
}

impl Default for AliasOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Target of a clear request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearTarget {
    /// Every registered alias
    All,
    /// A single alias by name
    Name(String),
}

/// Classified arguments of one `alias` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasInvocation {
    /// List every alias
    List,
    /// Print the usage banner
    Help,
    /// Show one alias
    Show(String),
    /// Remove one or all aliases
    Clear(ClearTarget),
    /// Create or overwrite an alias
    Assign { name: String, value: String, force: bool },
}

impl AliasInvocation {
    /// Classify the raw argument list.
    ///
    /// `-f` and `-c` are only recognized as the first argument, since either
    /// may legitimately appear inside an alias value.
    pub fn parse(args: &[String]) -> Self {
        match args {
            [] => Self::List,
            [only] if HELP_FLAGS.contains(&only.as_str()) => Self::Help,
            [only] => Self::Show(only.clone()),
            [flag, name, ..] if flag == CLEAR_FLAG => {
                if name == &WILDCARD.to_string() {
                    Self::Clear(ClearTarget::All)
                } else {
                    Self::Clear(ClearTarget::Name(name.clone()))
                }
            }
            [flag, name, rest @ ..] if flag == FORCE_FLAG => {
                Self::Assign { name: name.clone(), value: rest.join(" "), force: true }
            }
            [name, rest @ ..] => {
                Self::Assign { name: name.clone(), value: rest.join(" "), force: false }
            }
        }
    }
}

/// What an `alias` call did.
#[derive(Debug)]
pub enum AliasOutcome {
    /// Aliases were listed; holds how many
    Listed(usize),
    /// The usage banner was printed
    Help,
    /// One alias was looked up
    Shown { name: String, value: Option<String> },
    /// Aliases were cleared; holds the names actually removed
    Cleared(Vec<String>),
    /// An alias was created or overwritten
    Registered(AliasEntry),
    /// The assignment was refused
    Rejected(AliasError),
}

/// Exposes `alias` plus one command per registered alias.
struct AliasCommands<'a>(&'a AliasRegistry);

impl CommandDispatcher for AliasCommands<'_> {
    fn name(&self) -> &str {
        "Alias"
    }

    fn commands(&self) -> Option<Vec<CommandInfo>> {
        let mut commands = vec![CommandInfo::new(ALIAS_COMMAND, "create or view an alias.")];
        commands.extend(self.0.list().map(|(name, value)| CommandInfo::new(name, value)));
        Some(commands)
    }
}

/// The dispatcher implementing the `alias` command and owning the registry.
#[derive(Debug, Clone, Default)]
pub struct AliasDispatcher {
    registry: AliasRegistry,
    validator: AliasValidator,
    options: AliasOptions,
}

impl AliasDispatcher {
    /// Create a dispatcher with an empty registry.
    pub fn new(validator: AliasValidator) -> Self {
        Self { registry: AliasRegistry::new(), validator, options: AliasOptions::new() }
    }

    /// Create a dispatcher whose validator follows the `[alias]` config section.
    pub fn from_config(config: &AliasConfig) -> AliasResult<Self> {
        let mut validator = AliasValidator::new(&config.host_program)
            .with_executable_suffixes(config.executable_suffixes.clone());
        for pattern in &config.blocked_patterns {
            validator = validator.with_blocked_pattern(pattern)?;
        }
        Ok(Self::new(validator))
    }

    /// The alias registry.
    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    /// The option table of the `alias` command.
    pub fn options(&self) -> &AliasOptions {
        &self.options
    }

    /// The installed handler for alias `name`.
    pub fn handler(&self, name: &str) -> Option<&AliasHandler> {
        self.registry.handler(name)
    }

    /// Run the `alias` command.
    ///
    /// `dispatchers` are the host's other dispatchers; this dispatcher's own
    /// commands are added for validation. Never fails: every refusal is
    /// reported on `console` and returned as [`AliasOutcome::Rejected`].
    pub fn cmd_alias(
        &mut self,
        args: &[String],
        dispatchers: DispatcherStack<'_>,
        lookup: &dyn ExecutableLookup,
        console: &mut dyn Console,
    ) -> AliasOutcome {
        match AliasInvocation::parse(args) {
            AliasInvocation::List => self.list(console),
            AliasInvocation::Help => {
                console.print_raw(&self.options.usage());
                AliasOutcome::Help
            }
            AliasInvocation::Show(name) => self.show(name, console),
            AliasInvocation::Clear(target) => {
                let name = match &target {
                    ClearTarget::All => WILDCARD.to_string(),
                    ClearTarget::Name(name) => name.clone(),
                };
                console.print_good(&format!("The alias name is {name}"));
                self.clear(target, console)
            }
            AliasInvocation::Assign { name, value, force } => {
                console.print_good(&format!("The alias name is {name}"));
                self.assign(&name, &value, force, dispatchers, lookup, console)
            }
        }
    }

    /// Completion candidates for the `alias` command's arguments.
    pub fn cmd_alias_tabs(
        &self,
        partial: &str,
        words: &[String],
        host_commands: &[String],
    ) -> Vec<String> {
        completion::complete_alias_command(
            partial,
            words,
            &self.options,
            host_commands,
            &self.registry,
        )
    }

    fn list(&self, console: &mut dyn Console) -> AliasOutcome {
        if self.registry.is_empty() {
            console.print_status("No aliases currently defined");
            return AliasOutcome::Listed(0);
        }

        let mut table = Table::new(["Alias Name", "Alias Value"])
            .header("Current Aliases")
            .prefix("\n")
            .postfix("\n");
        for (name, value) in self.registry.list() {
            table.add_row([name, value]);
        }
        console.print_raw(&table.to_string());
        AliasOutcome::Listed(self.registry.len())
    }

    fn show(&self, name: String, console: &mut dyn Console) -> AliasOutcome {
        let value = self.registry.lookup(&name).map(str::to_string);
        match &value {
            Some(value) => console.print_status(&format!("'{name}' is aliased to '{value}'")),
            None => console.print_status(&format!("'{name}' is not currently aliased")),
        }
        AliasOutcome::Shown { name, value }
    }

    fn clear(&mut self, target: ClearTarget, console: &mut dyn Console) -> AliasOutcome {
        match target {
            ClearTarget::All => {
                let names: Vec<String> = self.registry.names().map(str::to_string).collect();
                self.registry.deregister_all();
                info!(count = names.len(), "Cleared all aliases");
                console.print_status("Cleared all aliases");
                AliasOutcome::Cleared(names)
            }
            ClearTarget::Name(name) => {
                console.print_status(&format!("Checking alias {name} for clear"));
                let removed = self.registry.deregister(&name).map(|e| e.name);
                // Reported as cleared whether or not the alias existed.
                console.print_status(&format!("Cleared alias {name}"));
                AliasOutcome::Cleared(removed.into_iter().collect())
            }
        }
    }

    fn assign(
        &mut self,
        name: &str,
        value: &str,
        force: bool,
        dispatchers: DispatcherStack<'_>,
        lookup: &dyn ExecutableLookup,
        console: &mut dyn Console,
    ) -> AliasOutcome {
        debug!(name = %name, value = %value, force, "Assigning alias");

        let decision = {
            let own = AliasCommands(&self.registry);
            let mut stack: Vec<&dyn CommandDispatcher> = dispatchers.iter().collect();
            stack.push(&own);
            let ctx = ValidationContext {
                dispatchers: DispatcherStack::new(&stack),
                registry: &self.registry,
                lookup,
            };

            self.validator.check(name, value, &ctx).and_then(|entry| {
                let taken = lookup.exists(&entry.name) || self.registry.contains(&entry.name);
                if force || !taken {
                    Ok(entry)
                } else {
                    Err(AliasError::Conflict { name: entry.name })
                }
            })
        };

        match decision {
            Ok(entry) => {
                self.registry.register(&entry.name, &entry.value);
                info!(alias = %entry.name, value = %entry.value, "Alias registered");
                AliasOutcome::Registered(entry)
            }
            Err(err) => {
                debug!(reason = %err, "Alias assignment refused");
                if err.is_rejection() {
                    console.print_error(&format!(
                        "'{}' is not a permitted name or '{}' is not a valid/permitted console \
                         or system command",
                        name.trim(),
                        value.trim()
                    ));
                } else {
                    console.print_error(&err.to_string());
                }
                AliasOutcome::Rejected(err)
            }
        }
    }
}

impl CommandDispatcher for AliasDispatcher {
    fn name(&self) -> &str {
        "Alias"
    }

    fn commands(&self) -> Option<Vec<CommandInfo>> {
        AliasCommands(&self.registry).commands()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::host::{MemoryConsole, MessageKind};

    struct Programs(&'static [&'static str]);

    impl ExecutableLookup for Programs {
        fn find_full_path(&self, program: &str) -> Option<PathBuf> {
            self.0.iter().any(|p| *p == program).then(|| PathBuf::from("/bin").join(program))
        }
    }

    const PROGRAMS: Programs = Programs(&["ls", "git", "pwd"]);

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn run(
        dispatcher: &mut AliasDispatcher,
        console: &mut MemoryConsole,
        items: &[&str],
    ) -> AliasOutcome {
        dispatcher.cmd_alias(&args(items), DispatcherStack::new(&[]), &PROGRAMS, console)
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(AliasInvocation::parse(&[]), AliasInvocation::List);
        assert_eq!(AliasInvocation::parse(&args(&["-h"])), AliasInvocation::Help);
        assert_eq!(AliasInvocation::parse(&args(&["--help"])), AliasInvocation::Help);
        assert_eq!(AliasInvocation::parse(&args(&["ll"])), AliasInvocation::Show("ll".into()));
        assert_eq!(AliasInvocation::parse(&args(&["-c"])), AliasInvocation::Show("-c".into()));
        assert_eq!(
            AliasInvocation::parse(&args(&["-c", "*"])),
            AliasInvocation::Clear(ClearTarget::All)
        );
        assert_eq!(
            AliasInvocation::parse(&args(&["-c", "ll", "extra"])),
            AliasInvocation::Clear(ClearTarget::Name("ll".into()))
        );
        assert_eq!(
            AliasInvocation::parse(&args(&["-f", "ls", "ls", "-la"])),
            AliasInvocation::Assign { name: "ls".into(), value: "ls -la".into(), force: true }
        );
        assert_eq!(
            AliasInvocation::parse(&args(&["ll", "ls", "-f", "-c"])),
            AliasInvocation::Assign { name: "ll".into(), value: "ls -f -c".into(), force: false }
        );
    }

    #[test]
    fn test_force_without_value_is_empty_assignment() {
        assert_eq!(
            AliasInvocation::parse(&args(&["-f", "ll"])),
            AliasInvocation::Assign { name: "ll".into(), value: String::new(), force: true }
        );
    }

    #[test]
    fn test_options_flags_and_usage() {
        let options = AliasOptions::new();
        assert_eq!(options.flags(), vec!["-h", "-c", "-f"]);

        let usage = options.usage();
        assert!(usage.contains("Usage: alias [options] [name [value]]"));
        assert!(usage.contains("Clear an alias (* to clear all)."));
        assert!(usage.contains("Force an alias assignment."));
    }

    #[test]
    fn test_list_empty() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &[]);
        assert!(matches!(outcome, AliasOutcome::Listed(0)));
        assert_eq!(console.texts(MessageKind::Status), vec!["No aliases currently defined"]);
        assert!(console.texts(MessageKind::Raw).is_empty());
    }

    #[test]
    fn test_assign_show_and_list() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &["ll", "ls", "-la"]);
        assert!(matches!(outcome, AliasOutcome::Registered(ref e) if e.value == "ls -la"));

        run(&mut dispatcher, &mut console, &["ll"]);
        assert!(console.contains("'ll' is aliased to 'ls -la'"));

        run(&mut dispatcher, &mut console, &["nope"]);
        assert!(console.contains("'nope' is not currently aliased"));

        console.clear();
        let outcome = run(&mut dispatcher, &mut console, &[]);
        assert!(matches!(outcome, AliasOutcome::Listed(1)));
        let raw = console.texts(MessageKind::Raw);
        assert_eq!(raw.len(), 1);
        assert!(raw[0].starts_with("\nCurrent Aliases\n"));
        assert!(raw[0].contains("ll          ls -la"));
        assert!(raw[0].ends_with("\n\n"));
    }

    #[test]
    fn test_help_does_not_mutate() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        assert!(matches!(run(&mut dispatcher, &mut console, &["--help"]), AliasOutcome::Help));
        assert!(console.output().contains("Usage: alias"));
        assert!(dispatcher.registry().is_empty());
    }

    #[test]
    fn test_conflict_requires_force() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        // "ls" is an executable on the search path.
        let outcome = run(&mut dispatcher, &mut console, &["ls", "ls", "-la"]);
        assert!(matches!(outcome, AliasOutcome::Rejected(AliasError::Conflict { .. })));
        assert!(console.contains("ls already exists as system command or current alias, use -f"));
        assert!(dispatcher.registry().is_empty());

        let outcome = run(&mut dispatcher, &mut console, &["-f", "ls", "ls", "-la"]);
        assert!(matches!(outcome, AliasOutcome::Registered(_)));
        assert_eq!(dispatcher.registry().lookup("ls"), Some("ls -la"));
    }

    #[test]
    fn test_existing_alias_needs_force_to_overwrite() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        run(&mut dispatcher, &mut console, &["ll", "ls", "-la"]);
        let outcome = run(&mut dispatcher, &mut console, &["ll", "ls", "-lh"]);
        assert!(matches!(outcome, AliasOutcome::Rejected(AliasError::Conflict { .. })));
        assert_eq!(dispatcher.registry().lookup("ll"), Some("ls -la"));

        run(&mut dispatcher, &mut console, &["-f", "ll", "ls", "-lh"]);
        assert_eq!(dispatcher.registry().lookup("ll"), Some("ls -lh"));
        assert_eq!(dispatcher.registry().len(), 1);
    }

    #[test]
    fn test_rejection_message() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &["alias", "ls"]);
        assert!(matches!(outcome, AliasOutcome::Rejected(AliasError::ReservedName(_))));
        assert_eq!(
            console.texts(MessageKind::Error),
            vec!["'alias' is not a permitted name or 'ls' is not a valid/permitted console or \
                  system command"]
        );
    }

    #[test]
    fn test_value_may_name_the_alias_command() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &["al", "alias", "-c", "*"]);
        assert!(matches!(outcome, AliasOutcome::Registered(_)));
    }

    #[test]
    fn test_clear_one_and_all() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();
        run(&mut dispatcher, &mut console, &["ll", "ls", "-la"]);
        run(&mut dispatcher, &mut console, &["gs", "git", "status"]);

        let outcome = run(&mut dispatcher, &mut console, &["-c", "ll"]);
        assert!(matches!(outcome, AliasOutcome::Cleared(ref names) if names == &["ll"]));
        assert!(console.contains("Checking alias ll for clear"));
        assert!(console.contains("Cleared alias ll"));
        assert!(dispatcher.handler("ll").is_none());

        let outcome = run(&mut dispatcher, &mut console, &["-c", "*"]);
        assert!(matches!(outcome, AliasOutcome::Cleared(ref names) if names == &["gs"]));
        assert!(dispatcher.registry().is_empty());
    }

    #[test]
    fn test_clear_absent_name_still_reports_cleared() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &["-c", "ghost"]);
        assert!(matches!(outcome, AliasOutcome::Cleared(ref names) if names.is_empty()));
        assert_eq!(
            console.texts(MessageKind::Status),
            vec!["Checking alias ghost for clear", "Cleared alias ghost"]
        );
        assert!(console.texts(MessageKind::Error).is_empty());
    }

    #[test]
    fn test_name_announced_for_assign_and_clear() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();

        run(&mut dispatcher, &mut console, &["ll", "ls", "-la"]);
        run(&mut dispatcher, &mut console, &["-f", "ls", "ls", "-l"]);
        run(&mut dispatcher, &mut console, &["-c", "ll"]);
        run(&mut dispatcher, &mut console, &["-c", "*"]);
        run(&mut dispatcher, &mut console, &["ls"]);
        run(&mut dispatcher, &mut console, &[]);

        assert_eq!(
            console.texts(MessageKind::Good),
            vec![
                "The alias name is ll",
                "The alias name is ls",
                "The alias name is ll",
                "The alias name is *",
            ]
        );
        assert!(console.output().contains("[+] The alias name is ll\n"));
    }

    #[test]
    fn test_commands_include_aliases() {
        let mut dispatcher = AliasDispatcher::default();
        let mut console = MemoryConsole::new();
        run(&mut dispatcher, &mut console, &["ll", "ls", "-la"]);

        let commands = dispatcher.commands().unwrap();
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alias", "ll"]);
        assert_eq!(commands[1].description, "ls -la");
    }

    #[test]
    fn test_from_config_applies_blocked_patterns() {
        let config = AliasConfig {
            blocked_patterns: vec!["^git push".to_string()],
            ..AliasConfig::default()
        };
        let mut dispatcher = AliasDispatcher::from_config(&config).unwrap();
        let mut console = MemoryConsole::new();

        let outcome = run(&mut dispatcher, &mut console, &["gp", "git", "push"]);
        assert!(matches!(outcome, AliasOutcome::Rejected(AliasError::BannedValue { .. })));

        let bad = AliasConfig { blocked_patterns: vec!["[".to_string()], ..AliasConfig::default() };
        assert!(AliasDispatcher::from_config(&bad).is_err());
    }
}
