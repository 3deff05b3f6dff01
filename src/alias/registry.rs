//! Alias registry and the per-alias dispatch handlers.
//!
//! Every registered alias owns exactly one [`AliasHandler`] in the registry's
//! handler table. Registration and removal update the entry list and the
//! handler table together, so the set of dispatchable alias names always
//! equals the set of registered names.

use std::collections::HashMap;

use tracing::debug;

use crate::host::{CompletionResolver, HostExecutor};

/// A single alias: the name typed by the user and the command it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Invocation name
    pub name: String,

    /// Command string the name expands to
    pub value: String,
}

impl AliasEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Invocation and completion handler installed for one alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasHandler {
    name: String,
    value: String,
}

impl AliasHandler {
    fn new(name: &str, value: &str) -> Self {
        Self { name: name.to_string(), value: value.to_string() }
    }

    /// The alias name this handler answers to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command string the alias expands to.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The command line an invocation with `args` turns into.
    pub fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.value, args.join(" "))
    }

    /// Run the aliased command with the call-time arguments appended.
    pub fn invoke(&self, args: &[String], executor: &mut dyn HostExecutor) {
        let line = self.command_line(args);
        debug!(alias = %self.name, line = %line, "Dispatching alias");
        executor.run_single(&line);
    }

    /// The line handed to the host completer for the given words.
    ///
    /// Every occurrence of the alias name is dropped from `words`; the partial
    /// word being completed goes last so the resolver completes it in the
    /// context of the aliased command.
    pub fn completion_line(&self, partial: &str, words: &[String]) -> String {
        let mut remaining = words.to_vec();
        remaining.retain(|w| *w != self.name);

        let mut parts = Vec::with_capacity(remaining.len() + 2);
        parts.push(self.value.as_str());
        parts.extend(remaining.iter().map(String::as_str));
        parts.push(partial);
        parts.join(" ")
    }

    /// Complete arguments of the alias as if they followed the aliased command.
    pub fn complete(
        &self,
        partial: &str,
        words: &[String],
        resolver: &mut dyn CompletionResolver,
    ) -> Vec<String> {
        resolver.tab_complete(&self.completion_line(partial, words))
    }
}

/// Name to value mapping with its installed handler table.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    /// Entries in insertion order
    entries: Vec<AliasEntry>,

    /// Handlers keyed by alias name
    handlers: HashMap<String, AliasHandler>,
}

impl AliasRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an alias and (re)install its handler.
    ///
    /// The caller is responsible for validating `name` and `value` first.
    pub fn register(&mut self, name: &str, value: &str) {
        let handler = AliasHandler::new(name, value);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            debug!(alias = %name, old = %entry.value, new = %value, "Overwriting alias");
            entry.value = value.to_string();
        } else {
            debug!(alias = %name, value = %value, "Registering alias");
            self.entries.push(AliasEntry::new(name, value));
        }
        self.handlers.insert(name.to_string(), handler);
    }

    /// Remove an alias and uninstall its handler.
    ///
    /// Returns the removed entry; removing an unknown name is a no-op.
    pub fn deregister(&mut self, name: &str) -> Option<AliasEntry> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        self.handlers.remove(name);
        debug!(alias = %name, "Deregistered alias");
        Some(self.entries.remove(pos))
    }

    /// Remove every alias, returning how many were removed.
    pub fn deregister_all(&mut self) -> usize {
        let names: Vec<String> = self.names().map(str::to_string).collect();
        names.iter().filter(|name| self.deregister(name).is_some()).count()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|e| (e.name.as_str(), e.value.as_str()))
    }

    /// Iterate over registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Value of the alias called `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value.as_str())
    }

    /// Check whether `name` is a registered alias.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// The installed handler for `name`.
    pub fn handler(&self, name: &str) -> Option<&AliasHandler> {
        self.handlers.get(name)
    }

    /// Names that currently have an installed handler, in no particular order.
    pub fn handler_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
