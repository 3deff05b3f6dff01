//! Alias validation.
//!
//! Decides whether a proposed `(name, value)` pair may become an alias. The
//! value denylist is a small deterrent against obviously destructive aliases,
//! not a sandbox: anything it does not match is allowed through as long as
//! the command it names exists.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::registry::{AliasEntry, AliasRegistry};
use super::{ALIAS_COMMAND, WILDCARD};
use crate::host::{DispatcherStack, ExecutableLookup};

/// Revision of the built-in value denylist. Bump when [`DENYLIST`] changes.
pub const DENYLIST_VERSION: u32 = 1;

/// Built-in patterns a trimmed alias value must not match.
static DENYLIST: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // rm -rf / and its flag spellings, any root-anchored target
        r"^rm +(-rf|-r +-f|-f +-r) +/+.*$",
    ]
    .into_iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Result type for alias operations.
pub type AliasResult<T> = Result<T, AliasError>;

/// Reasons an alias cannot be created.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The name is empty after trimming.
    #[error("alias name is empty")]
    EmptyName,

    /// The name is the alias command itself.
    #[error("'{0}' is reserved for the alias command")]
    ReservedName(String),

    /// The name contains the clear-all wildcard.
    #[error("'{0}' contains the wildcard character")]
    WildcardName(String),

    /// The value is empty after trimming.
    #[error("alias value is empty")]
    EmptyValue,

    /// The value matches a denylisted pattern.
    #[error("'{value}' matches blocked pattern {pattern}")]
    BannedValue { value: String, pattern: String },

    /// The first word of the value is not a known command, alias or executable.
    #[error("'{head}' is not a console command, alias or executable")]
    UnknownCommand { head: String },

    /// The name already exists and no force flag was given.
    #[error("{name} already exists as system command or current alias, use -f to force")]
    Conflict { name: String },

    /// A configured blocked pattern is not a valid regular expression.
    #[error("invalid blocked pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl AliasError {
    /// Check whether this error comes from the name/value policy checks.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::ReservedName(_)
                | Self::WildcardName(_)
                | Self::EmptyValue
                | Self::BannedValue { .. }
                | Self::UnknownCommand { .. }
        )
    }
}

/// What the validator needs to know about the world at validation time.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The host's active dispatchers
    pub dispatchers: DispatcherStack<'a>,

    /// Currently registered aliases
    pub registry: &'a AliasRegistry,

    /// Executable lookup on the search path
    pub lookup: &'a dyn ExecutableLookup,
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("dispatchers", &self.dispatchers)
            .field("aliases", &self.registry.len())
            .finish()
    }
}

/// Validator for proposed aliases.
#[derive(Debug, Clone)]
pub struct AliasValidator {
    /// Value patterns: the built-in denylist, the host program and configured extras
    banned_values: Vec<Regex>,

    /// Suffixes also tried when looking up executables
    executable_suffixes: Vec<String>,
}

impl Default for AliasValidator {
    fn default() -> Self {
        Self::new(crate::APP_NAME)
    }
}

impl AliasValidator {
    /// Create a validator that also bans invoking `host_program` itself.
    pub fn new(host_program: &str) -> Self {
        let mut banned_values: Vec<Regex> = DENYLIST.iter().cloned().collect();
        let host_program = host_program.trim();
        if !host_program.is_empty() {
            if let Ok(regex) = Regex::new(&format!("^{}$", regex::escape(host_program))) {
                banned_values.push(regex);
            }
        }

        Self { banned_values, executable_suffixes: vec![".exe".to_string()] }
    }

    /// Add a blocked value pattern.
    pub fn with_blocked_pattern(mut self, pattern: &str) -> AliasResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| AliasError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.banned_values.push(regex);
        Ok(self)
    }

    /// Replace the suffixes tried during executable lookup.
    #[must_use]
    pub fn with_executable_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.executable_suffixes = suffixes;
        self
    }

    /// Check whether `(name, value)` may become an alias.
    pub fn is_valid_alias(&self, name: &str, value: &str, ctx: &ValidationContext<'_>) -> bool {
        match self.check(name, value, ctx) {
            Ok(_) => true,
            Err(err) => {
                debug!(name = %name, value = %value, reason = %err, "Rejected alias");
                false
            }
        }
    }

    /// Validate `(name, value)` and return the trimmed entry on success.
    ///
    /// Name conflicts with existing commands or aliases are not checked here;
    /// that depends on whether the caller was asked to force the assignment.
    pub fn check(
        &self,
        name: &str,
        value: &str,
        ctx: &ValidationContext<'_>,
    ) -> AliasResult<AliasEntry> {
        let value = self.check_value(value, ctx)?;
        let name = Self::check_name(name)?;
        Ok(AliasEntry::new(name, value))
    }

    /// Validate the value on its own, returning it trimmed.
    pub fn check_value<'v>(
        &self,
        value: &'v str,
        ctx: &ValidationContext<'_>,
    ) -> AliasResult<&'v str> {
        let value = value.trim();

        if let Some(regex) = self.banned_values.iter().find(|r| r.is_match(value)) {
            return Err(AliasError::BannedValue {
                value: value.to_string(),
                pattern: regex.as_str().to_string(),
            });
        }

        let head = value.split_whitespace().next().ok_or(AliasError::EmptyValue)?;
        if self.is_known_command(head, ctx) {
            Ok(value)
        } else {
            Err(AliasError::UnknownCommand { head: head.to_string() })
        }
    }

    /// Validate the name on its own, returning it trimmed.
    pub fn check_name(name: &str) -> AliasResult<&str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AliasError::EmptyName);
        }
        if name == ALIAS_COMMAND {
            return Err(AliasError::ReservedName(name.to_string()));
        }
        if name.contains(WILDCARD) {
            return Err(AliasError::WildcardName(name.to_string()));
        }
        Ok(name)
    }

    /// Console command, then alias, then executable on the search path.
    fn is_known_command(&self, head: &str, ctx: &ValidationContext<'_>) -> bool {
        ctx.dispatchers.exposes(head)
            || ctx.registry.contains(head)
            || std::iter::once(head.to_string())
                .chain(self.executable_suffixes.iter().map(|suffix| format!("{head}{suffix}")))
                .any(|candidate| ctx.lookup.exists(&candidate))
    }
}
