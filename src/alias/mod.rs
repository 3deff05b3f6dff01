//! Alias engine.
//!
//! Lets the user bind a short name to a longer command line and have the
//! shell dispatch the name as if the full command had been typed:
//!
//! - [`AliasRegistry`] owns the name to value mapping and the handler table
//!   the shell dispatches through.
//! - [`AliasValidator`] decides whether a proposed alias is permitted.
//! - [`AliasDispatcher`] implements the `alias` command itself.
//! - [`completion`] supplies candidates for the `alias` command's arguments.

pub mod completion;
mod dispatcher;
mod registry;
mod validation;

pub use dispatcher::{AliasDispatcher, AliasInvocation, AliasOptions, AliasOutcome, ClearTarget};
pub use registry::{AliasEntry, AliasHandler, AliasRegistry};
pub use validation::{
    AliasError, AliasResult, AliasValidator, ValidationContext, DENYLIST_VERSION,
};

/// The alias management command. Reserved: it can never be an alias name.
pub const ALIAS_COMMAND: &str = "alias";

/// Character that means "every alias" for the clear flag.
pub const WILDCARD: char = '*';
