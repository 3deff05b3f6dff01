//! # aliash
//!
//! An interactive command shell with a validated alias engine.
//!
//! Users bind short names to longer command lines with the `alias` command,
//! and the shell dispatches the name as if the full command had been typed,
//! with any extra arguments appended.
//!
//! ## Features
//!
//! - **Validation**: aliases must name a console command, another alias or an
//!   executable on the search path, and may not match the destructive-command
//!   denylist
//! - **Conflict protection**: shadowing an executable or an existing alias
//!   requires `-f`
//! - **Completion**: alias names complete like commands, and alias arguments
//!   complete like the arguments of the aliased command
//!
//! ## Quick Start
//!
//! ```text
//! aliash > alias ll ls -la
//! aliash > ll /tmp
//! [*] exec: ls -la /tmp
//! aliash > alias -c ll
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::use_self)]

pub mod alias;
pub mod core;
pub mod host;
pub mod shell;
pub mod ui;

// Re-export commonly used types
pub use alias::{AliasDispatcher, AliasError, AliasRegistry, AliasValidator};
pub use core::Config;
pub use host::{Console, MemoryConsole, TerminalConsole};
pub use shell::Shell;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "aliash";
