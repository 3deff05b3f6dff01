//! Core types and functionality for aliash.
//!
//! This module contains the configuration and the external command
//! execution used by the shell.

mod config;
mod executor;

pub use config::{AliasConfig, Config, GeneralConfig};
pub use executor::{CommandRunner, Executor};
