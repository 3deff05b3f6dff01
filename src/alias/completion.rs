//! Completion candidates for the `alias` command.

use super::dispatcher::AliasOptions;
use super::registry::AliasRegistry;

/// Every command name the host exposes plus every registered alias name.
///
/// The pool is neither sorted nor de-duplicated.
pub fn aliases_and_commands(host_commands: &[String], registry: &AliasRegistry) -> Vec<String> {
    host_commands.iter().cloned().chain(registry.names().map(str::to_string)).collect()
}

/// Candidates for the word being completed after `alias`.
///
/// `words` holds the words typed before the partial one, starting with the
/// command name. The option flags are only offered for the first argument.
pub fn complete_alias_command(
    _partial: &str,
    words: &[String],
    options: &AliasOptions,
    host_commands: &[String],
    registry: &AliasRegistry,
) -> Vec<String> {
    let pool = aliases_and_commands(host_commands, registry);
    if words.len() <= 1 {
        options.flags().into_iter().chain(pool).collect()
    } else {
        pool
    }
}
