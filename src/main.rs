//! aliash - interactive command shell with aliases.
//!
//! Reads command lines from standard input and dispatches them, expanding
//! user-defined aliases along the way.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell as CompletionShell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aliash::{Config, Shell, TerminalConsole};

/// Interactive command shell with a validated alias engine
#[derive(Parser)]
#[command(name = "aliash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default locations
    #[arg(long, global = true, env = "ALIASH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Run,

    /// Run command lines in one session, in order
    Exec {
        /// Command lines to run
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: CompletionShell,
    },

    /// Show configuration
    Config {
        /// Show config directory path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    // Handle commands
    match cli.command {
        None | Some(Commands::Run) => {
            cmd_run(cli.config)?;
        }
        Some(Commands::Exec { lines }) => {
            cmd_exec(cli.config, &lines)?;
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
        }
        Some(Commands::Config { path }) => {
            cmd_config(cli.config, path)?;
        }
    }

    Ok(())
}

/// Build a shell from the effective configuration.
fn build_shell(config_path: Option<PathBuf>) -> Result<Shell<TerminalConsole>> {
    let config = Config::load_with(config_path.as_deref())?;
    let shell = Shell::new(config, TerminalConsole::new())?;
    Ok(shell)
}

/// Run the interactive shell.
fn cmd_run(config_path: Option<PathBuf>) -> Result<()> {
    let mut shell = build_shell(config_path)?;
    let interactive = io::stdin().is_terminal();

    ctrlc::set_handler(|| {
        eprintln!("\nInterrupt: use the 'exit' command to quit");
    })?;

    shell.run_loop(io::stdin().lock(), interactive)?;
    Ok(())
}

/// Run a fixed list of command lines.
fn cmd_exec(config_path: Option<PathBuf>, lines: &[String]) -> Result<()> {
    let mut shell = build_shell(config_path)?;

    for line in lines {
        if !shell.is_running() {
            break;
        }
        shell.run_single(line);
    }

    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "aliash", &mut io::stdout());
}

/// Show configuration.
fn cmd_config(config_path: Option<PathBuf>, show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load_with(config_path.as_deref())?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}
