//! # aptgen-cli
//!
//! Command-line host for the aptgen generator. It loads a declaration graph,
//! runs a generation round, writes the implementation sources and keeps a
//! manifest of which declarations each output was derived from.
//!
//! ## Commands
//!
//! - `aptgen init` - Write a default aptgen.toml
//! - `aptgen generate <graph>` - Run a round and write outputs
//! - `aptgen status <graph>` - Show which outputs need regeneration
//! - `aptgen inspect <graph>` - Show templates, members and their sources
//!
//! See `aptgen --help` for the full command reference.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::process;

mod commands;
mod config;
mod manifest;
mod telemetry;
mod ui;

use config::Overrides;

#[derive(Parser)]
#[command(name = "aptgen")]
#[command(about = "aptgen - generate implementations for annotated templates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to aptgen.toml configuration file
    #[arg(short, long, global = true, default_value = "aptgen.toml")]
    config: String,

    /// Output as JSON (machine-readable format)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true, env = "APTGEN_JSON_LOGS")]
    json_logs: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an aptgen.toml with default settings
    Init,

    /// Run one generation round over a declaration graph
    Generate {
        /// Path to the declaration graph (JSON)
        graph: String,

        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<String>,

        /// Fail a template when a member names a missing declaration
        #[arg(long)]
        strict: bool,

        /// Escape quotes and control characters in generated string literals
        #[arg(long)]
        escape: bool,
    },

    /// Compare generated outputs with the current declarations
    Status {
        /// Path to the declaration graph (JSON)
        graph: String,

        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<String>,
    },

    /// List annotated templates and how their members resolve
    Inspect {
        /// Path to the declaration graph (JSON)
        graph: String,
    },

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate the configuration file
    Validate,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "aptgen", &mut io::stdout());
        return;
    }

    if let Err(e) = telemetry::init(telemetry::TelemetryConfig {
        verbose: cli.verbose,
        json_logs: cli.json_logs,
    }) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init => commands::config::init(&cli.config),
        Commands::Generate {
            graph,
            out,
            strict,
            escape,
        } => commands::generate::generate(
            &cli.config,
            &graph,
            Overrides {
                output: out,
                strict,
                escape,
            },
            cli.json,
        ),
        Commands::Status { graph, out } => commands::status::status(
            &cli.config,
            &graph,
            Overrides {
                output: out,
                ..Default::default()
            },
            cli.json,
        ),
        Commands::Inspect { graph } => commands::inspect::inspect(&cli.config, &graph, cli.json),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Validate => commands::config::validate(&cli.config),
        },
    }
}
