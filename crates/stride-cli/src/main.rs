//! Stride CLI - run the movement controller headless against an arena

mod commands;
mod host_input;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config, simulate};

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "First-person movement controller, run headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script in an arena and print the trajectory
    Simulate {
        /// Path to arena file
        arena: String,

        /// Controller config TOML (defaults apply when omitted)
        #[arg(long)]
        config: Option<String>,

        /// Key bindings TOML
        #[arg(long)]
        bindings: Option<String>,

        /// Input script TOML (stands still for one second when omitted)
        #[arg(long)]
        script: Option<String>,

        /// Fixed physics rate in Hz
        #[arg(long, default_value = "60")]
        hz: f64,

        /// Record one sample every N physics ticks
        #[arg(long, default_value = "6")]
        sample_every: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Print the default controller config as TOML
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check that an arena's player rig and a config load cleanly
    Check {
        /// Path to arena file
        arena: String,

        /// Controller config TOML
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    // info+ by default unless RUST_LOG overrides
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            arena,
            config,
            bindings,
            script,
            hz,
            sample_every,
            format,
        } => simulate::run(simulate::SimulateArgs {
            arena,
            config,
            bindings,
            script,
            hz,
            sample_every,
            format,
        }),
        Commands::Config { output } => config::run(output.as_deref()),
        Commands::Check { arena, config } => check::run(&arena, config.as_deref()),
    }
}
