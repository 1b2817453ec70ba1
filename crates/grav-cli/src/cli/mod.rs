use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gravcheck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gravcheck",
    version,
    about = "Verify a Gravibase project's schema and user registration flow"
)]
pub struct Cli {
    /// Defaults to `verify`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./gravcheck.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file loaded in override mode (defaults to the nearest .env)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
            config: self.config.clone(),
            env_file: self.env_file.clone(),
        }
    }
}
