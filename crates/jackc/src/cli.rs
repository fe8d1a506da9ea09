//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for jackc.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Struct containing the CLI configuration for jackc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of jackc.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level where non-fatal problems are also logged.
    #[value(alias("1"))]
    Warn,

    /// Also log which files are being compiled.
    #[value(alias("2"))]
    Info,

    /// Log the engine's internal control flow.
    #[value(alias("3"))]
    Debug,

    /// Log extra, very verbose detail.
    #[value(alias("4"))]
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile one `.jack` file, or every `.jack` file in a directory, to VM text.
    Compile(CompileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// A `.jack` file, or a directory to search for `.jack` files.
    #[arg(index = 1)]
    pub path: std::path::PathBuf,

    /// Directory to write `.vm` output into. Defaults to alongside each source file.
    #[arg(short, long)]
    pub out_dir: Option<std::path::PathBuf>,

    /// Dump the token stream for each file instead of compiling it.
    #[arg(long)]
    pub dump_tokens: bool,

    /// Dump the resolved class/subroutine symbol table for each file instead of compiling it.
    #[arg(long)]
    pub dump_symbols: bool,

    /// Render `--dump-tokens` output as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}
