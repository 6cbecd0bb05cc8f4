//! CLI module for blockc
//!
//! ## Commands
//!
//! - `emit <file>` - Compile a tree document and print the sketch
//! - `build <file>` - Compile and write the sketch to disk
//! - `fmt <file>` - Rewrite a tree document in canonical form
//! - `project <file>` - Print the project-store payload as JSON
//! - `flash-request <file>` - Print the build-service payload as JSON
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::backend::GeneratorConfig;
use crate::project::DEFAULT_PROJECT_NAME;
use crate::version::BLOCKC_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compile block-editor programs into Arduino sketches
#[derive(Parser, Debug)]
#[command(name = "blockc")]
#[command(version = BLOCKC_VERSION)]
#[command(about = "Compile block-editor programs into Arduino sketches", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Parse only and print the block tree (debug)
    #[arg(long = "parse", value_name = "FILE")]
    pub parse_file: Option<PathBuf>,

    /// Spaces per indentation level in generated code
    #[arg(long, global = true, value_name = "N", default_value_t = 2)]
    pub indent: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a tree document and print the sketch
    Emit {
        /// Tree document to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Compile a tree document and write the sketch
    Build {
        /// Tree document to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output path (default: FILE with an `.ino` extension)
        #[arg(short = 'o', long = "output", value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Rewrite a tree document in canonical form
    Fmt {
        /// Tree document to format
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Check formatting without modifying the file
        #[arg(long)]
        check: bool,
    },

    /// Print the project-store payload for a tree document
    Project {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Project identifier
        #[arg(long = "id", value_name = "ID")]
        id: String,
        /// Display name (default: the file stem)
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// Print the build-service payload for a tree document
    FlashRequest {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Target board identifier
        #[arg(long, value_name = "ID")]
        board: Option<String>,
        /// Name for the generated sketch
        #[arg(long, value_name = "NAME", default_value = DEFAULT_PROJECT_NAME)]
        project_name: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = GeneratorConfig::new().with_indent_width(cli.indent);

    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }

    match cli.command {
        Some(Command::Emit { file }) => commands::emit(&file, &config),
        Some(Command::Build { file, output }) => commands::build(&file, output.as_deref(), &config),
        Some(Command::Fmt { file, check }) => commands::format_document(&file, check),
        Some(Command::Project {
            file,
            id,
            name,
            description,
        }) => commands::project(&file, &id, name.as_deref(), description.as_deref(), &config),
        Some(Command::FlashRequest {
            file,
            board,
            project_name,
        }) => commands::flash_request(&file, board.as_deref(), &project_name, &config),
        None => Err(CliError::failure("no command given; run `blockc --help` for usage")),
    }
}

// ============================================================================
// Tests
// ============================================================================
