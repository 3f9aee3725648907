//! Field Schema Agent
//!
//! Command-line front end for the template field schema engine. It reads
//! extracted schemas and template text from disk, runs the engine, and
//! reports results as tables, JSON or YAML with meaningful exit codes.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Validate a schema against its template text
//! field-schema validate --schema will.json --template will.txt
//!
//! # Merge every template schema of a service
//! field-schema consolidate --schemas will.json trust.yaml --out service.json
//!
//! # Check a service-level override
//! field-schema collisions --global global.json --override service.json
//! ```

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{ExitCode, FieldSchemaCli, OutputFormat, SchemaCommands};
pub use config::AgentConfig;
pub use error::{AgentError, Result};

/// Agent version (from Cargo.toml)
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Agent identifier
pub const AGENT_ID: &str = "field-schema-agent";

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use field_schema_agent::{run_cli, FieldSchemaCli};
///
/// fn main() {
///     let cli = FieldSchemaCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: FieldSchemaCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
