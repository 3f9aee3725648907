//! Field Schema Agent CLI
//!
//! # Usage
//!
//! ```bash
//! field-schema validate --schema will.json --template will.txt --strict
//! field-schema consolidate --schemas will.json trust.json --format json
//! field-schema collisions --global global.json --override service.json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Validation errors or override collisions
//! - 2: Validation passed with warnings
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

use clap::Parser;
use field_schema_agent::{run_cli, FieldSchemaCli};

fn main() {
    let cli = FieldSchemaCli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
