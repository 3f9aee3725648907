//! CLI module for the field schema agent
//!
//! This module provides command-line functionality for validating template
//! field schemas, consolidating them into service schemas, and checking
//! override compatibility.

pub mod commands;
pub mod output;

pub use commands::{CommandContext, FieldSchemaCli, SchemaCommands};
pub use output::{OutputFormat, Render};

use crate::config::AgentConfig;
use crate::error::AgentError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, all checks passed
    Success = 0,
    /// Validation errors or override collisions
    ValidationError = 1,
    /// Validation passed with warnings
    ValidationWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(has_errors: bool, has_warnings: bool) -> Self {
        if has_errors {
            ExitCode::ValidationError
        } else if has_warnings {
            ExitCode::ValidationWarning
        } else {
            ExitCode::Success
        }
    }

    /// Exit code for a command that failed before producing a result
    pub fn from_error(err: &AgentError) -> Self {
        match err {
            AgentError::FileError(_) => ExitCode::FileError,
            e if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: FieldSchemaCli) -> Result<ExitCode, AgentError> {
    let config = AgentConfig::load(cli.config.as_deref())?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let ctx = CommandContext::new(config, cli.format, cli.quiet);

    match cli.command {
        SchemaCommands::Validate {
            schema,
            template,
            strict,
        } => commands::execute_validate(&ctx, &schema, template.as_deref(), strict),
        SchemaCommands::Consolidate { schemas, out } => {
            commands::execute_consolidate(&ctx, &schemas, out.as_deref())
        }
        SchemaCommands::Collisions {
            global,
            override_schema,
        } => commands::execute_collisions(&ctx, &global, &override_schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationError), 1);
        assert_eq!(i32::from(ExitCode::ValidationWarning), 2);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_validation_result() {
        assert_eq!(
            ExitCode::from_validation_result(false, false),
            ExitCode::Success
        );
        assert_eq!(
            ExitCode::from_validation_result(true, false),
            ExitCode::ValidationError
        );
        assert_eq!(
            ExitCode::from_validation_result(false, true),
            ExitCode::ValidationWarning
        );
        assert_eq!(
            ExitCode::from_validation_result(true, true),
            ExitCode::ValidationError
        );
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&AgentError::file_error("missing")),
            ExitCode::FileError
        );
        assert_eq!(
            ExitCode::from_error(&AgentError::parse_error("bad json")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&AgentError::InternalError("boom".into())),
            ExitCode::InternalError
        );
    }
}
