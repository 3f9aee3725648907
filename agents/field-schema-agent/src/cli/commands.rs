//! CLI command definitions for the field schema agent
//!
//! Provides Clap-based commands for validating a template's schema,
//! consolidating the schemas of a service's templates, and checking an
//! override schema against a global one.

use clap::{Parser, Subcommand};
use field_schema_core::{FieldReconciler, Schema, SchemaValidator, TemplateSchema};
use std::path::{Path, PathBuf};

use super::output::{
    inputs_hash, CollisionOutput, ConsolidationOutput, OutputFormat, Render, ValidationOutput,
};
use super::ExitCode;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};

/// Field Schema Agent CLI
///
/// Validate extracted template field schemas, merge them into a service
/// intake schema, and check service-level overrides.
#[derive(Parser, Debug)]
#[command(name = "field-schema")]
#[command(about = "Field Schema Agent - Validate and reconcile template field schemas", long_about = None)]
#[command(version)]
pub struct FieldSchemaCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "FIELD_SCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides configuration)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: SchemaCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// Validate a template's field schema
    ///
    /// When a template text file is given, placeholders in the text are
    /// cross-checked against the schema as well.
    Validate {
        /// Path to the schema file (JSON or YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the extracted template text
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Merge the schemas of several templates into one intake schema
    Consolidate {
        /// Paths to the template schema files
        #[arg(short, long, num_args = 1.., required = true)]
        schemas: Vec<PathBuf>,

        /// Write the merged schema (JSON) to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check an override schema against its global schema
    Collisions {
        /// Path to the global schema
        #[arg(short, long)]
        global: PathBuf,

        /// Path to the override schema
        #[arg(short = 'o', long = "override")]
        override_schema: PathBuf,
    },
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: AgentConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    pub fn new(config: AgentConfig, format: Option<OutputFormat>, quiet: bool) -> Self {
        let format = format.unwrap_or(config.output.format);
        Self {
            config,
            format,
            quiet,
        }
    }

    fn validator(&self) -> SchemaValidator {
        SchemaValidator::with_config(self.config.validator.clone())
    }

    fn emit(&self, output: &impl Render) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        output.render(self.format)
    }
}

/// Execute the validate command
pub fn execute_validate(
    ctx: &CommandContext,
    schema: &Path,
    template: Option<&Path>,
    strict: bool,
) -> Result<ExitCode> {
    let fields = load_schema_fields(schema)?;

    let validator = ctx.validator();
    let (report, content) = match template {
        Some(path) => {
            let content = read_file(path, "template")?;
            (validator.validate_with_content(&content, &fields), Some(content))
        }
        None => (validator.validate_schema(&fields), None),
    };

    tracing::info!(
        schema = %schema.display(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        status = %report.status(),
        "validated schema"
    );

    let output = ValidationOutput::from_report(
        &report,
        schema.display().to_string(),
        template.map(|p| p.display().to_string()),
        inputs_hash(&fields, content.as_deref())?,
    );
    ctx.emit(&output)?;

    let has_warnings = report.warning_count() > 0;
    let has_errors = !report.valid || (strict && has_warnings);
    Ok(ExitCode::from_validation_result(has_errors, has_warnings))
}

/// Execute the consolidate command
pub fn execute_consolidate(
    ctx: &CommandContext,
    schemas: &[PathBuf],
    out: Option<&Path>,
) -> Result<ExitCode> {
    if schemas.is_empty() {
        return Err(AgentError::invalid_input(
            "At least one schema file is required for consolidation",
        ));
    }

    let templates = schemas
        .iter()
        .map(|path| load_template_schema(path.as_path()))
        .collect::<Result<Vec<TemplateSchema>>>()?;

    let input_field_count: usize = templates
        .iter()
        .filter_map(|t| t.fields.as_ref())
        .map(Schema::len)
        .sum();

    let merged = FieldReconciler::new().consolidate(&templates);

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&merged)
            .map_err(|e| AgentError::SerializationError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| {
            AgentError::file_error(format!(
                "Failed to write schema file '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!(path = %path.display(), fields = merged.len(), "wrote consolidated schema");
    }

    let sources = schemas.iter().map(|p| p.display().to_string()).collect();
    ctx.emit(&ConsolidationOutput::new(sources, input_field_count, merged))?;

    Ok(ExitCode::Success)
}

/// Execute the collisions command
pub fn execute_collisions(
    ctx: &CommandContext,
    global: &Path,
    override_schema: &Path,
) -> Result<ExitCode> {
    let global_fields = load_schema_fields(global)?;
    let override_fields = load_schema_fields(override_schema)?;

    let collisions = ctx
        .validator()
        .detect_collisions(&global_fields, &override_fields);

    tracing::info!(collisions = collisions.len(), "checked override schema");

    let output = CollisionOutput::new(
        global.display().to_string(),
        override_schema.display().to_string(),
        collisions,
    );
    ctx.emit(&output)?;

    Ok(ExitCode::from_validation_result(!output.compatible, false))
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        AgentError::file_error(format!(
            "Failed to read {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

/// Load a schema file.
///
/// The document is either a bare array of fields or an object with
/// `template_id` and `fields`. The template id defaults to the file stem.
pub fn load_template_schema(path: &Path) -> Result<TemplateSchema> {
    let content = read_file(path, "schema")?;
    let value = parse_document(path, &content)?;

    let mut template = if value.is_array() {
        TemplateSchema {
            template_id: None,
            fields: Some(serde_json::from_value::<Schema>(value).map_err(decode_error)?),
        }
    } else {
        serde_json::from_value::<TemplateSchema>(value).map_err(decode_error)?
    };

    if template.template_id.is_none() {
        template.template_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }

    tracing::debug!(
        path = %path.display(),
        fields = template.fields.as_ref().map_or(0, Schema::len),
        "loaded schema file"
    );
    Ok(template)
}

/// Load a schema file that must carry a fields collection
fn load_schema_fields(path: &Path) -> Result<Schema> {
    load_template_schema(path)?.fields.ok_or_else(|| {
        AgentError::invalid_input(format!(
            "Schema file '{}' has no fields collection",
            path.display()
        ))
    })
}

fn decode_error(err: serde_json::Error) -> AgentError {
    AgentError::Engine(err.into())
}

/// Parse a schema document based on its extension
fn parse_document(path: &Path, content: &str) -> Result<serde_json::Value> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| AgentError::parse_error(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| AgentError::parse_error(format!("Invalid YAML: {}", e))),
        _ => Err(AgentError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml",
            extension
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use field_schema_core::SchemaError;

    #[test]
    fn test_cli_definition_is_consistent() {
        FieldSchemaCli::command().debug_assert();
    }

    #[test]
    fn test_parse_collisions_args() {
        let cli = FieldSchemaCli::try_parse_from([
            "field-schema",
            "--format",
            "json",
            "collisions",
            "--global",
            "g.json",
            "--override",
            "o.json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, SchemaCommands::Collisions { .. }));
    }

    #[test]
    fn test_consolidate_requires_schemas() {
        assert!(FieldSchemaCli::try_parse_from(["field-schema", "consolidate"]).is_err());
    }

    #[test]
    fn test_parse_document_json_and_yaml() {
        let value = parse_document(Path::new("a.json"), r#"[{"field_key": "x"}]"#).unwrap();
        assert!(value.is_array());

        let value = parse_document(Path::new("a.yml"), "template_id: will\nfields: []").unwrap();
        assert_eq!(value["template_id"], "will");
    }

    #[test]
    fn test_parse_document_unsupported() {
        let err = parse_document(Path::new("schema.txt"), "[]").unwrap_err();
        assert!(matches!(err, AgentError::InvalidInput(_)));
    }

    #[test]
    fn test_decode_error_is_engine_decode() {
        let err = serde_json::from_value::<Schema>(serde_json::json!([{"field_key": "x"}]))
            .map_err(decode_error)
            .unwrap_err();
        assert!(matches!(err, AgentError::Engine(SchemaError::Decode(_))));
    }
}
