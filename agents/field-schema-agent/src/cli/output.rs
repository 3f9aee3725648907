//! Output formatting for the field schema agent CLI
//!
//! Provides structured output in JSON, YAML, and human-readable table formats
//! with kind-based coloring for findings.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use field_schema_core::{
    Collision, Schema, TemplateStatus, ValidationError, ValidationReport, ValidationWarning,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;

use crate::error::{AgentError, Result};
use crate::{AGENT_ID, AGENT_VERSION};

/// Output format options for CLI results
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Types that can be rendered in every output format
pub trait Render: Serialize {
    /// Write the human-readable table form
    fn render_table(&self, out: &mut dyn Write) -> std::io::Result<()>;

    /// Write this value in the given format
    fn render_to(&self, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)
                    .map_err(|e| AgentError::SerializationError(e.to_string()))?;
                writeln!(out, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)
                    .map_err(|e| AgentError::SerializationError(e.to_string()))?;
                write!(out, "{}", yaml)?;
            }
            OutputFormat::Table => self.render_table(out)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Write this value to stdout
    fn render(&self, format: OutputFormat) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.render_to(format, &mut lock)
    }
}

/// SHA-256 over a schema and the template text it was checked against
pub fn inputs_hash(schema: &Schema, template_content: Option<&str>) -> Result<String> {
    let mut hasher = Sha256::new();
    let schema_json =
        serde_json::to_string(schema).map_err(|e| AgentError::SerializationError(e.to_string()))?;
    hasher.update(schema_json.as_bytes());
    if let Some(content) = template_content {
        hasher.update(b"\n");
        hasher.update(content.as_bytes());
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Result of the `validate` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    /// Schema file that was validated
    pub source: String,
    /// Template text file, when cross-checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub valid: bool,
    pub status: TemplateStatus,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub summary: String,
    /// Digest of the validated inputs
    pub inputs_hash: String,
    pub agent_id: String,
    pub agent_version: String,
    pub engine_version: String,
    pub checked_at: DateTime<Utc>,
}

impl ValidationOutput {
    /// Create output from a validation report
    pub fn from_report(
        report: &ValidationReport,
        source: impl Into<String>,
        template: Option<String>,
        inputs_hash: String,
    ) -> Self {
        let error_count = report.error_count();
        let warning_count = report.warning_count();

        let summary = match report.status() {
            TemplateStatus::Ready => "Schema is valid".to_string(),
            TemplateStatus::NeedsReview => {
                format!("Schema is valid with {} warning(s)", warning_count)
            }
            TemplateStatus::Blocked => format!(
                "Schema has {} error(s) and {} warning(s)",
                error_count, warning_count
            ),
        };

        Self {
            source: source.into(),
            template,
            valid: report.valid,
            status: report.status(),
            error_count,
            warning_count,
            errors: report.errors.clone(),
            warnings: report.warnings.clone(),
            summary,
            inputs_hash,
            agent_id: AGENT_ID.to_string(),
            agent_version: AGENT_VERSION.to_string(),
            engine_version: field_schema_core::ENGINE_VERSION.to_string(),
            checked_at: Utc::now(),
        }
    }
}

impl Render for ValidationOutput {
    fn render_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", format!("Validation Results: {}", self.source).cyan().bold())?;
        if let Some(template) = &self.template {
            writeln!(out, "{} {}", "Template:".dimmed(), template)?;
        }
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let status_icon = match self.status {
            TemplateStatus::Ready => "+".green(),
            TemplateStatus::NeedsReview => "!".yellow(),
            TemplateStatus::Blocked => "x".red(),
        };
        writeln!(out, "{} {}", status_icon, self.summary)?;

        if !self.errors.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Errors:".red().bold())?;
            for error in &self.errors {
                writeln!(
                    out,
                    "  {} [{}] {}: {}",
                    "x".red(),
                    error.kind.to_string().dimmed(),
                    error.field_key.cyan(),
                    error.message
                )?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Warnings:".yellow().bold())?;
            for warning in &self.warnings {
                writeln!(
                    out,
                    "  {} [{}] {}: {}",
                    "!".yellow(),
                    warning.kind.to_string().dimmed(),
                    warning.field_key.cyan(),
                    warning.message
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{} {}", "Inputs:".dimmed(), self.inputs_hash.dimmed())?;
        Ok(())
    }
}

/// Result of the `consolidate` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationOutput {
    /// Template files that were merged
    pub sources: Vec<String>,
    pub input_field_count: usize,
    pub field_count: usize,
    pub schema: Schema,
    pub generated_at: DateTime<Utc>,
}

impl ConsolidationOutput {
    pub fn new(sources: Vec<String>, input_field_count: usize, schema: Schema) -> Self {
        Self {
            sources,
            input_field_count,
            field_count: schema.len(),
            schema,
            generated_at: Utc::now(),
        }
    }
}

impl Render for ConsolidationOutput {
    fn render_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Consolidated Intake Schema".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        for source in &self.sources {
            writeln!(out, "  {} {}", "-".blue(), source)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{} input field(s) merged into {} field(s)",
            self.input_field_count, self.field_count
        )?;
        writeln!(out)?;

        for field in &self.schema {
            let required = if field.required {
                "*".red().to_string()
            } else {
                String::new()
            };
            write!(
                out,
                "  {}{} {} ({})",
                field.label.bold(),
                required,
                field.field_key.dimmed(),
                field.field_type.to_string().yellow()
            )?;
            if !field.options.is_empty() {
                write!(out, " [{}]", field.options.join(", "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Result of the `collisions` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionOutput {
    pub global: String,
    #[serde(rename = "override")]
    pub override_source: String,
    pub compatible: bool,
    pub collisions: Vec<Collision>,
}

impl CollisionOutput {
    pub fn new(
        global: impl Into<String>,
        override_source: impl Into<String>,
        collisions: Vec<Collision>,
    ) -> Self {
        Self {
            global: global.into(),
            override_source: override_source.into(),
            compatible: collisions.is_empty(),
            collisions,
        }
    }
}

impl Render for CollisionOutput {
    fn render_table(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let status = if self.compatible {
            "COMPATIBLE".green().bold()
        } else {
            "INCOMPATIBLE".red().bold()
        };

        writeln!(out, "{}", "Override Check Results".cyan().bold())?;
        writeln!(out, "{} {}", "Global:".dimmed(), self.global)?;
        writeln!(out, "{} {}", "Override:".dimmed(), self.override_source)?;
        writeln!(out)?;
        writeln!(out, "Status: {}", status)?;

        if !self.collisions.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Collisions:".red().bold())?;
            for collision in &self.collisions {
                writeln!(
                    out,
                    "  {} {}: {}",
                    "x".red(),
                    collision.field_key.cyan(),
                    collision.reason
                )?;
            }
        }
        Ok(())
    }
}
