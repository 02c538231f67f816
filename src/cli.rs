use crate::builder::ModelBuilder;
use crate::document::Document;
use crate::model::Model;
use crate::registry::ModelRegistry;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// OpenAPI Model Builder - build the model graph of a bundled OpenAPI document
#[derive(Parser, Debug)]
#[command(name = "openapi-model-builder")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the bundled OpenAPI document (YAML or JSON)
    #[arg(value_name = "DOCUMENT")]
    pub document_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Only build these component schemas (and what they reference)
    #[arg(short = 's', long = "schema", value_name = "NAME")]
    pub schemas: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.document_path.exists() {
        anyhow::bail!(
            "Document path does not exist: {}",
            args.document_path.display()
        );
    }

    if !args.document_path.is_file() {
        anyhow::bail!(
            "Document path is not a file: {}",
            args.document_path.display()
        );
    }

    info!("Document: {}", args.document_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    if args.schemas.is_empty() {
        info!("Schemas: all");
    } else {
        info!("Schemas: {}", args.schemas.join(", "));
    }

    Ok(args)
}

/// Load a bundled document from a YAML or JSON file
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    // YAML is a superset of JSON, so one parser covers both
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse document: {}", path.display()))
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Loading document...");
    let document = load_document(&args.document_path)?;
    info!(
        "Found {} component schemas",
        document.components.schemas.len()
    );

    info!("Building models...");
    let builder = ModelBuilder::new(&document);
    let mut registry = ModelRegistry::new();
    if args.schemas.is_empty() {
        builder.build_all(&mut registry)?;
    } else {
        for name in &args.schemas {
            debug!("Building component: {}", name);
            builder.build_component(&mut registry, name)?;
        }
    }

    for flagged in registry.flagged() {
        warn!("{}", flagged);
    }

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&registry)?,
        OutputFormat::Json => serialize_json(&registry)?,
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    let (mut primitives, mut arrays, mut objects, mut compositions) = (0, 0, 0, 0);
    for (_, model) in registry.iter() {
        match model {
            Model::Primitive(_) => primitives += 1,
            Model::Array(_) => arrays += 1,
            Model::Object(_) => objects += 1,
            Model::Composition(_) => compositions += 1,
        }
    }
    info!("Summary:");
    info!("  - Models: {}", registry.len());
    info!("  - Objects: {}", objects);
    info!("  - Compositions: {}", compositions);
    info!("  - Arrays: {}", arrays);
    info!("  - Primitives: {}", primitives);
    info!("  - Flagged schemas: {}", registry.flagged().len());

    Ok(())
}
