//! OpenAPI Model Builder - command-line tool for building the model graph of an OpenAPI document.
//!
//! Reads a bundled OpenAPI document, builds a model for every component schema (and
//! every anonymous schema nested inside one) and writes the resulting registry as YAML
//! or JSON.
//!
//! # Usage
//!
//! ```bash
//! openapi-model-builder [OPTIONS] <DOCUMENT>
//! ```
//!
//! # Examples
//!
//! ```bash
//! openapi-model-builder ./bundled.yaml -f json -o models.json
//! openapi-model-builder ./bundled.yaml -s Pet -s Owner -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_model_builder::cli;

fn main() -> Result<()> {
    // The verbose flag decides the log level, so parse before the logger exists
    let parsed = cli::CliArgs::parse();

    let log_level = if parsed.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI Model Builder starting...");

    let args = cli::parse_args_from_parsed(parsed)?;
    cli::run(args)?;

    info!("Model building completed successfully");

    Ok(())
}
