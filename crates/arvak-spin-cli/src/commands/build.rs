//! Build command implementation.
//!
//! Load a YAML model description and print the built model.

use std::path::Path;

use anyhow::Result;
use console::style;

use arvak_spin::ModelConfig;

use super::common::{OutputFormat, print_model};

/// Execute the build command.
pub fn execute(config: Option<&str>, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;

    if let Some(path) = config {
        if !Path::new(path).exists() {
            anyhow::bail!("File not found: {path}");
        }
    }

    let config = ModelConfig::load(config.map(Path::new))?;

    if format == OutputFormat::Table {
        println!(
            "{} Building {} model",
            style("→").cyan().bold(),
            style(config.kind()).yellow()
        );
    }

    let model = config.build()?;
    print_model(&model, format)
}
