//! Generate command: print the resource document

use std::path::Path;

use cicd_core::{CicdPlugin, Format, render};
use colored::Colorize;

use crate::error::Result;

use super::load_service;

/// Run the generate command
pub fn run_generate(
    file: &Path,
    stage: Option<&str>,
    format: Format,
    checksum: bool,
) -> Result<()> {
    let service = load_service(file)?;
    let plugin = match stage {
        Some(stage) => CicdPlugin::with_stage(stage),
        None => CicdPlugin::new(),
    };

    let Some(document) = plugin.generate(&service)? else {
        eprintln!(
            "{} stage '{}' is excluded, no resources generated",
            "note:".yellow().bold(),
            service.active_stage(stage)
        );
        return Ok(());
    };

    let rendered = render::render(&document, format)?;
    if checksum {
        println!("{}", render::checksum(&rendered));
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
