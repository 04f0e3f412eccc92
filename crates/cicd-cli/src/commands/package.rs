//! Package command: fire the package hook and print the merged resources

use std::path::Path;

use cicd_core::{CicdPlugin, Format, HookEvent, HookOutcome, Plugin, render, run_hooks};
use colored::Colorize;
use serde_json::{Value, json};

use crate::error::Result;

use super::load_service;

/// Run the package command
pub fn run_package(file: &Path, stage: Option<&str>, format: Format) -> Result<()> {
    let mut service = load_service(file)?;
    let plugin: Box<dyn Plugin> = match stage {
        Some(stage) => Box::new(CicdPlugin::with_stage(stage)),
        None => Box::new(CicdPlugin::new()),
    };
    let plugins = vec![plugin];

    let results = run_hooks(&plugins, HookEvent::BeforePackageInitialize, &mut service)?;
    for result in &results {
        match &result.outcome {
            HookOutcome::Applied { resources } => eprintln!(
                "{} {} merged {}",
                "ok:".green().bold(),
                result.plugin,
                resources.join(", ")
            ),
            HookOutcome::Skipped { stage } => eprintln!(
                "{} {} skipped stage '{}'",
                "note:".yellow().bold(),
                result.plugin,
                stage
            ),
            HookOutcome::NotSubscribed => {}
        }
    }

    let empty = json!({});
    let resources: &Value = service.resources().unwrap_or(&empty);
    print!("{}", render::render(resources, format)?);

    Ok(())
}
