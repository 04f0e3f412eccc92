//! Events command: list lifecycle events

use cicd_core::{CicdPlugin, HookEvent, Plugin};
use colored::Colorize;

use crate::error::Result;

/// Run the events command
pub fn run_events() -> Result<()> {
    let plugin = CicdPlugin::new();

    println!("{}", "Lifecycle Events".bold());
    println!();

    for name in HookEvent::all_names() {
        let handled = HookEvent::parse(name).is_some_and(|event| plugin.events().contains(&event));
        if handled {
            println!("  {:<28} {}", name.green(), "(cicd)".cyan());
        } else {
            println!("  {}", name.dimmed());
        }
    }

    Ok(())
}
