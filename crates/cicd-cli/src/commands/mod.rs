//! Command implementations for cicd-cli

pub mod events;
pub mod generate;
pub mod package;

pub use events::run_events;
pub use generate::run_generate;
pub use package::run_package;

use std::path::Path;

use cicd_core::ServiceDescription;

use crate::error::{CliError, Result};

/// Load a service description, reporting a missing file as a user error
pub(crate) fn load_service(file: &Path) -> Result<ServiceDescription> {
    if !file.is_file() {
        return Err(CliError::user(format!(
            "Service description not found: {}",
            file.display()
        )));
    }
    Ok(ServiceDescription::load(file)?)
}
