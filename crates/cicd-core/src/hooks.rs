//! Lifecycle hooks for host packaging events
//!
//! The host fires named lifecycle events while it packages and deploys a
//! service. Plugins subscribe to events and receive the mutable service
//! description when one fires. [`CicdPlugin`] subscribes to
//! `before:package:initialize` and injects the CI/CD resources.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{CicdOptions, ConfigResolver, StageContext, should_run};
use crate::error::Result;
use crate::resources::{ResourceDocument, ResourceGraphBuilder};
use crate::service::ServiceDescription;

/// Events that can trigger hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// Before packaging starts
    #[serde(rename = "before:package:initialize")]
    BeforePackageInitialize,
    /// Packaging starts
    #[serde(rename = "package:initialize")]
    PackageInitialize,
    /// After packaging has initialized
    #[serde(rename = "after:package:initialize")]
    AfterPackageInitialize,
    /// Before the deployment runs
    #[serde(rename = "before:deploy:deploy")]
    BeforeDeploy,
    /// The deployment runs
    #[serde(rename = "deploy:deploy")]
    Deploy,
    /// After the deployment ran
    #[serde(rename = "after:deploy:deploy")]
    AfterDeploy,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforePackageInitialize => write!(f, "before:package:initialize"),
            Self::PackageInitialize => write!(f, "package:initialize"),
            Self::AfterPackageInitialize => write!(f, "after:package:initialize"),
            Self::BeforeDeploy => write!(f, "before:deploy:deploy"),
            Self::Deploy => write!(f, "deploy:deploy"),
            Self::AfterDeploy => write!(f, "after:deploy:deploy"),
        }
    }
}

impl HookEvent {
    /// Parse a hook event from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "before:package:initialize" => Some(Self::BeforePackageInitialize),
            "package:initialize" => Some(Self::PackageInitialize),
            "after:package:initialize" => Some(Self::AfterPackageInitialize),
            "before:deploy:deploy" => Some(Self::BeforeDeploy),
            "deploy:deploy" => Some(Self::Deploy),
            "after:deploy:deploy" => Some(Self::AfterDeploy),
            _ => None,
        }
    }

    /// List all valid event names
    pub fn all_names() -> &'static [&'static str] {
        &[
            "before:package:initialize",
            "package:initialize",
            "after:package:initialize",
            "before:deploy:deploy",
            "deploy:deploy",
            "after:deploy:deploy",
        ]
    }
}

/// What a plugin did for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The plugin does not handle this event
    NotSubscribed,
    /// The active stage is excluded; nothing was changed
    Skipped { stage: String },
    /// Resources were merged into the service description
    Applied { resources: Vec<String> },
}

/// A plugin loaded by the host
pub trait Plugin {
    /// Plugin name used in diagnostics
    fn name(&self) -> &str;

    /// Events this plugin handles
    fn events(&self) -> &[HookEvent];

    /// Handle an event
    fn handle(&self, event: HookEvent, service: &mut ServiceDescription) -> Result<HookOutcome>;
}

/// Result of running a single plugin
#[derive(Debug)]
pub struct HookResult {
    /// The plugin that ran
    pub plugin: String,
    /// The event it ran for
    pub event: HookEvent,
    pub outcome: HookOutcome,
}

/// Run all plugins subscribed to the given event
///
/// Plugins run in registration order. The first error stops the run
/// (fail-fast behavior).
pub fn run_hooks(
    plugins: &[Box<dyn Plugin>],
    event: HookEvent,
    service: &mut ServiceDescription,
) -> Result<Vec<HookResult>> {
    let mut results = Vec::new();

    for plugin in plugins.iter().filter(|p| p.events().contains(&event)) {
        tracing::debug!(plugin = plugin.name(), %event, "Running hook");
        let outcome = plugin.handle(event, service)?;
        results.push(HookResult {
            plugin: plugin.name().to_string(),
            event,
            outcome,
        });
    }

    Ok(results)
}

static CICD_EVENTS: [HookEvent; 1] = [HookEvent::BeforePackageInitialize];

/// Injects the role, build project, and pipeline before packaging
#[derive(Debug, Clone, Default)]
pub struct CicdPlugin {
    stage: Option<String>,
}

impl CicdPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `stage` instead of the stage named in the description
    pub fn with_stage(stage: impl Into<String>) -> Self {
        Self {
            stage: Some(stage.into()),
        }
    }

    /// Build the resource document without touching the description
    ///
    /// Returns `None` when the active stage is excluded.
    pub fn generate(&self, service: &ServiceDescription) -> Result<Option<ResourceDocument>> {
        let service_name = service.service_name()?;
        let stage = service.active_stage(self.stage.as_deref());
        let raw = service.cicd_options();

        if !should_run(&stage, CicdOptions::excluded_stages(raw).as_deref()) {
            info!("CICD is ignored for {} stage", stage);
            return Ok(None);
        }

        let options = CicdOptions::from_value(raw)?;

        let stage_context = StageContext::from_custom(stage.as_str(), service.custom());
        let config = ConfigResolver::new(service_name).resolve(&options, &stage_context)?;

        Ok(Some(
            ResourceGraphBuilder::new(service_name, &stage, &config).build(),
        ))
    }

    fn create_pipeline(&self, service: &mut ServiceDescription) -> Result<HookOutcome> {
        let stage = service.active_stage(self.stage.as_deref());
        let Some(document) = self.generate(service)? else {
            return Ok(HookOutcome::Skipped { stage });
        };

        info!("Updating CICD Resources...");
        let resources = service.merge_resources(&document)?;
        info!("CICD Resources Updated");

        Ok(HookOutcome::Applied { resources })
    }
}

impl Plugin for CicdPlugin {
    fn name(&self) -> &str {
        "cicd"
    }

    fn events(&self) -> &[HookEvent] {
        &CICD_EVENTS
    }

    fn handle(&self, event: HookEvent, service: &mut ServiceDescription) -> Result<HookOutcome> {
        match event {
            HookEvent::BeforePackageInitialize => self.create_pipeline(service),
            _ => Ok(HookOutcome::NotSubscribed),
        }
    }
}
