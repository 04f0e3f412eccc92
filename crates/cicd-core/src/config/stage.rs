//! Active stage and per-stage branch overrides

use serde_json::Value;
use std::collections::BTreeMap;

/// Per-stage override read from `custom.<stage>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOverride {
    /// Branch the source action tracks for this stage
    pub branch: Option<String>,
}

/// The stage being packaged plus any branch overrides keyed by stage name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageContext {
    stage: String,
    overrides: BTreeMap<String, StageOverride>,
}

impl StageContext {
    /// Context for `stage` with no overrides
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Add a branch override for a stage
    pub fn with_override(mut self, stage: impl Into<String>, branch: impl Into<String>) -> Self {
        self.overrides.insert(
            stage.into(),
            StageOverride {
                branch: Some(branch.into()),
            },
        );
        self
    }

    /// Build the context from the host's `custom` block
    ///
    /// Only the entry keyed by the active stage is considered; its `branch`
    /// field, when it is a string, becomes the override.
    pub fn from_custom(stage: impl Into<String>, custom: &Value) -> Self {
        let stage = stage.into();
        let mut overrides = BTreeMap::new();
        if let Some(entry) = custom.get(&stage).filter(|v| v.is_object()) {
            let branch = entry
                .get("branch")
                .and_then(Value::as_str)
                .map(str::to_string);
            overrides.insert(stage.clone(), StageOverride { branch });
        }
        Self { stage, overrides }
    }

    /// Name of the active stage
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Branch override for the active stage, if one is configured
    pub fn branch_override(&self) -> Option<&str> {
        self.overrides
            .get(&self.stage)
            .and_then(|o| o.branch.as_deref())
    }
}

/// Whether resources should be generated for `stage`
///
/// False only when `excluded_stages` is present and lists `stage`.
pub fn should_run(stage: &str, excluded_stages: Option<&[String]>) -> bool {
    match excluded_stages {
        Some(stages) => !stages.iter().any(|s| s == stage),
        None => true,
    }
}
