//! Configuration resolution
//!
//! The `ConfigResolver` merges the user's option block over the built-in
//! defaults, then applies the branch override for the active stage and
//! flattens `envVars` into ordered name/value pairs.

use crate::config::options::{CicdOptions, DEFAULT_BASE_IMAGE, DEFAULT_GIT_BRANCH};
use crate::config::scalar::scalar_to_string;
use crate::config::stage::StageContext;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// One build-time environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The effective configuration after merging all sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Build environment image
    pub image: String,
    pub git_owner: String,
    pub git_repo: String,
    pub git_branch: String,
    pub github_oauth_token: String,
    /// Variables from `envVars`, in input order
    pub environment_variables: Vec<EnvVar>,
}

/// Resolves the effective options for one invocation
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    defaults: CicdOptions,
}

impl ConfigResolver {
    /// Create a resolver using the built-in defaults for `service_name`
    pub fn new(service_name: &str) -> Self {
        Self {
            defaults: CicdOptions::defaults(service_name),
        }
    }

    /// Create a resolver with an explicit set of defaults
    pub fn with_defaults(defaults: CicdOptions) -> Self {
        Self { defaults }
    }

    /// The defaults this resolver fills gaps from
    pub fn defaults(&self) -> &CicdOptions {
        &self.defaults
    }

    /// Resolve the configuration for the active stage
    ///
    /// Order of precedence for the branch: stage override, then the user's
    /// `gitBranch`, then the default. Fails only on a malformed `envVars`
    /// entry.
    pub fn resolve(&self, user: &CicdOptions, stage: &StageContext) -> Result<ResolvedConfig> {
        let mut merged = user.clone();
        merged.merge_defaults(&self.defaults);

        if let Some(branch) = stage.branch_override() {
            tracing::debug!(stage = stage.stage(), branch, "Applying stage branch override");
            merged.git_branch = Some(branch.to_string());
        }

        let environment_variables = match merged.env_vars.as_deref() {
            Some(entries) => parse_env_vars(entries)?,
            None => Vec::new(),
        };

        let image = merged
            .image
            .or(merged.base_image)
            .unwrap_or_else(|| DEFAULT_BASE_IMAGE.to_string());

        let resolved = ResolvedConfig {
            image,
            git_owner: merged.git_owner.unwrap_or_default(),
            git_repo: merged.git_repo.unwrap_or_default(),
            git_branch: merged
                .git_branch
                .unwrap_or_else(|| DEFAULT_GIT_BRANCH.to_string()),
            github_oauth_token: merged.github_oauth_token.unwrap_or_default(),
            environment_variables,
        };

        tracing::debug!(
            image = %resolved.image,
            owner = %resolved.git_owner,
            repo = %resolved.git_repo,
            branch = %resolved.git_branch,
            env_vars = resolved.environment_variables.len(),
            "Resolved cicd options"
        );

        Ok(resolved)
    }

    /// Parse the raw `custom.cicd` value and resolve it
    pub fn resolve_value(&self, user: &Value, stage: &StageContext) -> Result<ResolvedConfig> {
        let options = CicdOptions::from_value(user)?;
        self.resolve(&options, stage)
    }
}

/// Flatten single-key mappings into ordered name/value pairs
fn parse_env_vars(entries: &[Value]) -> Result<Vec<EnvVar>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let Some(map) = entry.as_object() else {
                return Err(Error::MalformedEnvVar {
                    index,
                    keys: Vec::new(),
                });
            };
            let mut fields = map.iter();
            match (fields.next(), fields.next()) {
                (Some((name, value)), None) => {
                    let value = scalar_to_string(value).ok_or_else(|| {
                        Error::InvalidEnvVarValue { name: name.clone() }
                    })?;
                    Ok(EnvVar::new(name.clone(), value))
                }
                _ => Err(Error::MalformedEnvVar {
                    index,
                    keys: map.keys().cloned().collect(),
                }),
            }
        })
        .collect()
}
