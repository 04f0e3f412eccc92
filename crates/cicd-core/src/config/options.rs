//! Option block parsing for `custom.cicd`
//!
//! `CicdOptions` mirrors the option block as the user wrote it. Every field is
//! optional so that a user block can be distinguished from the built-in
//! defaults; merging fills the gaps field by field.

use crate::config::scalar::{optional_string, optional_string_list, scalar_to_string};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Build image used when neither `image` nor `baseImage` is configured
pub const DEFAULT_BASE_IMAGE: &str = "aws/codebuild/amazonlinux2-x86_64-standard:3.0";

/// Branch the source action tracks when nothing else is configured
pub const DEFAULT_GIT_BRANCH: &str = "main";

/// Options recognized under `custom.cicd`
///
/// String options accept any scalar: `gitRepo: 2048` reads as `"2048"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CicdOptions {
    /// Build environment image (default image slot)
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_image: Option<String>,

    /// Build environment image; wins over `base_image` when set
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub git_owner: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub git_repo: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub git_branch: Option<String>,

    #[serde(
        default,
        rename = "githubOAuthToken",
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub github_oauth_token: Option<String>,

    /// Stages for which no resources are generated
    #[serde(
        default,
        rename = "excludestages",
        deserialize_with = "optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_stages: Option<Vec<String>>,

    /// Build-time environment variables, one single-key mapping per entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_vars: Option<Vec<Value>>,
}

impl CicdOptions {
    /// Built-in defaults for a service
    ///
    /// The repository defaults to the service name. Owner and token default
    /// to empty strings and are left for the provider to validate.
    pub fn defaults(service_name: &str) -> Self {
        Self {
            base_image: Some(DEFAULT_BASE_IMAGE.to_string()),
            image: None,
            git_owner: Some(String::new()),
            git_repo: Some(service_name.to_string()),
            git_branch: Some(DEFAULT_GIT_BRANCH.to_string()),
            github_oauth_token: Some(String::new()),
            exclude_stages: None,
            env_vars: None,
        }
    }

    /// Read options from the raw `custom.cicd` value
    ///
    /// A missing block (`null`) yields empty options.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    /// Fill every unset field from `defaults`
    ///
    /// Values already present always win. Collections are taken whole,
    /// never merged element-wise.
    pub fn merge_defaults(&mut self, defaults: &CicdOptions) {
        fill(&mut self.base_image, &defaults.base_image);
        fill(&mut self.image, &defaults.image);
        fill(&mut self.git_owner, &defaults.git_owner);
        fill(&mut self.git_repo, &defaults.git_repo);
        fill(&mut self.git_branch, &defaults.git_branch);
        fill(&mut self.github_oauth_token, &defaults.github_oauth_token);
        fill(&mut self.exclude_stages, &defaults.exclude_stages);
        fill(&mut self.env_vars, &defaults.env_vars);
    }

    /// Read only `excludestages` from the raw `custom.cicd` value
    ///
    /// Lets the stage guard run before the rest of the block is validated.
    /// Anything other than a list reads as no exclusions; non-scalar and
    /// `null` entries are ignored.
    pub fn excluded_stages(value: &Value) -> Option<Vec<String>> {
        let entries = value.get("excludestages")?.as_array()?;
        Some(
            entries
                .iter()
                .filter(|entry| !entry.is_null())
                .filter_map(scalar_to_string)
                .collect(),
        )
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, default: &Option<T>) {
    if slot.is_none() {
        *slot = default.clone();
    }
}
