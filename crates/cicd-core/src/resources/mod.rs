//! Resource graph construction
//!
//! Builds the three dependent resources from a resolved configuration:
//!
//! ```text
//!   CICDRole <--(GetAtt Arn)-- Build
//!       ^                        ^
//!       |                        | (Ref)
//!       +----(GetAtt Arn)---- Pipeline
//! ```
//!
//! Construction is pure: identical inputs always produce identical documents.

pub mod build;
pub mod intrinsic;
pub mod pipeline;
pub mod role;

use crate::config::ResolvedConfig;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

pub use build::BuildProperties;
pub use intrinsic::{
    BUILD_LOGICAL_NAME, DEPLOYMENT_BUCKET_LOGICAL_NAME, Intrinsic, PIPELINE_LOGICAL_NAME,
    ROLE_LOGICAL_NAME,
};
pub use pipeline::{GitHubSource, PipelineProperties, PipelineSpec};
pub use role::RoleProperties;

/// A single template resource: provider type plus properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource<P> {
    #[serde(rename = "Type")]
    pub resource_type: &'static str,
    #[serde(rename = "Properties")]
    pub properties: P,
}

impl<P> Resource<P> {
    pub fn new(resource_type: &'static str, properties: P) -> Self {
        Self {
            resource_type,
            properties,
        }
    }
}

/// The resources keyed by logical name
///
/// Field order fixes the key order in rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resources {
    #[serde(rename = "CICDRole")]
    pub role: Resource<RoleProperties>,
    #[serde(rename = "Build")]
    pub build: Resource<BuildProperties>,
    #[serde(rename = "Pipeline")]
    pub pipeline: Resource<PipelineProperties>,
}

/// `{Resources: {CICDRole, Build, Pipeline}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDocument {
    #[serde(rename = "Resources")]
    pub resources: Resources,
}

impl ResourceDocument {
    /// Logical names in the order they appear in the document
    pub fn logical_names(&self) -> [&'static str; 3] {
        [ROLE_LOGICAL_NAME, BUILD_LOGICAL_NAME, PIPELINE_LOGICAL_NAME]
    }

    /// The document as an untyped JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds the resource document for one service and stage
#[derive(Debug, Clone)]
pub struct ResourceGraphBuilder<'a> {
    service_name: &'a str,
    stage: &'a str,
    config: &'a ResolvedConfig,
}

impl<'a> ResourceGraphBuilder<'a> {
    pub fn new(service_name: &'a str, stage: &'a str, config: &'a ResolvedConfig) -> Self {
        Self {
            service_name,
            stage,
            config,
        }
    }

    /// Provider-facing name shared by all three resources: `<service>-<stage>`
    pub fn resource_name(&self) -> String {
        format!("{}-{}", self.service_name, self.stage)
    }

    /// Construct the document
    pub fn build(&self) -> ResourceDocument {
        let name = self.resource_name();
        let role_arn = Intrinsic::get_att(ROLE_LOGICAL_NAME, "Arn");

        let role = role::role(&name);

        let build = build::build_project(
            &name,
            self.stage,
            &self.config.image,
            &self.config.environment_variables,
            role_arn.clone(),
        );

        let pipeline = pipeline::pipeline(PipelineSpec {
            name: &name,
            service_name: self.service_name,
            source: GitHubSource {
                owner: self.config.git_owner.clone(),
                repo: self.config.git_repo.clone(),
                branch: self.config.git_branch.clone(),
                oauth_token: self.config.github_oauth_token.clone(),
            },
            role_arn,
            project: Intrinsic::reference(BUILD_LOGICAL_NAME),
        });

        ResourceDocument {
            resources: Resources {
                role,
                build,
                pipeline,
            },
        }
    }
}
