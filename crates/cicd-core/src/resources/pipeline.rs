//! Two-stage delivery pipeline: Source then Build

use super::Resource;
use super::intrinsic::{DEPLOYMENT_BUCKET_LOGICAL_NAME, Intrinsic};
use serde::Serialize;

pub const PIPELINE_RESOURCE_TYPE: &str = "AWS::CodePipeline::Pipeline";

/// Name of the Source stage and of its only action
pub const SOURCE_STAGE: &str = "Source";
/// Name of the Build stage
pub const BUILD_STAGE: &str = "Build";
/// Name of the action in the Build stage
pub const BUILD_ACTION: &str = "CodeBuild";

const ACTION_VERSION: &str = "1";
const RUN_ORDER: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionCategory {
    Source,
    Build,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionOwner {
    ThirdParty,
    #[serde(rename = "AWS")]
    Aws,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionTypeId {
    pub category: ActionCategory,
    pub owner: ActionOwner,
    pub version: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Artifact {
    pub name: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Repository the Source action pulls from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GitHubSource {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    #[serde(rename = "OAuthToken")]
    pub oauth_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildTarget {
    pub project_name: Intrinsic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionConfiguration {
    Source(GitHubSource),
    Build(BuildTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_artifacts: Vec<Artifact>,
    pub action_type_id: ActionTypeId,
    pub output_artifacts: Vec<Artifact>,
    pub configuration: ActionConfiguration,
    pub run_order: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineStage {
    pub name: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtifactStore {
    #[serde(rename = "Type")]
    pub kind: String,
    pub location: Intrinsic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineProperties {
    pub name: String,
    pub role_arn: Intrinsic,
    pub stages: Vec<PipelineStage>,
    pub artifact_store: ArtifactStore,
}

impl PipelineProperties {
    /// Look up a stage by name
    pub fn stage(&self, name: &str) -> Option<&PipelineStage> {
        self.stages.iter().find(|s| s.name == name)
    }
}

/// Inputs for [`pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineSpec<'a> {
    pub name: &'a str,
    pub service_name: &'a str,
    pub source: GitHubSource,
    pub role_arn: Intrinsic,
    pub project: Intrinsic,
}

/// Build the pipeline
///
/// The Source action emits an artifact named after the service and the
/// Build action consumes exactly that artifact. The Build output
/// (`<service>Build`) has no consumer yet.
pub fn pipeline(spec: PipelineSpec<'_>) -> Resource<PipelineProperties> {
    let source_artifact = Artifact::new(spec.service_name);

    let source = PipelineStage {
        name: SOURCE_STAGE.to_string(),
        actions: vec![Action {
            name: SOURCE_STAGE.to_string(),
            input_artifacts: Vec::new(),
            action_type_id: ActionTypeId {
                category: ActionCategory::Source,
                owner: ActionOwner::ThirdParty,
                version: ACTION_VERSION.to_string(),
                provider: "GitHub".to_string(),
            },
            output_artifacts: vec![source_artifact.clone()],
            configuration: ActionConfiguration::Source(spec.source),
            run_order: RUN_ORDER.to_string(),
        }],
    };

    let build = PipelineStage {
        name: BUILD_STAGE.to_string(),
        actions: vec![Action {
            name: BUILD_ACTION.to_string(),
            input_artifacts: vec![source_artifact],
            action_type_id: ActionTypeId {
                category: ActionCategory::Build,
                owner: ActionOwner::Aws,
                version: ACTION_VERSION.to_string(),
                provider: "CodeBuild".to_string(),
            },
            output_artifacts: vec![Artifact::new(format!("{}Build", spec.service_name))],
            configuration: ActionConfiguration::Build(BuildTarget {
                project_name: spec.project,
            }),
            run_order: RUN_ORDER.to_string(),
        }],
    };

    Resource::new(
        PIPELINE_RESOURCE_TYPE,
        PipelineProperties {
            name: spec.name.to_string(),
            role_arn: spec.role_arn,
            stages: vec![source, build],
            artifact_store: ArtifactStore {
                kind: "S3".to_string(),
                location: Intrinsic::reference(DEPLOYMENT_BUCKET_LOGICAL_NAME),
            },
        },
    )
}
