//! Build project executed by the pipeline's Build stage

use super::Resource;
use super::intrinsic::Intrinsic;
use crate::config::EnvVar;
use serde::Serialize;

pub const BUILD_RESOURCE_TYPE: &str = "AWS::CodeBuild::Project";

/// Artifacts and sources are handed over by the pipeline, not a bucket path
pub const PIPELINE_ARTIFACT_TYPE: &str = "CODEPIPELINE";
pub const CONTAINER_TYPE: &str = "LINUX_CONTAINER";
pub const COMPUTE_TYPE: &str = "BUILD_GENERAL1_SMALL";
pub const BUILD_TIMEOUT_MINUTES: u32 = 60;

/// Name of the variable that always carries the stage
pub const STAGE_VARIABLE: &str = "STAGE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildArtifacts {
    #[serde(rename = "Type")]
    pub kind: String,
    pub name: String,
    pub packaging: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildEnvironment {
    #[serde(rename = "Type")]
    pub kind: String,
    pub compute_type: String,
    pub image: String,
    pub environment_variables: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSource {
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildProperties {
    pub name: String,
    pub service_role: Intrinsic,
    pub artifacts: BuildArtifacts,
    pub environment: BuildEnvironment,
    pub source: BuildSource,
    pub timeout_in_minutes: u32,
}

/// Build the project
///
/// `STAGE` is always the first environment variable; user variables follow
/// in their configured order.
pub fn build_project(
    name: &str,
    stage: &str,
    image: &str,
    variables: &[EnvVar],
    service_role: Intrinsic,
) -> Resource<BuildProperties> {
    let mut environment_variables = Vec::with_capacity(variables.len() + 1);
    environment_variables.push(EnvVar::new(STAGE_VARIABLE, stage));
    environment_variables.extend(variables.iter().cloned());

    Resource::new(
        BUILD_RESOURCE_TYPE,
        BuildProperties {
            name: name.to_string(),
            service_role,
            artifacts: BuildArtifacts {
                kind: PIPELINE_ARTIFACT_TYPE.to_string(),
                name: format!("{}-build", name),
                packaging: "NONE".to_string(),
            },
            environment: BuildEnvironment {
                kind: CONTAINER_TYPE.to_string(),
                compute_type: COMPUTE_TYPE.to_string(),
                image: image.to_string(),
                environment_variables,
            },
            source: BuildSource {
                kind: PIPELINE_ARTIFACT_TYPE.to_string(),
            },
            timeout_in_minutes: BUILD_TIMEOUT_MINUTES,
        },
    )
}
