//! IAM role shared by the build project and the pipeline
//!
//! The permission set is fixed and applies to every resource (`*`). It is not
//! narrowed to the actions a given pipeline ends up using.

use super::Resource;
use serde::Serialize;

pub const ROLE_RESOURCE_TYPE: &str = "AWS::IAM::Role";

/// Policy language version used in every document
pub const POLICY_VERSION: &str = "2012-10-17";

/// Service principals allowed to assume the role
pub const TRUSTED_SERVICES: [&str; 2] = ["codepipeline.amazonaws.com", "codebuild.amazonaws.com"];

/// Actions granted by the inline policy
pub const CICD_ACTIONS: [&str; 12] = [
    "cloudformation:DescribeStacks",
    "cloudformation:DescribeStackResource",
    "s3:ListBucket",
    "s3:GetObject",
    "s3:GetObjectVersion",
    "lambda:GetFunction",
    "sts:GetCallerIdentity",
    "s3:PutObject",
    "cloudformation:ValidateTemplate",
    "cloudformation:UpdateStack",
    "cloudformation:DescribeStackEvents",
    "cloudformation:ListStackResources",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    pub service: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlinePolicy {
    pub policy_name: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    pub role_name: String,
    pub assume_role_policy_document: PolicyDocument,
    pub policies: Vec<InlinePolicy>,
}

/// Build the role; `name` is used for both the role and its inline policy
pub fn role(name: &str) -> Resource<RoleProperties> {
    let trust = TRUSTED_SERVICES
        .iter()
        .map(|service| Statement {
            effect: Effect::Allow,
            principal: Some(Principal {
                service: vec![service.to_string()],
            }),
            action: vec!["sts:AssumeRole".to_string()],
            resource: None,
        })
        .collect();

    let permissions = Statement {
        effect: Effect::Allow,
        principal: None,
        action: CICD_ACTIONS.iter().map(|a| a.to_string()).collect(),
        resource: Some("*".to_string()),
    };

    Resource::new(
        ROLE_RESOURCE_TYPE,
        RoleProperties {
            role_name: name.to_string(),
            assume_role_policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: trust,
            },
            policies: vec![InlinePolicy {
                policy_name: name.to_string(),
                policy_document: PolicyDocument {
                    version: POLICY_VERSION.to_string(),
                    statement: vec![permissions],
                },
            }],
        },
    )
}
