//! Template intrinsic references
//!
//! Resources in the same document point at each other by logical name,
//! before the provider has assigned real identities.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Logical name of the IAM role
pub const ROLE_LOGICAL_NAME: &str = "CICDRole";
/// Logical name of the build project
pub const BUILD_LOGICAL_NAME: &str = "Build";
/// Logical name of the pipeline
pub const PIPELINE_LOGICAL_NAME: &str = "Pipeline";
/// Deployment bucket the host declares in its own template
pub const DEPLOYMENT_BUCKET_LOGICAL_NAME: &str = "ServerlessDeploymentBucket";

/// A reference to another resource in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intrinsic {
    /// `{"Fn::GetAtt": [logical_name, attribute]}`
    GetAtt {
        logical_name: String,
        attribute: String,
    },
    /// `{"Ref": logical_name}`
    Ref(String),
}

impl Intrinsic {
    pub fn get_att(logical_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_name: logical_name.into(),
            attribute: attribute.into(),
        }
    }

    pub fn reference(logical_name: impl Into<String>) -> Self {
        Self::Ref(logical_name.into())
    }

    /// The logical name this reference points at
    pub fn logical_name(&self) -> &str {
        match self {
            Self::GetAtt { logical_name, .. } => logical_name,
            Self::Ref(logical_name) => logical_name,
        }
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::GetAtt {
                logical_name,
                attribute,
            } => map.serialize_entry("Fn::GetAtt", &[logical_name, attribute])?,
            Self::Ref(logical_name) => map.serialize_entry("Ref", logical_name)?,
        }
        map.end()
    }
}
