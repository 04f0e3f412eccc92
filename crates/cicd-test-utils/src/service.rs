//! [`ServiceFixture`] builder for service descriptions.

use serde_json::{Map, Value, json};

/// Builds a service description as a JSON value.
///
/// # Example
///
/// ```rust
/// use cicd_test_utils::ServiceFixture;
///
/// let service = ServiceFixture::new("orders-api")
///     .stage("prod")
///     .git_owner("acme")
///     .env_var("FOO", "bar")
///     .branch_override("prod", "release")
///     .build();
///
/// assert_eq!(service["custom"]["prod"]["branch"], "release");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceFixture {
    name: String,
    stage: Option<String>,
    provider_stage: Option<String>,
    cicd: Map<String, Value>,
    overrides: Map<String, Value>,
    resources: Option<Value>,
}

impl ServiceFixture {
    /// A service with no `custom` block beyond what is added later.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stage: None,
            provider_stage: None,
            cicd: Map::new(),
            overrides: Map::new(),
            resources: None,
        }
    }

    /// Set `custom.stage`.
    pub fn stage(mut self, stage: &str) -> Self {
        self.stage = Some(stage.to_string());
        self
    }

    /// Set `provider.stage`.
    pub fn provider_stage(mut self, stage: &str) -> Self {
        self.provider_stage = Some(stage.to_string());
        self
    }

    /// Set any `custom.cicd` option.
    pub fn option(mut self, key: &str, value: Value) -> Self {
        self.cicd.insert(key.to_string(), value);
        self
    }

    pub fn git_owner(self, owner: &str) -> Self {
        self.option("gitOwner", json!(owner))
    }

    pub fn git_branch(self, branch: &str) -> Self {
        self.option("gitBranch", json!(branch))
    }

    /// Append an entry to `custom.cicd.envVars`.
    pub fn env_var(mut self, name: &str, value: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(name.to_string(), json!(value));
        let entry = Value::Object(fields);
        match self.cicd.get_mut("envVars").and_then(Value::as_array_mut) {
            Some(list) => list.push(entry),
            None => {
                self.cicd.insert("envVars".to_string(), json!([entry]));
            }
        }
        self
    }

    /// Append a stage to `custom.cicd.excludestages`.
    pub fn exclude_stage(mut self, stage: &str) -> Self {
        match self
            .cicd
            .get_mut("excludestages")
            .and_then(Value::as_array_mut)
        {
            Some(list) => list.push(json!(stage)),
            None => {
                self.cicd
                    .insert("excludestages".to_string(), json!([stage]));
            }
        }
        self
    }

    /// Set `custom.<stage>.branch`.
    pub fn branch_override(mut self, stage: &str, branch: &str) -> Self {
        self.overrides
            .insert(stage.to_string(), json!({ "branch": branch }));
        self
    }

    /// Set the user-declared `resources` block.
    pub fn resources(mut self, resources: Value) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Produce the description.
    pub fn build(self) -> Value {
        let mut custom = self.overrides;
        if let Some(stage) = self.stage {
            custom.insert("stage".to_string(), json!(stage));
        }
        if !self.cicd.is_empty() {
            custom.insert("cicd".to_string(), Value::Object(self.cicd));
        }

        let mut service = Map::new();
        service.insert("service".to_string(), json!(self.name));
        if let Some(stage) = self.provider_stage {
            service.insert(
                "provider".to_string(),
                json!({ "name": "aws", "stage": stage }),
            );
        }
        if !custom.is_empty() {
            service.insert("custom".to_string(), Value::Object(custom));
        }
        if let Some(resources) = self.resources {
            service.insert("resources".to_string(), resources);
        }
        Value::Object(service)
    }
}
