//! Tests for resource graph construction

use cicd_core::config::{ConfigResolver, StageContext};
use cicd_core::render;
use cicd_core::resources::pipeline::{BUILD_STAGE, SOURCE_STAGE};
use cicd_core::{Intrinsic, ResolvedConfig, ResourceDocument, ResourceGraphBuilder};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn resolved(user: Value, stage: &str) -> ResolvedConfig {
    ConfigResolver::new("orders-api")
        .resolve_value(&user, &StageContext::new(stage))
        .expect("options should resolve")
}

fn document(user: Value, stage: &str) -> ResourceDocument {
    let config = resolved(user, stage);
    ResourceGraphBuilder::new("orders-api", stage, &config).build()
}

mod structure_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_has_exactly_three_resources() {
        let value = document(json!({"gitOwner": "acme"}), "prod").to_value().unwrap();

        let resources = value["Resources"].as_object().unwrap();
        let mut names: Vec<&str> = resources.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, vec!["Build", "CICDRole", "Pipeline"]);

        for (name, resource) in resources {
            let props = resource["Properties"].as_object();
            assert!(
                props.is_some_and(|p| !p.is_empty()),
                "{} should have non-empty Properties",
                name
            );
            assert!(resource["Type"].is_string(), "{} should have a Type", name);
        }
    }

    #[test]
    fn test_resource_types() {
        let value = document(Value::Null, "prod").to_value().unwrap();
        assert_eq!(value["Resources"]["CICDRole"]["Type"], "AWS::IAM::Role");
        assert_eq!(value["Resources"]["Build"]["Type"], "AWS::CodeBuild::Project");
        assert_eq!(
            value["Resources"]["Pipeline"]["Type"],
            "AWS::CodePipeline::Pipeline"
        );
    }

    #[rstest]
    #[case("orders-api", "prod", "orders-api-prod")]
    #[case("orders-api", "dev", "orders-api-dev")]
    #[case("billing", "eu-staging", "billing-eu-staging")]
    fn test_naming_convention(#[case] service: &str, #[case] stage: &str, #[case] expected: &str) {
        let config = ConfigResolver::new(service)
            .resolve_value(&Value::Null, &StageContext::new(stage))
            .unwrap();
        let value = ResourceGraphBuilder::new(service, stage, &config)
            .build()
            .to_value()
            .unwrap();
        let resources = &value["Resources"];

        assert_eq!(resources["CICDRole"]["Properties"]["RoleName"], expected);
        assert_eq!(
            resources["CICDRole"]["Properties"]["Policies"][0]["PolicyName"],
            expected
        );
        assert_eq!(resources["Build"]["Properties"]["Name"], expected);
        assert_eq!(resources["Pipeline"]["Properties"]["Name"], expected);
    }
}

mod reference_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_references_are_get_att() {
        let value = document(Value::Null, "prod").to_value().unwrap();
        let role_arn = json!({"Fn::GetAtt": ["CICDRole", "Arn"]});

        assert_eq!(value["Resources"]["Build"]["Properties"]["ServiceRole"], role_arn);
        assert_eq!(value["Resources"]["Pipeline"]["Properties"]["RoleArn"], role_arn);
    }

    #[test]
    fn test_build_action_references_build_project() {
        let doc = document(Value::Null, "prod");
        let value = doc.to_value().unwrap();

        assert_eq!(
            value["Resources"]["Pipeline"]["Properties"]["Stages"][1]["Actions"][0]
                ["Configuration"]["ProjectName"],
            json!({"Ref": "Build"})
        );

        // every reference resolves to a resource in the same document
        let props = &doc.resources.pipeline.properties;
        let names = doc.logical_names();
        assert!(names.contains(&props.role_arn.logical_name()));
        assert!(names.contains(&doc.resources.build.properties.service_role.logical_name()));
        assert_eq!(
            props.artifact_store.location,
            Intrinsic::reference("ServerlessDeploymentBucket")
        );
    }

    #[test]
    fn test_source_output_feeds_build_input() {
        let doc = document(Value::Null, "prod");
        let props = &doc.resources.pipeline.properties;

        let source = &props.stage(SOURCE_STAGE).unwrap().actions[0];
        let build = &props.stage(BUILD_STAGE).unwrap().actions[0];

        assert_eq!(source.output_artifacts.len(), 1);
        assert_eq!(source.output_artifacts[0].name, "orders-api");
        assert_eq!(build.input_artifacts, source.output_artifacts);
    }

    #[test]
    fn test_build_stage_snapshot() {
        let doc = document(Value::Null, "prod");
        let stage = serde_json::to_string_pretty(&doc.resources.pipeline.properties.stages[1])
            .unwrap();

        insta::assert_snapshot!(stage, @r#"
{
  "Name": "Build",
  "Actions": [
    {
      "Name": "CodeBuild",
      "InputArtifacts": [
        {
          "Name": "orders-api"
        }
      ],
      "ActionTypeId": {
        "Category": "Build",
        "Owner": "AWS",
        "Version": "1",
        "Provider": "CodeBuild"
      },
      "OutputArtifacts": [
        {
          "Name": "orders-apiBuild"
        }
      ],
      "Configuration": {
        "ProjectName": {
          "Ref": "Build"
        }
      },
      "RunOrder": "1"
    }
  ]
}
"#);
    }
}

mod environment_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_env_vars_follow_stage_variable() {
        let doc = document(json!({"envVars": [{"FOO": "bar"}, {"BAZ": "qux"}]}), "dev");
        let value = doc.to_value().unwrap();

        assert_eq!(
            value["Resources"]["Build"]["Properties"]["Environment"]["EnvironmentVariables"],
            json!([
                {"Name": "STAGE", "Value": "dev"},
                {"Name": "FOO", "Value": "bar"},
                {"Name": "BAZ", "Value": "qux"}
            ])
        );
    }

    #[test]
    fn test_no_env_vars_leaves_only_stage() {
        let doc = document(Value::Null, "prod");
        let vars = &doc.resources.build.properties.environment.environment_variables;
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "STAGE");
        assert_eq!(vars[0].value, "prod");
    }

    #[test]
    fn test_source_configuration_uses_resolved_options() {
        let config = ConfigResolver::new("orders-api")
            .resolve_value(
                &json!({"gitOwner": "acme", "githubOAuthToken": "tkn", "gitBranch": "develop"}),
                &StageContext::new("prod").with_override("prod", "release"),
            )
            .unwrap();
        let value = ResourceGraphBuilder::new("orders-api", "prod", &config)
            .build()
            .to_value()
            .unwrap();

        assert_eq!(
            value["Resources"]["Pipeline"]["Properties"]["Stages"][0]["Actions"][0]["Configuration"],
            json!({
                "Owner": "acme",
                "Repo": "orders-api",
                "Branch": "release",
                "OAuthToken": "tkn"
            })
        );
    }

    #[test]
    fn test_empty_owner_passes_through() {
        let value = document(Value::Null, "prod").to_value().unwrap();
        let config =
            &value["Resources"]["Pipeline"]["Properties"]["Stages"][0]["Actions"][0]["Configuration"];
        assert_eq!(config["Owner"], "");
        assert_eq!(config["OAuthToken"], "");
    }
}

mod determinism_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rendering_is_byte_identical() {
        let user = json!({"gitOwner": "acme", "envVars": [{"A": "1"}, {"B": "2"}]});
        let first = render::to_yaml(&document(user.clone(), "prod")).unwrap();
        let second = render::to_yaml(&document(user, "prod")).unwrap();

        assert_eq!(first, second);
        assert_eq!(render::checksum(&first), render::checksum(&second));
    }

    proptest! {
        #[test]
        fn test_builder_is_idempotent(
            service in "[a-z][a-z0-9-]{0,15}",
            stage in "[a-z][a-z0-9]{0,7}",
            vars in proptest::collection::vec(("[A-Z][A-Z0-9_]{0,7}", "[ -~]{0,12}"), 0..5),
        ) {
            let env_vars: Vec<Value> = vars
                .iter()
                .map(|(name, value)| {
                    let mut entry = serde_json::Map::new();
                    entry.insert(name.clone(), json!(value));
                    Value::Object(entry)
                })
                .collect();
            let user = json!({"envVars": env_vars});
            let resolver = ConfigResolver::new(&service);
            let context = StageContext::new(stage.clone());

            let first = resolver.resolve_value(&user, &context).unwrap();
            let second = resolver.resolve_value(&user, &context).unwrap();
            let a = render::to_json(&ResourceGraphBuilder::new(&service, &stage, &first).build()).unwrap();
            let b = render::to_json(&ResourceGraphBuilder::new(&service, &stage, &second).build()).unwrap();

            prop_assert_eq!(a, b);
            prop_assert_eq!(first.environment_variables.len(), vars.len());
        }
    }
}
