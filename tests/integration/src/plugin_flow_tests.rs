//! End-to-end tests for the package hook
//!
//! Exercises the complete flow: service description -> hook dispatch ->
//! option resolution -> resource graph -> merge back into the description.

use cicd_core::{
    CicdPlugin, HookEvent, HookOutcome, Plugin, ServiceDescription, render, run_hooks,
};
use cicd_test_utils::{ServiceFile, ServiceFixture};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(CicdPlugin::new())]
}

fn package(value: Value) -> (ServiceDescription, Vec<HookOutcome>) {
    let mut service = ServiceDescription::from_value(value).unwrap();
    let results = run_hooks(&plugins(), HookEvent::BeforePackageInitialize, &mut service)
        .expect("hook should succeed");
    let outcomes = results.into_iter().map(|r| r.outcome).collect();
    (service, outcomes)
}

#[test]
fn test_full_flow_from_yaml_file() {
    let fixture = ServiceFixture::new("orders-api")
        .stage("prod")
        .git_owner("acme")
        .git_branch("develop")
        .branch_override("prod", "release")
        .env_var("FOO", "bar")
        .env_var("BAZ", "qux")
        .build();
    let file = ServiceFile::yaml(&fixture);

    let mut service = ServiceDescription::load(file.path()).unwrap();
    run_hooks(&plugins(), HookEvent::BeforePackageInitialize, &mut service).unwrap();

    let resources = &service.resources().unwrap()["Resources"];
    let source = &resources["Pipeline"]["Properties"]["Stages"][0]["Actions"][0];

    assert_eq!(
        source["Configuration"],
        json!({"Owner": "acme", "Repo": "orders-api", "Branch": "release", "OAuthToken": ""})
    );
    assert_eq!(
        resources["Build"]["Properties"]["Environment"]["EnvironmentVariables"],
        json!([
            {"Name": "STAGE", "Value": "prod"},
            {"Name": "FOO", "Value": "bar"},
            {"Name": "BAZ", "Value": "qux"}
        ])
    );
}

#[test]
fn test_excluded_stage_leaves_description_unchanged() {
    let original = ServiceFixture::new("orders-api")
        .stage("dev")
        .exclude_stage("dev")
        .exclude_stage("qa")
        .resources(json!({"Resources": {"Queue": {"Type": "AWS::SQS::Queue"}}}))
        .build();

    let (service, outcomes) = package(original.clone());

    assert_eq!(
        outcomes,
        vec![HookOutcome::Skipped {
            stage: "dev".to_string()
        }]
    );
    assert_eq!(service.into_value(), original);
}

#[rstest]
#[case("prod")]
#[case("staging")]
fn test_included_stage_adds_exactly_the_generated_resources(#[case] stage: &str) {
    let (service, outcomes) = package(
        ServiceFixture::new("orders-api")
            .stage(stage)
            .exclude_stage("dev")
            .resources(json!({"Resources": {"Queue": {"Type": "AWS::SQS::Queue"}}}))
            .build(),
    );

    assert!(matches!(outcomes.as_slice(), [HookOutcome::Applied { .. }]));

    let resources = service.resources().unwrap()["Resources"].as_object().unwrap();
    let mut names: Vec<&str> = resources.keys().map(String::as_str).collect();
    names.sort();
    assert_eq!(names, vec!["Build", "CICDRole", "Pipeline", "Queue"]);
}

#[test]
fn test_provider_stage_used_when_custom_stage_missing() {
    let (service, _) = package(
        ServiceFixture::new("orders-api")
            .provider_stage("staging")
            .build(),
    );
    let resources = &service.resources().unwrap()["Resources"];
    assert_eq!(resources["Build"]["Properties"]["Name"], "orders-api-staging");
}

#[test]
fn test_repackaging_is_idempotent() {
    let fixture = ServiceFixture::new("orders-api")
        .stage("prod")
        .env_var("FOO", "bar")
        .build();

    let (first, _) = package(fixture.clone());
    let (mut second, _) = package(fixture);
    run_hooks(&plugins(), HookEvent::BeforePackageInitialize, &mut second).unwrap();

    assert_eq!(
        render::to_json(first.as_value()).unwrap(),
        render::to_json(second.as_value()).unwrap()
    );
}

#[test]
fn test_other_events_do_not_generate() {
    let original = ServiceFixture::new("orders-api").stage("prod").build();
    let mut service = ServiceDescription::from_value(original.clone()).unwrap();

    for name in HookEvent::all_names() {
        let event = HookEvent::parse(name).unwrap();
        if event == HookEvent::BeforePackageInitialize {
            continue;
        }
        let results = run_hooks(&plugins(), event, &mut service).unwrap();
        assert!(results.is_empty(), "{} should not run the plugin", name);
    }

    assert_eq!(service.into_value(), original);
}

#[test]
fn test_malformed_env_var_aborts_without_partial_merge() {
    let original = ServiceFixture::new("orders-api")
        .stage("prod")
        .option("envVars", json!([{"FOO": "bar"}, {}]))
        .build();
    let mut service = ServiceDescription::from_value(original.clone()).unwrap();

    let err = run_hooks(&plugins(), HookEvent::BeforePackageInitialize, &mut service).unwrap_err();

    assert!(err.to_string().contains("envVars entry 1"), "got: {}", err);
    assert_eq!(service.into_value(), original);
}
