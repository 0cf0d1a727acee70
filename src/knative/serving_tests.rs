use super::*;
use crate::knative::build::{with_build_template, with_git_source};

#[test]
fn simple_service_is_run_latest_with_default_configuration() {
    let service = new_run_latest_service("foo", &[]);
    assert_eq!(service.metadata.name, "foo");
    assert_eq!(service.type_meta.kind, "Service");
    assert_eq!(service.type_meta.api_version, "serving.knative.dev/v1alpha1");
    assert_eq!(
        service.spec.run_latest,
        Some(RunLatestType {
            configuration: ConfigurationSpec::default()
        })
    );
    assert!(service.spec.pinned.is_none());
}

#[test]
fn run_latest_service_carries_build_template() {
    let service = new_run_latest_service(
        "foo",
        &[with_build(vec![with_build_template("buildpack", &[], &[])])],
    );
    let template = service
        .spec
        .run_latest
        .and_then(|run_latest| run_latest.configuration.build)
        .and_then(|build| build.template)
        .expect("build template");
    assert_eq!(template.name, "buildpack");
}

#[test]
fn pinned_service_records_revision() {
    let service = new_pinned_service(
        "foo",
        "revision",
        &[with_build(vec![with_build_template("buildpack", &[], &[])])],
    );
    assert!(service.spec.run_latest.is_none());
    let pinned = service.spec.pinned.expect("pinned envelope");
    assert_eq!(pinned.revision_name, "revision");
    let template = pinned
        .configuration
        .build
        .and_then(|build| build.template)
        .expect("build template");
    assert_eq!(template.name, "buildpack");
}

#[test]
fn configuration_has_tags() {
    let configuration = new_configuration("conf", &[]);
    assert_eq!(configuration.type_meta.kind, "Configuration");
    assert_eq!(
        configuration.type_meta.api_version,
        "serving.knative.dev/v1alpha1"
    );
    assert_eq!(configuration.metadata.name, "conf");
}

#[test]
fn revision_template_sets_container() {
    let configuration = new_configuration(
        "conf",
        &[with_revision_template(
            "gcr.io/app",
            &["--port".to_string(), "8080".to_string()],
            &[("MODE".to_string(), "prod".to_string())],
        )],
    );
    let container = &configuration.spec.revision_template.spec.container;
    assert_eq!(container.image, "gcr.io/app");
    assert_eq!(container.args, vec!["--port", "8080"]);
    assert_eq!(container.env, vec![EnvVar::new("MODE", "prod")]);
}

#[test]
fn build_and_concurrency_are_independent_fields() {
    let configuration = new_configuration(
        "conf",
        &[
            with_build(vec![with_build_template("kaniko", &[], &[])]),
            with_single_concurrency(),
        ],
    );
    assert!(configuration.spec.build.is_some());
    assert_eq!(
        configuration.spec.revision_template.spec.concurrency_model,
        ConcurrencyModel::Single
    );
}

#[test]
fn last_concurrency_option_wins() {
    let configuration = new_configuration(
        "conf",
        &[with_single_concurrency(), with_multi_concurrency()],
    );
    assert_eq!(
        configuration.spec.revision_template.spec.concurrency_model,
        ConcurrencyModel::Multi
    );

    let configuration = new_configuration(
        "conf",
        &[with_multi_concurrency(), with_single_concurrency()],
    );
    assert_eq!(
        configuration.spec.revision_template.spec.concurrency_model,
        ConcurrencyModel::Single
    );
}

#[test]
fn image_pull_policy_always() {
    let configuration = new_configuration("conf", &[with_image_pull_policy_always()]);
    assert_eq!(
        configuration
            .spec
            .revision_template
            .spec
            .container
            .image_pull_policy,
        PullPolicy::Always
    );
}

#[test]
fn each_configuration_gets_its_own_build_copy() {
    let options = vec![with_build(vec![with_git_source("repo", "main")])];
    let mut first = new_configuration("a", &options);
    let second = new_configuration("b", &options);
    if let Some(build) = first.spec.build.as_mut() {
        build.service_account_name = "changed".to_string();
    }
    let second_build = second.spec.build.expect("build");
    assert!(second_build.service_account_name.is_empty());
}

#[test]
fn identical_inputs_build_equal_services() {
    let options = vec![
        with_revision_template("img", &[], &[]),
        with_build(vec![with_build_template("t", &[], &[])]),
        with_multi_concurrency(),
    ];
    assert_eq!(
        new_run_latest_service("svc", &options),
        new_run_latest_service("svc", &options)
    );
}
