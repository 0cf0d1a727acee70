//! Serving documents: Configuration and Service (run-latest or pinned).
//!
//! Both service envelopes wrap the same `ConfigurationSpec`, so they share
//! `ConfigurationOption` with plain configurations.
use serde::{Deserialize, Serialize};

use super::build::{BuildSpec, BuildSpecOption};
use super::meta::{Container, EnvVar, ObjectMeta, PullPolicy, TypeMeta};
use super::opt::{apply_all, Opt};

pub const SERVING_API_VERSION: &str = "serving.knative.dev/v1alpha1";
pub const CONFIGURATION_KIND: &str = "Configuration";
pub const SERVICE_KIND: &str = "Service";

pub type ConfigurationOption = Opt<ConfigurationSpec>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: ConfigurationSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSpec {
    /// Embedded by value; every configuration owns its own copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSpec>,
    pub revision_template: RevisionTemplateSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevisionTemplateSpec {
    pub spec: RevisionSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    #[serde(default, skip_serializing_if = "ConcurrencyModel::is_unset")]
    pub concurrency_model: ConcurrencyModel,
    pub container: Container,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConcurrencyModel {
    #[default]
    #[serde(rename = "")]
    Unset,
    Single,
    Multi,
}

impl ConcurrencyModel {
    pub fn is_unset(&self) -> bool {
        matches!(self, ConcurrencyModel::Unset)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

/// Exactly one envelope is present for services built here.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_latest: Option<RunLatestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<PinnedType>,
}

/// Route traffic to the newest ready revision of the configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunLatestType {
    pub configuration: ConfigurationSpec,
}

/// Route traffic to one fixed revision.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedType {
    pub revision_name: String,
    pub configuration: ConfigurationSpec,
}

pub fn new_configuration(name: &str, options: &[ConfigurationOption]) -> Configuration {
    let mut configuration = Configuration {
        type_meta: TypeMeta::new(SERVING_API_VERSION, CONFIGURATION_KIND),
        metadata: ObjectMeta::named(name),
        spec: ConfigurationSpec::default(),
    };
    apply_all(&mut configuration.spec, options);
    configuration
}

/// Service that always tracks the latest revision.
pub fn new_run_latest_service(name: &str, options: &[ConfigurationOption]) -> Service {
    let mut configuration = ConfigurationSpec::default();
    apply_all(&mut configuration, options);
    let mut service = default_service(name);
    service.spec.run_latest = Some(RunLatestType { configuration });
    service
}

/// Service pinned to `revision_name` at construction time.
pub fn new_pinned_service(
    name: &str,
    revision_name: &str,
    options: &[ConfigurationOption],
) -> Service {
    let mut configuration = ConfigurationSpec::default();
    apply_all(&mut configuration, options);
    let mut service = default_service(name);
    service.spec.pinned = Some(PinnedType {
        revision_name: revision_name.to_string(),
        configuration,
    });
    service
}

fn default_service(name: &str) -> Service {
    Service {
        type_meta: TypeMeta::new(SERVING_API_VERSION, SERVICE_KIND),
        metadata: ObjectMeta::named(name),
        spec: ServiceSpec::default(),
    }
}

/// Embed a fresh build spec and apply `options` to it.
pub fn with_build(options: Vec<BuildSpecOption>) -> ConfigurationOption {
    Opt::new("build", move |spec: &mut ConfigurationSpec| {
        let mut build = BuildSpec::default();
        apply_all(&mut build, &options);
        spec.build = Some(build);
    })
}

/// Set the revision container's image, args, and environment. Replaces any
/// values an earlier revision template option set.
pub fn with_revision_template(
    image: &str,
    args: &[String],
    env: &[(String, String)],
) -> ConfigurationOption {
    let image = image.to_string();
    let args = args.to_vec();
    let env: Vec<EnvVar> = env
        .iter()
        .map(|(name, value)| EnvVar::new(name, value))
        .collect();
    Opt::new("revision-template", move |spec: &mut ConfigurationSpec| {
        let container = &mut spec.revision_template.spec.container;
        container.image = image.clone();
        container.args = args.clone();
        container.env = env.clone();
    })
}

pub fn with_single_concurrency() -> ConfigurationOption {
    with_concurrency("single-concurrency", ConcurrencyModel::Single)
}

pub fn with_multi_concurrency() -> ConfigurationOption {
    with_concurrency("multi-concurrency", ConcurrencyModel::Multi)
}

fn with_concurrency(label: &'static str, model: ConcurrencyModel) -> ConfigurationOption {
    Opt::new(label, move |spec: &mut ConfigurationSpec| {
        spec.revision_template.spec.concurrency_model = model;
    })
}

pub fn with_image_pull_policy_always() -> ConfigurationOption {
    Opt::new("image-pull-always", |spec: &mut ConfigurationSpec| {
        spec.revision_template.spec.container.image_pull_policy = PullPolicy::Always;
    })
}

#[cfg(test)]
#[path = "serving_tests.rs"]
mod tests;
