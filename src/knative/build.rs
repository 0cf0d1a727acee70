//! Build pipeline documents (`build.knative.dev`).
use serde::{Deserialize, Serialize};

use super::meta::{Container, EnvVar, ObjectMeta, TypeMeta};
use super::opt::{apply_all, Opt};

pub const BUILD_API_VERSION: &str = "build.knative.dev/v1alpha1";
pub const BUILD_KIND: &str = "Build";

pub type BuildSpecOption = Opt<BuildSpec>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Build {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: BuildSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateInstantiationSpec>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Container>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitSourceSpec>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitSourceSpec {
    pub url: String,
    pub revision: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateInstantiationSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub value: String,
}

/// Create a Build named `name` and apply `options` to its spec in order.
pub fn new_build(name: &str, options: &[BuildSpecOption]) -> Build {
    let mut build = Build {
        type_meta: TypeMeta::new(BUILD_API_VERSION, BUILD_KIND),
        metadata: ObjectMeta::named(name),
        spec: BuildSpec::default(),
    };
    apply_all(&mut build.spec, options);
    build
}

/// Fetch sources from a git repository at `revision` (sha, tag, or branch).
pub fn with_git_source(url: &str, revision: &str) -> BuildSpecOption {
    let git = GitSourceSpec {
        url: url.to_string(),
        revision: revision.to_string(),
    };
    Opt::new("git-source", move |spec: &mut BuildSpec| {
        spec.source = Some(SourceSpec {
            git: Some(git.clone()),
        });
    })
}

/// Instantiate the named build template. Arguments and environment keep the
/// order given.
pub fn with_build_template(
    name: &str,
    args: &[(String, String)],
    env: &[(String, String)],
) -> BuildSpecOption {
    let template = TemplateInstantiationSpec {
        name: name.to_string(),
        arguments: args
            .iter()
            .map(|(name, value)| ArgumentSpec {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        env: env
            .iter()
            .map(|(name, value)| EnvVar::new(name, value))
            .collect(),
    };
    Opt::new("build-template", move |spec: &mut BuildSpec| {
        spec.template = Some(template.clone());
    })
}

/// Append a step container.
pub fn with_step(name: &str, image: &str, args: &[&str]) -> BuildSpecOption {
    let step = Container {
        name: name.to_string(),
        image: image.to_string(),
        args: args.iter().map(|arg| arg.to_string()).collect(),
        ..Container::default()
    };
    Opt::new("step", move |spec: &mut BuildSpec| {
        spec.steps.push(step.clone());
    })
}

pub fn with_service_account(name: &str) -> BuildSpecOption {
    let name = name.to_string();
    Opt::new("service-account", move |spec: &mut BuildSpec| {
        spec.service_account_name = name.clone();
    })
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
