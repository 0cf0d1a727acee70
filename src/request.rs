//! Per-invocation inputs and their translation into option lists.
//!
//! The CLI fills these structs from flags; nothing here reads global state, so
//! the same inputs always produce the same options.
use crate::encoding::{parse_key_values, parse_secret_target, parse_traffic_spec, SecretTarget};
use crate::error::ParseError;
use crate::knative::{
    with_basic_auth, with_build, with_build_template, with_docker_target, with_git_source,
    with_git_target, with_image_pull_policy_always, with_multi_concurrency,
    with_revision_template, with_secrets, with_service_account, with_single_concurrency,
    with_ssh_auth, with_traffic_to_configuration, with_traffic_to_revision, BuildSpecOption,
    ConfigurationOption, RouteOption, SecretOption, ServiceAccountOption,
};

pub const DEFAULT_GIT_REVISION: &str = "master";

/// Build pipeline inputs shared by build, configuration, and service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildRequest {
    pub git_repo: Option<String>,
    pub git_revision: String,
    pub template: Option<String>,
    /// `name=value` strings.
    pub template_args: Vec<String>,
    pub template_env: Vec<String>,
    pub service_account: Option<String>,
}

impl BuildRequest {
    pub fn has_template(&self) -> bool {
        self.template.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Git source, then template, then service account; each only when given.
    pub fn options(&self) -> Result<Vec<BuildSpecOption>, ParseError> {
        let mut options = Vec::new();
        if let Some(repo) = non_empty(&self.git_repo) {
            let revision = if self.git_revision.is_empty() {
                DEFAULT_GIT_REVISION
            } else {
                self.git_revision.as_str()
            };
            options.push(with_git_source(repo, revision));
        }
        if let Some(template) = non_empty(&self.template) {
            let args = parse_key_values(self.template_args.as_slice())?;
            let env = parse_key_values(self.template_env.as_slice())?;
            options.push(with_build_template(template, &args, &env));
        }
        if let Some(account) = non_empty(&self.service_account) {
            options.push(with_service_account(account));
        }
        Ok(options)
    }
}

/// Revision template inputs for configuration and service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevisionRequest {
    pub image: String,
    pub args: Vec<String>,
    /// Container environment as `name=value` strings.
    pub env: Vec<String>,
    pub single: bool,
    pub always_pull: bool,
    pub build: BuildRequest,
}

impl RevisionRequest {
    /// The build is embedded only when a template was named; concurrency is
    /// always set explicitly.
    pub fn options(&self) -> Result<Vec<ConfigurationOption>, ParseError> {
        let env = parse_key_values(self.env.as_slice())?;
        let mut options = vec![with_revision_template(&self.image, &self.args, &env)];
        if self.build.has_template() {
            options.push(with_build(self.build.options()?));
        }
        if self.single {
            options.push(with_single_concurrency());
        } else {
            options.push(with_multi_concurrency());
        }
        if self.always_pull {
            options.push(with_image_pull_policy_always());
        }
        Ok(options)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteRequest {
    /// Traffic specs pointing at revisions.
    pub revisions: Vec<String>,
    /// Traffic specs pointing at configurations.
    pub configurations: Vec<String>,
}

impl RouteRequest {
    /// Revision targets come before configuration targets.
    pub fn options(&self) -> Result<Vec<RouteOption>, ParseError> {
        let mut options = Vec::with_capacity(self.revisions.len() + self.configurations.len());
        for spec in &self.revisions {
            let traffic = parse_traffic_spec(spec)?;
            options.push(with_traffic_to_revision(
                &traffic.name,
                &traffic.target,
                traffic.percent,
            ));
        }
        for spec in &self.configurations {
            let traffic = parse_traffic_spec(spec)?;
            options.push(with_traffic_to_configuration(
                &traffic.name,
                &traffic.target,
                traffic.percent,
            ));
        }
        Ok(options)
    }
}

/// How the secret authenticates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecretAuth {
    Basic { username: String, password: String },
    Ssh { private_key: Vec<u8> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretRequest {
    /// `git:host` / `docker:host` strings.
    pub targets: Vec<String>,
    pub auth: SecretAuth,
}

impl SecretRequest {
    /// Validate target strings before any credentials are read.
    pub fn target_options(targets: &[String]) -> Result<Vec<SecretOption>, ParseError> {
        targets
            .iter()
            .map(|spec| {
                parse_secret_target(spec).map(|target| match target {
                    SecretTarget::Git(host) => with_git_target(&host),
                    SecretTarget::Docker(host) => with_docker_target(&host),
                })
            })
            .collect()
    }

    /// Targets first, then the auth option.
    pub fn options(&self) -> Result<Vec<SecretOption>, ParseError> {
        let mut options = Self::target_options(&self.targets)?;
        options.push(match &self.auth {
            SecretAuth::Basic { username, password } => with_basic_auth(username, password),
            SecretAuth::Ssh { private_key } => with_ssh_auth(private_key),
        });
        Ok(options)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceAccountRequest {
    pub secrets: Vec<String>,
}

impl ServiceAccountRequest {
    pub fn options(&self) -> Vec<ServiceAccountOption> {
        vec![with_secrets(self.secrets.as_slice())]
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
