//! Secrets carrying build credentials, annotated with the hosts they apply to.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::keys::next_suffixed_key;
use super::meta::{ObjectMeta, TypeMeta};
use super::opt::{apply_all, Opt};

pub const SECRET_API_VERSION: &str = "v1";
pub const SECRET_KIND: &str = "Secret";

pub const GIT_TARGET_PREFIX: &str = "build.knative.dev/git-";
pub const DOCKER_TARGET_PREFIX: &str = "build.knative.dev/docker-";

pub const USERNAME_KEY: &str = "username";
pub const PASSWORD_KEY: &str = "password";
pub const SSH_PRIVATE_KEY: &str = "ssh-privatekey";

pub type SecretOption = Opt<Secret>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SecretType {
    #[default]
    #[serde(rename = "Opaque")]
    Untyped,
    #[serde(rename = "kubernetes.io/basic-auth")]
    BasicAuth,
    #[serde(rename = "kubernetes.io/ssh-auth")]
    SshAuth,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    #[serde(rename = "type")]
    pub secret_type: SecretType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub string_data: BTreeMap<String, String>,
    /// Binary fields; base64 on the wire.
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        serialize_with = "encode_data",
        deserialize_with = "decode_data"
    )]
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.metadata.annotations
    }
}

/// Create an untyped Secret with empty field and annotation maps, then apply
/// `options` in order.
pub fn new_secret(name: &str, options: &[SecretOption]) -> Secret {
    let mut secret = Secret {
        type_meta: TypeMeta::new(SECRET_API_VERSION, SECRET_KIND),
        metadata: ObjectMeta::named(name),
        secret_type: SecretType::Untyped,
        string_data: BTreeMap::new(),
        data: BTreeMap::new(),
    };
    apply_all(&mut secret, options);
    secret
}

pub fn with_basic_auth(user: &str, pass: &str) -> SecretOption {
    let user = user.to_string();
    let pass = pass.to_string();
    Opt::new("basic-auth", move |secret: &mut Secret| {
        secret.secret_type = SecretType::BasicAuth;
        secret
            .string_data
            .insert(USERNAME_KEY.to_string(), user.clone());
        secret
            .string_data
            .insert(PASSWORD_KEY.to_string(), pass.clone());
    })
}

pub fn with_ssh_auth(private_key: &[u8]) -> SecretOption {
    let private_key = private_key.to_vec();
    Opt::new("ssh-auth", move |secret: &mut Secret| {
        secret.secret_type = SecretType::SshAuth;
        secret
            .data
            .insert(SSH_PRIVATE_KEY.to_string(), private_key.clone());
    })
}

/// Mark the secret as applying to a git host. Repeated targets get
/// `git-0`, `git-1`, ... without overwriting earlier ones.
pub fn with_git_target(host: &str) -> SecretOption {
    with_target("git-target", GIT_TARGET_PREFIX, host)
}

/// Mark the secret as applying to a docker registry host.
pub fn with_docker_target(host: &str) -> SecretOption {
    with_target("docker-target", DOCKER_TARGET_PREFIX, host)
}

fn with_target(label: &'static str, prefix: &'static str, host: &str) -> SecretOption {
    let host = host.to_string();
    Opt::new(label, move |secret: &mut Secret| {
        let annotations = &mut secret.metadata.annotations;
        let key = next_suffixed_key(annotations, prefix);
        annotations.insert(key, host.clone());
    })
}

fn encode_data<S: Serializer>(
    data: &BTreeMap<String, Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let encoded: BTreeMap<&str, String> = data
        .iter()
        .map(|(key, value)| (key.as_str(), STANDARD.encode(value)))
        .collect();
    encoded.serialize(serializer)
}

fn decode_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
    let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
    encoded
        .into_iter()
        .map(|(key, value)| {
            STANDARD
                .decode(value.as_bytes())
                .map(|bytes| (key, bytes))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
