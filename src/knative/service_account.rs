use serde::{Deserialize, Serialize};

use super::meta::{ObjectMeta, ObjectReference, TypeMeta};
use super::opt::{apply_all, Opt};

pub const SERVICE_ACCOUNT_API_VERSION: &str = "v1";
pub const SERVICE_ACCOUNT_KIND: &str = "ServiceAccount";

pub type ServiceAccountOption = Opt<ServiceAccount>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceAccount {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<ObjectReference>,
}

pub fn new_service_account(name: &str, options: &[ServiceAccountOption]) -> ServiceAccount {
    let mut account = ServiceAccount {
        type_meta: TypeMeta::new(SERVICE_ACCOUNT_API_VERSION, SERVICE_ACCOUNT_KIND),
        metadata: ObjectMeta::named(name),
        secrets: Vec::new(),
    };
    apply_all(&mut account, options);
    account
}

/// Reference each named secret, in order.
pub fn with_secrets<S: AsRef<str>>(names: &[S]) -> ServiceAccountOption {
    let references: Vec<ObjectReference> = names
        .iter()
        .map(|name| ObjectReference {
            name: name.as_ref().to_string(),
        })
        .collect();
    Opt::new("secrets", move |account: &mut ServiceAccount| {
        account.secrets.extend(references.iter().cloned());
    })
}
