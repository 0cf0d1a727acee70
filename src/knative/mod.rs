//! Typed Knative documents and the options that build them.
//!
//! Each `new_*` builder starts from a defaulted document (tags set, name
//! assigned, collections empty) and folds the supplied options over it. No
//! builder touches process state, so builders can run concurrently.
pub mod build;
pub mod keys;
pub mod meta;
pub mod opt;
pub mod route;
pub mod secret;
pub mod service_account;
pub mod serving;

pub use build::{
    new_build, with_build_template, with_git_source, with_service_account, with_step, Build,
    BuildSpec, BuildSpecOption,
};
pub use keys::next_suffixed_key;
pub use opt::{apply_all, Opt};
pub use route::{
    new_route, with_traffic_to_configuration, with_traffic_to_revision, Destination, Route,
    RouteOption, TrafficTarget,
};
pub use secret::{
    new_secret, with_basic_auth, with_docker_target, with_git_target, with_ssh_auth, Secret,
    SecretOption, SecretType,
};
pub use service_account::{new_service_account, with_secrets, ServiceAccount, ServiceAccountOption};
pub use serving::{
    new_configuration, new_pinned_service, new_run_latest_service, with_build,
    with_image_pull_policy_always, with_multi_concurrency, with_revision_template,
    with_single_concurrency, ConcurrencyModel, Configuration, ConfigurationOption, Service,
};
