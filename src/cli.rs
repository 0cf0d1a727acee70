//! CLI argument parsing.
//!
//! Every verb takes the same set of document kinds. `generate` prints the
//! document; the others pipe it to `kubectl <verb> -f -`.
use clap::{Args, Parser, Subcommand};
use knife::kubectl::Verb;
use knife::request::{
    BuildRequest, RevisionRequest, RouteRequest, ServiceAccountRequest, DEFAULT_GIT_REVISION,
};
use knife::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "knife",
    version,
    about = "Knife is a super simple program for working with knative yml",
    after_help = "Examples:\n  knife generate service hello gcr.io/me/hello --single\n  knife apply route hello -r hello-00001:90 -c hello:10:latest\n  knife generate secret creds -t git:github.com -t docker:gcr.io\n  KNIFE_KUBECTL='kubectl --context dev' knife apply build b -u https://github.com/me/app -t buildpack",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Output format for the generated document
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a knative object to stdout
    Generate(KindArgs),
    /// Apply a knative object with kubectl
    Apply(KindArgs),
    /// Create a knative object with kubectl
    Create(KindArgs),
    /// Replace a knative object with kubectl
    Replace(KindArgs),
    /// Patch a knative object with kubectl
    Patch(KindArgs),
    /// Delete a knative object with kubectl
    Delete(KindArgs),
}

impl Command {
    /// The kubectl verb, or `None` for `generate`.
    pub fn split(self) -> (Option<Verb>, Kind) {
        match self {
            Command::Generate(args) => (None, args.kind),
            Command::Apply(args) => (Some(Verb::Apply), args.kind),
            Command::Create(args) => (Some(Verb::Create), args.kind),
            Command::Replace(args) => (Some(Verb::Replace), args.kind),
            Command::Patch(args) => (Some(Verb::Patch), args.kind),
            Command::Delete(args) => (Some(Verb::Delete), args.kind),
        }
    }
}

#[derive(Args, Debug)]
pub struct KindArgs {
    #[command(subcommand)]
    pub kind: Kind,
}

#[derive(Subcommand, Debug)]
pub enum Kind {
    /// build
    Build(BuildArgs),
    /// configuration
    Configuration(RevisionArgs),
    /// service
    Service(ServiceArgs),
    /// route
    Route(RouteArgs),
    /// secret
    Secret(SecretArgs),
    /// service account
    ServiceAccount(ServiceAccountArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build name
    pub name: String,

    #[command(flatten)]
    pub build: BuildFlags,
}

/// Flags for an embedded or standalone build.
#[derive(Args, Debug, Clone)]
pub struct BuildFlags {
    /// url of a git repository to use as a source
    #[arg(long, short = 'u', value_name = "URL")]
    pub git_repo: Option<String>,

    /// revision (sha, tag, or branch) to use for the build
    #[arg(long, short = 'r', value_name = "REV", default_value = DEFAULT_GIT_REVISION)]
    pub git_revision: String,

    /// build template name
    #[arg(long, short = 't', value_name = "NAME")]
    pub template: Option<String>,

    /// build template argument in the form name=value
    #[arg(long, short = 'a', value_name = "NAME=VALUE", value_delimiter = ',')]
    pub template_arg: Vec<String>,

    /// build template environment variable in the form name=value
    #[arg(long, short = 'e', value_name = "NAME=VALUE", value_delimiter = ',')]
    pub template_env: Vec<String>,

    /// service account the build should run using
    #[arg(long, short = 's', value_name = "NAME")]
    pub service_account: Option<String>,
}

impl BuildFlags {
    pub fn into_request(self) -> BuildRequest {
        BuildRequest {
            git_repo: self.git_repo,
            git_revision: self.git_revision,
            template: self.template,
            template_args: self.template_arg,
            template_env: self.template_env,
            service_account: self.service_account,
        }
    }
}

#[derive(Args, Debug)]
pub struct RevisionArgs {
    /// Object name
    pub name: String,

    /// Container image
    pub image: String,

    /// Container arguments (put them after `--` if they start with a hyphen)
    pub args: Vec<String>,

    /// create a single threaded container
    #[arg(long)]
    pub single: bool,

    /// always pull a new version of the image on startup
    #[arg(long, alias = "imagePullPolicyAlways")]
    pub image_pull_policy_always: bool,

    /// container environment variable in the form name=value
    #[arg(long, value_name = "NAME=VALUE", value_delimiter = ',')]
    pub env: Vec<String>,

    #[command(flatten)]
    pub build: BuildFlags,
}

impl RevisionArgs {
    pub fn into_request(self) -> (String, RevisionRequest) {
        let request = RevisionRequest {
            image: self.image,
            args: self.args,
            env: self.env,
            single: self.single,
            always_pull: self.image_pull_policy_always,
            build: self.build.into_request(),
        };
        (self.name, request)
    }
}

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// pin the service to this revision instead of tracking the latest
    #[arg(long, value_name = "REVISION")]
    pub pin: Option<String>,

    #[command(flatten)]
    pub revision: RevisionArgs,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Route name
    pub name: String,

    /// add traffic to a revision (in format revisionName:percent or revisionName:percent:name)
    #[arg(long, short = 'r', value_name = "SPEC", value_delimiter = ',')]
    pub revision: Vec<String>,

    /// add traffic to a configuration (in format configurationName:percent or configurationName:percent:name)
    #[arg(long, short = 'c', value_name = "SPEC", value_delimiter = ',')]
    pub configuration: Vec<String>,
}

impl RouteArgs {
    pub fn into_request(self) -> (String, RouteRequest) {
        let request = RouteRequest {
            revisions: self.revision,
            configurations: self.configuration,
        };
        (self.name, request)
    }
}

#[derive(Args, Debug)]
pub struct SecretArgs {
    /// Secret name
    pub name: String,

    /// target this secret to a particular host, format git:host or docker:host
    #[arg(long, short = 't', value_name = "KIND:HOST", value_delimiter = ',')]
    pub target: Vec<String>,

    /// use an ssh private key from this file instead of prompting for a username and password
    #[arg(long, value_name = "PATH")]
    pub ssh_key: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ServiceAccountArgs {
    /// Service account name
    pub name: String,

    /// add a secret to the generated account
    #[arg(long, short = 's', value_name = "NAME", value_delimiter = ',')]
    pub secret: Vec<String>,
}

impl ServiceAccountArgs {
    pub fn into_request(self) -> (String, ServiceAccountRequest) {
        (
            self.name,
            ServiceAccountRequest {
                secrets: self.secret,
            },
        )
    }
}
