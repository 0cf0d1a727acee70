use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Kind, RootArgs, SecretArgs};
use knife::credentials::prompt_basic_auth;
use knife::knative::{
    new_build, new_configuration, new_pinned_service, new_route, new_run_latest_service,
    new_secret, new_service_account,
};
use knife::kubectl::KubectlCommand;
use knife::request::{SecretAuth, SecretRequest};
use knife::Document;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let (verb, kind) = args.command.split();
    let document = build_document(kind)?;
    let rendered = document.render(args.output)?;
    tracing::debug!(
        kind = document.kind(),
        name = document.name(),
        bytes = rendered.len(),
        "document generated"
    );

    match verb {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write document to stdout")?;
            stdout.flush().context("flush stdout")?;
        }
        Some(verb) => {
            let kubectl = KubectlCommand::from_env()?;
            kubectl.run(verb, &rendered)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "knife=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_document(kind: Kind) -> Result<Document> {
    let document: Document = match kind {
        Kind::Build(args) => {
            let options = args.build.into_request().options()?;
            log_options("Build", &args.name, options.len());
            new_build(&args.name, &options).into()
        }
        Kind::Configuration(args) => {
            let (name, request) = args.into_request();
            let options = request.options()?;
            log_options("Configuration", &name, options.len());
            new_configuration(&name, &options).into()
        }
        Kind::Service(args) => {
            let pin = args.pin;
            let (name, request) = args.revision.into_request();
            let options = request.options()?;
            log_options("Service", &name, options.len());
            match pin {
                Some(revision) => new_pinned_service(&name, &revision, &options).into(),
                None => new_run_latest_service(&name, &options).into(),
            }
        }
        Kind::Route(args) => {
            let (name, request) = args.into_request();
            let options = request.options()?;
            log_options("Route", &name, options.len());
            new_route(&name, &options).into()
        }
        Kind::Secret(args) => secret_document(args)?,
        Kind::ServiceAccount(args) => {
            let (name, request) = args.into_request();
            let options = request.options();
            log_options("ServiceAccount", &name, options.len());
            new_service_account(&name, &options).into()
        }
    };
    Ok(document)
}

fn secret_document(args: SecretArgs) -> Result<Document> {
    // Reject bad targets before prompting for credentials.
    SecretRequest::target_options(&args.target)?;

    let auth = match &args.ssh_key {
        Some(path) => SecretAuth::Ssh {
            private_key: std::fs::read(path)
                .with_context(|| format!("read ssh key {}", path.display()))?,
        },
        None => {
            let credentials = prompt_basic_auth().context("read credentials")?;
            SecretAuth::Basic {
                username: credentials.username,
                password: credentials.password,
            }
        }
    };
    let request = SecretRequest {
        targets: args.target,
        auth,
    };
    let options = request.options()?;
    log_options("Secret", &args.name, options.len());
    Ok(new_secret(&args.name, &options).into())
}

fn log_options(kind: &str, name: &str, options: usize) {
    tracing::debug!(kind, name, options, "building document");
}
