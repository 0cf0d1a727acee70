//! Hands a serialized document to kubectl on stdin.
//!
//! The command defaults to `kubectl` on PATH; `KNIFE_KUBECTL` replaces it with
//! a full command line (for example `kubectl --context staging`).
use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

pub const KUBECTL_ENV: &str = "KNIFE_KUBECTL";
const DEFAULT_KUBECTL: &str = "kubectl";

/// kubectl verbs that read a document from `-f -`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Apply,
    Create,
    Replace,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Apply => "apply",
            Verb::Create => "create",
            Verb::Replace => "replace",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KubectlCommand {
    pub argv: Vec<String>,
}

impl KubectlCommand {
    /// Resolve from `KNIFE_KUBECTL`, falling back to `kubectl` on PATH.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(KUBECTL_ENV).ok();
        Self::resolve(raw.as_deref())
    }

    pub fn resolve(raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) {
            let argv =
                shell_words::split(raw).with_context(|| format!("parse {KUBECTL_ENV}: {raw}"))?;
            if argv.is_empty() {
                return Err(anyhow!("{KUBECTL_ENV} is empty"));
            }
            return Ok(Self { argv });
        }
        let path = which::which(DEFAULT_KUBECTL)
            .with_context(|| format!("find {DEFAULT_KUBECTL} on PATH (or set {KUBECTL_ENV})"))?;
        Ok(Self {
            argv: vec![path.display().to_string()],
        })
    }

    /// Run `<argv> <verb> -f -` with `document` on stdin. kubectl's own output
    /// passes straight through to ours.
    pub fn run(&self, verb: Verb, document: &str) -> Result<()> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| anyhow!("kubectl command is empty"))?;

        tracing::debug!(program = %program, verb = %verb, "invoke kubectl");
        let start = Instant::now();
        let mut child = Command::new(program)
            .args(args)
            .args([verb.as_str(), "-f", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("spawn {program}"))?;

        // Dropping stdin closes the pipe before we wait.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(document.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait().with_context(|| format!("wait for {program}"))?;
        tracing::info!(
            verb = %verb,
            elapsed_ms = start.elapsed().as_millis(),
            document_bytes = document.len(),
            success = status.success(),
            "kubectl complete"
        );

        if !status.success() {
            return Err(anyhow!("kubectl {verb} failed with {status}"));
        }
        written.context("write document to kubectl stdin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_split_like_a_shell() {
        let command = KubectlCommand::resolve(Some("kubectl --context 'my dev'")).expect("resolve");
        assert_eq!(command.argv, vec!["kubectl", "--context", "my dev"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(KubectlCommand::resolve(Some("kubectl 'oops")).is_err());
    }

    #[test]
    fn verbs_render_as_kubectl_subcommands() {
        let verbs = [Verb::Apply, Verb::Create, Verb::Replace, Verb::Patch, Verb::Delete];
        let rendered: Vec<String> = verbs.iter().map(Verb::to_string).collect();
        assert_eq!(rendered, vec!["apply", "create", "replace", "patch", "delete"]);
    }

    #[cfg(unix)]
    #[test]
    fn run_passes_verb_and_stdin() {
        // $0 is the first argument after the script: the verb.
        let command = KubectlCommand {
            argv: vec![
                "sh".to_string(),
                "-c".to_string(),
                r#"test "$0 $1 $2" = "apply -f -" && grep -q "kind: Route""#.to_string(),
            ],
        };
        command
            .run(Verb::Apply, "kind: Route\n")
            .expect("stub kubectl succeeds");
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_status_not_broken_pipe() {
        // Exits without reading stdin; the document is large enough to fill the pipe.
        let command = KubectlCommand {
            argv: vec!["sh".to_string(), "-c".to_string(), "exit 4".to_string()],
        };
        let document = "x".repeat(1 << 20);
        let err = command.run(Verb::Apply, &document).unwrap_err();
        assert!(err.to_string().contains("kubectl apply failed"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_error() {
        let command = KubectlCommand {
            argv: vec!["sh".to_string(), "-c".to_string(), "cat >/dev/null; exit 3".to_string()],
        };
        let err = command.run(Verb::Delete, "kind: Secret\n").unwrap_err();
        assert!(err.to_string().contains("kubectl delete failed"), "{err}");
    }
}
