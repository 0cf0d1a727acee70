//! Shared helpers for driving the knife binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn knife_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_knife"))
}

/// Run knife with `args`, feeding `stdin` and clearing any kubectl override
/// from the caller's environment.
pub fn run_knife(args: &[&str], stdin: &str, kubectl: Option<&str>) -> Output {
    let mut command = Command::new(knife_bin());
    command
        .args(args)
        .env_remove("KNIFE_KUBECTL")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(kubectl) = kubectl {
        command.env("KNIFE_KUBECTL", kubectl);
    }
    let mut child = command.spawn().expect("spawn knife");
    if let Some(mut input) = child.stdin.take() {
        // knife may exit before reading stdin; a broken pipe here is fine.
        let _ = input.write_all(stdin.as_bytes());
    }
    child.wait_with_output().expect("wait for knife")
}

pub fn stdout_yaml(output: &Output) -> serde_yaml::Value {
    assert!(
        output.status.success(),
        "knife failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_yaml::from_slice(&output.stdout).expect("stdout is yaml")
}

/// Write a kubectl stand-in that records its arguments and stdin under `dir`.
#[cfg(unix)]
pub fn stub_kubectl(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("kubectl");
    let body = format!(
        "#!/bin/sh\necho \"$@\" > \"{args}\"\ncat > \"{stdin}\"\nexit {exit_code}\n",
        args = dir.join("args.txt").display(),
        stdin = dir.join("stdin.txt").display(),
    );
    std::fs::write(&script, body).expect("write stub kubectl");
    let mut permissions = std::fs::metadata(&script)
        .expect("stat stub kubectl")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&script, permissions).expect("chmod stub kubectl");
    script
}
