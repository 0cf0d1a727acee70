#![cfg(unix)]

mod common;

use common::{run_knife, stub_kubectl};

#[test]
fn apply_pipes_document_to_kubectl() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kubectl = stub_kubectl(dir.path(), 0);
    let output = run_knife(
        &["apply", "route", "hello", "-r", "hello-00001:100"],
        "",
        Some(kubectl.to_str().expect("utf8 path")),
    );
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let args = std::fs::read_to_string(dir.path().join("args.txt")).expect("args recorded");
    assert_eq!(args.trim(), "apply -f -");
    let stdin = std::fs::read_to_string(dir.path().join("stdin.txt")).expect("stdin recorded");
    let doc: serde_yaml::Value = serde_yaml::from_str(&stdin).expect("kubectl got yaml");
    assert_eq!(doc["kind"], "Route");
    assert_eq!(doc["spec"]["traffic"][0]["revisionName"], "hello-00001");
}

#[test]
fn each_verb_is_forwarded() {
    for verb in ["create", "replace", "patch", "delete"] {
        let dir = tempfile::tempdir().expect("tempdir");
        let kubectl = stub_kubectl(dir.path(), 0);
        let output = run_knife(
            &[verb, "service-account", "sa", "-s", "creds"],
            "",
            Some(kubectl.to_str().expect("utf8 path")),
        );
        assert!(output.status.success(), "{verb}");
        let args = std::fs::read_to_string(dir.path().join("args.txt")).expect("args recorded");
        assert_eq!(args.trim(), format!("{verb} -f -"));
    }
}

#[test]
fn override_may_carry_extra_arguments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kubectl = stub_kubectl(dir.path(), 0);
    let command = format!("'{}' --context dev", kubectl.display());
    let output = run_knife(&["apply", "build", "b"], "", Some(&command));
    assert!(output.status.success());
    let args = std::fs::read_to_string(dir.path().join("args.txt")).expect("args recorded");
    assert_eq!(args.trim(), "--context dev apply -f -");
}

#[test]
fn kubectl_failure_fails_the_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kubectl = stub_kubectl(dir.path(), 2);
    let output = run_knife(
        &["delete", "build", "b"],
        "",
        Some(kubectl.to_str().expect("utf8 path")),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("kubectl delete failed"), "{stderr}");
}
