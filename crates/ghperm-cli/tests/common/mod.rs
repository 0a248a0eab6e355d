#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use url::Url;

/// Path of a recording under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `file://` endpoint URL for a recording.
pub fn file_endpoint(path: &Path) -> String {
    Url::from_file_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Run the CLI binary with arguments.
///
/// Token and endpoint variables from the caller's environment are cleared
/// so tests never reach the network.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghperm"));
    cmd.args(args);
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("GHPERM_ENDPOINT");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
