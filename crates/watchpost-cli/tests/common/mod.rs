use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_watchpost"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Initialize the data dir with the test admin credentials.
pub fn init(data_dir: &Path) {
    run_cli_success(
        &[
            "init",
            "--username",
            "admin",
            "--password",
            "correct-pass",
            "--base-url",
            "https://cams.example.net/view",
        ],
        data_dir,
    );
}

/// Issue a link and return the token id embedded in the printed URL.
pub fn issue_link(data_dir: &Path, multi: bool) -> String {
    let mut args = vec!["link", "create"];
    if multi {
        args.push("--multi");
    }
    let stdout = run_cli_success(&args, data_dir);

    let url = stdout.lines().next().expect("link create prints a URL");
    url.split("token=")
        .nth(1)
        .expect("URL carries a token parameter")
        .to_string()
}
