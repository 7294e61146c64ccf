use std::process::Command;

fn main() {
    let commit = std::env::var("GIT_COMMIT")
        .ok()
        .filter(|commit| !commit.is_empty())
        .or_else(|| command_output("git", &["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "dev".to_string());

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = command_output(&rustc, &["--version"]).unwrap_or_else(|| "rustc unknown".to_string());

    println!("cargo:rustc-env=HAPROXY_STATUS_COMMIT={commit}");
    println!("cargo:rustc-env=HAPROXY_STATUS_RUSTC={rustc_version}");
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
