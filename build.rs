use std::path::Path;
use std::process::Command;

/// Bakes `git describe` output into `--version`; falls back to "unknown"
/// outside a checkout or without git.
fn main() {
    let describe = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        .filter(|desc| !desc.is_empty());

    println!(
        "cargo:rustc-env=FINGERPAINT_GIT_HASH={}",
        describe.as_deref().unwrap_or("unknown")
    );
    println!("cargo:rerun-if-changed=build.rs");

    let head = Path::new(".git/HEAD");
    if head.is_file() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}
