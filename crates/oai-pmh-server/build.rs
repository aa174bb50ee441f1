//! Build script embedding the package version and git revision.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let package = env!("CARGO_PKG_VERSION");
    let version = match git_revision() {
        Some(rev) => format!("{package} ({rev})"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=OAI_PMH_VERSION={version}");
}

/// Short commit hash, suffixed with `-dirty` when the tree has changes.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if rev.is_empty() {
        return None;
    }

    let dirty = Command::new("git")
        .args(["status", "--porcelain", "--untracked-files=no"])
        .output()
        .is_ok_and(|out| out.status.success() && !out.stdout.is_empty());

    Some(if dirty { format!("{rev}-dirty") } else { rev })
}
