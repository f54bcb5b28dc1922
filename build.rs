use std::process::Command;

/// Short hash of the checkout being built, or `unknown` outside a repository
fn build_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // `commitstamp --version` reports the commit the tool itself was built from
    println!("cargo:rustc-env=COMMITSTAMP_GIT_HASH={}", build_commit());

    // Packaging may pin a release version that differs from Cargo.toml
    let version = std::env::var("VERSION")
        .or_else(|_| std::env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "0.0.0".to_string());
    println!("cargo:rustc-env=COMMITSTAMP_VERSION={}", version);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=VERSION");
}
