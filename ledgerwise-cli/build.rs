use std::process::Command;

// Stamp `ledgerwise --version` with the git revision of the checkout, or "unknown"
// when building from a source tarball.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = std::path::Path::new(&manifest_dir).join("..");

    println!("cargo:rerun-if-changed=../.git/HEAD");

    let revision = Command::new("git")
        .arg("-C")
        .arg(&workspace_root)
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=LEDGERWISE_BUILD_SHA={revision}");
}
