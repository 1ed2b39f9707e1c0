use std::path::Path;
use std::process::Command;

// Embeds the commit a binary was built from; `dompet --version` prints it.
fn main() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");

    for tracked in [".git/HEAD", ".git/refs/heads"] {
        let path = root.join(tracked);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
    println!("cargo:rerun-if-env-changed=DOMPET_BUILD_SHA");

    // packagers building from a tarball can pin the SHA themselves
    let sha = std::env::var("DOMPET_BUILD_SHA")
        .ok()
        .or_else(|| git_short_sha(&root))
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=DOMPET_BUILD_SHA={sha}");
}

fn git_short_sha(root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (out.status.success() && !sha.is_empty()).then_some(sha)
}
