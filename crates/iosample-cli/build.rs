use std::env;
use std::process::Command;

const COMMIT_OVERRIDE: &str = "IOSAMPLE_BUILD_COMMIT";
const SHORT_COMMIT_LEN: usize = 7;

// Feeds `iosample --version`: "<pkg version> (commit <sha>[-dirty], <date>)".
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={COMMIT_OVERRIDE}");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let commit = build_commit().unwrap_or_else(|| "unknown".to_string());
    let date = run_git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=IOSAMPLE_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=IOSAMPLE_BUILD_DATE={date}");
}

/// `IOSAMPLE_BUILD_COMMIT` wins, for builds outside a git checkout.
fn build_commit() -> Option<String> {
    if let Some(commit) = non_empty_env(COMMIT_OVERRIDE) {
        return Some(commit);
    }
    let short = format!("--short={SHORT_COMMIT_LEN}");
    let sha = non_empty_env("GITHUB_SHA")
        .map(|sha| sha.chars().take(SHORT_COMMIT_LEN).collect::<String>())
        .or_else(|| run_git(&["rev-parse", short.as_str(), "HEAD"]))?;
    let dirty = run_git(&["status", "--porcelain", "--untracked-files=no"]).is_some();
    Some(if dirty { format!("{sha}-dirty") } else { sha })
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}
