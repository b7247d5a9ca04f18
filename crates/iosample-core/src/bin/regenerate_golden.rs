//! Rewrites `tests/golden/<case>/expected_report.json` from each case's
//! `input.hex`.
//!
//! Run with `cargo run -p iosample-core --bin regenerate_golden` after a
//! deliberate report change, then review the fixture diff. The workspace root
//! is located from the crate manifest, so the working directory does not
//! matter. Reports label their input relative to the workspace root.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use iosample_core::{HexSource, decode_source};

const GOLDEN_DIR: &str = "tests/golden";
const INPUT_FILE: &str = "input.hex";
const EXPECTED_FILE: &str = "expected_report.json";

fn main() -> ExitCode {
    if let Err(err) = run(&workspace_root()) {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn run(root: &Path) -> Result<(), String> {
    for case in golden_cases(root)? {
        let json = render_report(root, &case)?;
        let output = root.join(&case).join(EXPECTED_FILE);
        fs::write(&output, json)
            .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
        println!("regenerated {}", case.display());
    }
    Ok(())
}

/// Case directories relative to `root`, sorted by name.
fn golden_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let dir = root.join(GOLDEN_DIR);
    let entries =
        fs::read_dir(&dir).map_err(|err| format!("failed to read {}: {}", dir.display(), err))?;

    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        if entry.path().join(INPUT_FILE).is_file() {
            cases.push(Path::new(GOLDEN_DIR).join(entry.file_name()));
        }
    }
    cases.sort();
    Ok(cases)
}

fn render_report(root: &Path, case: &Path) -> Result<String, String> {
    let label = case.join(INPUT_FILE);
    let input = root.join(&label);
    let source = HexSource::open(&input)
        .map_err(|err| format!("failed to open {}: {}", input.display(), err))?;
    let report = decode_source(&label.display().to_string(), source)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    serde_json::to_string(&report).map_err(|err| format!("JSON serialization failed: {}", err))
}
