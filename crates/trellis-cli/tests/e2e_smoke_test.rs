use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use trellis_cli::{Args, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        pretty: true,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_json_files(demos_path());

    assert!(!valid_demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.out.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if let Err(e) = run(&args_for(demo_path, &output_path)) {
            failed_demos.push((demo_path.clone(), e.to_string()));
            continue;
        }

        // The output must be a JSON array of typed elements
        let written = fs::read_to_string(&output_path).expect("Output file was not written");
        let value: Value = serde_json::from_str(&written).expect("Output is not valid JSON");
        let elements = value.as_array().expect("Output is not a JSON array");
        if elements.iter().any(|element| !element["type"].is_string()) {
            failed_demos.push((demo_path.clone(), "element without type".to_string()));
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.out.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_fenced_response_keeps_valid_edges() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("fenced_response.json");
    let output = temp_dir.path().join("fenced.json");

    run(&args_for(&input, &output)).expect("Fenced demo should succeed");

    let value: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let elements = value.as_array().unwrap();
    let rectangles = elements.iter().filter(|e| e["type"] == "rectangle").count();
    let arrows = elements.iter().filter(|e| e["type"] == "arrow").count();

    assert_eq!(rectangles, 3);
    // The edge to `missing-node` is dropped
    assert_eq!(arrows, 2);
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("does-not-exist.json");
    let output = temp_dir.path().join("out.json");

    let err = run(&args_for(&input, &output)).unwrap_err();
    assert!(matches!(err, trellis::TrellisError::Io(_)));
}
