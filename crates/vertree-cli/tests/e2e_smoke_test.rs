use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use vertree_cli::{Args, CliError};

/// Collects all .toml files from a directory of the workspace `demos/` tree
fn collect_history_files(dir: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(dir);
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Writes a config using fixed metrics so the tests do not depend on installed fonts
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        r##"
        [style]
        background_color = "white"

        [style.metrics]
        kind = "fixed"
        advance = 7.0
        line_height = 14.0
        "##,
    )
    .expect("Failed to write config");
    path
}

fn args(input: &Path, output: &Path, config: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: Some(config.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(temp_dir.path());

    let demos = collect_history_files("");
    assert!(!demos.is_empty(), "No demo histories found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let output = temp_dir.path().join(format!(
            "{}.svg",
            demo.file_stem().unwrap().to_string_lossy()
        ));

        match vertree_cli::run(&args(demo, &output, &config)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).expect("Output was not written");
                assert!(svg.contains("<svg"), "{} produced no SVG", demo.display());
            }
            Err(err) => failed.push((demo.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(temp_dir.path());

    let demos = collect_history_files("errors");
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    for demo in &demos {
        let output = temp_dir.path().join("error.svg");
        let result = vertree_cli::run(&args(demo, &output, &config));

        assert!(
            matches!(result, Err(CliError::History { .. })),
            "{} should fail with a history error, got {result:?}",
            demo.display()
        );
        assert!(!output.exists());
    }
}

#[test]
fn e2e_merge_demo_renders_every_version() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(temp_dir.path());
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/merges.toml");
    let output = temp_dir.path().join("merges.svg");

    vertree_cli::run(&args(&input, &output, &config)).expect("merges demo failed");

    let svg = fs::read_to_string(&output).unwrap();
    // Five versions plus the background
    assert_eq!(svg.matches("<rect").count(), 6);
    // The merge edge 3 -> 4 is dropped
    assert_eq!(svg.matches("<line").count(), 4);
    assert!(svg.contains("merged"));
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = write_config(temp_dir.path());
    let input = temp_dir.path().join("absent.toml");
    let output = temp_dir.path().join("out.svg");

    let result = vertree_cli::run(&args(&input, &output, &config));
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn e2e_unknown_root_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        "[layout]\nroot = 42\n\n[style.metrics]\nkind = \"fixed\"\nadvance = 7.0\nline_height = 14.0\n",
    )
    .unwrap();
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/linear.toml");
    let output = temp_dir.path().join("out.svg");

    let result = vertree_cli::run(&args(&input, &output, &config));
    assert!(matches!(result, Err(CliError::Vertree(_))));
}
