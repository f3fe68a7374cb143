use std::{fs, path::PathBuf};

use tempfile::tempdir;

use glyphwork_cli::{Args, run};

/// Collects all .json templates from a directory
fn collect_templates(dir: PathBuf) -> Vec<PathBuf> {
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

/// Demos live at the workspace root, relative to the workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_templates(demos_path());

    assert!(!demos.is_empty(), "No templates found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(demo_path, output_path.clone())) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Output file should exist");
                assert!(svg.contains("<svg"), "{} produced no SVG", demo_path.display());
                assert!(svg.contains("data-layer=\"glyph-0\""));
            }
            Err(e) => failed.push((demo_path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} demos passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_templates(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error templates found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, output_path)).is_ok() {
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
}

#[test]
fn e2e_nested_demo_draws_every_tree() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("nested.svg");

    run(&args_for(&demos_path().join("nested.json"), output_path.clone()))
        .expect("nested demo should render");

    let svg = fs::read_to_string(output_path).unwrap();
    assert!(svg.contains("data-layer=\"glyph-2\""));
    assert!(svg.contains("class=\"nucleusGroup\""));
    assert!(svg.contains("class=\"markerGroup\""));
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[surface]\nwidth = 300.0\nheight = 200.0\n\n[style]\nbackground_color = \"#FAFAFA\"\n",
    )
    .unwrap();
    let output_path = temp_dir.path().join("polygon.svg");

    let mut args = args_for(&demos_path().join("polygon.json"), output_path.clone());
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("polygon demo should render");

    let svg = fs::read_to_string(output_path).unwrap();
    assert!(svg.contains("viewBox=\"0 0 300 200\""));
    assert!(svg.contains("<rect"));
}
