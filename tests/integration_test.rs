use std::process::Command;
use tempfile::TempDir;

const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Test that a plain `codedrill-icons -o <dir>` run writes the full default
/// icon set: four PNGs named by size, each decodable at its own dimensions.
#[test]
fn test_default_run_writes_full_icon_set() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let binary_path = get_binary_path();
    let output = Command::new(&binary_path)
        .arg("-o")
        .arg(&output_dir)
        .output()
        .expect("Failed to run codedrill-icons");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("codedrill-icons command failed");
    }

    for size in DEFAULT_SIZES {
        let icon_path = output_dir.join(format!("icon-{size}.png"));
        assert!(
            icon_path.exists(),
            "expected icon at: {}",
            icon_path.display()
        );

        let decoded = image::open(&icon_path).expect("icon should be a decodable image");
        assert_eq!(decoded.width(), size, "width of icon-{size}.png");
        assert_eq!(decoded.height(), size, "height of icon-{size}.png");
    }

    // Exactly the four default files, nothing else.
    let file_count = std::fs::read_dir(&output_dir)
        .expect("output directory should be readable")
        .count();
    assert_eq!(file_count, DEFAULT_SIZES.len());
}

/// Custom sizes replace the default set entirely.
#[test]
fn test_custom_sizes_override_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let binary_path = get_binary_path();
    let output = Command::new(&binary_path)
        .arg("-o")
        .arg(&output_dir)
        .arg("--sizes")
        .arg("20,64")
        .output()
        .expect("Failed to run codedrill-icons");

    assert!(output.status.success(), "codedrill-icons command failed");

    assert!(output_dir.join("icon-20.png").exists());
    assert!(output_dir.join("icon-64.png").exists());
    assert!(!output_dir.join("icon-16.png").exists());

    let file_count = std::fs::read_dir(&output_dir).unwrap().count();
    assert_eq!(file_count, 2);
}

/// An unparseable color string must fail the run before anything is written.
#[test]
fn test_invalid_color_fails_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let binary_path = get_binary_path();
    let output = Command::new(&binary_path)
        .arg("-o")
        .arg(&output_dir)
        .arg("--primary")
        .arg("not-a-color")
        .output()
        .expect("Failed to run codedrill-icons");

    assert!(
        !output.status.success(),
        "run should fail on an invalid color"
    );
    assert!(!output_dir.join("icon-16.png").exists());
}

/// Gets the path to the codedrill-icons binary (either from cargo build or target directory)
fn get_binary_path() -> std::path::PathBuf {
    // First try to find in target/debug
    let debug_path = std::path::Path::new("target/debug/codedrill-icons");
    if debug_path.exists() {
        return debug_path.to_path_buf();
    }

    // If not found, build it first
    let build_output = Command::new("cargo")
        .args(["build", "--bin", "codedrill-icons"])
        .output()
        .expect("Failed to run cargo build");

    if !build_output.status.success() {
        panic!(
            "Failed to build codedrill-icons binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    debug_path.to_path_buf()
}
