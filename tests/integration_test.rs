use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXPECTED: &[(&str, u32)] = &[
    ("pwa-64x64.png", 64),
    ("pwa-192x192.png", 192),
    ("pwa-512x512.png", 512),
    ("maskable-icon-512x512.png", 512),
    ("apple-touch-icon.png", 180),
    ("favicon-32x32.png", 32),
    ("favicon-16x16.png", 16),
    ("favicon.ico", 32),
];

fn run_icon_gen(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pwa-icon-gen"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run pwa-icon-gen")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("pwa-icon-gen failed with status {}", output.status);
    }
}

/// Running with no arguments fills `./public` with exactly the standard set.
#[test]
fn test_default_run_into_empty_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_icon_gen(&[], temp_dir.path());
    assert_success(&output);

    let public = temp_dir.path().join("public");
    let mut names: Vec<String> = std::fs::read_dir(&public)
        .expect("public/ should exist")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let mut expected: Vec<String> = EXPECTED.iter().map(|(n, _)| n.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);

    for (name, size) in EXPECTED {
        let img = image::open(public.join(name)).expect("Failed to decode icon");
        assert_eq!((img.width(), img.height()), (*size, *size), "{name}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let progress = stdout.lines().filter(|l| l.contains("✓ Generated")).count();
    assert_eq!(progress, EXPECTED.len(), "one progress line per file:\n{stdout}");
    assert!(stdout.contains("All icons generated successfully"));
}

#[test]
fn test_custom_output_and_manifest() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("assets").join("icons");

    let output = run_icon_gen(
        &[
            "-o",
            out_dir.to_str().unwrap(),
            "--background",
            "white",
            "--manifest",
        ],
        temp_dir.path(),
    );
    assert_success(&output);

    let manifest = std::fs::read_to_string(out_dir.join("manifest-icons.json"))
        .expect("manifest-icons.json should exist");
    let parsed: serde_json::Value = serde_json::from_str(&manifest).expect("valid JSON");
    assert_eq!(parsed["theme_color"], "#ffffff");

    let img = image::open(out_dir.join("favicon-16x16.png"))
        .expect("Failed to decode icon")
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn test_unwritable_destination_exits_with_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();

    let output = run_icon_gen(&["-o", "blocker/public"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✗ Error"), "stderr: {stderr}");
    assert!(stderr.contains("blocker"), "stderr: {stderr}");
}

#[test]
fn test_invalid_color_is_a_usage_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_icon_gen(&["--accent", "not-a-color"], temp_dir.path());

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("public").exists());
}
