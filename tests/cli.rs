use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn magma(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_magma"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn snapshot_files(root: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(root.join("snapshots"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_init_track_snap_workflow() {
    let temp = tempfile::Builder::new().prefix("magma-").tempdir().unwrap();
    let app = temp.path().join("app");
    let data = temp.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("config.ini"), "[core]\n").unwrap();

    let init = magma(&app, &["init"]);
    assert!(init.status.success());
    assert!(stdout(&init).contains("Successfully initialized"));
    assert!(app.join("track").exists());
    assert!(app.join("ignore").exists());

    let track = magma(&app, &["track", data.to_str().unwrap()]);
    assert!(track.status.success());
    let again = magma(&app, &["track", data.to_str().unwrap()]);
    assert!(stdout(&again).contains("already exists"));
    assert_eq!(
        fs::read_to_string(app.join("track")).unwrap(),
        format!("{}\n", data.display())
    );

    let snap = magma(&app, &["snap", "baseline", "v1"]);
    assert!(snap.status.success());
    assert!(stdout(&snap).starts_with("Snapshot saved to "));

    let files = snapshot_files(&app);
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("_baseline_v1.json"));
    assert_eq!(files[0].len(), 8 + "_baseline_v1.json".len());
}

#[test]
fn test_snap_fails_without_output_on_missing_root() {
    let temp = tempfile::Builder::new().prefix("magma-").tempdir().unwrap();
    let app = temp.path().join("app");
    let data = temp.path().join("data");
    fs::create_dir(&data).unwrap();

    assert!(magma(&app, &["init"]).status.success());
    assert!(magma(&app, &["track", data.to_str().unwrap()]).status.success());
    fs::remove_dir(&data).unwrap();

    let snap = magma(&app, &["snap"]);
    assert!(!snap.status.success());
    assert!(snapshot_files(&app).is_empty());
}

#[test]
fn test_untrack() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    let data = temp.path().join("data");
    fs::create_dir(&data).unwrap();

    assert!(magma(&app, &["init"]).status.success());
    assert!(magma(&app, &["track", data.to_str().unwrap()]).status.success());

    let untrack = magma(&app, &["untrack", data.to_str().unwrap()]);
    assert!(untrack.status.success());
    assert_eq!(fs::read_to_string(app.join("track")).unwrap(), "");
}

#[test]
fn test_hash_prints_tree() {
    let temp = tempfile::Builder::new().prefix("magma-").tempdir().unwrap();
    let app = temp.path().join("app");
    let file = temp.path().join("hello.txt");
    fs::write(&file, "hello world").unwrap();

    let hash = magma(&app, &["hash", file.to_str().unwrap()]);
    assert!(hash.status.success());

    let value: serde_json::Value = serde_json::from_slice(&hash.stdout).unwrap();
    assert_eq!(
        value["hash"],
        "b94d27b9934d3e08a52e52d7da7dacffac484efe37a5380ee9088f7ace2efcde"
    );
    assert_eq!(value["path"], file.to_str().unwrap());
}

#[test]
fn test_track_warns_about_ignored_path() {
    let temp = tempfile::Builder::new().prefix("magma-").tempdir().unwrap();
    let app = temp.path().join("app");
    let dotfile = temp.path().join(".env");
    fs::write(&dotfile, "TOKEN=x\n").unwrap();

    assert!(magma(&app, &["init"]).status.success());
    let track = magma(&app, &["track", dotfile.to_str().unwrap()]);

    assert!(track.status.success());
    assert!(stdout(&track).contains("matches an ignore pattern"));
}
