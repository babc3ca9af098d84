use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn diskscrub() -> Command {
    Command::cargo_bin("diskscrub").unwrap()
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    diskscrub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("shred"))
        .stdout(predicate::str::contains("privacy"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    diskscrub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("diskscrub"));
}

// ─── Scan command ────────────────────────────────────────────────────────────

#[test]
fn test_scan_custom_root_json() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("appdata");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("blob.bin"), vec![0u8; 2048]).unwrap();

    let assert = diskscrub()
        .args(["scan", "--format", "json", "--root"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("total_size"))
        .stdout(predicate::str::contains("uncategorized"));

    // The JSON must parse and honor the totals invariant.
    let out = assert.get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["total_size"], 2048);
    assert_eq!(parsed["total_files"], 1);
}

#[test]
fn test_scan_empty_root_reports_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    diskscrub()
        .args(["scan", "--no-color", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing reclaimable"));
}

// ─── Clean command ───────────────────────────────────────────────────────────

#[test]
fn test_clean_scanned_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("cache");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("junk.bin"), vec![0u8; 512]).unwrap();

    diskscrub()
        .args(["clean", "--yes", "--no-color"])
        .arg(&root)
        .arg("--root")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("512 B"));
    assert!(!root.exists());
}

#[test]
fn test_clean_unscanned_path_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("cache");
    let victim = tmp.path().join("victim");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("junk.bin"), vec![0u8; 512]).unwrap();
    fs::create_dir(&victim).unwrap();
    fs::write(victim.join("keep.bin"), vec![0u8; 64]).unwrap();

    diskscrub()
        .args(["clean", "--yes"])
        .arg(&victim)
        .arg("--root")
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not reported by a scan"));
    assert!(victim.join("keep.bin").exists());
}

#[test]
fn test_clean_prompt_defaults_to_abort() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("cache");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("junk.bin"), vec![0u8; 128]).unwrap();

    diskscrub()
        .args(["clean"])
        .arg(&root)
        .arg("--root")
        .arg(&root)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted"));
    assert!(root.exists());
}

// ─── Shred command ───────────────────────────────────────────────────────────

#[test]
fn test_shred_rejects_system_path() {
    diskscrub()
        .args(["shred", "--yes", "/etc/hosts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the cleanup scope"));
}

#[test]
fn test_shred_file_in_temp() {
    // std::env::temp_dir is inside the default scope.
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("secret.bin");
    fs::write(&file, vec![0xAAu8; 4096]).unwrap();

    diskscrub()
        .args(["shred", "--yes", "--no-color"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("4.00 KB"));
    assert!(!file.exists());
}

#[test]
fn test_shred_missing_path_succeeds_with_zero() {
    let tmp = tempfile::tempdir().unwrap();
    diskscrub()
        .args(["shred", "--yes", "--no-color"])
        .arg(tmp.path().join("never-was"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 B"));
}

// ─── Privacy command ─────────────────────────────────────────────────────────

#[test]
fn test_privacy_list() {
    diskscrub()
        .args(["privacy", "list", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shell History (bash)"));
}

#[test]
fn test_privacy_list_json_order_is_stable() {
    let first = diskscrub()
        .args(["privacy", "list", "--format", "json"])
        .assert()
        .success();
    let second = diskscrub()
        .args(["privacy", "list", "--format", "json"])
        .assert()
        .success();

    let a: serde_json::Value =
        serde_json::from_slice(&first.get_output().stdout).unwrap();
    let b: serde_json::Value =
        serde_json::from_slice(&second.get_output().stdout).unwrap();
    let names = |v: &serde_json::Value| -> Vec<String> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(names(&a), names(&b));
}

#[test]
fn test_privacy_clean_rejects_unregistered_path() {
    let tmp = tempfile::tempdir().unwrap();
    let stray = tmp.path().join("stray.db");
    fs::write(&stray, b"data").unwrap();

    diskscrub()
        .args(["privacy", "clean", "--yes"])
        .arg(&stray)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not reported by a scan"));
    assert!(stray.exists());
}

// ─── Completions ─────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    diskscrub()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diskscrub"));
}
