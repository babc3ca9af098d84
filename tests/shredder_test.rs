use std::fs;
use std::io::Write;
use std::path::Path;

use diskscrub::common::CancelToken;
use diskscrub::shredder;

// ─── Single-file secure erase ─────────────────────────────────────────────────

#[test]
fn secure_delete_removes_file_and_reports_its_size() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("secret.db");
    fs::write(&path, vec![0x5Au8; 70_000]).unwrap(); // crosses chunk boundary

    let bytes = shredder::secure_delete_file(&path).unwrap();
    assert_eq!(bytes, 70_000);
    assert!(!path.exists());
}

#[test]
fn secure_delete_is_idempotent_on_absence() {
    let tmp = tempfile::tempdir().unwrap();
    let ghost = tmp.path().join("ghost.db");

    assert_eq!(shredder::secure_delete_file(&ghost).unwrap(), 0);
    // And again — absence stays a success.
    assert_eq!(shredder::secure_delete_file(&ghost).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn failed_overwrite_leaves_file_in_place() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("locked.db");
    fs::write(&path, vec![0x11u8; 256]).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

    // Root ignores file modes; only assert when the open actually fails.
    let denied = fs::OpenOptions::new().write(true).open(&path).is_err();
    let result = shredder::secure_delete_file(&path);
    // As root the shred succeeds and the file is gone; cleanup is best-effort.
    let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o644));

    if denied {
        result.unwrap_err();
        // Not unlinked: the caller can retry or inspect.
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 256);
    }
}

// ─── Recursive secure erase ───────────────────────────────────────────────────

fn populate(dir: &Path) {
    fs::create_dir_all(dir.join("nested/deeper")).unwrap();
    fs::write(dir.join("top.bin"), vec![1u8; 1000]).unwrap();
    fs::write(dir.join("nested/mid.bin"), vec![2u8; 2000]).unwrap();
    fs::write(dir.join("nested/deeper/leaf.bin"), vec![3u8; 3000]).unwrap();
}

#[test]
fn directory_shred_removes_tree_bottom_up() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("victim");
    populate(&dir);

    let report = shredder::secure_delete_dir(&dir, &CancelToken::new()).unwrap();
    assert_eq!(report.bytes_freed, 6000);
    assert_eq!(report.files_shredded, 3);
    assert!(report.failures.is_empty());
    assert!(!report.cancelled);
    assert!(!dir.exists());
}

#[test]
fn directory_shred_of_missing_path_is_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let report =
        shredder::secure_delete_dir(&tmp.path().join("gone"), &CancelToken::new()).unwrap();
    assert_eq!(report.bytes_freed, 0);
    assert_eq!(report.files_shredded, 0);
}

#[cfg(unix)]
#[test]
fn directory_shred_is_best_effort_per_file() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("mixed");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("readable.bin"), vec![0xAAu8; 500]).unwrap();
    let locked = dir.join("locked.bin");
    fs::write(&locked, vec![0xBBu8; 800]).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let denied = fs::OpenOptions::new().write(true).open(&locked).is_err();
    let report = shredder::secure_delete_dir(&dir, &CancelToken::new()).unwrap();

    if denied {
        // The readable file was freed, the locked one failed and survives;
        // bytes_freed counts only completed erasures.
        assert_eq!(report.bytes_freed, 500);
        assert_eq!(report.files_shredded, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("locked.bin"));
        assert!(locked.exists());
        // The directory still holds the failed file so it stays too.
        assert!(dir.exists());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    } else {
        // Running as root: everything goes.
        assert_eq!(report.bytes_freed, 1300);
        assert!(!dir.exists());
    }
}

#[cfg(unix)]
#[test]
fn directory_shred_unlinks_symlinks_without_touching_targets() {
    let outside = tempfile::tempdir().unwrap();
    let target = outside.path().join("precious.bin");
    fs::write(&target, vec![0x77u8; 4096]).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("linky");
    fs::create_dir(&dir).unwrap();
    std::os::unix::fs::symlink(&target, dir.join("link")).unwrap();
    fs::write(dir.join("own.bin"), vec![0u8; 100]).unwrap();

    let report = shredder::secure_delete_dir(&dir, &CancelToken::new()).unwrap();
    assert!(!dir.exists());
    // The symlink target is intact, byte for byte.
    assert_eq!(fs::read(&target).unwrap(), vec![0x77u8; 4096]);
    assert_eq!(report.bytes_freed, 100);
}

// ─── Ordinary delete ──────────────────────────────────────────────────────────

#[test]
fn ordinary_delete_accumulates_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("junk");
    populate(&dir);

    let report = shredder::delete_any(&dir).unwrap();
    assert_eq!(report.bytes_freed, 6000);
    assert_eq!(report.files_removed, 3);
    assert!(!dir.exists());
}

#[test]
fn ordinary_delete_of_missing_path_is_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let report = shredder::delete_any(&tmp.path().join("nope")).unwrap();
    assert_eq!(report.bytes_freed, 0);
}

#[test]
fn ordinary_delete_of_single_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("single.bin");
    let mut f = fs::File::create(&file).unwrap();
    f.write_all(&[9u8; 321]).unwrap();
    drop(f);

    let report = shredder::delete_any(&file).unwrap();
    assert_eq!(report.bytes_freed, 321);
    assert_eq!(report.files_removed, 1);
    assert!(!file.exists());
}
