use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use common::file::{FileSpec, write_file};
use common::index::{IndexSpec, stale_snapshot};
use predicates::prelude::predicate;
use rstest::{fixture, rstest};

mod common;

#[fixture]
fn workspace_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(
        dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    dir
}

#[fixture]
fn index_spec() -> IndexSpec {
    IndexSpec::default()
        .entry("1.txt", stale_snapshot())
        .entry("a/2.txt", stale_snapshot())
}

#[rstest]
fn verify_accepts_well_formed_index(workspace_dir: TempDir, index_spec: IndexSpec) {
    index_spec.write(workspace_dir.child(".git/index").path());

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "version 2, 2 entries, checksum ok",
        ));
}

#[test]
fn verify_accepts_empty_index() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    IndexSpec::default().write(dir.child(".git/index").path());

    common::run_index_stat(dir.path(), &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 entries, checksum ok"));
}

#[rstest]
fn verify_rejects_tampered_entries(workspace_dir: TempDir, index_spec: IndexSpec) {
    let index_path = workspace_dir.child(".git/index");
    let mut bytes = index_spec.build();
    // flip a bit in the first entry's mtime
    bytes[12 + 8] ^= 0x01;
    std::fs::create_dir_all(workspace_dir.child(".git").path()).unwrap();
    std::fs::write(index_path.path(), &bytes).unwrap();

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("checksum does not match"));
}

#[rstest]
fn verify_rejects_index_after_ignore(workspace_dir: TempDir, index_spec: IndexSpec) {
    index_spec.write(workspace_dir.child(".git/index").path());

    common::run_index_stat(workspace_dir.path(), &["ignore"])
        .assert()
        .success();

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checksum does not match"));
}

#[rstest]
fn verify_accepts_index_after_resync(workspace_dir: TempDir, index_spec: IndexSpec) {
    index_spec.write(workspace_dir.child(".git/index").path());

    common::run_index_stat(workspace_dir.path(), &["ignore"])
        .assert()
        .success();
    common::run_index_stat(workspace_dir.path(), &["resync"])
        .assert()
        .success();

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checksum ok"));
}

fn with_signature(signature: &[u8; 4]) -> Vec<u8> {
    let mut bytes = IndexSpec::default().build();
    bytes[..4].copy_from_slice(signature);
    bytes
}

#[rstest]
#[case::short_file(b"DIRC\0\0\0\x02".to_vec(), "too short")]
#[case::wrong_signature(with_signature(b"XIRC"), "invalid index file signature")]
fn verify_rejects_malformed_header(
    workspace_dir: TempDir,
    #[case] bytes: Vec<u8>,
    #[case] message: &str,
) {
    let index_path = workspace_dir.child(".git/index");
    std::fs::create_dir_all(workspace_dir.child(".git").path()).unwrap();
    std::fs::write(index_path.path(), &bytes).unwrap();

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}

#[rstest]
fn verify_rejects_truncated_entry_table(workspace_dir: TempDir, index_spec: IndexSpec) {
    let index_path = workspace_dir.child(".git/index");
    let mut bytes = index_spec.build();
    bytes[8..12].copy_from_slice(&3u32.to_be_bytes());
    std::fs::create_dir_all(workspace_dir.child(".git").path()).unwrap();
    std::fs::write(index_path.path(), &bytes).unwrap();

    common::run_index_stat(workspace_dir.path(), &["verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index entry 2"))
        .stderr(predicate::str::contains("runs past the end of the entry table"));
}
