use std::fs;

use gridfetch_engine::{artifact_filename, ensure_output_dir, load_artifact, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("images").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_as_output_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("plain_file");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn atomic_write_stores_raw_bytes_and_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write(&artifact_filename(3), &[0xFF, 0xD8, 0x00, 0x01]).unwrap();
    assert_eq!(first.file_name().unwrap(), "3.jpg");
    assert_eq!(fs::read(&first).unwrap(), vec![0xFF, 0xD8, 0x00, 0x01]);

    let second = writer.write(&artifact_filename(3), b"again").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"again");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write(&artifact_filename(0), b"data").is_err());
    assert!(!file_path.with_file_name("0.jpg").exists());
    assert_eq!(fs::read(&file_path).unwrap(), b"x");
}

#[test]
fn writer_does_not_create_its_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    let writer = AtomicFileWriter::new(missing.clone());
    assert!(writer.write(&artifact_filename(0), b"data").is_err());
    assert!(!missing.exists());
}

#[test]
fn output_dir_check_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    ensure_output_dir(temp.path()).unwrap();
    ensure_output_dir(temp.path()).unwrap();
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn missing_artifact_loads_as_none() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    writer.write(&artifact_filename(1), b"one").unwrap();

    assert_eq!(load_artifact(temp.path(), 0).unwrap(), None);
    assert_eq!(load_artifact(temp.path(), 1).unwrap(), Some(b"one".to_vec()));
}
