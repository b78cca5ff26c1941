use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::artifact_path;
use crate::ArtifactIndex;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Prepares a batch destination: creates it if missing, rejects anything that
/// is not a directory, and checks that a file can be created inside it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |err: io::Error| PersistError::OutputDir(format!("{}: {err}", dir.display()));

    fs::create_dir_all(dir).map_err(unusable)?;
    if !fs::metadata(dir).map_err(unusable)?.is_dir() {
        return Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    // Anonymous file, gone as soon as it is dropped.
    tempfile::tempfile_in(dir).map_err(unusable)?;
    Ok(())
}

/// Writes `{dir}/{filename}` through a staged temp file that is renamed over
/// the target, so a reader sees either the previous artifact or the new one.
///
/// The directory must already exist; see [`ensure_output_dir`].
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}

/// Reads the artifact stored for `index`. A missing file means the fetch or
/// the write for that index failed, and maps to `Ok(None)`.
pub fn load_artifact(dir: &Path, index: ArtifactIndex) -> Result<Option<Vec<u8>>, PersistError> {
    match fs::read(artifact_path(dir, index)) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(PersistError::Io(err)),
    }
}
