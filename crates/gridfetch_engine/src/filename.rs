use std::path::{Path, PathBuf};

use crate::ArtifactIndex;

/// Extension of every stored artifact. Bytes are stored as received; the
/// extension is a naming convention shared with the grid reader.
pub const ARTIFACT_EXTENSION: &str = "jpg";

/// Storage key for the url at `index`: `{index}.jpg`.
pub fn artifact_filename(index: ArtifactIndex) -> String {
    format!("{index}.{ARTIFACT_EXTENSION}")
}

pub fn artifact_path(dir: &Path, index: ArtifactIndex) -> PathBuf {
    dir.join(artifact_filename(index))
}
