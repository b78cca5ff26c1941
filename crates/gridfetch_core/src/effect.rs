#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch one download batch over `urls`, indexed by position.
    StartBatch { urls: Vec<String> },
    /// Every artifact is settled; re-read the grid from storage.
    ReloadGrid,
}
