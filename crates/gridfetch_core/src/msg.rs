#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The resource list is available; start downloading it.
    Start { urls: Vec<String> },
    /// The batch completion signal, delivered on the presentation thread.
    BatchCompleted,
    /// The grid's container changed width (points).
    Resized { width: f32 },
    /// Render tick; advances the loading indicator.
    Tick,
}
