use crate::layout::CellLayout;
use crate::view_model::{CellView, GridViewModel, TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Batch running; the loading indicator is visible and the grid is empty.
    Loading,
    /// Batch settled; cells resolve their artifacts from storage.
    Ready,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: Phase,
    urls: Vec<String>,
    layout: CellLayout,
    view_width: f32,
    cell_size: f32,
    spinner_frame: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: CellLayout, view_width: f32) -> Self {
        let mut state = Self {
            layout,
            ..Self::default()
        };
        state.resize(view_width);
        state.dirty = false;
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn view(&self) -> GridViewModel {
        let loading = self.phase == Phase::Loading;
        // The grid stays empty until every download has settled.
        let cells = if self.phase == Phase::Ready {
            self.urls
                .iter()
                .enumerate()
                .map(|(index, url)| CellView {
                    index,
                    url: url.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        GridViewModel {
            title: TITLE.to_string(),
            loading,
            spinner_frame: self.spinner_frame,
            columns: self.layout.columns,
            cell_size: self.cell_size,
            item_count: self.urls.len(),
            cells,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start_loading(&mut self, urls: Vec<String>) {
        self.urls = urls;
        self.phase = Phase::Loading;
        self.spinner_frame = 0;
        self.dirty = true;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.phase = Phase::Ready;
        self.dirty = true;
    }

    pub(crate) fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.dirty = true;
    }

    pub(crate) fn resize(&mut self, width: f32) {
        if width == self.view_width && self.layout.cached_size().is_some() {
            return;
        }
        self.view_width = width;
        self.cell_size = self.layout.cell_size(width);
        self.dirty = true;
    }
}

/// One url per line; surrounding whitespace, blank lines and `#` comments
/// are dropped. Order is preserved because it determines storage keys.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}
