pub const TITLE: &str = "Mini Bootcamp Challenge";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridViewModel {
    pub title: String,
    pub loading: bool,
    pub spinner_frame: usize,
    pub columns: u32,
    pub cell_size: f32,
    pub item_count: usize,
    pub cells: Vec<CellView>,
}

/// Grid item `index`; its image lives at the artifact stored for `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub url: String,
}

impl GridViewModel {
    /// Cells grouped into rows of `columns`.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.columns.max(1) as usize)
    }
}
