/// Square-cell grid geometry.
///
/// The cell size depends on the container width, so it is cached together
/// with the inputs it was derived from and recomputed whenever the width or
/// the column count changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub columns: u32,
    pub spacing: f32,
    pub inset_left: f32,
    pub inset_right: f32,
    cached: Option<CachedSize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedSize {
    width: f32,
    columns: u32,
    size: f32,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self::new(3)
    }
}

impl CellLayout {
    pub fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
            spacing: 1.0,
            inset_left: 0.0,
            inset_right: 0.0,
            cached: None,
        }
    }

    /// Edge length of one cell for a container `view_width` wide.
    pub fn cell_size(&mut self, view_width: f32) -> f32 {
        if let Some(cached) = self.cached {
            if cached.width == view_width && cached.columns == self.columns {
                return cached.size;
            }
        }
        let size = compute_cell_size(
            view_width,
            self.columns,
            self.spacing,
            self.inset_left + self.inset_right,
        );
        self.cached = Some(CachedSize {
            width: view_width,
            columns: self.columns,
            size,
        });
        size
    }

    /// Last computed size, if any.
    pub fn cached_size(&self) -> Option<f32> {
        self.cached.map(|c| c.size)
    }
}

/// `(width - insets - (columns * spacing - 1)) / columns`, never negative.
pub fn compute_cell_size(view_width: f32, columns: u32, spacing: f32, insets: f32) -> f32 {
    let columns = columns.max(1) as f32;
    let empty_space = insets + (columns * spacing - 1.0);
    ((view_width - empty_space) / columns).max(0.0)
}
