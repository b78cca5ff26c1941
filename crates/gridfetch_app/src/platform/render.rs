use std::io::{self, Write};
use std::path::Path;

use engine_logging::engine_warn;
use gridfetch_core::GridViewModel;
use gridfetch_engine::load_artifact;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridReport {
    pub total: usize,
    pub shown: usize,
    pub missing: usize,
}

pub fn render_loading(out: &mut dyn Write, view: &GridViewModel) -> io::Result<()> {
    let frame = SPINNER[view.spinner_frame % SPINNER.len()];
    write!(
        out,
        "\r{} {} downloading {} images...",
        view.title, frame, view.item_count
    )?;
    out.flush()
}

/// Draws the grid, resolving each cell to the artifact stored for its index.
/// A missing artifact renders as "no image"; it is not an error.
pub fn render_grid(
    out: &mut dyn Write,
    view: &GridViewModel,
    image_dir: &Path,
) -> io::Result<GridReport> {
    let mut report = GridReport {
        total: view.cells.len(),
        ..GridReport::default()
    };

    writeln!(
        out,
        "\r{} ({} columns, {:.0}pt cells)",
        view.title, view.columns, view.cell_size
    )?;
    for row in view.rows() {
        let labels: Vec<String> = row
            .iter()
            .map(|cell| match image_size(image_dir, cell.index) {
                Some(len) => {
                    report.shown += 1;
                    format!("[{:>3}] {:>9}", cell.index, format_size(len))
                }
                None => {
                    report.missing += 1;
                    format!("[{:>3}] {:>9}", cell.index, "no image")
                }
            })
            .collect();
        writeln!(out, "{}", labels.join(" | "))?;
    }
    out.flush()?;
    Ok(report)
}

fn image_size(image_dir: &Path, index: usize) -> Option<usize> {
    match load_artifact(image_dir, index) {
        Ok(bytes) => bytes.map(|b| b.len()),
        Err(err) => {
            engine_warn!("Failed to read image {} from {:?}: {}", index, image_dir, err);
            None
        }
    }
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
