use crate::config::Palette;
use crate::grid::Grid;
use crate::surface::DrawSurface;

/// Paint the grid: background over the whole grid area, then one unit
/// square per live cell.
pub fn render_grid<S: DrawSurface + ?Sized>(surface: &mut S, grid: &Grid, palette: &Palette) {
    let (rows, cols) = grid.shape();
    surface.fill_rect(0, 0, cols as u32, rows as u32, palette.background);

    for (row, col) in grid.live_cells() {
        surface.fill_rect(col as u32, row as u32, 1, 1, palette.foreground);
    }
}
