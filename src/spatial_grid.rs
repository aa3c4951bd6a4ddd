/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the container into a grid of square cells, allowing close-pair
 * queries against the 3x3 neighborhood of a cell instead of the whole
 * population.
 *
 * The grid is rebuilt from scratch every step: clear() then one insert()
 * per particle, always against post-move, post-boundary positions.
 * Coordinates outside the configured extent are clamped to the nearest
 * valid cell, so float drift at the walls never loses a particle.
 */

use glam::DVec2;

pub struct SpatialGrid {
    pub cell_size: f64,
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        let mut cells = Vec::with_capacity(cols * rows);

        for _ in 0..(cols * rows) {
            cells.push(Vec::new());
        }

        Self {
            cell_size,
            cols,
            rows,
            cells,
        }
    }

    // Convert a world position to clamped cell coordinates
    #[inline]
    fn cell_coords(&self, position: DVec2) -> (isize, isize) {
        let col = ((position.x / self.cell_size).floor() as isize).clamp(0, self.cols as isize - 1);
        let row = ((position.y / self.cell_size).floor() as isize).clamp(0, self.rows as isize - 1);
        (col, row)
    }

    // Empty all cell buckets, keeping their allocations for the next rebuild
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    // Insert a particle index at its current position
    #[inline]
    pub fn insert(&mut self, index: usize, position: DVec2) {
        let (col, row) = self.cell_coords(position);
        self.cells[row as usize * self.cols + col as usize].push(index);
    }

    // Particle indices within the 3x3 block of cells centered on the given
    // position, excluding `of` itself. Cells outside the grid are skipped.
    // The order is cell-major then insertion order, so a fixed insertion
    // order gives a deterministic result.
    pub fn nearby_indices(&self, of: usize, position: DVec2) -> Vec<usize> {
        let (col, row) = self.cell_coords(position);
        let mut result = Vec::with_capacity(16);

        for row_offset in -1..=1 {
            let check_row = row + row_offset;

            if check_row < 0 || check_row >= self.rows as isize {
                continue;
            }

            let row_base = check_row as usize * self.cols;

            for col_offset in -1..=1 {
                let check_col = col + col_offset;

                if check_col < 0 || check_col >= self.cols as isize {
                    continue;
                }

                for &index in &self.cells[row_base + check_col as usize] {
                    if index != of {
                        result.push(index);
                    }
                }
            }
        }

        result
    }
}
