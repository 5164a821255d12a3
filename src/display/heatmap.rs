//! Heatmap accumulation
//!
//! The controller submits one weighted sample per processed point. The
//! built-in accumulator is purely additive; rendering, decay, and
//! normalization belong to whichever widget consumes the grid.

use serde::{Deserialize, Serialize};

/// One weighted point submitted to a heatmap sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Consumer of gaze density samples.
pub trait HeatmapSink: Send {
    fn add(&mut self, sample: HeatmapSample);
}

/// Cell-grid accumulator over a fixed pixel area.
///
/// Samples add their value into the cell covering their coordinates.
/// Samples outside the area are dropped.
pub struct GridHeatmap {
    width: u32,
    height: u32,
    cell_size: u32,
    cols: usize,
    rows: usize,
    cells: Vec<f64>,
}

impl GridHeatmap {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let cols = width.div_ceil(cell_size) as usize;
        let rows = height.div_ceil(cell_size) as usize;
        Self {
            width,
            height,
            cell_size,
            cols,
            rows,
            cells: vec![0.0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Accumulated value of one cell. Zero outside the grid.
    pub fn cell_value(&self, col: usize, row: usize) -> f64 {
        if col >= self.cols || row >= self.rows {
            return 0.0;
        }
        self.cells[row * self.cols + col]
    }

    /// Largest accumulated cell value, for normalization by the renderer.
    pub fn max_value(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Reset every cell to zero.
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
    }
}

impl HeatmapSink for GridHeatmap {
    fn add(&mut self, sample: HeatmapSample) {
        if sample.x < 0.0
            || sample.y < 0.0
            || sample.x >= self.width as f64
            || sample.y >= self.height as f64
        {
            return;
        }
        let col = (sample.x / self.cell_size as f64) as usize;
        let row = (sample.y / self.cell_size as f64) as usize;
        self.cells[row * self.cols + col] += sample.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64) -> HeatmapSample {
        HeatmapSample { x, y, value: 1.0 }
    }

    #[test]
    fn test_sample_lands_in_covering_cell() {
        let mut heatmap = GridHeatmap::new(640, 480, 16);
        heatmap.add(sample(100.0, 200.0));

        assert_eq!(heatmap.cell_value(6, 12), 1.0);
        assert_eq!(heatmap.cell_value(0, 0), 0.0);
    }

    #[test]
    fn test_samples_accumulate_additively() {
        let mut heatmap = GridHeatmap::new(640, 480, 16);
        heatmap.add(sample(8.0, 8.0));
        heatmap.add(sample(9.0, 9.0));
        heatmap.add(HeatmapSample {
            x: 10.0,
            y: 10.0,
            value: 0.5,
        });

        assert_eq!(heatmap.cell_value(0, 0), 2.5);
        assert_eq!(heatmap.max_value(), 2.5);
    }

    #[test]
    fn test_out_of_bounds_samples_are_dropped() {
        let mut heatmap = GridHeatmap::new(640, 480, 16);
        heatmap.add(sample(-1.0, 10.0));
        heatmap.add(sample(10.0, 480.0));
        heatmap.add(sample(10_000.0, 10.0));

        assert_eq!(heatmap.max_value(), 0.0);
    }

    #[test]
    fn test_grid_covers_partial_trailing_cells() {
        let heatmap = GridHeatmap::new(100, 50, 16);
        assert_eq!(heatmap.cols(), 7);
        assert_eq!(heatmap.rows(), 4);

        let mut heatmap = heatmap;
        heatmap.add(sample(99.0, 49.0));
        assert_eq!(heatmap.cell_value(6, 3), 1.0);
    }

    #[test]
    fn test_reset_clears_accumulation() {
        let mut heatmap = GridHeatmap::new(64, 64, 8);
        heatmap.add(sample(4.0, 4.0));
        heatmap.reset();
        assert_eq!(heatmap.max_value(), 0.0);
    }
}
