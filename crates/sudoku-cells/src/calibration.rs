//! Calibration table: where each of the 81 cells lies in the de-skewed square.
//!
//! A table is only valid for the square resolution it was calibrated
//! against, so the resolution is stored with the bands and the pipeline
//! resizes the square to it before slicing.

use serde::{Deserialize, Serialize};
use sudoku_cells_core::PixelRect;

use crate::ExtractError;

/// Cells per side of a Sudoku grid.
pub const GRID_SIZE: usize = 9;

/// Half-open pixel range `[start, end)` along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub start: u32,
    pub end: u32,
}

impl Band {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One cell's pixel rectangle, addressed by grid row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRegion {
    pub row: usize,
    pub col: usize,
    pub rows: Band,
    pub cols: Band,
}

impl CellRegion {
    pub fn rect(&self) -> PixelRect {
        PixelRect {
            x0: self.cols.start as usize,
            y0: self.rows.start as usize,
            x1: self.cols.end as usize,
            y1: self.rows.end as usize,
        }
    }
}

/// Row and column bands for a square image of `resolution x resolution`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationTable {
    pub resolution: u32,
    pub rows: [Band; GRID_SIZE],
    pub cols: [Band; GRID_SIZE],
}

const REFERENCE_RESOLUTION: u32 = 1000;

const REFERENCE_ROWS: [Band; GRID_SIZE] = [
    Band::new(15, 125),
    Band::new(125, 225),
    Band::new(235, 335),
    Band::new(340, 440),
    Band::new(455, 555),
    Band::new(570, 670),
    Band::new(680, 780),
    Band::new(775, 875),
    Band::new(890, 990),
];

const REFERENCE_COLS: [Band; GRID_SIZE] = [
    Band::new(30, 130),
    Band::new(130, 230),
    Band::new(240, 340),
    Band::new(355, 455),
    Band::new(455, 555),
    Band::new(565, 665),
    Band::new(670, 770),
    Band::new(800, 900),
    Band::new(890, 990),
];

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl CalibrationTable {
    /// Hand-calibrated table for a 1000 px square.
    pub fn reference() -> Self {
        Self {
            resolution: REFERENCE_RESOLUTION,
            rows: REFERENCE_ROWS,
            cols: REFERENCE_COLS,
        }
    }

    /// Evenly spaced 9x9 bands covering the whole square.
    pub fn uniform(resolution: u32) -> Self {
        let bands = std::array::from_fn(|i| {
            let start = (i as u64 * resolution as u64 / GRID_SIZE as u64) as u32;
            let end = ((i as u64 + 1) * resolution as u64 / GRID_SIZE as u64) as u32;
            Band::new(start, end)
        });
        Self {
            resolution,
            rows: bands,
            cols: bands,
        }
    }

    /// The same layout re-expressed for another square resolution.
    pub fn scaled_to(&self, resolution: u32) -> Self {
        let scale = |b: Band| {
            let s = |v: u32| {
                ((v as f64 * resolution as f64 / self.resolution.max(1) as f64).round() as u32)
                    .min(resolution)
            };
            Band::new(s(b.start), s(b.end))
        };
        Self {
            resolution,
            rows: self.rows.map(scale),
            cols: self.cols.map(scale),
        }
    }

    /// Every band must be non-empty and inside the square.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.resolution == 0 {
            return Err(ExtractError::InvalidCalibration(
                "resolution must be positive".to_string(),
            ));
        }
        for (axis, bands) in [("row", &self.rows), ("column", &self.cols)] {
            for (i, b) in bands.iter().enumerate() {
                if b.is_empty() {
                    return Err(ExtractError::InvalidCalibration(format!(
                        "{axis} band {i} is empty ({}..{})",
                        b.start, b.end
                    )));
                }
                if b.end > self.resolution {
                    return Err(ExtractError::InvalidCalibration(format!(
                        "{axis} band {i} ends at {} beyond resolution {}",
                        b.end, self.resolution
                    )));
                }
            }
        }
        Ok(())
    }

    /// The 81 regions in row-major order (rows outer, columns inner).
    pub fn regions(&self) -> Vec<CellRegion> {
        let mut out = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for (row, &rows) in self.rows.iter().enumerate() {
            for (col, &cols) in self.cols.iter().enumerate() {
                out.push(CellRegion {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_is_valid() {
        let t = CalibrationTable::reference();
        assert_eq!(t.resolution, 1000);
        t.validate().expect("valid");
        assert_eq!(t.rows[7], Band::new(775, 875));
        assert_eq!(t.cols[7], Band::new(800, 900));
    }

    #[test]
    fn regions_are_row_major() {
        let regions = CalibrationTable::reference().regions();
        assert_eq!(regions.len(), 81);
        assert_eq!((regions[0].row, regions[0].col), (0, 0));
        assert_eq!((regions[1].row, regions[1].col), (0, 1));
        assert_eq!((regions[9].row, regions[9].col), (1, 0));
        assert_eq!(
            regions[10].rect(),
            PixelRect {
                x0: 130,
                y0: 125,
                x1: 230,
                y1: 225
            }
        );
    }

    #[test]
    fn uniform_table_tiles_the_square() {
        let t = CalibrationTable::uniform(450);
        t.validate().expect("valid");
        assert_eq!(t.rows[0], Band::new(0, 50));
        assert_eq!(t.rows[8], Band::new(400, 450));
        for w in t.cols.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
    }

    #[test]
    fn scaling_preserves_relative_layout() {
        let t = CalibrationTable::reference().scaled_to(500);
        assert_eq!(t.resolution, 500);
        assert_eq!(t.rows[0], Band::new(8, 63));
        assert_eq!(t.cols[8], Band::new(445, 495));
        t.validate().expect("valid");
    }

    #[test]
    fn out_of_range_band_is_rejected() {
        let mut t = CalibrationTable::reference();
        t.cols[8] = Band::new(890, 1010);
        assert!(matches!(
            t.validate(),
            Err(ExtractError::InvalidCalibration(_))
        ));

        let mut t = CalibrationTable::reference();
        t.rows[2] = Band::new(300, 300);
        assert!(t.validate().is_err());
    }

    #[test]
    fn table_round_trips_through_json() {
        let t = CalibrationTable::uniform(270);
        let json = serde_json::to_string(&t).expect("serialize");
        let back: CalibrationTable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }
}
