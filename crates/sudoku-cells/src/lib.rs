//! Locate a Sudoku grid in a photograph and cut it into 81 normalized cells.
//!
//! The pipeline is:
//!
//! 1. [`binarize`]: Gaussian blur, adaptive mean threshold, inversion.
//! 2. [`find_corners`]: the largest outer contour and its four extreme points.
//! 3. [`correct_perspective`]: warp that quad into an upright square whose
//!    edge is the longest detected side.
//! 4. Resize the square to the [`CalibrationTable`] resolution, optionally
//!    re-binarize it, then [`slice_cells`] into 28x28 cells.
//!
//! [`CellExtractor`] runs all of it from an `image::GrayImage`.
//!
//! ## Quickstart
//!
//! ```no_run
//! use sudoku_cells::{CellExtractor, CellExtractorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("puzzle.jpg")?.to_luma8();
//! let extractor = CellExtractor::new(CellExtractorParams::default())?;
//! let out = extractor.extract(&img)?;
//! println!("{} cells, corners {:?}", out.cells.len(), out.corners);
//! # Ok(())
//! # }
//! ```
//!
//! The corner finder trusts the largest contour. Clutter larger than the
//! puzzle (a table edge, a second puzzle) will be picked instead.

pub mod binarize;
pub mod calibration;
pub mod contour;
pub mod convert;
pub mod corners;
pub mod digit;
mod error;
pub mod io;
pub mod overlay;
pub mod perspective;
pub mod pipeline;
pub mod slicer;

pub use sudoku_cells_core as core;

pub use binarize::{adaptive_mean_threshold, binarize, BinarizeParams};
pub use calibration::{Band, CalibrationTable, CellRegion, GRID_SIZE};
pub use contour::{find_contours, ChainApprox, Contour, ContourParams};
pub use corners::{extreme_corners, find_corners, largest_contour};
pub use digit::{center_digit, DigitCenterParams};
pub use error::ExtractError;
pub use io::{CellExtractConfig, CellExtractReport, CellsIoError};
pub use perspective::{correct_perspective, correct_perspective_from_points, SquareView};
pub use pipeline::{CellExtraction, CellExtractor, CellExtractorParams, StageTimings, WarpSource};
pub use slicer::{slice_cells, CellImage, DEFAULT_CELL_SIZE};
pub use sudoku_cells_core::{GrayImage, QuadCorners};
