//! Cell slicer: cut the de-skewed square into 81 fixed-size cell images.

use sudoku_cells_core::{GrayImage, GrayImageView};

use crate::calibration::CalibrationTable;
use crate::ExtractError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Edge length of a normalized cell, matching the usual digit classifiers.
pub const DEFAULT_CELL_SIZE: usize = 28;

/// One normalized cell, addressed by its grid position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellImage {
    pub row: usize,
    pub col: usize,
    pub image: GrayImage,
}

/// Crop every calibrated region of `square` and resize it to
/// `cell_size x cell_size`.
///
/// `square` must already be at the table's resolution. Cells are returned in
/// row-major order. Their content is not inspected.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(square, table), fields(size = square.width))
)]
pub fn slice_cells(
    square: &GrayImageView<'_>,
    table: &CalibrationTable,
    cell_size: usize,
) -> Result<Vec<CellImage>, ExtractError> {
    let expected = table.resolution as usize;
    if square.width != expected || square.height != expected {
        return Err(ExtractError::CalibrationMismatch {
            expected: table.resolution,
            width: square.width as u32,
            height: square.height as u32,
        });
    }
    table.validate()?;

    let cells: Vec<CellImage> = table
        .regions()
        .into_iter()
        .map(|region| {
            let crop = square.crop(region.rect());
            CellImage {
                row: region.row,
                col: region.col,
                image: crop.view().resize_bilinear(cell_size, cell_size),
            }
        })
        .collect();

    log::debug!("sliced {} cells of {cell_size}x{cell_size}", cells.len());
    Ok(cells)
}
