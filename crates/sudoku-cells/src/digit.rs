//! Optional digit centering for sliced cells.
//!
//! A bright digit usually sits off-center inside its calibrated region. This
//! step crops the digit's bounding box, surrounds it with a black margin
//! proportional to its size and scales it back to the cell size.

use image::Luma;
use imageproc::contours::find_contours;
use serde::{Deserialize, Serialize};
use sudoku_cells_core::{GrayImage, PixelRect};

use crate::convert::to_image;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitCenterParams {
    /// Pixels strictly above this value count as digit ink.
    pub threshold: u8,
    /// Margin added on each side, as a fraction of the digit box size.
    pub pad_frac: f32,
    /// Output edge length.
    pub size: usize,
}

impl Default for DigitCenterParams {
    fn default() -> Self {
        Self {
            threshold: 200,
            pad_frac: 0.35,
            size: 28,
        }
    }
}

/// Bounding box of the first traced foreground border in `cell`.
pub fn digit_bounds(cell: &GrayImage, threshold: u8) -> Option<PixelRect> {
    let mut mask = to_image(cell);
    for p in mask.pixels_mut() {
        *p = Luma([if p[0] > threshold { 255 } else { 0 }]);
    }

    let contours = find_contours::<u32>(&mask);
    let first = contours.first()?;
    let (mut x0, mut y0) = (u32::MAX, u32::MAX);
    let (mut x1, mut y1) = (0u32, 0u32);
    for p in &first.points {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some(PixelRect {
        x0: x0 as usize,
        y0: y0 as usize,
        x1: x1 as usize + 1,
        y1: y1 as usize + 1,
    })
}

/// Re-center the digit in `cell`. Cells without foreground are returned
/// unchanged.
pub fn center_digit(cell: &GrayImage, params: &DigitCenterParams) -> GrayImage {
    let Some(bounds) = digit_bounds(cell, params.threshold) else {
        return cell.clone();
    };

    let crop = cell.view().crop(bounds);
    let pad_y = (params.pad_frac * crop.height as f32) as usize;
    let pad_x = (params.pad_frac * crop.width as f32) as usize;
    let padded = crop.view().pad_constant(pad_y, pad_y, pad_x, pad_x, 0);
    padded.view().resize_bilinear(params.size, params.size)
}
