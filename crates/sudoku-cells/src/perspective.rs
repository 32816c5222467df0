//! Perspective corrector: warp the detected quad into an upright square.

use nalgebra::Point2;
use sudoku_cells_core::{
    homography_from_4pt, warp_perspective_gray, GrayImage, GrayImageView, Homography, QuadCorners,
};

use crate::ExtractError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Smallest quad area (px^2) accepted for warping.
const MIN_QUAD_AREA: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct SquareView {
    /// De-skewed square, `size x size` pixels.
    pub square: GrayImage,
    /// Longest detected side, before truncation.
    pub side: f32,
    pub corners: QuadCorners,
    /// Maps source-image coordinates into square coordinates.
    pub h_square_from_img: Homography,
}

impl SquareView {
    pub fn size(&self) -> usize {
        self.square.width
    }
}

/// Output edge length for a detected side length. Truncates, so a side of
/// `100.9` px gives a 100 px square.
#[inline]
pub fn square_size(side: f32) -> usize {
    if side.is_finite() && side > 0.0 {
        side as usize
    } else {
        0
    }
}

/// Destination corners for a square of the given side, in canonical order.
pub fn destination_square(side: f32) -> [Point2<f32>; 4] {
    let far = side - 1.0;
    [
        Point2::new(0.0, 0.0),
        Point2::new(far, 0.0),
        Point2::new(far, far),
        Point2::new(0.0, far),
    ]
}

/// Warp the region bounded by `corners` into a square sized to the longest
/// side of the quad.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, corners), fields(width = src.width, height = src.height))
)]
pub fn correct_perspective(
    src: &GrayImageView<'_>,
    corners: &QuadCorners,
) -> Result<SquareView, ExtractError> {
    let side = corners.longest_side();
    let size = square_size(side);
    if size < 2 || corners.area() < MIN_QUAD_AREA {
        return Err(ExtractError::DegenerateQuad);
    }

    let dst = destination_square(side);
    let h_square_from_img =
        homography_from_4pt(&corners.to_array(), &dst).ok_or(ExtractError::DegenerateQuad)?;
    let square = warp_perspective_gray(src, &h_square_from_img, size, size)
        .ok_or(ExtractError::DegenerateQuad)?;

    log::debug!("warped quad (side {side:.2}) into {size}x{size} square");

    Ok(SquareView {
        square,
        side,
        corners: *corners,
        h_square_from_img,
    })
}

/// Slice-based entry point: `points` must hold exactly four corners in
/// canonical order.
pub fn correct_perspective_from_points(
    src: &GrayImageView<'_>,
    points: &[Point2<f32>],
) -> Result<SquareView, ExtractError> {
    let pts: [Point2<f32>; 4] = points
        .try_into()
        .map_err(|_| ExtractError::CornerCount { got: points.len() })?;
    correct_perspective(src, &QuadCorners::from_array(pts))
}
