//! Corner finder: the four extreme points of the largest outer contour.
//!
//! The largest contour by area is assumed to be the puzzle boundary. Its
//! corners are picked by coordinate-sum / coordinate-difference extrema:
//!
//! - top-left: minimum `x + y`
//! - bottom-right: maximum `x + y`
//! - bottom-left: minimum `x - y`
//! - top-right: maximum `x - y`
//!
//! No convexity, area or aspect check is applied to the result. A noisy blob
//! still yields four well-defined points; callers that need accuracy must
//! validate the quad themselves.

use image::GrayImage;
use nalgebra::Point2;
use sudoku_cells_core::{coord_diff, coord_sum, extremum_index, ExtremumMode, QuadCorners};

use crate::contour::{find_contours, Contour, ContourParams};
use crate::ExtractError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Index of the contour with the largest area; first one wins on ties.
pub fn largest_contour(contours: &[Contour]) -> Option<usize> {
    extremum_index(contours, |c| c.area, ExtremumMode::Max)
}

/// Extreme corners of a point set, in canonical order.
///
/// Returns `None` for an empty point set.
pub fn extreme_corners(points: &[Point2<f32>]) -> Option<QuadCorners> {
    let top_left = extremum_index(points, coord_sum, ExtremumMode::Min)?;
    let bottom_right = extremum_index(points, coord_sum, ExtremumMode::Max)?;
    let bottom_left = extremum_index(points, coord_diff, ExtremumMode::Min)?;
    let top_right = extremum_index(points, coord_diff, ExtremumMode::Max)?;

    Some(QuadCorners {
        top_left: points[top_left],
        top_right: points[top_right],
        bottom_right: points[bottom_right],
        bottom_left: points[bottom_left],
    })
}

/// Find the corners of the largest outer contour in a binary image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(binary, params), fields(width = binary.width(), height = binary.height()))
)]
pub fn find_corners(
    binary: &GrayImage,
    params: &ContourParams,
) -> Result<QuadCorners, ExtractError> {
    let contours = find_contours(binary, params);
    let idx = largest_contour(&contours).ok_or(ExtractError::EmptyContourSet)?;
    let polygon = &contours[idx];

    log::debug!(
        "largest of {} contours: {} points, area {:.1}",
        contours.len(),
        polygon.len(),
        polygon.area
    );
    if polygon.len() < 4 {
        log::warn!(
            "largest contour has only {} points; corners will coincide",
            polygon.len()
        );
    }

    let corners = extreme_corners(&polygon.points).ok_or(ExtractError::EmptyContourSet)?;
    log::debug!("corners: {:?}", corners.to_array());
    Ok(corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn rect_outline(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, thickness: u32) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                let edge = x < x0 + thickness
                    || x + thickness > x1
                    || y < y0 + thickness
                    || y + thickness > y1;
                if edge {
                    img.put_pixel(x, y, Luma([255]));
                }
            }
        }
    }

    #[test]
    fn axis_aligned_rectangle_yields_exact_corners() {
        let mut img = GrayImage::new(100, 100);
        rect_outline(&mut img, 10, 10, 90, 90, 2);

        let q = find_corners(&img, &ContourParams::default()).expect("corners");
        assert_eq!(
            q.to_array(),
            [
                Point2::new(10.0, 10.0),
                Point2::new(90.0, 10.0),
                Point2::new(90.0, 90.0),
                Point2::new(10.0, 90.0),
            ]
        );
    }

    #[test]
    fn largest_region_wins_over_smaller_clutter() {
        let mut img = GrayImage::new(200, 200);
        rect_outline(&mut img, 3, 3, 20, 20, 18);
        rect_outline(&mut img, 40, 30, 180, 170, 3);

        let q = find_corners(&img, &ContourParams::default()).expect("corners");
        assert_eq!(q.top_left, Point2::new(40.0, 30.0));
        assert_eq!(q.bottom_right, Point2::new(180.0, 170.0));
    }

    #[test]
    fn empty_binary_image_is_an_error() {
        let img = GrayImage::new(50, 50);
        assert_eq!(
            find_corners(&img, &ContourParams::default()),
            Err(ExtractError::EmptyContourSet)
        );
    }

    #[test]
    fn rotated_square_corners_follow_canonical_order() {
        // Diamond: the extrema of x+y / x-y fall on its edges, the first
        // occurrence along the polygon is picked.
        let pts = vec![
            Point2::new(50.0_f32, 10.0),
            Point2::new(90.0, 50.0),
            Point2::new(50.0, 90.0),
            Point2::new(10.0, 50.0),
        ];
        let q = extreme_corners(&pts).expect("non-empty");
        assert_eq!(q.top_left, Point2::new(50.0, 10.0));
        assert_eq!(q.top_right, Point2::new(50.0, 10.0));
        assert_eq!(q.bottom_right, Point2::new(90.0, 50.0));
        assert_eq!(q.bottom_left, Point2::new(50.0, 90.0));
    }

    #[test]
    fn largest_contour_prefers_first_on_equal_area() {
        let a = Contour::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
        ]);
        let b = Contour::from_points(vec![
            Point2::new(10.0, 0.0),
            Point2::new(14.0, 0.0),
            Point2::new(14.0, 4.0),
        ]);
        assert_eq!(largest_contour(&[a, b]), Some(0));
        assert_eq!(largest_contour(&[]), None);
    }
}
