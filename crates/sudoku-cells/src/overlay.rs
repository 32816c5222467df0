//! Debug overlay: detected corners drawn on a color copy of the input.

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use sudoku_cells_core::QuadCorners;

pub const DEFAULT_RADIUS: i32 = 5;
pub const DEFAULT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Render each corner of `corners` as a filled disc.
pub fn draw_corners(img: &GrayImage, corners: &QuadCorners, radius: i32, color: Rgb<u8>) -> RgbImage {
    let mut out = DynamicImage::ImageLuma8(img.clone()).to_rgb8();
    for p in corners.to_array() {
        draw_filled_circle_mut(&mut out, (p.x.round() as i32, p.y.round() as i32), radius, color);
    }
    out
}
