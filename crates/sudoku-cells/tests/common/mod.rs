use image::{GrayImage, Luma};
use sudoku_cells::core::{homography_from_4pt, Point2};

pub const PAPER: u8 = 230;
pub const INK: u8 = 25;

/// Outer corners of the rendered grid, canonical order.
pub const GRID_QUAD: [(f32, f32); 4] = [(60.0, 50.0), (420.0, 80.0), (400.0, 430.0), (40.0, 400.0)];

const PITCH: f32 = 40.0;
const LINE: f32 = 3.0;
const EXTENT: f32 = 9.0 * PITCH + LINE - 1.0;

/// A 480x480 photo of a 9x9 grid seen under perspective.
pub fn skewed_grid_photo() -> GrayImage {
    let canon = [
        Point2::new(0.0, 0.0),
        Point2::new(EXTENT, 0.0),
        Point2::new(EXTENT, EXTENT),
        Point2::new(0.0, EXTENT),
    ];
    let quad = GRID_QUAD.map(|(x, y)| Point2::new(x, y));
    let h = homography_from_4pt(&quad, &canon).expect("non-degenerate quad");

    GrayImage::from_fn(480, 480, |x, y| {
        let p = h.apply(Point2::new(x as f32, y as f32));
        let inside = (0.0..=EXTENT).contains(&p.x) && (0.0..=EXTENT).contains(&p.y);
        let on_line = p.x % PITCH < LINE || p.y % PITCH < LINE;
        Luma([if inside && on_line { INK } else { PAPER }])
    })
}

pub fn blank_photo() -> GrayImage {
    GrayImage::from_pixel(200, 150, Luma([PAPER]))
}
