//! Contour extraction on binary images.
//!
//! Border following is delegated to `imageproc::contours::find_contours`
//! (Suzuki-Abe); this module restricts the result to outer borders, optionally
//! compresses straight runs and attaches the enclosed area.

use image::GrayImage;
use imageproc::contours::{find_contours as trace_borders, BorderType};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use sudoku_cells_core::polygon_area;

/// How many boundary pixels a traced contour keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainApprox {
    /// Every boundary pixel.
    None,
    /// Only pixels where the step direction changes.
    #[default]
    Simple,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    /// Keep only outermost borders (no holes, nothing nested inside another
    /// region).
    pub external_only: bool,
    pub chain: ChainApprox,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            external_only: true,
            chain: ChainApprox::Simple,
        }
    }
}

/// A traced boundary polygon and the area it encloses.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point2<f32>>,
    pub area: f64,
}

impl Contour {
    pub fn from_points(points: Vec<Point2<f32>>) -> Self {
        let area = polygon_area(&points);
        Self { points, area }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trace the contours of the non-zero regions of `binary`.
pub fn find_contours(binary: &GrayImage, params: &ContourParams) -> Vec<Contour> {
    let traced = trace_borders::<u32>(binary);
    log::debug!("traced {} borders", traced.len());

    traced
        .into_iter()
        .filter(|c| {
            !params.external_only || (c.border_type == BorderType::Outer && c.parent.is_none())
        })
        .map(|c| {
            let pts: Vec<Point2<f32>> = c
                .points
                .iter()
                .map(|p| Point2::new(p.x as f32, p.y as f32))
                .collect();
            let pts = match params.chain {
                ChainApprox::None => pts,
                ChainApprox::Simple => compress_chain(&pts),
            };
            Contour::from_points(pts)
        })
        .collect()
}

/// Drop every point that continues the previous step in the same direction.
///
/// The contour is treated as closed, so the first point is kept only when
/// the chain actually turns there.
pub fn compress_chain(points: &[Point2<f32>]) -> Vec<Point2<f32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: Point2<f32>, b: Point2<f32>| (sign(b.x - a.x), sign(b.y - a.y));

    let kept: Vec<Point2<f32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            step(prev, cur) != step(cur, next)
        })
        .map(|i| points[i])
        .collect();

    // A closed straight run has no turns; keep its endpoints.
    if kept.is_empty() {
        vec![points[0], points[n - 1]]
    } else {
        kept
    }
}

// `f32::signum` maps zero to 1, which would hide axis-aligned steps.
fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
