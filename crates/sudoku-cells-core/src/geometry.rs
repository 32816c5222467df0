//! Point-set primitives used by corner finding and perspective correction.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: Point2<f32>, p2: Point2<f32>) -> f32 {
    let a = p2.x - p1.x;
    let b = p2.y - p1.y;
    (a * a + b * b).sqrt()
}

/// `x + y`: minimal at the top-left corner, maximal at the bottom-right.
#[inline]
pub fn coord_sum(p: &Point2<f32>) -> f64 {
    p.x as f64 + p.y as f64
}

/// `x - y`: minimal at the bottom-left corner, maximal at the top-right.
#[inline]
pub fn coord_diff(p: &Point2<f32>) -> f64 {
    p.x as f64 - p.y as f64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumMode {
    Min,
    Max,
}

/// Index of the item minimizing or maximizing `key`.
///
/// The scan only replaces the current best on strict improvement, so ties
/// resolve to the first occurrence. Returns `None` for an empty slice.
pub fn extremum_index<T, F>(items: &[T], key: F, mode: ExtremumMode) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    let mut iter = items.iter().enumerate();
    let (_, first) = iter.next()?;
    let mut best_idx = 0;
    let mut best = key(first);

    for (i, item) in iter {
        let k = key(item);
        let better = match mode {
            ExtremumMode::Min => k < best,
            ExtremumMode::Max => k > best,
        };
        if better {
            best = k;
            best_idx = i;
        }
    }

    Some(best_idx)
}

/// Absolute area enclosed by a polygon (shoelace formula).
///
/// The polygon is treated as implicitly closed; fewer than three points
/// enclose no area.
pub fn polygon_area(points: &[Point2<f32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0_f64;
    let n = points.len();
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        acc += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    (acc * 0.5).abs()
}

/// Four corners in canonical order: top-left, top-right, bottom-right, bottom-left.
///
/// Consumers rely on this order positionally when building point
/// correspondences.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadCorners {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl QuadCorners {
    pub fn from_array(pts: [Point2<f32>; 4]) -> Self {
        Self {
            top_left: pts[0],
            top_right: pts[1],
            bottom_right: pts[2],
            bottom_left: pts[3],
        }
    }

    pub fn to_array(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Side lengths as `[right, left, bottom, top]`.
    pub fn side_lengths(&self) -> [f32; 4] {
        [
            distance(self.bottom_right, self.top_right),
            distance(self.top_left, self.bottom_left),
            distance(self.bottom_right, self.bottom_left),
            distance(self.top_left, self.top_right),
        ]
    }

    pub fn longest_side(&self) -> f32 {
        self.side_lengths().into_iter().fold(0.0_f32, f32::max)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_of_3_4_5_triangle_is_exact() {
        let d = distance(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point2::new(-2.5_f32, 7.0);
        let b = Point2::new(11.0_f32, -1.0);
        assert_relative_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn extremum_ties_resolve_to_first_occurrence() {
        let pts = [
            Point2::new(5.0_f32, 5.0),
            Point2::new(1.0, 3.0),
            Point2::new(3.0, 1.0),
            Point2::new(9.0, 9.0),
            Point2::new(0.0, 18.0),
        ];
        assert_eq!(extremum_index(&pts, coord_sum, ExtremumMode::Min), Some(1));
        assert_eq!(extremum_index(&pts, coord_sum, ExtremumMode::Max), Some(3));
    }

    #[test]
    fn extremum_on_diff_key() {
        let pts = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert_eq!(extremum_index(&pts, coord_diff, ExtremumMode::Max), Some(1));
        assert_eq!(extremum_index(&pts, coord_diff, ExtremumMode::Min), Some(3));
    }

    #[test]
    fn extremum_of_empty_slice_is_none() {
        let pts: [Point2<f32>; 0] = [];
        assert_eq!(extremum_index(&pts, coord_sum, ExtremumMode::Max), None);
    }

    #[test]
    fn shoelace_area_ignores_winding() {
        let cw = [
            Point2::new(10.0_f32, 10.0),
            Point2::new(90.0, 10.0),
            Point2::new(90.0, 90.0),
            Point2::new(10.0, 90.0),
        ];
        let mut ccw = cw;
        ccw.reverse();
        assert_relative_eq!(polygon_area(&cw), 6400.0);
        assert_relative_eq!(polygon_area(&ccw), 6400.0);
        assert_eq!(polygon_area(&cw[..2]), 0.0);
    }

    #[test]
    fn quad_side_lengths_follow_fixed_pairing() {
        let q = QuadCorners::from_array([
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 30.0),
            Point2::new(0.0, 30.0),
        ]);
        assert_eq!(q.side_lengths(), [30.0, 30.0, 40.0, 40.0]);
        assert_eq!(q.longest_side(), 40.0);
        assert_relative_eq!(q.area(), 1200.0);
        assert_eq!(QuadCorners::from_array(q.to_array()), q);
    }
}
