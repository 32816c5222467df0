//! Geometry and warping primitives for Sudoku cell extraction.
//!
//! This crate is purely geometric. It does *not* depend on any image codec,
//! thresholding or contour tracing library; those live in `sudoku-cells`.
//!
//! - [`distance`], [`extremum_index`], [`polygon_area`] and [`QuadCorners`]
//!   cover the point-set side of corner finding.
//! - [`homography_from_4pt`] solves the projective transform,
//!   [`warp_perspective_gray`] applies it.
//! - [`GrayImage`] is a minimal row-major 8-bit buffer with crop, resize and
//!   padding helpers.

mod geometry;
mod homography;
mod image;
mod logger;

pub use geometry::{
    coord_diff, coord_sum, distance, extremum_index, polygon_area, ExtremumMode, QuadCorners,
};
pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView, PixelRect};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

pub use nalgebra::Point2;
