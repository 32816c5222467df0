//! Conversions between `image::GrayImage` and the core buffer types.

use image::Luma;
use sudoku_cells_core::{GrayImage, GrayImageView};

/// Borrow an `image::GrayImage` as a core view without copying.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a core buffer into an `image::GrayImage` for encoding or `imageproc`.
pub fn to_image(img: &GrayImage) -> ::image::GrayImage {
    ::image::GrayImage::from_fn(img.width as u32, img.height as u32, |x, y| {
        Luma([img.data[y as usize * img.width + x as usize]])
    })
}

/// Copy an `image::GrayImage` into an owned core buffer.
pub fn from_image(img: &::image::GrayImage) -> GrayImage {
    GrayImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_preserve_layout() {
        let img = ::image::GrayImage::from_fn(5, 3, |x, y| Luma([(10 * y + x) as u8]));
        let view = gray_view(&img);
        assert_eq!((view.width, view.height), (5, 3));
        assert_eq!(view.get(4, 2), Some(24));

        let owned = from_image(&img);
        assert_eq!(owned.get(1, 1), Some(11));
        assert_eq!(to_image(&owned), img);
    }
}
