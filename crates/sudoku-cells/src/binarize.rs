//! Blur + adaptive mean threshold + inversion.
//!
//! The output is strictly two-valued (0 / 255). With `invert` enabled dark
//! ink (grid lines, digits) becomes foreground (255), which is what contour
//! tracing expects.

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Binarization settings, mirroring the classic
/// `GaussianBlur(9x9) -> adaptiveThreshold(MEAN_C, 11, 2) -> bitwise_not` chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Gaussian kernel size in pixels; `0` or `1` disables blurring.
    pub blur_kernel: u32,
    /// Side of the square neighbourhood used for the local mean (odd, >= 3).
    pub block_size: u32,
    /// Constant subtracted from the local mean before comparison.
    pub offset: f32,
    /// Make dark pixels the foreground.
    pub invert: bool,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 9,
            block_size: 11,
            offset: 2.0,
            invert: true,
        }
    }
}

impl BinarizeParams {
    /// Same threshold without the blur, used to re-binarize the de-skewed square.
    pub fn unblurred() -> Self {
        Self {
            blur_kernel: 0,
            ..Self::default()
        }
    }

    /// Gaussian sigma derived from the kernel size the way OpenCV does when
    /// sigma is left at zero.
    pub fn blur_sigma(&self) -> Option<f32> {
        if self.blur_kernel <= 1 {
            return None;
        }
        let k = self.blur_kernel as f32;
        Some(0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8)
    }
}

/// Binarize a grayscale image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn binarize(img: &GrayImage, params: &BinarizeParams) -> GrayImage {
    let blurred;
    let src = match params.blur_sigma() {
        Some(sigma) => {
            blurred = gaussian_blur_f32(img, sigma);
            &blurred
        }
        None => img,
    };
    adaptive_mean_threshold(src, params.block_size, params.offset, params.invert)
}

/// Threshold each pixel against the mean of its `block_size` neighbourhood
/// minus `offset`. The window is clipped at the image border.
pub fn adaptive_mean_threshold(
    img: &GrayImage,
    block_size: u32,
    offset: f32,
    invert: bool,
) -> GrayImage {
    let (w, h) = img.dimensions();
    let (wu, hu) = (w as usize, h as usize);
    let radius = (block_size.max(3) / 2) as usize;
    let integral = integral_image(img);
    let stride = wu + 1;

    let (bright, dark) = if invert { (0u8, 255u8) } else { (255u8, 0u8) };
    let src = img.as_raw();
    let mut out = vec![0u8; wu * hu];

    for y in 0..hu {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(hu);
        for x in 0..wu {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(wu);
            let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
                - integral[y0 * stride + x1]
                - integral[y1 * stride + x0];
            let count = ((x1 - x0) * (y1 - y0)) as f32;
            let mean = sum as f32 / count;
            let v = src[y * wu + x] as f32;
            out[y * wu + x] = if v > mean - offset { bright } else { dark };
        }
    }

    // Buffer length always matches the dimensions.
    GrayImage::from_raw(w, h, out).unwrap_or_else(|| GrayImage::new(w, h))
}

// (w+1) x (h+1) summed-area table with a zero first row and column.
fn integral_image(img: &GrayImage) -> Vec<u64> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let stride = w + 1;
    let src = img.as_raw();
    let mut table = vec![0u64; stride * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += src[y * w + x] as u64;
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn page_with_line() -> GrayImage {
        let mut img = GrayImage::from_pixel(40, 40, Luma([230]));
        for y in 0..40 {
            for x in 18..22 {
                img.put_pixel(x, y, Luma([20]));
            }
        }
        img
    }

    #[test]
    fn dark_line_becomes_foreground() {
        let bin = binarize(&page_with_line(), &BinarizeParams::default());
        assert_eq!(bin.get_pixel(20, 20)[0], 255);
        assert_eq!(bin.get_pixel(5, 20)[0], 0);
        assert_eq!(bin.get_pixel(35, 5)[0], 0);
    }

    #[test]
    fn output_is_two_valued() {
        let bin = binarize(&page_with_line(), &BinarizeParams::default());
        assert!(bin.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn uniform_image_has_no_foreground() {
        let img = GrayImage::from_pixel(25, 25, Luma([128]));
        let bin = binarize(&img, &BinarizeParams::default());
        assert!(bin.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn non_inverted_output_keeps_polarity() {
        let params = BinarizeParams {
            invert: false,
            ..BinarizeParams::unblurred()
        };
        let bin = binarize(&page_with_line(), &params);
        assert_eq!(bin.get_pixel(20, 20)[0], 0);
        assert_eq!(bin.get_pixel(5, 20)[0], 255);
    }

    #[test]
    fn blur_sigma_matches_kernel_rule() {
        let sigma = BinarizeParams::default().blur_sigma().expect("blur enabled");
        approx::assert_relative_eq!(sigma, 1.7, epsilon = 1e-6);
        assert_eq!(BinarizeParams::unblurred().blur_sigma(), None);
    }

    #[test]
    fn integral_image_sums_rectangles() {
        let img = GrayImage::from_pixel(3, 2, Luma([2]));
        let t = integral_image(&img);
        assert_eq!(t.len(), 4 * 3);
        assert_eq!(t[2 * 4 + 3], 12);
        assert_eq!(t[4 + 2], 4);
    }
}
