#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Axis-aligned pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl GrayImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.view().get(x, y)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = v;
        }
    }
}

impl GrayImageView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Copy a sub-rectangle. The rectangle is clipped to the image bounds, so
    /// an out-of-range request yields a smaller (possibly empty) crop.
    pub fn crop(&self, rect: PixelRect) -> GrayImage {
        let x0 = rect.x0.min(self.width);
        let x1 = rect.x1.min(self.width).max(x0);
        let y0 = rect.y0.min(self.height);
        let y1 = rect.y1.min(self.height).max(y0);
        let w = x1 - x0;
        let h = y1 - y0;

        let mut data = Vec::with_capacity(w * h);
        for y in y0..y1 {
            let row = y * self.width;
            data.extend_from_slice(&self.data[row + x0..row + x1]);
        }
        GrayImage {
            width: w,
            height: h,
            data,
        }
    }

    /// Bilinear resize with pixel-center alignment and replicated borders.
    ///
    /// Resizing an empty image produces a black image of the requested size.
    pub fn resize_bilinear(&self, out_w: usize, out_h: usize) -> GrayImage {
        let mut out = GrayImage::new(out_w, out_h);
        if self.width == 0 || self.height == 0 {
            return out;
        }

        let sx = self.width as f32 / out_w.max(1) as f32;
        let sy = self.height as f32 / out_h.max(1) as f32;
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;

        for y in 0..out_h {
            let fy = ((y as f32 + 0.5) * sy - 0.5).clamp(0.0, max_y);
            for x in 0..out_w {
                let fx = ((x as f32 + 0.5) * sx - 0.5).clamp(0.0, max_x);
                let v = sample_bilinear_clamped(self, fx, fy);
                out.data[y * out_w + x] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
        out
    }

    /// Surround the image with a constant-valued border.
    pub fn pad_constant(
        &self,
        top: usize,
        bottom: usize,
        left: usize,
        right: usize,
        value: u8,
    ) -> GrayImage {
        let w = self.width + left + right;
        let h = self.height + top + bottom;
        let mut data = vec![value; w * h];
        for y in 0..self.height {
            let src = &self.data[y * self.width..(y + 1) * self.width];
            let dst_start = (y + top) * w + left;
            data[dst_start..dst_start + self.width].copy_from_slice(src);
        }
        GrayImage {
            width: w,
            height: h,
            data,
        }
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

#[inline]
fn get_gray_clamped(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    let x = x.clamp(0, src.width as i32 - 1);
    let y = y.clamp(0, src.height as i32 - 1);
    src.data[y as usize * src.width + x as usize]
}

/// Bilinear sample with zero outside the image.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).round().clamp(0.0, 255.0) as u8
}

// Replicates edge pixels; caller guarantees a non-empty image.
#[inline]
fn sample_bilinear_clamped(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray_clamped(src, x0, y0) as f32;
    let p10 = get_gray_clamped(src, x0 + 1, y0) as f32;
    let p01 = get_gray_clamped(src, x0, y0 + 1) as f32;
    let p11 = get_gray_clamped(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}
