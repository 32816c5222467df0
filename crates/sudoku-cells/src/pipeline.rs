//! End-to-end extraction: photo in, 81 normalized cells out.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use sudoku_cells_core::{GrayImage, Point2, QuadCorners};

use crate::binarize::{binarize, BinarizeParams};
use crate::calibration::CalibrationTable;
use crate::contour::ContourParams;
use crate::convert::{from_image, gray_view, to_image};
use crate::corners::find_corners;
use crate::digit::{center_digit, DigitCenterParams};
use crate::perspective::correct_perspective;
use crate::slicer::{slice_cells, CellImage, DEFAULT_CELL_SIZE};
use crate::ExtractError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Which image the perspective warp samples from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpSource {
    /// The grayscale photo (after optional input resizing).
    #[default]
    Original,
    /// The blurred, thresholded image used for corner finding.
    Binary,
}

/// Configuration for [`CellExtractor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellExtractorParams {
    /// Resize the photo to this width (keeping aspect ratio) before any
    /// processing. `None` keeps the native size.
    pub input_width: Option<u32>,
    pub binarize: BinarizeParams,
    pub contours: ContourParams,
    pub warp_source: WarpSource,
    /// Cell layout; the de-skewed square is resized to its resolution.
    pub calibration: CalibrationTable,
    /// Edge length of every output cell.
    pub cell_size: usize,
    /// Re-binarize the resized square before slicing. `None` slices the
    /// warped pixels as they are.
    pub cell_binarize: Option<BinarizeParams>,
    /// Re-center digits inside each cell. Disabled by default.
    pub center_digits: Option<DigitCenterParams>,
}

impl Default for CellExtractorParams {
    fn default() -> Self {
        Self {
            input_width: None,
            binarize: BinarizeParams::default(),
            contours: ContourParams::default(),
            warp_source: WarpSource::default(),
            calibration: CalibrationTable::reference(),
            cell_size: DEFAULT_CELL_SIZE,
            cell_binarize: Some(BinarizeParams::unblurred()),
            center_digits: None,
        }
    }
}

/// Wall-clock time per stage, in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    pub binarize_ms: f64,
    pub corners_ms: f64,
    pub warp_ms: f64,
    pub slice_ms: f64,
    pub total_ms: f64,
}

/// Everything produced for one photo.
#[derive(Clone, Debug)]
pub struct CellExtraction {
    /// Puzzle corners in the coordinates of the processed input.
    pub corners: QuadCorners,
    /// Processed size over native size, per axis. `[1.0, 1.0]` unless
    /// `input_width` resized the photo.
    pub input_scale: [f32; 2],
    /// Longest side of the detected quad.
    pub side: f32,
    /// Edge length of the warped square before resizing.
    pub warped_size: usize,
    /// The square at calibration resolution, as sliced.
    pub square: GrayImage,
    /// 81 cells in row-major order.
    pub cells: Vec<CellImage>,
    pub timings: StageTimings,
}

impl CellExtraction {
    /// [`Self::corners`] mapped back onto the photo passed to
    /// [`CellExtractor::extract`].
    pub fn corners_in_input(&self) -> QuadCorners {
        let [sx, sy] = self.input_scale;
        QuadCorners::from_array(
            self.corners
                .to_array()
                .map(|p| Point2::new((p.x + 0.5) / sx - 0.5, (p.y + 0.5) / sy - 0.5)),
        )
    }
}

pub struct CellExtractor {
    params: CellExtractorParams,
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

impl CellExtractor {
    /// Create an extractor. Fails if the calibration table is unusable.
    pub fn new(params: CellExtractorParams) -> Result<Self, ExtractError> {
        params.calibration.validate()?;
        if params.cell_size == 0 {
            return Err(ExtractError::InvalidCalibration(
                "cell size must be positive".to_string(),
            ));
        }
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &CellExtractorParams {
        &self.params
    }

    /// Binarize `img` and locate the puzzle corners only.
    pub fn find_corners(&self, img: &::image::GrayImage) -> Result<QuadCorners, ExtractError> {
        check_size(img)?;
        let input = self.prepare_input(img);
        let binary = binarize(&input, &self.params.binarize);
        find_corners(&binary, &self.params.contours)
    }

    /// Run the full pipeline on a grayscale photo.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width(), height = img.height()))
    )]
    pub fn extract(&self, img: &::image::GrayImage) -> Result<CellExtraction, ExtractError> {
        check_size(img)?;
        let started = Instant::now();
        let mut timings = StageTimings::default();

        let input = self.prepare_input(img);
        let input_scale = [
            input.width() as f32 / img.width() as f32,
            input.height() as f32 / img.height() as f32,
        ];

        let t = Instant::now();
        let binary = binarize(&input, &self.params.binarize);
        timings.binarize_ms = elapsed_ms(t);

        let t = Instant::now();
        let corners = find_corners(&binary, &self.params.contours)?;
        timings.corners_ms = elapsed_ms(t);

        let t = Instant::now();
        let warp_src = match self.params.warp_source {
            WarpSource::Original => gray_view(&input),
            WarpSource::Binary => gray_view(&binary),
        };
        let view = correct_perspective(&warp_src, &corners)?;
        let warped_size = view.size();
        let resolution = self.params.calibration.resolution as usize;
        let mut square = view.square.view().resize_bilinear(resolution, resolution);
        if let Some(cell_params) = &self.params.cell_binarize {
            square = from_image(&binarize(&to_image(&square), cell_params));
        }
        timings.warp_ms = elapsed_ms(t);

        let t = Instant::now();
        let mut cells = slice_cells(&square.view(), &self.params.calibration, self.params.cell_size)?;
        if let Some(digit_params) = &self.params.center_digits {
            for cell in &mut cells {
                cell.image = center_digit(&cell.image, digit_params);
            }
        }
        timings.slice_ms = elapsed_ms(t);
        timings.total_ms = elapsed_ms(started);

        log::info!(
            "extracted {} cells from {}x{} input (side {:.1}, warped {warped_size}px, resized {resolution}px)",
            cells.len(),
            img.width(),
            img.height(),
            view.side,
        );

        Ok(CellExtraction {
            corners,
            input_scale,
            side: view.side,
            warped_size,
            square,
            cells,
            timings,
        })
    }

    fn prepare_input(&self, img: &::image::GrayImage) -> ::image::GrayImage {
        match self.params.input_width {
            Some(width) if width > 0 && width != img.width() => {
                let scale = width as f64 / img.width() as f64;
                let height = ((img.height() as f64 * scale) as u32).max(1);
                log::debug!(
                    "resizing input {}x{} -> {width}x{height}",
                    img.width(),
                    img.height()
                );
                to_image(
                    &gray_view(img).resize_bilinear(width as usize, height as usize),
                )
            }
            _ => img.clone(),
        }
    }
}

fn check_size(img: &::image::GrayImage) -> Result<(), ExtractError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ExtractError::InvalidImage {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}
