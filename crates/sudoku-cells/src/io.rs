//! JSON configuration and report helpers, plus PNG output for cells.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use sudoku_cells_core::{GrayImage, QuadCorners};

use crate::convert::to_image;
use crate::pipeline::{CellExtraction, CellExtractor, CellExtractorParams, StageTimings};
use crate::slicer::CellImage;
use crate::ExtractError;

#[derive(thiserror::Error, Debug)]
pub enum CellsIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

fn default_output_dir() -> String {
    "cells".to_string()
}

/// Configuration for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellExtractConfig {
    pub image_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub report_path: Option<String>,
    /// Where to save the de-skewed square, if anywhere.
    #[serde(default)]
    pub square_path: Option<String>,
    /// Where to save the corner overlay, if anywhere.
    #[serde(default)]
    pub overlay_path: Option<String>,
    #[serde(default)]
    pub params: CellExtractorParams,
}

impl Default for CellExtractConfig {
    fn default() -> Self {
        Self {
            image_path: "sudoku.png".to_string(),
            output_dir: default_output_dir(),
            report_path: None,
            square_path: None,
            overlay_path: None,
            params: CellExtractorParams::default(),
        }
    }
}

impl CellExtractConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CellsIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CellsIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(&self.output_dir).join("report.json"))
    }

    pub fn build_extractor(&self) -> Result<CellExtractor, ExtractError> {
        CellExtractor::new(self.params.clone())
    }
}

/// Where one cell was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: usize,
    pub col: usize,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellExtractReport {
    pub image_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub image_width: u32,
    pub image_height: u32,
    /// Detected corners, in the pixel frame of the loaded image.
    #[serde(default)]
    pub corners: Option<QuadCorners>,
    #[serde(default)]
    pub side: Option<f32>,
    #[serde(default)]
    pub warped_size: Option<usize>,
    #[serde(default)]
    pub square_resolution: Option<u32>,
    #[serde(default)]
    pub square_path: Option<String>,
    #[serde(default)]
    pub cells: Vec<CellRecord>,
    #[serde(default)]
    pub timings: Option<StageTimings>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CellExtractReport {
    /// Build a base report for an input image.
    pub fn new(cfg: &CellExtractConfig, config_path: Option<&Path>, width: u32, height: u32) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            image_width: width,
            image_height: height,
            corners: None,
            side: None,
            warped_size: None,
            square_resolution: None,
            square_path: None,
            cells: Vec::new(),
            timings: None,
            error: None,
        }
    }

    /// Populate report fields from a successful extraction and the cell
    /// files written for it.
    pub fn set_result(&mut self, res: &CellExtraction, cell_paths: &[PathBuf]) {
        self.corners = Some(res.corners_in_input());
        self.side = Some(res.side);
        self.warped_size = Some(res.warped_size);
        self.square_resolution = Some(res.square.width as u32);
        self.cells = res
            .cells
            .iter()
            .zip(cell_paths)
            .map(|(c, p)| CellRecord {
                row: c.row,
                col: c.col,
                path: p.to_string_lossy().into_owned(),
            })
            .collect();
        self.timings = Some(res.timings.clone());
        self.error = None;
    }

    /// Record an extraction error.
    pub fn set_error(&mut self, err: &ExtractError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CellsIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CellsIoError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// File name used for a cell: `cell_r{row}_c{col}.png`.
pub fn cell_file_name(row: usize, col: usize) -> String {
    format!("cell_r{row}_c{col}.png")
}

/// Encode a core buffer to disk; the format follows the file extension.
pub fn save_gray(path: impl AsRef<Path>, img: &GrayImage) -> Result<(), CellsIoError> {
    to_image(img).save(path)?;
    Ok(())
}

/// Write every cell into `dir` (created if missing) and return the paths in
/// cell order.
pub fn save_cells(dir: impl AsRef<Path>, cells: &[CellImage]) -> Result<Vec<PathBuf>, CellsIoError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(cells.len());
    for cell in cells {
        let path = dir.join(cell_file_name(cell.row, cell.col));
        save_gray(&path, &cell.image)?;
        paths.push(path);
    }
    log::debug!("wrote {} cells to {}", paths.len(), dir.display());
    Ok(paths)
}
