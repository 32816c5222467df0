mod common;

use common::{blank_photo, skewed_grid_photo, GRID_QUAD};
use sudoku_cells::{
    binarize, find_corners, BinarizeParams, CalibrationTable, CellExtractor, CellExtractorParams,
    ContourParams, ExtractError, WarpSource,
};

fn assert_near(got: (f32, f32), want: (f32, f32), tol: f32) {
    assert!(
        (got.0 - want.0).abs() <= tol && (got.1 - want.1).abs() <= tol,
        "expected ({:.1},{:.1}) ~ ({:.1},{:.1}) within {tol}",
        got.0,
        got.1,
        want.0,
        want.1
    );
}

#[test]
fn finds_the_corners_of_a_skewed_grid() {
    let img = skewed_grid_photo();
    let binary = binarize(&img, &BinarizeParams::default());
    let corners = find_corners(&binary, &ContourParams::default()).expect("grid found");

    for (p, want) in corners.to_array().iter().zip(GRID_QUAD) {
        assert_near((p.x, p.y), want, 6.0);
    }
}

#[test]
fn extracts_81_normalized_cells() {
    let extractor = CellExtractor::new(CellExtractorParams::default()).expect("valid params");
    let out = extractor.extract(&skewed_grid_photo()).expect("extraction");

    assert_eq!(out.cells.len(), 81);
    for (i, cell) in out.cells.iter().enumerate() {
        assert_eq!((cell.row, cell.col), (i / 9, i % 9));
        assert_eq!((cell.image.width, cell.image.height), (28, 28));
    }
    assert_eq!((out.square.width, out.square.height), (1000, 1000));
    assert!(out.square.data.iter().all(|&v| v == 0 || v == 255));

    let longest = out.corners.longest_side();
    assert_eq!(out.side, longest);
    assert_eq!(out.warped_size, longest as usize);
    assert!(out.timings.total_ms >= out.timings.binarize_ms);
}

#[test]
fn binary_warp_source_and_custom_table() {
    let extractor = CellExtractor::new(CellExtractorParams {
        warp_source: WarpSource::Binary,
        calibration: CalibrationTable::uniform(270),
        cell_binarize: None,
        cell_size: 20,
        ..CellExtractorParams::default()
    })
    .expect("valid params");

    let out = extractor.extract(&skewed_grid_photo()).expect("extraction");
    assert_eq!((out.square.width, out.square.height), (270, 270));
    assert!(out
        .cells
        .iter()
        .all(|c| c.image.width == 20 && c.image.height == 20));
}

#[test]
fn blank_photo_reports_empty_contour_set() {
    let extractor = CellExtractor::new(CellExtractorParams::default()).expect("valid params");
    assert_eq!(
        extractor.extract(&blank_photo()).unwrap_err(),
        ExtractError::EmptyContourSet
    );
}

#[test]
fn downscaled_input_reports_corners_on_the_photo() {
    let extractor = CellExtractor::new(CellExtractorParams {
        input_width: Some(240),
        calibration: CalibrationTable::uniform(270),
        ..CellExtractorParams::default()
    })
    .expect("valid params");
    let out = extractor.extract(&skewed_grid_photo()).expect("extraction");

    assert_eq!(out.input_scale, [0.5, 0.5]);
    let processed = out.corners.to_array();
    assert_near((processed[0].x, processed[0].y), (30.0, 25.0), 5.0);

    for (p, want) in out.corners_in_input().to_array().iter().zip(GRID_QUAD) {
        assert_near((p.x, p.y), want, 8.0);
    }
}
