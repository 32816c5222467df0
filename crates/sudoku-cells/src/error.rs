/// Errors produced while locating, de-skewing and slicing a puzzle.
///
/// Geometric failures are deterministic for a given input; retrying with the
/// same image yields the same error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("image has no pixels (width={width}, height={height})")]
    InvalidImage { width: u32, height: u32 },

    #[error("no contours found in the binary image")]
    EmptyContourSet,

    #[error("perspective transform needs exactly 4 corner correspondences, got {got}")]
    CornerCount { got: usize },

    #[error("detected corners are collinear or enclose no area")]
    DegenerateQuad,

    #[error("invalid calibration table: {0}")]
    InvalidCalibration(String),

    #[error(
        "square image is {width}x{height} but the calibration table expects {expected}x{expected}"
    )]
    CalibrationMismatch {
        expected: u32,
        width: u32,
        height: u32,
    },
}
