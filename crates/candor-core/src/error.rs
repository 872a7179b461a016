use thiserror::Error;

/// Rejection raised before any scoring computation starts.
///
/// Every variant means the same thing to a caller: the detection subsystem
/// handed over a sample without usable face data. The engine never produces
/// a partial result; a sample either passes validation and yields a complete
/// [`crate::ScoreResult`], or is rejected here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("face sample has no points in the {region} landmark region")]
    EmptyLandmarks { region: &'static str },

    #[error("face sample has a non-finite coordinate in the {region} landmark region")]
    NonFiniteLandmark { region: &'static str },

    #[error("face box has non-positive dimensions: {width}x{height}")]
    DegenerateBox { width: f32, height: f32 },
}
