//! Landmark validation and face-box-relative normalization.
//!
//! Raw landmarks arrive in pixel space, so two photos of the same face at
//! different resolutions or crops are not directly comparable. Mapping every
//! point into unit coordinates relative to the detected face box removes both
//! scale and position, leaving only the face geometry the metrics care about.

use crate::error::ScoreError;
use crate::types::{FaceSample, NormalizedLandmarks, Point};

/// Validate that a sample carries usable face data.
///
/// Rejects a degenerate face box and empty or non-finite landmark regions.
/// Runs before any scoring so a bad sample never reaches the arithmetic.
pub fn validate(sample: &FaceSample) -> Result<(), ScoreError> {
    if !sample.bounds.has_area() {
        return Err(ScoreError::DegenerateBox {
            width: sample.bounds.width,
            height: sample.bounds.height,
        });
    }

    for (region, points) in sample.landmarks.regions() {
        if points.is_empty() {
            return Err(ScoreError::EmptyLandmarks { region });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(ScoreError::NonFiniteLandmark { region });
        }
    }

    Ok(())
}

/// Map every landmark into face-box-relative unit coordinates:
/// `((p.x - box.x) / box.width, (p.y - box.y) / box.height)`.
///
/// Pure; fails only on the validation rejections in [`validate`].
pub fn normalize(sample: &FaceSample) -> Result<NormalizedLandmarks, ScoreError> {
    validate(sample)?;

    let b = sample.bounds;
    let map = |points: &[Point]| -> Vec<Point> {
        points
            .iter()
            .map(|p| Point::new((p.x - b.x) / b.width, (p.y - b.y) / b.height))
            .collect()
    };

    Ok(NormalizedLandmarks {
        positions: map(&sample.landmarks.positions),
        jaw_outline: map(&sample.landmarks.jaw_outline),
        left_eye: map(&sample.landmarks.left_eye),
        right_eye: map(&sample.landmarks.right_eye),
        nose: map(&sample.landmarks.nose),
        mouth: map(&sample.landmarks.mouth),
    })
}
