//! Scoring pipeline.
//!
//! One operation: compare a reference photo against a candidate and produce a
//! complete [`ScoreResult`]. Normalization feeds the geometric estimator, the
//! identity verdict folds into the blend, the candidate frame feeds the pixel
//! filter detector, and the composer turns all of it into a bounded score and
//! grade. Every stage is pure; the only state a [`Scorer`] carries is its
//! tunables and the seeded source used for message selection.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Tunables;
use crate::error::ScoreError;
use crate::filter::{self, FilterSignal, PixelFrame};
use crate::geometry;
use crate::identity;
use crate::landmarks;
use crate::score::{self, ScoreResult};
use crate::types::FaceSample;

/// One image's worth of input: its decoded pixels and the face sample the
/// external detection subsystem produced for it.
#[derive(Debug, Clone)]
pub struct Photo {
    pub frame: PixelFrame,
    pub face: FaceSample,
}

/// The scoring engine.
///
/// Holds the tunables and a seedable random source for grade-message
/// selection. With the same seed, the same inputs always yield the same
/// result; everything except the chosen message is seed-independent.
pub struct Scorer {
    tunables: Tunables,
    rng: StdRng,
}

impl Scorer {
    pub fn new(tunables: Tunables) -> Self {
        Self {
            tunables,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(tunables: Tunables, seed: u64) -> Self {
        Self {
            tunables,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Score how far `candidate` diverges from `reference`.
    ///
    /// Rejects samples without usable face data before any computation;
    /// every `Ok` is a complete result.
    pub fn score(
        &mut self,
        reference: &Photo,
        candidate: &Photo,
    ) -> Result<ScoreResult, ScoreError> {
        let reference_landmarks = landmarks::normalize(&reference.face)?;
        let candidate_landmarks = landmarks::normalize(&candidate.face)?;

        let verdict = identity::classify(
            reference.face.embedding.as_deref(),
            candidate.face.embedding.as_deref(),
            &self.tunables,
        );

        let geometric = geometry::estimate(
            &reference_landmarks,
            &candidate_landmarks,
            &self.tunables,
        );
        tracing::debug!(
            feature_placement = geometric.feature_placement,
            contour = geometric.contour,
            eye_size = geometric.eye_size,
            nose_size = geometric.nose_size,
            composite = geometric.composite,
            "geometric similarity estimated"
        );

        let blended = identity::blend(geometric.composite, verdict, &self.tunables);

        // Pixel heuristics only apply when both photos show the same person;
        // across two faces the signal is zeroed rather than computed.
        let filter = match verdict {
            Some(v) if v.is_different_person() => FilterSignal::zeroed(),
            _ => filter::detect(&candidate.frame, &self.tunables),
        };
        tracing::debug!(
            blur = filter.blur_level,
            smoothness = filter.smoothness,
            blended,
            "signals ready for composition"
        );

        let result = score::compose(blended, &filter, verdict, &self.tunables, &mut self.rng);
        tracing::info!(
            score = result.score,
            grade = ?result.grade,
            filter_bonus = result.filter_bonus,
            "discrepancy score computed"
        );

        Ok(result)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(Tunables::default())
    }
}
