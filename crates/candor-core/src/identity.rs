//! Identity embedding comparison and blending.
//!
//! The external recognizer hands each sample an optional fixed-length
//! embedding. When both sides carry comparable embeddings, their Euclidean
//! distance answers a question geometry cannot: is this even the same person?
//! Classification and scoring are kept as two explicit stages: [`classify`]
//! produces a tagged [`IdentityVerdict`], and the composer branches on that
//! verdict rather than on a buried flag.

use crate::config::Tunables;

/// Same/different-person classification with the underlying distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdentityVerdict {
    SamePerson { distance: f32 },
    DifferentPerson { distance: f32 },
}

impl IdentityVerdict {
    pub fn distance(&self) -> f32 {
        match *self {
            IdentityVerdict::SamePerson { distance } => distance,
            IdentityVerdict::DifferentPerson { distance } => distance,
        }
    }

    pub fn is_different_person(&self) -> bool {
        matches!(self, IdentityVerdict::DifferentPerson { .. })
    }
}

/// Euclidean distance between two embeddings.
///
/// Returns `None` when the vectors are not comparable: unequal lengths,
/// empty, or containing non-finite values. A `None` routes the caller to
/// pure-geometric scoring; it is an absence, not an error.
pub fn embedding_distance(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        tracing::warn!(
            left = a.len(),
            right = b.len(),
            "embeddings not comparable, identity signal unavailable"
        );
        return None;
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        tracing::warn!("embedding contains non-finite values, identity signal unavailable");
        return None;
    }

    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Some(sum.sqrt())
}

/// Classify a pair of optional embeddings into a tagged verdict.
///
/// `None` means the identity signal is unavailable (either embedding absent
/// or the pair not comparable).
pub fn classify(a: Option<&[f32]>, b: Option<&[f32]>, tunables: &Tunables) -> Option<IdentityVerdict> {
    let distance = embedding_distance(a?, b?)?;

    if distance >= tunables.different_person_distance {
        Some(IdentityVerdict::DifferentPerson { distance })
    } else {
        Some(IdentityVerdict::SamePerson { distance })
    }
}

/// Map an embedding distance to a similarity in `[0,1]`.
///
/// Linear between `identity_min_distance` (similarity 1) and
/// `identity_max_distance` (similarity 0), then capped by the first matching
/// dampening tier so likely-different-person distances cannot read as
/// plausibly similar.
pub fn identity_similarity(distance: f32, tunables: &Tunables) -> f32 {
    let span = tunables.identity_max_distance - tunables.identity_min_distance;
    let normalized = (1.0 - (distance - tunables.identity_min_distance) / span).clamp(0.0, 1.0);

    for tier in &tunables.damp_tiers {
        if distance >= tier.min_distance {
            return normalized.min(tier.cap);
        }
    }
    normalized
}

/// Fold the identity similarity into the geometric one.
///
/// Without a verdict the geometric similarity passes through unchanged; with
/// one, the identity signal dominates the blend.
pub fn blend(geometric: f32, verdict: Option<IdentityVerdict>, tunables: &Tunables) -> f32 {
    match verdict {
        None => geometric,
        Some(v) => {
            let identity = identity_similarity(v.distance(), tunables);
            (geometric * tunables.geometric_blend_weight
                + identity * tunables.identity_blend_weight)
                .clamp(0.0, 1.0)
        }
    }
}
