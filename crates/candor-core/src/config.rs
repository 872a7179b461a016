//! Engine tunables.
//!
//! Every numeric threshold the scoring pipeline uses lives here rather than
//! inline in the metrics: sub-metric weights, normalization denominators,
//! identity distance cutoffs, dampening and override tier tables, and the
//! filter heuristics' scaling constants. Two product generations shipped with
//! different values for several of these, so they are configuration, not
//! domain law. [`Tunables::default`] yields the current production set, and
//! the struct deserializes from a partial TOML document so a caller can
//! override individual knobs.

use serde::Deserialize;

/// Dampening tier: at or above `min_distance`, identity similarity is capped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DampTier {
    pub min_distance: f32,
    pub cap: f32,
}

/// Override tier: at or above `min_distance`, the final score is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OverrideTier {
    pub min_distance: f32,
    pub score: u8,
}

/// All numeric knobs of the scoring engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Weight of the feature-position sub-metric in the geometric composite.
    pub feature_weight: f32,
    /// Weight of the jaw-contour sub-metric. Contour reshaping is the
    /// dominant editing signal, so this carries the largest share.
    pub contour_weight: f32,
    /// Weight of the eye-size sub-metric.
    pub eye_weight: f32,
    /// Weight of the nose-size sub-metric.
    pub nose_weight: f32,

    /// Centroid displacement (in face-box units) at which the
    /// feature-position similarity bottoms out.
    pub feature_max_offset: f32,
    /// Mean jaw point distance (in face-box units) at which the contour
    /// similarity bottoms out.
    pub contour_max_distance: f32,

    /// Embedding distance mapped to identity similarity 1.0.
    pub identity_min_distance: f32,
    /// Embedding distance mapped to identity similarity 0.0.
    pub identity_max_distance: f32,
    /// Caps applied to identity similarity as distance grows, checked in
    /// order; the first tier whose `min_distance` is met wins.
    pub damp_tiers: Vec<DampTier>,
    /// Embedding distance at or above which the pair is classified as two
    /// different people.
    pub different_person_distance: f32,

    /// Share of the geometric similarity in the blended value.
    pub geometric_blend_weight: f32,
    /// Share of the identity similarity in the blended value.
    pub identity_blend_weight: f32,

    /// Pinned scores for different-person pairs, checked in order; the first
    /// tier whose `min_distance` is met wins.
    pub override_tiers: Vec<OverrideTier>,
    /// Different-person score when no override tier matches.
    pub override_floor: u8,

    /// Laplacian-response variance that maps blur level to 0.
    pub blur_variance_scale: f64,
    /// Mean neighbor variation that maps smoothness to 0.
    pub smoothness_variation_scale: f64,
    /// Maximum points the pixel filter signal can add to the score.
    pub filter_bonus_max: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            feature_weight: 0.10,
            contour_weight: 0.45,
            eye_weight: 0.25,
            nose_weight: 0.20,

            feature_max_offset: 0.2,
            contour_max_distance: 0.15,

            identity_min_distance: 0.20,
            identity_max_distance: 0.60,
            damp_tiers: vec![
                DampTier {
                    min_distance: 0.68,
                    cap: 0.0,
                },
                DampTier {
                    min_distance: 0.60,
                    cap: 0.05,
                },
                DampTier {
                    min_distance: 0.50,
                    cap: 0.15,
                },
                DampTier {
                    min_distance: 0.45,
                    cap: 0.10,
                },
            ],
            different_person_distance: 0.5,

            geometric_blend_weight: 0.15,
            identity_blend_weight: 0.85,

            override_tiers: vec![
                OverrideTier {
                    min_distance: 0.75,
                    score: 100,
                },
                OverrideTier {
                    min_distance: 0.65,
                    score: 95,
                },
                OverrideTier {
                    min_distance: 0.55,
                    score: 90,
                },
            ],
            override_floor: 85,

            blur_variance_scale: 1000.0,
            smoothness_variation_scale: 50.0,
            filter_bonus_max: 5.0,
        }
    }
}
