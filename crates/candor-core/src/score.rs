//! Score composition and grade classification.
//!
//! The blended similarity and the pixel filter signal collapse into one
//! bounded integer score, which a fixed table of seven contiguous bands maps
//! to a grade, a display name, and a message. Different-person pairs bypass
//! the normal arithmetic entirely: geometry and pixel texture mean nothing
//! across two faces, so the score is pinned by distance alone.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::Tunables;
use crate::filter::FilterSignal;
use crate::identity::IdentityVerdict;

/// Discrepancy grade, ordered from least to most retouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    BarefacedHonesty,
    LightTouch,
    PracticedHand,
    StudioRegular,
    PowerUser,
    NewIdRequired,
    ForensicCase,
}

/// One contiguous score range with its display name and message set.
#[derive(Debug, Clone, Copy)]
pub struct GradeBand {
    pub grade: Grade,
    pub min: u8,
    pub max: u8,
    pub name: &'static str,
    pub messages: &'static [&'static str],
}

/// The canonical seven-band table: contiguous, non-overlapping, exhaustive
/// over 0..=100.
pub const GRADE_BANDS: [GradeBand; 7] = [
    GradeBand {
        grade: Grade::BarefacedHonesty,
        min: 0,
        max: 20,
        name: "Barefaced Honesty",
        messages: &[
            "Not a pixel out of place. Your camera roll could testify in court.",
            "Zero filter energy. Respect.",
        ],
    },
    GradeBand {
        grade: Grade::LightTouch,
        min: 21,
        max: 35,
        name: "Light Touch",
        messages: &[
            "A little polish never hurt anyone. Nobody will ever know.",
            "Tasteful. Deniable. Approved.",
        ],
    },
    GradeBand {
        grade: Grade::PracticedHand,
        min: 36,
        max: 47,
        name: "Practiced Hand",
        messages: &[
            "Right at the line where friends start squinting at brunch.",
            "A blind date would still recognize you. Probably.",
        ],
    },
    GradeBand {
        grade: Grade::StudioRegular,
        min: 48,
        max: 61,
        name: "Studio Regular",
        messages: &[
            "Your friends already suspect the eyelid situation.",
            "The jawline called. It wants its original angle back.",
        ],
    },
    GradeBand {
        grade: Grade::PowerUser,
        min: 62,
        max: 75,
        name: "Power User",
        messages: &[
            "Are you an influencer? Asking for the algorithm.",
            "This level of technique deserves its own software license.",
        ],
    },
    GradeBand {
        grade: Grade::NewIdRequired,
        min: 76,
        max: 85,
        name: "New ID Required",
        messages: &[
            "Airport security would like a word.",
            "Your passport photo and this photo are no longer on speaking terms.",
        ],
    },
    GradeBand {
        grade: Grade::ForensicCase,
        min: 86,
        max: 100,
        name: "Forensic Case",
        messages: &[
            "Two different people. We checked twice.",
            "Less a retouch, more a witness protection program.",
        ],
    },
];

/// Final engine output. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub grade: Grade,
    pub grade_name: &'static str,
    pub message: &'static str,
    pub filter_bonus: u8,
}

/// Find the band containing `score` in a band table ordered by range.
pub fn band_for_score_in(bands: &[GradeBand], score: u8) -> &GradeBand {
    bands
        .iter()
        .find(|b| score <= b.max)
        .unwrap_or(&bands[bands.len() - 1])
}

/// Find the band containing `score` in the canonical table.
pub fn band_for_score(score: u8) -> &'static GradeBand {
    band_for_score_in(&GRADE_BANDS, score)
}

/// Compose the final result from the blended similarity, the filter signal,
/// and the identity verdict.
///
/// A `DifferentPerson` verdict pins the score from the override tier table
/// and forces the filter bonus to zero. Otherwise the score is
/// `(1 − blended)·100` plus a capped filter bonus, clamped and rounded.
/// Given validated numeric inputs this function cannot fail.
pub fn compose<R: Rng>(
    blended_similarity: f32,
    filter: &FilterSignal,
    verdict: Option<IdentityVerdict>,
    tunables: &Tunables,
    rng: &mut R,
) -> ScoreResult {
    if let Some(v) = verdict {
        if v.is_different_person() {
            let distance = v.distance();
            let score = tunables
                .override_tiers
                .iter()
                .find(|tier| distance >= tier.min_distance)
                .map(|tier| tier.score)
                .unwrap_or(tunables.override_floor);
            return finish(score, 0, rng);
        }
    }

    let base = (1.0 - blended_similarity) * 100.0;
    let bonus = filter.filter_score * tunables.filter_bonus_max;
    let score = (base + bonus).clamp(0.0, 100.0).round() as u8;

    finish(score, bonus.round() as u8, rng)
}

fn finish<R: Rng>(score: u8, filter_bonus: u8, rng: &mut R) -> ScoreResult {
    let band = band_for_score(score);
    let message = band
        .messages
        .choose(rng)
        .copied()
        .unwrap_or(band.messages[0]);

    ScoreResult {
        score,
        grade: band.grade,
        grade_name: band.name,
        message,
        filter_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_bands_are_contiguous_and_exhaustive() {
        assert_eq!(GRADE_BANDS[0].min, 0);
        assert_eq!(GRADE_BANDS[GRADE_BANDS.len() - 1].max, 100);
        for pair in GRADE_BANDS.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
    }

    #[test]
    fn test_grade_boundaries_exact() {
        assert_eq!(band_for_score(20).grade, Grade::BarefacedHonesty);
        assert_eq!(band_for_score(21).grade, Grade::LightTouch);
        assert_eq!(band_for_score(47).grade, Grade::PracticedHand);
        assert_eq!(band_for_score(48).grade, Grade::StudioRegular);

        assert_eq!(band_for_score(0).grade, Grade::BarefacedHonesty);
        assert_eq!(band_for_score(35).grade, Grade::LightTouch);
        assert_eq!(band_for_score(36).grade, Grade::PracticedHand);
        assert_eq!(band_for_score(61).grade, Grade::StudioRegular);
        assert_eq!(band_for_score(62).grade, Grade::PowerUser);
        assert_eq!(band_for_score(75).grade, Grade::PowerUser);
        assert_eq!(band_for_score(76).grade, Grade::NewIdRequired);
        assert_eq!(band_for_score(85).grade, Grade::NewIdRequired);
        assert_eq!(band_for_score(86).grade, Grade::ForensicCase);
        assert_eq!(band_for_score(100).grade, Grade::ForensicCase);
    }

    #[test]
    fn test_override_tiers() {
        let t = Tunables::default();
        // A non-zero filter signal must be ignored on the override path
        let filter = FilterSignal {
            blur_level: 1.0,
            smoothness: 1.0,
            filter_score: 1.0,
        };

        for (distance, expected) in [(0.75, 100), (0.70, 95), (0.60, 90), (0.50, 85)] {
            let result = compose(
                0.0,
                &filter,
                Some(IdentityVerdict::DifferentPerson { distance }),
                &t,
                &mut rng(),
            );
            assert_eq!(result.score, expected, "distance {distance}");
            assert_eq!(result.filter_bonus, 0);
        }
    }

    #[test]
    fn test_identical_pair_scores_only_the_filter_bonus() {
        let t = Tunables::default();
        let filter = FilterSignal {
            blur_level: 0.6,
            smoothness: 0.4,
            filter_score: 0.5,
        };

        let result = compose(
            1.0,
            &filter,
            Some(IdentityVerdict::SamePerson { distance: 0.0 }),
            &t,
            &mut rng(),
        );
        // base 0, bonus 0.5 * 5 = 2.5, rounds to 3 (away from zero)
        assert_eq!(result.score, 3);
        assert_eq!(result.filter_bonus, 3);
        assert_eq!(result.grade, Grade::BarefacedHonesty);
    }

    #[test]
    fn test_score_clamps_at_one_hundred() {
        let t = Tunables::default();
        let filter = FilterSignal {
            blur_level: 1.0,
            smoothness: 1.0,
            filter_score: 1.0,
        };

        let result = compose(0.0, &filter, None, &t, &mut rng());
        assert_eq!(result.score, 100);
        assert_eq!(result.filter_bonus, 5);
    }

    #[test]
    fn test_message_is_member_of_band_set() {
        let t = Tunables::default();
        let result = compose(0.5, &FilterSignal::zeroed(), None, &t, &mut rng());

        let band = band_for_score(result.score);
        assert!(band.messages.contains(&result.message));
        assert_eq!(result.grade_name, band.name);
    }

    #[test]
    fn test_same_seed_same_message() {
        let t = Tunables::default();
        let a = compose(0.42, &FilterSignal::zeroed(), None, &t, &mut rng());
        let b = compose(0.42, &FilterSignal::zeroed(), None, &t, &mut rng());
        assert_eq!(a, b);
    }
}
