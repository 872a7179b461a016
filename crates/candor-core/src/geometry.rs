//! Geometric similarity between two normalized landmark sets.
//!
//! Four sub-metrics, each in `[0,1]` with 1 meaning identical geometry:
//! feature placement (centroid displacement of eyes, nose, mouth), jaw
//! contour (mean pointwise distance), eye size and nose size (polygon area
//! ratios). The composite weights contour heaviest (jaw reshaping is the
//! strongest editing signal in this domain), with eye enlargement second.

use crate::config::Tunables;
use crate::types::{NormalizedLandmarks, Point};

/// Sub-metric values and their weighted composite, all in `[0,1]`.
#[derive(Debug, Clone, Copy)]
pub struct GeometricSimilarity {
    pub feature_placement: f32,
    pub contour: f32,
    pub eye_size: f32,
    pub nose_size: f32,
    pub composite: f32,
}

/// Compare two normalized landmark sets across all four sub-metrics.
pub fn estimate(
    a: &NormalizedLandmarks,
    b: &NormalizedLandmarks,
    tunables: &Tunables,
) -> GeometricSimilarity {
    let feature_placement = feature_placement_similarity(a, b, tunables);
    let contour = contour_similarity(a, b, tunables);
    let eye_size = eye_size_similarity(a, b);
    let nose_size = nose_size_similarity(a, b);

    let composite = (feature_placement * tunables.feature_weight
        + contour * tunables.contour_weight
        + eye_size * tunables.eye_weight
        + nose_size * tunables.nose_weight)
        .clamp(0.0, 1.0);

    GeometricSimilarity {
        feature_placement,
        contour,
        eye_size,
        nose_size,
        composite,
    }
}

/// Area of a polygon via the shoelace formula. Fewer than 3 points has no
/// enclosed area and yields 0.
pub fn polygon_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = points.len();
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    (area / 2.0).abs()
}

fn centroid(points: &[Point]) -> Point {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }
    let n = points.len() as f32;
    Point::new(sum_x / n, sum_y / n)
}

/// Mean pointwise Euclidean distance between corresponding points.
///
/// Unequal point counts cannot be compared pairwise; that case resolves to
/// the sentinel maximal distance instead of failing, so a complete score is
/// still produced.
fn mean_pointwise_distance(a: &[Point], b: &[Point]) -> f32 {
    if a.len() != b.len() {
        tracing::debug!(
            left = a.len(),
            right = b.len(),
            "landmark topology mismatch, using maximal distance"
        );
        return 1.0;
    }

    let total: f32 = a.iter().zip(b.iter()).map(|(p, q)| p.distance(q)).sum();
    total / a.len() as f32
}

/// How far the eye, nose and mouth centroids moved between the two faces.
/// Natural proportional variance between any two photos keeps this metric's
/// weight low.
fn feature_placement_similarity(
    a: &NormalizedLandmarks,
    b: &NormalizedLandmarks,
    tunables: &Tunables,
) -> f32 {
    let eye_dist = (centroid(&a.left_eye).distance(&centroid(&b.left_eye))
        + centroid(&a.right_eye).distance(&centroid(&b.right_eye)))
        / 2.0;
    let nose_dist = centroid(&a.nose).distance(&centroid(&b.nose));
    let mouth_dist = centroid(&a.mouth).distance(&centroid(&b.mouth));

    (1.0 - (eye_dist + nose_dist + mouth_dist) / (3.0 * tunables.feature_max_offset)).max(0.0)
}

/// Jaw outline agreement: mean pointwise distance scaled so that
/// `contour_max_distance` maps to zero similarity.
fn contour_similarity(
    a: &NormalizedLandmarks,
    b: &NormalizedLandmarks,
    tunables: &Tunables,
) -> f32 {
    let avg = mean_pointwise_distance(&a.jaw_outline, &b.jaw_outline);
    (1.0 - avg / tunables.contour_max_distance).max(0.0)
}

/// Ratio of the smaller to the larger of two areas, neutral 0.5 when either
/// area is zero (degenerate polygons carry no size information).
fn area_ratio(area_a: f32, area_b: f32) -> f32 {
    if area_a == 0.0 || area_b == 0.0 {
        return 0.5;
    }
    area_a.min(area_b) / area_a.max(area_b)
}

/// Eye enlargement signal: left/right eye areas averaged per face, compared
/// as a ratio.
fn eye_size_similarity(a: &NormalizedLandmarks, b: &NormalizedLandmarks) -> f32 {
    let avg_a = (polygon_area(&a.left_eye) + polygon_area(&a.right_eye)) / 2.0;
    let avg_b = (polygon_area(&b.left_eye) + polygon_area(&b.right_eye)) / 2.0;
    area_ratio(avg_a, avg_b)
}

/// Nose reshaping signal: same ratio rule over the nose polygon.
fn nose_size_similarity(a: &NormalizedLandmarks, b: &NormalizedLandmarks) -> f32 {
    area_ratio(polygon_area(&a.nose), polygon_area(&b.nose))
}
