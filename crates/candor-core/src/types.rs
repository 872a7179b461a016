use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Face bounding box in pixel space: top-left corner plus width and height.
///
/// A usable box has strictly positive dimensions; samples carrying anything
/// else are rejected before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when both dimensions are positive finite values.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Named landmark regions of one detected face, all in the same coordinate
/// space. `positions` is the full point set; the region vectors are the
/// subsets the scoring metrics read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub positions: Vec<Point>,
    pub jaw_outline: Vec<Point>,
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub nose: Vec<Point>,
    pub mouth: Vec<Point>,
}

impl FaceLandmarks {
    /// The named regions as (label, points) pairs, in a fixed order.
    pub(crate) fn regions(&self) -> [(&'static str, &[Point]); 6] {
        [
            ("positions", &self.positions),
            ("jaw_outline", &self.jaw_outline),
            ("left_eye", &self.left_eye),
            ("right_eye", &self.right_eye),
            ("nose", &self.nose),
            ("mouth", &self.mouth),
        ]
    }
}

/// One analyzed image as produced by the external detection subsystem:
/// pixel-space landmarks, the face bounding box, and an optional fixed-length
/// identity embedding. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSample {
    pub landmarks: FaceLandmarks,
    pub bounds: FaceBox,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// Landmarks mapped into face-box-relative unit coordinates, derived once by
/// [`crate::landmarks::normalize`]. Comparable across images regardless of
/// face size or position in frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLandmarks {
    pub positions: Vec<Point>,
    pub jaw_outline: Vec<Point>,
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub nose: Vec<Point>,
    pub mouth: Vec<Point>,
}
