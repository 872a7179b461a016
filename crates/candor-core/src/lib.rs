//! # candor-core
//!
//! Scoring engine that quantifies how far a retouched portrait diverges from
//! an unedited reference photo of the same person: a bounded 0–100
//! discrepancy index plus a discrete grade.
//!
//! The pipeline:
//! 1. Landmark normalization into face-box-relative unit coordinates
//! 2. Geometric similarity across jaw contour, eye size, nose size, and
//!    feature placement
//! 3. Optional identity-embedding distance, classified into a same/different
//!    person verdict and blended into the similarity
//! 4. Pixel filter heuristics (blur, smoothness) over the candidate frame
//! 5. Score composition and grade classification
//!
//! Face detection, landmark extraction, and embedding computation are
//! external collaborators: this crate consumes their outputs as a
//! [`FaceSample`] per image and never touches a camera, a model file, or
//! disk. All stages are pure functions over immutable inputs.
//!
//! ```
//! use candor_core::{FaceBox, FaceLandmarks, FaceSample, Photo, PixelFrame, Point, Scorer, Tunables};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let eye = |cx: f32, cy: f32| vec![
//!     Point::new(cx - 10.0, cy - 4.0),
//!     Point::new(cx + 10.0, cy - 4.0),
//!     Point::new(cx + 10.0, cy + 4.0),
//!     Point::new(cx - 10.0, cy + 4.0),
//! ];
//! let landmarks = FaceLandmarks {
//!     positions: vec![Point::new(200.0, 200.0)],
//!     jaw_outline: vec![
//!         Point::new(120.0, 180.0),
//!         Point::new(200.0, 300.0),
//!         Point::new(280.0, 180.0),
//!     ],
//!     left_eye: eye(160.0, 180.0),
//!     right_eye: eye(240.0, 180.0),
//!     nose: vec![
//!         Point::new(200.0, 190.0),
//!         Point::new(190.0, 230.0),
//!         Point::new(210.0, 230.0),
//!     ],
//!     mouth: vec![
//!         Point::new(170.0, 265.0),
//!         Point::new(230.0, 265.0),
//!         Point::new(200.0, 280.0),
//!     ],
//! };
//! let face = FaceSample {
//!     landmarks,
//!     bounds: FaceBox::new(100.0, 120.0, 200.0, 200.0),
//!     embedding: None,
//! };
//! let frame = PixelFrame::from_rgba(4, 4, vec![200u8; 4 * 4 * 4])?;
//! let photo = Photo { frame, face };
//!
//! let mut scorer = Scorer::with_seed(Tunables::default(), 42);
//! let result = scorer.score(&photo, &photo)?;
//! assert!(result.score <= 100);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod identity;
pub mod landmarks;
pub mod score;
pub mod types;

pub use config::{DampTier, OverrideTier, Tunables};
pub use engine::{Photo, Scorer};
pub use error::ScoreError;
pub use filter::{FilterSignal, FrameSizeMismatch, PixelFrame};
pub use geometry::GeometricSimilarity;
pub use identity::IdentityVerdict;
pub use score::{band_for_score, Grade, GradeBand, ScoreResult, GRADE_BANDS};
pub use types::{FaceBox, FaceLandmarks, FaceSample, NormalizedLandmarks, Point};
