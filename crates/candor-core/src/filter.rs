//! Pixel-level filter heuristics.
//!
//! Skin-smoothing filters leave two fingerprints that need no landmarks to
//! see: edge response collapses (blur) and neighboring pixels stop varying
//! (smoothness). Both are measured directly on the decoded RGBA buffer,
//! independently of the landmark pipeline. The passes run in a fixed
//! sequential order, so identical pixel input always produces bit-identical
//! output regardless of environment.

use serde::Serialize;
use thiserror::Error;

use crate::config::Tunables;

/// Raised by the [`PixelFrame`] constructor when the buffer length does not
/// match the declared dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pixel buffer of {actual} bytes does not match a {width}x{height} RGBA frame ({expected} bytes)")]
pub struct FrameSizeMismatch {
    pub width: u32,
    pub height: u32,
    pub expected: usize,
    pub actual: usize,
}

/// A decoded image as a flat, contiguous, row-major RGBA byte buffer.
///
/// Pixel `(x, y)` starts at byte `(y * width + x) * 4`. The flat layout keeps
/// the per-pixel loops to plain index arithmetic.
#[derive(Debug, Clone)]
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelFrame {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FrameSizeMismatch> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(FrameSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Luminance of the pixel starting at `idx`: mean of R, G, B.
    #[inline]
    fn luminance(&self, idx: usize) -> f64 {
        (self.data[idx] as f64 + self.data[idx + 1] as f64 + self.data[idx + 2] as f64) / 3.0
    }
}

/// Blur and smoothness estimates for one frame, each in `[0,1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSignal {
    pub blur_level: f32,
    pub smoothness: f32,
    pub filter_score: f32,
}

impl FilterSignal {
    /// The signal used when pixel heuristics are not applicable, e.g. when
    /// the two photos show different people.
    pub fn zeroed() -> Self {
        Self {
            blur_level: 0.0,
            smoothness: 0.0,
            filter_score: 0.0,
        }
    }
}

/// Run both heuristics over a frame.
pub fn detect(frame: &PixelFrame, tunables: &Tunables) -> FilterSignal {
    let blur_level = blur_level(frame, tunables);
    let smoothness = smoothness(frame, tunables);
    FilterSignal {
        blur_level,
        smoothness,
        filter_score: (blur_level + smoothness) / 2.0,
    }
}

/// Blur via Laplacian response variance over luminance.
///
/// Every interior pixel (1-pixel border excluded) contributes
/// `|4·center − up − down − left − right|`; a sharp image spreads these
/// responses widely, a blurred one collapses them toward a common value.
/// Low variance therefore reads as high blur. A frame too small to have
/// interior pixels yields zero responses and reads as fully blurred.
fn blur_level(frame: &PixelFrame, tunables: &Tunables) -> f32 {
    let w = frame.width as usize;
    let h = frame.height as usize;

    let mut responses = Vec::new();
    if w >= 3 && h >= 3 {
        responses.reserve((w - 2) * (h - 2));
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let center = frame.luminance((y * w + x) * 4);
                let up = frame.luminance(((y - 1) * w + x) * 4);
                let down = frame.luminance(((y + 1) * w + x) * 4);
                let left = frame.luminance((y * w + x - 1) * 4);
                let right = frame.luminance((y * w + x + 1) * 4);

                responses.push((4.0 * center - up - down - left - right).abs());
            }
        }
    }

    let variance = if responses.is_empty() {
        0.0
    } else {
        let count = responses.len() as f64;
        let mean = responses.iter().sum::<f64>() / count;
        responses.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / count
    };

    (1.0 - variance / tunables.blur_variance_scale).clamp(0.0, 1.0) as f32
}

/// Smoothness via mean absolute variation to the right and bottom neighbors.
///
/// For every pixel outside the last row/column, six per-channel differences
/// (R, G, B toward each neighbor) are averaged; the frame-wide mean of those
/// variations is scaled so natural skin texture reads near 0 and filtered
/// skin near 1.
fn smoothness(frame: &PixelFrame, tunables: &Tunables) -> f32 {
    let w = frame.width as usize;
    let h = frame.height as usize;

    let mut total = 0.0f64;
    let mut count = 0usize;

    if w >= 2 && h >= 2 {
        for y in 0..h - 1 {
            for x in 0..w - 1 {
                let idx = (y * w + x) * 4;
                let right = (y * w + x + 1) * 4;
                let bottom = ((y + 1) * w + x) * 4;

                let mut variation = 0.0f64;
                for c in 0..3 {
                    variation +=
                        (frame.data[idx + c] as f64 - frame.data[right + c] as f64).abs();
                    variation +=
                        (frame.data[idx + c] as f64 - frame.data[bottom + c] as f64).abs();
                }
                total += variation / 6.0;
                count += 1;
            }
        }
    }

    let avg_variation = if count == 0 { 0.0 } else { total / count as f64 };
    (1.0 - avg_variation / tunables.smoothness_variation_scale).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(width: u32, height: u32, rgb: [u8; 3]) -> PixelFrame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        PixelFrame::from_rgba(width, height, data).unwrap()
    }

    fn checkerboard_frame(width: u32, height: u32) -> PixelFrame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 0u8 } else { 255u8 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelFrame::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_frame_rejects_wrong_buffer_length() {
        let err = PixelFrame::from_rgba(4, 4, vec![0u8; 10]).unwrap_err();
        assert_eq!(err.expected, 64);
        assert_eq!(err.actual, 10);
    }

    #[test]
    fn test_uniform_frame_reads_as_fully_blurred() {
        let frame = uniform_frame(16, 16, [120, 90, 200]);
        let signal = detect(&frame, &Tunables::default());

        // Zero Laplacian response everywhere: variance 0, blur exactly 1
        assert_eq!(signal.blur_level, 1.0);
        assert_eq!(signal.smoothness, 1.0);
        assert_eq!(signal.filter_score, 1.0);
    }

    #[test]
    fn test_checkerboard_has_zero_smoothness() {
        let frame = checkerboard_frame(16, 16);
        let signal = detect(&frame, &Tunables::default());

        // Every neighbor differs by 255 per channel, far past the scale
        assert_eq!(signal.smoothness, 0.0);
        // The Laplacian response is identical at every interior pixel, so the
        // checkerboard is "uniformly edgy": zero variance, maximal blur level
        assert_eq!(signal.blur_level, 1.0);
        assert_eq!(signal.filter_score, 0.5);
    }

    #[test]
    fn test_sharp_detail_lowers_blur_level() {
        // Black frame with a single bright pixel: a strong isolated edge
        let mut frame = uniform_frame(9, 9, [0, 0, 0]);
        let center = (4 * 9 + 4) * 4;
        frame.data[center] = 255;
        frame.data[center + 1] = 255;
        frame.data[center + 2] = 255;

        let signal = detect(&frame, &Tunables::default());
        assert!(signal.blur_level < 1.0);
        assert!(signal.smoothness < 1.0);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let frame = checkerboard_frame(24, 17);
        let a = detect(&frame, &Tunables::default());
        let b = detect(&frame, &Tunables::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_tiny_frames_do_not_panic() {
        for (w, h) in [(0, 0), (1, 1), (2, 2), (1, 8), (8, 1)] {
            let frame = uniform_frame(w, h, [50, 50, 50]);
            let signal = detect(&frame, &Tunables::default());
            // No measurable interior: reads as flat
            assert_eq!(signal.blur_level, 1.0);
        }
    }

    #[test]
    fn test_zeroed_signal() {
        let signal = FilterSignal::zeroed();
        assert_eq!(signal.filter_score, 0.0);
    }
}
