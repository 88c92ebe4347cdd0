//! Rating conversion and the star-widget fill animation.
//!
//! Movies are scored on a 0–10 scale; the detail screen shows 0–5 stars in
//! half-star steps.

use std::time::Duration;

use crate::error::BundleError;

/// Highest score on the source scale.
pub const MAX_RATING: f32 = 10.0;

/// Number of stars in the widget.
pub const MAX_STARS: f32 = 5.0;

/// Parse the string-encoded rating carried in a navigation bundle.
pub fn parse_rating(raw: &str) -> Result<f32, BundleError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| BundleError::InvalidRating(raw.to_string()))
}

/// Convert a 0–10 score into the 0–5 star target: `round(rating) / 2`.
///
/// Out-of-range scores are clamped first, so the result is always a
/// multiple of 0.5 in `[0, 5]`.
pub fn display_rating(rating: f32) -> f32 {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, MAX_RATING)
    } else {
        0.0
    };
    rating.round() / 2.0
}

/// Text form used in storage and bundles; always keeps a decimal point.
pub fn format_rating(rating: f32) -> String {
    format!("{rating:?}")
}

/// Cubic Bézier easing curve through (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Easing {
    /// Material "fast out, slow in": quick start, long gentle settle.
    pub const FAST_OUT_SLOW_IN: Easing = Easing {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    /// Eased progress for linear progress `p` in `[0, 1]`.
    pub fn apply(&self, p: f32) -> f32 {
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(p);
        bezier(t, self.y1, self.y2)
    }

    /// Find the curve parameter whose x coordinate is `x`.
    fn solve_t(&self, x: f32) -> f32 {
        // Newton first; fall back to bisection where the slope flattens out.
        let mut t = x;
        for _ in 0..8 {
            let err = bezier(t, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let value = bezier(t, self.x1, self.x2);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// One-shot, non-repeating fill of the star widget from zero to a target.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingAnimation {
    target: f32,
    duration: Duration,
    easing: Easing,
}

impl RatingAnimation {
    pub fn new(target: f32, duration: Duration) -> Self {
        Self {
            target: target.clamp(0.0, MAX_STARS),
            duration,
            easing: Easing::FAST_OUT_SLOW_IN,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Widget value after `elapsed`; pinned to the target once finished.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if self.is_finished(elapsed) {
            return self.target;
        }
        let p = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.target * self.easing.apply(p)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.duration.is_zero() || elapsed >= self.duration
    }
}
