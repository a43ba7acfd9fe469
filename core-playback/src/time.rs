//! Rational-time helpers and frame/time domain conversions.

use bridge_traits::{Rational, NO_TIMESTAMP};

/// Rates and durations below this value are treated as zero.
pub const EPS: f64 = 0.000025;

/// Convert a rational to `f64`, yielding 0 for degenerate fractions.
pub fn r2d(value: Rational) -> f64 {
    if value.is_degenerate() {
        0.0
    } else {
        value.num as f64 / value.den as f64
    }
}

/// Clamp a container timestamp to a usable non-negative value.
///
/// The "no timestamp" sentinel and negative values both map to 0.
pub fn sanitize_timestamp(value: i64) -> i64 {
    if value == NO_TIMESTAMP || value < 0 {
        0
    } else {
        value
    }
}

/// Frame number shown at `time_ms` for a stream running at `fps`.
///
/// Truncates toward zero; returns 0 when the rate is effectively zero or the
/// time is negative.
pub fn frame_number_from_time(time_ms: f64, fps: f64) -> i64 {
    if fps < EPS || time_ms <= 0.0 || !time_ms.is_finite() {
        return 0;
    }
    (time_ms / 1000.0 * fps).floor() as i64
}

/// Presentation time of `frame` in milliseconds.
pub fn frame_to_time_ms(frame: i64, fps: f64) -> f64 {
    if fps < EPS {
        return 0.0;
    }
    frame as f64 * 1000.0 / fps
}

/// Milliseconds between two frames at `fps` scaled by `speed`.
pub fn frame_interval_ms(fps: f64, speed: f64) -> f64 {
    let rate = fps * speed;
    if rate < EPS {
        0.0
    } else {
        1000.0 / rate
    }
}
