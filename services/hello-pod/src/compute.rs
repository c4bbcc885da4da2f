//! CPU burn used to drive the horizontal pod autoscaler.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::error::ApiError;

pub const DEFAULT_DURATION_SECS: f64 = 1.0;
pub const MAX_DURATION_SECS: f64 = 60.0;

/// Upper bound (exclusive) of the integers summed in one pass.
const PASS_WIDTH: u64 = 1000;

/// Outcome of a single burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burn {
    pub requested: f64,
    pub elapsed: Duration,
    pub result: u64,
}

impl Burn {
    /// Elapsed seconds rounded to two decimals.
    pub fn elapsed_rounded(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 100.0).round() / 100.0
    }
}

/// Parse the `duration` query parameter.
///
/// Absent means the default. Values above the cap are clamped; there is no
/// lower clamp, so zero and negative durations return immediately.
pub fn parse_duration(raw: Option<&str>) -> Result<f64, ApiError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_DURATION_SECS);
    };

    let secs: f64 = raw.trim().parse().map_err(|_| ApiError::InvalidParameter {
        name: "duration",
        reason: format!("'{}' is not a number", raw),
    })?;

    if secs.is_nan() {
        return Err(ApiError::InvalidParameter {
            name: "duration",
            reason: "NaN is not a duration".to_string(),
        });
    }

    Ok(secs.min(MAX_DURATION_SECS))
}

/// Sum of the divisors of `i` in `[2, i)`.
fn divisor_sum(i: u64) -> u64 {
    (2..i).filter(|j| i % j == 0).sum()
}

fn pass() -> u64 {
    (0..PASS_WIDTH).map(|i| divisor_sum(black_box(i))).sum()
}

/// Burn CPU until at least `secs` seconds of wall-clock time have passed.
///
/// Blocks the calling thread; run it on the blocking pool from async code.
pub fn burn(secs: f64) -> Burn {
    let start = Instant::now();
    let mut result: u64 = 0;

    while start.elapsed().as_secs_f64() < secs {
        result = result.wrapping_add(pass());
    }

    Burn {
        requested: secs,
        elapsed: start.elapsed(),
        result,
    }
}
