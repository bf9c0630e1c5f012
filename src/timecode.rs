//! Timecode normalization and resolution.
//!
//! Timecodes arrive in several shapes: plain seconds, colon-delimited clock
//! strings (`01:01:33.045`, commas accepted as decimal separators), or
//! already-split component lists. [`TimeValue`] normalizes all of them into a
//! canonical seconds value. [`TimecodeRequest`] models what the user asked
//! for (`t=<time>`, `f=<frame index>`, or nothing at all), and
//! [`resolve_timecode`] turns a request into a concrete, bounds-checked
//! offset against a probed duration and frame rate.
//!
//! # Example
//!
//! ```
//! use framealign::{resolve_timecode, TimecodeRequest, TimeValue};
//!
//! let seconds = TimeValue::Text("01:01:33.045".into()).to_seconds()?;
//! assert_eq!(seconds, 3693.045);
//!
//! let request: TimecodeRequest = "f=240".parse()?;
//! assert_eq!(resolve_timecode(100.0, 24.0, &request)?, 10.0);
//! # Ok::<(), framealign::FrameAlignError>(())
//! ```

use std::str::FromStr;

use rand::Rng;

use crate::error::FrameAlignError;

/// Seconds-per-component weights, least significant first.
const FACTORS: [f64; 3] = [1.0, 60.0, 3600.0];

/// A timecode in one of the accepted input shapes.
///
/// [`to_seconds`](TimeValue::to_seconds) converts any of them into plain
/// seconds. Components are interpreted right-to-left as seconds, minutes,
/// hours; missing higher components are implicitly zero.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Already a seconds value; returned unchanged.
    Seconds(f64),
    /// Colon-delimited clock string. Commas are accepted as decimal
    /// separators (`1:33,5` is 99.5 seconds).
    Text(String),
    /// Pre-split numeric components, most significant first
    /// (`[1.0, 1.0, 2.0]` is 3662 seconds).
    Parts(Vec<f64>),
}

impl TimeValue {
    /// Normalize this value into seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FrameAlignError::InvalidTimecodeFormat`] when a string has
    /// more than three colon-separated components, a component is not
    /// numeric, or a component list has the wrong shape.
    pub fn to_seconds(&self) -> Result<f64, FrameAlignError> {
        match self {
            TimeValue::Seconds(seconds) => Ok(*seconds),
            TimeValue::Text(raw) => {
                let parts = raw
                    .split(':')
                    .map(|part| part.trim().replace(',', ".").parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| FrameAlignError::InvalidTimecodeFormat(raw.clone()))?;
                weighted_sum(&parts).ok_or_else(|| {
                    FrameAlignError::InvalidTimecodeFormat(raw.clone())
                })
            }
            TimeValue::Parts(parts) => weighted_sum(parts).ok_or_else(|| {
                FrameAlignError::InvalidTimecodeFormat(format!("{parts:?}"))
            }),
        }
    }
}

/// Sum components weighted as seconds/minutes/hours, right-to-left.
///
/// Returns `None` when the component count is not between 1 and 3.
fn weighted_sum(parts: &[f64]) -> Option<f64> {
    if parts.is_empty() || parts.len() > FACTORS.len() {
        return None;
    }
    Some(
        parts
            .iter()
            .rev()
            .zip(FACTORS)
            .map(|(part, factor)| part * factor)
            .sum(),
    )
}

/// Render a seconds offset as an underscore-separated `H_MM_SS` label.
///
/// Fractional seconds are rendered as six-digit microseconds
/// (`10.5` becomes `0_00_10.500000`), matching the fixed-width duration
/// rendering used in output file names.
pub fn human_label(seconds: f64) -> String {
    let mut whole = seconds.trunc() as u64;
    let mut micros = ((seconds - seconds.trunc()) * 1_000_000.0).round() as u64;
    if micros >= 1_000_000 {
        whole += 1;
        micros = 0;
    }

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    if micros > 0 {
        format!("{hours}_{minutes:02}_{secs:02}.{micros:06}")
    } else {
        format!("{hours}_{minutes:02}_{secs:02}")
    }
}

/// What the user asked the timecode to be.
///
/// Parsed from the CLI's `--timecode` string with [`FromStr`]; the absence of
/// a `--timecode` argument maps to [`TimecodeRequest::Random`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimecodeRequest {
    /// No request: sample a uniform offset in `[0, duration)` per episode.
    #[default]
    Random,
    /// `t=<seconds>` with a plain numeric value.
    Explicit(f64),
    /// `t=<clock string>`, normalized through [`TimeValue::Text`].
    Duration(String),
    /// `f=<frame index>`, converted through the probed frame rate.
    FrameIndex(u64),
}

impl FromStr for TimecodeRequest {
    type Err = FrameAlignError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(rest) = trimmed.strip_prefix("t=") {
            if let Ok(seconds) = rest.parse::<f64>() {
                return Ok(TimecodeRequest::Explicit(seconds));
            }
            return Ok(TimecodeRequest::Duration(rest.to_string()));
        }
        if let Some(rest) = trimmed.strip_prefix("f=") {
            let index = rest
                .parse::<u64>()
                .map_err(|_| FrameAlignError::InvalidTimecodeFormat(value.to_string()))?;
            return Ok(TimecodeRequest::FrameIndex(index));
        }
        Err(FrameAlignError::InvalidTimecodeFormat(value.to_string()))
    }
}

/// Resolve a [`TimecodeRequest`] into a concrete seconds offset.
///
/// The resolved value always satisfies `0 <= seconds <= duration`. Random
/// requests sample uniformly in `[0, duration)` and truncate to two decimal
/// places; frame-index requests convert through `index / frame_rate` rounded
/// to two decimal places.
///
/// # Errors
///
/// Returns [`FrameAlignError::InvalidTimecodeRange`] when the resolved value
/// falls outside the duration, [`FrameAlignError::InvalidTimecodeFormat`]
/// when a clock string cannot be normalized, and
/// [`FrameAlignError::InvalidFrameRate`] when a frame-index request meets a
/// non-positive frame rate.
pub fn resolve_timecode(
    duration: f64,
    frame_rate: f64,
    request: &TimecodeRequest,
) -> Result<f64, FrameAlignError> {
    let seconds = match request {
        TimecodeRequest::Random => {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(FrameAlignError::InvalidTimecodeRange {
                    seconds: 0.0,
                    duration,
                });
            }
            let sampled = rand::thread_rng().gen_range(0.0..duration);
            // Truncating keeps the sample strictly below the duration.
            return Ok((sampled * 100.0).floor() / 100.0);
        }
        TimecodeRequest::Explicit(seconds) => *seconds,
        TimecodeRequest::Duration(raw) => TimeValue::Text(raw.clone()).to_seconds()?,
        TimecodeRequest::FrameIndex(index) => {
            if !frame_rate.is_finite() || frame_rate <= 0.0 {
                return Err(FrameAlignError::InvalidFrameRate(frame_rate));
            }
            ((*index as f64 / frame_rate) * 100.0).round() / 100.0
        }
    };

    if !(0.0..=duration).contains(&seconds) {
        return Err(FrameAlignError::InvalidTimecodeRange { seconds, duration });
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clock_strings() {
        assert_eq!(
            TimeValue::Text("01:01:33.045".into()).to_seconds().unwrap(),
            3693.045
        );
        assert_eq!(TimeValue::Text("1:33,5".into()).to_seconds().unwrap(), 99.5);
        assert_eq!(TimeValue::Text("33.5".into()).to_seconds().unwrap(), 33.5);
    }

    #[test]
    fn normalize_seconds_passthrough() {
        assert_eq!(TimeValue::Seconds(15.4).to_seconds().unwrap(), 15.4);
    }

    #[test]
    fn normalize_component_lists() {
        assert_eq!(
            TimeValue::Parts(vec![1.0, 1.0, 2.0]).to_seconds().unwrap(),
            3662.0
        );
        assert_eq!(
            TimeValue::Parts(vec![1.0, 21.5]).to_seconds().unwrap(),
            81.5
        );
    }

    #[test]
    fn normalize_rejects_bad_shapes() {
        assert!(TimeValue::Text("1:2:3:4".into()).to_seconds().is_err());
        assert!(TimeValue::Text("1:oops".into()).to_seconds().is_err());
        assert!(TimeValue::Parts(vec![]).to_seconds().is_err());
        assert!(TimeValue::Parts(vec![1.0, 2.0, 3.0, 4.0]).to_seconds().is_err());
    }

    #[test]
    fn label_whole_and_fractional() {
        assert_eq!(human_label(10.0), "0_00_10");
        assert_eq!(human_label(10.5), "0_00_10.500000");
        assert_eq!(human_label(3693.0), "1_01_33");
    }

    #[test]
    fn request_parsing() {
        assert_eq!(
            "t=150".parse::<TimecodeRequest>().unwrap(),
            TimecodeRequest::Explicit(150.0)
        );
        assert_eq!(
            "t=00:00:05".parse::<TimecodeRequest>().unwrap(),
            TimecodeRequest::Duration("00:00:05".into())
        );
        assert_eq!(
            "f=240".parse::<TimecodeRequest>().unwrap(),
            TimecodeRequest::FrameIndex(240)
        );
        assert!("x=10".parse::<TimecodeRequest>().is_err());
        assert!("".parse::<TimecodeRequest>().is_err());
        assert!("f=ten".parse::<TimecodeRequest>().is_err());
    }

    #[test]
    fn resolve_frame_index() {
        let request = TimecodeRequest::FrameIndex(240);
        assert_eq!(resolve_timecode(100.0, 24.0, &request).unwrap(), 10.0);
    }

    #[test]
    fn resolve_clock_string() {
        let request = TimecodeRequest::Duration("00:00:05".into());
        assert_eq!(resolve_timecode(100.0, 24.0, &request).unwrap(), 5.0);
    }

    #[test]
    fn resolve_out_of_range() {
        let request = TimecodeRequest::Explicit(150.0);
        assert!(matches!(
            resolve_timecode(100.0, 24.0, &request),
            Err(FrameAlignError::InvalidTimecodeRange { .. })
        ));
    }

    #[test]
    fn resolve_random_stays_below_duration() {
        for _ in 0..256 {
            let seconds = resolve_timecode(100.0, 24.0, &TimecodeRequest::Random).unwrap();
            assert!((0.0..100.0).contains(&seconds), "sampled {seconds}");
        }
    }

    #[test]
    fn resolve_random_rejects_zero_duration() {
        assert!(resolve_timecode(0.0, 24.0, &TimecodeRequest::Random).is_err());
    }

    #[test]
    fn resolve_frame_index_rejects_zero_rate() {
        let request = TimecodeRequest::FrameIndex(10);
        assert!(matches!(
            resolve_timecode(100.0, 0.0, &request),
            Err(FrameAlignError::InvalidFrameRate(_))
        ));
    }
}
