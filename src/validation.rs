//! Input validation for durations and driver settings.
//!
//! Checks numeric inputs before they reach a task or the tick loop:
//! - Task durations must be finite and non-negative
//! - Tick intervals must be finite and strictly positive
//! - Clock start readings must be finite

use crate::error::{Result, TaskError};

/// Validates an explicit task duration (seconds).
///
/// Negative, NaN, and infinite values are rejected rather than clamped,
/// so a bad estimate is reported where it was produced.
pub fn validate_duration(name: &str, duration: f64) -> Result<f64> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(duration)
    } else {
        Err(TaskError::InvalidDuration {
            name: name.to_string(),
            duration,
        })
    }
}

/// Validates the interval between two driver ticks (seconds).
pub fn validate_tick_interval(interval_secs: f64) -> Result<f64> {
    if interval_secs.is_finite() && interval_secs > 0.0 {
        Ok(interval_secs)
    } else {
        Err(TaskError::InvalidConfig(format!(
            "tick interval must be a positive number of seconds, got {interval_secs}"
        )))
    }
}

/// Validates the clock reading a manager measures its first tick from.
pub fn validate_start_time(start_secs: f64) -> Result<f64> {
    if start_secs.is_finite() {
        Ok(start_secs)
    } else {
        Err(TaskError::InvalidConfig(format!(
            "start time must be a finite number of seconds, got {start_secs}"
        )))
    }
}

/// Parses a `name=secs` task specification.
pub fn parse_task_spec(spec: &str) -> Result<(String, f64)> {
    let (name, secs) = spec.split_once('=').ok_or_else(|| {
        TaskError::InvalidConfig(format!("expected NAME=SECONDS, got '{spec}'"))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(TaskError::InvalidConfig(format!(
            "task name is empty in '{spec}'"
        )));
    }

    let secs: f64 = secs.trim().parse().map_err(|_| {
        TaskError::InvalidConfig(format!("'{}' is not a number of seconds", secs.trim()))
    })?;

    Ok((name.to_string(), validate_duration(name, secs)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_durations() {
        assert_eq!(validate_duration("a", 0.0), Ok(0.0));
        assert_eq!(validate_duration("a", 46.5), Ok(46.5));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = validate_duration("a", -1.0).unwrap_err();
        assert_eq!(
            err,
            TaskError::InvalidDuration {
                name: "a".into(),
                duration: -1.0
            }
        );
    }

    #[test]
    fn test_non_finite_duration_rejected() {
        assert!(validate_duration("a", f64::NAN).is_err());
        assert!(validate_duration("a", f64::INFINITY).is_err());
    }

    #[test]
    fn test_tick_interval() {
        assert!(validate_tick_interval(1.0).is_ok());
        assert!(validate_tick_interval(0.0).is_err());
        assert!(validate_tick_interval(-0.5).is_err());
    }

    #[test]
    fn test_start_time() {
        assert_eq!(validate_start_time(-3.0), Ok(-3.0));
        assert_eq!(validate_start_time(100.0), Ok(100.0));
        assert!(validate_start_time(f64::NAN).is_err());
        assert!(validate_start_time(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_parse_task_spec() {
        assert_eq!(parse_task_spec("a=10"), Ok(("a".to_string(), 10.0)));
        assert_eq!(parse_task_spec(" build = 2.5 "), Ok(("build".to_string(), 2.5)));
    }

    #[test]
    fn test_parse_task_spec_errors() {
        assert!(matches!(
            parse_task_spec("no-separator"),
            Err(TaskError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_task_spec("=3"),
            Err(TaskError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_task_spec("a=soon"),
            Err(TaskError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_task_spec("a=-3"),
            Err(TaskError::InvalidDuration { .. })
        ));
    }
}
