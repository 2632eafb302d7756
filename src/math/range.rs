//! Inclusive linear ranges for parameter sweeps.

use crate::error::AppError;

/// Relative tolerance (in units of `step`) for including `max`.
pub const RANGE_TOLERANCE: f64 = 1e-5;

/// Upper bound on the number of values in one range.
pub const MAX_RANGE_POINTS: usize = 1_000_000;

/// Values `min, min + step, …` up to and including `max`.
///
/// `max` is kept even when accumulated floating-point error would push the
/// last value slightly past it: a value is included while
/// `x <= max + step * RANGE_TOLERANCE`. Values are computed as
/// `min + i * step` rather than by repeated addition.
pub fn linear_range(min: f64, max: f64, step: f64) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(AppError::input(format!(
            "Invalid range: min={min}, max={max}, step={step} (must be finite)."
        )));
    }
    if step <= 0.0 {
        return Err(AppError::input(format!("Range step must be > 0, got {step}.")));
    }
    if max < min {
        return Err(AppError::input(format!("Range max ({max}) is below min ({min}).")));
    }

    let intervals = ((max - min) / step + RANGE_TOLERANCE).floor();
    if !intervals.is_finite() || intervals >= MAX_RANGE_POINTS as f64 {
        return Err(AppError::input(format!(
            "Range [{min}, {max}] with step {step} exceeds {MAX_RANGE_POINTS} points."
        )));
    }
    let n = intervals as usize;
    Ok((0..=n).map(|i| min + step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_endpoints() {
        let v = linear_range(1.0, 5.0, 0.1).unwrap();
        assert_eq!(v.len(), 41);
        assert!((v[0] - 1.0).abs() < 1e-12);
        assert!((v[40] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn integer_steps() {
        assert_eq!(linear_range(0.0, 10.0, 1.0).unwrap().len(), 11);
        assert_eq!(linear_range(0.0, 100.0, 5.0).unwrap().len(), 21);
    }

    #[test]
    fn max_not_on_grid_is_excluded() {
        let v = linear_range(0.0, 1.0, 0.3).unwrap();
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|x| *x <= 1.0));
    }

    #[test]
    fn single_point_when_min_equals_max() {
        assert_eq!(linear_range(2.0, 2.0, 0.5).unwrap(), vec![2.0]);
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(linear_range(0.0, 1.0, 0.0).is_err());
        assert!(linear_range(0.0, 1.0, -0.1).is_err());
        assert!(linear_range(1.0, 0.0, 0.1).is_err());
        assert!(linear_range(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn tiny_step_is_rejected_instead_of_allocating() {
        let err = linear_range(0.0, 1.0, 1e-300).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(linear_range(0.0, f64::MAX, f64::MIN_POSITIVE).is_err());
        // 1_000_000 intervals would give one point more than the cap.
        assert!(linear_range(0.0, 1_000_000.0, 1.0).is_err());
        assert_eq!(linear_range(0.0, 999_998.0, 1.0).unwrap().len(), 999_999);
    }
}
