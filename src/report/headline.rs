//! Headline statistics for the visible range.

use crate::domain::Observation;

/// Latest value and change versus the first point of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headline {
    pub last_value: f64,
    pub last_time: i64,
    pub change_abs: f64,
    /// Not guarded against a zero first value: that case is NaN or ±∞.
    pub change_pct: f64,
    pub is_non_negative: bool,
}

impl Headline {
    /// `None` for an empty range; callers leave the display untouched.
    ///
    /// When the first and last points share a timestamp the change is
    /// exactly zero.
    pub fn compute(points: &[Observation]) -> Option<Self> {
        let last = points.last()?;
        let first = points.first()?;

        if first.time() == last.time() {
            return Some(Self {
                last_value: last.value(),
                last_time: last.time(),
                change_abs: 0.0,
                change_pct: 0.0,
                is_non_negative: true,
            });
        }

        let change_abs = last.value() - first.value();
        Some(Self {
            last_value: last.value(),
            last_time: last.time(),
            change_abs,
            change_pct: change_abs / first.value() * 100.0,
            is_non_negative: change_abs >= 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(time: i64, value: f64) -> Observation {
        Observation::new(time, value).unwrap()
    }

    #[test]
    fn empty_range_has_no_headline() {
        assert_eq!(Headline::compute(&[]), None);
    }

    #[test]
    fn single_point_is_flat() {
        let h = Headline::compute(&[obs(100, 42.0)]).unwrap();
        assert_eq!(h.last_value, 42.0);
        assert_eq!(h.last_time, 100);
        assert_eq!(h.change_abs, 0.0);
        assert_eq!(h.change_pct, 0.0);
        assert!(h.is_non_negative);
    }

    #[test]
    fn same_timestamp_at_both_ends_is_flat() {
        let h = Headline::compute(&[obs(100, 10.0), obs(100, 30.0)]).unwrap();
        assert_eq!(h.last_value, 30.0);
        assert_eq!(h.change_abs, 0.0);
        assert!(h.is_non_negative);
    }

    #[test]
    fn change_against_first_point() {
        let h = Headline::compute(&[obs(0, 100.0), obs(50, 90.0), obs(100, 110.0)]).unwrap();
        assert!((h.change_abs - 10.0).abs() < 1e-12);
        assert!((h.change_pct - 10.0).abs() < 1e-12);
        assert!(h.is_non_negative);

        let h = Headline::compute(&[obs(0, 200.0), obs(100, 150.0)]).unwrap();
        assert_eq!(h.change_abs, -50.0);
        assert_eq!(h.change_pct, -25.0);
        assert!(!h.is_non_negative);
    }

    #[test]
    fn zero_first_value_gives_unguarded_percentage() {
        let up = Headline::compute(&[obs(0, 0.0), obs(100, 5.0)]).unwrap();
        assert_eq!(up.change_pct, f64::INFINITY);

        let flat = Headline::compute(&[obs(0, 0.0), obs(100, 0.0)]).unwrap();
        assert!(flat.change_pct.is_nan());
        assert!(flat.is_non_negative);
    }
}
