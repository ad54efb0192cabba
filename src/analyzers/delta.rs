use crate::analyzers::types::{Delta, Direction};

/// Relative change from `previous` to `current`, in percent.
///
/// `inverse_polarity` marks metrics where lower is better (cost metrics), so
/// a decrease is reported as favorable.
pub fn compute_delta(current: f64, previous: f64, inverse_polarity: bool) -> Delta {
    let current = if current.is_finite() { current } else { 0.0 };
    let previous = if previous.is_finite() { previous } else { 0.0 };

    if previous == 0.0 && current == 0.0 {
        return Delta {
            relative_change_percent: 0.0,
            direction: Direction::Flat,
            is_favorable: true,
        };
    }

    if previous == 0.0 {
        return Delta {
            relative_change_percent: 100.0,
            direction: Direction::Up,
            is_favorable: !inverse_polarity,
        };
    }

    let change = (current - previous) / previous.abs() * 100.0;
    let change = if change.is_finite() { change } else { 0.0 };
    let is_up = change >= 0.0;

    Delta {
        relative_change_percent: change,
        direction: if is_up { Direction::Up } else { Direction::Down },
        is_favorable: if inverse_polarity { !is_up } else { is_up },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_normal_polarity() {
        let d = compute_delta(150.0, 100.0, false);
        assert_eq!(d.relative_change_percent, 50.0);
        assert_eq!(d.direction, Direction::Up);
        assert!(d.is_favorable);
    }

    #[test]
    fn test_cost_decrease_is_favorable() {
        let d = compute_delta(80.0, 100.0, true);
        assert_eq!(d.relative_change_percent, -20.0);
        assert_eq!(d.direction, Direction::Down);
        assert!(d.is_favorable);
    }

    #[test]
    fn test_both_zero_is_flat() {
        let d = compute_delta(0.0, 0.0, false);
        assert_eq!(d.relative_change_percent, 0.0);
        assert_eq!(d.direction, Direction::Flat);
        assert!(d.is_favorable);
    }

    #[test]
    fn test_from_zero_is_full_increase() {
        let normal = compute_delta(50.0, 0.0, false);
        assert_eq!(normal.relative_change_percent, 100.0);
        assert_eq!(normal.direction, Direction::Up);
        assert!(normal.is_favorable);

        let inverse = compute_delta(50.0, 0.0, true);
        assert_eq!(inverse.relative_change_percent, 100.0);
        assert_eq!(inverse.direction, Direction::Up);
        assert!(!inverse.is_favorable);
    }

    #[test]
    fn test_overflowing_change_is_zero() {
        for (current, previous) in [(1.0, 1e-308), (f64::MAX, -f64::MAX)] {
            let d = compute_delta(current, previous, false);
            assert_eq!(d.relative_change_percent, 0.0, "{current} vs {previous}");
            assert_eq!(d.direction, Direction::Up);
            assert!(d.is_favorable);
        }
    }

    #[test]
    fn test_negative_previous_uses_magnitude() {
        let d = compute_delta(-50.0, -100.0, false);
        assert_eq!(d.relative_change_percent, 50.0);
        assert_eq!(d.direction, Direction::Up);
    }

    #[test]
    fn test_unchanged_nonzero_counts_as_up() {
        let d = compute_delta(10.0, 10.0, true);
        assert_eq!(d.relative_change_percent, 0.0);
        assert_eq!(d.direction, Direction::Up);
        assert!(!d.is_favorable);
    }
}
