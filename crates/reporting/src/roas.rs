//! Return on ad spend.

/// Revenue per unit of payout. A zero payout against non-zero revenue is
/// infinite; `None` when the ratio is undefined (`0 / 0`) or either input
/// is NaN.
pub fn roas(revenue: f64, payout: f64) -> Option<f64> {
    let ratio = revenue / payout;
    (!ratio.is_nan()).then_some(ratio)
}

/// Descending order for ROAS values, infinite first and undefined last.
pub fn cmp_desc(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_roas() {
        assert_eq!(roas(5000.0, 2000.0), Some(2.5));
        assert_eq!(roas(0.0, 100.0), Some(0.0));
        assert_eq!(roas(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_zero_payout() {
        assert_eq!(roas(100.0, 0.0), Some(f64::INFINITY));
        assert_eq!(roas(-100.0, 0.0), Some(f64::NEG_INFINITY));
        assert_eq!(roas(0.0, 0.0), None);
    }

    #[test]
    fn test_infinite_first_undefined_last() {
        let mut values = vec![None, Some(1.5), Some(f64::INFINITY), Some(4.0), None, Some(2.0)];
        values.sort_by(|a, b| cmp_desc(*a, *b));
        assert_eq!(
            values,
            vec![Some(f64::INFINITY), Some(4.0), Some(2.0), Some(1.5), None, None]
        );
        assert_eq!(cmp_desc(Some(1.0), Some(1.0)), Ordering::Equal);
    }
}
