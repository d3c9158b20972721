//! Nearest low-denominator fraction for a decimal value
//!
//! Denominator lists come from curated per-unit tables (inches use
//! 2, 4, 8, 16; cups use 2, 3, 4) so the search is deliberately limited to
//! the candidates it is handed, in the order it is handed them.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::number::{create_normal, format_number, is_whole, round_half_up, EPSILON};

/// A fractional approximation of a value.
///
/// ```
/// use quanta_core::Fraction;
///
/// assert_eq!(Fraction::new(0.5, &[2, 3, 4]).display, "1/2");
/// assert_eq!(Fraction::new(1.5, &[2, 3, 4]).display, "1 1/2");
/// assert_eq!(Fraction::new(0.125, &[2, 3, 4]).display, "0.125");
/// assert_eq!(Fraction::new(0.125, &[2, 3, 4, 8]).display, "1/8");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    /// The value the fraction was built for
    pub value: f64,
    /// Signed numerator. Equals `value` when no denominator was adopted.
    pub numerator: f64,
    /// Adopted denominator, 1 when none was
    pub denominator: u32,
    /// `numerator / denominator`
    pub actual: f64,
    /// `|actual - value|`
    pub distance: f64,
    /// Whole part of `actual`, truncated toward zero
    pub whole: i64,
    /// Part over the denominator when there is a whole part; never negative
    pub remainder: u64,
    /// Whether `actual` is an acceptable stand-in for `value`
    pub valid: bool,
    /// `3`, `1/4`, `-1/4`, `2 1/4`, or the plain decimal when no denominator fit
    pub display: String,
}

impl Fraction {
    /// Closest fraction using every denominator in the list.
    pub fn new(value: f64, denominators: &[u32]) -> Self {
        Self::search(value, denominators, None, false)
    }

    /// Closest fraction with optional limits.
    ///
    /// Denominators above `largest` are skipped. With `round_down` a
    /// candidate that lands above `value` is never taken. Only strict
    /// improvements (by more than `EPSILON`) replace the current best, so for
    /// equally good candidates the first one in the list wins.
    pub fn search(value: f64, denominators: &[u32], largest: Option<u32>, round_down: bool) -> Self {
        let mut distance = (value.floor() - value).abs();
        let mut denominator = 1u32;
        let mut numerator = value;

        for &den in denominators {
            if distance <= EPSILON {
                break;
            }
            if den == 0 || largest.is_some_and(|max| den > max) {
                continue;
            }

            let d = f64::from(den);
            let num = round_half_up(value * d);
            let signed = num / d - value;

            if round_down && signed > 0.0 {
                continue;
            }

            let dis = signed.abs();
            if dis + EPSILON < distance {
                denominator = den;
                numerator = num;
                distance = dis;
            }
        }

        let actual = numerator / f64::from(denominator);
        let whole = if value < 0.0 { actual.ceil() } else { actual.floor() } as i64;
        let remainder = round_half_up((value - whole as f64) * f64::from(denominator)).abs() as u64;
        let valid = if denominator == 1 {
            is_whole(numerator)
        } else {
            distance <= EPSILON
        };

        let display = if denominator == 1 {
            format_number(numerator)
        } else if whole == 0 {
            format!("{}/{}", format_number(numerator), denominator)
        } else if remainder == 0 {
            whole.to_string()
        } else {
            format!("{} {}/{}", whole, remainder, denominator)
        };

        Fraction {
            value,
            numerator,
            denominator,
            actual,
            distance,
            whole,
            remainder,
            valid,
            display,
        }
    }

    /// Fractions below one still read singular: "1/2 mile", not "1/2 miles".
    pub fn is_singular(&self) -> bool {
        self.actual.abs().ceil() == 1.0
    }

    /// The display string followed by a unit label.
    pub fn with_unit(&self, unit: &str) -> String {
        create_normal(&self.display, unit)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fractions() {
        assert_eq!(Fraction::new(0.5, &[2, 3, 4]).display, "1/2");
        assert_eq!(Fraction::new(0.25, &[2, 3, 4]).display, "1/4");
        assert_eq!(Fraction::new(1.0 / 3.0, &[2, 3, 6, 12]).display, "1/3");
        assert_eq!(Fraction::new(5.0 / 3.0, &[2, 3]).display, "1 2/3");
    }

    #[test]
    fn test_first_improvement_wins() {
        // 2/6 is found before 4/12 and nothing later is strictly closer
        assert_eq!(Fraction::new(1.0 / 3.0, &[2, 6, 12]).display, "2/6");
    }

    #[test]
    fn test_whole_values() {
        let f = Fraction::new(4.0, &[2, 4, 8, 16]);
        assert_eq!(f.display, "4");
        assert_eq!(f.denominator, 1);
        assert!(f.valid);
    }

    #[test]
    fn test_no_denominator_fits() {
        let f = Fraction::new(0.125, &[2, 3, 4]);
        assert!(!f.valid);
        assert_eq!(f.display, "0.125");

        let f = Fraction::new(1.0 / 100.0, &[2, 3, 4]);
        assert_eq!(f.display, "0.01");

        let f = Fraction::new(0.5, &[]);
        assert!(!f.valid);
    }

    #[test]
    fn test_eighths() {
        let f = Fraction::new(0.125, &[2, 3, 4, 8]);
        assert!(f.valid);
        assert_eq!(f.display, "1/8");
        assert_eq!(f.numerator, 1.0);
        assert_eq!(f.denominator, 8);
    }

    #[test]
    fn test_largest_denominator() {
        let f = Fraction::search(1.0 / 8.0, &[2, 3, 4, 5, 6, 7, 8], None, false);
        assert_eq!(f.display, "1/8");

        let f = Fraction::search(1.0 / 8.0, &[2, 3, 4, 5, 6, 7, 8], Some(6), false);
        assert_eq!(f.display, "1/6");
        assert!(!f.valid);
    }

    #[test]
    fn test_round_down() {
        let f = Fraction::search(0.3, &[2, 3, 4], None, true);
        assert_eq!(f.display, "1/4");
        assert!(f.actual <= 0.3);

        let f = Fraction::search(0.3, &[2, 3, 4], None, false);
        assert_eq!(f.display, "1/3");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(Fraction::new(-0.25, &[2, 4]).display, "-1/4");
        assert_eq!(Fraction::new(-0.1, &[10]).display, "-1/10");

        let f = Fraction::new(-2.5, &[2]);
        assert_eq!(f.whole, -2);
        assert_eq!(f.remainder, 1);
        assert_eq!(f.display, "-2 1/2");
    }

    #[test]
    fn test_mixed_with_zero_remainder() {
        let f = Fraction::new(3.9999, &[2]);
        assert!(f.valid);
        assert_eq!(f.display, "4");
    }

    #[test]
    fn test_valid_implies_close() {
        let denominators = [2, 3, 4, 8, 16];
        for i in 0..200 {
            let v = i as f64 * 0.0173 - 1.5;
            let f = Fraction::new(v, &denominators);
            if f.valid {
                assert!((f.actual - v).abs() <= EPSILON, "{} -> {}", v, f.display);
            }
        }
    }

    #[test]
    fn test_is_singular() {
        assert!(Fraction::new(0.5, &[2]).is_singular());
        assert!(Fraction::new(1.0, &[2]).is_singular());
        assert!(!Fraction::new(1.5, &[2]).is_singular());
        assert!(!Fraction::new(0.0, &[2]).is_singular());
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(Fraction::new(0.25, &[4]).with_unit("cup"), "1/4 cup");
        assert_eq!(Fraction::new(0.25, &[4]).with_unit(""), "1/4");
    }
}
