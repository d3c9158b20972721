//! Plain f64 helpers shared by every Quanta crate
//!
//! All arithmetic is double precision. Rounding only happens at the display
//! layer (fractions and decimal strings), never inside conversions.

/// Tolerance used for fraction searches and singular detection.
pub const EPSILON: f64 = 0.001;

/// Tolerance for treating a float as a whole number.
pub const WHOLE_TOLERANCE: f64 = 0.000_000_01;

/// True when `|x|` is within `EPSILON` of one ("1 cup", "-1 cup").
pub fn is_singular(x: f64) -> bool {
    x.is_finite() && (x.abs() - 1.0).abs() < EPSILON
}

/// True when `x` has no fractional part (within `WHOLE_TOLERANCE`).
pub fn is_whole(x: f64) -> bool {
    x.is_finite() && (x.floor() - x).abs() < WHOLE_TOLERANCE
}

/// Round to the nearest integer, halves toward positive infinity.
///
/// `round_half_up(2.5) == 3`, `round_half_up(-2.5) == -2`. This differs from
/// `f64::round`, which rounds halves away from zero.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Shortest decimal rendering of a value: `2.5`, `18`, `0.125`.
///
/// Negative zero renders as `0`.
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{}", x)
}

/// Join a rendered value and a unit label with a single space.
///
/// An empty unit leaves the value untouched.
pub fn create_normal(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}
