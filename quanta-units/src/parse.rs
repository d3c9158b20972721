//! Quantity text parsing - "2 1/2 cups", "-0.5qt", "1/4 c", "3 tacos"

use tracing::trace;

use crate::convert::ConversionError;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

/// Numeric prefix and unit text of a quantity string
#[derive(Debug, Clone, PartialEq)]
pub struct Amount<'a> {
    pub value: f64,
    /// Remaining text, trimmed but not lowercased
    pub unit: &'a str,
}

/// Split quantity text into its number and unit.
///
/// Accepted number forms, each with an optional leading `-`:
/// - whole: `2`
/// - mixed: `2 1/2`
/// - fraction: `1/2` (and `/2` for one half)
/// - decimal: `2.5`, `.5`
/// - none: `cups` reads as one cup
///
/// Returns `None` when there is neither a number nor a unit, or when a
/// denominator is zero.
pub fn parse_amount(text: &str) -> Option<Amount<'_>> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let negative = bytes.first() == Some(&b'-');
    let mut i = if negative { 1 } else { 0 };

    let whole_start = i;
    i = digits_from(i);
    let whole = &s[whole_start..i];

    let mut numerator: Option<&str> = None;
    let mut denominator: Option<&str> = None;
    let mut decimal: Option<&str> = None;

    // mixed number: whitespace, numerator, '/', denominator
    if !whole.is_empty() {
        let mut j = i;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let num_end = digits_from(j);
        if j > i && num_end > j && num_end < len && bytes[num_end] == b'/' {
            let den_end = digits_from(num_end + 1);
            if den_end > num_end + 1 {
                numerator = Some(&s[j..num_end]);
                denominator = Some(&s[num_end + 1..den_end]);
                i = den_end;
            }
        }
    }

    if denominator.is_none() && i < len {
        let end = digits_from(i + 1);
        if end > i + 1 {
            match bytes[i] {
                b'/' => {
                    denominator = Some(&s[i + 1..end]);
                    i = end;
                }
                b'.' => {
                    decimal = Some(&s[i + 1..end]);
                    i = end;
                }
                _ => {}
            }
        }
    }

    let unit = s[i..].trim();
    if whole.is_empty() && decimal.is_none() && unit.is_empty() {
        return None;
    }

    let whole: Option<f64> = if whole.is_empty() { None } else { whole.parse().ok() };
    let magnitude = match (numerator, denominator, decimal) {
        (Some(n), Some(d), _) => {
            let d: f64 = d.parse().ok()?;
            if d == 0.0 {
                return None;
            }
            whole.unwrap_or(0.0) + n.parse::<f64>().ok()? / d
        }
        (None, Some(d), _) => {
            let d: f64 = d.parse().ok()?;
            if d == 0.0 {
                return None;
            }
            whole.unwrap_or(1.0) / d
        }
        (_, None, Some(dec)) => whole.unwrap_or(0.0) + format!("0.{}", dec).parse::<f64>().ok()?,
        _ => whole.unwrap_or(1.0),
    };

    Some(Amount {
        value: if negative { -magnitude } else { magnitude },
        unit,
    })
}

impl Registry {
    /// Parse quantity text and resolve its unit.
    ///
    /// Units are matched case-insensitively. An unknown unit is kept as
    /// free text.
    pub fn parse(&self, text: &str) -> Result<ParsedQuantity, ConversionError> {
        let amount = parse_amount(text).ok_or_else(|| ConversionError::Unparsable(text.to_string()))?;
        let unit = amount.unit.to_lowercase();
        let class = self.class_of(&unit);
        trace!(text, value = amount.value, unit = %unit, class = class.map(|c| c.name()), "parsed quantity");
        Ok(ParsedQuantity::new(amount.value, unit, class, text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> (f64, &str) {
        let a = parse_amount(text).unwrap();
        (a.value, a.unit)
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(amount("2"), (2.0, ""));
        assert_eq!(amount("2 1/2 cups"), (2.5, "cups"));
        assert_eq!(amount("1/4 c"), (0.25, "c"));
        assert_eq!(amount("13/16lbs"), (0.8125, "lbs"));
        assert_eq!(amount("0.5qt"), (0.5, "qt"));
        assert_eq!(amount(".5 qt"), (0.5, "qt"));
        assert_eq!(amount("  12in  "), (12.0, "in"));
    }

    #[test]
    fn test_negative_forms() {
        assert_eq!(amount("-2c"), (-2.0, "c"));
        assert_eq!(amount("-2 1/2 cups"), (-2.5, "cups"));
        assert_eq!(amount("-1/4"), (-0.25, ""));
        assert_eq!(amount("-cup"), (-1.0, "cup"));
    }

    #[test]
    fn test_unit_only_reads_as_one() {
        assert_eq!(amount("cup"), (1.0, "cup"));
        assert_eq!(amount("/2 cup"), (0.5, "cup"));
    }

    #[test]
    fn test_unit_text_keeps_spaces() {
        assert_eq!(amount("2 fl oz"), (2.0, "fl oz"));
        assert_eq!(amount("72 square inches"), (72.0, "square inches"));
        // a number without a following fraction stays in the unit text
        assert_eq!(amount("2 3 tacos"), (2.0, "3 tacos"));
    }

    #[test]
    fn test_rejects() {
        assert!(parse_amount("").is_none());
        assert!(parse_amount("   ").is_none());
        assert!(parse_amount("-").is_none());
        assert!(parse_amount("1/0").is_none());
    }

    #[test]
    fn test_parse_resolves_unit() {
        let r = Registry::builtin().unwrap();
        let q = r.parse("2 1/2 Cups").unwrap();
        assert_eq!(q.value, 2.5);
        assert_eq!(q.unit, "cups");
        assert_eq!(q.unit_class.as_deref(), Some("Volume"));
        assert_eq!(q.normal, "2.5 cups");
    }

    #[test]
    fn test_parse_free_text() {
        let r = Registry::builtin().unwrap();
        let q = r.parse(" 3 Tacos ").unwrap();
        assert_eq!(q.value, 3.0);
        assert_eq!(q.unit, "tacos");
        assert!(q.unit_class.is_none());
        assert_eq!(q.normal, "3 Tacos");
    }

    #[test]
    fn test_parse_error() {
        let r = Registry::builtin().unwrap();
        assert_eq!(r.parse(""), Err(ConversionError::Unparsable(String::new())));
    }
}
