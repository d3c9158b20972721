//! Registry settings and per-call rendering options

use serde::{Deserialize, Serialize};

/// Default number of leading characters two free-text units must share to merge
pub const HEURISTIC_LENGTH: usize = 3;

/// Default separator for list input
pub const SEPARATOR: &str = ",";

/// Default separator for joined output
pub const SEPARATOR_JOIN: &str = ", ";

/// Registry-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix length for merging free-text units ("loaf" and "loaves")
    pub heuristic_length: usize,
    /// Splits list input: "2 cups, 1 pint"
    pub separator: String,
    /// Joins rendered terms
    pub separator_join: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            heuristic_length: HEURISTIC_LENGTH,
            separator: SEPARATOR.to_string(),
            separator_join: SEPARATOR_JOIN.to_string(),
        }
    }
}

/// How a result is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// "1 1/2 cups" rather than "1.5 cups"
    pub fraction: bool,
    /// "1.5 c" rather than "1.5 cups"
    pub abbreviations: bool,
    /// Denominators above this are not tried
    pub largest_denominator: Option<u32>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fraction(mut self, fraction: bool) -> Self {
        self.fraction = fraction;
        self
    }

    pub fn with_abbreviations(mut self, abbreviations: bool) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn with_largest_denominator(mut self, largest: u32) -> Self {
        self.largest_denominator = Some(largest);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.heuristic_length, 3);
        assert_eq!(s.separator, ",");
        assert_eq!(s.separator_join, ", ");

        let o = RenderOptions::new();
        assert!(!o.fraction && !o.abbreviations);
        assert_eq!(o.largest_denominator, None);
    }

    #[test]
    fn test_partial_json() {
        let o: RenderOptions = serde_json::from_str(r#"{"fraction": true}"#).unwrap();
        assert_eq!(o, RenderOptions::new().with_fraction(true));

        let s: Settings = serde_json::from_str(r#"{"separator": ";"}"#).unwrap();
        assert_eq!(s.separator, ";");
        assert_eq!(s.heuristic_length, 3);
    }
}
