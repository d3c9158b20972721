//! Unit group: every spelling of one unit at one scale

use serde::{Deserialize, Serialize};
use quanta_core::{create_normal, format_number, is_singular};

/// A set of aliases that denote the same unit, with its display forms and
/// the denominators that read naturally for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitGroup {
    /// Canonical short alias; the group's identity within its class
    pub main_unit: String,
    /// Main unit of the base group this group's scale is measured against
    /// (equal to `main_unit` for a base group)
    pub base_unit: String,
    /// Number of `base_unit`s in one of this unit, resolved through every
    /// intermediate group
    pub base_scale: f64,
    /// Lowercase spellings; the first one is `main_unit`
    pub aliases: Vec<String>,
    /// Display label for |value| of one ("cup")
    pub singular: String,
    /// Display label for every other value ("cups")
    pub plural: String,
    /// Denominators tried when rendering fractions of this unit
    pub denominators: Vec<u32>,
}

impl UnitGroup {
    pub fn new(
        base_unit: String,
        base_scale: f64,
        aliases: Vec<String>,
        denominators: Vec<u32>,
        singular: &str,
        plural: &str,
    ) -> Self {
        let main_unit = aliases.first().cloned().unwrap_or_default();
        UnitGroup {
            main_unit,
            base_unit,
            base_scale,
            aliases,
            singular: singular.to_string(),
            plural: plural.to_string(),
            denominators,
        }
    }

    /// Whether this group starts its own base system
    pub fn is_base(&self) -> bool {
        self.main_unit == self.base_unit
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// The abbreviation, or the singular/plural label.
    pub fn label(&self, singular: bool, abbreviations: bool) -> &str {
        if abbreviations {
            &self.main_unit
        } else if singular {
            &self.singular
        } else {
            &self.plural
        }
    }

    /// Label chosen by the magnitude of `value`.
    pub fn label_for(&self, value: f64, abbreviations: bool) -> &str {
        self.label(is_singular(value), abbreviations)
    }

    /// `value` followed by the label that fits it: "1 cup", "2.5 cups", "2.5 c".
    pub fn add_unit(&self, value: f64, abbreviations: bool) -> String {
        create_normal(&format_number(value), self.label_for(value, abbreviations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cup() -> UnitGroup {
        UnitGroup::new(
            "tsp".to_string(),
            48.0,
            vec!["c".to_string(), "cup".to_string(), "cups".to_string()],
            vec![2, 3, 4],
            "cup",
            "cups",
        )
    }

    #[test]
    fn test_main_unit_is_first_alias() {
        let g = cup();
        assert_eq!(g.main_unit, "c");
        assert!(!g.is_base());
        assert!(g.has_alias("cups"));
        assert!(!g.has_alias("pint"));
    }

    #[test]
    fn test_labels() {
        let g = cup();
        assert_eq!(g.label_for(1.0, false), "cup");
        assert_eq!(g.label_for(-1.0, false), "cup");
        assert_eq!(g.label_for(0.5, false), "cups");
        assert_eq!(g.label_for(2.0, true), "c");
    }

    #[test]
    fn test_add_unit() {
        let g = cup();
        assert_eq!(g.add_unit(1.0, false), "1 cup");
        assert_eq!(g.add_unit(2.5, false), "2.5 cups");
        assert_eq!(g.add_unit(2.5, true), "2.5 c");
    }
}
