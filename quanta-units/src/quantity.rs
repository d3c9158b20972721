//! Parsed quantity - a value with the unit it was written in

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use quanta_core::{create_normal, format_number, Fraction};

use crate::class::UnitClass;
use crate::group::UnitGroup;

/// A numeric value with an optional unit.
///
/// The unit is either resolved (it belongs to a class and a group) or free
/// text ("tacos"), or empty for a plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuantity {
    /// Signed value, in `unit`
    pub value: f64,
    /// Lowercase unit text; empty when the input had none
    pub unit: String,
    /// Name of the class the unit resolved to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_class: Option<String>,
    /// Group of the unit within its class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Arc<UnitGroup>>,
    /// Human-readable form
    pub normal: String,
}

impl ParsedQuantity {
    /// A quantity in `unit`, resolved against `class` when there is one.
    ///
    /// With a group the normal form is rebuilt from it ("2.5 cups");
    /// otherwise `normal` is kept as given.
    pub fn new(value: f64, unit: impl Into<String>, class: Option<&UnitClass>, normal: impl Into<String>) -> Self {
        let unit = unit.into();
        let group = class.and_then(|c| c.group(&unit)).cloned();
        let normal = match &group {
            Some(g) => g.add_unit(value, false),
            None => normal.into(),
        };
        ParsedQuantity {
            value,
            unit_class: group.as_ref().and(class).map(|c| c.name().to_string()),
            unit,
            group,
            normal,
        }
    }

    /// A plain number with no unit
    pub fn from_number(value: f64) -> Self {
        ParsedQuantity {
            value,
            unit: String::new(),
            unit_class: None,
            group: None,
            normal: format_number(value),
        }
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_empty()
    }

    /// Whether the unit resolved to a known class
    pub fn is_classified(&self) -> bool {
        self.group.is_some()
    }

    /// Value as a fraction of its own unit.
    ///
    /// Uses the group's denominators unless others are given.
    pub fn fraction(&self, denominators: Option<&[u32]>, largest: Option<u32>, round_down: bool) -> Fraction {
        let denominators = denominators
            .or(self.group.as_ref().map(|g| g.denominators.as_slice()))
            .unwrap_or(&[]);
        Fraction::search(self.value, denominators, largest, round_down)
    }

    /// Value and unit text as written: "2.5 cups", "3 tacos", "2"
    pub fn plain(&self) -> String {
        create_normal(&format_number(self.value), &self.unit)
    }
}

impl fmt::Display for ParsedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume() -> UnitClass {
        let mut uc = UnitClass::new("Volume");
        uc.add_group(1.0, None, &["tsp", "teaspoon", "teaspoons"], &[2, 3, 4], "teaspoon", "teaspoons").unwrap();
        uc.add_group(48.0, Some("tsp"), &["c", "cup", "cups"], &[2, 3, 4], "cup", "cups").unwrap();
        uc
    }

    #[test]
    fn test_resolved_quantity() {
        let uc = volume();
        let q = ParsedQuantity::new(2.5, "cups", Some(&uc), "2 1/2 cups");
        assert_eq!(q.unit_class.as_deref(), Some("Volume"));
        assert_eq!(q.group.as_ref().unwrap().main_unit, "c");
        assert_eq!(q.normal, "2.5 cups");
        assert!(q.is_classified());
    }

    #[test]
    fn test_free_text_quantity() {
        let uc = volume();
        let q = ParsedQuantity::new(3.0, "tacos", Some(&uc), "3 tacos");
        assert_eq!(q.unit_class, None);
        assert_eq!(q.group, None);
        assert_eq!(q.normal, "3 tacos");
        assert_eq!(q.to_string(), "3 tacos");
    }

    #[test]
    fn test_from_number() {
        let q = ParsedQuantity::from_number(2.0);
        assert!(q.is_unitless());
        assert_eq!(q.normal, "2");
        assert_eq!(q.plain(), "2");
    }

    #[test]
    fn test_fraction_of_own_unit() {
        let uc = volume();
        let q = ParsedQuantity::new(1.5, "c", Some(&uc), "");
        assert_eq!(q.fraction(None, None, false).display, "1 1/2");
        assert_eq!(q.fraction(Some(&[10][..]), None, false).display, "1 5/10");

        let free = ParsedQuantity::new(0.5, "tacos", None, "0.5 tacos");
        assert!(!free.fraction(None, None, false).valid);
        assert_eq!(free.fraction(Some(&[2][..]), None, false).display, "1/2");
    }

    #[test]
    fn test_serialize_without_class() {
        let q = ParsedQuantity::from_number(4.0);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["value"], 4.0);
        assert!(json.get("group").is_none());
    }
}
