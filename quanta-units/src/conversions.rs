//! Conversion tables: a quantity expressed in every unit of its class

use serde::{Deserialize, Serialize};
use quanta_core::{create_normal, format_number, Fraction};

use crate::convert::ConversionError;
use crate::group::UnitGroup;
use crate::input::Input;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

/// A quantity expressed in one unit group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Converted value
    pub decimal: f64,
    /// Converted value as a fraction of the group's unit
    pub fraction: Fraction,
    /// The group's main unit, whatever the value
    pub short_unit: String,
    /// Singular or plural label chosen by the value
    pub long_unit: String,
    /// The fraction when it is valid, otherwise the decimal
    pub friendly: String,
    /// `friendly` followed by `short_unit`: "2 1/4 hr"
    pub short_form: String,
    /// `friendly` followed by `long_unit`: "2 1/4 hours"
    pub long_form: String,
}

impl Conversion {
    pub fn new(decimal: f64, fraction: Fraction, group: &UnitGroup) -> Self {
        let (long_unit, friendly) = if fraction.valid {
            (group.label(fraction.is_singular(), false), fraction.display.clone())
        } else {
            (group.label_for(decimal, false), format_number(decimal))
        };
        let long_unit = long_unit.to_string();
        Conversion {
            decimal,
            short_unit: group.main_unit.clone(),
            short_form: create_normal(&friendly, &group.main_unit),
            long_form: create_normal(&friendly, &long_unit),
            long_unit,
            friendly,
            fraction,
        }
    }
}

/// A parsed quantity and its conversions, in group order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTable {
    pub quantity: ParsedQuantity,
    pub conversions: Vec<Conversion>,
}

impl Registry {
    /// Express `input` in every unit of its class whose converted value
    /// lies within `min..=max`.
    ///
    /// A quantity without a class has no conversions.
    pub fn conversions(
        &self,
        input: impl Into<Input>,
        min: Option<f64>,
        max: Option<f64>,
        largest_denominator: Option<u32>,
    ) -> Result<ConversionTable, ConversionError> {
        let quantity = self.parse_input(&input.into())?;
        let mut conversions = Vec::new();

        if let Some(class) = quantity.unit_class.as_deref().and_then(|name| self.class(name)) {
            for group in class.groups() {
                let Ok(converted) = class.convert(quantity.value, &quantity.unit, &group.main_unit) else {
                    continue;
                };
                if min.is_some_and(|min| converted < min) || max.is_some_and(|max| converted > max) {
                    continue;
                }
                let fraction = Fraction::search(converted, &group.denominators, largest_denominator, false);
                conversions.push(Conversion::new(converted, fraction, group));
            }
        }

        Ok(ConversionTable { quantity, conversions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours() {
        let r = Registry::builtin().unwrap();
        let table = r.conversions("2.25 hrs", None, None, None).unwrap();
        assert_eq!(table.conversions.len(), 9);
        assert_eq!(table.conversions[4].long_form, "135 minutes");
        assert_eq!(table.conversions[5].long_form, "2 1/4 hours");
        assert_eq!(table.conversions[5].short_form, "2 1/4 hr");
        assert_eq!(table.conversions[5].decimal, 2.25);
    }

    #[test]
    fn test_range() {
        let r = Registry::builtin().unwrap();
        let table = r.conversions("2.25 hrs", Some(0.1), Some(1000.0), None).unwrap();
        let units: Vec<&str> = table.conversions.iter().map(|c| c.short_unit.as_str()).collect();
        assert_eq!(units, vec!["min", "hr"]);
    }

    #[test]
    fn test_quarter_cup() {
        let r = Registry::builtin().unwrap();
        let table = r.conversions("1/4c", Some(0.1), Some(10.0), None).unwrap();
        let forms: Vec<&str> = table.conversions.iter().map(|c| c.long_form.as_str()).collect();
        assert_eq!(forms.len(), 5);
        assert_eq!(forms[..4], ["4 tablespoons", "2 fluid ounces", "1/4 cup", "0.125 pints"]);
        assert_eq!(table.conversions[4].short_unit, "in3");
        assert!(!table.conversions[4].fraction.valid);
    }

    #[test]
    fn test_free_text_has_no_conversions() {
        let r = Registry::builtin().unwrap();
        let table = r.conversions("3 tacos", None, None, None).unwrap();
        assert!(table.conversions.is_empty());
        assert_eq!(table.quantity.normal, "3 tacos");
    }

    #[test]
    fn test_serializes() {
        let r = Registry::builtin().unwrap();
        let table = r.conversions("1 ft", Some(1.0), Some(20.0), None).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["conversions"][0]["short_form"], "12 in");
        assert_eq!(json["conversions"][1]["long_form"], "1 foot");
    }
}
