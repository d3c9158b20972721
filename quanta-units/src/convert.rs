//! Conversion between units of one class

use std::fmt;

use quanta_core::{Fraction, QuantaError};

use crate::input::Input;
use crate::options::RenderOptions;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

/// Why a value could not be produced
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Text that is neither a number nor a unit
    Unparsable(String),
    /// A quantity with a free-text unit asked to convert into a named unit
    Unclassified { unit: String },
    /// A unit that is not part of the quantity's class
    UnknownUnit { unit: String, class: String },
    /// Two base systems of a class with no factor between them
    NoBasePath { class: String, from: String, to: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Unparsable(input) => write!(f, "Cannot parse quantity: '{}'", input),
            ConversionError::Unclassified { unit } => {
                write!(f, "'{}' does not belong to a unit class", unit)
            }
            ConversionError::UnknownUnit { unit, class } => {
                write!(f, "Unit '{}' is not part of class {}", unit, class)
            }
            ConversionError::NoBasePath { class, from, to } => {
                write!(f, "{} has no conversion from {} to {}", class, from, to)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<ConversionError> for QuantaError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::Unparsable(input) => QuantaError::parse_error(input),
            ConversionError::UnknownUnit { unit, class } => QuantaError::unknown_unit(unit, class),
            ConversionError::Unclassified { .. } | ConversionError::NoBasePath { .. } => {
                QuantaError::unconvertible(err.to_string())
            }
        }
    }
}

impl Registry {
    /// Convert any input to the unit `to`.
    ///
    /// An empty `to` on a quantity without a class returns its value.
    pub fn convert(&self, input: impl Into<Input>, to: &str) -> Result<f64, ConversionError> {
        self.parse_input(&input.into())?.convert(self, to)
    }

    /// Convert, then approximate as a fraction of `to`.
    pub fn convert_fraction(
        &self,
        input: impl Into<Input>,
        to: &str,
        options: &RenderOptions,
    ) -> Result<Fraction, ConversionError> {
        self.parse_input(&input.into())?.convert_fraction(self, to, options)
    }
}

impl ParsedQuantity {
    pub fn convert(&self, registry: &Registry, to: &str) -> Result<f64, ConversionError> {
        let to = to.trim().to_lowercase();
        let class = self.unit_class.as_deref().and_then(|name| registry.class(name));
        match class {
            Some(class) => class.convert(self.value, &self.unit, &to),
            None if to.is_empty() => Ok(self.value),
            None => Err(ConversionError::Unclassified { unit: self.unit.clone() }),
        }
    }

    /// Converted value as a fraction, using the target group's denominators.
    /// A unitless target tries the source group's denominators.
    pub fn convert_fraction(
        &self,
        registry: &Registry,
        to: &str,
        options: &RenderOptions,
    ) -> Result<Fraction, ConversionError> {
        let converted = self.convert(registry, to)?;
        let target = to.trim().to_lowercase();
        let group = self
            .unit_class
            .as_deref()
            .and_then(|name| registry.class(name))
            .and_then(|class| class.group(&target))
            .or(self.group.as_ref());
        let denominators = group.map(|g| g.denominators.as_slice()).unwrap_or(&[]);
        Ok(Fraction::search(converted, denominators, options.largest_denominator, false))
    }

    /// Converted value followed by `to`: "0.5 qt", or "1/2 qt" in fraction mode
    pub fn convert_normal(
        &self,
        registry: &Registry,
        to: &str,
        options: &RenderOptions,
    ) -> Result<String, ConversionError> {
        let to = to.trim().to_lowercase();
        if options.fraction {
            let fraction = self.convert_fraction(registry, &to, options)?;
            if fraction.valid {
                return Ok(fraction.with_unit(&to));
            }
        }
        let converted = self.convert(registry, &to)?;
        Ok(quanta_core::create_normal(&quanta_core::format_number(converted), &to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_convert_length() {
        let r = registry();
        assert_eq!(r.convert("30 in", "ft").unwrap(), 2.5);
        assert!((r.convert("1 in", "cm").unwrap() - 2.54).abs() < 1e-9);
        assert_eq!(r.convert("1 ft", "FEET").unwrap(), 1.0);
    }

    #[test]
    fn test_convert_unitless_passthrough() {
        let r = registry();
        assert_eq!(r.convert(5.0, "").unwrap(), 5.0);
        assert_eq!(r.convert("3 tacos", "").unwrap(), 3.0);
        assert_eq!(
            r.convert("3 tacos", "cups"),
            Err(ConversionError::Unclassified { unit: "tacos".to_string() })
        );
    }

    #[test]
    fn test_convert_across_classes_fails() {
        let r = registry();
        assert!(matches!(r.convert("1 cup", "ft"), Err(ConversionError::UnknownUnit { .. })));
        assert!(matches!(r.convert("", "ft"), Err(ConversionError::Unparsable(_))));
    }

    #[test]
    fn test_convert_fraction() {
        let r = registry();
        let opts = RenderOptions::new();
        assert_eq!(r.convert_fraction("13oz", "lb", &opts).unwrap().display, "13/16");
        assert_eq!(r.convert_fraction("4 tbsp", "c", &opts).unwrap().display, "1/4");
        assert_eq!(r.convert_fraction("-4 tbsp", "c", &opts).unwrap().display, "-1/4");
        assert_eq!(r.convert_fraction("12 cm", "m", &opts).unwrap().display, "1/10");
    }

    #[test]
    fn test_convert_normal() {
        let r = registry();
        let q = r.parse("1 pint").unwrap();
        assert_eq!(q.convert_normal(&r, "qt", &RenderOptions::new()).unwrap(), "0.5 qt");
        let frac = RenderOptions::new().with_fraction(true);
        assert_eq!(q.convert_normal(&r, "qt", &frac).unwrap(), "1/2 qt");
    }

    #[test]
    fn test_into_structured_error() {
        let err: QuantaError = ConversionError::Unparsable("???".to_string()).into();
        assert_eq!(err.code, quanta_core::codes::PARSE_ERROR);
        let err: QuantaError = ConversionError::Unclassified { unit: "tacos".to_string() }.into();
        assert_eq!(err.code, quanta_core::codes::UNCONVERTIBLE);
    }
}
