//! Quanta Units - Everyday quantities with unit classes
//!
//! Parses free-form quantity text ("2 1/2 cups", "3 tacos"), converts between
//! units of a class, and renders results the way people write them.
//!
//! Built-in classes:
//! - Area (sqin, sqft, acre, sqm, etc.)
//! - Digital (bit, byte, kb, kib, mbit, etc.)
//! - Length (in, ft, mi, mm, m, km, etc.)
//! - Rotation (deg, rad)
//! - Time (ns, s, min, hr, day, yr, etc.)
//! - Volume (tsp, tbsp, fl oz, cup, qt, ml, l, in3, etc.)
//! - Weight (mg, g, kg, oz, lb, ton, etc.)
//!
//! ```
//! use quanta_units::RenderOptions;
//!
//! let opts = RenderOptions::new();
//! assert_eq!(quanta_units::best("2 pints", &opts).unwrap().normal, "1 quart");
//! assert_eq!(quanta_units::combine("1 loaf", "2 loaves", &opts), "3 loaves");
//! ```

mod group;
mod class;
mod registry;
mod options;
mod quantity;
mod input;
mod parse;
mod convert;
mod best;
mod combine;
mod compound;
mod conversions;
mod units;

use std::sync::LazyLock;

pub use group::UnitGroup;
pub use class::{RegistryError, UnitClass};
pub use registry::Registry;
pub use options::{RenderOptions, Settings, HEURISTIC_LENGTH, SEPARATOR, SEPARATOR_JOIN};
pub use quantity::ParsedQuantity;
pub use input::Input;
pub use parse::{parse_amount, Amount};
pub use convert::ConversionError;
pub use combine::{find_unit, is_heuristic_match};
pub use conversions::{Conversion, ConversionTable};

/// Global registry with the built-in classes
pub static UNITS: LazyLock<Registry> =
    LazyLock::new(|| Registry::builtin().expect("built-in unit tables are consistent"));

/// Parse quantity text against the built-in classes
pub fn parse(text: &str) -> Result<ParsedQuantity, ConversionError> {
    UNITS.parse(text)
}

pub fn convert(input: impl Into<Input>, to: &str) -> Result<f64, ConversionError> {
    UNITS.convert(input, to)
}

/// Re-express a quantity in its most natural unit
pub fn best(input: impl Into<Input>, options: &RenderOptions) -> Result<ParsedQuantity, ConversionError> {
    UNITS.best(input, options)
}

pub fn combine(a: impl Into<Input>, b: impl Into<Input>, options: &RenderOptions) -> String {
    UNITS.combine(a, b, options)
}

pub fn subtract(a: impl Into<Input>, b: impl Into<Input>, allow_negatives: bool, options: &RenderOptions) -> String {
    UNITS.subtract(a, b, allow_negatives, options)
}

pub fn compound(input: impl Into<Input>, allowed: Option<&[&str]>) -> Result<String, ConversionError> {
    UNITS.compound(input, allowed)
}

pub fn conversions(
    input: impl Into<Input>,
    min: Option<f64>,
    max: Option<f64>,
    largest_denominator: Option<u32>,
) -> Result<ConversionTable, ConversionError> {
    UNITS.conversions(input, min, max, largest_denominator)
}
