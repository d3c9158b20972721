//! Operations exposed over the line protocol
//!
//! Each operation carries static metadata (for `help`) and maps JSON
//! arguments onto the library call.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use quanta_core::{Fraction, QuantaError};
use quanta_units::{Input, Registry};

use crate::protocol::RequestOptions;

/// Metadata about an operation argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: true }
    }
}

/// Metadata for an operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    /// Request options the operation reads
    pub options: &'static [&'static str],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
}

pub trait Operation: Send + Sync {
    fn meta(&self) -> OperationMeta;
    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError>;
}

// ============ Argument helpers ============

fn check_count(meta: &OperationMeta, args: &[JsonValue]) -> Result<(), QuantaError> {
    let required = meta.args.iter().filter(|a| !a.optional).count();
    if args.len() < required || args.len() > meta.args.len() {
        return Err(QuantaError::arg_count(meta.name, required, args.len()));
    }
    Ok(())
}

pub fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Map a JSON value onto library input.
///
/// Strings are quantity text, numbers are unitless, arrays are lists and
/// `{"value": 2, "unit": "cups"}` objects are quantities.
pub fn to_input(value: &JsonValue, registry: &Registry) -> Option<Input> {
    match value {
        JsonValue::String(text) => Some(Input::Text(text.clone())),
        JsonValue::Number(n) => n.as_f64().map(Input::Number),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| to_input(item, registry))
            .collect::<Option<Vec<_>>>()
            .map(Input::List),
        JsonValue::Object(map) => {
            let value = map.get("value")?.as_f64()?;
            let unit = match map.get("unit") {
                Some(unit) => unit.as_str()?,
                None => "",
            };
            Some(Input::Quantity(registry.quantity(value, unit)))
        }
        _ => None,
    }
}

fn input_arg(meta: &OperationMeta, args: &[JsonValue], index: usize, registry: &Registry) -> Result<Input, QuantaError> {
    let value = args.get(index).unwrap_or(&JsonValue::Null);
    to_input(value, registry).ok_or_else(|| {
        QuantaError::arg_type(meta.name, meta.args[index].name, "quantity", json_type(value))
    })
}

fn text_arg<'a>(meta: &OperationMeta, args: &'a [JsonValue], index: usize) -> Result<&'a str, QuantaError> {
    let value = args.get(index).unwrap_or(&JsonValue::Null);
    value
        .as_str()
        .ok_or_else(|| QuantaError::arg_type(meta.name, meta.args[index].name, "string", json_type(value)))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, QuantaError> {
    serde_json::to_value(value).map_err(|e| QuantaError::internal(e.to_string()))
}

// ============ Parse ============

pub struct Parse;

static PARSE_ARGS: [ArgMeta; 1] = [ArgMeta::required("text", "string", "Quantity text")];
static PARSE_EXAMPLES: [&str; 2] = ["parse(\"2 1/2 cups\")", "parse(\"3 tacos\")"];

impl Operation for Parse {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "parse",
            description: "Read a value and unit from quantity text",
            usage: "parse(text)",
            args: &PARSE_ARGS,
            options: &[],
            returns: "Quantity",
            examples: &PARSE_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], _options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let quantity = registry.parse(text_arg(&meta, args, 0)?)?;
        to_json(&quantity)
    }
}

// ============ Convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("quantity", "quantity", "Value to convert"),
    ArgMeta::required("to", "string", "Target unit"),
];
static CONVERT_EXAMPLES: [&str; 2] = ["convert(\"30 in\", \"ft\")", "convert(\"1 pint\", \"qt\") with fraction"];

impl Operation for Convert {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "convert",
            description: "Convert a quantity to another unit of its class",
            usage: "convert(quantity, to)",
            args: &CONVERT_ARGS,
            options: &["fraction", "largest_denominator"],
            returns: "{value, normal}",
            examples: &CONVERT_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let quantity = registry.parse_input(&input_arg(&meta, args, 0, registry)?)?;
        let to = text_arg(&meta, args, 1)?;
        let value = quantity.convert(registry, to)?;
        let normal = quantity.convert_normal(registry, to, &options.render())?;
        Ok(json!({ "value": value, "normal": normal }))
    }
}

// ============ Best ============

pub struct Best;

static BEST_ARGS: [ArgMeta; 1] = [ArgMeta::required("quantity", "quantity", "Value to re-express")];
static BEST_EXAMPLES: [&str; 2] = ["best(\"2 pints\") → 1 quart", "best(\"1.5ft\") → 18 inches"];

impl Operation for Best {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "best",
            description: "Re-express a quantity in the unit that reads most naturally",
            usage: "best(quantity)",
            args: &BEST_ARGS,
            options: &["fraction", "abbreviations", "largest_denominator"],
            returns: "Quantity",
            examples: &BEST_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let best = registry.best(input_arg(&meta, args, 0, registry)?, &options.render())?;
        to_json(&best)
    }
}

// ============ Combine / Subtract ============

pub struct Combine;

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "quantity | list", "First operand"),
    ArgMeta::required("b", "quantity | list", "Second operand"),
];
static COMBINE_EXAMPLES: [&str; 2] = [
    "combine(\"2 cups\", \"1 pt\") → 1 quart",
    "combine(\"1 loaf\", \"2 loaves\") → 3 loaves",
];

impl Operation for Combine {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "combine",
            description: "Add two quantities or lists, merging compatible terms",
            usage: "combine(a, b)",
            args: &PAIR_ARGS,
            options: &["fraction", "abbreviations", "largest_denominator"],
            returns: "string",
            examples: &COMBINE_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let a = input_arg(&meta, args, 0, registry)?;
        let b = input_arg(&meta, args, 1, registry)?;
        Ok(JsonValue::String(registry.combine(a, b, &options.render())))
    }
}

pub struct Subtract;

static SUBTRACT_EXAMPLES: [&str; 2] = [
    "subtract(\"1 pint\", \"cup\") → 1 cup",
    "subtract(\"1 cup\", \"2 cups\") → (empty)",
];

impl Operation for Subtract {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "subtract",
            description: "Take b away from a; negative terms are dropped unless allowed",
            usage: "subtract(a, b)",
            args: &PAIR_ARGS,
            options: &["allow_negatives", "fraction", "abbreviations", "largest_denominator"],
            returns: "string",
            examples: &SUBTRACT_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let a = input_arg(&meta, args, 0, registry)?;
        let b = input_arg(&meta, args, 1, registry)?;
        Ok(JsonValue::String(registry.subtract(a, b, options.allow_negatives, &options.render())))
    }
}

// ============ Compound ============

pub struct Compound;

static COMPOUND_ARGS: [ArgMeta; 1] = [ArgMeta::required("quantity", "quantity", "Value to split")];
static COMPOUND_EXAMPLES: [&str; 1] = ["compound(\"0.625 cups\") with units [c, tbsp, tsp] → 1/2 c, 2 tbsp"];

impl Operation for Compound {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "compound",
            description: "Split a quantity across several units, largest first",
            usage: "compound(quantity)",
            args: &COMPOUND_ARGS,
            options: &["units"],
            returns: "string",
            examples: &COMPOUND_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let input = input_arg(&meta, args, 0, registry)?;
        let units: Option<Vec<&str>> = options.units.as_ref().map(|u| u.iter().map(String::as_str).collect());
        Ok(JsonValue::String(registry.compound(input, units.as_deref())?))
    }
}

// ============ Conversions ============

pub struct Conversions;

static CONVERSIONS_ARGS: [ArgMeta; 1] = [ArgMeta::required("quantity", "quantity", "Value to tabulate")];
static CONVERSIONS_EXAMPLES: [&str; 1] = ["conversions(\"2.25 hrs\") with min 0.1, max 1000"];

impl Operation for Conversions {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "conversions",
            description: "Express a quantity in every unit of its class",
            usage: "conversions(quantity)",
            args: &CONVERSIONS_ARGS,
            options: &["min", "max", "largest_denominator"],
            returns: "{quantity, conversions}",
            examples: &CONVERSIONS_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let input = input_arg(&meta, args, 0, registry)?;
        let table = registry.conversions(input, options.min, options.max, options.largest_denominator)?;
        to_json(&table)
    }
}

// ============ Fraction ============

pub struct FractionOp;

static FRACTION_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "number", "Decimal to approximate"),
    ArgMeta::optional("denominators", "number[]", "Candidates in order (default 2, 3, 4, 8, 16)"),
];
static FRACTION_EXAMPLES: [&str; 2] = ["fraction(0.125, [2, 4, 8]) → 1/8", "fraction(0.3, [2, 3, 4]) with round_down → 1/4"];

const DEFAULT_DENOMINATORS: [u32; 5] = [2, 3, 4, 8, 16];

impl Operation for FractionOp {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "fraction",
            description: "Closest fraction for a decimal from a list of denominators",
            usage: "fraction(value, [denominators])",
            args: &FRACTION_ARGS,
            options: &["largest_denominator", "round_down"],
            returns: "Fraction",
            examples: &FRACTION_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], options: &RequestOptions, _registry: &Registry) -> Result<JsonValue, QuantaError> {
        let meta = self.meta();
        check_count(&meta, args)?;
        let value = args[0]
            .as_f64()
            .ok_or_else(|| QuantaError::arg_type(meta.name, "value", "number", json_type(&args[0])))?;

        let denominators: Vec<u32> = match args.get(1) {
            None => DEFAULT_DENOMINATORS.to_vec(),
            Some(JsonValue::Array(items)) => items
                .iter()
                .map(|d| d.as_u64().and_then(|d| u32::try_from(d).ok()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| QuantaError::arg_type(meta.name, "denominators", "whole numbers", "array"))?,
            Some(other) => {
                return Err(QuantaError::arg_type(meta.name, "denominators", "array", json_type(other)))
            }
        };

        let fraction = Fraction::search(value, &denominators, options.largest_denominator, options.round_down);
        to_json(&fraction)
    }
}

// ============ Classes ============

pub struct Classes;

static CLASSES_EXAMPLES: [&str; 1] = ["classes()"];

impl Operation for Classes {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "classes",
            description: "List unit classes with their groups and aliases",
            usage: "classes()",
            args: &[],
            options: &[],
            returns: "[{name, groups}]",
            examples: &CLASSES_EXAMPLES,
        }
    }

    fn call(&self, args: &[JsonValue], _options: &RequestOptions, registry: &Registry) -> Result<JsonValue, QuantaError> {
        check_count(&self.meta(), args)?;
        let classes: Vec<JsonValue> = registry
            .classes()
            .iter()
            .map(|c| json!({ "name": c.name(), "groups": c.groups() }))
            .collect();
        Ok(JsonValue::Array(classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::codes;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_to_input() {
        let r = registry();
        assert_eq!(to_input(&json!("2 cups"), &r), Some(Input::from("2 cups")));
        assert_eq!(to_input(&json!(2), &r), Some(Input::Number(2.0)));
        assert_eq!(to_input(&json!(["1 c", 2]), &r), Some(Input::List(vec![Input::from("1 c"), Input::Number(2.0)])));
        match to_input(&json!({"value": 2, "unit": "Cups"}), &r) {
            Some(Input::Quantity(q)) => assert_eq!(q.unit_class.as_deref(), Some("Volume")),
            other => panic!("expected quantity, got {:?}", other),
        }
        assert_eq!(to_input(&json!(true), &r), None);
        assert_eq!(to_input(&json!({"unit": "cups"}), &r), None);
    }

    #[test]
    fn test_convert_operation() {
        let r = registry();
        let options = RequestOptions { fraction: true, ..Default::default() };
        let result = Convert.call(&[json!("1 pint"), json!("qt")], &options, &r).unwrap();
        assert_eq!(result, json!({"value": 0.5, "normal": "1/2 qt"}));
    }

    #[test]
    fn test_arg_errors() {
        let r = registry();
        let options = RequestOptions::default();
        let err = Convert.call(&[json!("1 pint")], &options, &r).unwrap_err();
        assert_eq!(err.code, codes::ARG_COUNT);
        let err = Best.call(&[json!(null)], &options, &r).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
        let err = Parse.call(&[json!("")], &options, &r).unwrap_err();
        assert_eq!(err.code, codes::PARSE_ERROR);
    }

    #[test]
    fn test_compound_with_units_option() {
        let r = registry();
        let options = RequestOptions {
            units: Some(vec!["c".to_string(), "tbsp".to_string(), "tsp".to_string()]),
            ..Default::default()
        };
        let result = Compound.call(&[json!("0.625 cups")], &options, &r).unwrap();
        assert_eq!(result, json!("1/2 c, 2 tbsp"));
    }

    #[test]
    fn test_fraction_operation() {
        let r = registry();
        let options = RequestOptions { round_down: true, ..Default::default() };
        let result = FractionOp.call(&[json!(0.3), json!([2, 3, 4])], &options, &r).unwrap();
        assert_eq!(result["display"], "1/4");

        let result = FractionOp.call(&[json!(0.125)], &RequestOptions::default(), &r).unwrap();
        assert_eq!(result["display"], "1/8");

        let err = FractionOp.call(&[json!(0.5), json!([2, -1])], &RequestOptions::default(), &r).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_classes_operation() {
        let r = registry();
        let result = Classes.call(&[], &RequestOptions::default(), &r).unwrap();
        assert_eq!(result.as_array().unwrap().len(), 7);
        assert_eq!(result[5]["name"], "Volume");
        assert_eq!(result[5]["groups"][0]["main_unit"], "tsp");
    }
}
