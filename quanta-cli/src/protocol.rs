//! Request and response types for the line protocol
//!
//! One JSON object per line in, one per line out:
//!
//! ```text
//! {"id": 1, "op": "combine", "args": ["2 cups", "1 pt"]}
//! {"id":1,"ok":true,"result":"1 quart"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use quanta_core::QuantaError;
use quanta_units::RenderOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<JsonValue>,
    pub op: String,
    #[serde(default)]
    pub args: Vec<JsonValue>,
    #[serde(default)]
    pub options: RequestOptions,
}

/// Options shared by all operations; each one reads what it needs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub fraction: bool,
    pub abbreviations: bool,
    pub largest_denominator: Option<u32>,
    pub allow_negatives: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Units allowed in compound output
    pub units: Option<Vec<String>>,
    pub round_down: bool,
}

impl RequestOptions {
    pub fn render(&self) -> RenderOptions {
        RenderOptions {
            fraction: self.fraction,
            abbreviations: self.abbreviations,
            largest_denominator: self.largest_denominator,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QuantaError>,
}

impl Response {
    pub fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        Response { id, ok: true, result: Some(result), error: None }
    }

    pub fn failure(id: Option<JsonValue>, error: QuantaError) -> Self {
        Response { id, ok: false, result: None, error: Some(error) }
    }
}

impl Request {
    /// Build a request from command-line words: `best "2 pints" --fraction`.
    ///
    /// Words that read as JSON numbers, arrays or objects are passed as
    /// JSON; everything else is text.
    pub fn from_args(words: &[String]) -> Result<Self, QuantaError> {
        let (op, rest) = words
            .split_first()
            .ok_or_else(|| QuantaError::invalid_request("missing operation"))?;

        let mut args = Vec::new();
        let mut options = RequestOptions::default();
        for word in rest {
            match word.strip_prefix("--") {
                Some(flag) => apply_flag(&mut options, flag)?,
                None => args.push(word_to_json(word)),
            }
        }

        Ok(Request { id: None, op: op.clone(), args, options })
    }
}

fn word_to_json(word: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(word) {
        Ok(value) if value.is_number() || value.is_array() || value.is_object() => value,
        _ => JsonValue::String(word.to_string()),
    }
}

fn apply_flag(options: &mut RequestOptions, flag: &str) -> Result<(), QuantaError> {
    let (name, value) = match flag.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (flag, None),
    };
    let number = |value: Option<&str>| {
        value
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| QuantaError::invalid_request(format!("--{} needs a numeric value", name)))
    };

    match name {
        "fraction" => options.fraction = true,
        "abbreviations" => options.abbreviations = true,
        "allow-negatives" => options.allow_negatives = true,
        "round-down" => options.round_down = true,
        "min" => options.min = Some(number(value)?),
        "max" => options.max = Some(number(value)?),
        "largest" => {
            let largest = value
                .and_then(|v| v.parse::<u32>().ok())
                .ok_or_else(|| QuantaError::invalid_request("--largest needs a whole number"))?;
            options.largest_denominator = Some(largest);
        }
        "units" => {
            let units = value.ok_or_else(|| QuantaError::invalid_request("--units needs a list"))?;
            options.units = Some(units.split(',').map(|u| u.trim().to_string()).collect());
        }
        _ => return Err(QuantaError::invalid_request(format!("unknown flag --{}", name))),
    }
    Ok(())
}
