//! Input accepted by every operation: text, numbers, parsed quantities or lists of them

use crate::quantity::ParsedQuantity;

/// Anything an operation can read a quantity from
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A unitless number
    Number(f64),
    /// Quantity text, possibly a separated list ("2 cups, 1 pint")
    Text(String),
    /// An already parsed quantity
    Quantity(ParsedQuantity),
    /// Several inputs; nested lists are flattened
    List(Vec<Input>),
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Number(value)
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Input::Number(f64::from(value))
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Input::Text(text.clone())
    }
}

impl From<ParsedQuantity> for Input {
    fn from(quantity: ParsedQuantity) -> Self {
        Input::Quantity(quantity)
    }
}

impl From<&ParsedQuantity> for Input {
    fn from(quantity: &ParsedQuantity) -> Self {
        Input::Quantity(quantity.clone())
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Input::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input>, const N: usize> From<[T; N]> for Input {
    fn from(items: [T; N]) -> Self {
        Input::List(items.into_iter().map(Into::into).collect())
    }
}

impl Input {
    /// Flatten into single-quantity inputs.
    ///
    /// Text is split on `separator`; blank pieces are dropped. List items are
    /// taken as they are, without splitting their text.
    pub fn split(&self, separator: &str) -> Vec<Input> {
        match self {
            Input::Text(text) => text
                .split(separator)
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(Input::from)
                .collect(),
            Input::List(items) => {
                let mut flat = Vec::new();
                for item in items {
                    match item {
                        Input::List(_) => flat.extend(item.split(separator)),
                        other => flat.push(other.clone()),
                    }
                }
                flat
            }
            other => vec![other.clone()],
        }
    }
}
