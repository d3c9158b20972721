//! Compound rendering: "0.625 cups" as "1/2 c, 2 tbsp"

use tracing::trace;
use quanta_core::{create_normal, format_number};

use crate::convert::ConversionError;
use crate::input::Input;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

impl Registry {
    /// Parse `input` and split it across several units of its class.
    ///
    /// `allowed` limits the units used; any alias of a group admits it.
    pub fn compound(&self, input: impl Into<Input>, allowed: Option<&[&str]>) -> Result<String, ConversionError> {
        Ok(self.parse_input(&input.into())?.compound(self, allowed))
    }
}

impl ParsedQuantity {
    /// Largest units first, each taking the biggest amount that fits with
    /// one of its denominators. Quantities without a class, or nothing at
    /// all fitting, fall back to the normal form.
    pub fn compound(&self, registry: &Registry, allowed: Option<&[&str]>) -> String {
        let Some(class) = self.unit_class.as_deref().and_then(|name| registry.class(name)) else {
            return self.normal.clone();
        };
        let allowed: Option<Vec<String>> =
            allowed.map(|units| units.iter().map(|u| u.trim().to_lowercase()).collect());

        let mut remaining = self.value;
        let mut parts = Vec::new();
        for group in class.groups().iter().rev() {
            if let Some(allowed) = &allowed {
                if !allowed.iter().any(|u| group.has_alias(u)) {
                    continue;
                }
            }
            let Ok(converted) = class.convert(remaining, &self.unit, &group.main_unit) else {
                continue;
            };

            for &den in &group.denominators {
                let d = f64::from(den);
                let mut numerator = (d * converted).floor();
                if numerator < 1.0 {
                    continue;
                }

                let whole = (numerator / d).floor();
                let mut amount = String::new();
                if whole >= 1.0 {
                    amount.push_str(&format_number(whole));
                    numerator -= whole * d;
                }
                if numerator > 0.0 && den > 1 {
                    if !amount.is_empty() {
                        amount.push(' ');
                    }
                    amount.push_str(&format!("{}/{}", format_number(numerator), den));
                }

                let taken = whole + numerator / d;
                trace!(unit = %group.main_unit, amount = %amount, "compound part");
                parts.push(create_normal(&amount, &group.main_unit));
                if let Ok(back) = class.convert(taken, &group.main_unit, &self.unit) {
                    remaining -= back;
                }
                break;
            }
        }

        if parts.is_empty() {
            self.normal.clone()
        } else {
            parts.join(&registry.settings().separator_join)
        }
    }
}
