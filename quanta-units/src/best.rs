//! Best unit: re-express a quantity in the unit that reads most naturally

use std::sync::Arc;
use tracing::trace;
use quanta_core::{format_number, Fraction};

use crate::convert::ConversionError;
use crate::group::UnitGroup;
use crate::input::Input;
use crate::options::RenderOptions;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

impl Registry {
    /// Parse `input` and re-express it in its best unit.
    pub fn best(&self, input: impl Into<Input>, options: &RenderOptions) -> Result<ParsedQuantity, ConversionError> {
        Ok(self.parse_input(&input.into())?.best(self, options))
    }
}

impl ParsedQuantity {
    /// The group whose fraction is valid, closest, and shortest to write.
    ///
    /// Groups are tried in registration order. A later group replaces the
    /// current pick when it is at least as close and its rendering is no
    /// longer. Quantities without a class, or with no valid group, come back
    /// unchanged.
    pub fn best(&self, registry: &Registry, options: &RenderOptions) -> ParsedQuantity {
        let Some(class) = self.unit_class.as_deref().and_then(|name| registry.class(name)) else {
            return self.clone();
        };

        let rendered = |f: &Fraction| {
            if options.fraction {
                f.display.len()
            } else {
                format_number(f.actual).len()
            }
        };

        let mut closest: Option<(Fraction, &Arc<UnitGroup>)> = None;
        for group in class.groups() {
            let Ok(converted) = class.convert(self.value, &self.unit, &group.main_unit) else {
                continue;
            };
            let fraction = Fraction::search(converted, &group.denominators, options.largest_denominator, false);
            if !fraction.valid || (self.value != 0.0 && reads_as_zero(&fraction)) {
                continue;
            }
            let better = match &closest {
                None => true,
                Some((current, _)) => {
                    fraction.distance <= current.distance && rendered(&fraction) <= rendered(current)
                }
            };
            if better {
                trace!(unit = %group.main_unit, display = %fraction.display, "best unit candidate");
                closest = Some((fraction, group));
            }
        }

        let Some((fraction, group)) = closest else {
            return self.clone();
        };
        let normal = if options.fraction {
            fraction.with_unit(group.label(fraction.is_singular(), options.abbreviations))
        } else {
            group.add_unit(fraction.actual, options.abbreviations)
        };

        ParsedQuantity {
            value: fraction.actual,
            unit: group.main_unit.clone(),
            unit_class: self.unit_class.clone(),
            group: Some(Arc::clone(group)),
            normal,
        }
    }
}

// A nonzero amount rounded away to nothing in a too-large unit
fn reads_as_zero(fraction: &Fraction) -> bool {
    fraction.actual == 0.0 || (fraction.denominator == 1 && fraction.numerator.round() == 0.0)
}
