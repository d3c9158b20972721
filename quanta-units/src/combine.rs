//! Adding and subtracting lists of quantities
//!
//! Both sides are split into single quantities. Terms that convert to one
//! another, terms without a unit, and free-text units that share a prefix
//! ("loaf" and "loaves") are merged. Each surviving term is rendered in its
//! best unit.

use tracing::trace;
use quanta_core::{create_normal, format_number, is_singular};

use crate::input::Input;
use crate::options::RenderOptions;
use crate::quantity::ParsedQuantity;
use crate::registry::Registry;

/// A quantity being accumulated, with every unit spelling merged into it
#[derive(Debug, Clone)]
struct MergeTerm {
    quantity: ParsedQuantity,
    units: Vec<String>,
}

impl MergeTerm {
    fn new(quantity: ParsedQuantity) -> Self {
        let units = vec![quantity.unit.clone()];
        MergeTerm { quantity, units }
    }
}

/// True when both units start with the same `len` characters.
///
/// Shorter units must match exactly.
pub fn is_heuristic_match(a: &str, b: &str, len: usize) -> bool {
    let prefix = |s: &str| s.chars().take(len).collect::<String>();
    prefix(a) == prefix(b)
}

/// Pick a display unit from merged spellings: the shortest non-empty one
/// for a singular value, otherwise the longest. Ties go to the first.
pub fn find_unit(units: &[String], singular: bool) -> &str {
    let mut pick: Option<&str> = None;
    for unit in units.iter().map(String::as_str).filter(|u| !u.is_empty()) {
        pick = match pick {
            Some(current)
                if (singular && unit.chars().count() >= current.chars().count())
                    || (!singular && unit.chars().count() <= current.chars().count()) =>
            {
                Some(current)
            }
            _ => Some(unit),
        };
    }
    pick.unwrap_or("")
}

impl Registry {
    /// Sum two inputs and render the result: "2 cups" + "1 pt" is "1 quart".
    pub fn combine(&self, a: impl Into<Input>, b: impl Into<Input>, options: &RenderOptions) -> String {
        let terms = self.merge_terms(a.into(), b.into(), 1.0);
        self.render_terms(terms, true, options)
    }

    /// Take `b` away from `a`. Terms that end below zero are dropped unless
    /// `allow_negatives` is set.
    pub fn subtract(
        &self,
        a: impl Into<Input>,
        b: impl Into<Input>,
        allow_negatives: bool,
        options: &RenderOptions,
    ) -> String {
        let terms = self.merge_terms(a.into(), b.into(), -1.0);
        self.render_terms(terms, allow_negatives, options)
    }

    fn merge_terms(&self, a: Input, b: Input, b_sign: f64) -> Vec<MergeTerm> {
        let mut terms = Vec::new();
        for (sign, input) in [(1.0, a), (b_sign, b)] {
            for item in self.split_input(&input) {
                match self.parse_input(&item) {
                    Ok(mut quantity) => {
                        quantity.value *= sign;
                        terms.push(MergeTerm::new(quantity));
                    }
                    Err(err) => trace!(error = %err, "skipping term"),
                }
            }
        }

        // every term absorbs the later terms it can, scanning from the end
        let mut i = 0;
        while i + 1 < terms.len() {
            let mut k = terms.len() - 1;
            while k > i {
                let (head, tail) = terms.split_at_mut(k);
                if self.merge_into(&mut head[i], &tail[0]) {
                    terms.remove(k);
                }
                k -= 1;
            }
            i += 1;
        }
        terms
    }

    fn merge_into(&self, target: &mut MergeTerm, other: &MergeTerm) -> bool {
        if target.quantity.is_classified() {
            if let Ok(converted) = other.quantity.convert(self, &target.quantity.unit) {
                target.quantity.value += converted;
                return true;
            }
        }

        // text matching is only for units outside every class
        let (a, b) = (&target.quantity.unit, &other.quantity.unit);
        let free_text = !target.quantity.is_classified() && !other.quantity.is_classified();
        let similar = free_text && is_heuristic_match(a, b, self.settings().heuristic_length);
        if a.is_empty() || b.is_empty() || similar {
            trace!(into = %a, from = %b, "merging by unit text");
            target.quantity.value += other.quantity.value;
            target.units.extend(other.units.iter().cloned());
            return true;
        }
        false
    }

    fn render_terms(&self, terms: Vec<MergeTerm>, allow_negatives: bool, options: &RenderOptions) -> String {
        let mut rendered = Vec::new();
        for term in terms {
            let value = term.quantity.value;
            if value < 0.0 && !allow_negatives {
                trace!(value, unit = %term.quantity.unit, "dropping negative term");
                continue;
            }

            let quantity = match term.quantity.group.clone() {
                Some(group) => ParsedQuantity {
                    normal: group.add_unit(value, options.abbreviations),
                    ..term.quantity
                },
                None => {
                    let unit = find_unit(&term.units, is_singular(value));
                    let mut quantity = self.quantity(value, unit);
                    if !quantity.is_classified() {
                        quantity.normal = create_normal(&format_number(value), unit);
                    }
                    quantity
                }
            };

            let best = quantity.best(self, options);
            if !best.normal.is_empty() {
                rendered.push(best.normal);
            }
        }
        rendered.join(&self.settings().separator_join)
    }
}
