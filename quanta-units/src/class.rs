//! Unit class: a family of mutually convertible unit groups

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

use crate::convert::ConversionError;
use crate::group::UnitGroup;

/// Reasons a unit table is rejected while it is being built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("{class}: a unit group needs at least one alias")]
    EmptyAliases { class: String },

    #[error("{class}: scale of '{unit}' must be finite and positive, got {scale}")]
    InvalidScale { class: String, unit: String, scale: f64 },

    #[error("{class}: '{unit}' is defined relative to unknown unit '{base}'")]
    UnknownBase { class: String, unit: String, base: String },

    #[error("{class}: alias '{alias}' is declared more than once")]
    DuplicateAlias { class: String, alias: String },

    #[error("{class}: '{unit}' lists a zero denominator")]
    ZeroDenominator { class: String, unit: String },

    #[error("{class}: '{unit}' is not the base unit of a system")]
    NotABase { class: String, unit: String },

    #[error("{class}: no conversion factor between base systems '{from}' and '{to}'")]
    MissingCrossBase { class: String, from: String, to: String },

    #[error("unit class '{0}' is already registered")]
    DuplicateClass(String),
}

impl From<RegistryError> for quanta_core::QuantaError {
    fn from(err: RegistryError) -> Self {
        quanta_core::QuantaError::registry(err.to_string())
    }
}

/// A family of unit groups, possibly spanning several base systems
/// (customary and metric) joined by cross-base factors.
///
/// Every alias maps to its group, to its scale in base units, and to the
/// main unit of its base group.
#[derive(Debug, Clone)]
pub struct UnitClass {
    name: String,
    groups: Vec<Arc<UnitGroup>>,
    group_map: HashMap<String, Arc<UnitGroup>>,
    scales: HashMap<String, f64>,
    bases: HashMap<String, String>,
    cross_base: HashMap<String, HashMap<String, f64>>,
}

impl UnitClass {
    pub fn new(name: impl Into<String>) -> Self {
        UnitClass {
            name: name.into(),
            groups: Vec::new(),
            group_map: HashMap::new(),
            scales: HashMap::new(),
            bases: HashMap::new(),
            cross_base: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Groups in registration order
    pub fn groups(&self) -> &[Arc<UnitGroup>] {
        &self.groups
    }

    pub fn group(&self, alias: &str) -> Option<&Arc<UnitGroup>> {
        self.group_map.get(alias)
    }

    pub fn has_unit(&self, alias: &str) -> bool {
        self.group_map.contains_key(alias)
    }

    /// Every alias still known to this class
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.group_map.keys().map(|s| s.as_str())
    }

    pub fn scale(&self, alias: &str) -> Option<f64> {
        self.scales.get(alias).copied()
    }

    pub fn base(&self, alias: &str) -> Option<&str> {
        self.bases.get(alias).map(|s| s.as_str())
    }

    pub fn cross_factor(&self, from: &str, to: &str) -> Option<f64> {
        self.cross_base.get(from).and_then(|m| m.get(to)).copied()
    }

    /// Distinct base systems, in the order their groups were added
    pub fn base_units(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for group in &self.groups {
            if !seen.contains(&group.base_unit.as_str()) {
                seen.push(group.base_unit.as_str());
            }
        }
        seen
    }

    /// Add a group of aliases.
    ///
    /// Without `relative_to` the group starts a new base system and
    /// `relative_value` is its scale (normally 1). Otherwise one of the new
    /// unit equals `relative_value` of `relative_to`, which must already be
    /// registered in this class.
    pub fn add_group(
        &mut self,
        relative_value: f64,
        relative_to: Option<&str>,
        aliases: &[&str],
        denominators: &[u32],
        singular: &str,
        plural: &str,
    ) -> Result<Arc<UnitGroup>, RegistryError> {
        let aliases: Vec<String> = aliases.iter().map(|a| a.trim().to_lowercase()).collect();
        let main_unit = match aliases.first() {
            Some(first) if aliases.iter().all(|a| !a.is_empty()) => first.clone(),
            _ => return Err(RegistryError::EmptyAliases { class: self.name.clone() }),
        };

        if !(relative_value.is_finite() && relative_value > 0.0) {
            return Err(RegistryError::InvalidScale {
                class: self.name.clone(),
                unit: main_unit,
                scale: relative_value,
            });
        }
        if denominators.contains(&0) {
            return Err(RegistryError::ZeroDenominator { class: self.name.clone(), unit: main_unit });
        }

        let (scale, base) = match relative_to {
            Some(parent) => {
                let parent = parent.trim().to_lowercase();
                match (self.scales.get(&parent), self.bases.get(&parent)) {
                    (Some(&scale), Some(base)) => (relative_value * scale, base.clone()),
                    _ => {
                        return Err(RegistryError::UnknownBase {
                            class: self.name.clone(),
                            unit: main_unit,
                            base: parent,
                        })
                    }
                }
            }
            None => (relative_value, main_unit.clone()),
        };

        let mut fresh = HashSet::new();
        for alias in &aliases {
            if self.group_map.contains_key(alias) || !fresh.insert(alias.as_str()) {
                return Err(RegistryError::DuplicateAlias {
                    class: self.name.clone(),
                    alias: alias.clone(),
                });
            }
        }

        let group = Arc::new(UnitGroup::new(
            base.clone(),
            scale,
            aliases,
            denominators.to_vec(),
            singular,
            plural,
        ));
        for alias in &group.aliases {
            self.scales.insert(alias.clone(), scale);
            self.bases.insert(alias.clone(), base.clone());
            self.group_map.insert(alias.clone(), Arc::clone(&group));
        }
        self.groups.push(Arc::clone(&group));
        Ok(group)
    }

    /// Declare that one `source` base unit is `factor` `target` base units.
    /// The reverse factor is recorded as well.
    pub fn add_base_conversion(&mut self, source: &str, target: &str, factor: f64) -> Result<(), RegistryError> {
        let source = source.trim().to_lowercase();
        let target = target.trim().to_lowercase();
        for unit in [&source, &target] {
            if self.bases.get(unit.as_str()) != Some(unit) {
                return Err(RegistryError::NotABase { class: self.name.clone(), unit: unit.clone() });
            }
        }
        if !(factor.is_finite() && factor > 0.0) {
            return Err(RegistryError::InvalidScale { class: self.name.clone(), unit: source, scale: factor });
        }

        self.cross_base.entry(source.clone()).or_default().insert(target.clone(), factor);
        self.cross_base.entry(target).or_default().insert(source, 1.0 / factor);
        Ok(())
    }

    /// Check that every pair of base systems is joined by a direct factor.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let bases = self.base_units();
        for (i, from) in bases.iter().enumerate() {
            for to in &bases[i + 1..] {
                if self.cross_factor(from, to).is_none() {
                    return Err(RegistryError::MissingCrossBase {
                        class: self.name.clone(),
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Convert `value` from one alias of this class to another.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let unknown = |unit: &str| ConversionError::UnknownUnit {
            unit: unit.to_string(),
            class: self.name.clone(),
        };
        let target = self.group(to).ok_or_else(|| unknown(to))?;
        let source = self.group(from).ok_or_else(|| unknown(from))?;
        if Arc::ptr_eq(source, target) {
            return Ok(value);
        }

        let (Some(from_scale), Some(to_scale)) = (self.scale(from), self.scale(to)) else {
            return Err(unknown(from));
        };
        let (Some(from_base), Some(to_base)) = (self.base(from), self.base(to)) else {
            return Err(unknown(from));
        };

        let mut converted = value * from_scale;
        if from_base != to_base {
            let factor = self.cross_factor(from_base, to_base).ok_or_else(|| ConversionError::NoBasePath {
                class: self.name.clone(),
                from: from_base.to_string(),
                to: to_base.to_string(),
            })?;
            converted *= factor;
        }
        Ok(converted / to_scale)
    }

    /// Forget one alias. Its group stays, reachable through the others.
    pub fn remove_unit(&mut self, alias: &str) -> bool {
        let known = self.group_map.remove(alias).is_some();
        self.scales.remove(alias);
        self.bases.remove(alias);
        known
    }

    /// Drop the group `alias` belongs to, together with all of its aliases.
    pub fn remove_group(&mut self, alias: &str) -> Option<Arc<UnitGroup>> {
        let group = self.group_map.get(alias).cloned()?;
        for a in &group.aliases {
            if self.group_map.get(a).is_some_and(|g| Arc::ptr_eq(g, &group)) {
                self.remove_unit(a);
            }
        }
        self.groups.retain(|g| !Arc::ptr_eq(g, &group));
        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> UnitClass {
        let mut uc = UnitClass::new("Length");
        uc.add_group(1.0, None, &["in", "inch", "inches"], &[2, 4, 8], "inch", "inches").unwrap();
        uc.add_group(12.0, Some("in"), &["ft", "foot", "feet"], &[2, 4], "foot", "feet").unwrap();
        uc.add_group(3.0, Some("FT"), &["yd", "yard", "yards"], &[3], "yard", "yards").unwrap();
        uc.add_group(1.0, None, &["mm"], &[10], "millimeter", "millimeters").unwrap();
        uc.add_group(10.0, Some("mm"), &["cm"], &[2, 10], "centimeter", "centimeters").unwrap();
        uc.add_base_conversion("in", "mm", 25.4).unwrap();
        uc
    }

    #[test]
    fn test_scales_resolve_through_parents() {
        let uc = length();
        assert_eq!(uc.scale("yd"), Some(36.0));
        assert_eq!(uc.base("yards"), Some("in"));
        assert_eq!(uc.base("cm"), Some("mm"));
        assert_eq!(uc.base_units(), vec!["in", "mm"]);
        assert!(uc.validate().is_ok());
    }

    #[test]
    fn test_convert_within_and_across_bases() {
        let uc = length();
        assert_eq!(uc.convert(30.0, "in", "ft").unwrap(), 2.5);
        assert!((uc.convert(1.0, "in", "cm").unwrap() - 2.54).abs() < 1e-12);
        assert!((uc.convert(2.54, "cm", "inches").unwrap() - 1.0).abs() < 1e-12);
        // same group returns the value untouched
        assert_eq!(uc.convert(7.25, "foot", "ft").unwrap(), 7.25);
    }

    #[test]
    fn test_convert_unknown_unit() {
        let uc = length();
        assert_eq!(
            uc.convert(1.0, "in", "lb"),
            Err(ConversionError::UnknownUnit { unit: "lb".to_string(), class: "Length".to_string() })
        );
    }

    #[test]
    fn test_rejects_bad_groups() {
        let mut uc = length();
        assert!(matches!(
            uc.add_group(1.0, Some("furlong"), &["mi"], &[], "mile", "miles"),
            Err(RegistryError::UnknownBase { .. })
        ));
        assert!(matches!(
            uc.add_group(2.0, Some("in"), &["inch"], &[], "x", "x"),
            Err(RegistryError::DuplicateAlias { .. })
        ));
        assert!(matches!(
            uc.add_group(0.0, Some("in"), &["hand"], &[], "hand", "hands"),
            Err(RegistryError::InvalidScale { .. })
        ));
        assert!(matches!(
            uc.add_group(4.0, Some("in"), &["hand"], &[0], "hand", "hands"),
            Err(RegistryError::ZeroDenominator { .. })
        ));
        assert!(matches!(
            uc.add_group(4.0, Some("in"), &[], &[], "hand", "hands"),
            Err(RegistryError::EmptyAliases { .. })
        ));
        assert!(matches!(
            uc.add_base_conversion("ft", "mm", 304.8),
            Err(RegistryError::NotABase { .. })
        ));
    }

    #[test]
    fn test_missing_cross_base() {
        let mut uc = UnitClass::new("Odd");
        uc.add_group(1.0, None, &["a"], &[], "a", "a").unwrap();
        uc.add_group(1.0, None, &["b"], &[], "b", "b").unwrap();
        assert!(matches!(uc.validate(), Err(RegistryError::MissingCrossBase { .. })));
        uc.add_base_conversion("a", "b", 2.0).unwrap();
        assert!(uc.validate().is_ok());
        assert_eq!(uc.cross_factor("b", "a"), Some(0.5));
    }

    #[test]
    fn test_remove_unit_and_group() {
        let mut uc = length();
        assert!(uc.remove_unit("foot"));
        assert!(!uc.remove_unit("foot"));
        assert_eq!(uc.convert(24.0, "in", "feet").unwrap(), 2.0);
        assert!(uc.convert(24.0, "in", "foot").is_err());

        let removed = uc.remove_group("yd").unwrap();
        assert_eq!(removed.main_unit, "yd");
        assert!(!uc.has_unit("yards"));
        assert_eq!(uc.groups().len(), 4);
        assert!(uc.remove_group("yd").is_none());
    }
}
