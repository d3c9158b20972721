//! Registry of unit classes and the global alias index

use std::collections::HashMap;
use tracing::debug;

use crate::class::{RegistryError, UnitClass};
use crate::convert::ConversionError;
use crate::input::Input;
use crate::options::Settings;
use crate::quantity::ParsedQuantity;
use crate::units;

/// All known unit classes, with an index from every alias to its class.
///
/// When two classes share an alias ("oz" is both a volume and a weight),
/// the class registered last owns it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: Vec<UnitClass>,
    class_map: HashMap<String, usize>,
    unit_to_class: HashMap<String, usize>,
    settings: Settings,
}

impl Registry {
    /// An empty registry with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Registry { settings, ..Self::default() }
    }

    /// A registry holding the built-in classes
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::builtin_with_settings(Settings::default())
    }

    pub fn builtin_with_settings(settings: Settings) -> Result<Self, RegistryError> {
        let mut registry = Self::with_settings(settings);
        for class in units::builtin_classes()? {
            registry.add_class(class)?;
        }
        Ok(registry)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register a class. Its aliases take over any already owned by
    /// earlier classes.
    pub fn add_class(&mut self, class: UnitClass) -> Result<(), RegistryError> {
        if self.class_map.contains_key(class.name()) {
            return Err(RegistryError::DuplicateClass(class.name().to_string()));
        }
        class.validate()?;

        let index = self.classes.len();
        for alias in class.units() {
            if let Some(previous) = self.unit_to_class.insert(alias.to_string(), index) {
                debug!(
                    alias,
                    shadowed = self.classes[previous].name(),
                    by = class.name(),
                    "unit alias shadowed"
                );
            }
        }
        debug!(class = class.name(), groups = class.groups().len(), "registered unit class");
        self.class_map.insert(class.name().to_string(), index);
        self.classes.push(class);
        Ok(())
    }

    pub fn class(&self, name: &str) -> Option<&UnitClass> {
        self.class_map.get(name).map(|&i| &self.classes[i])
    }

    /// The class that owns `alias`
    pub fn class_of(&self, alias: &str) -> Option<&UnitClass> {
        self.unit_to_class.get(alias).map(|&i| &self.classes[i])
    }

    /// Classes in registration order
    pub fn classes(&self) -> &[UnitClass] {
        &self.classes
    }

    /// Forget one alias of the class that owns it
    pub fn remove_unit(&mut self, unit: &str) -> bool {
        let unit = unit.trim().to_lowercase();
        let Some(&index) = self.unit_to_class.get(&unit) else {
            return false;
        };
        let removed = self.classes[index].remove_unit(&unit);
        self.reindex(&unit);
        if removed {
            debug!(unit = %unit, class = self.classes[index].name(), "removed unit");
        }
        removed
    }

    /// Drop the whole group `unit` belongs to
    pub fn remove_group(&mut self, unit: &str) -> bool {
        let unit = unit.trim().to_lowercase();
        let Some(&index) = self.unit_to_class.get(&unit) else {
            return false;
        };
        let Some(group) = self.classes[index].remove_group(&unit) else {
            return false;
        };
        for alias in &group.aliases {
            self.reindex(alias);
        }
        debug!(group = %group.main_unit, class = self.classes[index].name(), "removed unit group");
        true
    }

    // An alias falls back to the latest class that still knows it
    fn reindex(&mut self, alias: &str) {
        match self.classes.iter().rposition(|c| c.has_unit(alias)) {
            Some(index) => {
                self.unit_to_class.insert(alias.to_string(), index);
            }
            None => {
                self.unit_to_class.remove(alias);
            }
        }
    }

    /// A quantity of `value` in `unit`, resolved when the unit is known
    pub fn quantity(&self, value: f64, unit: &str) -> ParsedQuantity {
        let unit = unit.trim().to_lowercase();
        let normal = quanta_core::create_normal(&quanta_core::format_number(value), &unit);
        ParsedQuantity::new(value, unit.as_str(), self.class_of(&unit), normal)
    }

    /// Read one quantity from any input.
    ///
    /// A list must hold exactly one item.
    pub fn parse_input(&self, input: &Input) -> Result<ParsedQuantity, ConversionError> {
        match input {
            Input::Number(value) => Ok(ParsedQuantity::from_number(*value)),
            Input::Text(text) => self.parse(text),
            Input::Quantity(quantity) => Ok(quantity.clone()),
            Input::List(items) => match items.as_slice() {
                [single] => self.parse_input(single),
                _ => Err(ConversionError::Unparsable(format!("list of {} items", items.len()))),
            },
        }
    }

    /// Split input into single quantities on the configured separator
    pub fn split_input(&self, input: &Input) -> Vec<Input> {
        input.split(&self.settings.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_classes_in_order() {
        let r = Registry::builtin().unwrap();
        let names: Vec<&str> = r.classes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Area", "Digital", "Length", "Rotation", "Time", "Volume", "Weight"]);
    }

    #[test]
    fn test_later_class_owns_shared_alias() {
        let r = Registry::builtin().unwrap();
        assert_eq!(r.class_of("oz").unwrap().name(), "Weight");
        assert_eq!(r.class_of("fl oz").unwrap().name(), "Volume");
        assert!(r.class_of("tacos").is_none());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut r = Registry::new();
        r.add_class(UnitClass::new("Length")).unwrap();
        assert_eq!(
            r.add_class(UnitClass::new("Length")),
            Err(RegistryError::DuplicateClass("Length".to_string()))
        );
    }

    #[test]
    fn test_remove_unit_falls_back_to_earlier_class() {
        let mut r = Registry::builtin().unwrap();
        assert!(r.remove_unit("oz"));
        assert_eq!(r.class_of("oz").unwrap().name(), "Volume");
        assert!(r.remove_unit("OZ"));
        assert!(r.class_of("oz").is_none());
        assert!(!r.remove_unit("oz"));
    }

    #[test]
    fn test_remove_group() {
        let mut r = Registry::builtin().unwrap();
        assert!(r.remove_group("pint"));
        assert!(r.class_of("pt").is_none());
        assert!(r.class_of("pints").is_none());
        assert!(!r.remove_group("pint"));
        assert_eq!(r.class("Volume").unwrap().groups().iter().filter(|g| g.main_unit == "pt").count(), 0);
    }

    #[test]
    fn test_quantity() {
        let r = Registry::builtin().unwrap();
        let q = r.quantity(2.0, "Cups");
        assert_eq!(q.unit, "cups");
        assert_eq!(q.unit_class.as_deref(), Some("Volume"));
        assert_eq!(q.normal, "2 cups");

        let q = r.quantity(3.0, "tacos");
        assert_eq!(q.normal, "3 tacos");
        assert!(!q.is_classified());
    }

    #[test]
    fn test_parse_input_list() {
        let r = Registry::builtin().unwrap();
        assert_eq!(r.parse_input(&Input::from(vec!["2 cups"])).unwrap().value, 2.0);
        assert!(r.parse_input(&Input::from(vec!["2 cups", "1 pt"])).is_err());
    }

    #[test]
    fn test_custom_separator() {
        let r = Registry::builtin_with_settings(Settings { separator: ";".to_string(), ..Settings::default() })
            .unwrap();
        assert_eq!(r.split_input(&Input::from("2 cups; 1 pt")).len(), 2);
    }
}
