//! Built-in unit classes, registered in this order:
//! Area, Digital, Length, Rotation, Time, Volume, Weight
//!
//! Later classes own shared aliases, so "oz" is a weight and the fluid ounce
//! is reached through "fl oz".

use std::f64::consts::PI;

use crate::class::{RegistryError, UnitClass};

pub(crate) fn builtin_classes() -> Result<Vec<UnitClass>, RegistryError> {
    Ok(vec![area()?, digital()?, length()?, rotation()?, time()?, volume()?, weight()?])
}

fn area() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Area");
    uc.add_group(1.0, None, &["sqin", "sq. in.", "sq in", "in2", "in^2", "square inch", "square inches"], &[2, 4, 8, 16], "square inch", "square inches")?;
    uc.add_group(144.0, Some("sqin"), &["sqft", "sq. ft.", "sq ft", "ft2", "ft^2", "square foot", "square feet"], &[2, 4, 8, 16], "square foot", "square feet")?;
    uc.add_group(9.0, Some("sqft"), &["sqyd", "sq. yd.", "sq yd", "yd2", "yd^2", "square yard", "square yards"], &[2, 3, 4, 8, 9, 16], "square yard", "square yards")?;
    uc.add_group(4840.0, Some("sqyd"), &["acre", "acres"], &[2, 3, 4, 8, 10], "acre", "acres")?;
    uc.add_group(640.0, Some("acre"), &["sqmi", "sq. mi.", "sq mi", "mi2", "mi^2", "square mile", "square miles"], &[2, 3, 4, 8, 10], "square mile", "square miles")?;
    uc.add_group(1.0, None, &["sqmm", "sq. mm.", "sq mm", "mm2", "mm^2", "square millimeter", "square millimeters"], &[2, 4, 8, 16], "square millimeter", "square millimeters")?;
    uc.add_group(100.0, Some("sqmm"), &["sqcm", "sq. cm.", "sq cm", "cm2", "cm^2", "square centimeter", "square centimeters"], &[2, 4, 8, 16], "square centimeter", "square centimeters")?;
    uc.add_group(10_000.0, Some("sqcm"), &["sqm", "sq. m.", "sq m", "m2", "m^2", "square meter", "square meters"], &[2, 4, 8, 16], "square meter", "square meters")?;
    uc.add_group(1_000_000.0, Some("sqm"), &["sqkm", "sq. km.", "sq km", "km2", "km^2", "square kilometer", "square kilometers"], &[2, 3, 4, 8, 9, 16], "square kilometer", "square kilometers")?;
    uc.add_base_conversion("sqin", "sqmm", 645.16)?;
    Ok(uc)
}

// Decimal and binary prefixes shared by bytes and bits
const DECIMAL_PREFIXES: [(&str, &str); 8] = [
    ("k", "kilo"),
    ("m", "mega"),
    ("g", "giga"),
    ("t", "tera"),
    ("p", "peta"),
    ("e", "exa"),
    ("z", "zetta"),
    ("y", "yotta"),
];
const BINARY_PREFIXES: [(&str, &str); 8] = [
    ("ki", "kibi"),
    ("mi", "mebi"),
    ("gi", "gibi"),
    ("ti", "tebi"),
    ("pi", "pebi"),
    ("ei", "exbi"),
    ("zi", "zebi"),
    ("yi", "yobi"),
];

// One group per prefix, each `step` times the one before. `symbol` is
// appended to the prefix symbol ("k" + "b"), `name` to the prefix name.
fn add_prefixed(
    uc: &mut UnitClass,
    base: &str,
    symbol: &str,
    name: &str,
    prefixes: &[(&str, &str)],
    step: f64,
    denominators: &[u32],
) -> Result<(), RegistryError> {
    let mut previous = base.to_string();
    for (short, long) in prefixes {
        let unit = format!("{}{}", short, symbol);
        let singular = format!("{}{}", long, name);
        let plural = format!("{}s", singular);
        uc.add_group(
            step,
            Some(previous.as_str()),
            &[unit.as_str(), singular.as_str(), plural.as_str()],
            denominators,
            &singular,
            &plural,
        )?;
        previous = unit;
    }
    Ok(())
}

fn digital() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Digital");
    uc.add_group(1.0, None, &["bit", "bits"], &[], "bit", "bits")?;
    uc.add_group(4.0, Some("bit"), &["nibble", "nibbles", "nybble", "nyble", "half-byte", "half byte", "tetrade", "semi-octet", "quadbit", "quartet"], &[], "nibble", "nibbles")?;
    uc.add_group(8.0, Some("bit"), &["b", "byte", "bytes"], &[2, 8], "byte", "bytes")?;
    add_prefixed(&mut uc, "b", "b", "byte", &DECIMAL_PREFIXES, 1000.0, &[2, 4, 5, 10])?;
    add_prefixed(&mut uc, "b", "b", "byte", &BINARY_PREFIXES, 1024.0, &[2, 4, 8, 16])?;
    add_prefixed(&mut uc, "bit", "bit", "bit", &DECIMAL_PREFIXES, 1000.0, &[2, 4, 5, 10])?;
    add_prefixed(&mut uc, "bit", "bit", "bit", &BINARY_PREFIXES, 1024.0, &[2, 4, 8, 16])?;
    Ok(uc)
}

fn length() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Length");
    uc.add_group(1.0, None, &["in", "inch", "inches", "\""], &[2, 3, 4, 8, 16, 32], "inch", "inches")?;
    uc.add_group(12.0, Some("in"), &["ft", "foot", "feet", "'"], &[2, 3, 4, 12], "foot", "feet")?;
    uc.add_group(3.0, Some("ft"), &["yd", "yard", "yards"], &[3], "yard", "yards")?;
    uc.add_group(5280.0, Some("ft"), &["mi", "mile", "miles"], &[2, 3, 4, 5, 6, 7, 8, 9, 10], "mile", "miles")?;
    uc.add_group(3.0, Some("mi"), &["league", "leagues"], &[2, 3, 4, 5, 6, 7, 8, 9, 10], "league", "leagues")?;
    uc.add_group(1.0, None, &["mm", "millimeter", "millimeters", "millimetre", "millimetres"], &[10], "millimeter", "millimeters")?;
    uc.add_group(10.0, Some("mm"), &["cm", "centimeter", "centimeters", "centimetre", "centimetres"], &[2, 4, 10], "centimeter", "centimeters")?;
    uc.add_group(10.0, Some("cm"), &["dm", "dc", "decimeter", "decimeters", "decimetre", "decimetres"], &[10], "decimeter", "decimeters")?;
    uc.add_group(100.0, Some("cm"), &["m", "meter", "meters", "metre", "metres"], &[2, 3, 4, 5, 10], "meter", "meters")?;
    uc.add_group(1000.0, Some("m"), &["km", "kilometer", "kilometers", "kilometre", "kilometres"], &[2, 3, 4, 5, 6, 7, 8, 9, 10], "kilometer", "kilometers")?;
    uc.add_base_conversion("in", "mm", 25.4)?;
    Ok(uc)
}

fn rotation() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Rotation");
    uc.add_group(1.0, None, &["deg", "degree", "degrees"], &[], "degree", "degrees")?;
    uc.add_group(1.0, None, &["rad", "radian", "radians"], &[], "radian", "radians")?;
    uc.add_base_conversion("deg", "rad", PI / 180.0)?;
    Ok(uc)
}

fn time() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Time");
    uc.add_group(1.0, None, &["ns", "nanosecond", "nanoseconds", "nano", "nanos"], &[10, 100], "nanosecond", "nanoseconds")?;
    uc.add_group(1000.0, Some("ns"), &["us", "microsecond", "microseconds", "micros", "micro"], &[10, 100, 1000], "microsecond", "microseconds")?;
    uc.add_group(1000.0, Some("us"), &["ms", "millisecond", "milliseconds", "millis"], &[10, 100, 1000], "millisecond", "milliseconds")?;
    uc.add_group(1000.0, Some("ms"), &["s", "second", "seconds", "sec", "secs"], &[2, 10, 100, 1000], "second", "seconds")?;
    uc.add_group(60.0, Some("s"), &["min", "minute", "minutes", "mins"], &[2, 3, 4, 60], "minute", "minutes")?;
    uc.add_group(60.0, Some("min"), &["hr", "hour", "hours", "hrs"], &[2, 3, 4, 60], "hour", "hours")?;
    uc.add_group(24.0, Some("hr"), &["day", "days"], &[2, 3, 4, 6, 24], "day", "days")?;
    uc.add_group(7.0, Some("day"), &["wk", "week", "weeks", "wks"], &[7], "week", "weeks")?;
    uc.add_group(365.2425, Some("day"), &["yr", "year", "years", "yrs"], &[2, 3, 4, 6, 12, 52], "year", "years")?;
    Ok(uc)
}

fn volume() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Volume");
    uc.add_group(1.0, None, &["tsp", "ts", "tsps", "teaspoon", "teaspoons"], &[2, 3, 4], "teaspoon", "teaspoons")?;
    uc.add_group(3.0, Some("tsp"), &["tbsp", "tbsps", "tablespoon", "tablespoons"], &[2, 3, 4], "tablespoon", "tablespoons")?;
    uc.add_group(6.0, Some("tsp"), &["oz", "ounce", "ounces", "fl-oz", "fl oz", "floz", "fluid ounce", "fluid ounces", "fl. oz.", "oz. fl.", "oz fl"], &[2, 3, 6], "fluid ounce", "fluid ounces")?;
    uc.add_group(8.0, Some("oz"), &["c", "cup", "cups"], &[2, 3, 4], "cup", "cups")?;
    uc.add_group(2.0, Some("c"), &["pt", "pint", "pints"], &[2, 4], "pint", "pints")?;
    uc.add_group(4.0, Some("c"), &["qt", "quart", "quarts"], &[2, 4], "quart", "quarts")?;
    uc.add_group(4.0, Some("qt"), &["gal", "gallon", "gallons"], &[2, 4, 8, 16], "gallon", "gallons")?;
    uc.add_group(1.0, None, &["ml", "millilitre", "millilitres", "milliliter", "milliliters"], &[2, 10], "millilitre", "millilitres")?;
    uc.add_group(1000.0, Some("ml"), &["l", "litre", "litres", "liter", "liters"], &[2, 10], "litre", "litres")?;
    uc.add_group(1.0, None, &["mm3", "mm^3", "cubic mm", "cubic millimeter", "cubic millimeters"], &[2, 4, 8], "cubic millimeter", "cubic millimeters")?;
    uc.add_group(1000.0, Some("mm3"), &["cm3", "cm^3", "cc", "cubic cm", "cubic centimeter", "cubic centimeters"], &[2, 4, 8], "cubic centimeter", "cubic centimeters")?;
    uc.add_group(1_000_000.0, Some("cm3"), &["m3", "m^3", "cubic m", "cubic meter", "cubic meters"], &[2, 4, 8], "cubic meter", "cubic meters")?;
    uc.add_group(1_000_000_000.0, Some("m3"), &["km3", "km^3", "cubic km", "cubic kilometer", "cubic kilometers"], &[2, 4, 8], "cubic kilometer", "cubic kilometers")?;
    uc.add_group(1.0, None, &["in3", "in^3", "cubic in", "cubic inch", "cubic inches"], &[2, 4, 8], "cubic inch", "cubic inches")?;
    uc.add_group(1728.0, Some("in3"), &["ft3", "ft^3", "cubic ft", "cubic foot", "cubic feet"], &[2, 4, 8], "cubic foot", "cubic feet")?;
    uc.add_group(27.0, Some("ft3"), &["yd3", "yd^3", "cubic yd", "cubic yard", "cubic yards"], &[2, 4, 8], "cubic yard", "cubic yards")?;

    // every pair of the four base systems needs a direct factor
    let tsp_ml = 4.92892;
    let tsp_in3 = 0.300781;
    let ml_mm3 = 1000.0;
    uc.add_base_conversion("tsp", "ml", tsp_ml)?;
    uc.add_base_conversion("tsp", "mm3", tsp_ml * ml_mm3)?;
    uc.add_base_conversion("tsp", "in3", tsp_in3)?;
    uc.add_base_conversion("ml", "mm3", ml_mm3)?;
    uc.add_base_conversion("ml", "in3", tsp_in3 / tsp_ml)?;
    uc.add_base_conversion("mm3", "in3", tsp_in3 / (tsp_ml * ml_mm3))?;
    Ok(uc)
}

fn weight() -> Result<UnitClass, RegistryError> {
    let mut uc = UnitClass::new("Weight");
    uc.add_group(1.0, None, &["mg", "milligram", "milligrams"], &[2, 10], "milligram", "milligrams")?;
    uc.add_group(1000.0, Some("mg"), &["g", "gram", "grams"], &[2, 10, 100], "gram", "grams")?;
    uc.add_group(1000.0, Some("g"), &["kg", "kilogram", "kilograms", "kilo", "kilos"], &[2, 10, 100], "kilogram", "kilograms")?;
    uc.add_group(1000.0, Some("kg"), &["t", "tonne", "tonnes", "metric ton", "metric tons"], &[2, 4, 10], "tonne", "tonnes")?;
    uc.add_group(1.0, None, &["oz", "ounce", "ounces"], &[2, 3, 4, 10], "ounce", "ounces")?;
    uc.add_group(16.0, Some("oz"), &["lb", "lbs", "pound", "pounds"], &[2, 3, 4, 16], "pound", "pounds")?;
    uc.add_group(2000.0, Some("lb"), &["ton", "tons"], &[2, 3, 4, 10], "ton", "tons")?;
    uc.add_base_conversion("mg", "oz", 0.000035274)?;
    Ok(uc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_classes_build() {
        let classes = builtin_classes().unwrap();
        assert_eq!(classes.len(), 7);
        for class in &classes {
            assert!(class.validate().is_ok(), "{}", class.name());
        }
    }

    #[test]
    fn test_prefixed_digital_units() {
        let uc = digital().unwrap();
        assert_eq!(uc.scale("kb"), Some(8000.0));
        assert_eq!(uc.scale("kibibytes"), Some(8192.0));
        assert_eq!(uc.scale("mbit"), Some(1_000_000.0));
        assert_eq!(uc.group("yib").unwrap().singular, "yobibyte");
        assert_eq!(uc.convert(1.0, "gb", "mb").unwrap(), 1000.0);
    }

    #[test]
    fn test_volume_systems_agree() {
        let uc = volume().unwrap();
        // one litre through each route
        let via_ml = uc.convert(1.0, "l", "in3").unwrap();
        let via_tsp = uc.convert(uc.convert(1.0, "l", "tsp").unwrap(), "tsp", "in3").unwrap();
        assert!((via_ml - via_tsp).abs() < 1e-6);
        assert!((uc.convert(1.0, "l", "cm3").unwrap() - 1000.0).abs() < 1e-9);
        assert!((uc.convert(1.0, "ft3", "in3").unwrap() - 1728.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation() {
        let uc = rotation().unwrap();
        assert!((uc.convert(180.0, "deg", "rad").unwrap() - PI).abs() < 1e-12);
    }
}
