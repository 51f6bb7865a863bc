//! # Unit Vocabulary
//!
//! This module provides the fixed set of physical units the schema
//! definitions tag their quantities with. Every unit-bearing field declares
//! a canonical storage unit and a preferred display unit; both are fixed per
//! field and both come from this vocabulary.
//!
//! The vocabulary is deliberately closed: it contains exactly the units the
//! field set declares, nothing more. Records never convert between units —
//! the host platform owns unit conversion for display. The only operation
//! resembling arithmetic is [`Unit::compatible_with`], a dimension equality
//! check used by the schema self-checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Physical dimension of a quantity.
///
/// Dimensions group units that the host platform may convert between for
/// display (e.g. meters shown as nanometers). Two units with different
/// dimensions never describe the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Spatial extent (stage positions, pixel sizes, field sizes).
    Length,
    /// Plane angle (rotations and tilts).
    Angle,
    /// Electric current (beam, emission, specimen currents).
    ElectricCurrent,
    /// Electric potential (acceleration, bias, detector voltages).
    ElectricPotential,
    /// Energy (lens threshold energies).
    Energy,
    /// Pressure (chamber pressure).
    Pressure,
    /// Elapsed time (dwell and frame times).
    Duration,
    /// Logarithmic level quantities expressed in decibels.
    Level,
}

/// A unit tag attached to a schema field.
///
/// Serializes as the exact unit string the schema declares (`"nm"`, `"kV"`,
/// `"microsecond"`, ...), so descriptor documents round-trip byte-identical
/// unit spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Meter, the canonical length unit.
    #[serde(rename = "m")]
    Meter,
    /// Millimeter, used to display working distances.
    #[serde(rename = "mm")]
    Millimeter,
    /// Nanometer, used for spot diameters and pixel sizes.
    #[serde(rename = "nm")]
    Nanometer,
    /// Radian, the canonical angle unit.
    #[serde(rename = "rad")]
    Radian,
    /// Degree, used to display stage tilts.
    #[serde(rename = "deg")]
    Degree,
    /// Ampere, the canonical current unit.
    #[serde(rename = "A")]
    Ampere,
    /// Nanoampere, used to display beam currents.
    #[serde(rename = "nA")]
    Nanoampere,
    /// Volt, the canonical potential unit.
    #[serde(rename = "V")]
    Volt,
    /// Kilovolt, used to display acceleration voltages.
    #[serde(rename = "kV")]
    Kilovolt,
    /// Electronvolt, used for lens threshold energies.
    #[serde(rename = "eV")]
    Electronvolt,
    /// Pascal, used for chamber pressure.
    #[serde(rename = "Pa")]
    Pascal,
    /// Second, the canonical duration unit.
    #[serde(rename = "s")]
    Second,
    /// Microsecond, used to display dwell times.
    #[serde(rename = "microsecond")]
    Microsecond,
    /// Decibel, for logarithmic contrast and brightness.
    #[serde(rename = "dB")]
    Decibel,
}

impl Unit {
    /// Returns the physical dimension this unit measures.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Meter | Self::Millimeter | Self::Nanometer => Dimension::Length,
            Self::Radian | Self::Degree => Dimension::Angle,
            Self::Ampere | Self::Nanoampere => Dimension::ElectricCurrent,
            Self::Volt | Self::Kilovolt => Dimension::ElectricPotential,
            Self::Electronvolt => Dimension::Energy,
            Self::Pascal => Dimension::Pressure,
            Self::Second | Self::Microsecond => Dimension::Duration,
            Self::Decibel => Dimension::Level,
        }
    }

    /// Returns the unit string exactly as the schema declares it.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Millimeter => "mm",
            Self::Nanometer => "nm",
            Self::Radian => "rad",
            Self::Degree => "deg",
            Self::Ampere => "A",
            Self::Nanoampere => "nA",
            Self::Volt => "V",
            Self::Kilovolt => "kV",
            Self::Electronvolt => "eV",
            Self::Pascal => "Pa",
            Self::Second => "s",
            Self::Microsecond => "microsecond",
            Self::Decibel => "dB",
        }
    }

    /// Returns true when `other` measures the same dimension.
    ///
    /// This is the whole extent of unit arithmetic in this crate: a display
    /// unit is valid for a field exactly when it is compatible with the
    /// field's storage unit.
    pub fn compatible_with(&self, other: Unit) -> bool {
        self.dimension() == other.dimension()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a unit string is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit symbol: {0}")]
pub struct ParseUnitError(String);

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Self::Meter),
            "mm" => Ok(Self::Millimeter),
            "nm" => Ok(Self::Nanometer),
            "rad" => Ok(Self::Radian),
            "deg" | "degree" => Ok(Self::Degree),
            "A" => Ok(Self::Ampere),
            "nA" => Ok(Self::Nanoampere),
            "V" => Ok(Self::Volt),
            "kV" => Ok(Self::Kilovolt),
            "eV" => Ok(Self::Electronvolt),
            "Pa" => Ok(Self::Pascal),
            "s" => Ok(Self::Second),
            "microsecond" | "us" | "\u{b5}s" => Ok(Self::Microsecond),
            "dB" => Ok(Self::Decibel),
            other => Err(ParseUnitError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(Unit::Meter.dimension(), Dimension::Length);
        assert_eq!(Unit::Nanometer.dimension(), Dimension::Length);
        assert_eq!(Unit::Kilovolt.dimension(), Dimension::ElectricPotential);
        assert_eq!(Unit::Microsecond.dimension(), Dimension::Duration);
        assert_eq!(Unit::Decibel.dimension(), Dimension::Level);
    }

    #[test]
    fn test_compatibility() {
        assert!(Unit::Meter.compatible_with(Unit::Nanometer));
        assert!(Unit::Volt.compatible_with(Unit::Kilovolt));
        assert!(Unit::Radian.compatible_with(Unit::Degree));
        assert!(!Unit::Meter.compatible_with(Unit::Volt));
        assert!(!Unit::Second.compatible_with(Unit::Decibel));
    }

    #[test]
    fn test_symbol_parse_roundtrip() {
        for unit in [
            Unit::Meter,
            Unit::Millimeter,
            Unit::Nanometer,
            Unit::Radian,
            Unit::Degree,
            Unit::Ampere,
            Unit::Nanoampere,
            Unit::Volt,
            Unit::Kilovolt,
            Unit::Electronvolt,
            Unit::Pascal,
            Unit::Second,
            Unit::Microsecond,
            Unit::Decibel,
        ] {
            assert_eq!(unit.symbol().parse::<Unit>(), Ok(unit));
        }
    }

    #[test]
    fn test_parse_aliases_and_rejects() {
        assert_eq!("us".parse::<Unit>(), Ok(Unit::Microsecond));
        assert_eq!("degree".parse::<Unit>(), Ok(Unit::Degree));
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serde_uses_declared_spelling() {
        let json = serde_json::to_string(&Unit::Microsecond).unwrap();
        assert_eq!(json, "\"microsecond\"");
        let back: Unit = serde_json::from_str("\"kV\"").unwrap();
        assert_eq!(back, Unit::Kilovolt);
    }
}
