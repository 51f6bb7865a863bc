use serde::{Deserialize, Serialize};

use crate::schema::names;

use super::value::FieldValue;

/// Detector family an image entry is specialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorKind {
    /// Everhart-Thornley detector.
    Etd,
    /// Through-lens detector.
    Tld,
}

/// Fields specific to the Everhart-Thornley detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EtdFields {
    /// Collection grid voltage, in volts.
    #[serde(rename = "Grid_Voltage", skip_serializing_if = "Option::is_none")]
    pub grid_voltage: Option<f64>,
}

/// Fields specific to the through-lens detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TldFields {
    /// Suction tube voltage, in volts.
    #[serde(rename = "Suction_Tube_Voltage", skip_serializing_if = "Option::is_none")]
    pub suction_tube_voltage: Option<f64>,
}

/// Detector-specific field block attached to an image entry.
///
/// Specialization is purely additive: a specialized entry carries every
/// base field plus exactly the one quantity its variant declares here. Base
/// fields are never overridden or reinterpreted, and variant fields are
/// reachable only through an entry that carries the matching block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DetectorExtension {
    /// Everhart-Thornley detector block (`SEM_Image_ETD`).
    #[serde(rename = "ETD")]
    Etd(EtdFields),
    /// Through-lens detector block (`SEM_Image_TLD`).
    #[serde(rename = "TLD")]
    Tld(TldFields),
}

impl DetectorExtension {
    /// Creates an ETD block with the given grid voltage.
    pub fn etd(grid_voltage: Option<f64>) -> Self {
        Self::Etd(EtdFields { grid_voltage })
    }

    /// Creates a TLD block with the given suction tube voltage.
    pub fn tld(suction_tube_voltage: Option<f64>) -> Self {
        Self::Tld(TldFields {
            suction_tube_voltage,
        })
    }

    /// Returns the detector family of this block.
    pub fn kind(&self) -> DetectorKind {
        match self {
            Self::Etd(_) => DetectorKind::Etd,
            Self::Tld(_) => DetectorKind::Tld,
        }
    }

    /// Returns the section name of the specialized entry this block turns
    /// its parent into.
    pub fn section_name(&self) -> &'static str {
        match self {
            Self::Etd(_) => names::SEM_IMAGE_ETD,
            Self::Tld(_) => names::SEM_IMAGE_TLD,
        }
    }

    /// Returns the declared name of this block's single quantity.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Etd(_) => names::GRID_VOLTAGE,
            Self::Tld(_) => names::SUCTION_TUBE_VOLTAGE,
        }
    }

    /// Returns the detector voltage, if recorded.
    pub fn voltage(&self) -> Option<f64> {
        match self {
            Self::Etd(f) => f.grid_voltage,
            Self::Tld(f) => f.suction_tube_voltage,
        }
    }

    /// Looks up this block's quantity by its declared name.
    ///
    /// Answers only the name this variant declares; the other family's
    /// field name is unknown here, not absent.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        if name == self.field_name() {
            self.voltage().map(FieldValue::Float)
        } else {
            None
        }
    }
}
