//! # Schema Descriptors
//!
//! This module defines the declarative side table describing every section
//! and field the crate's record types carry: stable names, scalar kinds,
//! canonical storage units, preferred display units, and the editor widget
//! hints the host platform's UI consumes. Keeping presentation metadata in
//! descriptors — instead of embedding it in the record types — decouples the
//! storage schema from the presentation schema.
//!
//! ## Sections
//!
//! | Section | Content |
//! |---------|---------|
//! | `MetaData` | 35 instrument-state quantities (beam steering, stage pose, chamber, signal chain) |
//! | `SEM_Image` | 15 acquisition-context fields plus the nested `Meta_Data` subsection |
//! | `SEM_Image_ETD` | `SEM_Image` plus `Grid_Voltage` |
//! | `SEM_Image_TLD` | `SEM_Image` plus `Suction_Tube_Voltage` |
//! | `NewSchema` | general-purpose scaffold section (`name`, `message`) |
//!
//! ## Entry-level field contract
//!
//! | Field | Kind | Storage unit | Display unit |
//! |-------|------|--------------|--------------|
//! | Sample | reference list → CompositeSystem | — | — |
//! | Microscope | reference → Instrument | — | — |
//! | Detector | reference → Instrument | — | — |
//! | Time_of_Creation | timestamp | — | — |
//! | Path_to_Image | text | — | — |
//! | Pixel_Width | float | m | nm |
//! | Pixel_Height | float | m | nm |
//! | Acceleration_Voltage | float | V | kV |
//! | Beam_Current | float | A | nA |
//! | Working_Distance | float | m | mm |
//! | Dwell_Time | float | s | microsecond |
//! | SEM_Mode | text | — | — |
//! | Stage_Tilt_alpha | float | rad | deg |
//! | Tilt_Correction | bool | — | — |
//! | Detector_Mode | text | — | — |
//!
//! Field names and unit spellings are the wire/storage contract: external
//! ingestion populates them and the host platform indexes them, so they are
//! reproduced here exactly, storage unit and display unit kept distinct.
//!
//! Descriptors are produced by side-effect-free factory functions
//! ([`data_entries_package`], [`general_package`]); every call builds a
//! fresh, identical value and nothing is registered globally.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Version string stamped into every schema package.
pub const SCHEMA_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Section, subsection, and field names as the wire/storage contract spells
/// them.
///
/// External ingestion code and the host platform's storage, search, and UI
/// layers match on these strings exactly.
pub mod names {
    // Section names
    /// Instrument-state field group section.
    pub const META_DATA: &str = "MetaData";
    /// Base image entry section.
    pub const SEM_IMAGE: &str = "SEM_Image";
    /// Everhart-Thornley detector entry section.
    pub const SEM_IMAGE_ETD: &str = "SEM_Image_ETD";
    /// Through-lens detector entry section.
    pub const SEM_IMAGE_TLD: &str = "SEM_Image_TLD";
    /// General-purpose scaffold section.
    pub const NEW_SCHEMA: &str = "NewSchema";

    // Package names
    /// The SEM schema group.
    pub const DATA_ENTRIES_PACKAGE: &str = "Data_Entries";
    /// The general-purpose schema group.
    pub const GENERAL_PACKAGE: &str = "Schema_Package";

    /// Key of the nested instrument-state subsection inside an image entry.
    pub const META_DATA_SLOT: &str = "Meta_Data";
    /// Key of the optional detector-specific block inside an image entry.
    pub const DETECTOR_DATA: &str = "Detector_Data";

    // Instrument-state fields
    /// Estimated beam spot diameter (nm).
    pub const SPOT_DIAMETER_ESTIMATED: &str = "Spot_Diameter_estimated";
    /// Stigmator X setting.
    pub const STIGMATOR_X: &str = "Stigmator_X";
    /// Stigmator Y setting.
    pub const STIGMATOR_Y: &str = "Stigmator_Y";
    /// Beam shift X setting.
    pub const BEAM_SHIFT_X: &str = "Beam_Shift_X";
    /// Beam shift Y setting.
    pub const BEAM_SHIFT_Y: &str = "Beam_Shift_Y";
    /// Source tilt X setting.
    pub const SOURCE_TILT_X: &str = "Source_Tilt_X";
    /// Source tilt Y setting.
    pub const SOURCE_TILT_Y: &str = "Source_Tilt_Y";
    /// Emission current (A).
    pub const EMISSION_CURRENT: &str = "Emission_Current";
    /// Specimen current (A).
    pub const SPECIMEN_CURRENT: &str = "Specimen_Current";
    /// Scan rotation (rad).
    pub const SCAN_ROTATION: &str = "Scan_Rotation";
    /// Compound lens enabled flag.
    pub const COMPOUND_LENS: &str = "Compound_Lens";
    /// Compound lens threshold energy (eV).
    pub const COMPOUND_LENS_THRESHOLD_ENERGY: &str = "Compound_Lens_Threshold_Energy";
    /// Stage X position (m).
    pub const STAGE_X: &str = "Stage_X";
    /// Stage Y position (m).
    pub const STAGE_Y: &str = "Stage_Y";
    /// Stage Z position (m).
    pub const STAGE_Z: &str = "Stage_Z";
    /// Stage rotation (rad).
    pub const STAGE_ROTATION: &str = "Stage_Rotation";
    /// Stage tilt alpha (rad).
    pub const STAGE_TILT_ALPHA: &str = "Stage_Tilt_alpha";
    /// Stage tilt beta (rad).
    pub const STAGE_TILT_BETA: &str = "Stage_Tilt_beta";
    /// Stage bias voltage (V).
    pub const STAGE_BIAS: &str = "Stage_Bias";
    /// Chamber pressure (Pa).
    pub const CHAMBER_PRESSURE: &str = "Chamber_Pressure";
    /// Linear contrast setting.
    pub const CONTRAST: &str = "Contrast";
    /// Linear brightness setting.
    pub const BRIGHTNESS: &str = "Brightness";
    /// Detector signal type.
    pub const SIGNAL_TYPE: &str = "Signal_Type";
    /// Contrast in decibels.
    pub const CONTRAST_DB: &str = "Contrast_DB";
    /// Brightness in decibels.
    pub const BRIGHTNESS_DB: &str = "Brightness_DB";
    /// Frame averaging count.
    pub const AVERAGE: &str = "Average";
    /// Frame integration count.
    pub const INTEGRATE: &str = "Integrate";
    /// Scan resolution in X (pixels).
    pub const RESOLUTION_X: &str = "Resolution_X";
    /// Scan resolution in Y (pixels).
    pub const RESOLUTION_Y: &str = "Resolution_Y";
    /// Horizontal field size (m).
    pub const HORIZONTAL_FIELDSIZE: &str = "Horizontal_Fieldsize";
    /// Vertical field size (m).
    pub const VERTICAL_FIELDSIZE: &str = "Vertical_Fieldsize";
    /// Frame acquisition time (s).
    pub const FRAME_TIME: &str = "Frame_Time";
    /// Digital contrast setting.
    pub const DIGITAL_CONTRAST: &str = "Digital_Contrast";
    /// Digital brightness setting.
    pub const DIGITAL_BRIGHTNESS: &str = "Digital_Brightness";
    /// Digital gamma setting.
    pub const DIGITAL_GAMMA: &str = "Digital_Gamma";

    // Image entry fields
    /// Sample reference list.
    pub const SAMPLE: &str = "Sample";
    /// Microscope instrument reference.
    pub const MICROSCOPE: &str = "Microscope";
    /// Detector instrument reference.
    pub const DETECTOR: &str = "Detector";
    /// Capture timestamp.
    pub const TIME_OF_CREATION: &str = "Time_of_Creation";
    /// Image file path.
    pub const PATH_TO_IMAGE: &str = "Path_to_Image";
    /// Pixel width (m, displayed in nm).
    pub const PIXEL_WIDTH: &str = "Pixel_Width";
    /// Pixel height (m, displayed in nm).
    pub const PIXEL_HEIGHT: &str = "Pixel_Height";
    /// Acceleration voltage (V, displayed in kV).
    pub const ACCELERATION_VOLTAGE: &str = "Acceleration_Voltage";
    /// Beam current (A, displayed in nA).
    pub const BEAM_CURRENT: &str = "Beam_Current";
    /// Working distance (m, displayed in mm).
    pub const WORKING_DISTANCE: &str = "Working_Distance";
    /// Dwell time per pixel (s, displayed in microseconds).
    pub const DWELL_TIME: &str = "Dwell_Time";
    /// SEM imaging mode.
    pub const SEM_MODE: &str = "SEM_Mode";
    /// Tilt correction applied flag.
    pub const TILT_CORRECTION: &str = "Tilt_Correction";
    /// Detector mode.
    pub const DETECTOR_MODE: &str = "Detector_Mode";

    // Detector-specific fields
    /// ETD grid voltage (V).
    pub const GRID_VOLTAGE: &str = "Grid_Voltage";
    /// TLD suction tube voltage (V).
    pub const SUCTION_TUBE_VOLTAGE: &str = "Suction_Tube_Voltage";

    // General scaffold fields
    /// Name field of the scaffold section.
    pub const NAME: &str = "name";
    /// Message field of the scaffold section.
    pub const MESSAGE: &str = "message";
}

/// Scalar kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// 64-bit floating point quantity.
    Float,
    /// Integer quantity (counts, resolutions).
    Int,
    /// Boolean flag.
    Bool,
    /// Free text.
    Text,
    /// Capture timestamp.
    Timestamp,
    /// Identity link to a single external entity.
    Reference(EntityKind),
    /// Ordered, unbounded list of identity links.
    ReferenceList(EntityKind),
}

/// Kind of external entity a reference field points at.
///
/// Targets live entirely in the host platform; this crate never resolves or
/// validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A composite sample system.
    CompositeSystem,
    /// An instrument (microscope or detector).
    Instrument,
}

/// Editor widget hint for the host platform's UI.
///
/// Serializes as the exact component strings the host platform understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditComponent {
    /// Numeric input widget.
    #[serde(rename = "NumberEditQuantity")]
    NumberEdit,
    /// Checkbox widget.
    #[serde(rename = "BoolEditQuantity")]
    BoolEdit,
    /// Text input widget.
    #[serde(rename = "StringEditQuantity")]
    StringEdit,
}

/// Description of a single named field: its kind, fixed units, and
/// presentation hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable field name, exactly as stored and indexed.
    pub name: String,

    /// Scalar kind.
    pub kind: FieldKind,

    /// Canonical storage unit, fixed per field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    /// Preferred display unit, fixed per field and distinct from `unit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<Unit>,

    /// Editor widget hint, if the field is editable in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<EditComponent>,

    /// Whether the field appears on the entry's overview panel.
    #[serde(default, skip_serializing_if = "is_false")]
    pub overview: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldDescriptor {
    /// Creates a descriptor with the given name and kind, no units, no
    /// presentation hints.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            unit: None,
            display_unit: None,
            component: None,
            overview: false,
        }
    }

    /// Sets the canonical storage unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the preferred display unit.
    pub fn with_display_unit(mut self, unit: Unit) -> Self {
        self.display_unit = Some(unit);
        self
    }

    /// Sets the editor widget hint.
    pub fn with_component(mut self, component: EditComponent) -> Self {
        self.component = Some(component);
        self
    }

    /// Marks the field for the entry's overview panel.
    pub fn on_overview(mut self) -> Self {
        self.overview = true;
        self
    }
}

/// A named slot embedding another section's fields inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSectionDescriptor {
    /// Slot name on the wire (e.g. `Meta_Data`).
    pub name: String,
    /// Name of the target section within the same package.
    pub section: String,
}

/// Description of one section: its fields, nested subsections, and the
/// inherited platform fields its UI hides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Stable section name.
    pub name: String,

    /// Field descriptors in declaration order.
    pub fields: Vec<FieldDescriptor>,

    /// Nested subsection slots.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<SubSectionDescriptor>,

    /// Host platform base-section fields hidden from this section's UI.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<String>,
}

impl SectionDescriptor {
    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a subsection slot by name.
    pub fn subsection(&self, name: &str) -> Option<&SubSectionDescriptor> {
        self.subsections.iter().find(|s| s.name == name)
    }

    /// Iterates field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// A complete schema group as handed to the host platform's plugin loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPackage {
    /// Package name the host registers the group under.
    pub name: String,

    /// Version of the defining crate.
    pub version: String,

    /// Section descriptors in definition order.
    pub sections: Vec<SectionDescriptor>,
}

impl SchemaPackage {
    /// Looks up a section descriptor by name.
    pub fn section(&self, name: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Serializes the package to JSON for host registration.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a package from JSON.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runs the structural self-checks on this package.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_package(self)
    }
}

/// Errors raised by descriptor serialization and self-checks.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// JSON serialization/deserialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two sections in one package share a name.
    #[error("duplicate section name: {0}")]
    DuplicateSection(String),

    /// Two fields in one section share a name.
    #[error("duplicate field '{field}' in section '{section}'")]
    DuplicateField {
        /// Section in which the duplicate occurs.
        section: String,
        /// Offending field name.
        field: String,
    },

    /// Display unit and storage unit measure different dimensions.
    #[error(
        "field '{field}' in section '{section}' displays {display} but stores {unit}"
    )]
    DisplayUnitMismatch {
        /// Section declaring the field.
        section: String,
        /// Offending field name.
        field: String,
        /// Declared storage unit.
        unit: Unit,
        /// Declared display unit.
        display: Unit,
    },

    /// A display unit is declared without a storage unit.
    #[error("field '{field}' in section '{section}' declares a display unit but no storage unit")]
    DisplayUnitWithoutStorage {
        /// Section declaring the field.
        section: String,
        /// Offending field name.
        field: String,
    },

    /// A non-numeric field carries a unit tag.
    #[error("non-numeric field '{field}' in section '{section}' carries a unit")]
    UnitOnNonNumeric {
        /// Section declaring the field.
        section: String,
        /// Offending field name.
        field: String,
    },

    /// A subsection references a section the package does not define.
    #[error("subsection '{subsection}' of section '{section}' targets unknown section '{target}'")]
    UnknownSubsectionTarget {
        /// Section declaring the subsection.
        section: String,
        /// Subsection slot name.
        subsection: String,
        /// Missing target section name.
        target: String,
    },
}

/// Validates one section descriptor: unique field names, units only on
/// numeric fields, display units compatible with storage units.
///
/// This checks the descriptor tables themselves; record values are never
/// validated by this crate.
pub fn validate_section(section: &SectionDescriptor) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for field in &section.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                section: section.name.clone(),
                field: field.name.clone(),
            });
        }

        if !matches!(field.kind, FieldKind::Float | FieldKind::Int)
            && (field.unit.is_some() || field.display_unit.is_some())
        {
            return Err(SchemaError::UnitOnNonNumeric {
                section: section.name.clone(),
                field: field.name.clone(),
            });
        }

        match (field.unit, field.display_unit) {
            (None, Some(_)) => {
                return Err(SchemaError::DisplayUnitWithoutStorage {
                    section: section.name.clone(),
                    field: field.name.clone(),
                });
            }
            (Some(unit), Some(display)) if !unit.compatible_with(display) => {
                return Err(SchemaError::DisplayUnitMismatch {
                    section: section.name.clone(),
                    field: field.name.clone(),
                    unit,
                    display,
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Validates a whole package: unique section names, every section valid,
/// every subsection target resolvable within the package.
pub fn validate_package(package: &SchemaPackage) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for section in &package.sections {
        if !seen.insert(section.name.as_str()) {
            return Err(SchemaError::DuplicateSection(section.name.clone()));
        }
    }

    for section in &package.sections {
        validate_section(section)?;

        for sub in &section.subsections {
            if package.section(&sub.section).is_none() {
                return Err(SchemaError::UnknownSubsectionTarget {
                    section: section.name.clone(),
                    subsection: sub.name.clone(),
                    target: sub.section.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Editable float with no unit.
fn number(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldKind::Float).with_component(EditComponent::NumberEdit)
}

/// Editable float storing and displaying the same unit.
fn quantity(name: &str, unit: Unit) -> FieldDescriptor {
    number(name).with_unit(unit).with_display_unit(unit)
}

/// Editable integer.
fn integer(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldKind::Int).with_component(EditComponent::NumberEdit)
}

/// Platform base-section fields every image entry hides in the UI.
const HIDDEN_PLATFORM_FIELDS: [&str; 7] = [
    "datetime",
    "lab_id",
    "location",
    "steps",
    "samples",
    "instruments",
    "results",
];

/// Builds the instrument-state section (`MetaData`): 35 optional quantities
/// captured verbatim from the instrument log.
pub fn meta_data_section() -> SectionDescriptor {
    SectionDescriptor {
        name: names::META_DATA.to_string(),
        fields: vec![
            quantity(names::SPOT_DIAMETER_ESTIMATED, Unit::Nanometer),
            number(names::STIGMATOR_X),
            number(names::STIGMATOR_Y),
            number(names::BEAM_SHIFT_X),
            number(names::BEAM_SHIFT_Y),
            number(names::SOURCE_TILT_X),
            number(names::SOURCE_TILT_Y),
            quantity(names::EMISSION_CURRENT, Unit::Ampere),
            quantity(names::SPECIMEN_CURRENT, Unit::Ampere),
            quantity(names::SCAN_ROTATION, Unit::Radian),
            FieldDescriptor::new(names::COMPOUND_LENS, FieldKind::Bool)
                .with_component(EditComponent::BoolEdit),
            quantity(names::COMPOUND_LENS_THRESHOLD_ENERGY, Unit::Electronvolt),
            quantity(names::STAGE_X, Unit::Meter),
            quantity(names::STAGE_Y, Unit::Meter),
            quantity(names::STAGE_Z, Unit::Meter),
            quantity(names::STAGE_ROTATION, Unit::Radian),
            quantity(names::STAGE_TILT_ALPHA, Unit::Radian),
            quantity(names::STAGE_TILT_BETA, Unit::Radian),
            quantity(names::STAGE_BIAS, Unit::Volt),
            quantity(names::CHAMBER_PRESSURE, Unit::Pascal),
            number(names::CONTRAST),
            number(names::BRIGHTNESS),
            FieldDescriptor::new(names::SIGNAL_TYPE, FieldKind::Text)
                .with_component(EditComponent::StringEdit),
            quantity(names::CONTRAST_DB, Unit::Decibel),
            quantity(names::BRIGHTNESS_DB, Unit::Decibel),
            integer(names::AVERAGE),
            integer(names::INTEGRATE),
            integer(names::RESOLUTION_X),
            integer(names::RESOLUTION_Y),
            quantity(names::HORIZONTAL_FIELDSIZE, Unit::Meter),
            quantity(names::VERTICAL_FIELDSIZE, Unit::Meter),
            quantity(names::FRAME_TIME, Unit::Second),
            number(names::DIGITAL_CONTRAST),
            number(names::DIGITAL_BRIGHTNESS),
            number(names::DIGITAL_GAMMA),
        ],
        subsections: Vec::new(),
        hidden: Vec::new(),
    }
}

/// The 15 acquisition-context fields shared by every image entry section.
fn image_entry_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            names::SAMPLE,
            FieldKind::ReferenceList(EntityKind::CompositeSystem),
        )
        .on_overview(),
        FieldDescriptor::new(names::MICROSCOPE, FieldKind::Reference(EntityKind::Instrument))
            .on_overview(),
        FieldDescriptor::new(names::DETECTOR, FieldKind::Reference(EntityKind::Instrument))
            .on_overview(),
        FieldDescriptor::new(names::TIME_OF_CREATION, FieldKind::Timestamp).on_overview(),
        FieldDescriptor::new(names::PATH_TO_IMAGE, FieldKind::Text).on_overview(),
        FieldDescriptor::new(names::PIXEL_WIDTH, FieldKind::Float)
            .with_unit(Unit::Meter)
            .with_display_unit(Unit::Nanometer)
            .on_overview(),
        FieldDescriptor::new(names::PIXEL_HEIGHT, FieldKind::Float)
            .with_unit(Unit::Meter)
            .with_display_unit(Unit::Nanometer)
            .on_overview(),
        FieldDescriptor::new(names::ACCELERATION_VOLTAGE, FieldKind::Float)
            .with_unit(Unit::Volt)
            .with_display_unit(Unit::Kilovolt)
            .on_overview(),
        FieldDescriptor::new(names::BEAM_CURRENT, FieldKind::Float)
            .with_unit(Unit::Ampere)
            .with_display_unit(Unit::Nanoampere)
            .on_overview(),
        FieldDescriptor::new(names::WORKING_DISTANCE, FieldKind::Float)
            .with_unit(Unit::Meter)
            .with_display_unit(Unit::Millimeter)
            .on_overview(),
        FieldDescriptor::new(names::DWELL_TIME, FieldKind::Float)
            .with_unit(Unit::Second)
            .with_display_unit(Unit::Microsecond)
            .on_overview(),
        FieldDescriptor::new(names::SEM_MODE, FieldKind::Text).on_overview(),
        FieldDescriptor::new(names::STAGE_TILT_ALPHA, FieldKind::Float)
            .with_unit(Unit::Radian)
            .with_display_unit(Unit::Degree)
            .on_overview(),
        FieldDescriptor::new(names::TILT_CORRECTION, FieldKind::Bool).on_overview(),
        FieldDescriptor::new(names::DETECTOR_MODE, FieldKind::Text).on_overview(),
    ]
}

fn image_entry_section(name: &str) -> SectionDescriptor {
    SectionDescriptor {
        name: name.to_string(),
        fields: image_entry_fields(),
        subsections: vec![SubSectionDescriptor {
            name: names::META_DATA_SLOT.to_string(),
            section: names::META_DATA.to_string(),
        }],
        hidden: HIDDEN_PLATFORM_FIELDS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Builds the base image entry section (`SEM_Image`).
pub fn sem_image_section() -> SectionDescriptor {
    image_entry_section(names::SEM_IMAGE)
}

/// Builds the Everhart-Thornley detector entry section (`SEM_Image_ETD`):
/// the base fields plus `Grid_Voltage`.
pub fn sem_image_etd_section() -> SectionDescriptor {
    let mut section = image_entry_section(names::SEM_IMAGE_ETD);
    section.fields.push(quantity(names::GRID_VOLTAGE, Unit::Volt));
    section
}

/// Builds the through-lens detector entry section (`SEM_Image_TLD`): the
/// base fields plus `Suction_Tube_Voltage`.
pub fn sem_image_tld_section() -> SectionDescriptor {
    let mut section = image_entry_section(names::SEM_IMAGE_TLD);
    section
        .fields
        .push(quantity(names::SUCTION_TUBE_VOLTAGE, Unit::Volt));
    section
}

/// Builds the general-purpose scaffold section (`NewSchema`).
pub fn new_schema_section() -> SectionDescriptor {
    SectionDescriptor {
        name: names::NEW_SCHEMA.to_string(),
        fields: vec![
            FieldDescriptor::new(names::NAME, FieldKind::Text)
                .with_component(EditComponent::StringEdit),
            FieldDescriptor::new(names::MESSAGE, FieldKind::Text),
        ],
        subsections: Vec::new(),
        hidden: Vec::new(),
    }
}

/// Builds the SEM schema group (`Data_Entries`): the instrument-state
/// section, the base image entry, and both detector-specialized entries.
pub fn data_entries_package() -> SchemaPackage {
    SchemaPackage {
        name: names::DATA_ENTRIES_PACKAGE.to_string(),
        version: SCHEMA_VERSION.to_string(),
        sections: vec![
            meta_data_section(),
            sem_image_section(),
            sem_image_etd_section(),
            sem_image_tld_section(),
        ],
    }
}

/// Builds the general-purpose schema group (`Schema_Package`).
pub fn general_package() -> SchemaPackage {
    SchemaPackage {
        name: names::GENERAL_PACKAGE.to_string(),
        version: SCHEMA_VERSION.to_string(),
        sections: vec![new_schema_section()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Dimension;

    #[test]
    fn test_meta_data_section() {
        let section = meta_data_section();
        assert_eq!(section.fields.len(), 35);

        let stage_x = section.field(names::STAGE_X).unwrap();
        assert_eq!(stage_x.kind, FieldKind::Float);
        assert_eq!(stage_x.unit, Some(Unit::Meter));
        assert_eq!(stage_x.display_unit, Some(Unit::Meter));
        assert_eq!(stage_x.unit.unwrap().dimension(), Dimension::Length);
        assert_eq!(stage_x.component, Some(EditComponent::NumberEdit));
        assert!(!stage_x.overview);

        let compound = section.field(names::COMPOUND_LENS).unwrap();
        assert_eq!(compound.kind, FieldKind::Bool);
        assert_eq!(compound.component, Some(EditComponent::BoolEdit));
        assert!(compound.unit.is_none());
    }

    #[test]
    fn test_sem_image_section() {
        let section = sem_image_section();
        assert_eq!(section.fields.len(), 15);
        assert_eq!(section.hidden.len(), 7);

        let sub = section.subsection(names::META_DATA_SLOT).unwrap();
        assert_eq!(sub.section, names::META_DATA);

        // Storage and display units stay distinct.
        let pixel_width = section.field(names::PIXEL_WIDTH).unwrap();
        assert_eq!(pixel_width.unit, Some(Unit::Meter));
        assert_eq!(pixel_width.display_unit, Some(Unit::Nanometer));

        let accel = section.field(names::ACCELERATION_VOLTAGE).unwrap();
        assert_eq!(accel.unit, Some(Unit::Volt));
        assert_eq!(accel.display_unit, Some(Unit::Kilovolt));
        assert!(accel.overview);

        let sample = section.field(names::SAMPLE).unwrap();
        assert_eq!(
            sample.kind,
            FieldKind::ReferenceList(EntityKind::CompositeSystem)
        );
    }

    #[test]
    fn test_variants_add_exactly_one_field() {
        let base = sem_image_section();
        let etd = sem_image_etd_section();
        let tld = sem_image_tld_section();

        for variant in [&etd, &tld] {
            assert_eq!(variant.fields.len(), base.fields.len() + 1);
            for name in base.field_names() {
                assert!(variant.field(name).is_some(), "missing base field {name}");
            }
        }

        let etd_extra: Vec<_> = etd
            .field_names()
            .filter(|n| base.field(n).is_none())
            .collect();
        assert_eq!(etd_extra, vec![names::GRID_VOLTAGE]);

        let tld_extra: Vec<_> = tld
            .field_names()
            .filter(|n| base.field(n).is_none())
            .collect();
        assert_eq!(tld_extra, vec![names::SUCTION_TUBE_VOLTAGE]);

        assert!(base.field(names::GRID_VOLTAGE).is_none());
        assert!(base.field(names::SUCTION_TUBE_VOLTAGE).is_none());
    }

    #[test]
    fn test_factories_are_deterministic() {
        assert_eq!(meta_data_section(), meta_data_section());
        assert_eq!(data_entries_package(), data_entries_package());
        assert_eq!(general_package(), general_package());
    }

    #[test]
    fn test_shipped_packages_validate() {
        data_entries_package().validate().unwrap();
        general_package().validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_dimension_mismatch() {
        let mut section = meta_data_section();
        section.fields[0].display_unit = Some(Unit::Volt);

        let err = validate_section(&section).unwrap_err();
        assert!(matches!(err, SchemaError::DisplayUnitMismatch { .. }));
    }

    #[test]
    fn test_validation_rejects_duplicate_field() {
        let mut section = meta_data_section();
        let dup = section.fields[0].clone();
        section.fields.push(dup);

        let err = validate_section(&section).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn test_validation_rejects_unit_on_text() {
        let mut section = new_schema_section();
        section.fields[0].unit = Some(Unit::Volt);

        let err = validate_section(&section).unwrap_err();
        assert!(matches!(err, SchemaError::UnitOnNonNumeric { .. }));
    }

    #[test]
    fn test_validation_rejects_dangling_subsection() {
        let mut package = data_entries_package();
        package.sections.retain(|s| s.name != names::META_DATA);

        let err = package.validate().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownSubsectionTarget { .. }));
    }

    #[test]
    fn test_package_json_roundtrip() {
        let package = data_entries_package();
        let json = package.to_json().unwrap();
        let restored = SchemaPackage::from_json(&json).unwrap();
        assert_eq!(restored, package);

        // Unit spellings on the wire match the declarations.
        assert!(json.contains("\"microsecond\""));
        assert!(json.contains("\"kV\""));
        assert!(json.contains("\"Spot_Diameter_estimated\""));
    }
}
