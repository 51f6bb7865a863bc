use serde::{Deserialize, Serialize};

use crate::schema::names;

use super::value::FieldValue;
use super::{EntryError, Normalize};

/// Instrument-state field group (`MetaData`)
///
/// The microscope and detector operating parameters active during one image
/// capture: beam steering, currents, lens state, stage pose, chamber
/// pressure, and the signal/display chain. Values are captured verbatim from
/// the instrument log by an external ingestion process; no cross-field
/// consistency is enforced and every field is optional — absence means "not
/// recorded", never zero.
///
/// Units are fixed per field (see the `MetaData` section descriptor) and the
/// record never converts them; the host platform owns display conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentState {
    /// Estimated beam spot diameter, in nanometers.
    #[serde(rename = "Spot_Diameter_estimated", skip_serializing_if = "Option::is_none")]
    pub spot_diameter_estimated: Option<f64>,

    /// Stigmator X setting (unitless).
    #[serde(rename = "Stigmator_X", skip_serializing_if = "Option::is_none")]
    pub stigmator_x: Option<f64>,

    /// Stigmator Y setting (unitless).
    #[serde(rename = "Stigmator_Y", skip_serializing_if = "Option::is_none")]
    pub stigmator_y: Option<f64>,

    /// Beam shift X setting (unitless).
    #[serde(rename = "Beam_Shift_X", skip_serializing_if = "Option::is_none")]
    pub beam_shift_x: Option<f64>,

    /// Beam shift Y setting (unitless).
    #[serde(rename = "Beam_Shift_Y", skip_serializing_if = "Option::is_none")]
    pub beam_shift_y: Option<f64>,

    /// Source tilt X setting (unitless).
    #[serde(rename = "Source_Tilt_X", skip_serializing_if = "Option::is_none")]
    pub source_tilt_x: Option<f64>,

    /// Source tilt Y setting (unitless).
    #[serde(rename = "Source_Tilt_Y", skip_serializing_if = "Option::is_none")]
    pub source_tilt_y: Option<f64>,

    /// Emission current, in amperes.
    #[serde(rename = "Emission_Current", skip_serializing_if = "Option::is_none")]
    pub emission_current: Option<f64>,

    /// Specimen current, in amperes.
    #[serde(rename = "Specimen_Current", skip_serializing_if = "Option::is_none")]
    pub specimen_current: Option<f64>,

    /// Scan rotation, in radians.
    #[serde(rename = "Scan_Rotation", skip_serializing_if = "Option::is_none")]
    pub scan_rotation: Option<f64>,

    /// Whether the compound lens was enabled.
    #[serde(rename = "Compound_Lens", skip_serializing_if = "Option::is_none")]
    pub compound_lens: Option<bool>,

    /// Compound lens threshold energy, in electronvolts.
    #[serde(
        rename = "Compound_Lens_Threshold_Energy",
        skip_serializing_if = "Option::is_none"
    )]
    pub compound_lens_threshold_energy: Option<f64>,

    /// Stage X position, in meters.
    #[serde(rename = "Stage_X", skip_serializing_if = "Option::is_none")]
    pub stage_x: Option<f64>,

    /// Stage Y position, in meters.
    #[serde(rename = "Stage_Y", skip_serializing_if = "Option::is_none")]
    pub stage_y: Option<f64>,

    /// Stage Z position, in meters.
    #[serde(rename = "Stage_Z", skip_serializing_if = "Option::is_none")]
    pub stage_z: Option<f64>,

    /// Stage rotation, in radians.
    #[serde(rename = "Stage_Rotation", skip_serializing_if = "Option::is_none")]
    pub stage_rotation: Option<f64>,

    /// Stage tilt alpha, in radians.
    #[serde(rename = "Stage_Tilt_alpha", skip_serializing_if = "Option::is_none")]
    pub stage_tilt_alpha: Option<f64>,

    /// Stage tilt beta, in radians.
    #[serde(rename = "Stage_Tilt_beta", skip_serializing_if = "Option::is_none")]
    pub stage_tilt_beta: Option<f64>,

    /// Stage bias voltage, in volts.
    #[serde(rename = "Stage_Bias", skip_serializing_if = "Option::is_none")]
    pub stage_bias: Option<f64>,

    /// Chamber pressure, in pascals.
    #[serde(rename = "Chamber_Pressure", skip_serializing_if = "Option::is_none")]
    pub chamber_pressure: Option<f64>,

    /// Linear contrast setting (unitless).
    #[serde(rename = "Contrast", skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,

    /// Linear brightness setting (unitless).
    #[serde(rename = "Brightness", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,

    /// Detector signal type as reported by the instrument.
    #[serde(rename = "Signal_Type", skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<String>,

    /// Contrast in decibels.
    #[serde(rename = "Contrast_DB", skip_serializing_if = "Option::is_none")]
    pub contrast_db: Option<f64>,

    /// Brightness in decibels.
    #[serde(rename = "Brightness_DB", skip_serializing_if = "Option::is_none")]
    pub brightness_db: Option<f64>,

    /// Frame averaging count.
    #[serde(rename = "Average", skip_serializing_if = "Option::is_none")]
    pub average: Option<i64>,

    /// Frame integration count.
    #[serde(rename = "Integrate", skip_serializing_if = "Option::is_none")]
    pub integrate: Option<i64>,

    /// Scan resolution in X, in pixels.
    #[serde(rename = "Resolution_X", skip_serializing_if = "Option::is_none")]
    pub resolution_x: Option<i64>,

    /// Scan resolution in Y, in pixels.
    #[serde(rename = "Resolution_Y", skip_serializing_if = "Option::is_none")]
    pub resolution_y: Option<i64>,

    /// Horizontal field size, in meters.
    #[serde(rename = "Horizontal_Fieldsize", skip_serializing_if = "Option::is_none")]
    pub horizontal_fieldsize: Option<f64>,

    /// Vertical field size, in meters.
    #[serde(rename = "Vertical_Fieldsize", skip_serializing_if = "Option::is_none")]
    pub vertical_fieldsize: Option<f64>,

    /// Frame acquisition time, in seconds.
    #[serde(rename = "Frame_Time", skip_serializing_if = "Option::is_none")]
    pub frame_time: Option<f64>,

    /// Digital contrast setting (unitless).
    #[serde(rename = "Digital_Contrast", skip_serializing_if = "Option::is_none")]
    pub digital_contrast: Option<f64>,

    /// Digital brightness setting (unitless).
    #[serde(rename = "Digital_Brightness", skip_serializing_if = "Option::is_none")]
    pub digital_brightness: Option<f64>,

    /// Digital gamma setting (unitless).
    #[serde(rename = "Digital_Gamma", skip_serializing_if = "Option::is_none")]
    pub digital_gamma: Option<f64>,
}

impl InstrumentState {
    /// Creates an instrument-state group with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `name` is one of this group's declared field names.
    pub fn has_field(&self, name: &str) -> bool {
        crate::schema::meta_data_section().field(name).is_some()
    }

    /// Looks up a field value by its declared name.
    ///
    /// Returns `None` both for unknown names and for declared fields that
    /// are unset; use [`has_field`](Self::has_field) to tell the two apart.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            names::SPOT_DIAMETER_ESTIMATED => self.spot_diameter_estimated.map(FieldValue::Float),
            names::STIGMATOR_X => self.stigmator_x.map(FieldValue::Float),
            names::STIGMATOR_Y => self.stigmator_y.map(FieldValue::Float),
            names::BEAM_SHIFT_X => self.beam_shift_x.map(FieldValue::Float),
            names::BEAM_SHIFT_Y => self.beam_shift_y.map(FieldValue::Float),
            names::SOURCE_TILT_X => self.source_tilt_x.map(FieldValue::Float),
            names::SOURCE_TILT_Y => self.source_tilt_y.map(FieldValue::Float),
            names::EMISSION_CURRENT => self.emission_current.map(FieldValue::Float),
            names::SPECIMEN_CURRENT => self.specimen_current.map(FieldValue::Float),
            names::SCAN_ROTATION => self.scan_rotation.map(FieldValue::Float),
            names::COMPOUND_LENS => self.compound_lens.map(FieldValue::Bool),
            names::COMPOUND_LENS_THRESHOLD_ENERGY => {
                self.compound_lens_threshold_energy.map(FieldValue::Float)
            }
            names::STAGE_X => self.stage_x.map(FieldValue::Float),
            names::STAGE_Y => self.stage_y.map(FieldValue::Float),
            names::STAGE_Z => self.stage_z.map(FieldValue::Float),
            names::STAGE_ROTATION => self.stage_rotation.map(FieldValue::Float),
            names::STAGE_TILT_ALPHA => self.stage_tilt_alpha.map(FieldValue::Float),
            names::STAGE_TILT_BETA => self.stage_tilt_beta.map(FieldValue::Float),
            names::STAGE_BIAS => self.stage_bias.map(FieldValue::Float),
            names::CHAMBER_PRESSURE => self.chamber_pressure.map(FieldValue::Float),
            names::CONTRAST => self.contrast.map(FieldValue::Float),
            names::BRIGHTNESS => self.brightness.map(FieldValue::Float),
            names::SIGNAL_TYPE => self.signal_type.clone().map(FieldValue::Text),
            names::CONTRAST_DB => self.contrast_db.map(FieldValue::Float),
            names::BRIGHTNESS_DB => self.brightness_db.map(FieldValue::Float),
            names::AVERAGE => self.average.map(FieldValue::Int),
            names::INTEGRATE => self.integrate.map(FieldValue::Int),
            names::RESOLUTION_X => self.resolution_x.map(FieldValue::Int),
            names::RESOLUTION_Y => self.resolution_y.map(FieldValue::Int),
            names::HORIZONTAL_FIELDSIZE => self.horizontal_fieldsize.map(FieldValue::Float),
            names::VERTICAL_FIELDSIZE => self.vertical_fieldsize.map(FieldValue::Float),
            names::FRAME_TIME => self.frame_time.map(FieldValue::Float),
            names::DIGITAL_CONTRAST => self.digital_contrast.map(FieldValue::Float),
            names::DIGITAL_BRIGHTNESS => self.digital_brightness.map(FieldValue::Float),
            names::DIGITAL_GAMMA => self.digital_gamma.map(FieldValue::Float),
            _ => None,
        }
    }

    /// Serializes this group to JSON.
    pub fn to_json(&self) -> Result<String, EntryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a group from JSON.
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Normalize for InstrumentState {
    /// The instrument-state group records values verbatim; nothing is
    /// derived or transformed.
    fn normalize(&mut self) {
        log::debug!("normalized instrument-state group");
    }
}
