use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::names;

use super::detector::DetectorExtension;
use super::instrument_state::InstrumentState;
use super::refs::EntityRef;
use super::value::FieldValue;
use super::{EntryError, Normalize};

/// One captured SEM image and its acquisition context
///
/// The base entry carries the acquisition-context fields (sample and
/// instrument references, capture timestamp, geometry, beam parameters) and
/// always owns exactly one nested [`InstrumentState`] group, even when every
/// field in it is unset. An optional [`DetectorExtension`] block turns the
/// entry into one of the detector-specialized variants (`SEM_Image_ETD`,
/// `SEM_Image_TLD`), each adding exactly one quantity on top of the base
/// fields.
///
/// Field values are populated by an external ingestion process from an
/// instrument-exported metadata file; references are identity links the host
/// platform resolves, never validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemImage {
    /// References to the imaged sample(s), in insertion order. Unbounded,
    /// possibly empty, never deduplicated.
    #[serde(rename = "Sample", default, skip_serializing_if = "Vec::is_empty")]
    pub sample: Vec<EntityRef>,

    /// Reference to the microscope instrument.
    #[serde(rename = "Microscope", skip_serializing_if = "Option::is_none")]
    pub microscope: Option<EntityRef>,

    /// Reference to the detector instrument.
    #[serde(rename = "Detector", skip_serializing_if = "Option::is_none")]
    pub detector_ref: Option<EntityRef>,

    /// Capture timestamp.
    #[serde(rename = "Time_of_Creation", skip_serializing_if = "Option::is_none")]
    pub time_of_creation: Option<DateTime<Utc>>,

    /// Path to the image file as exported by the instrument.
    #[serde(rename = "Path_to_Image", skip_serializing_if = "Option::is_none")]
    pub path_to_image: Option<String>,

    /// Pixel width, in meters.
    #[serde(rename = "Pixel_Width", skip_serializing_if = "Option::is_none")]
    pub pixel_width: Option<f64>,

    /// Pixel height, in meters.
    #[serde(rename = "Pixel_Height", skip_serializing_if = "Option::is_none")]
    pub pixel_height: Option<f64>,

    /// Acceleration voltage, in volts.
    #[serde(rename = "Acceleration_Voltage", skip_serializing_if = "Option::is_none")]
    pub acceleration_voltage: Option<f64>,

    /// Beam current, in amperes.
    #[serde(rename = "Beam_Current", skip_serializing_if = "Option::is_none")]
    pub beam_current: Option<f64>,

    /// Working distance, in meters.
    #[serde(rename = "Working_Distance", skip_serializing_if = "Option::is_none")]
    pub working_distance: Option<f64>,

    /// Dwell time per pixel, in seconds.
    #[serde(rename = "Dwell_Time", skip_serializing_if = "Option::is_none")]
    pub dwell_time: Option<f64>,

    /// SEM imaging mode as reported by the instrument.
    #[serde(rename = "SEM_Mode", skip_serializing_if = "Option::is_none")]
    pub sem_mode: Option<String>,

    /// Stage tilt alpha at capture time, in radians.
    #[serde(rename = "Stage_Tilt_alpha", skip_serializing_if = "Option::is_none")]
    pub stage_tilt_alpha: Option<f64>,

    /// Whether tilt correction was applied.
    #[serde(rename = "Tilt_Correction", skip_serializing_if = "Option::is_none")]
    pub tilt_correction: Option<bool>,

    /// Detector mode as reported by the instrument.
    #[serde(rename = "Detector_Mode", skip_serializing_if = "Option::is_none")]
    pub detector_mode: Option<String>,

    /// The nested instrument-state group. Always present; a fully unset
    /// group is still owned by its entry.
    #[serde(rename = "Meta_Data", default)]
    pub meta_data: InstrumentState,

    /// Optional detector-specific block. Absent for a plain base entry.
    #[serde(rename = "Detector_Data", skip_serializing_if = "Option::is_none")]
    pub detector: Option<DetectorExtension>,
}

impl SemImage {
    /// Creates an image entry with every field unset and an empty
    /// instrument-state group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building an image entry fluently.
    pub fn builder() -> SemImageBuilder {
        SemImageBuilder::new()
    }

    /// Returns the section name this entry registers under: the base name,
    /// or the variant name when a detector block is attached.
    pub fn section_name(&self) -> &'static str {
        match &self.detector {
            Some(ext) => ext.section_name(),
            None => names::SEM_IMAGE,
        }
    }

    /// Returns the detector block's voltage, if this entry is specialized
    /// and the voltage was recorded.
    pub fn detector_voltage(&self) -> Option<f64> {
        self.detector.as_ref().and_then(DetectorExtension::voltage)
    }

    /// Returns true when this entry answers queries for `name`.
    ///
    /// Base field names and dotted `Meta_Data.<field>` paths are always
    /// answerable; a variant's field name is answerable only on entries
    /// carrying that variant's block.
    pub fn has_field(&self, name: &str) -> bool {
        if let Some(inner) = name.strip_prefix("Meta_Data.") {
            return self.meta_data.has_field(inner);
        }
        if let Some(ext) = &self.detector {
            if name == ext.field_name() {
                return true;
            }
        }
        crate::schema::sem_image_section().field(name).is_some()
    }

    /// Looks up a field value by its declared name.
    ///
    /// Accepts base field names, dotted `Meta_Data.<field>` paths into the
    /// nested group, and — on specialized entries — the variant's own field
    /// name. Returns `None` for unset fields; absence is never replaced by
    /// a default value.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some(inner) = name.strip_prefix("Meta_Data.") {
            return self.meta_data.field(inner);
        }

        match name {
            names::SAMPLE => {
                if self.sample.is_empty() {
                    None
                } else {
                    Some(FieldValue::References(self.sample.clone()))
                }
            }
            names::MICROSCOPE => self.microscope.clone().map(FieldValue::Reference),
            names::DETECTOR => self.detector_ref.clone().map(FieldValue::Reference),
            names::TIME_OF_CREATION => self.time_of_creation.map(FieldValue::Timestamp),
            names::PATH_TO_IMAGE => self.path_to_image.clone().map(FieldValue::Text),
            names::PIXEL_WIDTH => self.pixel_width.map(FieldValue::Float),
            names::PIXEL_HEIGHT => self.pixel_height.map(FieldValue::Float),
            names::ACCELERATION_VOLTAGE => self.acceleration_voltage.map(FieldValue::Float),
            names::BEAM_CURRENT => self.beam_current.map(FieldValue::Float),
            names::WORKING_DISTANCE => self.working_distance.map(FieldValue::Float),
            names::DWELL_TIME => self.dwell_time.map(FieldValue::Float),
            names::SEM_MODE => self.sem_mode.clone().map(FieldValue::Text),
            names::STAGE_TILT_ALPHA => self.stage_tilt_alpha.map(FieldValue::Float),
            names::TILT_CORRECTION => self.tilt_correction.map(FieldValue::Bool),
            names::DETECTOR_MODE => self.detector_mode.clone().map(FieldValue::Text),
            other => self.detector.as_ref().and_then(|ext| ext.field(other)),
        }
    }

    /// Serializes this entry to JSON.
    pub fn to_json(&self) -> Result<String, EntryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an entry from JSON.
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Normalize for SemImage {
    /// Runs the nested instrument-state pass and nothing else.
    ///
    /// The hook is identical for the base entry and both detector variants:
    /// the variants delegate to the base behavior and add nothing of their
    /// own. It must succeed for any combination of unset fields.
    fn normalize(&mut self) {
        self.meta_data.normalize();
        log::debug!("normalized {} entry", self.section_name());
    }
}

/// Builder for constructing [`SemImage`] entries fluently.
///
/// Every setter is optional; a builder with no setters applied produces the
/// same entry as [`SemImage::new`].
#[derive(Debug, Default)]
pub struct SemImageBuilder {
    entry: SemImage,
}

impl SemImageBuilder {
    /// Creates a builder over an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sample reference, preserving insertion order.
    pub fn sample(mut self, sample: impl Into<EntityRef>) -> Self {
        self.entry.sample.push(sample.into());
        self
    }

    /// Sets the microscope reference.
    pub fn microscope(mut self, microscope: impl Into<EntityRef>) -> Self {
        self.entry.microscope = Some(microscope.into());
        self
    }

    /// Sets the detector reference.
    pub fn detector_ref(mut self, detector: impl Into<EntityRef>) -> Self {
        self.entry.detector_ref = Some(detector.into());
        self
    }

    /// Sets the capture timestamp.
    pub fn time_of_creation(mut self, time: DateTime<Utc>) -> Self {
        self.entry.time_of_creation = Some(time);
        self
    }

    /// Sets the image file path.
    pub fn path_to_image(mut self, path: impl Into<String>) -> Self {
        self.entry.path_to_image = Some(path.into());
        self
    }

    /// Sets the pixel width in meters.
    pub fn pixel_width(mut self, meters: f64) -> Self {
        self.entry.pixel_width = Some(meters);
        self
    }

    /// Sets the pixel height in meters.
    pub fn pixel_height(mut self, meters: f64) -> Self {
        self.entry.pixel_height = Some(meters);
        self
    }

    /// Sets the acceleration voltage in volts.
    pub fn acceleration_voltage(mut self, volts: f64) -> Self {
        self.entry.acceleration_voltage = Some(volts);
        self
    }

    /// Sets the beam current in amperes.
    pub fn beam_current(mut self, amperes: f64) -> Self {
        self.entry.beam_current = Some(amperes);
        self
    }

    /// Sets the working distance in meters.
    pub fn working_distance(mut self, meters: f64) -> Self {
        self.entry.working_distance = Some(meters);
        self
    }

    /// Sets the dwell time in seconds.
    pub fn dwell_time(mut self, seconds: f64) -> Self {
        self.entry.dwell_time = Some(seconds);
        self
    }

    /// Sets the SEM imaging mode.
    pub fn sem_mode(mut self, mode: impl Into<String>) -> Self {
        self.entry.sem_mode = Some(mode.into());
        self
    }

    /// Sets the stage tilt alpha in radians.
    pub fn stage_tilt_alpha(mut self, radians: f64) -> Self {
        self.entry.stage_tilt_alpha = Some(radians);
        self
    }

    /// Sets whether tilt correction was applied.
    pub fn tilt_correction(mut self, applied: bool) -> Self {
        self.entry.tilt_correction = Some(applied);
        self
    }

    /// Sets the detector mode.
    pub fn detector_mode(mut self, mode: impl Into<String>) -> Self {
        self.entry.detector_mode = Some(mode.into());
        self
    }

    /// Replaces the nested instrument-state group.
    pub fn meta_data(mut self, meta_data: InstrumentState) -> Self {
        self.entry.meta_data = meta_data;
        self
    }

    /// Specializes the entry for an Everhart-Thornley detector.
    pub fn etd(mut self, grid_voltage: Option<f64>) -> Self {
        self.entry.detector = Some(DetectorExtension::etd(grid_voltage));
        self
    }

    /// Specializes the entry for a through-lens detector.
    pub fn tld(mut self, suction_tube_voltage: Option<f64>) -> Self {
        self.entry.detector = Some(DetectorExtension::tld(suction_tube_voltage));
        self
    }

    /// Finishes building the entry.
    pub fn build(self) -> SemImage {
        self.entry
    }
}
