use super::*;
use crate::schema::names;

#[test]
fn test_empty_entry_normalizes() {
    let mut entry = SemImage::new();
    entry.normalize();

    assert_eq!(entry.section_name(), names::SEM_IMAGE);
    assert!(entry.field(names::WORKING_DISTANCE).is_none());
    assert!(entry.field("Meta_Data.Emission_Current").is_none());

    // The hook is idempotent.
    entry.normalize();
    assert_eq!(entry, {
        let mut fresh = SemImage::new();
        fresh.normalize();
        fresh
    });
}

#[test]
fn test_empty_variants_normalize() {
    let mut etd = SemImage::builder().etd(None).build();
    etd.normalize();
    assert_eq!(etd.section_name(), names::SEM_IMAGE_ETD);

    let mut tld = SemImage::builder().tld(None).build();
    tld.normalize();
    assert_eq!(tld.section_name(), names::SEM_IMAGE_TLD);

    let mut state = InstrumentState::new();
    state.normalize();
    assert_eq!(state, InstrumentState::default());
}

#[test]
fn test_ingested_entry_lookup() {
    let mut meta_data = InstrumentState::new();
    meta_data.emission_current = Some(1e-6);

    let mut entry = SemImage::builder()
        .acceleration_voltage(5000.0)
        .pixel_width(2e-9)
        .meta_data(meta_data)
        .build();
    entry.normalize();

    assert_eq!(
        entry.field(names::ACCELERATION_VOLTAGE),
        Some(FieldValue::Float(5000.0))
    );
    assert_eq!(entry.field(names::PIXEL_WIDTH), Some(FieldValue::Float(2e-9)));
    assert_eq!(
        entry.field("Meta_Data.Emission_Current"),
        Some(FieldValue::Float(1e-6))
    );

    // Unset fields read back as absent, never a default number.
    assert!(entry.field(names::WORKING_DISTANCE).is_none());
    assert!(entry.has_field(names::WORKING_DISTANCE));
    assert!(entry.field("Meta_Data.Stage_X").is_none());
    assert!(entry.has_field("Meta_Data.Stage_X"));
}

#[test]
fn test_etd_variant_answers_base_and_own_fields() {
    let mut entry = SemImage::builder().etd(Some(300.0)).build();
    entry.normalize();

    let base = crate::schema::sem_image_section();
    for name in base.field_names() {
        assert!(entry.has_field(name), "variant must answer for {name}");
        assert!(entry.field(name).is_none(), "{name} should be absent");
    }

    assert!(entry.has_field(names::GRID_VOLTAGE));
    assert_eq!(
        entry.field(names::GRID_VOLTAGE),
        Some(FieldValue::Float(300.0))
    );
    assert_eq!(entry.detector_voltage(), Some(300.0));

    // The other family's field is unknown here, not absent.
    assert!(!entry.has_field(names::SUCTION_TUBE_VOLTAGE));
    assert!(entry.field(names::SUCTION_TUBE_VOLTAGE).is_none());
}

#[test]
fn test_base_entry_ignores_variant_fields() {
    let entry = SemImage::new();
    assert!(!entry.has_field(names::GRID_VOLTAGE));
    assert!(!entry.has_field(names::SUCTION_TUBE_VOLTAGE));
    assert!(entry.field(names::GRID_VOLTAGE).is_none());
}

#[test]
fn test_sample_references_keep_insertion_order() {
    let entry = SemImage::builder()
        .sample("sample-a")
        .sample("sample-c")
        .sample("sample-b")
        .sample("sample-a") // repeats are kept
        .build();

    let refs: Vec<_> = entry.sample.iter().map(EntityRef::as_str).collect();
    assert_eq!(refs, vec!["sample-a", "sample-c", "sample-b", "sample-a"]);

    match entry.field(names::SAMPLE) {
        Some(FieldValue::References(list)) => assert_eq!(list.len(), 4),
        other => panic!("expected reference list, got {other:?}"),
    }
}

#[test]
fn test_every_entry_owns_an_instrument_state() {
    // Even a JSON document without a Meta_Data key deserializes into an
    // entry owning an (empty) instrument-state group.
    let entry = SemImage::from_json("{}").unwrap();
    assert_eq!(entry.meta_data, InstrumentState::default());
}

#[test]
fn test_entry_json_wire_names() {
    let mut meta_data = InstrumentState::new();
    meta_data.stage_tilt_alpha = Some(0.12);

    let entry = SemImage::builder()
        .acceleration_voltage(5000.0)
        .detector_mode("SE")
        .meta_data(meta_data)
        .etd(Some(300.0))
        .build();

    let json = entry.to_json().unwrap();
    assert!(json.contains("\"Acceleration_Voltage\":5000.0"));
    assert!(json.contains("\"Detector_Mode\":\"SE\""));
    assert!(json.contains("\"Stage_Tilt_alpha\":0.12"));
    assert!(json.contains("\"Detector_Data\""));
    assert!(json.contains("\"Grid_Voltage\":300.0"));
    // Unset fields are omitted, not serialized as null.
    assert!(!json.contains("Working_Distance"));

    let restored = SemImage::from_json(&json).unwrap();
    assert_eq!(restored, entry);
}

#[test]
fn test_instrument_state_json_roundtrip() {
    let mut state = InstrumentState::new();
    state.spot_diameter_estimated = Some(3.2);
    state.compound_lens = Some(true);
    state.signal_type = Some("SE".to_string());
    state.resolution_x = Some(2048);

    let json = state.to_json().unwrap();
    assert!(json.contains("\"Spot_Diameter_estimated\":3.2"));
    assert!(json.contains("\"Compound_Lens\":true"));
    assert!(json.contains("\"Resolution_X\":2048"));

    let restored = InstrumentState::from_json(&json).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_detector_extension_accessors() {
    let etd = DetectorExtension::etd(Some(250.0));
    assert_eq!(etd.kind(), DetectorKind::Etd);
    assert_eq!(etd.section_name(), names::SEM_IMAGE_ETD);
    assert_eq!(etd.field_name(), names::GRID_VOLTAGE);
    assert_eq!(etd.voltage(), Some(250.0));

    let tld = DetectorExtension::tld(None);
    assert_eq!(tld.kind(), DetectorKind::Tld);
    assert_eq!(tld.section_name(), names::SEM_IMAGE_TLD);
    assert_eq!(tld.field_name(), names::SUCTION_TUBE_VOLTAGE);
    assert_eq!(tld.voltage(), None);
    assert!(tld.field(names::SUCTION_TUBE_VOLTAGE).is_none());
}

#[test]
fn test_field_value_accessors() {
    assert_eq!(FieldValue::Float(1.5).as_f64(), Some(1.5));
    assert_eq!(FieldValue::Float(1.5).as_i64(), None);
    assert_eq!(FieldValue::Int(7).as_i64(), Some(7));
    assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
    assert_eq!(FieldValue::from("SE").as_text(), Some("SE"));

    let reference = EntityRef::new("sample-1");
    assert_eq!(
        FieldValue::Reference(reference.clone()).as_reference(),
        Some(&reference)
    );
}

#[test]
fn test_new_schema_normalize_fills_message() {
    let mut record = NewSchema::with_name("Markus");
    assert!(record.message.is_none());

    record.normalize();
    assert_eq!(record.message.as_deref(), Some("Hello Markus!"));

    let mut default = NewSchema::new();
    default.normalize();
    assert_eq!(default.message.as_deref(), Some("Hello hello world!"));
}

#[test]
fn test_entity_ref_is_transparent_on_the_wire() {
    let entry = SemImage::builder().microscope("inst-42").build();
    let json = entry.to_json().unwrap();
    assert!(json.contains("\"Microscope\":\"inst-42\""));
}
