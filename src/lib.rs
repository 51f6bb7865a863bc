//! # semmeta - SEM Image Metadata Schemas
//!
//! `semmeta` defines the typed, unit-annotated metadata schemas for scanning
//! electron microscope (SEM) image entries, packaged as a plugin for a
//! scientific data-management platform. The crate is declarative: it
//! describes field groups, their fixed units, and their presentation hints,
//! and leaves ingestion, storage, search, and UI rendering to the host.
//!
//! ## Key Features
//!
//! - **Descriptor side table**: field names, scalar kinds, canonical storage
//!   units, preferred display units, and editor widget hints live in
//!   declarative [`schema`] descriptors, decoupled from the record types.
//!
//! - **Exact wire names**: every field serializes under the name external
//!   ingestion populates and the host platform indexes
//!   (`Acceleration_Voltage`, `Stage_Tilt_alpha`, `Meta_Data`, ...), with
//!   unset fields omitted rather than defaulted.
//!
//! - **Composition over subclassing**: detector-specialized entries
//!   (`SEM_Image_ETD`, `SEM_Image_TLD`) are the base entry plus one optional
//!   detector block adding exactly one quantity.
//!
//! - **Infallible lifecycle hook**: every record's [`entries::Normalize`]
//!   pass tolerates any combination of unset fields and never fails.
//!
//! - **Side-effect-free registration**: the host's plugin loader obtains
//!   schema groups from explicit [`plugin`] entry-point factories; nothing
//!   is registered globally.
//!
//! ## Quick Start
//!
//! ```rust
//! use semmeta::entries::{InstrumentState, Normalize, SemImage};
//! use semmeta::plugin::data_entries_entry_point;
//!
//! // The host platform loads the schema group once at startup.
//! let package = data_entries_entry_point().load();
//! assert!(package.section("SEM_Image").is_some());
//!
//! // Ingestion populates an entry from an instrument-exported file.
//! let mut meta_data = InstrumentState::new();
//! meta_data.emission_current = Some(1e-6);
//!
//! let mut entry = SemImage::builder()
//!     .sample("sample-001")
//!     .acceleration_voltage(5000.0)
//!     .pixel_width(2e-9)
//!     .meta_data(meta_data)
//!     .build();
//!
//! // One normalize pass, then the entry is handed to the host for storage.
//! entry.normalize();
//! assert!(entry.field("Working_Distance").is_none()); // absent, not zero
//! ```
//!
//! ## Architecture
//!
//! - [`units`]: the closed unit vocabulary fields are tagged with
//! - [`schema`]: section/field descriptors, name constants, package factories
//! - [`entries`]: the record types and the normalize lifecycle hook
//! - [`plugin`]: the two entry points the host platform's loader consumes
//!
//! ## Schema Groups
//!
//! | Package | Sections |
//! |---------|----------|
//! | `Data_Entries` | `MetaData`, `SEM_Image`, `SEM_Image_ETD`, `SEM_Image_TLD` |
//! | `Schema_Package` | `NewSchema` |
//!
//! Quantities store in canonical units and declare a fixed preferred display
//! unit (e.g. `Working_Distance` stores meters, displays millimeters); the
//! crate never converts between them — unit conversion for display belongs
//! to the host platform.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod entries;
pub mod plugin;
pub mod schema;
pub mod units;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::entries::{
        DetectorExtension, DetectorKind, EntityRef, EntryError, EtdFields, FieldValue,
        InstrumentState, NewSchema, Normalize, SemImage, SemImageBuilder, TldFields,
    };
    pub use crate::plugin::{
        data_entries_entry_point, entry_points, schema_package_entry_point, PluginConfig,
        PluginError, SchemaPackageEntryPoint,
    };
    pub use crate::schema::{
        data_entries_package, general_package, meta_data_section, names, new_schema_section,
        sem_image_etd_section, sem_image_section, sem_image_tld_section, validate_package,
        validate_section, EditComponent, EntityKind, FieldDescriptor, FieldKind, SchemaError,
        SchemaPackage, SectionDescriptor, SubSectionDescriptor, SCHEMA_VERSION,
    };
    pub use crate::units::{Dimension, ParseUnitError, Unit};
}
