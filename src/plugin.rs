//! # Plugin Entry Points
//!
//! The registration surface the host platform's plugin loader talks to. The
//! crate exposes two named, describable entry points — one for the general
//! schema group and one for the SEM data-entries group — each returning its
//! fully built [`SchemaPackage`] when asked to load.
//!
//! Entry points are plain values produced by side-effect-free factory
//! functions, invoked once at process start by the host. Nothing is
//! registered globally and repeated loads return equal packages.
//!
//! Each entry point carries a small TOML-backed configuration:
//!
//! ```toml
//! # semmeta.toml
//! parameter = 0
//! ```

use serde::Deserialize;

use crate::schema::{self, SchemaPackage};

/// Errors raised while reading entry-point configuration.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// TOML parsing error.
    #[error("invalid plugin configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration attached to a plugin entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PluginConfig {
    /// Custom configuration parameter handed through by the host platform.
    /// The schema groups themselves do not consume it.
    #[serde(default)]
    pub parameter: i64,
}

impl PluginConfig {
    /// Parses a configuration from its TOML representation.
    pub fn from_toml(input: &str) -> Result<Self, PluginError> {
        Ok(toml::from_str(input)?)
    }
}

/// A named entry point the host platform's plugin loader can describe and
/// load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPackageEntryPoint {
    /// Entry-point name the host registers.
    pub name: &'static str,

    /// Human-readable description shown by the host's plugin tooling.
    pub description: &'static str,

    /// Attached configuration.
    pub config: PluginConfig,

    /// Name of the package this entry point loads.
    package: &'static str,
}

impl SchemaPackageEntryPoint {
    /// Replaces the attached configuration.
    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds and returns the schema group this entry point defines.
    ///
    /// Takes no arguments and has no side effects beyond a log line; every
    /// call returns a freshly built, equal package.
    pub fn load(&self) -> SchemaPackage {
        log::debug!("loading schema package '{}' via entry point '{}'", self.package, self.name);
        match self.package {
            schema::names::DATA_ENTRIES_PACKAGE => schema::data_entries_package(),
            _ => schema::general_package(),
        }
    }
}

/// The general-purpose schema package entry point (`NewSchemaPackage`).
pub fn schema_package_entry_point() -> SchemaPackageEntryPoint {
    SchemaPackageEntryPoint {
        name: "NewSchemaPackage",
        description: "New schema package entry point configuration.",
        config: PluginConfig::default(),
        package: schema::names::GENERAL_PACKAGE,
    }
}

/// The SEM data-entries package entry point (`IKZSEM`).
pub fn data_entries_entry_point() -> SchemaPackageEntryPoint {
    SchemaPackageEntryPoint {
        name: "IKZSEM",
        description: "IKZ SEM data entries package entry point configuration.",
        config: PluginConfig::default(),
        package: schema::names::DATA_ENTRIES_PACKAGE,
    }
}

/// Every entry point this crate exposes, in registration order.
pub fn entry_points() -> Vec<SchemaPackageEntryPoint> {
    vec![schema_package_entry_point(), data_entries_entry_point()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::names;

    #[test]
    fn test_entry_point_names_and_descriptions() {
        let general = schema_package_entry_point();
        assert_eq!(general.name, "NewSchemaPackage");
        assert_eq!(
            general.description,
            "New schema package entry point configuration."
        );

        let sem = data_entries_entry_point();
        assert_eq!(sem.name, "IKZSEM");
        assert_eq!(
            sem.description,
            "IKZ SEM data entries package entry point configuration."
        );
    }

    #[test]
    fn test_load_returns_the_defined_package() {
        let general = schema_package_entry_point().load();
        assert_eq!(general.name, names::GENERAL_PACKAGE);
        assert!(general.section(names::NEW_SCHEMA).is_some());

        let sem = data_entries_entry_point().load();
        assert_eq!(sem.name, names::DATA_ENTRIES_PACKAGE);
        assert_eq!(sem.sections.len(), 4);
        assert!(sem.section(names::SEM_IMAGE).is_some());
        assert!(sem.section(names::SEM_IMAGE_ETD).is_some());
        assert!(sem.section(names::SEM_IMAGE_TLD).is_some());
        assert!(sem.section(names::META_DATA).is_some());
    }

    #[test]
    fn test_repeated_loads_are_equal() {
        let entry_point = data_entries_entry_point();
        assert_eq!(entry_point.load(), entry_point.load());
    }

    #[test]
    fn test_entry_points_in_registration_order() {
        let points = entry_points();
        let point_names: Vec<_> = points.iter().map(|p| p.name).collect();
        assert_eq!(point_names, vec!["NewSchemaPackage", "IKZSEM"]);
    }

    #[test]
    fn test_config_parsing() {
        let config = PluginConfig::from_toml("parameter = 7").unwrap();
        assert_eq!(config.parameter, 7);

        // Missing keys fall back to the default.
        assert_eq!(PluginConfig::from_toml("").unwrap(), PluginConfig::default());

        assert!(PluginConfig::from_toml("parameter = \"x\"").is_err());

        let entry_point = data_entries_entry_point().with_config(config);
        assert_eq!(entry_point.config.parameter, 7);
        // Configuration does not change what loads.
        assert_eq!(entry_point.load(), data_entries_entry_point().load());
    }
}
