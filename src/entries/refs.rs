use serde::{Deserialize, Serialize};
use std::fmt;

/// An identity link to an entity the host platform owns.
///
/// Sample, microscope, and detector references all point at entities
/// defined outside this crate (composite systems and instruments). The
/// reference is an opaque string assigned by the host; this crate never
/// resolves or validates the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(String);

impl EntityRef {
    /// Creates a reference from the host platform's identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}
