use serde::{Deserialize, Serialize};

use super::{EntryError, Normalize};

/// General-purpose scaffold record (`NewSchema`)
///
/// Backs the general schema group's single section. Its normalize pass is
/// the one place in the crate where the hook does visible work: it fills
/// `message` with a greeting derived from `name`. It still never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchema {
    /// Name to greet.
    pub name: String,

    /// Greeting derived by the normalize pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for NewSchema {
    fn default() -> Self {
        Self {
            name: "hello world".to_string(),
            message: None,
        }
    }
}

impl NewSchema {
    /// Creates a record with the default name and no message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with the given name and no message.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
        }
    }

    /// Serializes this record to JSON.
    pub fn to_json(&self) -> Result<String, EntryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Normalize for NewSchema {
    fn normalize(&mut self) {
        self.message = Some(format!("Hello {}!", self.name));
        log::debug!("normalized NewSchema record for '{}'", self.name);
    }
}
