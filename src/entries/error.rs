/// Errors that can occur when serializing or deserializing record types.
///
/// The records themselves surface no errors: field assignment is plain
/// struct mutation and [`normalize`](super::Normalize::normalize) never
/// fails. Only the JSON boundary with the host platform can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// JSON serialization/deserialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
