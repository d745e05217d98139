use thiserror::Error;

/// Errors surfaced while serializing an [`OrderedMap`](crate::OrderedMap)
/// to one of the textual formats.
///
/// Both variants wrap a failure reported by the standard per-value encoder
/// the map delegates to. A returned error invalidates the whole output;
/// no partial buffer is exposed.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A value could not be encoded as JSON.
    #[error("json value encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A value could not be encoded as YAML.
    #[error("yaml value encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
