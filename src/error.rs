use thiserror::Error;

/// Failures raised while loading or rendering bundled resources.
///
/// The cache never aborts the process; the boundary (the demo binary here)
/// decides whether a missing resource is fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named resource is absent from the asset bundle.
    #[error("couldn't find {0} in the asset bundle")]
    ResourceNotFound(String),

    /// The resource was present but its bytes did not decode.
    #[error("couldn't decode {name}: {reason}")]
    DecodeFailure { name: String, reason: String },

    /// A resize produced no usable bitmap.
    #[error("couldn't resize image {0}")]
    RenderFailure(String),
}
