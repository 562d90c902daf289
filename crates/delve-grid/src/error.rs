//! Error types for the grid layer.
//!
//! The grid types themselves cannot fail; the only fallible thing here is
//! turning them into bytes and back.

/// Errors that can occur while encoding or decoding floor data.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed input, missing fields, or
    /// values of the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
