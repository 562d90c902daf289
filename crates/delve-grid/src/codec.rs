//! Codec trait and implementations for floor snapshots.
//!
//! Minimaps, debug tooling and regression fixtures all want a floor as
//! bytes. They go through the [`Codec`] trait so the format can change
//! without touching the callers.

use serde::{de::DeserializeOwned, Serialize};

use crate::CodecError;

/// Converts serde types to bytes and back.
///
/// Anything that derives `Serialize`/`Deserialize` in this workspace can
/// go through a codec: a [`GridCoord`](crate::GridCoord), a whole floor
/// snapshot, a generation report.
///
/// ## Trait bounds
///
/// - `Send + Sync`: one codec can be shared by the async floor handle and
///   whatever tasks consume its events, on any runtime thread.
/// - `'static`: the codec owns everything it needs and can live inside
///   long-running tasks.
///
/// ## Generic methods
///
/// `encode` and `decode` are generic over the value type:
/// - `encode<T: Serialize>`: `T` can be turned into bytes.
/// - `decode<T: DeserializeOwned>`: `T` can be rebuilt from bytes.
///
/// `DeserializeOwned` means the decoded value does not borrow from the
/// input, so a fixture buffer can be dropped right after decoding.
///
/// ## Determinism
///
/// Encoding the same value twice yields the same bytes. Two floors built
/// from the same seed and config therefore encode identically, which is
/// what regression fixtures compare.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `CodecError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `CodecError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// Human-readable, which is what you want when diffing two floors from a
/// failing seed.
///
/// ```rust
/// use delve_grid::{Codec, GridCoord, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&GridCoord::new(3, -1)).unwrap();
/// let back: GridCoord = codec.decode(&bytes).unwrap();
/// assert_eq!(back, GridCoord::new(3, -1));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl JsonCodec {
    /// Like [`Codec::encode`], but indented for humans.
    pub fn encode_pretty<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string_pretty(value).map_err(CodecError::Encode)
    }
}

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(CodecError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{DoorState, RoomType};

    #[test]
    fn test_decode_rejects_malformed_json() {
        let result: Result<RoomType, _> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_room_type() {
        let result: Result<RoomType, _> = JsonCodec.decode(br#""Armory""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_door_state_survives_encoding() {
        let doors = DoorState::NORTH | DoorState::EAST;
        let bytes = JsonCodec.encode(&doors).unwrap();
        let back: DoorState = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(back, doors);
    }

    #[test]
    fn test_encode_pretty_is_multiline() {
        let text = JsonCodec
            .encode_pretty(&crate::GridCoord::new(1, 2))
            .unwrap();
        assert!(text.contains('\n'));
    }
}
