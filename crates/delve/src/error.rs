//! Unified error type for Delve.

use delve_floor::{ConfigError, FloorError};
use delve_grid::CodecError;
use delve_layout::GraphError;
use delve_rooms::ContentError;
use delve_waves::WaveError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `delve` facade, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant generates the `From` impls, so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DelveError {
    /// Snapshot or config encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A room graph invariant was violated.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A room could not be populated or spawned.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A challenge room was driven out of order.
    #[error(transparent)]
    Wave(#[from] WaveError),

    /// The floor config was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A floor operation failed (wrong phase, out of range, busy).
    #[error(transparent)]
    Floor(#[from] FloorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_grid::{GridCoord, RoomType};
    use delve_waves::ChallengeState;

    #[test]
    fn test_from_graph_error() {
        let err = GraphError::Occupied(GridCoord::new(1, 2));
        let delve_err: DelveError = err.into();
        assert!(matches!(delve_err, DelveError::Graph(_)));
        assert!(delve_err.to_string().contains("(1, 2)"));
    }

    #[test]
    fn test_from_content_error() {
        let err = ContentError::MissingPrefab {
            room_type: RoomType::Boss,
            pool: "bosses",
        };
        let delve_err: DelveError = err.into();
        assert!(matches!(delve_err, DelveError::Content(_)));
        assert!(delve_err.to_string().contains("bosses"));
    }

    #[test]
    fn test_from_wave_error() {
        let err = WaveError::NotRunning(ChallengeState::Completed);
        let delve_err: DelveError = err.into();
        assert!(matches!(delve_err, DelveError::Wave(_)));
    }

    #[test]
    fn test_from_config_error() {
        let delve_err: DelveError = ConfigError::ZeroFloors.into();
        assert!(matches!(delve_err, DelveError::Config(_)));
    }

    #[test]
    fn test_from_floor_error() {
        let delve_err: DelveError = FloorError::Busy.into();
        assert!(matches!(delve_err, DelveError::Floor(FloorError::Busy)));
        assert_eq!(delve_err.to_string(), "a floor operation is already in progress");
    }
}
