//! Error types for the content layer.

use delve_grid::{Direction, GridCoord, RoomType};

/// Problems met while putting content into rooms.
///
/// None of these abort floor generation. The room graph is already
/// final by the time content is placed, so a failed room is logged and
/// reported while the rest of the floor carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
    /// The catalog has nothing to draw from for this room type.
    #[error("no {pool} prefabs to populate a {room_type} room")]
    MissingPrefab {
        room_type: RoomType,
        pool: &'static str,
    },

    /// The spawned room has no door object facing `dir`.
    #[error("room {coord} has no {dir} door")]
    MissingDoor { coord: GridCoord, dir: Direction },

    /// A room already stands at this coordinate; tear it down first.
    #[error("room {0} is already instantiated")]
    AlreadyInstantiated(GridCoord),

    /// The content collaborator reported a failure of its own.
    #[error("content collaborator failed: {0}")]
    Collaborator(String),
}
