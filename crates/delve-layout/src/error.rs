//! Error types for the layout layer.

use delve_grid::{GridCoord, RoomType};

/// A mutation or import that would break one of the room graph's
/// invariants. The graph is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The cell is already a room.
    #[error("cell {0} is already a room")]
    Occupied(GridCoord),

    /// The cell has no 4-adjacent room, so adding it would split the floor.
    #[error("cell {0} does not touch the floor")]
    Detached(GridCoord),

    /// The cell is not part of the floor.
    #[error("no room at {0}")]
    UnknownRoom(GridCoord),

    /// The start room's type is fixed for the lifetime of the floor.
    #[error("start room at {0} cannot change type")]
    StartImmutable(GridCoord),

    /// A floor has exactly one start room.
    #[error("second start room at {0}")]
    DuplicateStart(GridCoord),

    /// An imported room list had no start room.
    #[error("floor has no start room")]
    MissingStart,

    /// A unique room type is already assigned elsewhere.
    #[error("{kind} room already exists at {existing}")]
    DuplicateSpecial { kind: RoomType, existing: GridCoord },

    /// An imported room can't be reached from the start.
    #[error("room {0} is unreachable from the start")]
    Disconnected(GridCoord),
}
