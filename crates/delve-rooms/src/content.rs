//! The `RoomContent` trait: where generated rooms meet the game world.
//!
//! Generation decides *where* rooms go and *what kind* they are. Putting
//! something on screen is the game's business. Implement this trait on
//! whatever owns your scene (an ECS world, an engine bridge, a test
//! recorder) and hand it to an [`Instantiator`](crate::Instantiator).

use delve_grid::{Direction, DoorState, GridCoord, RoomType, WorldPos};

use crate::{ContentError, RoomPlan};

/// Everything the collaborator needs to build one room.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub coord: GridCoord,
    pub room_type: RoomType,
    /// Room centre in world space.
    pub position: WorldPos,
    pub doors: DoorState,
    /// Enemies, items and encounters chosen for the room.
    pub plan: RoomPlan,
}

/// The game-side half of room instantiation.
///
/// The instantiator calls into this trait; it never calls back out. For
/// each room of a floor it calls `spawn_room` once, then `set_door` once
/// per direction. On teardown it calls `despawn_room` for every handle,
/// newest room first.
///
/// ## The handle
///
/// `Handle` is whatever the game uses to refer to a spawned room later:
/// an entity id, an index, a node path. The instantiator keeps one per
/// room, keyed by grid coordinate, and gives it back on teardown. Rooms
/// are never looked up by name.
///
/// ## Failure
///
/// Errors from `spawn_room` and `set_door` are not fatal to the floor.
/// They are logged and collected in the
/// [`InstantiationReport`](crate::InstantiationReport), and generation
/// moves on to the next room. `despawn_room` cannot fail.
///
/// ## Example
///
/// ```rust
/// use delve_grid::Direction;
/// use delve_rooms::{ContentError, RoomContent, SpawnRequest};
///
/// #[derive(Default)]
/// struct Scene {
///     rooms: Vec<SpawnRequest>,
/// }
///
/// impl RoomContent for Scene {
///     type Handle = usize;
///
///     fn spawn_room(&mut self, request: &SpawnRequest) -> Result<usize, ContentError> {
///         self.rooms.push(request.clone());
///         Ok(self.rooms.len() - 1)
///     }
///
///     fn set_door(&mut self, _room: &usize, _dir: Direction, _open: bool) -> Result<(), ContentError> {
///         Ok(())
///     }
///
///     fn despawn_room(&mut self, _room: usize) {}
/// }
/// ```
pub trait RoomContent {
    type Handle: Clone + std::fmt::Debug;

    /// Creates the room and its planned content in the world.
    ///
    /// An error here means the room has no world object; the instantiator
    /// records it and moves on to the next room.
    fn spawn_room(&mut self, request: &SpawnRequest) -> Result<Self::Handle, ContentError>;

    /// Opens or seals the door of `room` facing `dir`.
    ///
    /// Called once per direction right after [`spawn_room`](Self::spawn_room).
    fn set_door(
        &mut self,
        room: &Self::Handle,
        dir: Direction,
        open: bool,
    ) -> Result<(), ContentError>;

    /// Removes a room from the world. Must not fail; a collaborator that
    /// cannot find the room has nothing left to remove.
    fn despawn_room(&mut self, room: Self::Handle);
}
