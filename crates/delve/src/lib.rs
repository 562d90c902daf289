//! # Delve
//!
//! Procedural dungeon floors for roguelike games.
//!
//! Delve grows a connected grid of rooms for each floor, marks the start,
//! the boss and a handful of optional special rooms, works out which
//! doors connect, and spawns everything through a single
//! [`RoomContent`](delve_rooms::RoomContent) trait the game implements.
//! A [`FloorController`](delve_floor::FloorController) then walks the
//! player through the floors of a run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use delve::prelude::*;
//!
//! // Implement RoomContent for your world, then:
//! // let mut floors = delve::builder()
//! //     .seed(42)
//! //     .catalog(catalog)
//! //     .build(world)?;
//! // floors.start_run()?;
//! // let spawn = floors.starting_room_world_position();
//! ```
//!
//! ## Crates
//!
//! | Re-export | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`grid`]  | coordinates, directions, room types, door masks   |
//! | [`layout`]| graph growth, special rooms, doors                |
//! | [`rooms`] | prefab catalog and room instantiation             |
//! | [`waves`] | challenge-room wave encounters                    |
//! | [`floor`] | the floor controller and run progression          |

mod builder;
mod error;
pub mod telemetry;

pub use builder::DungeonBuilder;
pub use error::DelveError;

pub use delve_floor as floor;
pub use delve_grid as grid;
pub use delve_layout as layout;
pub use delve_rooms as rooms;
pub use delve_waves as waves;

/// Starts configuring a dungeon.
pub fn builder() -> DungeonBuilder {
    DungeonBuilder::new()
}

pub mod prelude {
    //! Everything a game needs to run floors, in one import.

    pub use crate::{DelveError, DungeonBuilder};
    pub use delve_floor::{
        FloorConfig, FloorController, FloorError, FloorEvent, FloorListener, FloorPhase,
        FloorSnapshot, RoomSnapshot, SharedFloorController,
    };
    pub use delve_grid::{
        Codec, Direction, DoorState, GridCoord, JsonCodec, PrefabId, RoomType, WorldPos,
    };
    pub use delve_layout::{BossDistance, FloorLayout, GenerationReport, RoomGraph};
    pub use delve_rooms::{
        ContentError, PopulationConfig, PrefabCatalog, RoomContent, RoomPlan, SpawnRequest,
    };
    pub use delve_waves::{ChallengeController, ChallengeState, WaveConfig, WaveEvent, WaveSpawn};
}
