//! Floor lifecycle for Delve.
//!
//! The [`FloorController`] runs a whole dungeon: it generates floor 1,
//! answers "where does the player start / where is the boss" queries,
//! and on each floor clear tears the old floor down and builds the next,
//! until the run is [`Completed`](FloorPhase::Completed).
//!
//! # Key types
//!
//! - [`FloorController`]: owns the RNG, the live floor and its content
//! - [`FloorConfig`]: room count, floor count, special-room chances
//! - [`FloorPhase`]: `NoFloor → Transitioning → FloorActive → … → Completed`
//! - [`FloorSnapshot`]: serializable view for UI and debug dumps
//! - [`FloorListener`]: lifecycle callbacks
//! - [`SharedFloorController`]: async-friendly handle with fail-fast locking

mod config;
mod controller;
mod error;
mod shared;
mod snapshot;
mod state;

pub use config::{ConfigError, FloorConfig};
pub use controller::{FloorController, FloorListener};
pub use error::FloorError;
pub use shared::{FloorEvent, SharedFloorController};
pub use snapshot::{FloorSnapshot, RoomSnapshot};
pub use state::{FloorPhase, FloorState};
