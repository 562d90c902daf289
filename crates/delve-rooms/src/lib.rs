//! Room content for Delve floors.
//!
//! Turns a finished [`FloorLayout`](delve_layout::FloorLayout) into live
//! rooms in the game world, one [`RoomContent`] call at a time.
//!
//! # Key types
//!
//! - [`RoomContent`]: the trait the game implements to spawn rooms
//! - [`Instantiator`]: spawns a floor, tracks handles, tears it down
//! - [`PrefabCatalog`] / [`PopulationConfig`]: what rooms are filled with
//! - [`RoomPlan`]: the content chosen for one room
//! - [`ContentError`]: non-fatal content problems

mod catalog;
mod content;
mod error;
mod instantiator;

pub use catalog::{ChallengeSetup, PopulationConfig, PrefabCatalog, RoomPlan, plan_room};
pub use content::{RoomContent, SpawnRequest};
pub use error::ContentError;
pub use instantiator::{InstantiationReport, Instantiator};
