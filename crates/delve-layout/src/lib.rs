//! Floor layout generation for Delve.
//!
//! Turns a room count and a random source into a connected, classified
//! floor plan. Nothing here creates world objects; it only decides where
//! rooms are, what they are for, and which doors lead somewhere.
//!
//! # Pipeline
//!
//! ```text
//! build_graph ──→ place_special_rooms ──→ compute_doors
//!  (4-connected      (Item/Shop/Secret/      (N/S/E/W mask
//!   growth)           Challenge + Boss)       per room)
//! ```
//!
//! [`generate_layout`] runs all three and returns a [`FloorLayout`].

mod builder;
mod doors;
mod error;
mod graph;
mod layout;
mod special;

pub use builder::{BuildOutcome, build_graph};
pub use doors::{DoorMap, compute_doors, doors_at};
pub use error::GraphError;
pub use graph::RoomGraph;
pub use layout::{FloorLayout, GenerationReport, LayoutParams, generate_layout, layout_from_graph};
pub use special::{
    BossDistance, MIN_SPECIAL_CANDIDATES, PlacementReport, SpecialRoomChances,
    place_special_rooms,
};
