//! Grid vocabulary for Delve.
//!
//! This crate defines the values every other layer passes around:
//!
//! - **Types** ([`GridCoord`], [`Direction`], [`RoomType`], [`DoorState`],
//!   [`WorldPos`], [`GridBounds`], [`PrefabId`]): addressing and
//!   classifying rooms.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): turning floor data
//!   into bytes for tooling.
//! - **Errors** ([`CodecError`]).
//!
//! # Architecture
//!
//! ```text
//! Grid (values) → Layout (room graph) → Rooms (content) → Floor (lifecycle)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::CodecError;
pub use types::{Direction, DoorState, GridBounds, GridCoord, PrefabId, RoomType, WorldPos};
