//! Floor configuration and its validation.

use delve_grid::{GridBounds, GridCoord, RoomType};
use delve_layout::{BossDistance, LayoutParams, SpecialRoomChances};
use delve_rooms::PopulationConfig;
use serde::{Deserialize, Serialize};

/// Why a [`FloorConfig`] was rejected.
///
/// Checked before any state changes, so a rejected config leaves the
/// controller exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("room_count must be at least 1")]
    ZeroRooms,

    #[error("floor_count must be at least 1")]
    ZeroFloors,

    #[error("{room_type} room chance {value} is outside 0.0..=1.0")]
    ChanceOutOfRange { room_type: RoomType, value: f64 },

    #[error("room_distance must be positive and finite, got {0}")]
    InvalidRoomDistance(f32),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything that shapes a run of floors.
///
/// Every field has a default, so a JSON document only needs the fields
/// it changes:
///
/// ```json
/// { "room_count": 14, "floor_count": 5, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Rooms to grow per floor, start included.
    pub room_count: usize,
    /// Floors in a run.
    pub floor_count: u32,
    pub item_room_chance: f64,
    pub shop_room_chance: f64,
    pub secret_room_chance: f64,
    pub challenge_room_chance: f64,
    /// World units between neighbouring room centres.
    pub room_distance: f32,
    /// Keep rooms within this many cells of the start on both axes.
    /// `None` lets the floor sprawl.
    pub grid_radius: Option<u32>,
    pub boss_distance: BossDistance,
    /// Fixed seed for reproducible runs. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// How densely rooms are filled.
    pub population: PopulationConfig,
}

impl Default for FloorConfig {
    fn default() -> Self {
        let chances = SpecialRoomChances::default();
        Self {
            room_count: 10,
            floor_count: 3,
            item_room_chance: chances.item,
            shop_room_chance: chances.shop,
            secret_room_chance: chances.secret,
            challenge_room_chance: chances.challenge,
            room_distance: 20.0,
            grid_radius: None,
            boss_distance: BossDistance::default(),
            seed: None,
            population: PopulationConfig::default(),
        }
    }
}

impl FloorConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field. The first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count == 0 {
            return Err(ConfigError::ZeroRooms);
        }
        if self.floor_count == 0 {
            return Err(ConfigError::ZeroFloors);
        }
        if let Some((room_type, value)) = self.chances().first_invalid() {
            return Err(ConfigError::ChanceOutOfRange { room_type, value });
        }
        if !(self.room_distance.is_finite() && self.room_distance > 0.0) {
            return Err(ConfigError::InvalidRoomDistance(self.room_distance));
        }
        Ok(())
    }

    pub fn chances(&self) -> SpecialRoomChances {
        SpecialRoomChances {
            item: self.item_room_chance,
            shop: self.shop_room_chance,
            secret: self.secret_room_chance,
            challenge: self.challenge_room_chance,
        }
    }

    /// Layout inputs for one floor. Every floor starts at the origin.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            room_count: self.room_count,
            start: GridCoord::ORIGIN,
            bounds: self
                .grid_radius
                .map(|radius| GridBounds::new(GridCoord::ORIGIN, radius)),
            chances: self.chances(),
            boss_distance: self.boss_distance,
        }
    }
}
