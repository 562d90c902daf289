//! `DungeonBuilder`: one-stop setup of a floor controller.
//!
//! Ties the layers together: config → layout → rooms → floor controller.

use delve_floor::{FloorConfig, FloorController, SharedFloorController};
use delve_rooms::{PrefabCatalog, RoomContent};
use tracing::debug;

use crate::DelveError;

/// Builder for a [`FloorController`].
///
/// # Example
///
/// ```rust,ignore
/// use delve::prelude::*;
///
/// let mut floors = delve::builder()
///     .config_json(include_str!("dungeon.json"))?
///     .catalog(my_catalog)
///     .build(my_world)?;
/// floors.start_run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DungeonBuilder {
    config: FloorConfig,
    catalog: PrefabCatalog,
}

impl DungeonBuilder {
    /// Creates a builder with the default config and an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole floor config.
    pub fn config(mut self, config: FloorConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the floor config from JSON. Missing fields keep defaults.
    ///
    /// # Errors
    /// Returns `DelveError::Config` if the JSON is malformed or invalid.
    pub fn config_json(mut self, json: &str) -> Result<Self, DelveError> {
        self.config = FloorConfig::from_json(json)?;
        Ok(self)
    }

    /// Sets the prefab pools rooms are filled from.
    pub fn catalog(mut self, catalog: PrefabCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Fixes the run seed, for replays and tests.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the number of floors in the run.
    pub fn floors(mut self, floor_count: u32) -> Self {
        self.config.floor_count = floor_count;
        self
    }

    /// Sets the number of rooms grown per floor.
    pub fn rooms(mut self, room_count: usize) -> Self {
        self.config.room_count = room_count;
        self
    }

    /// Builds a controller that spawns rooms through `content`.
    ///
    /// # Errors
    /// Returns `DelveError::Floor` if the config fails validation.
    pub fn build<C: RoomContent>(self, content: C) -> Result<FloorController<C>, DelveError> {
        debug!(
            floors = self.config.floor_count,
            rooms = self.config.room_count,
            seed = ?self.config.seed,
            "building floor controller"
        );
        Ok(FloorController::new(self.config, content, self.catalog)?)
    }

    /// Like [`build`](Self::build), wrapped for sharing across tasks.
    pub fn build_shared<C: RoomContent>(
        self,
        content: C,
    ) -> Result<SharedFloorController<C>, DelveError> {
        Ok(SharedFloorController::new(self.build(content)?))
    }
}
