//! Instantiator: spawns, tracks, and tears down the rooms of a floor.

use std::collections::HashMap;

use delve_grid::{Direction, DoorState, GridCoord, RoomType, WorldPos};
use delve_layout::FloorLayout;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    ContentError, PopulationConfig, PrefabCatalog, RoomContent, RoomPlan, SpawnRequest, plan_room,
};

/// What happened while instantiating a whole floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstantiationReport {
    /// Rooms that now have a world object, in spawn order.
    pub spawned: Vec<GridCoord>,
    /// Rooms the collaborator could not create.
    pub failed: Vec<(GridCoord, ContentError)>,
    /// Rooms that were created, but with a problem (missing prefabs, a
    /// door that could not be set).
    pub warnings: Vec<(GridCoord, ContentError)>,
}

impl InstantiationReport {
    /// `true` if every room spawned without complaint.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.warnings.is_empty()
    }
}

/// Owns the content collaborator and one handle per live room.
///
/// At most one handle exists per coordinate. Instantiating a coordinate
/// that is already live is refused, so callers must [`teardown`] before
/// regenerating a floor.
///
/// [`teardown`]: Instantiator::teardown
pub struct Instantiator<C: RoomContent> {
    content: C,
    catalog: PrefabCatalog,
    population: PopulationConfig,
    rooms: HashMap<GridCoord, C::Handle>,
    /// Spawn order, so teardown can run newest-first.
    order: Vec<GridCoord>,
}

impl<C: RoomContent> Instantiator<C> {
    pub fn new(content: C, catalog: PrefabCatalog, population: PopulationConfig) -> Self {
        Self {
            content,
            catalog,
            population: population.validated(),
            rooms: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Spawns one room, its content, and its doors.
    ///
    /// Returns the non-fatal problems met along the way. A missing
    /// prefab leaves the room empty; a door the collaborator cannot set
    /// is skipped. Both still count as a spawned room.
    ///
    /// # Errors
    /// - [`ContentError::AlreadyInstantiated`] if `coord` is live.
    /// - Whatever [`RoomContent::spawn_room`] returns. No handle is kept.
    pub fn instantiate<R: Rng + ?Sized>(
        &mut self,
        coord: GridCoord,
        room_type: RoomType,
        doors: DoorState,
        position: WorldPos,
        rng: &mut R,
    ) -> Result<Vec<ContentError>, ContentError> {
        if self.rooms.contains_key(&coord) {
            return Err(ContentError::AlreadyInstantiated(coord));
        }

        let mut problems = Vec::new();
        let plan = plan_room(room_type, &self.catalog, &self.population, rng).unwrap_or_else(|err| {
            warn!(room = %coord, %room_type, error = %err, "room left empty");
            problems.push(err);
            RoomPlan::empty(room_type)
        });

        let request = SpawnRequest {
            coord,
            room_type,
            position,
            doors,
            plan,
        };
        let handle = self.content.spawn_room(&request)?;

        for dir in Direction::ALL {
            if let Err(err) = self.content.set_door(&handle, dir, doors.is_open(dir)) {
                warn!(room = %coord, door = %dir, error = %err, "door not set");
                problems.push(err);
            }
        }

        debug!(room = %coord, %room_type, doors = doors.open_count(), "room instantiated");
        self.rooms.insert(coord, handle);
        self.order.push(coord);
        Ok(problems)
    }

    /// Spawns every room of `layout`, centred at `coord * room_distance`.
    ///
    /// Never aborts part-way: a room that fails is recorded in the report
    /// and the next room is attempted.
    pub fn instantiate_floor<R: Rng + ?Sized>(
        &mut self,
        layout: &FloorLayout,
        room_distance: f32,
        rng: &mut R,
    ) -> InstantiationReport {
        let mut report = InstantiationReport::default();

        for (coord, room_type) in layout.graph().iter() {
            let doors = layout.door_state(coord).unwrap_or_default();
            let position = coord.to_world(room_distance);
            match self.instantiate(coord, room_type, doors, position, rng) {
                Ok(problems) => {
                    report.spawned.push(coord);
                    report
                        .warnings
                        .extend(problems.into_iter().map(|err| (coord, err)));
                }
                Err(err) => {
                    warn!(room = %coord, %room_type, error = %err, "room failed to spawn");
                    report.failed.push((coord, err));
                }
            }
        }

        info!(
            spawned = report.spawned.len(),
            failed = report.failed.len(),
            warnings = report.warnings.len(),
            "floor instantiated"
        );
        report
    }

    /// Despawns every live room, newest first. Returns how many went.
    ///
    /// Safe to call on an empty instantiator.
    pub fn teardown(&mut self) -> usize {
        let mut removed = 0;
        while let Some(coord) = self.order.pop() {
            if let Some(handle) = self.rooms.remove(&coord) {
                self.content.despawn_room(handle);
                removed += 1;
            }
        }
        if removed > 0 {
            info!(rooms = removed, "floor torn down");
        }
        removed
    }

    /// Handle of the live room at `coord`.
    pub fn handle(&self, coord: GridCoord) -> Option<&C::Handle> {
        self.rooms.get(&coord)
    }

    /// Live rooms, in spawn order.
    pub fn coords(&self) -> &[GridCoord] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn catalog(&self) -> &PrefabCatalog {
        &self.catalog
    }

    pub fn population(&self) -> &PopulationConfig {
        &self.population
    }

    /// Replaces the population settings. Rooms already live keep what
    /// they were spawned with.
    pub fn set_population(&mut self, population: PopulationConfig) {
        self.population = population.validated();
    }
}
