//! The floor controller: owns a run of floors from first to last.

use delve_grid::{DoorState, GridCoord, RoomType, WorldPos};
use delve_layout::{FloorLayout, GraphError, generate_layout};
use delve_rooms::{Instantiator, PrefabCatalog, RoomContent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::{FloorConfig, FloorError, FloorPhase, FloorSnapshot, FloorState};

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// Observer for floor lifecycle events.
///
/// Register with [`FloorController::add_listener`]. Called synchronously,
/// after the controller has settled into its new phase. All methods
/// default to no-ops.
pub trait FloorListener: Send {
    /// A floor finished generating and is now active.
    fn on_floor_generated(&mut self, _index: u32, _snapshot: &FloorSnapshot) {}

    /// The last floor was cleared.
    fn on_run_completed(&mut self, _floors: u32) {}

    /// The controller was reset with `clear_floor`.
    fn on_floor_cleared(&mut self) {}
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives generation and progression across the floors of a run.
///
/// One controller per run. It owns the RNG, the room graph of the live
/// floor, and (through its [`Instantiator`]) every spawned room, so no
/// other code can see a half-built floor.
///
/// ```ignore
/// let mut floors = FloorController::new(config, my_world, catalog)?;
/// floors.start_run()?;
/// player.teleport(floors.starting_room_world_position().unwrap());
/// // ...boss defeated:
/// floors.advance_floor()?;
/// ```
pub struct FloorController<C: RoomContent> {
    config: FloorConfig,
    phase: FloorPhase,
    floor: Option<FloorState>,
    instantiator: Instantiator<C>,
    rng: ChaCha8Rng,
    seed: u64,
    listeners: Vec<Box<dyn FloorListener>>,
}

impl<C: RoomContent> FloorController<C> {
    /// Creates a controller in `NoFloor`.
    ///
    /// # Errors
    /// [`FloorError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: FloorConfig, content: C, catalog: PrefabCatalog) -> Result<Self, FloorError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!(seed, floors = config.floor_count, rooms = config.room_count, "floor controller created");
        Ok(Self {
            instantiator: Instantiator::new(content, catalog, config.population),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            config,
            phase: FloorPhase::NoFloor,
            floor: None,
            listeners: Vec::new(),
        })
    }

    pub fn add_listener(&mut self, listener: impl FloorListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Begins a run on floor 1.
    ///
    /// # Errors
    /// [`FloorError::InvalidState`] unless the controller is in `NoFloor`.
    pub fn start_run(&mut self) -> Result<&FloorState, FloorError> {
        if self.phase != FloorPhase::NoFloor {
            return Err(self.invalid("start a run"));
        }
        self.generate_floor(1)
    }

    /// Builds and instantiates floor `index`, replacing any live floor.
    ///
    /// The pipeline runs in one go: tear down old content, grow the
    /// graph, place special rooms, resolve doors, spawn rooms, notify
    /// listeners. Content problems do not fail the floor; they are in
    /// the returned state's `content` report.
    ///
    /// # Errors
    /// - [`FloorError::InvalidState`] unless in `NoFloor` or `FloorActive`.
    /// - [`FloorError::InvalidConfig`] or [`FloorError::FloorOutOfRange`],
    ///   both raised before anything changes.
    /// - [`FloorError::Graph`] if layout fails; the controller is left in
    ///   `NoFloor`.
    pub fn generate_floor(&mut self, index: u32) -> Result<&FloorState, FloorError> {
        if !self.phase.can_transition_to(FloorPhase::Transitioning) {
            return Err(self.invalid("generate a floor"));
        }
        self.config.validate()?;
        if !(1..=self.config.floor_count).contains(&index) {
            return Err(FloorError::FloorOutOfRange {
                index,
                floor_count: self.config.floor_count,
            });
        }

        self.begin_transition();

        let layout = match generate_layout(&self.config.layout_params(), &mut self.rng) {
            Ok(layout) => layout,
            Err(err) => return Err(self.abandon_floor(index, err)),
        };
        if layout.boss().is_none() && layout.graph().len() > 1 {
            warn!(
                floor = index,
                rooms = layout.graph().len(),
                "special rooms took every candidate, floor has no boss room"
            );
        }

        let content =
            self.instantiator
                .instantiate_floor(&layout, self.config.room_distance, &mut self.rng);
        let state = FloorState {
            index,
            layout,
            content,
        };
        let snapshot = FloorSnapshot::capture(&state, self.config.floor_count);
        self.phase = FloorPhase::FloorActive;
        info!(
            floor = index,
            of = self.config.floor_count,
            rooms = snapshot.rooms.len(),
            "floor generated"
        );
        for listener in &mut self.listeners {
            listener.on_floor_generated(index, &snapshot);
        }
        Ok(&*self.floor.insert(state))
    }

    /// Moves past the live floor: generates the next one, or completes
    /// the run after the last. Returns the resulting phase.
    ///
    /// # Errors
    /// [`FloorError::InvalidState`] unless a floor is active, plus
    /// anything [`generate_floor`](Self::generate_floor) returns.
    pub fn advance_floor(&mut self) -> Result<FloorPhase, FloorError> {
        let current = match (&self.floor, self.phase) {
            (Some(floor), FloorPhase::FloorActive) => floor.index,
            _ => return Err(self.invalid("advance")),
        };

        let next = current + 1;
        if next > self.config.floor_count {
            self.begin_transition();
            self.phase = FloorPhase::Completed;
            info!(floors = self.config.floor_count, "run completed");
            for listener in &mut self.listeners {
                listener.on_run_completed(self.config.floor_count);
            }
            return Ok(self.phase);
        }

        self.generate_floor(next)?;
        Ok(self.phase)
    }

    /// Same as [`advance_floor`](Self::advance_floor); the name used by
    /// exit doors and boss-defeat triggers.
    pub fn advance_to_next_floor(&mut self) -> Result<FloorPhase, FloorError> {
        self.advance_floor()
    }

    /// Tears down all content and returns to `NoFloor`, from any phase.
    /// Returns how many rooms were despawned.
    pub fn clear_floor(&mut self) -> usize {
        let removed = self.instantiator.teardown();
        self.floor = None;
        self.phase = FloorPhase::NoFloor;
        debug!(rooms = removed, "floor cleared");
        for listener in &mut self.listeners {
            listener.on_floor_cleared();
        }
        removed
    }

    /// Swaps in a new config for the next generated floor.
    ///
    /// The live floor is left as it is. Population settings reach the
    /// instantiator right away. A `seed` different from the one in use
    /// restarts the RNG from it; `None` keeps the current stream.
    ///
    /// # Errors
    /// [`FloorError::InvalidConfig`]; the old config stays in place.
    pub fn set_config(&mut self, config: FloorConfig) -> Result<(), FloorError> {
        config.validate()?;
        self.instantiator.set_population(config.population);
        if let Some(seed) = config.seed.filter(|s| *s != self.seed) {
            info!(seed, previous = self.seed, "floor rng reseeded");
            self.rng = ChaCha8Rng::seed_from_u64(seed);
            self.seed = seed;
        }
        self.config = config;
        Ok(())
    }

    fn begin_transition(&mut self) {
        self.phase = FloorPhase::Transitioning;
        let removed = self.instantiator.teardown();
        if self.floor.take().is_some() {
            debug!(rooms = removed, "previous floor torn down");
        }
    }

    /// Layout failed after the old floor was torn down: nothing is live,
    /// so listeners hear the same as for `clear_floor`.
    fn abandon_floor(&mut self, index: u32, err: GraphError) -> FloorError {
        warn!(floor = index, error = %err, "layout failed, floor abandoned");
        self.phase = FloorPhase::NoFloor;
        for listener in &mut self.listeners {
            listener.on_floor_cleared();
        }
        err.into()
    }

    fn invalid(&self, operation: &'static str) -> FloorError {
        warn!(operation, state = %self.phase, "rejected floor operation");
        FloorError::InvalidState {
            operation,
            state: self.phase,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> FloorPhase {
        self.phase
    }

    /// The live floor, if any.
    pub fn floor(&self) -> Option<&FloorState> {
        self.floor.as_ref()
    }

    /// 1-based index of the live floor.
    pub fn floor_index(&self) -> Option<u32> {
        self.floor.as_ref().map(|f| f.index)
    }

    pub fn floor_count(&self) -> u32 {
        self.config.floor_count
    }

    pub fn layout(&self) -> Option<&FloorLayout> {
        self.floor.as_ref().map(|f| &f.layout)
    }

    /// Where to put the player when a floor begins.
    pub fn starting_room_world_position(&self) -> Option<WorldPos> {
        self.layout()
            .map(|l| l.start().to_world(self.config.room_distance))
    }

    pub fn boss_room_world_position(&self) -> Option<WorldPos> {
        self.layout()?
            .boss()
            .map(|b| b.to_world(self.config.room_distance))
    }

    pub fn room_type(&self, coord: GridCoord) -> Option<RoomType> {
        self.layout()?.room_type(coord)
    }

    pub fn door_state(&self, coord: GridCoord) -> Option<DoorState> {
        self.layout()?.door_state(coord)
    }

    pub fn snapshot(&self) -> Option<FloorSnapshot> {
        self.floor
            .as_ref()
            .map(|f| FloorSnapshot::capture(f, self.config.floor_count))
    }

    /// Handle of the spawned room at `coord`.
    pub fn room_handle(&self, coord: GridCoord) -> Option<&C::Handle> {
        self.instantiator.handle(coord)
    }

    pub fn content(&self) -> &C {
        self.instantiator.content()
    }

    pub fn content_mut(&mut self) -> &mut C {
        self.instantiator.content_mut()
    }

    pub fn config(&self) -> &FloorConfig {
        &self.config
    }

    /// The seed this run's RNG started from. Feed it back through
    /// `FloorConfig::seed` to replay the run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
