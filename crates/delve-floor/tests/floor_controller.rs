//! Integration tests for floor progression, queries and the shared handle.

use std::sync::{Arc, Mutex};

use delve_grid::{Direction, GridCoord, RoomType};
use delve_floor::{
    ConfigError, FloorConfig, FloorController, FloorError, FloorEvent, FloorListener, FloorPhase,
    FloorSnapshot, SharedFloorController,
};
use delve_rooms::{ContentError, PopulationConfig, PrefabCatalog, RoomContent, SpawnRequest};

// =========================================================================
// Mock collaborators
// =========================================================================

/// Counts live rooms so leaks show up as a non-zero count.
#[derive(Debug, Default)]
struct World {
    next_id: u32,
    live: Vec<u32>,
    spawned_total: usize,
    /// Enemy count of every normal room spawned, in order.
    normal_enemies: Vec<usize>,
}

impl RoomContent for World {
    type Handle = u32;

    fn spawn_room(&mut self, request: &SpawnRequest) -> Result<u32, ContentError> {
        if request.room_type == RoomType::Normal {
            self.normal_enemies.push(request.plan.enemies.len());
        }
        self.next_id += 1;
        self.live.push(self.next_id);
        self.spawned_total += 1;
        Ok(self.next_id)
    }

    fn set_door(&mut self, _room: &u32, _dir: Direction, _open: bool) -> Result<(), ContentError> {
        Ok(())
    }

    fn despawn_room(&mut self, room: u32) {
        self.live.retain(|id| *id != room);
    }
}

#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl FloorListener for Journal {
    fn on_floor_generated(&mut self, index: u32, snapshot: &FloorSnapshot) {
        assert_eq!(snapshot.index, index);
        self.0.lock().unwrap().push(format!("floor {index}"));
    }

    fn on_run_completed(&mut self, floors: u32) {
        self.0.lock().unwrap().push(format!("done after {floors}"));
    }

    fn on_floor_cleared(&mut self) {
        self.0.lock().unwrap().push("cleared".into());
    }
}

fn catalog() -> PrefabCatalog {
    PrefabCatalog {
        enemies: vec!["slime".into()],
        items: vec!["heart".into()],
        shop_items: vec!["key".into()],
        bosses: vec!["ogre".into()],
        challenge_rewards: vec![],
    }
}

fn config(seed: u64) -> FloorConfig {
    FloorConfig {
        seed: Some(seed),
        ..FloorConfig::default()
    }
}

fn controller(seed: u64) -> FloorController<World> {
    FloorController::new(config(seed), World::default(), catalog()).unwrap()
}

// =========================================================================
// Construction and config
// =========================================================================

#[test]
fn test_new_controller_has_no_floor() {
    let floors = controller(1);
    assert_eq!(floors.state(), FloorPhase::NoFloor);
    assert_eq!(floors.floor_index(), None);
    assert_eq!(floors.floor_count(), 3);
    assert!(floors.layout().is_none());
    assert!(floors.starting_room_world_position().is_none());
    assert_eq!(floors.seed(), 1);
}

#[test]
fn test_invalid_config_rejected_up_front() {
    let bad = FloorConfig {
        item_room_chance: 2.0,
        ..FloorConfig::default()
    };
    let err = FloorController::new(bad, World::default(), catalog()).err().unwrap();
    assert!(matches!(
        err,
        FloorError::InvalidConfig(ConfigError::ChanceOutOfRange {
            room_type: RoomType::Item,
            ..
        })
    ));
}

#[test]
fn test_set_config_rejects_without_changing_anything() {
    let mut floors = controller(2);
    floors.start_run().unwrap();
    let before = floors.snapshot();

    let err = floors
        .set_config(FloorConfig {
            room_count: 0,
            ..config(2)
        })
        .unwrap_err();
    assert!(matches!(err, FloorError::InvalidConfig(ConfigError::ZeroRooms)));
    assert_eq!(floors.state(), FloorPhase::FloorActive);
    assert_eq!(floors.snapshot(), before);
    assert_eq!(floors.config().room_count, 10);
}

#[test]
fn test_set_config_population_reaches_next_floor() {
    let mut floors = controller(19);
    floors
        .set_config(FloorConfig {
            population: PopulationConfig {
                min_enemies: 9,
                max_enemies: 9,
                ..PopulationConfig::default()
            },
            ..config(19)
        })
        .unwrap();
    floors.start_run().unwrap();

    let counts = &floors.content().normal_enemies;
    assert!(!counts.is_empty());
    assert!(counts.iter().all(|n| *n == 9), "enemy counts {counts:?}");
}

#[test]
fn test_set_config_new_seed_restarts_rng() {
    let mut fresh = controller(77);
    fresh.start_run().unwrap();

    let mut floors = controller(20);
    floors.start_run().unwrap();
    floors.set_config(config(77)).unwrap();
    assert_eq!(floors.seed(), 77);
    // The live floor is untouched until the next one is generated.
    assert_eq!(floors.floor_index(), Some(1));

    floors.clear_floor();
    floors.start_run().unwrap();
    assert_eq!(floors.snapshot(), fresh.snapshot());
}

#[test]
fn test_set_config_same_seed_keeps_stream() {
    let mut a = controller(21);
    let mut b = controller(21);
    a.start_run().unwrap();
    b.start_run().unwrap();

    b.set_config(config(21)).unwrap();
    a.advance_floor().unwrap();
    b.advance_floor().unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}

// =========================================================================
// Generation and queries
// =========================================================================

#[test]
fn test_start_run_builds_floor_one() {
    let mut floors = controller(3);
    let floor = floors.start_run().unwrap();
    assert_eq!(floor.index, 1);
    assert_eq!(floor.layout.graph().len(), 10);
    assert!(floor.content.is_clean());

    assert_eq!(floors.state(), FloorPhase::FloorActive);
    assert_eq!(floors.floor_index(), Some(1));
    assert_eq!(floors.room_type(GridCoord::ORIGIN), Some(RoomType::Start));
    assert_eq!(floors.content().live.len(), 10);
}

#[test]
fn test_world_positions_scale_by_room_distance() {
    let mut floors = controller(4);
    floors.start_run().unwrap();

    let start = floors.starting_room_world_position().unwrap();
    assert_eq!((start.x, start.y), (0.0, 0.0));

    let boss = floors.layout().unwrap().boss().unwrap();
    let pos = floors.boss_room_world_position().unwrap();
    assert_eq!(pos.x, boss.x as f32 * 20.0);
    assert_eq!(pos.y, boss.y as f32 * 20.0);
}

#[test]
fn test_queries_agree_with_snapshot() {
    let mut floors = controller(5);
    floors.start_run().unwrap();
    let snapshot = floors.snapshot().unwrap();

    assert_eq!(snapshot.rooms.len(), 10);
    for room in &snapshot.rooms {
        assert_eq!(floors.room_type(room.coord), Some(room.room_type));
        assert_eq!(floors.door_state(room.coord), Some(room.doors));
        assert!(floors.room_handle(room.coord).is_some());
    }
    assert!(floors.room_type(GridCoord::new(500, 500)).is_none());
    assert_eq!(snapshot.to_graph().unwrap(), *floors.layout().unwrap().graph());
}

#[test]
fn test_same_seed_same_run() {
    let mut a = controller(42);
    let mut b = controller(42);
    for _ in 0..3 {
        if a.floor_index().is_none() {
            a.start_run().unwrap();
            b.start_run().unwrap();
        } else {
            a.advance_floor().unwrap();
            b.advance_floor().unwrap();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_generate_floor_out_of_range() {
    let mut floors = controller(6);
    for index in [0, 4] {
        let err = floors.generate_floor(index).unwrap_err();
        assert!(matches!(
            err,
            FloorError::FloorOutOfRange { floor_count: 3, .. }
        ));
    }
    assert_eq!(floors.state(), FloorPhase::NoFloor);
}

#[test]
fn test_generate_floor_jumps_directly() {
    let mut floors = controller(7);
    floors.generate_floor(3).unwrap();
    assert_eq!(floors.floor_index(), Some(3));
    assert!(floors.snapshot().unwrap().is_final_floor());
}

// =========================================================================
// Progression
// =========================================================================

#[test]
fn test_full_run_reaches_completed() {
    let journal = Journal::default();
    let mut floors = controller(8);
    floors.add_listener(journal.clone());

    floors.start_run().unwrap();
    assert_eq!(floors.advance_floor().unwrap(), FloorPhase::FloorActive);
    assert_eq!(floors.floor_index(), Some(2));
    assert_eq!(floors.advance_to_next_floor().unwrap(), FloorPhase::FloorActive);
    assert_eq!(floors.floor_index(), Some(3));
    assert_eq!(floors.advance_floor().unwrap(), FloorPhase::Completed);

    assert_eq!(floors.state(), FloorPhase::Completed);
    assert!(floors.floor().is_none());
    assert!(floors.content().live.is_empty(), "completed run left rooms behind");
    assert_eq!(
        journal.entries(),
        ["floor 1", "floor 2", "floor 3", "done after 3"]
    );
}

#[test]
fn test_advance_tears_down_previous_floor() {
    let mut floors = controller(9);
    floors.start_run().unwrap();
    floors.advance_floor().unwrap();
    let world = floors.content();
    assert_eq!(world.live.len(), 10);
    assert_eq!(world.spawned_total, 20);
}

#[test]
fn test_operations_rejected_in_wrong_phase() {
    let mut floors = controller(10);
    assert!(matches!(
        floors.advance_floor().unwrap_err(),
        FloorError::InvalidState {
            state: FloorPhase::NoFloor,
            ..
        }
    ));

    floors.start_run().unwrap();
    assert!(matches!(
        floors.start_run().unwrap_err(),
        FloorError::InvalidState {
            state: FloorPhase::FloorActive,
            ..
        }
    ));

    while floors.state() != FloorPhase::Completed {
        floors.advance_floor().unwrap();
    }
    assert!(matches!(
        floors.generate_floor(1).unwrap_err(),
        FloorError::InvalidState {
            state: FloorPhase::Completed,
            ..
        }
    ));
}

#[test]
fn test_clear_floor_resets_from_any_phase() {
    let journal = Journal::default();
    let mut floors = controller(11);
    floors.add_listener(journal.clone());

    assert_eq!(floors.clear_floor(), 0);

    floors.start_run().unwrap();
    assert_eq!(floors.clear_floor(), 10);
    assert_eq!(floors.state(), FloorPhase::NoFloor);
    assert!(floors.content().live.is_empty());

    // A cleared controller can start over.
    floors.start_run().unwrap();
    assert_eq!(floors.floor_index(), Some(1));
    assert_eq!(journal.entries(), ["cleared", "floor 1", "cleared", "floor 1"]);
}

#[test]
fn test_single_floor_run() {
    let mut floors = FloorController::new(
        FloorConfig {
            floor_count: 1,
            ..config(12)
        },
        World::default(),
        catalog(),
    )
    .unwrap();
    floors.start_run().unwrap();
    assert!(floors.snapshot().unwrap().is_final_floor());
    assert_eq!(floors.advance_floor().unwrap(), FloorPhase::Completed);
}

#[test]
fn test_one_room_floor_has_no_boss() {
    let mut floors = FloorController::new(
        FloorConfig {
            room_count: 1,
            ..config(13)
        },
        World::default(),
        catalog(),
    )
    .unwrap();
    floors.start_run().unwrap();
    assert!(floors.boss_room_world_position().is_none());
    assert_eq!(floors.layout().unwrap().graph().len(), 1);
}

#[test]
fn test_bounded_floor_reports_saturation() {
    let mut floors = FloorController::new(
        FloorConfig {
            room_count: 40,
            grid_radius: Some(2),
            ..config(14)
        },
        World::default(),
        catalog(),
    )
    .unwrap();
    let floor = floors.start_run().unwrap();
    assert!(floor.layout.report().saturated);
    assert_eq!(floor.layout.graph().len(), 25);
}

#[test]
fn test_missing_prefabs_do_not_fail_the_floor() {
    let mut floors =
        FloorController::new(config(15), World::default(), PrefabCatalog::default()).unwrap();
    let floor = floors.start_run().unwrap();
    assert!(!floor.content.warnings.is_empty());
    assert!(floor.content.failed.is_empty());
    assert_eq!(floor.content.spawned.len(), 10);
}

// =========================================================================
// SharedFloorController
// =========================================================================

#[tokio::test]
async fn test_shared_controller_broadcasts_events() {
    let shared = SharedFloorController::new(controller(16));
    let mut rx = shared.subscribe();

    let snapshot = shared.start_run().unwrap();
    match rx.recv().await.unwrap() {
        FloorEvent::FloorGenerated { index, snapshot: sent } => {
            assert_eq!(index, 1);
            assert_eq!(sent, snapshot);
        }
        other => panic!("expected FloorGenerated, got {other:?}"),
    }

    shared.advance_floor().unwrap();
    shared.advance_floor().unwrap();
    shared.advance_floor().unwrap();
    assert!(matches!(rx.recv().await.unwrap(), FloorEvent::FloorGenerated { index: 2, .. }));
    assert!(matches!(rx.recv().await.unwrap(), FloorEvent::FloorGenerated { index: 3, .. }));
    assert_eq!(rx.recv().await.unwrap(), FloorEvent::RunCompleted { floors: 3 });
    assert_eq!(shared.state().await, FloorPhase::Completed);
}

#[tokio::test]
async fn test_overlapping_operation_is_busy() {
    let shared = SharedFloorController::new(controller(17));
    let other = shared.clone();
    shared.start_run().unwrap();

    let guard = shared.lock().await;
    assert!(matches!(other.advance_floor(), Err(FloorError::Busy)));
    assert!(matches!(other.clear_floor(), Err(FloorError::Busy)));
    assert_eq!(guard.floor_index(), Some(1));
    drop(guard);

    assert_eq!(other.advance_floor().unwrap(), FloorPhase::FloorActive);
    assert_eq!(shared.snapshot().await.unwrap().index, 2);
}

#[tokio::test]
async fn test_shared_generate_floor_returns_snapshot() {
    let shared = SharedFloorController::new(controller(18));
    let snapshot = shared.generate_floor(2).unwrap();
    assert_eq!(snapshot.index, 2);
    assert_eq!(shared.clear_floor().unwrap(), 10);
    assert!(shared.snapshot().await.is_none());
}
