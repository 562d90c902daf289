//! End-to-end tests through the `delve` facade: builder, full runs,
//! snapshot encoding and challenge rooms.

use std::collections::HashMap;

use delve::prelude::*;

// =========================================================================
// Mock world: keeps every live room and the plan it was spawned with.
// =========================================================================

#[derive(Default)]
struct Scene {
    next: u64,
    rooms: HashMap<u64, SpawnRequest>,
    open_doors: HashMap<u64, Vec<Direction>>,
}

impl RoomContent for Scene {
    type Handle = u64;

    fn spawn_room(&mut self, request: &SpawnRequest) -> Result<u64, ContentError> {
        self.next += 1;
        self.rooms.insert(self.next, request.clone());
        Ok(self.next)
    }

    fn set_door(&mut self, room: &u64, dir: Direction, open: bool) -> Result<(), ContentError> {
        if open {
            self.open_doors.entry(*room).or_default().push(dir);
        }
        Ok(())
    }

    fn despawn_room(&mut self, room: u64) {
        self.rooms.remove(&room);
        self.open_doors.remove(&room);
    }
}

fn catalog() -> PrefabCatalog {
    PrefabCatalog {
        enemies: vec!["slime".into(), "imp".into()],
        items: vec!["heart".into(), "lens".into()],
        shop_items: vec!["bomb".into(), "key".into(), "map".into()],
        bosses: vec!["lich".into()],
        challenge_rewards: vec!["relic".into()],
    }
}

// =========================================================================
// Builder
// =========================================================================

#[test]
fn test_builder_applies_settings() -> Result<(), DelveError> {
    let floors = delve::builder()
        .seed(7)
        .floors(5)
        .rooms(12)
        .catalog(catalog())
        .build(Scene::default())?;
    assert_eq!(floors.floor_count(), 5);
    assert_eq!(floors.config().room_count, 12);
    assert_eq!(floors.seed(), 7);
    Ok(())
}

#[test]
fn test_builder_from_json() -> Result<(), DelveError> {
    let floors = delve::builder()
        .config_json(r#"{"floor_count": 2, "boss_distance": "GraphHops"}"#)?
        .build(Scene::default())?;
    assert_eq!(floors.floor_count(), 2);
    assert_eq!(floors.config().boss_distance, BossDistance::GraphHops);
    Ok(())
}

#[test]
fn test_builder_rejects_bad_json_as_config_error() {
    let err = delve::builder().config_json(r#"{"room_count": 0}"#).unwrap_err();
    assert!(matches!(err, DelveError::Config(_)));
}

#[test]
fn test_builder_rejects_invalid_settings_on_build() {
    let err = delve::builder()
        .floors(0)
        .build(Scene::default())
        .err()
        .unwrap();
    assert!(matches!(err, DelveError::Floor(FloorError::InvalidConfig(_))));
}

// =========================================================================
// Full run
// =========================================================================

#[test]
fn test_scene_mirrors_each_floor() -> Result<(), DelveError> {
    let mut floors = delve::builder().seed(99).catalog(catalog()).build(Scene::default())?;
    floors.start_run()?;

    loop {
        let snapshot = floors.snapshot().expect("active floor");
        let scene = floors.content();
        assert_eq!(scene.rooms.len(), snapshot.rooms.len());

        for room in &snapshot.rooms {
            let handle = *floors.room_handle(room.coord).expect("spawned");
            let spawned = &scene.rooms[&handle];
            assert_eq!(spawned.room_type, room.room_type);
            let open = scene.open_doors.get(&handle).map_or(0, Vec::len);
            assert_eq!(open as u32, room.doors.open_count());
        }

        if floors.advance_floor()? == FloorPhase::Completed {
            break;
        }
    }

    assert!(floors.content().rooms.is_empty());
    Ok(())
}

#[test]
fn test_snapshot_survives_json() -> Result<(), DelveError> {
    let mut floors = delve::builder().seed(5).catalog(catalog()).build(Scene::default())?;
    floors.start_run()?;
    let snapshot = floors.snapshot().expect("active floor");

    let codec = JsonCodec;
    let bytes = codec.encode(&snapshot)?;
    let back: FloorSnapshot = codec.decode(&bytes)?;
    assert_eq!(back, snapshot);

    let graph = back.to_graph()?;
    assert_eq!(&graph, floors.layout().expect("active floor").graph());
    Ok(())
}

#[test]
fn test_challenge_room_runs_to_reward() -> Result<(), DelveError> {
    let mut floors = delve::builder()
        .config(FloorConfig {
            challenge_room_chance: 1.0,
            seed: Some(3),
            ..FloorConfig::default()
        })
        .catalog(catalog())
        .build(Scene::default())?;
    floors.start_run()?;

    let coord = floors
        .layout()
        .and_then(|l| l.graph().find(RoomType::Challenge))
        .expect("challenge room placed");
    let handle = *floors.room_handle(coord).expect("spawned");
    let setup = floors.content().rooms[&handle]
        .plan
        .challenge
        .clone()
        .expect("challenge plan");

    let mut challenge = setup.controller();
    let mut events = challenge.start()?;
    let mut reward = None;
    while !challenge.is_completed() {
        events.extend(challenge.enemy_defeated()?);
        for event in events.drain(..) {
            if let WaveEvent::ChallengeCompleted { reward: r } = event {
                reward = r;
            }
        }
    }
    assert_eq!(reward, Some(PrefabId::from("relic")));
    assert!(matches!(
        challenge.enemy_defeated(),
        Err(delve::waves::WaveError::NotRunning(ChallengeState::Completed))
    ));
    Ok(())
}

// =========================================================================
// Shared controller
// =========================================================================

#[tokio::test]
async fn test_shared_run_through_facade() -> Result<(), DelveError> {
    let shared = delve::builder()
        .seed(11)
        .floors(2)
        .catalog(catalog())
        .build_shared(Scene::default())?;
    let mut events = shared.subscribe();

    shared.start_run()?;
    shared.advance_floor()?;
    assert_eq!(shared.advance_floor()?, FloorPhase::Completed);

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2], FloorEvent::RunCompleted { floors: 2 });
    Ok(())
}
