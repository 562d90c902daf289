//! Walks a seeded run from the first floor to the last, printing each map.
//!
//! ```text
//! cargo run -p floor-walk -- [seed] [config.json]
//! ```

use std::collections::HashMap;

use delve::prelude::*;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Console world
// ---------------------------------------------------------------------------

/// A stand-in for a game scene: remembers what each room was spawned with.
#[derive(Default)]
struct ConsoleWorld {
    next_id: u32,
    rooms: HashMap<u32, SpawnRequest>,
}

impl ConsoleWorld {
    fn plan(&self, id: u32) -> Option<&RoomPlan> {
        self.rooms.get(&id).map(|r| &r.plan)
    }
}

impl RoomContent for ConsoleWorld {
    type Handle = u32;

    fn spawn_room(&mut self, request: &SpawnRequest) -> Result<u32, ContentError> {
        self.next_id += 1;
        tracing::trace!(
            id = self.next_id,
            room = %request.coord,
            kind = %request.room_type,
            enemies = request.plan.enemies.len(),
            "spawn"
        );
        self.rooms.insert(self.next_id, request.clone());
        Ok(self.next_id)
    }

    fn set_door(&mut self, room: &u32, dir: Direction, open: bool) -> Result<(), ContentError> {
        if !self.rooms.contains_key(room) {
            return Err(ContentError::Collaborator(format!("no room #{room} for {dir} door")));
        }
        tracing::trace!(id = room, door = %dir, open, "door");
        Ok(())
    }

    fn despawn_room(&mut self, room: u32) {
        self.rooms.remove(&room);
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

fn describe(plan: &RoomPlan) -> String {
    let mut parts = Vec::new();
    if !plan.enemies.is_empty() {
        parts.push(format!("{} enemies", plan.enemies.len()));
    }
    if !plan.items.is_empty() {
        let names: Vec<&str> = plan.items.iter().map(PrefabId::as_str).collect();
        parts.push(names.join(", "));
    }
    if let Some(boss) = &plan.boss {
        parts.push(format!("boss {boss}"));
    }
    if let Some(setup) = &plan.challenge {
        parts.push(format!("{} waves", setup.waves.wave_count()));
    }
    if parts.is_empty() {
        "empty".into()
    } else {
        parts.join("; ")
    }
}

/// Plays a challenge room to the end and returns its reward.
fn clear_challenge(setup: &delve::rooms::ChallengeSetup) -> Result<Option<PrefabId>, DelveError> {
    let mut challenge = setup.controller();
    let mut pending = challenge.start()?;
    loop {
        for event in pending.drain(..) {
            match event {
                WaveEvent::WaveStarted { wave, total, spawns } => {
                    println!("    wave {wave}/{total}: {} enemies", spawns.len());
                }
                WaveEvent::ChallengeCompleted { reward } => return Ok(reward),
            }
        }
        pending = challenge.enemy_defeated()?;
    }
}

fn catalog() -> PrefabCatalog {
    PrefabCatalog {
        enemies: ["slime", "bat", "skeleton", "imp"].map(PrefabId::from).to_vec(),
        items: ["heart", "lens", "boots"].map(PrefabId::from).to_vec(),
        shop_items: ["bomb", "key", "map", "potion"].map(PrefabId::from).to_vec(),
        bosses: ["lich", "ogre"].map(PrefabId::from).to_vec(),
        challenge_rewards: ["relic"].map(PrefabId::from).to_vec(),
    }
}

#[tokio::main]
async fn main() -> Result<(), DelveError> {
    delve::telemetry::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let mut builder = delve::builder();
    if let Some(path) = args.next() {
        match std::fs::read_to_string(&path) {
            Ok(json) => builder = builder.config_json(&json)?,
            Err(err) => warn!(%path, error = %err, "config not readable, using defaults"),
        }
    }

    let floors = builder.seed(seed).catalog(catalog()).build_shared(ConsoleWorld::default())?;

    let mut events = floors.subscribe();
    let watcher = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                FloorEvent::FloorGenerated { index, snapshot } => {
                    info!(floor = index, rooms = snapshot.rooms.len(), "minimap updated");
                }
                FloorEvent::RunCompleted { floors } => {
                    info!(floors, "run complete");
                    break;
                }
                FloorEvent::FloorCleared => {}
            }
        }
    });

    let first = floors.start_run()?;
    println!("{}", JsonCodec.encode_pretty(&first.report)?);

    loop {
        {
            let controller = floors.lock().await;
            let Some(floor) = controller.floor() else {
                break;
            };
            println!("\n== floor {}/{} ==", floor.index, controller.floor_count());
            print!("{}", floor.layout.to_ascii());

            for (coord, room_type) in floor.layout.graph().iter() {
                let Some(plan) = controller
                    .room_handle(coord)
                    .and_then(|id| controller.content().plan(*id))
                else {
                    continue;
                };
                let (at, kind) = (coord.to_string(), room_type.to_string());
                println!("  {at:>9} {kind:<9} {}", describe(plan));
                if let Some(setup) = &plan.challenge {
                    let reward = clear_challenge(setup)?;
                    println!("    reward: {}", reward.map_or("none".into(), |r| r.to_string()));
                }
            }
        }

        // Boss down: take the exit.
        if floors.advance_floor()? == FloorPhase::Completed {
            break;
        }
    }

    if let Err(err) = watcher.await {
        warn!(error = %err, "event watcher stopped");
    }
    Ok(())
}
