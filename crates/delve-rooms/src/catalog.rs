//! Prefab pools and per-room content planning.

use delve_grid::{PrefabId, RoomType};
use delve_waves::{
    ChallengeController, RoomDimensions, WaveConfig, WaveError, WavePlan, WaveSpawn,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ContentError;

// ---------------------------------------------------------------------------
// PrefabCatalog
// ---------------------------------------------------------------------------

/// The pools content is drawn from, one per kind of thing a room holds.
///
/// Secret rooms draw from `items`. Challenge rewards fall back to `items`
/// when `challenge_rewards` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefabCatalog {
    pub enemies: Vec<PrefabId>,
    pub items: Vec<PrefabId>,
    pub shop_items: Vec<PrefabId>,
    pub bosses: Vec<PrefabId>,
    pub challenge_rewards: Vec<PrefabId>,
}

// ---------------------------------------------------------------------------
// PopulationConfig
// ---------------------------------------------------------------------------

/// How densely rooms are populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Fewest enemies in a normal room.
    pub min_enemies: u32,
    /// Most enemies in a normal room.
    pub max_enemies: u32,
    /// Distinct items offered by a shop, pool permitting.
    pub shop_stock: usize,
    /// Interior size used to scatter spawns.
    pub room_dimensions: RoomDimensions,
    /// Waves run by challenge rooms.
    pub challenge: WaveConfig,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            min_enemies: 2,
            max_enemies: 5,
            shop_stock: 3,
            room_dimensions: RoomDimensions::default(),
            challenge: WaveConfig::default(),
        }
    }
}

impl PopulationConfig {
    /// Fix out-of-range values: `min_enemies` is lowered to `max_enemies`
    /// when the two cross.
    pub fn validated(mut self) -> Self {
        if self.min_enemies > self.max_enemies {
            warn!(
                min = self.min_enemies,
                max = self.max_enemies,
                "min_enemies exceeds max_enemies, clamping"
            );
            self.min_enemies = self.max_enemies;
        }
        self.challenge = self.challenge.validated();
        self
    }
}

// ---------------------------------------------------------------------------
// RoomPlan
// ---------------------------------------------------------------------------

/// A challenge room's encounter: its waves and what clearing them pays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSetup {
    pub waves: WavePlan,
    pub reward: Option<PrefabId>,
}

impl ChallengeSetup {
    /// A fresh, idle controller for this encounter.
    pub fn controller(&self) -> ChallengeController {
        ChallengeController::new(self.waves.clone(), self.reward.clone())
    }
}

/// What goes inside one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPlan {
    pub room_type: RoomType,
    /// Enemies present when the player walks in.
    pub enemies: Vec<WaveSpawn>,
    /// Pickups (item and secret rooms) or wares (shops).
    pub items: Vec<PrefabId>,
    pub boss: Option<PrefabId>,
    pub challenge: Option<ChallengeSetup>,
}

impl RoomPlan {
    /// A room with nothing in it.
    pub fn empty(room_type: RoomType) -> Self {
        Self {
            room_type,
            enemies: Vec::new(),
            items: Vec::new(),
            boss: None,
            challenge: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.items.is_empty()
            && self.boss.is_none()
            && self.challenge.is_none()
    }
}

/// Chooses the content of a room of `room_type`.
///
/// | Room      | Content                                              |
/// |-----------|------------------------------------------------------|
/// | Start     | nothing                                              |
/// | Normal    | `min_enemies..=max_enemies` enemies, scattered       |
/// | Item      | one item                                             |
/// | Secret    | one item                                             |
/// | Shop      | up to `shop_stock` distinct shop items               |
/// | Challenge | a wave plan and a reward                             |
/// | Boss      | one boss                                             |
///
/// # Errors
/// [`ContentError::MissingPrefab`] when the pool a room needs is empty.
pub fn plan_room<R: Rng + ?Sized>(
    room_type: RoomType,
    catalog: &PrefabCatalog,
    population: &PopulationConfig,
    rng: &mut R,
) -> Result<RoomPlan, ContentError> {
    let mut plan = RoomPlan::empty(room_type);
    let missing = |pool| ContentError::MissingPrefab { room_type, pool };

    match room_type {
        RoomType::Start => {}
        RoomType::Normal => {
            let lo = population.min_enemies.min(population.max_enemies);
            let count = rng.random_range(lo..=population.max_enemies);
            // A single wave of `count` is exactly a scattered group.
            let group = WaveConfig {
                waves: 1,
                base_enemies: count,
                enemies_per_wave: 0,
                spawn_extent: population.challenge.spawn_extent,
            };
            let plan_of_one =
                WavePlan::roll(&group, &catalog.enemies, population.room_dimensions, rng)
                    .map_err(|_| missing("enemies"))?;
            plan.enemies = plan_of_one.wave(0).map(|w| w.to_vec()).unwrap_or_default();
        }
        RoomType::Item | RoomType::Secret => {
            let item = catalog.items.choose(rng).ok_or_else(|| missing("items"))?;
            plan.items.push(item.clone());
        }
        RoomType::Shop => {
            if catalog.shop_items.is_empty() {
                return Err(missing("shop_items"));
            }
            plan.items = catalog
                .shop_items
                .choose_multiple(rng, population.shop_stock)
                .cloned()
                .collect();
        }
        RoomType::Challenge => {
            let waves = WavePlan::roll(
                &population.challenge,
                &catalog.enemies,
                population.room_dimensions,
                rng,
            )
            .map_err(|err| match err {
                WaveError::EmptyPool => missing("enemies"),
                other => ContentError::Collaborator(other.to_string()),
            })?;
            let rewards = if catalog.challenge_rewards.is_empty() {
                &catalog.items
            } else {
                &catalog.challenge_rewards
            };
            plan.challenge = Some(ChallengeSetup {
                waves,
                reward: rewards.choose(rng).cloned(),
            });
        }
        RoomType::Boss => {
            let boss = catalog.bosses.choose(rng).ok_or_else(|| missing("bosses"))?;
            plan.boss = Some(boss.clone());
        }
    }

    Ok(plan)
}
