//! Promoting normal rooms to special rooms and choosing the boss room.

use delve_grid::{GridCoord, RoomType};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GraphError, RoomGraph};

/// Below this many normal rooms the optional specials are not placed.
pub const MIN_SPECIAL_CANDIDATES: usize = 4;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Probability of each optional special room appearing on a floor.
///
/// Each value must be within `0.0..=1.0`; `1.0` always places the room
/// (pool permitting) and `0.0` never does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialRoomChances {
    pub item: f64,
    pub shop: f64,
    pub secret: f64,
    pub challenge: f64,
}

impl Default for SpecialRoomChances {
    fn default() -> Self {
        Self {
            item: 0.8,
            shop: 0.6,
            secret: 0.3,
            challenge: 0.4,
        }
    }
}

impl SpecialRoomChances {
    /// Every special room is placed whenever the pool allows.
    pub const ALWAYS: Self = Self {
        item: 1.0,
        shop: 1.0,
        secret: 1.0,
        challenge: 1.0,
    };

    /// No optional special rooms; only the boss is placed.
    pub const NEVER: Self = Self {
        item: 0.0,
        shop: 0.0,
        secret: 0.0,
        challenge: 0.0,
    };

    /// The chance configured for `room_type`; 0 for non-optional types.
    pub fn chance(&self, room_type: RoomType) -> f64 {
        match room_type {
            RoomType::Item => self.item,
            RoomType::Shop => self.shop,
            RoomType::Secret => self.secret,
            RoomType::Challenge => self.challenge,
            _ => 0.0,
        }
    }

    /// The first chance outside `0.0..=1.0` (NaN included), if any.
    pub fn first_invalid(&self) -> Option<(RoomType, f64)> {
        RoomType::SPECIALS
            .into_iter()
            .map(|t| (t, self.chance(t)))
            .find(|(_, p)| !(0.0..=1.0).contains(p))
    }
}

/// How "far from the start" is measured when picking the boss room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossDistance {
    /// Straight-line distance between cell centres. Can pick a room that
    /// is geometrically far but only a few hops away when the floor
    /// snakes back toward the start.
    #[default]
    Euclidean,
    /// Shortest-path length through the room graph.
    GraphHops,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// What [`place_special_rooms`] did to the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Optional specials that were placed, in placement order.
    pub placed: Vec<(RoomType, GridCoord)>,
    /// The boss room, if a normal room was left to promote.
    pub boss: Option<GridCoord>,
    /// `true` when fewer than [`MIN_SPECIAL_CANDIDATES`] normal rooms
    /// existed and the optional specials were not attempted.
    pub specials_skipped: bool,
}

/// Reclassifies normal rooms into special rooms, then picks the boss.
///
/// 1. Candidates are every `Normal` room, in graph order.
/// 2. With at least [`MIN_SPECIAL_CANDIDATES`] candidates, the list is
///    shuffled and Item, Shop, Secret, Challenge each roll their chance in
///    that order. A success takes the front of the shuffled list, so
///    earlier types get first pick of a shrinking pool.
/// 3. The remaining candidate farthest from `start` under `metric`
///    becomes the boss. Ties keep the first one encountered.
///
/// The start room is never touched.
///
/// # Errors
/// Propagates [`GraphError`] if the graph already contains one of the
/// unique types being assigned.
pub fn place_special_rooms<R: Rng + ?Sized>(
    graph: &mut RoomGraph,
    start: GridCoord,
    chances: &SpecialRoomChances,
    metric: BossDistance,
    rng: &mut R,
) -> Result<PlacementReport, GraphError> {
    let mut candidates: Vec<GridCoord> = graph.rooms_of_type(RoomType::Normal).collect();
    let mut report = PlacementReport::default();

    if candidates.len() < MIN_SPECIAL_CANDIDATES {
        debug!(
            candidates = candidates.len(),
            "too few normal rooms, skipping optional specials"
        );
        report.specials_skipped = true;
    } else {
        candidates.shuffle(rng);
        // Front of the shuffled pool is consumed first; reversing lets us pop.
        candidates.reverse();
        for room_type in RoomType::SPECIALS {
            if !roll(rng, chances.chance(room_type)) {
                continue;
            }
            let Some(coord) = candidates.pop() else {
                break;
            };
            graph.set_type(coord, room_type)?;
            debug!(%room_type, room = %coord, "special room placed");
            report.placed.push((room_type, coord));
        }
        candidates.reverse();
    }

    if let Some(boss) = farthest(graph, start, &candidates, metric) {
        graph.set_type(boss, RoomType::Boss)?;
        debug!(room = %boss, ?metric, "boss room placed");
        report.boss = Some(boss);
    }

    Ok(report)
}

/// One Bernoulli trial. Out-of-range chances (NaN included) never succeed.
fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    if chance >= 1.0 {
        true
    } else if chance > 0.0 {
        rng.random_bool(chance)
    } else {
        false
    }
}

fn farthest(
    graph: &RoomGraph,
    start: GridCoord,
    candidates: &[GridCoord],
    metric: BossDistance,
) -> Option<GridCoord> {
    let hops = match metric {
        BossDistance::GraphHops => Some(graph.hop_distances(start)),
        BossDistance::Euclidean => None,
    };
    let distance = |coord: GridCoord| -> Option<f64> {
        match &hops {
            Some(hops) => hops.get(&coord).map(|h| f64::from(*h)),
            None => Some(start.euclidean(coord)),
        }
    };

    let mut best: Option<(GridCoord, f64)> = None;
    for &coord in candidates {
        let Some(d) = distance(coord) else {
            continue;
        };
        // Strict comparison keeps the first candidate on ties.
        if best.is_none_or(|(_, max)| d > max) {
            best = Some((coord, d));
        }
    }
    best.map(|(coord, _)| coord)
}
