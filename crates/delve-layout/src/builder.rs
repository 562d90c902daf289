//! Growing the base room graph from a single start cell.
//!
//! The builder keeps a *frontier*: rooms that may still have a vacant
//! neighbour. Each step picks a frontier room uniformly at random and
//! attaches one of its vacant neighbours, also at random. Picking from the
//! whole frontier (instead of the newest room) is what keeps floors from
//! degenerating into long corridors.
//!
//! ```text
//!   step 0        step 1        step 2        step 3
//!
//!     S            S #           S #           S #
//!                                  #         # #
//! ```

use delve_grid::{GridBounds, GridCoord, RoomType};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::RoomGraph;

/// Result of a build: the graph plus whether growth ran out of room.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: RoomGraph,
    /// `true` when the bounded grid filled up before the target count was
    /// reached. A saturated floor is smaller but still valid.
    pub saturated: bool,
}

/// Grows a connected graph of `target_room_count` rooms around `start`.
///
/// Every room except the start is `Normal`. With `bounds`, growth never
/// leaves the bounded square, and the build stops early (with
/// `saturated = true`) once no frontier room has a vacant in-bounds
/// neighbour. Without bounds the target is always reached.
///
/// A target of 0 or 1 yields just the start room.
pub fn build_graph<R: Rng + ?Sized>(
    target_room_count: usize,
    start: GridCoord,
    bounds: Option<GridBounds>,
    rng: &mut R,
) -> BuildOutcome {
    let in_bounds = |coord: GridCoord| bounds.is_none_or(|b| b.contains(coord));

    let mut graph = RoomGraph::new(start);
    let mut frontier = vec![start];
    let mut saturated = false;

    while graph.len() < target_room_count {
        if frontier.is_empty() {
            saturated = true;
            break;
        }

        let idx = rng.random_range(0..frontier.len());
        let cell = frontier[idx];
        let vacant: Vec<GridCoord> = graph.vacant_neighbors(cell).filter(|n| in_bounds(*n)).collect();
        if vacant.is_empty() {
            // Nothing left to grow from here; it never comes back.
            frontier.swap_remove(idx);
            continue;
        }

        let next = vacant[rng.random_range(0..vacant.len())];
        match graph.insert_adjacent(next, RoomType::Normal) {
            Ok(()) => {
                trace!(from = %cell, room = %next, "room attached");
                frontier.push(next);
            }
            Err(err) => {
                warn!(%err, room = %next, "frontier produced an invalid cell");
                frontier.swap_remove(idx);
            }
        }
    }

    if saturated {
        debug!(
            target = target_room_count,
            built = graph.len(),
            "grid saturated before reaching target room count"
        );
    } else {
        debug!(rooms = graph.len(), "room graph built");
    }

    BuildOutcome { graph, saturated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reaches_target_when_unbounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let out = build_graph(25, GridCoord::ORIGIN, None, &mut rng);
        assert_eq!(out.graph.len(), 25);
        assert!(!out.saturated);
        assert!(out.graph.is_connected());
    }

    #[test]
    fn test_all_new_rooms_are_normal() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let out = build_graph(12, GridCoord::new(3, 3), None, &mut rng);
        assert_eq!(out.graph.count_of(RoomType::Start), 1);
        assert_eq!(out.graph.count_of(RoomType::Normal), 11);
        assert_eq!(out.graph.room_type(GridCoord::new(3, 3)), Some(RoomType::Start));
    }

    #[test]
    fn test_target_of_one_is_start_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = build_graph(1, GridCoord::ORIGIN, None, &mut rng);
        assert_eq!(out.graph.len(), 1);
        assert!(!out.saturated);
    }

    #[test]
    fn test_saturates_inside_small_bounds() {
        let bounds = GridBounds::new(GridCoord::ORIGIN, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = build_graph(20, GridCoord::ORIGIN, Some(bounds), &mut rng);
        assert!(out.saturated);
        assert_eq!(out.graph.len(), bounds.capacity());
        assert!(out.graph.coords().iter().all(|c| bounds.contains(*c)));
        assert!(out.graph.is_connected());
    }

    #[test]
    fn test_zero_radius_bounds_saturate_immediately() {
        let bounds = GridBounds::new(GridCoord::ORIGIN, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = build_graph(5, GridCoord::ORIGIN, Some(bounds), &mut rng);
        assert!(out.saturated);
        assert_eq!(out.graph.len(), 1);
    }
}
