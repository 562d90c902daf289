//! Deriving each room's door mask from the room graph.
//!
//! Doors are never stored as authority. They are a pure function of the
//! graph, so recomputing after any edit (tooling, debug) always agrees
//! with the graph it came from.

use std::collections::HashMap;

use delve_grid::{Direction, DoorState, GridCoord};

use crate::RoomGraph;

/// Door masks for every room on a floor, in graph order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorMap {
    doors: HashMap<GridCoord, DoorState>,
    order: Vec<GridCoord>,
}

impl DoorMap {
    pub fn get(&self, coord: GridCoord) -> Option<DoorState> {
        self.doors.get(&coord).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(coord, doors)` pairs in graph order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, DoorState)> + '_ {
        self.order.iter().map(|c| (*c, self.doors[c]))
    }
}

/// Door mask of a single room, or `None` if `coord` is not a room.
///
/// A door is open iff the neighbour it faces is a room.
pub fn doors_at(graph: &RoomGraph, coord: GridCoord) -> Option<DoorState> {
    if !graph.contains(coord) {
        return None;
    }
    let mask = Direction::ALL
        .into_iter()
        .filter(|dir| graph.contains(coord.step(*dir)))
        .fold(DoorState::empty(), |acc, dir| acc | dir.door());
    Some(mask)
}

/// Door masks for every room in `graph`.
pub fn compute_doors(graph: &RoomGraph) -> DoorMap {
    let mut map = DoorMap {
        doors: HashMap::with_capacity(graph.len()),
        order: Vec::with_capacity(graph.len()),
    };
    for &coord in graph.coords() {
        if let Some(mask) = doors_at(graph, coord) {
            map.doors.insert(coord, mask);
            map.order.push(coord);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_grid::RoomType;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    /// A plus sign centred on the start.
    fn plus() -> RoomGraph {
        RoomGraph::from_rooms([
            (c(0, 0), RoomType::Start),
            (c(0, 1), RoomType::Normal),
            (c(0, -1), RoomType::Normal),
            (c(1, 0), RoomType::Normal),
            (c(-1, 0), RoomType::Boss),
        ])
        .unwrap()
    }

    #[test]
    fn test_centre_of_plus_has_all_doors() {
        assert_eq!(doors_at(&plus(), c(0, 0)), Some(DoorState::all()));
    }

    #[test]
    fn test_arm_has_single_door_back() {
        let g = plus();
        assert_eq!(doors_at(&g, c(0, 1)), Some(DoorState::SOUTH));
        assert_eq!(doors_at(&g, c(0, -1)), Some(DoorState::NORTH));
        assert_eq!(doors_at(&g, c(1, 0)), Some(DoorState::WEST));
        assert_eq!(doors_at(&g, c(-1, 0)), Some(DoorState::EAST));
    }

    #[test]
    fn test_diagonal_rooms_do_not_open_doors() {
        let g = RoomGraph::from_rooms([
            (c(0, 0), RoomType::Start),
            (c(1, 0), RoomType::Normal),
            (c(1, 1), RoomType::Normal),
        ])
        .unwrap();
        assert_eq!(doors_at(&g, c(0, 0)), Some(DoorState::EAST));
    }

    #[test]
    fn test_unknown_room_has_no_doors() {
        assert_eq!(doors_at(&plus(), c(5, 5)), None);
    }

    #[test]
    fn test_compute_doors_covers_every_room_in_order() {
        let g = plus();
        let doors = compute_doors(&g);
        assert_eq!(doors.len(), g.len());
        let order: Vec<GridCoord> = doors.iter().map(|(c, _)| c).collect();
        assert_eq!(order, g.coords());
    }

    #[test]
    fn test_recompute_after_edit_tracks_graph() {
        let mut g = plus();
        let before = compute_doors(&g);
        g.insert_adjacent(c(1, 1), RoomType::Normal).unwrap();
        let after = compute_doors(&g);
        assert_ne!(before, after);
        assert_eq!(after.get(c(1, 0)), Some(DoorState::WEST | DoorState::NORTH));
        assert_eq!(after.get(c(0, 1)), Some(DoorState::SOUTH | DoorState::EAST));
    }
}
