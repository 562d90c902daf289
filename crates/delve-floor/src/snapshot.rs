//! Serializable view of a floor for minimaps, UI and debug dumps.

use delve_grid::{DoorState, GridCoord, RoomType};
use delve_layout::{GenerationReport, GraphError, RoomGraph};
use serde::{Deserialize, Serialize};

use crate::FloorState;

/// One room as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub coord: GridCoord,
    pub room_type: RoomType,
    pub doors: DoorState,
}

/// A self-contained picture of the live floor.
///
/// Plain data: holding one does not keep the floor alive, and it stays
/// valid after the controller moves on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    /// 1-based floor number.
    pub index: u32,
    pub floor_count: u32,
    pub start: GridCoord,
    pub boss: Option<GridCoord>,
    /// Rooms in generation order.
    pub rooms: Vec<RoomSnapshot>,
    pub report: GenerationReport,
}

impl FloorSnapshot {
    pub fn capture(floor: &FloorState, floor_count: u32) -> Self {
        let layout = &floor.layout;
        let rooms = layout
            .graph()
            .iter()
            .map(|(coord, room_type)| RoomSnapshot {
                coord,
                room_type,
                doors: layout.door_state(coord).unwrap_or_default(),
            })
            .collect();
        Self {
            index: floor.index,
            floor_count,
            start: layout.start(),
            boss: layout.boss(),
            rooms,
            report: layout.report().clone(),
        }
    }

    pub fn room(&self, coord: GridCoord) -> Option<&RoomSnapshot> {
        self.rooms.iter().find(|r| r.coord == coord)
    }

    /// Rebuilds the room graph, re-checking every graph invariant.
    /// Useful for tooling that loads a dumped floor.
    pub fn to_graph(&self) -> Result<RoomGraph, GraphError> {
        RoomGraph::from_rooms(self.rooms.iter().map(|r| (r.coord, r.room_type)))
    }

    /// `true` on the last floor of the run.
    pub fn is_final_floor(&self) -> bool {
        self.index >= self.floor_count
    }
}
