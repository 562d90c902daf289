//! One full layout pass: build, place specials, resolve doors.

use delve_grid::{DoorState, GridBounds, GridCoord, RoomType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    BossDistance, DoorMap, GraphError, RoomGraph, SpecialRoomChances, build_graph, compute_doors,
    place_special_rooms,
};

/// Inputs to [`generate_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub room_count: usize,
    pub start: GridCoord,
    pub bounds: Option<GridBounds>,
    pub chances: SpecialRoomChances,
    pub boss_distance: BossDistance,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            room_count: 10,
            start: GridCoord::ORIGIN,
            bounds: None,
            chances: SpecialRoomChances::default(),
            boss_distance: BossDistance::default(),
        }
    }
}

/// How a generated floor compares to what was asked for.
///
/// Shortfalls are reported here rather than raised as errors: a
/// saturated or special-less floor is still a valid floor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub target_rooms: usize,
    pub rooms_built: usize,
    pub saturated: bool,
    pub specials_placed: Vec<(RoomType, GridCoord)>,
    pub specials_skipped: bool,
}

/// A finished floor layout: graph, doors, and the two anchor rooms.
#[derive(Debug, Clone)]
pub struct FloorLayout {
    graph: RoomGraph,
    doors: DoorMap,
    boss: Option<GridCoord>,
    report: GenerationReport,
}

impl FloorLayout {
    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn doors(&self) -> &DoorMap {
        &self.doors
    }

    pub fn start(&self) -> GridCoord {
        self.graph.start()
    }

    /// The boss room, if a normal room was left to promote. `None` for a
    /// floor with no room besides the start, and for one whose special
    /// rooms took every normal candidate.
    pub fn boss(&self) -> Option<GridCoord> {
        self.boss
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn room_type(&self, coord: GridCoord) -> Option<RoomType> {
        self.graph.room_type(coord)
    }

    pub fn door_state(&self, coord: GridCoord) -> Option<DoorState> {
        self.doors.get(coord)
    }

    /// Renders the floor as text, north at the top, one glyph per cell.
    pub fn to_ascii(&self) -> String {
        let coords = self.graph.coords();
        let (min_x, max_x) = bounds_of(coords.iter().map(|c| c.x));
        let (min_y, max_y) = bounds_of(coords.iter().map(|c| c.y));

        let mut out = String::new();
        for y in (min_y..=max_y).rev() {
            for x in min_x..=max_x {
                let glyph = self
                    .graph
                    .room_type(GridCoord::new(x, y))
                    .map_or('.', |t| t.glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

fn bounds_of(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values.fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Runs the layout pipeline: grow the graph, place special rooms and the
/// boss, then derive the doors.
///
/// Deterministic for a given `params` and RNG state.
///
/// # Errors
/// Only if special placement hits an invariant violation, which a freshly
/// built graph never does.
pub fn generate_layout<R: Rng + ?Sized>(
    params: &LayoutParams,
    rng: &mut R,
) -> Result<FloorLayout, GraphError> {
    let outcome = build_graph(params.room_count, params.start, params.bounds, rng);
    let mut graph = outcome.graph;

    let placement = place_special_rooms(
        &mut graph,
        params.start,
        &params.chances,
        params.boss_distance,
        rng,
    )?;
    let doors = compute_doors(&graph);

    let report = GenerationReport {
        target_rooms: params.room_count,
        rooms_built: graph.len(),
        saturated: outcome.saturated,
        specials_placed: placement.placed,
        specials_skipped: placement.specials_skipped,
    };
    info!(
        rooms = report.rooms_built,
        target = report.target_rooms,
        saturated = report.saturated,
        specials = report.specials_placed.len(),
        boss = ?placement.boss,
        "floor layout generated"
    );

    Ok(FloorLayout {
        graph,
        doors,
        boss: placement.boss,
        report,
    })
}

/// Wraps an externally edited graph (tooling, fixtures) as a layout,
/// recomputing its doors and taking the boss from the graph itself.
pub fn layout_from_graph(graph: RoomGraph) -> FloorLayout {
    let doors = compute_doors(&graph);
    let report = GenerationReport {
        target_rooms: graph.len(),
        rooms_built: graph.len(),
        saturated: false,
        specials_placed: RoomType::SPECIALS
            .into_iter()
            .filter_map(|t| graph.find(t).map(|c| (t, c)))
            .collect(),
        specials_skipped: false,
    };
    FloorLayout {
        boss: graph.find(RoomType::Boss),
        graph,
        doors,
        report,
    }
}
