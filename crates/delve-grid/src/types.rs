//! Value types for addressing rooms on the floor lattice.
//!
//! Everything in here is plain data: coordinates, directions, room kinds,
//! door masks and world positions. None of these types know about graphs
//! or generation. They are the vocabulary the other crates speak.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GridCoord
// ---------------------------------------------------------------------------

/// A cell on the integer room lattice.
///
/// `+y` points North and `+x` points East. Two coordinates are equal when
/// both components are equal, which is also how they hash, so a
/// `GridCoord` is the natural key for any per-room map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    /// The lattice origin, where the first floor's start room sits by default.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// All four 4-connected neighbours, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [(Direction, GridCoord); 4] {
        Direction::ALL.map(|dir| (dir, self.step(dir)))
    }

    /// Returns `true` if `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.manhattan(other) == 1
    }

    /// Straight-line distance between the two cell centres.
    pub fn euclidean(self, other: GridCoord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Taxicab distance; a lower bound for the hop count between two rooms.
    pub fn manhattan(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Maps the cell to world space: both axes scaled by `room_distance`.
    pub fn to_world(self, room_distance: f32) -> WorldPos {
        WorldPos {
            x: self.x as f32 * room_distance,
            y: self.y as f32 * room_distance,
        }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal directions a door can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed iteration order used everywhere doors are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit offset `(dx, dy)` of a single step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// The single door bit for this direction.
    pub const fn door(self) -> DoorState {
        match self {
            Self::North => DoorState::NORTH,
            Self::South => DoorState::SOUTH,
            Self::East => DoorState::EAST,
            Self::West => DoorState::WEST,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::South => write!(f, "south"),
            Self::East => write!(f, "east"),
            Self::West => write!(f, "west"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomType
// ---------------------------------------------------------------------------

/// The functional role of a room on a floor.
///
/// A floor always has exactly one `Start`, exactly one `Boss` (as long as
/// there was a normal room left to promote), and at most one of each of
/// the optional specials. Everything else is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Start,
    Normal,
    Item,
    Shop,
    Secret,
    Challenge,
    Boss,
}

impl RoomType {
    /// Optional special rooms, in the order they get first pick of the
    /// candidate pool.
    pub const SPECIALS: [RoomType; 4] = [
        RoomType::Item,
        RoomType::Shop,
        RoomType::Secret,
        RoomType::Challenge,
    ];

    /// Returns `true` for every type that must appear at most once per floor.
    pub fn is_unique(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Single-character glyph used by map dumps.
    pub fn glyph(&self) -> char {
        match self {
            Self::Start => 'S',
            Self::Normal => '#',
            Self::Item => 'I',
            Self::Shop => '$',
            Self::Secret => '?',
            Self::Challenge => 'C',
            Self::Boss => 'B',
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Normal => write!(f, "Normal"),
            Self::Item => write!(f, "Item"),
            Self::Shop => write!(f, "Shop"),
            Self::Secret => write!(f, "Secret"),
            Self::Challenge => write!(f, "Challenge"),
            Self::Boss => write!(f, "Boss"),
        }
    }
}

// ---------------------------------------------------------------------------
// DoorState
// ---------------------------------------------------------------------------

bitflags! {
    /// Which of a room's four doors lead somewhere.
    ///
    /// A set bit means the neighbour in that direction is part of the
    /// floor and the door is open; a clear bit means the door is sealed.
    /// Always derived from the room graph, never stored as authority.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DoorState: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST = 0b0100;
        const WEST = 0b1000;
    }
}

impl DoorState {
    /// Returns `true` if the door facing `dir` is open.
    pub fn is_open(&self, dir: Direction) -> bool {
        self.contains(dir.door())
    }

    /// Number of open doors.
    pub fn open_count(&self) -> u32 {
        self.bits().count_ones()
    }
}

// ---------------------------------------------------------------------------
// PrefabId
// ---------------------------------------------------------------------------

/// Identifier of a piece of content (enemy, item, boss, reward) owned by
/// the game's content collaborator.
///
/// Generation only picks identifiers; it never looks inside them.
/// `#[serde(transparent)]` keeps it a plain string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabId(pub String);

impl PrefabId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrefabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrefabId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// WorldPos
// ---------------------------------------------------------------------------

/// A position in world space, as consumed by rendering and spawning.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GridBounds
// ---------------------------------------------------------------------------

/// A square region of the lattice that generation may not leave.
///
/// `radius` is measured per axis from `center`, so a radius of 1 allows a
/// 3x3 block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub center: GridCoord,
    pub radius: u32,
}

impl GridBounds {
    pub const fn new(center: GridCoord, radius: u32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.center.x.abs_diff(coord.x) <= self.radius
            && self.center.y.abs_diff(coord.y) <= self.radius
    }

    /// Number of cells inside the bounds.
    pub fn capacity(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }
}

// =========================================================================
// Tests
// =========================================================================
