//! The room graph: which cells make up a floor and what each one is for.

use std::collections::{HashMap, VecDeque};

use delve_grid::{GridCoord, RoomType};

use crate::GraphError;

/// The connected set of rooms on one floor.
///
/// Keys are unique and iterate in insertion order, so everything derived
/// from a graph (door maps, boss choice, snapshots) is deterministic.
///
/// ## Invariants
///
/// Every mutation keeps these true, not just the finished graph:
///
/// - exactly one room is `Start`, and it never changes type;
/// - every room is reachable from the start through 4-adjacent rooms;
/// - every type other than `Normal` appears at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGraph {
    start: GridCoord,
    rooms: HashMap<GridCoord, RoomType>,
    /// Insertion order of `rooms`' keys.
    order: Vec<GridCoord>,
}

impl RoomGraph {
    /// Creates a graph holding only the start room.
    pub fn new(start: GridCoord) -> Self {
        Self {
            start,
            rooms: HashMap::from([(start, RoomType::Start)]),
            order: vec![start],
        }
    }

    /// Rebuilds a graph from an explicit room list (tooling, fixtures,
    /// snapshots). The whole list is validated before anything is returned.
    ///
    /// # Errors
    /// - [`GraphError::MissingStart`] / [`GraphError::DuplicateStart`]
    /// - [`GraphError::Occupied`] if a coordinate repeats
    /// - [`GraphError::DuplicateSpecial`] if a unique type repeats
    /// - [`GraphError::Disconnected`] if a room can't be reached from the start
    pub fn from_rooms<I>(rooms: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (GridCoord, RoomType)>,
    {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        let mut start = None;
        let mut seen_unique: HashMap<RoomType, GridCoord> = HashMap::new();

        for (coord, room_type) in rooms {
            if map.contains_key(&coord) {
                return Err(GraphError::Occupied(coord));
            }
            if room_type == RoomType::Start {
                if start.is_some() {
                    return Err(GraphError::DuplicateStart(coord));
                }
                start = Some(coord);
            } else if room_type.is_unique() {
                if let Some(existing) = seen_unique.insert(room_type, coord) {
                    return Err(GraphError::DuplicateSpecial {
                        kind: room_type,
                        existing,
                    });
                }
            }
            map.insert(coord, room_type);
            order.push(coord);
        }

        let start = start.ok_or(GraphError::MissingStart)?;
        let graph = Self {
            start,
            rooms: map,
            order,
        };

        let reached = graph.hop_distances(start);
        if let Some(lost) = graph.order.iter().find(|c| !reached.contains_key(c)) {
            return Err(GraphError::Disconnected(*lost));
        }
        Ok(graph)
    }

    /// The start room's coordinate.
    pub fn start(&self) -> GridCoord {
        self.start
    }

    /// Number of rooms, start included. Never zero.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`; a graph holds at least its start room.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.rooms.contains_key(&coord)
    }

    pub fn room_type(&self, coord: GridCoord) -> Option<RoomType> {
        self.rooms.get(&coord).copied()
    }

    /// Room coordinates in insertion order.
    pub fn coords(&self) -> &[GridCoord] {
        &self.order
    }

    /// `(coord, type)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, RoomType)> + '_ {
        self.order.iter().map(|c| (*c, self.rooms[c]))
    }

    /// Coordinates of every room of the given type, in insertion order.
    pub fn rooms_of_type(&self, room_type: RoomType) -> impl Iterator<Item = GridCoord> + '_ {
        self.iter()
            .filter(move |(_, t)| *t == room_type)
            .map(|(c, _)| c)
    }

    /// First room of the given type, if any.
    pub fn find(&self, room_type: RoomType) -> Option<GridCoord> {
        self.rooms_of_type(room_type).next()
    }

    pub fn count_of(&self, room_type: RoomType) -> usize {
        self.rooms_of_type(room_type).count()
    }

    /// Neighbours of `coord` that are not rooms yet, in direction order.
    pub fn vacant_neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        coord
            .neighbors()
            .into_iter()
            .map(|(_, n)| n)
            .filter(|n| !self.rooms.contains_key(n))
    }

    /// Adds a room next to an existing one.
    ///
    /// # Errors
    /// - [`GraphError::Occupied`] if `coord` is already a room
    /// - [`GraphError::Detached`] if no existing room is 4-adjacent
    /// - [`GraphError::DuplicateStart`] if `room_type` is `Start`
    /// - [`GraphError::DuplicateSpecial`] if a unique type already exists
    pub fn insert_adjacent(
        &mut self,
        coord: GridCoord,
        room_type: RoomType,
    ) -> Result<(), GraphError> {
        if self.rooms.contains_key(&coord) {
            return Err(GraphError::Occupied(coord));
        }
        if !coord.neighbors().iter().any(|(_, n)| self.rooms.contains_key(n)) {
            return Err(GraphError::Detached(coord));
        }
        self.check_unique(coord, room_type)?;

        self.rooms.insert(coord, room_type);
        self.order.push(coord);
        Ok(())
    }

    /// Reclassifies an existing room and returns its previous type.
    ///
    /// # Errors
    /// - [`GraphError::UnknownRoom`] if `coord` is not a room
    /// - [`GraphError::StartImmutable`] if `coord` is the start room
    /// - [`GraphError::DuplicateStart`] / [`GraphError::DuplicateSpecial`]
    ///   if the new type is already taken elsewhere
    pub fn set_type(
        &mut self,
        coord: GridCoord,
        room_type: RoomType,
    ) -> Result<RoomType, GraphError> {
        let current = self
            .room_type(coord)
            .ok_or(GraphError::UnknownRoom(coord))?;
        if coord == self.start {
            if room_type == RoomType::Start {
                return Ok(current);
            }
            return Err(GraphError::StartImmutable(coord));
        }
        if current == room_type {
            return Ok(current);
        }
        self.check_unique(coord, room_type)?;

        self.rooms.insert(coord, room_type);
        Ok(current)
    }

    /// Breadth-first hop counts from `from` to every reachable room.
    ///
    /// Empty if `from` is not a room.
    pub fn hop_distances(&self, from: GridCoord) -> HashMap<GridCoord, u32> {
        let mut dist = HashMap::with_capacity(self.len());
        if !self.contains(from) {
            return dist;
        }

        let mut queue = VecDeque::from([from]);
        dist.insert(from, 0);
        while let Some(cell) = queue.pop_front() {
            let d = dist[&cell];
            for (_, next) in cell.neighbors() {
                if self.contains(next) && !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    /// Returns `true` if every room is reachable from the start.
    pub fn is_connected(&self) -> bool {
        self.hop_distances(self.start).len() == self.len()
    }

    fn check_unique(&self, coord: GridCoord, room_type: RoomType) -> Result<(), GraphError> {
        if room_type == RoomType::Start {
            return Err(GraphError::DuplicateStart(coord));
        }
        if room_type.is_unique() {
            if let Some(existing) = self.find(room_type) {
                return Err(GraphError::DuplicateSpecial {
                    kind: room_type,
                    existing,
                });
            }
        }
        Ok(())
    }
}
