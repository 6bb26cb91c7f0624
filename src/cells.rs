use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Dense index of a cell in its grid, assigned in construction order.
pub type CellId = usize;

pub type NeighbourSmallVec = SmallVec<[Neighbour; 6]>;

/// Edge tags for every topology. Each grid style only ever uses its own subset.
///
/// The serialized names are the wall keys stored in maze records.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "bottom")]
    Bottom,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[serde(rename = "inward")]
    Inward,
    #[serde(rename = "outward")]
    Outward,
}

/// The state of one wall edge of a cell.
///
/// Only the radial outward edge is segmented: an outer ring may hold several narrower cells
/// facing a single inner cell, one segment each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WallState {
    Single(bool),
    Segments(Vec<bool>),
}

impl WallState {
    /// Is the wall (or the wall segment) present?
    /// A missing segment counts as open.
    pub fn is_closed(&self, segment: Option<usize>) -> bool {
        match *self {
            WallState::Single(closed) => closed,
            WallState::Segments(ref segments) => {
                segments.get(segment.unwrap_or(0)).cloned().unwrap_or(false)
            }
        }
    }

    fn open(&mut self, segment: Option<usize>) {
        match *self {
            WallState::Single(ref mut closed) => *closed = false,
            WallState::Segments(ref mut segments) => {
                if let Some(closed) = segments.get_mut(segment.unwrap_or(0)) {
                    *closed = false;
                }
            }
        }
    }

    fn fill(&mut self, value: bool) {
        match *self {
            WallState::Single(ref mut closed) => *closed = value,
            WallState::Segments(ref mut segments) => {
                for closed in segments.iter_mut() {
                    *closed = value;
                }
            }
        }
    }
}

/// Ordered mapping from edge tag to wall state.
///
/// Insertion order is kept, it decides the order boundary edges are considered in.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Walls {
    entries: SmallVec<[(Direction, WallState); 6]>,
}

impl Walls {
    /// All given edges walled, in the given order.
    pub fn closed(directions: &[Direction]) -> Walls {
        Walls {
            entries: directions.iter().map(|&dir| (dir, WallState::Single(true))).collect(),
        }
    }

    /// Replace the state of an existing edge, or append a new edge.
    pub fn insert(&mut self, direction: Direction, state: WallState) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == direction) {
            entry.1 = state;
        } else {
            self.entries.push((direction, state));
        }
    }

    pub fn get(&self, direction: Direction) -> Option<&WallState> {
        self.entries.iter().find(|entry| entry.0 == direction).map(|entry| &entry.1)
    }

    /// Is there a wall on the edge? Edges the cell does not own are not walls.
    pub fn has_wall(&self, direction: Direction, segment: Option<usize>) -> bool {
        self.get(direction).map_or(false, |state| state.is_closed(segment))
    }

    pub fn open(&mut self, direction: Direction, segment: Option<usize>) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == direction) {
            entry.1.open(segment);
        }
    }

    /// Force every segment of an edge to the given value.
    pub fn fill(&mut self, direction: Direction, value: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == direction) {
            entry.1.fill(value);
        }
    }

    pub fn directions<'a>(&'a self) -> impl Iterator<Item = Direction> + 'a {
        self.entries.iter().map(|entry| entry.0)
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Direction, &'a WallState)> + 'a {
        self.entries.iter().map(|entry| (entry.0, &entry.1))
    }

    /// Number of outward segments, zero when the cell has no outward edge.
    pub fn outward_segments(&self) -> usize {
        match self.get(Direction::Outward) {
            Some(WallState::Segments(segments)) => segments.len(),
            Some(WallState::Single(_)) => 1,
            None => 0,
        }
    }
}

/// Topology specific placement of a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Location {
    /// Rectangular and hexagonal (axial) cells.
    Lattice { row: usize, col: usize },
    Triangle {
        row: usize,
        col: usize,
        upward: bool,
        base_x: f64,
        base_y: f64,
    },
    Ring {
        ring: usize,
        index: usize,
        start_angle: f64,
        end_angle: f64,
        inner_radius: f64,
        outer_radius: f64,
    },
}

/// An adjacency relation from one cell to another.
///
/// `segment` is only used by radial relations. On an `Outward` relation it is the slot in
/// this cell's outward wall array; on an `Inward` relation it is the slot this cell occupies
/// in the inward cell's outward wall array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbour {
    pub direction: Direction,
    pub opposite: Direction,
    pub cell: CellId,
    pub segment: Option<usize>,
}

impl Neighbour {
    pub fn new(direction: Direction, opposite: Direction, cell: CellId) -> Neighbour {
        Neighbour {
            direction,
            opposite,
            cell,
            segment: None,
        }
    }

    pub fn with_segment(direction: Direction,
                        opposite: Direction,
                        cell: CellId,
                        segment: usize)
                        -> Neighbour {
        Neighbour {
            direction,
            opposite,
            cell,
            segment: Some(segment),
        }
    }

    /// The wall segment on the near side of the relation.
    #[inline]
    pub fn near_segment(&self) -> Option<usize> {
        if self.direction == Direction::Outward {
            self.segment
        } else {
            None
        }
    }

    /// The wall segment on the far side of the relation.
    #[inline]
    pub fn far_segment(&self) -> Option<usize> {
        if self.direction == Direction::Inward {
            self.segment
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) location: Location,
    pub(crate) walls: Walls,
    pub(crate) active: bool,
    pub(crate) neighbours: NeighbourSmallVec,
}

impl Cell {
    pub fn new(id: CellId, x: f64, y: f64, location: Location, walls: Walls) -> Cell {
        Cell {
            id,
            x,
            y,
            location,
            walls,
            active: true,
            neighbours: NeighbourSmallVec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Centre of the cell.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[inline]
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    pub fn row(&self) -> Option<usize> {
        match self.location {
            Location::Lattice { row, .. } | Location::Triangle { row, .. } => Some(row),
            Location::Ring { .. } => None,
        }
    }

    pub fn col(&self) -> Option<usize> {
        match self.location {
            Location::Lattice { col, .. } | Location::Triangle { col, .. } => Some(col),
            Location::Ring { .. } => None,
        }
    }

    pub fn ring(&self) -> Option<usize> {
        match self.location {
            Location::Ring { ring, .. } => Some(ring),
            _ => None,
        }
    }

    pub fn ring_index(&self) -> Option<usize> {
        match self.location {
            Location::Ring { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Triangles point up when `(row + col)` is even. Other cells are never upward.
    pub fn is_upward(&self) -> bool {
        match self.location {
            Location::Triangle { upward, .. } => upward,
            _ => false,
        }
    }

    /// Is the passage through this relation free of a wall on this cell's side?
    #[inline]
    pub fn is_open_towards(&self, neighbour: &Neighbour) -> bool {
        !self.walls.has_wall(neighbour.direction, neighbour.near_segment())
    }

    /// First relation leading to the other cell.
    pub fn neighbour_towards(&self, other: CellId) -> Option<&Neighbour> {
        self.neighbours.iter().find(|neighbour| neighbour.cell == other)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn missing_edges_are_not_walls() {
        let walls = Walls::closed(&[Direction::Left, Direction::Right, Direction::Base]);
        assert!(walls.has_wall(Direction::Base, None));
        assert!(!walls.has_wall(Direction::Top, None));
    }

    #[test]
    fn opening_single_walls() {
        let mut walls = Walls::closed(&[Direction::Top, Direction::Right]);
        walls.open(Direction::Right, None);
        assert!(walls.has_wall(Direction::Top, None));
        assert!(!walls.has_wall(Direction::Right, None));
    }

    #[test]
    fn opening_one_outward_segment() {
        let mut walls = Walls::closed(&[Direction::Clockwise]);
        walls.insert(Direction::Outward, WallState::Segments(vec![true, true, true]));
        walls.open(Direction::Outward, Some(1));

        assert_eq!(walls.get(Direction::Outward),
                   Some(&WallState::Segments(vec![true, false, true])));
        assert!(walls.has_wall(Direction::Outward, Some(0)));
        assert!(!walls.has_wall(Direction::Outward, Some(1)));
        assert!(!walls.has_wall(Direction::Outward, Some(7)));
        assert_eq!(walls.outward_segments(), 3);
    }

    #[test]
    fn insert_replaces_or_appends() {
        let mut walls = Walls::closed(&[Direction::East, Direction::West]);
        walls.insert(Direction::West, WallState::Single(false));
        walls.insert(Direction::NorthEast, WallState::Single(true));
        let dirs: Vec<Direction> = walls.directions().collect();
        assert_eq!(dirs, vec![Direction::East, Direction::West, Direction::NorthEast]);
        assert!(!walls.has_wall(Direction::West, None));
    }

    #[test]
    fn fill_resets_every_segment() {
        let mut walls = Walls::default();
        walls.insert(Direction::Outward, WallState::Segments(vec![false, true, false]));
        walls.fill(Direction::Outward, true);
        assert_eq!(walls.get(Direction::Outward),
                   Some(&WallState::Segments(vec![true, true, true])));
    }

    #[test]
    fn relation_segments_sides() {
        let outward = Neighbour::with_segment(Direction::Outward, Direction::Inward, 3, 1);
        assert_eq!(outward.near_segment(), Some(1));
        assert_eq!(outward.far_segment(), None);

        let inward = Neighbour::with_segment(Direction::Inward, Direction::Outward, 0, 2);
        assert_eq!(inward.near_segment(), None);
        assert_eq!(inward.far_segment(), Some(2));
    }
}
