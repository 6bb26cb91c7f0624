use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, CellId, Direction, Neighbour};
use crate::grid_dimensions::{GridDimensions, GridStyle};
use crate::masks::Silhouette;
use crate::units::{ColumnsCount, RowsCount};

/// Axis aligned box around the drawn extent of every cell of a grid.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box holding every point. Zero sized at the origin when there are no points.
    pub fn from_points<I>(points: I) -> Bounds
        where I: IntoIterator<Item = (f64, f64)>
    {
        let mut points = points.into_iter();
        let (x, y) = match points.next() {
            Some(first) => first,
            None => return Bounds::default(),
        };
        points.fold(Bounds {
                        min_x: x,
                        min_y: y,
                        max_x: x,
                        max_y: y,
                    },
                    |bounds, (x, y)| {
                        Bounds {
                            min_x: bounds.min_x.min(x),
                            min_y: bounds.min_y.min(y),
                            max_x: bounds.max_x.max(x),
                            max_y: bounds.max_y.max(y),
                        }
                    })
    }

    #[inline]
    pub fn centre(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Arena of cells addressed by their dense ids.
///
/// Adjacency is fixed at construction and only ever shrinks (masking, deactivation). Walls
/// change through `remove_wall`, which always updates both sides of a passage, and through
/// `reset_walls`.
#[derive(Debug, Clone)]
pub struct Grid {
    style: GridStyle,
    dimensions: GridDimensions,
    cell_size: f64,
    cells: Vec<Cell>,
    bounds: Bounds,
    silhouette: Silhouette,
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{} grid :: cells: {}, active: {}, rows: {}, columns: {}",
               self.style,
               self.size(),
               self.active_count(),
               self.rows().0,
               self.columns().0)
    }
}

impl Grid {
    pub(crate) fn new(style: GridStyle,
                      dimensions: GridDimensions,
                      cell_size: f64,
                      cells: Vec<Cell>,
                      bounds: Bounds)
                      -> Grid {
        Grid {
            style,
            dimensions,
            cell_size,
            cells,
            bounds,
            silhouette: Silhouette::Rectangular,
        }
    }

    #[inline]
    pub fn style(&self) -> GridStyle {
        self.style
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The silhouette most recently applied to the grid.
    #[inline]
    pub fn silhouette(&self) -> Silhouette {
        self.silhouette
    }

    #[inline]
    pub(crate) fn set_silhouette(&mut self, silhouette: Silhouette) {
        self.silhouette = silhouette;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn is_active(&self, id: CellId) -> bool {
        self.cell(id).map_or(false, Cell::is_active)
    }

    pub fn active_cells<'a>(&'a self) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells.iter().filter(|cell| cell.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_cells().count()
    }

    /// Resolve a sequence of ids, e.g. a solution path, to the cells. Unknown ids are skipped.
    pub fn cells_on<'a>(&'a self, ids: &'a [CellId]) -> impl Iterator<Item = &'a Cell> + 'a {
        ids.iter().filter_map(move |&id| self.cell(id))
    }

    /// Is there a wall on the given cell's side of the relation?
    pub fn has_wall(&self, id: CellId, neighbour: &Neighbour) -> bool {
        self.cell(id).map_or(false, |cell| !cell.is_open_towards(neighbour))
    }

    /// Remove the wall between a cell and one of its neighbours, on both sides.
    ///
    /// Radial relations resolve their far side differently: an outward segment maps to the
    /// single inward wall of the outer cell, while an inward wall maps to one particular
    /// outward segment of the inner cell.
    pub fn remove_wall(&mut self, id: CellId, neighbour: &Neighbour) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.walls.open(neighbour.direction, neighbour.near_segment());
        }
        if let Some(far_cell) = self.cells.get_mut(neighbour.cell) {
            far_cell.walls.open(neighbour.opposite, neighbour.far_segment());
        }
    }

    /// Put every wall back. The centre cell of a radial grid has no ring neighbours and
    /// nothing inward of it, those edges stay open.
    pub fn reset_walls(&mut self) {
        let radial = self.style == GridStyle::Radial;
        for cell in &mut self.cells {
            let centre = radial && cell.ring() == Some(0);
            let directions: SmallVec<[Direction; 6]> = cell.walls.directions().collect();
            for direction in directions {
                let absent = centre &&
                             matches!(direction,
                                      Direction::Clockwise | Direction::CounterClockwise |
                                      Direction::Inward);
                cell.walls.fill(direction, !absent);
            }
        }
    }

    /// The relation on the neighbour's side that leads back through the same edge.
    pub fn reciprocal(&self, id: CellId, neighbour: &Neighbour) -> Option<&Neighbour> {
        self.cell(neighbour.cell).and_then(|far_cell| {
            far_cell.neighbours
                .iter()
                .find(|back| back.cell == id && back.direction == neighbour.opposite)
        })
    }

    /// Are the two cells adjacent with no wall between them?
    pub fn is_linked(&self, a: CellId, b: CellId) -> bool {
        self.cell(a).map_or(false, |cell| {
            cell.neighbour_towards(b).map_or(false, |neighbour| cell.is_open_towards(neighbour))
        })
    }

    /// Active neighbours reachable from the cell without crossing a wall.
    pub fn links(&self, id: CellId) -> SmallVec<[CellId; 6]> {
        match self.cell(id) {
            Some(cell) => {
                cell.neighbours
                    .iter()
                    .filter(|neighbour| {
                        cell.is_open_towards(neighbour) && self.is_active(neighbour.cell)
                    })
                    .map(|neighbour| neighbour.cell)
                    .collect()
            }
            None => SmallVec::new(),
        }
    }

    /// Open passages between adjacent active cells, each pair once as `(lower, higher)`.
    pub fn passages<'a>(&'a self) -> impl Iterator<Item = (CellId, CellId)> + 'a {
        self.active_cells().flat_map(move |cell| {
            cell.neighbours
                .iter()
                .filter(move |neighbour| {
                    neighbour.cell > cell.id && cell.is_open_towards(neighbour)
                })
                .map(move |neighbour| (cell.id, neighbour.cell))
        })
    }

    /// Undirected graph with one node per cell (node index == cell id) and one edge per open
    /// passage.
    pub fn passage_graph(&self) -> UnGraph<CellId, ()> {
        let mut graph = UnGraph::with_capacity(self.cells.len(), self.cells.len());
        for cell in &self.cells {
            let _ = graph.add_node(cell.id);
        }
        for (a, b) in self.passages() {
            let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        graph
    }

    /// Take cells out of the maze. Adjacency to them is dropped from every remaining cell.
    pub fn deactivate_cells<I>(&mut self, ids: I)
        where I: IntoIterator<Item = CellId>
    {
        for id in ids {
            if let Some(cell) = self.cells.get_mut(id) {
                cell.active = false;
            }
        }
        self.prune_inactive_neighbours();
    }

    /// Inactive cells lose all their relations, active cells lose relations to inactive cells.
    pub(crate) fn prune_inactive_neighbours(&mut self) {
        let active: Vec<bool> = self.cells.iter().map(|cell| cell.active).collect();
        for cell in &mut self.cells {
            if cell.active {
                cell.neighbours
                    .retain(|neighbour| active.get(neighbour.cell).cloned().unwrap_or(false));
            } else {
                cell.neighbours.clear();
            }
        }
    }
}
