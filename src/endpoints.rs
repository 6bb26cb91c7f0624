//! Choosing the entrance and exit of a maze and knocking them through the outer wall.

use log::debug;

use crate::cells::{Cell, CellId, Direction};
use crate::grid::Grid;
use crate::grid_dimensions::GridStyle;
use crate::masks::Silhouette;

/// Entrance and exit cells. Both are `None` when the grid has no active cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Endpoints {
    pub start: Option<CellId>,
    pub end: Option<CellId>,
}

impl Endpoints {
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        self.start.into_iter().chain(self.end)
    }
}

/// Does an active cell own a wall edge that has no neighbour behind it?
///
/// Only the outermost ring of a radial grid counts, its centre cell also lacks neighbours on
/// its (open) ring and inward edges.
pub fn is_boundary_cell(grid: &Grid, cell: &Cell) -> bool {
    if !cell.is_active() {
        return false;
    }
    if grid.style() == GridStyle::Radial {
        return cell.ring() == Some(grid.rows().0.saturating_sub(1));
    }
    cell.walls().directions().any(|direction| !has_neighbour_at(cell, direction))
}

/// Cells the endpoints are picked from, in id order.
///
/// Triangles with a single neighbour are left out, their boundary edges sit next to a corner
/// of the grid. With no boundary cell at all every active cell is a candidate.
pub fn boundary_candidates(grid: &Grid) -> Vec<CellId> {
    let triangles = grid.style() == GridStyle::Triangular;
    let candidates: Vec<CellId> = grid.active_cells()
        .filter(|cell| is_boundary_cell(grid, cell))
        .filter(|cell| !(triangles && cell.neighbours().len() == 1))
        .map(Cell::id)
        .collect();

    if candidates.is_empty() {
        grid.active_cells().map(Cell::id).collect()
    } else {
        candidates
    }
}

/// Start is the top most candidate (then left most), end the bottom most (then right most).
///
/// Under a triangular silhouette the start tie-break prefers the cell closest to `x = 0`.
pub fn pick(grid: &Grid) -> Endpoints {
    let candidates: Vec<&Cell> = boundary_candidates(grid)
        .into_iter()
        .filter_map(|id| grid.cell(id))
        .collect();
    let wedge = grid.silhouette() == Silhouette::Triangular;

    let further_left = |a: &Cell, b: &Cell| if wedge {
        b.x().abs() < a.x().abs()
    } else {
        b.x() < a.x()
    };

    let start = candidates.iter().fold(None, |best: Option<&Cell>, &cell| {
        match best {
            Some(a) => {
                let better = cell.y() < a.y() || (cell.y() == a.y() && further_left(a, cell));
                Some(if better { cell } else { a })
            }
            None => Some(cell),
        }
    });

    let end = candidates.iter().fold(None, |best: Option<&Cell>, &cell| {
        match best {
            Some(a) => {
                let better = cell.y() > a.y() || (cell.y() == a.y() && cell.x() > a.x());
                Some(if better { cell } else { a })
            }
            None => Some(cell),
        }
    });

    let endpoints = Endpoints {
        start: start.map(Cell::id),
        end: end.map(Cell::id),
    };
    debug!("endpoints {:?}", endpoints);
    endpoints
}

/// Wall edges of a cell that face out of the grid (or out of the masked silhouette).
pub fn boundary_edges(cell: &Cell) -> Vec<Direction> {
    cell.walls()
        .directions()
        .filter(|&direction| !has_neighbour_at(cell, direction))
        .collect()
}

/// Open an outer wall on each endpoint. See `open_exit`.
pub fn open_boundary(grid: &mut Grid, endpoints: &Endpoints) {
    for id in endpoints.ids() {
        let _ = open_exit(grid, id);
    }
}

/// Open the outer wall of a cell that best faces away from the middle of the grid and return
/// the opened edge and segment.
///
/// Radial grids open the middle outward segment of a cell on the outermost ring. Boundary
/// walls have no cell behind them so only the one side is touched.
pub fn open_exit(grid: &mut Grid, id: CellId) -> Option<(Direction, Option<usize>)> {
    let edge = exit_edge(grid, id)?;
    let cell = grid.cells_mut().get_mut(id)?;
    cell.walls.open(edge.0, edge.1);
    Some(edge)
}

fn exit_edge(grid: &Grid, id: CellId) -> Option<(Direction, Option<usize>)> {
    let cell = grid.cell(id)?;

    if grid.style() == GridStyle::Radial {
        let outermost = grid.rows().0.saturating_sub(1);
        if cell.ring() != Some(outermost) {
            return None;
        }
        let segments = cell.walls().outward_segments();
        return Some((Direction::Outward, Some(segments / 2)));
    }

    let (centre_x, centre_y) = grid.bounds().centre();
    let (dir_x, dir_y) = (cell.x() - centre_x, cell.y() - centre_y);

    let mut best = None;
    let mut best_score = std::f64::NEG_INFINITY;
    for direction in boundary_edges(cell) {
        if let Some((edge_x, edge_y)) = outward_vector(direction, cell.is_upward()) {
            let score = dir_x * edge_x + dir_y * edge_y;
            if score > best_score {
                best_score = score;
                best = Some(direction);
            }
        }
    }
    best.map(|direction| (direction, None))
}

/// Direction an edge faces, screen coordinates (y grows downwards).
fn outward_vector(direction: Direction, upward: bool) -> Option<(f64, f64)> {
    let vector = match direction {
        Direction::Top => (0.0, -1.0),
        Direction::Bottom => (0.0, 1.0),
        Direction::Left => (-1.0, 0.0),
        Direction::Right => (1.0, 0.0),
        Direction::East => (1.0, 0.0),
        Direction::West => (-1.0, 0.0),
        Direction::NorthEast => (0.5, -0.866),
        Direction::NorthWest => (-0.5, -0.866),
        Direction::SouthEast => (0.5, 0.866),
        Direction::SouthWest => (-0.5, 0.866),
        Direction::Base => (0.0, if upward { 1.0 } else { -1.0 }),
        Direction::Clockwise | Direction::CounterClockwise | Direction::Inward |
        Direction::Outward => return None,
    };
    Some(vector)
}

#[inline]
fn has_neighbour_at(cell: &Cell, direction: Direction) -> bool {
    cell.neighbours().iter().any(|neighbour| neighbour.direction == direction)
}
