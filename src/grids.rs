//! Grid construction for each topology.
//!
//! Every constructor assigns cell ids `0..n` in construction order (row major for lattices,
//! ring by ring outwards for radial grids) and links every pair of geometrically adjacent
//! cells. Everything starts active and fully walled.

use std::f64::consts::PI;

use log::debug;

use crate::cells::{Cell, CellId, Direction, Location, Neighbour, WallState, Walls};
use crate::grid::{Bounds, Grid};
use crate::grid_dimensions::{GridDimensions, GridStyle, PolarGridDimensions};
use crate::units::{ColumnsCount, RowIndex, RowsCount};

/// `(row delta, column delta, direction, opposite direction)`
type LatticeOffset = (isize, isize, Direction, Direction);

const SQUARE_WALLS: [Direction; 4] = [Direction::Top,
                                      Direction::Right,
                                      Direction::Bottom,
                                      Direction::Left];

const SQUARE_OFFSETS: [LatticeOffset; 4] = [(-1, 0, Direction::Top, Direction::Bottom),
                                            (0, 1, Direction::Right, Direction::Left),
                                            (1, 0, Direction::Bottom, Direction::Top),
                                            (0, -1, Direction::Left, Direction::Right)];

const HEX_WALLS: [Direction; 6] = [Direction::East,
                                   Direction::West,
                                   Direction::SouthEast,
                                   Direction::SouthWest,
                                   Direction::NorthEast,
                                   Direction::NorthWest];

// Axial layout: a row step is `dr`, a column step is `dq`.
const HEX_OFFSETS: [LatticeOffset; 6] = [(0, 1, Direction::East, Direction::West),
                                         (0, -1, Direction::West, Direction::East),
                                         (1, 0, Direction::SouthEast, Direction::NorthWest),
                                         (-1, 0, Direction::NorthWest, Direction::SouthEast),
                                         (-1, 1, Direction::NorthEast, Direction::SouthWest),
                                         (1, -1, Direction::SouthWest, Direction::NorthEast)];

const TRIANGLE_WALLS: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Base];

/// Build a grid of the given topology.
///
/// For radial grids `rows` is the ring count and `columns` the cell count of the first ring
/// around the centre.
pub fn build(style: GridStyle, rows: RowsCount, columns: ColumnsCount, cell_size: f64) -> Grid {
    let grid = match style {
        GridStyle::Rectangular => rectangular_grid(rows, columns, cell_size),
        GridStyle::Hexagonal => hexagonal_grid(rows, columns, cell_size),
        GridStyle::Triangular => triangular_grid(rows, columns, cell_size),
        GridStyle::Radial => radial_grid(rows, columns, cell_size),
    };
    debug!("built {}", grid);
    grid
}

pub fn rectangular_grid(rows: RowsCount, columns: ColumnsCount, cell_size: f64) -> Grid {
    let (RowsCount(row_count), ColumnsCount(col_count)) = (rows, columns);
    let mut cells = Vec::with_capacity(row_count * col_count);
    for row in 0..row_count {
        for col in 0..col_count {
            let x = col as f64 * cell_size + cell_size / 2.0;
            let y = row as f64 * cell_size + cell_size / 2.0;
            cells.push(Cell::new(cells.len(),
                                 x,
                                 y,
                                 Location::Lattice { row, col },
                                 Walls::closed(&SQUARE_WALLS)));
        }
    }
    link_lattice(&mut cells, rows, columns, &SQUARE_OFFSETS);

    let half = cell_size / 2.0;
    let bounds = Bounds::from_points(cells.iter().flat_map(|cell| {
        let (x, y) = (cell.x(), cell.y());
        vec![(x - half, y - half), (x + half, y + half)]
    }));

    Grid::new(GridStyle::Rectangular,
              GridDimensions::Lattice { rows, columns },
              cell_size,
              cells,
              bounds)
}

pub fn hexagonal_grid(rows: RowsCount, columns: ColumnsCount, cell_size: f64) -> Grid {
    let (RowsCount(row_count), ColumnsCount(col_count)) = (rows, columns);
    let root3 = 3.0f64.sqrt();
    let mut cells = Vec::with_capacity(row_count * col_count);
    for row in 0..row_count {
        for col in 0..col_count {
            let x = cell_size * root3 * (col as f64 + row as f64 / 2.0);
            let y = cell_size * 1.5 * row as f64;
            cells.push(Cell::new(cells.len(),
                                 x,
                                 y,
                                 Location::Lattice { row, col },
                                 Walls::closed(&HEX_WALLS)));
        }
    }
    link_lattice(&mut cells, rows, columns, &HEX_OFFSETS);

    let bounds = Bounds::from_points(cells.iter()
        .flat_map(|cell| hex_corners(cell.x(), cell.y(), cell_size).to_vec()));

    Grid::new(GridStyle::Hexagonal,
              GridDimensions::Lattice { rows, columns },
              cell_size,
              cells,
              bounds)
}

pub fn triangular_grid(rows: RowsCount, columns: ColumnsCount, cell_size: f64) -> Grid {
    let (RowsCount(row_count), ColumnsCount(col_count)) = (rows, columns);
    let tri_height = triangle_height(cell_size);
    let mut cells = Vec::with_capacity(row_count * col_count);
    for row in 0..row_count {
        for col in 0..col_count {
            let base_x = col as f64 * (cell_size / 2.0);
            let base_y = row as f64 * tri_height;
            let upward = (row + col) % 2 == 0;
            let corners = triangle_corners(base_x, base_y, cell_size, upward);
            let x = corners.iter().map(|corner| corner.0 / 3.0).sum();
            let y = corners.iter().map(|corner| corner.1 / 3.0).sum();
            cells.push(Cell::new(cells.len(),
                                 x,
                                 y,
                                 Location::Triangle {
                                     row,
                                     col,
                                     upward,
                                     base_x,
                                     base_y,
                                 },
                                 Walls::closed(&TRIANGLE_WALLS)));
        }
    }

    // Triangles share their slanted sides with the row neighbours and their base with
    // the cell below (pointing up) or above (pointing down). Never a fourth neighbour.
    for cell in &mut cells {
        let (row, col) = (cell.row().unwrap_or(0), cell.col().unwrap_or(0));
        if col > 0 {
            cell.neighbours
                .push(Neighbour::new(Direction::Left, Direction::Right, row * col_count + col - 1));
        }
        if col + 1 < col_count {
            cell.neighbours
                .push(Neighbour::new(Direction::Right, Direction::Left, row * col_count + col + 1));
        }
        let base_row = if cell.is_upward() {
            Some(row + 1)
        } else {
            row.checked_sub(1)
        };
        if let Some(base_row) = base_row.filter(|&base_row| base_row < row_count) {
            cell.neighbours
                .push(Neighbour::new(Direction::Base, Direction::Base, base_row * col_count + col));
        }
    }

    let bounds = Bounds::from_points(cells.iter().flat_map(|cell| match *cell.location() {
        Location::Triangle { base_x, base_y, upward, .. } => {
            triangle_corners(base_x, base_y, cell_size, upward).to_vec()
        }
        _ => Vec::new(),
    }));

    Grid::new(GridStyle::Triangular,
              GridDimensions::Lattice { rows, columns },
              cell_size,
              cells,
              bounds)
}

/// Concentric rings around a single centre cell, one cell size tall each.
pub fn radial_grid(rings: RowsCount, cells_per_ring: ColumnsCount, cell_size: f64) -> Grid {
    let polar = PolarGridDimensions::new(rings, cells_per_ring);
    let counts = polar.ring_cell_counts().to_vec();

    // Id of the first cell of each ring.
    let ring_starts: Vec<CellId> = counts.iter()
        .scan(0, |next_id, &count| {
            let start = *next_id;
            *next_id += count;
            Some(start)
        })
        .collect();

    let mut cells = Vec::with_capacity(polar.size().0);
    for (ring, &count) in counts.iter().enumerate() {
        let inner_radius = ring as f64 * cell_size;
        let outer_radius = (ring + 1) as f64 * cell_size;
        let step = (PI * 2.0) / count as f64;
        let outward_segments = polar.outward_ratio(RowIndex(ring));

        for index in 0..count {
            let start_angle = index as f64 * step;
            let end_angle = (index + 1) as f64 * step;
            let mid_angle = (start_angle + end_angle) / 2.0;
            let mid_radius = (inner_radius + outer_radius) / 2.0;

            let mut walls = Walls::closed(&[Direction::Clockwise, Direction::CounterClockwise]);
            walls.insert(Direction::Inward, WallState::Single(ring > 0));
            walls.insert(Direction::Outward, WallState::Segments(vec![true; outward_segments]));
            if count == 1 {
                walls.fill(Direction::Clockwise, false);
                walls.fill(Direction::CounterClockwise, false);
            }

            let mut cell = Cell::new(cells.len(),
                                     mid_angle.cos() * mid_radius,
                                     mid_angle.sin() * mid_radius,
                                     Location::Ring {
                                         ring,
                                         index,
                                         start_angle,
                                         end_angle,
                                         inner_radius,
                                         outer_radius,
                                     },
                                     walls);

            let ring_start = ring_starts[ring];
            if count > 1 {
                let cw = (index + 1) % count;
                let ccw = (index + count - 1) % count;
                cell.neighbours.push(Neighbour::new(Direction::Clockwise,
                                                    Direction::CounterClockwise,
                                                    ring_start + cw));
                cell.neighbours.push(Neighbour::new(Direction::CounterClockwise,
                                                    Direction::Clockwise,
                                                    ring_start + ccw));
            }

            if ring > 0 {
                let ratio = count / counts[ring - 1];
                cell.neighbours.push(Neighbour::with_segment(Direction::Inward,
                                                             Direction::Outward,
                                                             ring_starts[ring - 1] + index / ratio,
                                                             index % ratio));
            }

            if let Some(&outer_count) = counts.get(ring + 1) {
                let ratio = outer_count / count;
                let first_outward = ring_starts[ring + 1] + index * ratio;
                for segment in 0..ratio {
                    cell.neighbours.push(Neighbour::with_segment(Direction::Outward,
                                                                 Direction::Inward,
                                                                 first_outward + segment,
                                                                 segment));
                }
            }

            cells.push(cell);
        }
    }

    let radius = counts.len() as f64 * cell_size;
    let bounds = Bounds {
        min_x: -radius,
        min_y: -radius,
        max_x: radius,
        max_y: radius,
    };

    Grid::new(GridStyle::Radial,
              GridDimensions::Polar(polar),
              cell_size,
              cells,
              bounds)
}

/// Height of an equilateral triangle cell.
#[inline]
pub fn triangle_height(cell_size: f64) -> f64 {
    (3.0f64.sqrt() / 2.0) * cell_size
}

/// Corners of a triangle cell, apex first for upward triangles.
pub fn triangle_corners(base_x: f64, base_y: f64, cell_size: f64, upward: bool) -> [(f64, f64); 3] {
    let tri_height = triangle_height(cell_size);
    if upward {
        [(base_x + cell_size / 2.0, base_y),
         (base_x + cell_size, base_y + tri_height),
         (base_x, base_y + tri_height)]
    } else {
        [(base_x, base_y),
         (base_x + cell_size, base_y),
         (base_x + cell_size / 2.0, base_y + tri_height)]
    }
}

/// Corners of a pointy-top hexagon with the given centre and circumradius.
pub fn hex_corners(x: f64, y: f64, cell_size: f64) -> [(f64, f64); 6] {
    let mut corners = [(0.0, 0.0); 6];
    for (i, corner) in corners.iter_mut().enumerate() {
        let angle = (PI / 3.0) * i as f64 - PI / 6.0;
        *corner = (x + cell_size * angle.cos(), y + cell_size * angle.sin());
    }
    corners
}

fn link_lattice(cells: &mut [Cell],
                rows: RowsCount,
                columns: ColumnsCount,
                offsets: &[LatticeOffset]) {
    let (RowsCount(row_count), ColumnsCount(col_count)) = (rows, columns);
    for cell in cells.iter_mut() {
        let (row, col) = match *cell.location() {
            Location::Lattice { row, col } => (row as isize, col as isize),
            _ => continue,
        };
        for &(dr, dc, direction, opposite) in offsets {
            let (nr, nc) = (row + dr, col + dc);
            if nr >= 0 && nc >= 0 && (nr as usize) < row_count && (nc as usize) < col_count {
                let neighbour_id = nr as usize * col_count + nc as usize;
                cell.neighbours.push(Neighbour::new(direction, opposite, neighbour_id));
            }
        }
    }
}
