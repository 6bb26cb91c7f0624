use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::units::{ColumnsCount, NodesCount, RowIndex, RowLength, RowsCount};

/// Minimum number of cells in the first ring around the centre of a radial grid.
pub const MIN_FIRST_RING_CELLS: usize = 4;

/// The four supported grid topologies.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    Rectangular,
    Hexagonal,
    Triangular,
    Radial,
}

impl fmt::Display for GridStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            GridStyle::Rectangular => "rectangular",
            GridStyle::Hexagonal => "hexagonal",
            GridStyle::Triangular => "triangular",
            GridStyle::Radial => "radial",
        };
        f.write_str(name)
    }
}

impl FromStr for GridStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<GridStyle, String> {
        match s.to_lowercase().as_str() {
            "rectangular" => Ok(GridStyle::Rectangular),
            "hexagonal" => Ok(GridStyle::Hexagonal),
            "triangular" => Ok(GridStyle::Triangular),
            "radial" => Ok(GridStyle::Radial),
            other => Err(format!("unknown grid style '{}'", other)),
        }
    }
}

/// Size parameters of a built grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDimensions {
    Lattice { rows: RowsCount, columns: ColumnsCount },
    Polar(PolarGridDimensions),
}

impl GridDimensions {
    pub fn size(&self) -> NodesCount {
        match *self {
            GridDimensions::Lattice { rows, columns } => NodesCount(rows.0 * columns.0),
            GridDimensions::Polar(ref polar) => polar.size(),
        }
    }

    /// Rows of a lattice, rings of a polar grid.
    pub fn rows(&self) -> RowsCount {
        match *self {
            GridDimensions::Lattice { rows, .. } => rows,
            GridDimensions::Polar(ref polar) => polar.rings(),
        }
    }

    /// Columns of a lattice. For a polar grid, the cell count of the first ring around the
    /// centre, or 1 when only the centre exists.
    pub fn columns(&self) -> ColumnsCount {
        match *self {
            GridDimensions::Lattice { columns, .. } => columns,
            GridDimensions::Polar(ref polar) => {
                ColumnsCount(polar.ring_length(RowIndex(1)).map_or(1, |length| length.0))
            }
        }
    }
}

/// Cell counts of each ring in a radial grid.
///
/// Ring 0 is the single centre cell. Every later ring holds an integer multiple of the cells
/// of the ring inside it, picked so that cells stay roughly as wide as they are tall.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarGridDimensions {
    ring_cell_counts: Vec<usize>,
    size: NodesCount,
}

impl PolarGridDimensions {
    pub fn new(rings: RowsCount, cells_per_ring: ColumnsCount) -> PolarGridDimensions {
        let ring_count = rings.0.max(1);
        let mut cell_counts = Vec::with_capacity(ring_count);
        cell_counts.push(1);
        if ring_count > 1 {
            cell_counts.push(cells_per_ring.0.max(MIN_FIRST_RING_CELLS));
        }

        // Rings are one unit tall, so the unit circumference divided by the previous ring's
        // cell count is directly the cell width over the cell height.
        for ring in 2..ring_count {
            let previous_count = cell_counts[ring - 1];
            let circumference = 2.0 * PI * ring as f64;
            let estimated_width = circumference / previous_count as f64;
            let ratio = (estimated_width.round() as usize).max(1);
            cell_counts.push(previous_count * ratio);
        }

        let size = cell_counts.iter().sum();
        PolarGridDimensions {
            ring_cell_counts: cell_counts,
            size: NodesCount(size),
        }
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        self.size
    }

    #[inline]
    pub fn rings(&self) -> RowsCount {
        RowsCount(self.ring_cell_counts.len())
    }

    pub fn ring_length(&self, ring: RowIndex) -> Option<RowLength> {
        self.ring_cell_counts.get(ring.0).map(|&count| RowLength(count))
    }

    /// Outer cells per cell of the given ring. 1 for the outermost ring.
    pub fn outward_ratio(&self, ring: RowIndex) -> usize {
        match (self.ring_cell_counts.get(ring.0), self.ring_cell_counts.get(ring.0 + 1)) {
            (Some(&count), Some(&next_count)) => (next_count / count).max(1),
            _ => 1,
        }
    }

    #[inline]
    pub fn ring_cell_counts(&self) -> &[usize] {
        &self.ring_cell_counts
    }
}
