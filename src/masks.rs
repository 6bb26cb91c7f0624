use std::fmt;
use std::str::FromStr;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::grid_dimensions::GridStyle;

/// `sin(60°)`, the half height of a unit hexagon lying on its side.
const HEX_HALF_HEIGHT: f64 = 0.866;

/// Outline cut out of a grid. Cells whose centre falls outside it are turned off.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Silhouette {
    Rectangular,
    Circular,
    Triangular,
    Hexagonal,
}

impl Default for Silhouette {
    fn default() -> Silhouette {
        Silhouette::Rectangular
    }
}

impl fmt::Display for Silhouette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Silhouette::Rectangular => "rectangular",
            Silhouette::Circular => "circular",
            Silhouette::Triangular => "triangular",
            Silhouette::Hexagonal => "hexagonal",
        };
        f.write_str(name)
    }
}

impl FromStr for Silhouette {
    type Err = String;

    fn from_str(s: &str) -> Result<Silhouette, String> {
        match s.to_lowercase().as_str() {
            "rectangular" => Ok(Silhouette::Rectangular),
            "circular" => Ok(Silhouette::Circular),
            "triangular" => Ok(Silhouette::Triangular),
            "hexagonal" => Ok(Silhouette::Hexagonal),
            other => Err(format!("unknown shape '{}'", other)),
        }
    }
}

impl Silhouette {
    /// Membership test on a point normalised to the grid bounds.
    ///
    /// `x` and `y` run over `[-1, 1]` from the bounds centre, `y_from_top` over `[0, 1]` from
    /// the top edge of the bounds.
    pub fn contains(self, x: f64, y: f64, y_from_top: f64) -> bool {
        match self {
            Silhouette::Rectangular => true,
            Silhouette::Circular => x * x + y * y <= 1.0,
            Silhouette::Triangular => y_from_top >= x.abs(),
            Silhouette::Hexagonal => {
                y.abs() <= HEX_HALF_HEIGHT && x.abs() <= 1.0 &&
                x.abs() + y.abs() / HEX_HALF_HEIGHT <= 1.0
            }
        }
    }
}

/// Switch off every cell of the grid whose centre lies outside the silhouette, then drop all
/// adjacency to and from the switched off cells.
///
/// Radial grids are circular already and are never masked.
pub fn apply(grid: &mut Grid, silhouette: Silhouette) {
    if grid.style() == GridStyle::Radial {
        return;
    }

    let bounds = *grid.bounds();
    let (centre_x, centre_y) = bounds.centre();
    let width = non_zero(bounds.width());
    let height = non_zero(bounds.height());

    for cell in grid.cells_mut() {
        let x_norm = (cell.x - centre_x) / (width / 2.0);
        let y_norm = (cell.y - centre_y) / (height / 2.0);
        let y_from_top = (cell.y - bounds.min_y) / height;
        cell.active = silhouette.contains(x_norm, y_norm, y_from_top);
    }
    grid.prune_inactive_neighbours();
    grid.set_silhouette(silhouette);

    debug!("{} mask leaves {} of {} cells active",
           silhouette,
           grid.active_count(),
           grid.size());
}

#[inline]
fn non_zero(extent: f64) -> f64 {
    if extent == 0.0 {
        1.0
    } else {
        extent
    }
}
