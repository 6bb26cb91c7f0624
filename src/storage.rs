//! Per cell records of a maze for serialization.
//!
//! Records hold only what cannot be rebuilt from the size parameters: which cells are active
//! and the state of their walls. Adjacency is rebuilt from the grid style and then pruned
//! to the restored active flags.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use error_chain::bail;
use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{Direction, WallState};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridStyle;
use crate::masks::Silhouette;

/// Stored state of one cell, aligned with the grid by position.
/// Missing fields read as an inactive cell with no stored walls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub walls: BTreeMap<Direction, WallState>,
}

/// Everything needed to rebuild a generated maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeRecord {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f64,
    pub style: GridStyle,
    pub shape: Silhouette,
    pub seed: Option<u64>,
    pub cells: Vec<CellRecord>,
}

impl MazeRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<MazeRecord> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<MazeRecord> {
        serde_json::from_reader(reader).chain_err(|| "could not read a maze record")
    }
}

/// Snapshot the active flag and walls of every cell, in id order.
pub fn serialize_cells(grid: &Grid) -> Vec<CellRecord> {
    grid.cells()
        .iter()
        .map(|cell| {
            CellRecord {
                active: cell.is_active(),
                walls: cell.walls()
                    .iter()
                    .map(|(direction, state)| (direction, state.clone()))
                    .collect(),
            }
        })
        .collect()
}

/// Override the active flags and walls of a freshly built grid with stored records.
///
/// The records must line up one to one with the cells, otherwise nothing is changed.
/// Walls merge per edge: a stored edge replaces the built one, an edge the grid does not know
/// is added, and an edge missing from the record keeps its built state.
pub fn restore_cells(grid: &mut Grid, records: &[CellRecord]) -> Result<()> {
    if records.len() != grid.size() {
        bail!(ErrorKind::CellCountMismatch(grid.size(), records.len()));
    }

    for (cell, record) in grid.cells_mut().iter_mut().zip(records) {
        cell.active = record.active;
        for (&direction, state) in &record.walls {
            cell.walls.insert(direction, state.clone());
        }
    }
    grid.prune_inactive_neighbours();

    debug!("restored {} cells, {} active", records.len(), grid.active_count());
    Ok(())
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::generators;
    use crate::grids;
    use crate::masks;
    use crate::units::{ColumnsCount, RowsCount};

    fn carved(style: GridStyle, shape: Silhouette) -> Grid {
        let mut g = grids::build(style, RowsCount(7), ColumnsCount(9), 12.0);
        masks::apply(&mut g, shape);
        let _ = generators::recursive_backtracker(&mut g, &mut ChaCha8Rng::seed_from_u64(4));
        g
    }

    #[test]
    fn restoring_reproduces_cells() {
        for &(style, shape) in &[(GridStyle::Rectangular, Silhouette::Circular),
                                 (GridStyle::Hexagonal, Silhouette::Hexagonal),
                                 (GridStyle::Triangular, Silhouette::Triangular),
                                 (GridStyle::Radial, Silhouette::Rectangular)] {
            let original = carved(style, shape);
            let records = serialize_cells(&original);

            let mut restored = grids::build(style, RowsCount(7), ColumnsCount(9), 12.0);
            restore_cells(&mut restored, &records).unwrap();

            assert_eq!(serialize_cells(&restored), records);
            for (a, b) in original.cells().iter().zip(restored.cells()) {
                assert_eq!(a.walls(), b.walls());
                assert_eq!(a.neighbours(), b.neighbours());
            }
            assert_eq!(original.passages().collect::<Vec<_>>(),
                       restored.passages().collect::<Vec<_>>());
        }
    }

    #[test]
    fn mismatched_records_leave_the_grid_alone() {
        let records = serialize_cells(&carved(GridStyle::Rectangular, Silhouette::Rectangular));
        let mut g = grids::build(GridStyle::Rectangular, RowsCount(3), ColumnsCount(3), 12.0);
        let before = serialize_cells(&g);

        match restore_cells(&mut g, &records) {
            Err(Error(ErrorKind::CellCountMismatch(expected, found), _)) => {
                assert_eq!((expected, found), (9, 63));
            }
            other => panic!("expected a cell count mismatch, got {:?}", other),
        }
        assert_eq!(serialize_cells(&g), before);
    }

    #[test]
    fn walls_are_merged_per_edge() {
        let mut g = grids::build(GridStyle::Rectangular, RowsCount(1), ColumnsCount(2), 10.0);
        let mut first = BTreeMap::new();
        first.insert(Direction::Right, WallState::Single(false));
        first.insert(Direction::Base, WallState::Single(true));
        let records = vec![CellRecord {
                               active: true,
                               walls: first,
                           },
                           CellRecord {
                               active: false,
                               walls: BTreeMap::new(),
                           }];
        restore_cells(&mut g, &records).unwrap();

        let walls = g.cells()[0].walls();
        let directions: Vec<Direction> = walls.directions().collect();
        assert_eq!(directions,
                   vec![Direction::Top,
                        Direction::Right,
                        Direction::Bottom,
                        Direction::Left,
                        Direction::Base]);
        assert!(!walls.has_wall(Direction::Right, None));
        assert!(walls.has_wall(Direction::Top, None));
        assert!(!g.is_active(1));
        assert!(g.cells()[0].neighbours().is_empty());
    }

    #[test]
    fn json_uses_the_wall_keys() {
        let g = grids::build(GridStyle::Radial, RowsCount(2), ColumnsCount(4), 10.0);
        let record = MazeRecord {
            rows: 2,
            cols: 4,
            cell_size: 10.0,
            style: GridStyle::Radial,
            shape: Silhouette::Circular,
            seed: Some(3),
            cells: serialize_cells(&g),
        };
        let json = record.to_json().unwrap();
        assert!(json.contains(r#""style":"radial""#));
        assert!(json.contains(r#""shape":"circular""#));
        assert!(json.contains(r#""outward":[true,true,true,true]"#));
        assert!(json.contains(r#""cw":false"#));
        assert_eq!(MazeRecord::from_json(&json).unwrap(), record);

        let mut buffer = Vec::new();
        record.write_to(&mut buffer).unwrap();
        assert_eq!(MazeRecord::read_from(buffer.as_slice()).unwrap(), record);
    }

    #[test]
    fn partial_cell_records_are_accepted() {
        let json = r#"{"rows":1,"cols":2,"cell_size":10.0,"style":"rectangular",
                       "shape":"rectangular","seed":null,
                       "cells":[{"active":true},{"walls":{"left":false}}]}"#;
        let record = MazeRecord::from_json(json).unwrap();
        assert_eq!(record.cells[0],
                   CellRecord {
                       active: true,
                       walls: BTreeMap::new(),
                   });
        assert!(!record.cells[1].active);

        let mut g = grids::build(GridStyle::Rectangular, RowsCount(1), ColumnsCount(2), 10.0);
        restore_cells(&mut g, &record.cells).unwrap();
        assert!(g.is_active(0) && !g.is_active(1));
        assert!(g.cells()[0].walls().has_wall(Direction::Right, None));
        assert!(!g.cells()[1].walls().has_wall(Direction::Left, None));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(MazeRecord::from_json("{\"rows\": 3").is_err());
        assert!(MazeRecord::read_from("[]".as_bytes()).is_err());
    }
}
