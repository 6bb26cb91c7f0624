//! **mazes** builds grids over four planar topologies, carves perfect mazes into them and
//! finds the solution between an entrance and an exit.
//!
//! The usual entry point is `maze::Maze::generate`, which runs the whole pipeline: build the
//! grid, mask it to a silhouette, carve, pick and open the endpoints, solve. Each stage is
//! also usable on its own.

pub mod cells;
pub mod endpoints;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grids;
pub mod history;
pub mod masks;
pub mod maze;
pub mod pathing;
pub mod storage;
pub mod units;
mod utils;
