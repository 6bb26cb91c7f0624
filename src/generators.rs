use bit_set::BitSet;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cells::{CellId, Neighbour};
use crate::grid::Grid;

/// One wall removal made while carving, kept in carve order for replay.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveStep {
    pub from: CellId,
    pub to: CellId,
}

/// Apply the recursive backtracker maze generation algorithm to the active cells of a grid.
///
/// A randomised depth first walk from a random active cell: keep stepping to a random unvisited
/// neighbour, carving a passage to it, and back up along the walk whenever a dead end is hit.
/// The stack is explicit so large grids cannot blow the call stack.
///
/// Produces a perfect maze (spanning tree) over the cells reachable from the start. If masking
/// split the grid, cells in other regions stay fully walled.
/// Every wall is put back first so a carved grid can be carved again.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Vec<CarveStep> {
    grid.reset_walls();

    let active: Vec<CellId> = grid.active_cells().map(|cell| cell.id()).collect();
    if active.is_empty() {
        return vec![];
    }

    let mut steps = Vec::with_capacity(active.len() - 1);
    let mut visited = BitSet::with_capacity(grid.size());
    let start = active[rng.gen_range(0..active.len())];
    let _ = visited.insert(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut unvisited: SmallVec<[Neighbour; 6]> = grid.cells()[current]
            .neighbours()
            .iter()
            .filter(|neighbour| grid.is_active(neighbour.cell) && !visited.contains(neighbour.cell))
            .cloned()
            .collect();

        if unvisited.is_empty() {
            let _ = stack.pop();
            continue;
        }

        unvisited.shuffle(rng);
        let next = unvisited[0];
        grid.remove_wall(current, &next);
        let _ = visited.insert(next.cell);
        stack.push(next.cell);
        steps.push(CarveStep {
            from: current,
            to: next.cell,
        });
    }

    debug!("carved {} passages through {} of {} active cells",
           steps.len(),
           visited.len(),
           active.len());
    steps
}
