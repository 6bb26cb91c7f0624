use std::collections::VecDeque;

use bit_set::BitSet;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::CellId;
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};

/// Cell ids from start to end inclusive. Empty when there is no open path.
pub type Solution = Vec<CellId>;

/// Hop counts from a start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start: CellId,
    distances: FnvHashMap<CellId, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start`. `None` when the start is not an active cell.
    pub fn for_grid(grid: &Grid, start: CellId) -> Option<Distances> {
        if !grid.is_active(start) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start, 0);

        // Every step costs one, so the first time a cell is reached is its shortest distance
        // and the distances map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for &cell in &frontier {
                let distance_to_cell = distances.get(&cell).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }
                for link in grid.links(cell) {
                    if !distances.contains_key(&link) {
                        distances.insert(link, distance_to_cell + 1);
                        new_frontier.push(link);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, id: CellId) -> Option<u32> {
        self.distances.get(&id).cloned()
    }

    /// Number of cells reached, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Every reached cell at the maximum distance, in id order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[CellId; 8]> {
        self.distances
            .iter()
            .filter(|&(_, &distance)| distance == self.max_distance)
            .map(|(&id, _)| id)
            .sorted()
            .collect()
    }
}

/// Breadth first search for the shortest open path between two cells.
///
/// Either id missing, unknown or inactive gives an empty solution, as does an end that
/// cannot be reached from the start.
pub fn shortest_path(grid: &Grid, start: Option<CellId>, end: Option<CellId>) -> Solution {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if grid.is_active(start) && grid.is_active(end) => (start, end),
        _ => return vec![],
    };
    if start == end {
        return vec![start];
    }

    let mut visited = BitSet::with_capacity(grid.size());
    let mut parents: FnvHashMap<CellId, CellId> = utils::fnv_hashmap(grid.size());
    let mut queue = VecDeque::new();
    let _ = visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            break;
        }
        for link in grid.links(current) {
            if visited.insert(link) {
                parents.insert(link, current);
                queue.push_back(link);
            }
        }
    }

    if !visited.contains(end) {
        return vec![];
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Longest path through a perfect maze: the furthest cell from any active cell is one end,
/// the furthest cell from that is the other.
///
/// On a maze with loops, or split up by a mask, this is only the longest path of the region
/// holding the first active cell.
pub fn longest_path(grid: &Grid) -> Solution {
    let arbitrary_start = match grid.active_cells().next() {
        Some(cell) => cell.id(),
        None => return vec![],
    };

    let path_end = |from: CellId| {
        Distances::for_grid(grid, from)
            .and_then(|distances| distances.furthest_points_on_grid().first().cloned())
    };

    let start = path_end(arbitrary_start);
    let end = start.and_then(|start| path_end(start));
    shortest_path(grid, start, end)
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::generators;
    use crate::grid_dimensions::GridStyle;
    use crate::grids;
    use crate::masks::{self, Silhouette};
    use crate::units::{ColumnsCount, RowsCount};

    const STYLES: [GridStyle; 4] = [GridStyle::Rectangular,
                                    GridStyle::Hexagonal,
                                    GridStyle::Triangular,
                                    GridStyle::Radial];

    fn open_square() -> Grid {
        // 2x2 with every inner wall removed
        let mut g = grids::build(GridStyle::Rectangular, RowsCount(2), ColumnsCount(2), 10.0);
        for id in 0..4 {
            let links = g.cells()[id].neighbours().to_vec();
            for link in &links {
                g.remove_wall(id, link);
            }
        }
        g
    }

    fn carved(style: GridStyle, rows: usize, cols: usize, seed: u64) -> Grid {
        let mut g = grids::build(style, RowsCount(rows), ColumnsCount(cols), 10.0);
        let _ = generators::recursive_backtracker(&mut g, &mut ChaCha8Rng::seed_from_u64(seed));
        g
    }

    #[test]
    fn distances_construction_requires_valid_start() {
        let g = open_square();
        assert!(Distances::for_grid(&g, 4).is_none());
        assert_eq!(Distances::for_grid(&g, 1).map(|d| d.start()), Some(1));
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = grids::build(GridStyle::Rectangular, RowsCount(3), ColumnsCount(3), 10.0);
        let distances = Distances::for_grid(&g, 0).unwrap();
        for id in 0..9 {
            let d = distances.distance_from_start_to(id);
            if id == 0 {
                assert_eq!(d, Some(0));
            } else {
                assert!(d.is_none());
            }
        }
        assert_eq!(distances.distance_from_start_to(100), None);
        assert_eq!(distances.reachable_count(), 1);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_square();
        let distances = Distances::for_grid(&g, 0).unwrap();
        assert_eq!(distances.distance_from_start_to(0), Some(0));
        assert_eq!(distances.distance_from_start_to(1), Some(1));
        assert_eq!(distances.distance_from_start_to(2), Some(1));
        assert_eq!(distances.distance_from_start_to(3), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(distances.furthest_points_on_grid().to_vec(), vec![3]);
    }

    #[test]
    fn path_on_open_grid() {
        let g = open_square();
        let path = shortest_path(&g, Some(0), Some(3));
        assert_eq!(path.len(), 3);
        assert_eq!((path[0], path[2]), (0, 3));
        assert_eq!(shortest_path(&g, Some(2), Some(2)), vec![2]);
    }

    #[test]
    fn missing_endpoints_give_no_path() {
        let mut g = open_square();
        assert!(shortest_path(&g, None, Some(3)).is_empty());
        assert!(shortest_path(&g, Some(0), None).is_empty());
        assert!(shortest_path(&g, Some(0), Some(17)).is_empty());
        g.deactivate_cells(vec![3]);
        assert!(shortest_path(&g, Some(0), Some(3)).is_empty());
        assert!(shortest_path(&g, Some(3), Some(3)).is_empty());
    }

    #[test]
    fn disconnected_regions_have_no_path() {
        let mut g = grids::build(GridStyle::Rectangular, RowsCount(21), ColumnsCount(21), 10.0);
        masks::apply(&mut g, Silhouette::Circular);
        // cut the circle in two down the middle column
        g.deactivate_cells((0..21).map(|row| row * 21 + 10));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let _ = generators::recursive_backtracker(&mut g, &mut rng);

        let (left, right) = (10 * 21 + 5, 10 * 21 + 15);
        assert!(g.is_active(left) && g.is_active(right));
        assert!(shortest_path(&g, Some(left), Some(right)).is_empty());
    }

    #[test]
    fn longest_path_spans_the_maze() {
        let g = carved(GridStyle::Rectangular, 8, 8, 21);
        let path = longest_path(&g);
        let from_start = Distances::for_grid(&g, path[0]).unwrap();
        assert_eq!(path.len() as u32, from_start.max() + 1);

        let empty = grids::build(GridStyle::Hexagonal, RowsCount(0), ColumnsCount(0), 10.0);
        assert!(longest_path(&empty).is_empty());
    }

    #[test]
    fn quickcheck_paths_are_shortest_and_open() {
        fn p(style: u8, rows: u8, cols: u8, seed: u64, a: usize, b: usize) -> TestResult {
            let style = STYLES[style as usize % STYLES.len()];
            let g = carved(style, rows as usize % 10, cols as usize % 10, seed);
            if g.size() == 0 {
                return TestResult::discard();
            }
            let (a, b) = (a % g.size(), b % g.size());

            let path = shortest_path(&g, Some(a), Some(b));
            let distance = Distances::for_grid(&g, a).and_then(|d| d.distance_from_start_to(b));
            let distance = match distance {
                Some(distance) => distance,
                None => return TestResult::from_bool(path.is_empty()),
            };

            let consecutive_linked = path.windows(2).all(|pair| g.is_linked(pair[0], pair[1]));
            TestResult::from_bool(consecutive_linked && path.len() as u32 == distance + 1 &&
                                  path.first() == Some(&a) &&
                                  path.last() == Some(&b))
        }
        quickcheck(p as fn(u8, u8, u8, u64, usize, usize) -> TestResult);
    }
}
