//! Generating a whole maze: grid, mask, carving, entrance and exit, solution.

use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{Cell, CellId};
use crate::endpoints::{self, Endpoints};
use crate::generators::{self, CarveStep};
use crate::grid::Grid;
use crate::grid_dimensions::GridStyle;
use crate::grids;
use crate::masks::{self, Silhouette};
use crate::pathing::{self, Solution};
use crate::storage::{self, MazeRecord};
use crate::units::{ColumnsCount, RowsCount};

/// Parameters of a maze.
///
/// `rows` and `columns` are the ring count and first ring cell count for radial grids.
/// Nothing is range checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub style: GridStyle,
    pub shape: Silhouette,
    pub rows: usize,
    pub columns: usize,
    pub cell_size: f64,
    /// Random when not given.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            style: GridStyle::Rectangular,
            shape: Silhouette::Rectangular,
            rows: 21,
            columns: 31,
            cell_size: 18.0,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// The topology actually built. Every shape except the rectangle has its own grid style.
    pub fn resolved_style(&self) -> GridStyle {
        match self.shape {
            Silhouette::Circular => GridStyle::Radial,
            Silhouette::Triangular => GridStyle::Triangular,
            Silhouette::Hexagonal => GridStyle::Hexagonal,
            Silhouette::Rectangular => self.style,
        }
    }

    fn build_grid(&self) -> Grid {
        grids::build(self.resolved_style(),
                     RowsCount(self.rows),
                     ColumnsCount(self.columns),
                     self.cell_size)
    }
}

/// One generated maze. Never changed after generation, regenerating makes a new one.
#[derive(Debug, Clone)]
pub struct Maze {
    config: MazeConfig,
    seed: Option<u64>,
    grid: Grid,
    steps: Vec<CarveStep>,
    endpoints: Endpoints,
    solution: Solution,
}

impl Maze {
    /// Generate with a `ChaCha8Rng` seeded from the config, or from a fresh random seed that
    /// is then kept on the maze.
    pub fn generate(config: &MazeConfig) -> Maze {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!("generating a {} maze, seed {}", config.resolved_style(), seed);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut maze = Maze::generate_with_rng(config, &mut rng);
        maze.seed = Some(seed);
        maze
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Maze {
        let mut grid = config.build_grid();
        masks::apply(&mut grid, config.shape);
        // carving resets every wall, so the entrance and exit are opened afterwards
        let steps = generators::recursive_backtracker(&mut grid, rng);
        Maze::finish(config.clone(), None, grid, steps)
    }

    /// Rebuild a stored maze.
    ///
    /// Records that do not fit the rebuilt grid are ignored with a warning, leaving a fully
    /// walled, unmasked grid. A restored maze has no carve log.
    pub fn from_record(record: &MazeRecord) -> Maze {
        let config = MazeConfig {
            style: record.style,
            shape: record.shape,
            rows: record.rows,
            columns: record.cols,
            cell_size: record.cell_size,
            seed: record.seed,
        };

        let mut grid = config.build_grid();
        match storage::restore_cells(&mut grid, &record.cells) {
            Ok(()) => grid.set_silhouette(record.shape),
            Err(e) => warn!("ignoring stored cells: {}", e),
        }
        Maze::finish(config, record.seed, grid, vec![])
    }

    fn finish(config: MazeConfig,
              seed: Option<u64>,
              mut grid: Grid,
              steps: Vec<CarveStep>)
              -> Maze {
        let endpoints = endpoints::pick(&grid);
        endpoints::open_boundary(&mut grid, &endpoints);
        let solution = pathing::shortest_path(&grid, endpoints.start, endpoints.end);
        info!("{}, {} carve steps, solution length {}",
              grid,
              steps.len(),
              solution.len());

        Maze {
            config,
            seed,
            grid,
            steps,
            endpoints,
            solution,
        }
    }

    pub fn to_record(&self) -> MazeRecord {
        MazeRecord {
            rows: self.config.rows,
            cols: self.config.columns,
            cell_size: self.config.cell_size,
            style: self.config.style,
            shape: self.config.shape,
            seed: self.seed,
            cells: storage::serialize_cells(&self.grid),
        }
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Seed the maze was carved with, if known.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn steps(&self) -> &[CarveStep] {
        &self.steps
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    #[inline]
    pub fn solution(&self) -> &[CellId] {
        &self.solution
    }

    pub fn solution_cells<'a>(&'a self) -> impl Iterator<Item = &'a Cell> + 'a {
        self.grid.cells_on(&self.solution)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Direction;

    fn config(style: GridStyle, shape: Silhouette, seed: u64) -> MazeConfig {
        MazeConfig {
            style,
            shape,
            rows: 11,
            columns: 13,
            cell_size: 12.0,
            seed: Some(seed),
        }
    }

    #[test]
    fn default_config() {
        let config = MazeConfig::default();
        assert_eq!((config.rows, config.columns, config.cell_size), (21, 31, 18.0));
        assert_eq!(config.resolved_style(), GridStyle::Rectangular);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn shapes_pick_their_style() {
        let mut c = config(GridStyle::Hexagonal, Silhouette::Rectangular, 0);
        assert_eq!(c.resolved_style(), GridStyle::Hexagonal);
        c.shape = Silhouette::Circular;
        assert_eq!(c.resolved_style(), GridStyle::Radial);
        c.shape = Silhouette::Triangular;
        assert_eq!(c.resolved_style(), GridStyle::Triangular);
        c.style = GridStyle::Rectangular;
        c.shape = Silhouette::Hexagonal;
        assert_eq!(c.resolved_style(), GridStyle::Hexagonal);
    }

    #[test]
    fn seeds_reproduce_mazes() {
        let c = config(GridStyle::Rectangular, Silhouette::Circular, 1234);
        let a = Maze::generate(&c);
        let b = Maze::generate(&c);
        assert_eq!(a.seed(), Some(1234));
        assert_eq!(a.steps(), b.steps());
        assert_eq!(a.to_record(), b.to_record());
        assert_eq!(a.grid().style(), GridStyle::Radial);
    }

    #[test]
    fn random_seeds_are_kept() {
        let a = Maze::generate(&MazeConfig::default());
        let seed = a.seed().unwrap();
        let again = MazeConfig {
            seed: Some(seed),
            ..MazeConfig::default()
        };
        assert_eq!(Maze::generate(&again).solution(), a.solution());
    }

    #[test]
    fn solution_runs_between_the_endpoints() {
        for &(style, shape) in &[(GridStyle::Rectangular, Silhouette::Rectangular),
                                 (GridStyle::Hexagonal, Silhouette::Rectangular),
                                 (GridStyle::Rectangular, Silhouette::Triangular),
                                 (GridStyle::Rectangular, Silhouette::Hexagonal),
                                 (GridStyle::Rectangular, Silhouette::Circular)] {
            let maze = Maze::generate(&config(style, shape, 8));
            let endpoints = maze.endpoints();
            let solution = maze.solution();
            assert!(!solution.is_empty(), "{} {}", style, shape);
            assert_eq!(solution.first().cloned(), endpoints.start);
            assert_eq!(solution.last().cloned(), endpoints.end);
            assert!(solution.windows(2).all(|pair| maze.grid().is_linked(pair[0], pair[1])));
            assert_eq!(maze.solution_cells().count(), solution.len());
            assert_eq!(maze.steps().len() + 1, maze.grid().active_count());
        }
    }

    #[test]
    fn entrance_is_open_after_carving() {
        // 13 columns by 11 rows: the top left corner is further from the centre sideways
        // than upwards, so the left wall is the one knocked through.
        let maze = Maze::generate(&config(GridStyle::Rectangular, Silhouette::Rectangular, 3));
        let start = maze.grid().cell(maze.endpoints().start.unwrap()).unwrap();
        assert_eq!(start.id(), 0);
        assert!(!start.walls().has_wall(Direction::Left, None));
        assert!(start.walls().has_wall(Direction::Top, None));

        // on a square grid the corner faces both ways equally, the first wall key wins
        let square = MazeConfig {
            columns: 11,
            ..config(GridStyle::Rectangular, Silhouette::Rectangular, 3)
        };
        let maze = Maze::generate(&square);
        let start = maze.grid().cell(0).unwrap();
        assert_eq!(maze.endpoints().start, Some(0));
        assert!(!start.walls().has_wall(Direction::Top, None));
        assert!(start.walls().has_wall(Direction::Left, None));
    }

    #[test]
    fn records_restore_the_maze() {
        let maze = Maze::generate(&config(GridStyle::Triangular, Silhouette::Triangular, 77));
        let record = maze.to_record();
        let restored = Maze::from_record(&record);

        assert!(restored.steps().is_empty());
        assert_eq!(restored.seed(), Some(77));
        assert_eq!(restored.endpoints(), maze.endpoints());
        assert_eq!(restored.solution(), maze.solution());
        assert_eq!(restored.to_record(), record);
    }

    #[test]
    fn mismatched_records_fall_back_to_a_fresh_grid() {
        let mut record = Maze::generate(&config(GridStyle::Hexagonal, Silhouette::Rectangular, 5))
            .to_record();
        record.cells.truncate(10);
        let restored = Maze::from_record(&record);

        assert_eq!(restored.grid().active_count(), 11 * 13);
        assert_eq!(restored.grid().passages().count(), 0);
        assert!(restored.solution().is_empty());
        assert_eq!(restored.to_record().cells.len(), 11 * 13);
    }
}
