use docopt::Docopt;
use mazes::{
    grid::Grid,
    grid_dimensions::GridStyle,
    masks::Silhouette,
    maze::{Maze, MazeConfig},
    storage::MazeRecord,
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--style=<s>] [--shape=<s>] [--rows=<n>] [--cols=<n>] [--cell-size=<n>] [--seed=<n>] [--json] [--steps] [--save-edges=<path>]
    mazes_driver --restore=<path> [--json] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --style=<s>            Grid topology [default: rectangular].
                           One of rectangular, hexagonal, triangular or radial.
    --shape=<s>            Maze outline [default: rectangular].
                           One of rectangular, circular, triangular or hexagonal.
                           Every outline but the rectangle picks its own topology.
    --rows=<n>             Rows, or rings of a radial grid [default: 21].
                           Odd, between 5 and 51.
    --cols=<n>             Columns, or first ring cells of a radial grid [default: 31].
                           Odd, between 5 and 51.
    --cell-size=<n>        Cell size, between 10 and 30 [default: 18].
    --seed=<n>             Seed the maze generation for a reproducible maze.
    --restore=<path>       Rebuild the maze stored in a JSON maze record file.
    --json                 Print the maze record as JSON.
    --steps                Print the carve steps in the order they were made.
    --save-edges=<path>    Serialize the maze passages to a text file.
                           Line 1: n(#vertices) m(#edges). Line 2+: edge between vertices.
                           Uses 1-based vertex indices.
";

const MIN_SIDE: usize = 5;
const MAX_SIDE: usize = 51;
const MIN_CELL_SIZE: f64 = 10.0;
const MAX_CELL_SIZE: f64 = 30.0;

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_style: String,
    flag_shape: String,
    flag_rows: usize,
    flag_cols: usize,
    flag_cell_size: f64,
    flag_seed: Option<u64>,
    flag_restore: Option<String>,
    flag_json: bool,
    flag_steps: bool,
    flag_save_edges: Option<String>,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Mazes(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let maze = if let Some(ref path) = args.flag_restore {
        let file = File::open(path).chain_err(|| format!("Failed to open maze record {}", path))?;
        let mut record = MazeRecord::read_from(file)?;
        record.rows = clamp_odd(record.rows, MIN_SIDE, MAX_SIDE);
        record.cols = clamp_odd(record.cols, MIN_SIDE, MAX_SIDE);
        record.cell_size = clamp_cell_size(record.cell_size);
        Maze::from_record(&record)
    } else {
        let config = MazeConfig {
            style: args.flag_style.parse::<GridStyle>()?,
            shape: args.flag_shape.parse::<Silhouette>()?,
            rows: clamp_odd(args.flag_rows, MIN_SIDE, MAX_SIDE),
            columns: clamp_odd(args.flag_cols, MIN_SIDE, MAX_SIDE),
            cell_size: clamp_cell_size(args.flag_cell_size),
            seed: args.flag_seed,
        };
        Maze::generate(&config)
    };

    print_summary(&maze);

    if args.flag_steps {
        for step in maze.steps() {
            println!("{} -> {}", step.from, step.to);
        }
    }

    if args.flag_json {
        println!("{}", maze.to_record().to_json()?);
    }

    if let Some(ref path) = args.flag_save_edges {
        save_maze_graph(maze.grid(), path)?;
    }

    Ok(())
}

/// Clamp into `[min, max]`, then step down to the odd number below if even.
fn clamp_odd(value: usize, min: usize, max: usize) -> usize {
    let clamped = value.max(min).min(max);
    if clamped % 2 == 0 {
        clamped - 1
    } else {
        clamped
    }
}

fn clamp_cell_size(cell_size: f64) -> f64 {
    cell_size.max(MIN_CELL_SIZE).min(MAX_CELL_SIZE)
}

fn print_summary(maze: &Maze) {
    let config = maze.config();
    println!("{} by {} {} maze", config.columns, config.rows, maze.grid().style());
    println!("{}", maze.grid());
    if let Some(seed) = maze.seed() {
        println!("seed: {}", seed);
    }
    println!("carve steps: {}", maze.steps().len());

    let endpoints = maze.endpoints();
    let show = |id: Option<usize>| id.map_or_else(|| String::from("none"), |id| id.to_string());
    println!("start: {}, end: {}", show(endpoints.start), show(endpoints.end));
    println!("solution length: {}", maze.solution().len());
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let passages: Vec<(usize, usize)> = maze_grid.passages().collect();

    let mut graph_data = String::new();
    graph_data.push_str(maze_grid.size().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(passages.len().to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in passages {
        graph_data.push_str((src + 1).to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str((dst + 1).to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
