//! Bounded undo/redo history of generated mazes.

use log::debug;

use crate::maze::Maze;
use crate::storage::MazeRecord;

/// Most mazes kept, older ones are dropped first.
pub const HISTORY_LIMIT: usize = 20;

/// Generated mazes oldest first, with a cursor on the one being shown.
#[derive(Debug, Clone, Default)]
pub struct MazeHistory {
    mazes: Vec<Maze>,
    cursor: Option<usize>,
}

impl MazeHistory {
    pub fn new() -> MazeHistory {
        MazeHistory::default()
    }

    /// Add a new maze after the current one. Anything that could have been redone is lost.
    pub fn push(&mut self, maze: Maze) {
        if let Some(cursor) = self.cursor {
            self.mazes.truncate(cursor + 1);
        }
        self.mazes.push(maze);
        if self.mazes.len() > HISTORY_LIMIT {
            let _ = self.mazes.remove(0);
        }
        self.cursor = Some(self.mazes.len() - 1);
        debug!("history holds {} mazes", self.mazes.len());
    }

    pub fn current(&self) -> Option<&Maze> {
        self.cursor.and_then(|cursor| self.mazes.get(cursor))
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.map_or(false, |cursor| cursor > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.map_or(false, |cursor| cursor + 1 < self.mazes.len())
    }

    /// Step to the previous maze, `None` when already at the oldest.
    pub fn back(&mut self) -> Option<&Maze> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor = self.cursor.map(|cursor| cursor - 1);
        self.current()
    }

    /// Step to the next maze, `None` when already at the newest.
    pub fn forward(&mut self) -> Option<&Maze> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor = self.cursor.map(|cursor| cursor + 1);
        self.current()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mazes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mazes.is_empty()
    }

    pub fn to_records(&self) -> Vec<MazeRecord> {
        self.mazes.iter().map(Maze::to_record).collect()
    }

    /// Rebuild a history from records, keeping the newest `HISTORY_LIMIT` with the cursor on
    /// the last one. `None` when there are no records.
    pub fn from_records(records: &[MazeRecord]) -> Option<MazeHistory> {
        if records.is_empty() {
            return None;
        }
        let skip = records.len().saturating_sub(HISTORY_LIMIT);
        let mazes: Vec<Maze> = records[skip..].iter().map(Maze::from_record).collect();
        let cursor = Some(mazes.len() - 1);
        Some(MazeHistory { mazes, cursor })
    }
}
