use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bitvec::prelude::*;
use lazy_static::lazy_static;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CONNECT: usize = 4;
pub const MAX_SIZE: usize = 64;

/// Cell indices of four consecutive cells along a row, column or diagonal.
pub type Window = [usize; CONNECT];
pub type CellBits = BitVec<usize, Lsb0>;
// cell (row, col) lives at bit row * cols + col, row 0 is the bottom row

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'O',
            Player::Computer => 'X',
        }
    }

    fn from_symbol(symbol: char) -> Result<Option<Player>, BoardError> {
        match symbol {
            '.' => Ok(None),
            'O' => Ok(Some(Player::Human)),
            'X' => Ok(Some(Player::Computer)),
            other => Err(BoardError::BadCell(other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Geometry {
    rows: usize,
    cols: usize,
    windows: Vec<Window>,
}

impl Geometry {
    fn new(rows: usize, cols: usize) -> Self {
        let idx = |row: usize, col: usize| row * cols + col;
        let mut windows = Vec::<Window>::new();
        // horizontal
        for row in 0..rows {
            for col in 0..=cols - CONNECT {
                windows.push(std::array::from_fn(|i| idx(row, col + i)));
            }
        }
        // vertical
        for col in 0..cols {
            for row in 0..=rows - CONNECT {
                windows.push(std::array::from_fn(|i| idx(row + i, col)));
            }
        }
        // rising diagonal
        for row in 0..=rows - CONNECT {
            for col in 0..=cols - CONNECT {
                windows.push(std::array::from_fn(|i| idx(row + i, col + i)));
            }
        }
        // falling diagonal
        for row in 0..=rows - CONNECT {
            for col in 0..=cols - CONNECT {
                windows.push(std::array::from_fn(|i| idx(row + CONNECT - 1 - i, col + i)));
            }
        }
        Self { rows, cols, windows }
    }
}

lazy_static! {
    static ref STANDARD_GEOMETRY: Arc<Geometry> = Arc::new(Geometry::new(ROWS, COLS));
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Board {
    geometry: Arc<Geometry>,
    human_cells: CellBits,
    computer_cells: CellBits,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty 6x7 board.
    pub fn new() -> Self {
        Self::from_geometry(Arc::clone(&STANDARD_GEOMETRY))
    }

    pub fn with_size(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows < CONNECT || cols < CONNECT {
            return Err(BoardError::TooSmall { rows, cols });
        }
        if rows > MAX_SIZE || cols > MAX_SIZE {
            return Err(BoardError::TooLarge { rows, cols });
        }
        if rows == ROWS && cols == COLS {
            return Ok(Self::new());
        }
        Ok(Self::from_geometry(Arc::new(Geometry::new(rows, cols))))
    }

    fn from_geometry(geometry: Arc<Geometry>) -> Self {
        let cells = geometry.rows * geometry.cols;
        Self {
            geometry,
            human_cells: bitvec![usize, Lsb0; 0; cells],
            computer_cells: bitvec![usize, Lsb0; 0; cells],
        }
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn cols(&self) -> usize {
        self.geometry.cols
    }

    pub fn total_cells(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Every window of four cells, horizontal first, then vertical, then both diagonals.
    pub fn windows(&self) -> &[Window] {
        &self.geometry.windows
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows() && col < self.cols(),
            "cell ({}, {}) is outside a {}x{} board", row, col, self.rows(), self.cols()
        );
        row * self.cols() + col
    }

    fn cells_of(&self, player: Player) -> &CellBits {
        match player {
            Player::Human => &self.human_cells,
            Player::Computer => &self.computer_cells,
        }
    }

    fn place(&mut self, idx: usize, player: Player) {
        match player {
            Player::Human => self.human_cells.set(idx, true),
            Player::Computer => self.computer_cells.set(idx, true),
        }
    }

    /// Occupant of a cell, rows counted from the bottom.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.cell_at(self.index(row, col))
    }

    pub fn cell_at(&self, idx: usize) -> Option<Player> {
        if self.human_cells[idx] {
            Some(Player::Human)
        } else if self.computer_cells[idx] {
            Some(Player::Computer)
        } else {
            None
        }
    }

    pub fn moves_played(&self) -> usize {
        self.human_cells.count_ones() + self.computer_cells.count_ones()
    }

    pub fn empty_cells(&self) -> usize {
        self.total_cells() - self.moves_played()
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.cell(self.rows() - 1, col).is_some()
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| self.is_column_full(col))
    }

    /// Non-full columns in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols()).filter(|&col| !self.is_column_full(col)).collect()
    }

    fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        (0..self.rows()).find(|&row| self.cell(row, col).is_none())
    }

    /// Drops a piece into `col` and returns the row it landed on.
    ///
    /// Panics if the column is out of range or already full; callers check legality first.
    pub fn apply_move(&mut self, col: usize, player: Player) -> usize {
        assert!(col < self.cols(), "column {} out of range 0..{}", col, self.cols());
        let row = match self.lowest_empty_row(col) {
            Some(row) => row,
            None => panic!("column {} is full", col),
        };
        let idx = self.index(row, col);
        self.place(idx, player);
        row
    }

    pub fn has_four_in_row(&self, player: Player) -> bool {
        let cells = self.cells_of(player);
        self.windows().iter().any(|window| window.iter().all(|&idx| cells[idx]))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses a diagram with the top row first: `.` empty, `O` human, `X` computer.
    fn from_str(diagram: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = diagram.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Board::with_size(lines.len(), cols)?;

        for (line_no, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(BoardError::Ragged { line: line_no, found, expected: cols });
            }
            let row = board.rows() - 1 - line_no;
            for (col, symbol) in line.chars().enumerate() {
                if let Some(player) = Player::from_symbol(symbol)? {
                    let idx = board.index(row, col);
                    board.place(idx, player);
                }
            }
        }

        for col in 0..board.cols() {
            for row in 1..board.rows() {
                if board.cell(row, col).is_some() && board.cell(row - 1, col).is_none() {
                    return Err(BoardError::Floating { column: col });
                }
            }
        }
        Ok(board)
    }
}

impl Board {
    fn row_string(&self, row: usize) -> String {
        (0..self.cols())
            .map(|col| self.cell(row, col).map_or('.', Player::symbol))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.cols() * 2 + 1);
        for col in 0..self.cols() {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        for row in (0..self.rows()).rev() {
            for col in 0..self.cols() {
                let symbol = self.cell(row, col).map_or(' ', Player::symbol);
                write!(f, "|{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", rule)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let cells: Vec<String> = (0..self.rows()).rev().map(|row| self.row_string(row)).collect();

        let mut s = serializer.serialize_struct("Board", 3)?;
        s.serialize_field("rows", &self.rows())?;
        s.serialize_field("cols", &self.cols())?;
        s.serialize_field("cells", &cells)?;
        s.end()
    }
}
