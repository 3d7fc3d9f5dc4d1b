use std::io::{Error, ErrorKind};

/// Reasons a requested column cannot be played. The messages are shown to the player as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Use a value 0..{max}")]
    NotANumber { max: usize },

    #[error("That is not a valid column.")]
    OutOfRange { column: i64 },

    #[error("That column is full.")]
    ColumnFull { column: usize },

    #[error("The game is already over.")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must be at least 4x4, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },

    #[error("board must be at most 64x64, got {rows}x{cols}")]
    TooLarge { rows: usize, cols: usize },

    #[error("unexpected character {0:?} in board diagram")]
    BadCell(char),

    #[error("diagram line {line} has {found} cells, expected {expected}")]
    Ragged { line: usize, found: usize, expected: usize },

    #[error("piece floating above an empty cell in column {column}")]
    Floating { column: usize },
}

pub fn invalid_input<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::new(ErrorKind::InvalidInput, err)
}
