use crate::board::Board;
use crate::error::MoveError;

/// Reads a column typed by the player and checks it can be played on `board`.
pub fn parse_column(line: &str, board: &Board) -> Result<usize, MoveError> {
    let column: i64 = line
        .trim()
        .parse()
        .map_err(|_| MoveError::NotANumber { max: board.cols() - 1 })?;
    if column < 0 || column as u64 >= board.cols() as u64 {
        return Err(MoveError::OutOfRange { column });
    }
    let column = column as usize;
    if board.is_column_full(column) {
        return Err(MoveError::ColumnFull { column });
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn accepts_legal_columns() {
        let board = Board::new();
        assert_eq!(parse_column("0", &board), Ok(0));
        assert_eq!(parse_column(" 6\n", &board), Ok(6));
    }

    #[test]
    fn classifies_bad_input() {
        let mut board = Board::new();
        for _ in 0..board.rows() {
            board.apply_move(4, Player::Human);
        }
        assert_eq!(parse_column("four", &board), Err(MoveError::NotANumber { max: 6 }));
        assert_eq!(parse_column("", &board), Err(MoveError::NotANumber { max: 6 }));
        assert_eq!(parse_column("7", &board), Err(MoveError::OutOfRange { column: 7 }));
        assert_eq!(parse_column("-2", &board), Err(MoveError::OutOfRange { column: -2 }));
        assert_eq!(parse_column("4", &board), Err(MoveError::ColumnFull { column: 4 }));
    }
}
