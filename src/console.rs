use std::io::{self, BufRead, Error, ErrorKind, Write};

use crate::board::{Board, Player};
use crate::error::invalid_input;
use crate::game::{Game, Outcome};
use crate::input::parse_column;

/// Plays `game` to the end over a text prompt.
pub fn run_console<R: BufRead, W: Write>(game: &mut Game, mut input: R, out: &mut W) -> io::Result<Outcome> {
    write!(out, "{}", game.board())?;
    writeln!(out)?;

    let outcome = loop {
        if let Some(outcome) = game.outcome() {
            break outcome;
        }
        match game.to_move() {
            Player::Computer => {
                writeln!(out, "AI is thinking about a move...")?;
                out.flush()?;
                game.play_computer().map_err(invalid_input)?;
            }
            Player::Human => {
                let column = prompt_column(game.board(), &mut input, out)?;
                game.play(column).map_err(invalid_input)?;
            }
        }
        writeln!(out)?;
        write!(out, "{}", game.board())?;
        writeln!(out)?;
    };

    let verdict = match outcome {
        Outcome::Draw => "Draw!",
        Outcome::Winner(Player::Computer) => "AI Wins!",
        Outcome::Winner(Player::Human) => "Player Wins!",
    };
    writeln!(out, "{}", verdict)?;
    Ok(outcome)
}

fn prompt_column<R: BufRead, W: Write>(board: &Board, input: &mut R, out: &mut W) -> io::Result<usize> {
    let mut line = String::new();
    loop {
        write!(out, "Enter a column: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::new(ErrorKind::UnexpectedEof, "input closed before the game ended"));
        }
        match parse_column(&line, board) {
            Ok(column) => return Ok(column),
            Err(e) => {
                writeln!(out, "{}", e)?;
                writeln!(out)?;
                writeln!(out)?;
            }
        }
    }
}
