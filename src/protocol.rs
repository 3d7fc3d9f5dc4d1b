//! Line-delimited JSON front end, one message per line on stdin and stdout.
//!
//! Client messages: `{"start": <human moves first>}` and `{"move": <column>}`.
//! Server messages: `legal_moves`, `move`, `end`, `error`, each alongside the current `board`.

use std::io::{self, BufRead, Error, ErrorKind, Write};

use log::{error, info};
use serde_json::{json, Value};

use crate::board::Player;
use crate::config::GameConfig;
use crate::error::invalid_input;
use crate::game::{Game, Outcome};

pub struct Session {
    config: GameConfig,
    game: Option<Game>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self { config, game: None }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }
}

pub fn run_json<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Value>(&line) {
            Ok(data) => {
                info!("Received: {}", data);
                handle_message(session, data).unwrap_or_else(|e| {
                    error!("Error handling message: {:?}", e);
                    json!({ "error": e.to_string() })
                })
            }
            Err(e) => {
                error!("Error parsing JSON: {:?}", e);
                json!({ "error": format!("invalid JSON: {}", e) })
            }
        };
        let response_str = response.to_string();
        writeln!(out, "{}", response_str)?;
        out.flush()?;
        info!("Sent: {}", response_str);
    }
    Ok(())
}

pub fn handle_message(session: &mut Session, data: Value) -> Result<Value, Error> {
    let map = data.as_object()
        .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "Expected a dict"))?;

    if map.contains_key("start") {
        let human_first = data["start"].as_bool().ok_or_else(
            || Error::new(ErrorKind::InvalidInput, "Expected boolean field: start")
        )?;
        handle_start(session, human_first)
    } else if map.contains_key("move") {
        let game = session.game.as_mut()
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "Game has not started yet"))?;
        let column: usize = serde_json::from_value(data["move"].clone())?;
        handle_move(game, column)
    } else {
        Err(Error::new(ErrorKind::InvalidInput, format!("Invalid message: {}", data)))
    }
}

fn handle_start(session: &mut Session, human_first: bool) -> Result<Value, Error> {
    let config = GameConfig {
        first: if human_first { Player::Human } else { Player::Computer },
        ..session.config.clone()
    };
    let game = session.game.insert(Game::new(&config).map_err(invalid_input)?);
    if human_first {
        Ok(json!({ "legal_moves": game.board().legal_columns(), "board": game.board() }))
    } else {
        make_engine_move(game)
    }
}

fn handle_move(game: &mut Game, column: usize) -> Result<Value, Error> {
    match game.play(column).map_err(invalid_input)? {
        Some(outcome) => Ok(game_over(game, outcome, None)),
        None => make_engine_move(game),
    }
}

fn make_engine_move(game: &mut Game) -> Result<Value, Error> {
    let (column, outcome) = game.play_computer().map_err(invalid_input)?;
    match outcome {
        Some(outcome) => Ok(game_over(game, outcome, Some(column))),
        None => Ok(json!({
            "move": column,
            "legal_moves": game.board().legal_columns(),
            "board": game.board(),
        })),
    }
}

fn game_over(game: &Game, outcome: Outcome, column: Option<usize>) -> Value {
    json!({ "end": outcome, "move": column, "board": game.board() })
}
