use std::io::{self, Error, ErrorKind};

use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use connect_four_engine::board::{Player, COLS, MAX_SIZE, ROWS};
use connect_four_engine::config::{depth_from_arg, GameConfig};
use connect_four_engine::console::run_console;
use connect_four_engine::error::invalid_input;
use connect_four_engine::game::Game;
use connect_four_engine::protocol::{run_json, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth of the computer player, 0 up to the number of cells (default 5)
    #[arg(allow_hyphen_values = true)]
    depth: Option<String>,
    #[arg(long, default_value_t = ROWS as u16, value_parser = clap::value_parser!(u16).range(4..=MAX_SIZE as i64))]
    rows: u16,
    #[arg(long, default_value_t = COLS as u16, value_parser = clap::value_parser!(u16).range(4..=MAX_SIZE as i64))]
    cols: u16,
    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,
    /// Speak line-delimited JSON on stdin/stdout instead of the text prompt
    #[arg(long)]
    json: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()
        .map_err(|e| Error::new(ErrorKind::Other, e))?;

    let (rows, cols) = (usize::from(args.rows), usize::from(args.cols));
    let config = GameConfig {
        rows,
        cols,
        depth: depth_from_arg(args.depth.as_deref(), rows * cols),
        first: if args.computer_first { Player::Computer } else { Player::Human },
    };
    info!("Starting game: {:?}", config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if args.json {
        let mut session = Session::new(config);
        run_json(&mut session, stdin.lock(), &mut stdout)
    } else {
        let mut game = Game::new(&config).map_err(invalid_input)?;
        let outcome = run_console(&mut game, stdin.lock(), &mut stdout)?;
        info!("Finished: {:?}", outcome);
        Ok(())
    }
}
