use connect_four_engine::board::{Board, Player};
use connect_four_engine::engine::{evaluate, Engine, Score, SearchResult, SCORE_MAX, SCORE_MIN};

/// Plain minimax over every legal column, no pruning.
fn reference_minimax(board: &Board, depth: u32, to_move: Player, maximizer: Player, horizon: usize) -> SearchResult {
    if depth == 0 || depth as usize >= horizon {
        return SearchResult { score: evaluate(board, maximizer), column: None };
    }
    let maximizing = to_move == maximizer;
    let mut best = SearchResult { score: if maximizing { SCORE_MIN } else { SCORE_MAX }, column: None };
    if board.has_four_in_row(to_move.opponent()) {
        return best;
    }
    for column in board.legal_columns() {
        let mut child = board.clone();
        child.apply_move(column, to_move);
        let score: Score = reference_minimax(&child, depth - 1, to_move.opponent(), maximizer, horizon).score;
        let better = if maximizing { score > best.score } else { score < best.score };
        if better {
            best = SearchResult { score, column: Some(column) };
        }
    }
    best
}

/// Replays `columns` alternately, starting with the human.
fn position(columns: &[usize]) -> Board {
    let mut board = Board::new();
    let mut player = Player::Human;
    for &column in columns {
        board.apply_move(column, player);
        player = player.opponent();
    }
    board
}

fn positions() -> Vec<(Board, Player)> {
    let lines: [&[usize]; 8] = [
        &[],
        &[3],
        &[3, 3, 2, 4],
        &[0, 1, 2, 3, 4, 5, 6],
        &[3, 2, 3, 2, 4, 4, 1],
        &[6, 6, 6, 5, 5, 4, 0, 3, 3, 3],
        &[2, 3, 3, 4, 4, 5, 4, 5, 5, 1, 5],
        &[3, 3, 3, 3, 3, 3, 2, 2, 4, 4, 1, 5, 0],
    ];
    lines
        .iter()
        .map(|line| {
            let to_move = if line.len() % 2 == 0 { Player::Human } else { Player::Computer };
            (position(line), to_move)
        })
        .collect()
}

#[test]
fn pruning_matches_full_minimax() {
    for (board, to_move) in positions() {
        for maximizer in [Player::Computer, Player::Human] {
            let engine = Engine::for_player(4, maximizer);
            for depth in 0..=4 {
                let pruned = engine.search(&board, depth, SCORE_MIN, SCORE_MAX, to_move);
                let full = reference_minimax(&board, depth, to_move, maximizer, board.empty_cells());
                assert_eq!(pruned, full, "depth {} maximizer {:?} to move {:?}\n{}", depth, maximizer, to_move, board);
            }
        }
    }
}

#[test]
fn best_move_matches_full_minimax_at_default_depth() {
    for (board, _) in positions() {
        let engine = Engine::new(5);
        let full = reference_minimax(&board, 5, Player::Computer, Player::Computer, board.empty_cells());
        assert_eq!(engine.best_move(&board), full, "\n{}", board);
    }
}

#[test]
fn search_is_deterministic() {
    let engine = Engine::new(4);
    for (board, _) in positions() {
        let first = engine.best_move(&board);
        let second = engine.best_move(&board.clone());
        assert_eq!(first, second);
    }
}

#[test]
fn mirrored_columns_resolve_to_the_lower_index() {
    // symmetric around the centre column; a quiet move on either wing scores the same
    let board: Board = "
        .......
        .......
        .......
        .......
        ...X...
        ..OOO..
        "
    .parse()
    .unwrap();
    let engine = Engine::new(1);
    let left = {
        let mut b = board.clone();
        b.apply_move(1, Player::Computer);
        evaluate(&b, Player::Computer)
    };
    let right = {
        let mut b = board.clone();
        b.apply_move(5, Player::Computer);
        evaluate(&b, Player::Computer)
    };
    assert_eq!(left, right);
    let result = engine.best_move(&board);
    assert_eq!(result.column, Some(1));
    assert_eq!(result, reference_minimax(&board, 1, Player::Computer, Player::Computer, board.empty_cells()));
}

#[test]
fn computer_never_leaves_a_single_threat_open() {
    // the human threatens column 3 on the bottom row
    let board = position(&[0, 6, 1, 6, 2]);
    for depth in 2..=5 {
        assert_eq!(Engine::new(depth).best_move(&board).column, Some(3), "depth {}", depth);
    }
}
