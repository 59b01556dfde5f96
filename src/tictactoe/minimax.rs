#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive minimax search over tic-tac-toe positions.
//!
//! Terminal positions score their utility scaled by one more than the number of empty
//! cells, so a quicker win scores higher and a slower loss scores less badly. The sign of
//! a score is the game-theoretic outcome. Scores are cached per position for the duration
//! of a single search.

use log::debug;
use rustc_hash::FxHashMap;

use crate::tictactoe::board::{Action, Board, Mark};

#[derive(Debug, Default)]
struct Search {
    table: FxHashMap<Board, i32>,
    nodes: usize,
}

impl Search {
    fn score(&mut self, board: Board) -> i32 {
        if let Some(&score) = self.table.get(&board) {
            return score;
        }
        self.nodes += 1;

        let score = match board.player() {
            None => {
                let utility = i32::from(board.utility().unwrap_or(0));
                let weight = i32::try_from(board.empty_cells()).unwrap_or(0) + 1;
                utility * weight
            }
            Some(mark) => {
                let children = board
                    .actions()
                    .into_iter()
                    .map(|action| self.score(board.place(action, mark)));
                let best = match mark {
                    Mark::X => children.max(),
                    Mark::O => children.min(),
                };
                best.unwrap_or(0)
            }
        };

        self.table.insert(board, score);
        score
    }
}

/// The optimal move for the player to move, or `None` on a terminal board.
///
/// Among equally scored moves the first in row-major order is chosen.
#[must_use]
pub fn minimax(board: &Board) -> Option<Action> {
    let mark = board.player()?;
    let mut search = Search::default();

    let mut best: Option<(Action, i32)> = None;
    for action in board.actions() {
        let score = search.score(board.place(action, mark));
        let better = match (best, mark) {
            (None, _) => true,
            (Some((_, s)), Mark::X) => score > s,
            (Some((_, s)), Mark::O) => score < s,
        };
        if better {
            best = Some((action, score));
        }
    }

    debug!(
        "minimax searched {} positions, chose {:?}",
        search.nodes, best
    );
    best.map(|(action, _)| action)
}

/// The outcome of `board` under optimal play: `1` for an X win, `-1` for an O win, `0` for a draw.
#[must_use]
pub fn game_value(board: &Board) -> i8 {
    match Search::default().score(*board).signum() {
        1 => 1,
        -1 => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        assert_eq!(minimax(&board("XXX/OO./...")), None);
        assert_eq!(minimax(&board("XOX/XOO/OXX")), None);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(game_value(&Board::empty()), 0);
        assert!(minimax(&Board::empty()).is_some());
    }

    #[test]
    fn test_takes_immediate_win() {
        // X to move, can win on the top row.
        assert_eq!(minimax(&board("XX./OO./...")), Some(Action::new(0, 2)));
        // O to move, can win on the middle row.
        assert_eq!(minimax(&board("XX./OO./X..")), Some(Action::new(1, 2)));
    }

    #[test]
    fn test_blocks_opponent() {
        // X threatens the left column, O must block at (2, 0).
        assert_eq!(minimax(&board("XO./X../...")), Some(Action::new(2, 0)));
    }

    #[test]
    fn test_scenario_move_after_blocking() {
        let start = Board::empty()
            .result(Action::new(0, 0))
            .and_then(|b| b.result(Action::new(0, 1)))
            .and_then(|b| b.result(Action::new(1, 1)))
            .unwrap();
        assert_eq!(start.player(), Some(Mark::O));

        let next = start.result(Action::new(0, 2)).unwrap();
        assert_eq!(next.winner(), None);
        assert_eq!(next.player(), Some(Mark::X));
        assert_eq!(minimax(&next), Some(Action::new(2, 2)));
    }

    /// Plays `mark` with minimax against every possible opponent line and checks it never loses.
    fn never_loses(board: Board, mark: Mark) {
        match board.player() {
            None => assert_ne!(board.winner(), Some(mark.other()), "lost at\n{board}"),
            Some(p) if p == mark => {
                let action = minimax(&board).unwrap();
                never_loses(board.result(action).unwrap(), mark);
            }
            Some(_) => {
                for action in board.actions() {
                    never_loses(board.result(action).unwrap(), mark);
                }
            }
        }
    }

    #[test]
    fn test_minimax_never_loses_as_x() {
        never_loses(Board::empty(), Mark::X);
    }

    #[test]
    fn test_minimax_never_loses_as_o() {
        never_loses(Board::empty(), Mark::O);
    }

    #[test]
    fn test_game_value_of_forced_win() {
        // X to move completes the top row at (0, 2).
        assert_eq!(game_value(&board("XX./OO./...")), 1);
        // O to move completes the anti-diagonal at (0, 2).
        assert_eq!(game_value(&board("XX./.O./O.X")), -1);
    }
}
