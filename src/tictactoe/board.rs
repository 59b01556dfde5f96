#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tic-tac-toe positions and rules.

use std::fmt::{self, Display};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::GameError;

/// Rows and columns on the board.
pub const SIZE: usize = 3;

/// The eight winning lines, as cell coordinates.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    /// The first player.
    X,
    /// The second player.
    O,
}

impl Mark {
    /// The opponent's mark.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// A cell to play in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    /// Row, from the top.
    pub row: usize,
    /// Column, from the left.
    pub col: usize,
}

impl Action {
    /// The cell at `row`, `col`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A 3×3 grid of marks. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([[Option<Mark>; SIZE]; SIZE]);

impl Board {
    /// The empty starting position.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[None; SIZE]; SIZE])
    }

    /// A position from its rows, top to bottom.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidBoard`] unless X has as many marks as O or exactly one more.
    pub fn from_rows(rows: [[Option<Mark>; SIZE]; SIZE]) -> Result<Self, GameError> {
        let board = Self(rows);
        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        if x != o && x != o + 1 {
            return Err(GameError::InvalidBoard(format!(
                "{x} X marks and {o} O marks cannot arise from alternating turns"
            )));
        }
        Ok(board)
    }

    /// The mark at `row`, `col`.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.0[row][col]
    }

    fn cells(&self) -> impl Iterator<Item = Option<Mark>> + '_ {
        self.0.iter().flatten().copied()
    }

    fn count(&self, mark: Mark) -> usize {
        self.cells().filter(|&c| c == Some(mark)).count()
    }

    /// Number of unoccupied cells.
    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.cells().filter(Option::is_none).count()
    }

    /// Whose turn it is, or `None` once the game is over.
    #[must_use]
    pub fn player(&self) -> Option<Mark> {
        if self.is_terminal() {
            return None;
        }
        if self.count(Mark::X) > self.count(Mark::O) {
            Some(Mark::O)
        } else {
            Some(Mark::X)
        }
    }

    /// Every empty cell, in row-major order.
    #[must_use]
    pub fn actions(&self) -> SmallVec<[Action; 9]> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Action::new(row, col)))
            .filter(|a| self.0[a.row][a.col].is_none())
            .collect()
    }

    /// Places `mark` at `action` without checking the rules.
    pub(crate) const fn place(mut self, action: Action, mark: Mark) -> Self {
        self.0[action.row][action.col] = Some(mark);
        self
    }

    /// The position after the player to move plays `action`.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the board is terminal.
    /// - [`GameError::InvalidAction`] if the cell is off the board or occupied.
    pub fn result(&self, action: Action) -> Result<Self, GameError> {
        let Some(mark) = self.player() else {
            return Err(GameError::GameOver);
        };
        if action.row >= SIZE || action.col >= SIZE || self.0[action.row][action.col].is_some() {
            return Err(GameError::InvalidAction {
                row: action.row,
                col: action.col,
            });
        }
        Ok(self.place(action, mark))
    }

    /// The mark occupying a complete row, column or diagonal.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| self.0[row][col]);
            match a {
                Some(mark) if a == b && b == c => Some(mark),
                _ => None,
            }
        })
    }

    /// The game is over once someone has won or no empty cell remains.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.empty_cells() == 0
    }

    /// `1` if X has won, `-1` if O has won, `0` for a draw; `None` while the game is running.
    #[must_use]
    pub fn utility(&self) -> Option<i8> {
        if !self.is_terminal() {
            return None;
        }
        Some(match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        })
    }
}

/// Parses nine cells in row-major order from `X`, `O` and `.` (or `_`, `-`).
/// Whitespace and `/` row separators are ignored.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(|c| match c.to_ascii_uppercase() {
                'X' => Ok(Some(Mark::X)),
                'O' => Ok(Some(Mark::O)),
                '.' | '_' | '-' => Ok(None),
                other => Err(GameError::InvalidBoard(format!("unexpected cell {other:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.len() != SIZE * SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} cells, found {}",
                SIZE * SIZE,
                cells.len()
            )));
        }

        let mut rows = [[None; SIZE]; SIZE];
        for (i, cell) in cells.into_iter().enumerate() {
            rows[i / SIZE][i % SIZE] = cell;
        }
        Self::from_rows(rows)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                match cell {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let b = Board::empty();
        assert_eq!(b.player(), Some(Mark::X));
        assert_eq!(b.actions().len(), 9);
        assert_eq!(b.winner(), None);
        assert!(!b.is_terminal());
        assert_eq!(b.utility(), None);
    }

    #[test]
    fn test_player_alternates() {
        let b = Board::empty().result(Action::new(1, 1)).unwrap();
        assert_eq!(b.player(), Some(Mark::O));
        let b = b.result(Action::new(0, 0)).unwrap();
        assert_eq!(b.player(), Some(Mark::X));
        assert_eq!(b.get(0, 0), Some(Mark::O));
        assert_eq!(b.get(1, 1), Some(Mark::X));
    }

    #[test]
    fn test_actions_are_empty_cells_in_order() {
        let b = board("XO. / .X. / ..O");
        let actions: Vec<_> = b.actions().into_iter().collect();
        assert_eq!(actions[0], Action::new(0, 2));
        assert_eq!(actions.len(), 5);
        assert!(!actions.contains(&Action::new(1, 1)));
    }

    #[test]
    fn test_result_rejects_illegal_moves() {
        let b = board("X........");
        assert_eq!(
            b.result(Action::new(0, 0)),
            Err(GameError::InvalidAction { row: 0, col: 0 })
        );
        assert_eq!(
            b.result(Action::new(3, 0)),
            Err(GameError::InvalidAction { row: 3, col: 0 })
        );
        let won = board("XXX/OO./...");
        assert_eq!(won.result(Action::new(2, 2)), Err(GameError::GameOver));
    }

    #[test]
    fn test_result_leaves_original_untouched() {
        let b = Board::empty();
        let _ = b.result(Action::new(2, 2)).unwrap();
        assert_eq!(b, Board::empty());
    }

    #[test]
    fn test_early_win_is_terminal() {
        let b = board("XXX/OO./...");
        assert_eq!(b.winner(), Some(Mark::X));
        assert!(b.is_terminal());
        assert_eq!(b.player(), None);
        assert_eq!(b.utility(), Some(1));

        let b = board("XX./OOO/X..");
        assert_eq!(b.winner(), Some(Mark::O));
        assert_eq!(b.utility(), Some(-1));

        let b = board("X.O/.XO/..X");
        assert_eq!(b.winner(), Some(Mark::X));
    }

    #[test]
    fn test_full_board_draw() {
        let b = board("XOX/XOO/OXX");
        assert_eq!(b.winner(), None);
        assert!(b.is_terminal());
        assert_eq!(b.utility(), Some(0));
        assert!(b.actions().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_boards() {
        assert!(matches!("XX.......".parse::<Board>(), Err(GameError::InvalidBoard(_))));
        assert!(matches!("O........".parse::<Board>(), Err(GameError::InvalidBoard(_))));
        assert!(matches!("X..".parse::<Board>(), Err(GameError::InvalidBoard(_))));
        assert!(matches!("X.......Z".parse::<Board>(), Err(GameError::InvalidBoard(_))));
    }

    #[test]
    fn test_from_rows_checks_turn_order() {
        let x = Some(Mark::X);
        let o = Some(Mark::O);
        assert!(matches!(
            Board::from_rows([[x, x, None], [None; 3], [None; 3]]),
            Err(GameError::InvalidBoard(_))
        ));
        assert!(matches!(
            Board::from_rows([[o, None, None], [None; 3], [None; 3]]),
            Err(GameError::InvalidBoard(_))
        ));
        let b = Board::from_rows([[x, o, None], [None, x, None], [None; 3]]).unwrap();
        assert_eq!(b.player(), Some(Mark::O));
        assert_eq!(b, board("XO./.X./..."));
    }

    #[test]
    fn test_display() {
        assert_eq!(board("X.O/.X./..O").to_string(), "X.O\n.X.\n..O");
    }
}
