//! [`Game`] is the entry point for front-ends: it owns the current
//! [`Position`], the history of played moves and the repetition table, and
//! answers whether the game is over.

use crate::chess::core::{Color, Piece, Square};
use crate::chess::moves::{Move, MoveList};
use crate::chess::position::{Position, UndoInfo};
use crate::chess::zobrist::RepetitionTable;
use crate::error::{Error, Result};

/// Halfmove clock value at which the fifty-move rule draws the game.
const FIFTY_MOVE_RULE_PLIES: u8 = 100;

/// The outcome of the game in the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has legal moves and no draw rule applies.
    Ongoing,
    #[allow(missing_docs)]
    Checkmate { winner: Color },
    #[allow(missing_docs)]
    Stalemate,
    /// 50 full moves without captures and pawn moves.
    FiftyMoveRule,
    /// The same position occurred for the third time.
    ThreefoldRepetition,
}

impl GameStatus {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// A game played from a root position. Only legal moves are accepted and every
/// move can be taken back.
///
/// ```
/// use rookery::chess::game::{Game, GameStatus};
///
/// let mut game = Game::default();
/// for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     let _ = game.play_uci(uci).unwrap();
/// }
/// assert_eq!(
///     game.status(),
///     GameStatus::Checkmate {
///         winner: rookery::chess::core::Color::Black
///     }
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    history: Vec<(Move, UndoInfo)>,
    repetitions: RepetitionTable,
}

impl Game {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(root: Position) -> Self {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(root.hash());
        Self {
            position: root,
            history: Vec::new(),
            repetitions,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.position.generate_moves()
    }

    /// Checks if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.position.in_check()
    }

    /// Moves played since the root position, oldest first.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Move> + '_ {
        self.history.iter().map(|(played, _)| *played)
    }

    /// Checks the terminal conditions in order: checkmate, stalemate,
    /// fifty-move rule and threefold repetition.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            return if self.in_check() {
                GameStatus::Checkmate {
                    winner: self.position.side_to_move().opponent(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.position.halfmove_clock() >= FIFTY_MOVE_RULE_PLIES {
            return GameStatus::FiftyMoveRule;
        }
        if self.repetitions.count(self.position.hash()) >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
        GameStatus::Ongoing
    }

    /// Plays a legal move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the move is not legal in the current
    /// position. The game is left untouched.
    pub fn play(&mut self, next_move: Move) -> Result<()> {
        if !self.legal_moves().contains(&next_move) {
            return Err(Error::illegal(
                next_move,
                format!("not a legal move in {}", self.position),
            ));
        }
        let undo = self.position.make_move(next_move)?;
        self.history.push((next_move, undo));
        self.repetitions.record(self.position.hash());
        Ok(())
    }

    /// Plays a move written in UCI notation and returns it.
    ///
    /// # Errors
    ///
    /// Fails if the move can not be parsed or is not legal, see
    /// [`Position::parse_uci_move`].
    pub fn play_uci(&mut self, uci: &str) -> Result<Move> {
        let next_move = self.position.parse_uci_move(uci)?;
        self.play(next_move)?;
        Ok(next_move)
    }

    /// Takes back the last move. Returns `None` at the root position.
    pub fn undo(&mut self) -> Option<Move> {
        let (last_move, undo) = self.history.pop()?;
        self.repetitions.forget(self.position.hash());
        self.position.unmake_move(last_move, undo);
        Some(last_move)
    }
}

impl Default for Game {
    /// A game from the starting position.
    fn default() -> Self {
        Self::new(Position::starting())
    }
}
