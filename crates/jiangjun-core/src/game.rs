use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::movegen::{has_legal_move, in_check};
use crate::position::{Position, PositionError};
use crate::repetition::{Adjudication, ChaseKind, RepetitionHistory, Violation};
use crate::types::{Color, Move, Piece, PieceType, Square, SquareList};

impl Position {
    pub fn in_check(&self, color: Option<Color>) -> bool {
        in_check(&self.board, color.unwrap_or(self.turn))
    }

    /// True if `color` (default: side to move) has a move that does not leave
    /// its General attacked.
    pub fn has_legal_move(&self, color: Option<Color>) -> bool {
        let mut scratch = self.board.clone();
        has_legal_move(&mut scratch, color.unwrap_or(self.turn))
    }

    /// The side whose General is no longer on the board, if any.
    pub fn general_captured(&self) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|color| self.board.find_general(*color).is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    GeneralCaptured,
    NoLegalMoves,
    PerpetualCheck,
    PerpetualChase,
    Repetition3Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub reason: GameOverReason,
    pub winner: Option<Color>,
    pub message: String,
}

impl GameOutcome {
    fn from_adjudication(adjudication: Adjudication) -> Self {
        let (reason, winner) = match adjudication {
            Adjudication::Loss {
                loser,
                violation: Violation::PerpetualCheck,
            } => (GameOverReason::PerpetualCheck, Some(loser.opposite())),
            Adjudication::Loss { loser, .. } => {
                (GameOverReason::PerpetualChase, Some(loser.opposite()))
            }
            Adjudication::Draw => (GameOverReason::Repetition3Draw, None),
        };
        Self {
            reason,
            winner,
            message: adjudication.message(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("it is not {0}'s turn")]
    WrongTurn(&'static str),
    #[error("illegal move {0}")]
    IllegalMove(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub mover: Color,
    pub captured: Option<Piece>,
    pub is_check: bool,
    pub chase: ChaseKind,
}

/// One game: the position, its repetition history, the applied moves and the
/// outcome once the game has ended.
#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Position,
    history: RepetitionHistory,
    moves: Vec<MoveRecord>,
    outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self {
            position: Position::from_fen(fen)?,
            ..Self::default()
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn
    }

    pub fn history(&self) -> &RepetitionHistory {
        &self.history
    }

    pub fn moves_played(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Destinations for the piece on `square` that keep its General safe.
    /// Empty once the game is over.
    pub fn legal_moves(&self, square: Square) -> SquareList {
        if self.outcome.is_some() {
            return SquareList::new();
        }
        self.position.legal_destinations(square)
    }

    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        self.position.legal_moves().to_vec()
    }

    /// Applies a pseudo-legal move for the side to move, records it for
    /// repetition purposes and settles the outcome if the game ended.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveRecord, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let piece = self
            .position
            .piece_at(mv.from)
            .ok_or(GameError::EmptySource(mv.from))?;
        let mover = self.position.turn;
        if piece.color != mover {
            return Err(GameError::WrongTurn(piece.color.name()));
        }
        if !self.position.destinations(mv.from).contains(&mv.to) {
            return Err(GameError::IllegalMove(mv));
        }

        let captured = self.position.make_move(mv);
        let adjudication = self
            .history
            .record(&mut self.position.board, mv, mover);
        let (is_check, chase) = self
            .history
            .entries()
            .last()
            .map_or((false, ChaseKind::None), |entry| (entry.is_check, entry.chase));

        let record = MoveRecord {
            mv,
            mover,
            captured,
            is_check,
            chase,
        };
        self.moves.push(record);
        self.outcome = self.settle(captured, adjudication, mover);

        if let Some(outcome) = &self.outcome {
            info!(
                "game over after {} plies: {:?}, winner {:?} ({})",
                self.moves.len(),
                outcome.reason,
                outcome.winner,
                outcome.message
            );
        }
        Ok(record)
    }

    fn settle(
        &self,
        captured: Option<Piece>,
        adjudication: Option<Adjudication>,
        mover: Color,
    ) -> Option<GameOutcome> {
        if captured.is_some_and(|piece| piece.piece_type == PieceType::General) {
            return Some(GameOutcome {
                reason: GameOverReason::GeneralCaptured,
                winner: Some(mover),
                message: format!("{} General captured", mover.opposite().name()),
            });
        }
        if let Some(adjudication) = adjudication {
            info!("repetition adjudicated: {}", adjudication.message());
            return Some(GameOutcome::from_adjudication(adjudication));
        }
        if !self.position.has_legal_move(None) {
            return Some(GameOutcome {
                reason: GameOverReason::NoLegalMoves,
                winner: Some(mover),
                message: format!("{} has no legal move", mover.opposite().name()),
            });
        }
        None
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_game_over(&self) -> (bool, Option<GameOverReason>, Option<Color>) {
        match &self.outcome {
            Some(outcome) => (true, Some(outcome.reason), outcome.winner),
            None => (false, None, None),
        }
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(None)
    }

    /// Status line shown to players.
    pub fn status(&self) -> String {
        let Some(outcome) = &self.outcome else {
            return format!("{}'s Turn", self.position.turn.name());
        };
        match (outcome.reason, outcome.winner) {
            (GameOverReason::Repetition3Draw, _) | (_, None) => "Draw by repetition".to_string(),
            (GameOverReason::PerpetualCheck | GameOverReason::PerpetualChase, Some(winner)) => {
                format!("Game Over! {} Wins! ({})", winner.name(), outcome.message)
            }
            (_, Some(winner)) => format!("Game Over! {} Wins!", winner.name()),
        }
    }
}
