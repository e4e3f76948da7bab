use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use jiangjun_core::{Board, Color, Move, Position, RepetitionHistory, SearchLimits};

use crate::alphabeta::{AlphaBetaConfig, AlphaBetaSearcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}'")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "0" => Ok(Self::Easy),
            "medium" | "1" => Ok(Self::Medium),
            "hard" | "2" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Search depth per tier. The hard tier adapts to the amount of material left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub easy_depth: u8,
    pub medium_depth: u8,
    pub hard_base_depth: u8,
    /// More pieces than this counts as the opening.
    pub opening_piece_threshold: usize,
    /// Fewer pieces than this counts as the endgame.
    pub endgame_piece_threshold: usize,
    pub opening_reduction: u8,
    pub endgame_extension: u8,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy_depth: 2,
            medium_depth: 4,
            hard_base_depth: 5,
            opening_piece_threshold: 28,
            endgame_piece_threshold: 12,
            opening_reduction: 1,
            endgame_extension: 1,
        }
    }
}

impl DifficultyConfig {
    pub fn depth_for(&self, difficulty: Difficulty, board: &Board) -> u8 {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Hard => {
                let pieces = board.piece_count();
                if pieces > self.opening_piece_threshold {
                    self.hard_base_depth
                        .saturating_sub(self.opening_reduction)
                        .max(1)
                } else if pieces < self.endgame_piece_threshold {
                    self.hard_base_depth.saturating_add(self.endgame_extension)
                } else {
                    self.hard_base_depth
                }
            }
        }
    }
}

/// Picks a move for `side` at the given tier, never one that loses by
/// repetition against `history`.
pub fn ai_select_move(
    position: &Position,
    history: &RepetitionHistory,
    side: Color,
    difficulty: Difficulty,
) -> Option<Move> {
    ai_select_move_with(
        &DifficultyConfig::default(),
        position,
        history,
        side,
        difficulty,
    )
}

pub fn ai_select_move_with(
    config: &DifficultyConfig,
    position: &Position,
    history: &RepetitionHistory,
    side: Color,
    difficulty: Difficulty,
) -> Option<Move> {
    let depth = config.depth_for(difficulty, &position.board);
    let mut searcher = AlphaBetaSearcher::new(AlphaBetaConfig {
        max_depth: depth,
        ..AlphaBetaConfig::default()
    });
    let root = Position::from_board(position.board.clone(), side);
    searcher
        .search_with_history(
            &root,
            history,
            SearchLimits {
                depth: Some(depth),
                ..SearchLimits::default()
            },
        )
        .best_move
}
