pub mod alphabeta;
pub mod classical;
pub mod difficulty;

pub use alphabeta::{AlphaBetaConfig, AlphaBetaResult, AlphaBetaSearcher};
pub use classical::{piece_value, ClassicalEval, MATE_SCORE, MOBILITY_WEIGHT};
pub use difficulty::{
    ai_select_move, ai_select_move_with, Difficulty, DifficultyConfig, ParseDifficultyError,
};
