use crate::position::Position;
use crate::types::Score;

/// Static evaluation from Red's point of view; searchers negate it for Black.
pub trait Evaluator {
    fn evaluate(&self, position: &Position) -> Score;
}
