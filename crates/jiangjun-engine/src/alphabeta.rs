use log::debug;
use serde::{Deserialize, Serialize};

use jiangjun_core::{
    Color, Evaluator, Move, PieceType, Position, RepetitionHistory, Score, SearchLimits,
    SearchResult, Searcher,
};

use crate::classical::{piece_value, ClassicalEval, MATE_SCORE};

const DEFAULT_MAX_DEPTH: u8 = 4;
const INFINITY: i32 = MATE_SCORE * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaBetaConfig {
    pub max_depth: u8,
    pub node_limit: Option<u64>,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            node_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBetaResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}

/// Negamax with alpha-beta pruning over pseudo-legal moves. A General
/// capture anywhere in the tree is scored as an immediate win, so self-check
/// never needs to be filtered.
pub struct AlphaBetaSearcher {
    eval: Box<dyn Evaluator>,
    max_depth: u8,
    node_limit: Option<u64>,
    nodes: u64,
    limit: Option<u64>,
    last_completed_depth: u8,
}

impl std::fmt::Debug for AlphaBetaSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaBetaSearcher")
            .field("eval", &"<Evaluator>")
            .field("max_depth", &self.max_depth)
            .field("node_limit", &self.node_limit)
            .field("nodes", &self.nodes)
            .field("last_completed_depth", &self.last_completed_depth)
            .finish()
    }
}

impl AlphaBetaSearcher {
    pub fn new(config: AlphaBetaConfig) -> Self {
        Self::with_eval(config, Box::new(ClassicalEval::new()))
    }

    pub fn with_eval(config: AlphaBetaConfig, eval: Box<dyn Evaluator>) -> Self {
        Self {
            eval,
            max_depth: config.max_depth,
            node_limit: config.node_limit,
            nodes: 0,
            limit: None,
            last_completed_depth: 0,
        }
    }

    /// Best move for the side to move. Root moves that would lose by
    /// repetition against `history` are never chosen; `None` when no move
    /// remains.
    pub fn search_with_history(
        &mut self,
        position: &Position,
        history: &RepetitionHistory,
        limits: SearchLimits,
    ) -> AlphaBetaResult {
        self.nodes = 0;
        self.last_completed_depth = 0;
        self.limit = limits.nodes.or(self.node_limit);
        let max_depth = limits.depth.unwrap_or(self.max_depth).max(1);

        let mut working = position.clone();
        let mover = working.turn;
        let mut moves: Vec<Move> = working.moves().into_iter().collect();

        if let Some(capture) = moves
            .iter()
            .copied()
            .find(|mv| captures_general(&working, *mv))
        {
            return AlphaBetaResult {
                best_move: Some(capture),
                score: Score(MATE_SCORE + i32::from(max_depth)),
                depth: 0,
                nodes: 0,
            };
        }

        moves.retain(|mv| {
            let captured = working.make_move(*mv);
            let violates = history.would_violate(&mut working.board, *mv, mover);
            working.unmake_move(*mv, captured);
            if violates {
                debug!("excluding {mv}: repeats into a rule loss for {}", mover.name());
            }
            !violates
        });

        if moves.is_empty() {
            return AlphaBetaResult {
                best_move: None,
                score: Score(-MATE_SCORE),
                depth: 0,
                nodes: 0,
            };
        }

        order_moves(&working, &mut moves);
        let mut best_move = moves[0];
        let mut best_score = self.evaluate(&working);

        for depth in 1..=max_depth {
            match self.search_root(&mut working, &moves, depth) {
                Ok((candidate, score)) => {
                    best_move = candidate;
                    best_score = score;
                    self.last_completed_depth = depth;
                    if let Some(idx) = moves.iter().position(|mv| *mv == candidate) {
                        moves[..=idx].rotate_right(1);
                    }
                    debug!(
                        "depth {depth}: best {candidate} score {score} nodes {}",
                        self.nodes
                    );
                }
                Err(AbortSearch) => {
                    debug!("node limit reached during depth {depth}");
                    break;
                }
            }
        }

        AlphaBetaResult {
            best_move: Some(best_move),
            score: Score(best_score),
            depth: self.last_completed_depth,
            nodes: self.nodes,
        }
    }

    fn search_root(
        &mut self,
        position: &mut Position,
        moves: &[Move],
        depth: u8,
    ) -> Result<(Move, i32), AbortSearch> {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best = (moves[0], -INFINITY);

        for &mv in moves {
            let captured = position.make_move(mv);
            let result = self.negamax(position, depth - 1, -beta, -alpha);
            position.unmake_move(mv, captured);
            let score = -result?;

            if score > best.1 {
                best = (mv, score);
            }
            alpha = alpha.max(score);
        }

        Ok(best)
    }

    fn negamax(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, AbortSearch> {
        self.bump_nodes()?;

        if depth == 0 {
            return Ok(self.evaluate(position));
        }

        let mut moves: Vec<Move> = position.moves().into_iter().collect();
        if moves.is_empty() {
            return Ok(-(MATE_SCORE + i32::from(depth)));
        }
        order_moves(position, &mut moves);

        let mut best_score = -INFINITY;
        for mv in moves {
            if captures_general(position, mv) {
                return Ok(MATE_SCORE + i32::from(depth));
            }

            let captured = position.make_move(mv);
            let result = self.negamax(position, depth - 1, -beta, -alpha);
            position.unmake_move(mv, captured);
            let score = -result?;

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }

    /// Evaluation from the side to move's point of view.
    fn evaluate(&self, position: &Position) -> i32 {
        let score = self.eval.evaluate(position).0;
        if position.turn == Color::Red {
            score
        } else {
            -score
        }
    }

    fn bump_nodes(&mut self) -> Result<(), AbortSearch> {
        self.nodes = self.nodes.saturating_add(1);
        if self.limit.is_some_and(|limit| self.nodes >= limit) {
            return Err(AbortSearch);
        }
        Ok(())
    }
}

impl Default for AlphaBetaSearcher {
    fn default() -> Self {
        Self::new(AlphaBetaConfig::default())
    }
}

impl Searcher for AlphaBetaSearcher {
    fn search(&mut self, position: &Position, limits: SearchLimits) -> SearchResult {
        let result = self.search_with_history(position, &RepetitionHistory::new(), limits);
        SearchResult {
            best_move: result.best_move,
            score: result.score,
            nodes_searched: result.nodes,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AbortSearch;

fn captures_general(position: &Position, mv: Move) -> bool {
    position
        .piece_at(mv.to)
        .is_some_and(|piece| piece.piece_type == PieceType::General)
}

/// Most valuable victim first, cheapest attacker breaking ties.
fn order_moves(position: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|mv| -mvv_lva(position, *mv));
}

fn mvv_lva(position: &Position, mv: Move) -> i32 {
    let victim = position
        .piece_at(mv.to)
        .map_or(0, |piece| piece_value(piece.piece_type));
    let attacker = position
        .piece_at(mv.from)
        .map_or(0, |piece| piece_value(piece.piece_type));
    victim * 10 - attacker
}
