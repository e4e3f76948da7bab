//! Perpetual check / perpetual chase adjudication.
//!
//! Every applied move is classified as a check, a chase of an undefended
//! piece (rootless), a chase of a defended piece (rooted), or neutral. When a
//! board signature recurs, only the side that just moved can be penalised:
//! it loses if its moves since the first occurrence were all checks, all
//! rootless chases, or mixed checks with chases. Otherwise a third occurrence
//! is a draw.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Signature};
use crate::movegen::{generate_destinations, in_check, is_square_attacked};
use crate::types::{Color, Move, Piece, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChaseKind {
    #[default]
    None,
    Rootless,
    Rooted,
}

impl ChaseKind {
    pub const fn is_chase(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveClass {
    pub is_check: bool,
    pub chase: ChaseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub signature: Signature,
    pub mv: Move,
    pub mover: Color,
    pub is_check: bool,
    pub chase: ChaseKind,
}

impl HistoryEntry {
    pub fn new(signature: Signature, mv: Move, mover: Color, class: MoveClass) -> Self {
        Self {
            signature,
            mv,
            mover,
            is_check: class.is_check,
            chase: class.chase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    PerpetualCheck,
    PerpetualChase,
    CheckAndChase,
}

impl Violation {
    pub const fn message(self) -> &'static str {
        match self {
            Self::PerpetualCheck => "perpetual check",
            Self::PerpetualChase => "perpetual rootless chase",
            Self::CheckAndChase => "check-and-chase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjudication {
    Loss { loser: Color, violation: Violation },
    Draw,
}

impl Adjudication {
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::Loss { .. })
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Draw)
    }

    pub fn message(self) -> String {
        match self {
            Self::Loss { loser, violation } => {
                format!("{} loses by {}", loser.name(), violation.message())
            }
            Self::Draw => "draw by repetition".to_string(),
        }
    }
}

/// Classifies the move that produced `board` for `mover`. The board is used as
/// scratch space for protection probes and is restored before returning.
pub fn classify_move(board: &mut Board, mover: Color) -> MoveClass {
    let victim = mover.opposite();
    let is_check = in_check(board, victim);

    let targets: Vec<(Square, Piece)> = board
        .pieces_of(victim)
        .filter(|(_, piece)| piece.piece_type != PieceType::General)
        .collect();

    let mut chase = ChaseKind::None;
    for (square, piece) in targets {
        if !is_square_attacked(board, square, mover) {
            continue;
        }
        let kind = protection(board, square, piece, mover);
        trace!(
            "{} {:?} on {} chased: {:?}",
            victim.name(),
            piece.piece_type,
            square,
            kind
        );
        if kind == ChaseKind::Rootless {
            chase = ChaseKind::Rootless;
            break;
        }
        chase = ChaseKind::Rooted;
    }

    MoveClass { is_check, chase }
}

/// Rooted when at least one piece of the attacked side can recapture on
/// `square` without exposing its own General; rootless otherwise.
fn protection(board: &mut Board, square: Square, piece: Piece, mover: Color) -> ChaseKind {
    let defender_color = piece.color;
    // A foreign placeholder makes the square a capture target for the
    // attacked side's own pieces.
    board.set(square, Some(Piece::new(PieceType::Soldier, mover)));

    let defenders: Vec<Square> = board
        .pieces_of(defender_color)
        .filter(|(from, _)| generate_destinations(board, *from).contains(&square))
        .map(|(from, _)| from)
        .collect();

    let mut rooted = false;
    for from in defenders {
        let defender = board.set(from, None);
        let placeholder = board.set(square, defender);
        let pinned = in_check(board, defender_color);
        board.set(square, placeholder);
        board.set(from, defender);
        if !pinned {
            rooted = true;
            break;
        }
    }

    board.set(square, Some(piece));
    if rooted {
        ChaseKind::Rooted
    } else {
        ChaseKind::Rootless
    }
}

/// Decides a repetition for `mover` given the full history, which must
/// already include the entry for the move just played.
pub fn evaluate_repetition(
    history: &[HistoryEntry],
    signature: &Signature,
    mover: Color,
) -> Option<Adjudication> {
    adjudicate(history, None, signature, mover)
}

fn adjudicate(
    prefix: &[HistoryEntry],
    appended: Option<&HistoryEntry>,
    signature: &Signature,
    mover: Color,
) -> Option<Adjudication> {
    let entries = || prefix.iter().chain(appended);

    let occurrences = entries()
        .filter(|entry| &entry.signature == signature)
        .count();
    if occurrences < 2 {
        return None;
    }
    let start = entries().position(|entry| &entry.signature == signature)?;

    let mut any_check = false;
    let mut any_chase = false;
    let mut all_checks = true;
    let mut all_rootless = true;
    for entry in entries().skip(start).filter(|entry| entry.mover == mover) {
        any_check |= entry.is_check;
        any_chase |= entry.chase.is_chase();
        all_checks &= entry.is_check;
        all_rootless &= entry.chase == ChaseKind::Rootless;
    }

    let violation = if any_check && any_chase {
        Some(Violation::CheckAndChase)
    } else if all_checks {
        Some(Violation::PerpetualCheck)
    } else if all_rootless {
        Some(Violation::PerpetualChase)
    } else {
        None
    };

    match violation {
        Some(violation) => Some(Adjudication::Loss {
            loser: mover,
            violation,
        }),
        None if occurrences >= 3 => Some(Adjudication::Draw),
        None => None,
    }
}

/// Append-only record of the moves of one game.
#[derive(Debug, Clone, Default)]
pub struct RepetitionHistory {
    entries: Vec<HistoryEntry>,
}

impl RepetitionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn occurrences(&self, signature: &Signature) -> usize {
        self.entries
            .iter()
            .filter(|entry| &entry.signature == signature)
            .count()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Classifies the move that produced `board`, appends it and adjudicates.
    pub fn record(&mut self, board: &mut Board, mv: Move, mover: Color) -> Option<Adjudication> {
        let class = classify_move(board, mover);
        let entry = HistoryEntry::new(board.signature(), mv, mover, class);
        self.entries.push(entry);
        evaluate_repetition(&self.entries, &entry.signature, mover)
    }

    pub fn evaluate(&self, signature: &Signature, mover: Color) -> Option<Adjudication> {
        evaluate_repetition(&self.entries, signature, mover)
    }

    /// Adjudication that would follow if `entry` were appended.
    pub fn evaluate_candidate(&self, entry: &HistoryEntry) -> Option<Adjudication> {
        adjudicate(&self.entries, Some(entry), &entry.signature, entry.mover)
    }

    /// Classifies the move that produced `board` and reports whether appending
    /// it would lose by rule. Classification is skipped when the signature has
    /// never been seen, since no repetition can follow.
    pub fn would_violate(&self, board: &mut Board, mv: Move, mover: Color) -> bool {
        let signature = board.signature();
        if self.occurrences(&signature) == 0 {
            return false;
        }
        let class = classify_move(board, mover);
        let entry = HistoryEntry::new(signature, mv, mover, class);
        self.evaluate_candidate(&entry)
            .is_some_and(Adjudication::is_violation)
    }
}
