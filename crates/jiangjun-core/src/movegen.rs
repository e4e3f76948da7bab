use crate::board::Board;
use crate::constants::{in_palace, on_own_side, DIAGONAL, HORSE_JUMPS, ORTHOGONAL};
use crate::types::{Color, Move, MoveList, Piece, PieceType, Square, SquareList};

/// Pseudo-legal destinations of the piece on `square`. Empty for an empty or
/// off-board square. Self-check is not filtered.
pub fn generate_destinations(board: &Board, square: Square) -> SquareList {
    let mut out = SquareList::new();
    let Some(piece) = board.get(square) else {
        return out;
    };

    match piece.piece_type {
        PieceType::General => general_destinations(board, square, piece.color, &mut out),
        PieceType::Advisor => advisor_destinations(board, square, piece.color, &mut out),
        PieceType::Elephant => elephant_destinations(board, square, piece.color, &mut out),
        PieceType::Horse => horse_destinations(board, square, piece.color, &mut out),
        PieceType::Chariot => chariot_destinations(board, square, piece.color, &mut out),
        PieceType::Cannon => cannon_destinations(board, square, piece.color, &mut out),
        PieceType::Soldier => soldier_destinations(board, square, piece.color, &mut out),
    }
    out
}

/// Every pseudo-legal move for `color`, in board order.
pub fn generate_all_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces_of(color) {
        for to in generate_destinations(board, from) {
            let _ = moves.try_push(Move::new(from, to));
        }
    }
    moves
}

/// Destinations that do not leave `square`'s owner with an attacked General.
pub fn generate_legal_destinations(board: &mut Board, square: Square) -> SquareList {
    let Some(piece) = board.get(square) else {
        return SquareList::new();
    };
    let mut destinations = generate_destinations(board, square);
    destinations.retain(|to| is_legal_after_move(board, piece.color, Move::new(square, *to)));
    destinations
}

pub fn generate_all_legal_moves(board: &Board, color: Color) -> MoveList {
    let mut scratch = board.clone();
    let mut moves = generate_all_moves(board, color);
    moves.retain(|mv| is_legal_after_move(&mut scratch, color, *mv));
    moves
}

pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(src, _)| generate_destinations(board, src).contains(&square))
}

/// True iff `color`'s General stands on a square some enemy piece can reach.
/// A side without a General is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    board
        .find_general(color)
        .is_some_and(|square| is_square_attacked(board, square, color.opposite()))
}

/// True on the first pseudo-legal move of `color` that does not leave its own
/// General in check. The board is restored before returning.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let moves = generate_all_moves(board, color);
    moves
        .into_iter()
        .any(|mv| is_legal_after_move(board, color, mv))
}

pub(crate) fn is_legal_after_move(board: &mut Board, color: Color, mv: Move) -> bool {
    let undo = apply_move_on_board(board, mv);
    let legal = !in_check(board, color);
    undo_move_on_board(board, undo);
    legal
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MoveUndo {
    mv: Move,
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl MoveUndo {
    pub(crate) fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

pub(crate) fn apply_move_on_board(board: &mut Board, mv: Move) -> MoveUndo {
    let moved = board.set(mv.from, None);
    let captured = board.set(mv.to, moved);
    MoveUndo {
        mv,
        moved,
        captured,
    }
}

pub(crate) fn undo_move_on_board(board: &mut Board, undo: MoveUndo) {
    board.set(undo.mv.to, undo.captured);
    board.set(undo.mv.from, undo.moved);
}

fn general_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for (dr, dc) in ORTHOGONAL {
        if let Some(target) = origin.offset(dr, dc) {
            if in_palace(target, color) {
                push_if_admissible(board, target, color, out);
            }
        }
    }

    // Flying general: the first occupied point straight ahead, if it is the
    // enemy General, can be captured across the open file.
    let mut cursor = origin.offset(color.forward(), 0);
    while let Some(square) = cursor {
        if let Some(piece) = board.get(square) {
            if piece.is_general() && piece.color != color {
                let _ = out.try_push(square);
            }
            break;
        }
        cursor = square.offset(color.forward(), 0);
    }
}

fn advisor_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for (dr, dc) in DIAGONAL {
        if let Some(target) = origin.offset(dr, dc) {
            if in_palace(target, color) {
                push_if_admissible(board, target, color, out);
            }
        }
    }
}

fn elephant_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for (dr, dc) in DIAGONAL {
        let (Some(eye), Some(target)) = (origin.offset(dr, dc), origin.offset(2 * dr, 2 * dc))
        else {
            continue;
        };
        if on_own_side(target, color) && board.is_empty_at(eye) {
            push_if_admissible(board, target, color, out);
        }
    }
}

fn horse_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for ((dr, dc), (leg_r, leg_c)) in HORSE_JUMPS {
        let (Some(target), Some(leg)) = (origin.offset(dr, dc), origin.offset(leg_r, leg_c))
        else {
            continue;
        };
        if board.is_empty_at(leg) {
            push_if_admissible(board, target, color, out);
        }
    }
}

fn chariot_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for (dr, dc) in ORTHOGONAL {
        let mut cursor = origin.offset(dr, dc);
        while let Some(square) = cursor {
            match board.get(square) {
                None => {
                    let _ = out.try_push(square);
                }
                Some(piece) => {
                    if piece.color != color {
                        let _ = out.try_push(square);
                    }
                    break;
                }
            }
            cursor = square.offset(dr, dc);
        }
    }
}

fn cannon_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    for (dr, dc) in ORTHOGONAL {
        let mut cursor = origin.offset(dr, dc);
        let mut screened = false;
        while let Some(square) = cursor {
            match (board.get(square), screened) {
                (None, false) => {
                    let _ = out.try_push(square);
                }
                (None, true) => {}
                (Some(_), false) => screened = true,
                (Some(piece), true) => {
                    if piece.color != color {
                        let _ = out.try_push(square);
                    }
                    break;
                }
            }
            cursor = square.offset(dr, dc);
        }
    }
}

fn soldier_destinations(board: &Board, origin: Square, color: Color, out: &mut SquareList) {
    if let Some(target) = origin.offset(color.forward(), 0) {
        push_if_admissible(board, target, color, out);
    }
    if !on_own_side(origin, color) {
        for dc in [-1, 1] {
            if let Some(target) = origin.offset(0, dc) {
                push_if_admissible(board, target, color, out);
            }
        }
    }
}

fn push_if_admissible(board: &Board, target: Square, color: Color, out: &mut SquareList) {
    if board.get(target).is_none_or(|piece| piece.color != color) {
        let _ = out.try_push(target);
    }
}
