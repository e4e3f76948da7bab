use crate::board::{Board, BoardError};
use crate::types::{Color, Piece, PieceType, Square, BOARD_COLS, BOARD_ROWS};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub board: Board,
    pub turn: Color,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("expected 10 rows, received {0}")]
    RowCount(usize),
    #[error("row {row} covers {width} points, expected 9")]
    RowWidth { row: usize, width: usize },
    #[error("invalid piece '{0}'")]
    InvalidPiece(char),
    #[error("too many '{code}' pieces: {count}, at most {max}")]
    TooManyPieces {
        code: char,
        count: usize,
        max: usize,
    },
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("board error")]
    Board(#[from] BoardError),
}

/// Parses the placement field (row 0 first, uppercase for Red) and the side
/// to move. Trailing fields such as move counters are ignored. A side may not
/// hold more pieces of a kind than it starts with.
pub fn parse_fen(fen: &str) -> Result<ParsedFen, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::MissingField("placement"))?;
    let side = fields.next().ok_or(FenError::MissingField("side"))?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != usize::from(BOARD_ROWS) {
        return Err(FenError::RowCount(rows.len()));
    }

    let mut board = Board::empty();
    let mut counts = [[0usize; PieceType::ALL.len()]; Color::BOTH.len()];
    for (row_idx, row) in rows.iter().enumerate() {
        let mut col = 0usize;
        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                col += run as usize;
                continue;
            }
            let piece = decode_piece(ch)?;
            let count = &mut counts[piece.color as usize][piece.piece_type as usize];
            *count += 1;
            let max = piece.piece_type.max_count();
            if *count > max {
                return Err(FenError::TooManyPieces {
                    code: encode_piece(piece),
                    count: *count,
                    max,
                });
            }
            if col < usize::from(BOARD_COLS) {
                board.put(piece, Square::new_unchecked(row_idx as u8, col as u8))?;
            }
            col += 1;
        }
        if col != usize::from(BOARD_COLS) {
            return Err(FenError::RowWidth {
                row: row_idx,
                width: col,
            });
        }
    }

    let turn = match side.chars().collect::<Vec<_>>().as_slice() {
        [code] => Color::from_code(*code),
        _ => None,
    }
    .ok_or_else(|| FenError::InvalidSide(side.to_string()))?;

    Ok(ParsedFen { board, turn })
}

pub fn encode_fen(board: &Board, turn: Color) -> String {
    let mut rows = Vec::with_capacity(usize::from(BOARD_ROWS));
    for row in 0..BOARD_ROWS {
        let mut encoded = String::new();
        let mut empty = 0u8;
        for col in 0..BOARD_COLS {
            match board.get(Square::new_unchecked(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        encoded.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    encoded.push(encode_piece(piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            encoded.push(char::from(b'0' + empty));
        }
        rows.push(encoded);
    }
    format!("{} {}", rows.join("/"), turn.to_code())
}

fn decode_piece(ch: char) -> Result<Piece, FenError> {
    let color = if ch.is_ascii_uppercase() {
        Color::Red
    } else {
        Color::Black
    };
    let piece_type =
        PieceType::from_fen_code(ch.to_ascii_lowercase()).ok_or(FenError::InvalidPiece(ch))?;
    Ok(Piece::new(piece_type, color))
}

fn encode_piece(piece: Piece) -> char {
    let code = piece.piece_type.fen_code();
    match piece.color {
        Color::Red => code.to_ascii_uppercase(),
        Color::Black => code,
    }
}
