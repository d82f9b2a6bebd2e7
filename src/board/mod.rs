//! Rules engine contract consumed by the game controller.
//!
//! The controller never inspects a board itself: it hands moves to a
//! [`RulesEngine`] and copies back whatever position and history the engine
//! reports. [`cozy::CozyEngine`] is the implementation backed by `cozy-chess`.

pub mod cozy;

use std::fmt;

use cozy_chess::{Color, Piece, Square};
use serde::{Serialize, Serializer};

pub use cozy::{CozyEngine, FenError};

/// A proposed move in board coordinates as the user sees them.
///
/// Castling is the king's two-square step (`e1g1`), not the king-takes-rook
/// encoding some move generators use internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        Self { from, to, promotion }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion { write!(f, "{}", piece_letter(p).to_ascii_lowercase())?; }
        Ok(())
    }
}

/// Serialized board state (FEN). Only a rules engine produces one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    pub(crate) fn from_engine(fen: String) -> Self { Self(fen) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Verbose record of an applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(serialize_with = "ser_color")]
    pub color: Color,
    #[serde(serialize_with = "ser_piece")]
    pub piece: Piece,
    #[serde(serialize_with = "ser_square")]
    pub from: Square,
    #[serde(serialize_with = "ser_square")]
    pub to: Square,
    #[serde(serialize_with = "ser_opt_piece", skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    #[serde(serialize_with = "ser_opt_piece", skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Piece>,
    pub castle: bool,
    pub en_passant: bool,
    pub san: String,
}

impl HistoryEntry {
    /// The move that produced this entry, in user coordinates.
    pub fn as_move(&self) -> Move { Move::new(self.from, self.to, self.promotion) }
}

/// Outcome of the game in the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameStatus {
    Ongoing,
    Checkmate {
        #[serde(serialize_with = "ser_color")]
        winner: Color,
    },
    Draw,
}

/// The rules engine rejected a move. Carries no detail: the only thing a
/// caller can do with it is ignore the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal move")]
pub struct IllegalMove;

pub trait RulesEngine {
    /// Plays `mv` if legal. On failure the engine state is untouched.
    fn apply_move(&mut self, mv: Move) -> Result<HistoryEntry, IllegalMove>;

    /// Every legal move starting on `from`. Empty for empty squares and for
    /// pieces of the side not to move.
    fn legal_moves(&self, from: Square) -> Vec<Move>;

    fn position(&self) -> Position;

    fn history(&self) -> &[HistoryEntry];

    fn side_to_move(&self) -> Color;

    fn status(&self) -> GameStatus;
}

pub(crate) fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

pub(crate) fn color_letter(color: Color) -> char {
    match color { Color::White => 'w', Color::Black => 'b' }
}

fn ser_square<S: Serializer>(sq: &Square, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(sq)
}

fn ser_piece<S: Serializer>(p: &Piece, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(piece_letter(*p).to_ascii_lowercase())
}

fn ser_opt_piece<S: Serializer>(p: &Option<Piece>, s: S) -> Result<S::Ok, S::Error> {
    match p {
        Some(p) => ser_piece(p, s),
        None => s.serialize_none(),
    }
}

pub(crate) fn ser_color<S: Serializer>(c: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(color_letter(*c))
}
