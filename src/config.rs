use cozy_chess::Piece;

use crate::board::{CozyEngine, FenError};

/// Piece a pawn turns into when it reaches the last rank. Users cannot pick.
pub const DEFAULT_PROMOTION: Piece = Piece::Queen;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    pub promotion: Piece,
    /// Start position; `None` is the standard initial position.
    pub start_fen: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self { Self { promotion: DEFAULT_PROMOTION, start_fen: None } }
}

impl ControllerConfig {
    /// Fresh engine at the configured start position.
    pub fn engine(&self) -> Result<CozyEngine, FenError> {
        match &self.start_fen {
            Some(fen) => CozyEngine::from_fen(fen),
            None => Ok(CozyEngine::startpos()),
        }
    }
}

/// Parses a promotion piece from `q`/`r`/`b`/`n` or the full name.
pub fn parse_promotion(s: &str) -> Result<Piece, String> {
    match s.to_lowercase().as_str() {
        "q" | "queen" => Ok(Piece::Queen),
        "r" | "rook" => Ok(Piece::Rook),
        "b" | "bishop" => Ok(Piece::Bishop),
        "n" | "knight" => Ok(Piece::Knight),
        _ => Err(format!("invalid promotion piece '{s}': use q, r, b or n")),
    }
}
