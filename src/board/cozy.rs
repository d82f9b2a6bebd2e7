use cozy_chess::{Board, Color, File, GameStatus as CozyStatus, Move as CozyMove, Piece, Rank, Square};

use super::{piece_letter, GameStatus, HistoryEntry, IllegalMove, Move, Position, RulesEngine};

#[derive(Debug, thiserror::Error)]
#[error("invalid FEN '{fen}': {reason}")]
pub struct FenError {
    pub fen: String,
    reason: String,
}

/// Rules engine over a `cozy_chess::Board` plus the verbose history of every
/// move applied through it.
#[derive(Clone, Debug)]
pub struct CozyEngine {
    board: Board,
    history: Vec<HistoryEntry>,
}

impl Default for CozyEngine {
    fn default() -> Self { Self::startpos() }
}

impl CozyEngine {
    pub fn startpos() -> Self {
        Self { board: Board::default(), history: Vec::new() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let board = Board::from_fen(fen, false)
            .map_err(|e| FenError { fen: fen.to_string(), reason: format!("{e:?}") })?;
        if !standard_castling(&board) {
            return Err(FenError { fen: fen.to_string(), reason: "castling rights need the king on the e-file and rooks on a/h".to_string() });
        }
        Ok(Self { board, history: Vec::new() })
    }

    pub fn board(&self) -> &Board { &self.board }

    /// Plays a move given in UCI text (`e2e4`, `e7e8q`, `e1g1`).
    pub fn play_uci(&mut self, mv_uci: &str) -> Result<HistoryEntry, IllegalMove> {
        let mv = parse_uci(mv_uci).ok_or(IllegalMove)?;
        self.apply_move(mv)
    }

    pub fn from_start_and_moves<S: AsRef<str>>(moves: &[S]) -> Result<Self, IllegalMove> {
        let mut engine = Self::startpos();
        for m in moves { engine.play_uci(m.as_ref())?; }
        Ok(engine)
    }

    fn find_legal(&self, mv: Move) -> Option<(Piece, CozyMove)> {
        let mut found = None;
        self.board.generate_moves_for(mv.from.bitboard(), |moves| {
            let piece = moves.piece;
            for m in moves {
                if user_move(&self.board, m).to != mv.to { continue; }
                // A promotion on a non-promoting move is ignored.
                if m.promotion.is_some() && m.promotion != mv.promotion { continue; }
                found = Some((piece, m));
                break;
            }
            found.is_some()
        });
        found
    }
}

impl RulesEngine for CozyEngine {
    fn apply_move(&mut self, mv: Move) -> Result<HistoryEntry, IllegalMove> {
        let (piece, m) = self.find_legal(mv).ok_or(IllegalMove)?;
        let mut next = self.board.clone();
        next.play(m);
        let entry = describe(&self.board, &next, piece, m);
        self.board = next;
        self.history.push(entry.clone());
        Ok(entry)
    }

    fn legal_moves(&self, from: Square) -> Vec<Move> {
        let mut out = Vec::new();
        self.board.generate_moves_for(from.bitboard(), |moves| {
            for m in moves { out.push(user_move(&self.board, m)); }
            false
        });
        out
    }

    fn position(&self) -> Position { Position::from_engine(format!("{}", self.board)) }

    fn history(&self) -> &[HistoryEntry] { &self.history }

    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn status(&self) -> GameStatus {
        match self.board.status() {
            CozyStatus::Ongoing => GameStatus::Ongoing,
            CozyStatus::Drawn => GameStatus::Draw,
            // The side to move is the one that has been mated.
            CozyStatus::Won => GameStatus::Checkmate { winner: !self.board.side_to_move() },
        }
    }
}

fn parse_uci(s: &str) -> Option<Move> {
    let s = s.trim();
    if s.len() != 4 && s.len() != 5 { return None; }
    let from = s.get(0..2)?.parse::<Square>().ok()?;
    let to = s.get(2..4)?.parse::<Square>().ok()?;
    let promotion = match s.get(4..) {
        None | Some("") => None,
        Some("q") => Some(Piece::Queen),
        Some("r") => Some(Piece::Rook),
        Some("b") => Some(Piece::Bishop),
        Some("n") => Some(Piece::Knight),
        Some(_) => return None,
    };
    Some(Move::new(from, to, promotion))
}

// Castling is shown as a two-square king step, which only stays distinct from
// ordinary king moves with the standard king and rook files.
fn standard_castling(board: &Board) -> bool {
    [Color::White, Color::Black].into_iter().all(|color| {
        let rights = board.castle_rights(color);
        if rights.short.is_none() && rights.long.is_none() { return true; }
        board.king(color).file() == File::E
            && rights.short.map_or(true, |f| f == File::H)
            && rights.long.map_or(true, |f| f == File::A)
    })
}

// cozy-chess encodes castling as the king capturing its own rook.
fn is_castle(board: &Board, m: CozyMove) -> bool {
    board.piece_on(m.from) == Some(Piece::King) && board.colors(board.side_to_move()).has(m.to)
}

fn user_move(board: &Board, m: CozyMove) -> Move {
    if is_castle(board, m) {
        let file = if (m.to.file() as u8) > (m.from.file() as u8) { File::G } else { File::C };
        Move::new(m.from, Square::new(file, m.from.rank()), None)
    } else {
        Move::new(m.from, m.to, m.promotion)
    }
}

fn describe(before: &Board, after: &Board, piece: Piece, m: CozyMove) -> HistoryEntry {
    let castle = is_castle(before, m);
    let en_passant = piece == Piece::Pawn && m.from.file() != m.to.file() && before.piece_on(m.to).is_none();
    let captured = if castle {
        None
    } else if en_passant {
        Some(Piece::Pawn)
    } else {
        before.piece_on(m.to)
    };
    let target = user_move(before, m).to;
    HistoryEntry {
        color: before.side_to_move(),
        piece,
        from: m.from,
        to: target,
        captured,
        promotion: m.promotion,
        castle,
        en_passant,
        san: san(before, after, piece, m, target, captured.is_some(), castle),
    }
}

fn san(before: &Board, after: &Board, piece: Piece, m: CozyMove, target: Square, capture: bool, castle: bool) -> String {
    let mut s = String::new();
    if castle {
        s.push_str(if target.file() == File::G { "O-O" } else { "O-O-O" });
    } else if piece == Piece::Pawn {
        if capture { s.push(file_char(m.from.file())); s.push('x'); }
        s.push_str(&target.to_string());
        if let Some(p) = m.promotion { s.push('='); s.push(piece_letter(p)); }
    } else {
        s.push(piece_letter(piece));
        s.push_str(&disambiguation(before, piece, m));
        if capture { s.push('x'); }
        s.push_str(&target.to_string());
    }
    if !after.checkers().is_empty() {
        s.push(if after.status() == CozyStatus::Won { '#' } else { '+' });
    }
    s
}

/// Minimal origin qualifier for a piece move: nothing, file, rank, or both.
fn disambiguation(board: &Board, piece: Piece, m: CozyMove) -> String {
    let same_kind = board.pieces(piece) & board.colors(board.side_to_move());
    let mut rivals: Vec<Square> = Vec::new();
    board.generate_moves_for(same_kind, |moves| {
        if moves.from != m.from && moves.to.has(m.to) { rivals.push(moves.from); }
        false
    });
    if rivals.is_empty() { return String::new(); }
    let shares_file = rivals.iter().any(|sq| sq.file() == m.from.file());
    let shares_rank = rivals.iter().any(|sq| sq.rank() == m.from.rank());
    if !shares_file {
        file_char(m.from.file()).to_string()
    } else if !shares_rank {
        rank_char(m.from.rank()).to_string()
    } else {
        m.from.to_string()
    }
}

fn file_char(f: File) -> char { (b'a' + f as u8) as char }

fn rank_char(r: Rank) -> char { (b'1' + r as u8) as char }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uci_with_and_without_promotion() {
        assert_eq!(parse_uci("e2e4"), Some(Move::new(Square::E2, Square::E4, None)));
        assert_eq!(parse_uci("a7a8n"), Some(Move::new(Square::A7, Square::A8, Some(Piece::Knight))));
        assert_eq!(parse_uci("a7a8k"), None);
        assert_eq!(parse_uci("e2"), None);
        assert_eq!(parse_uci("z9e4"), None);
    }

    #[test]
    fn castling_is_reported_as_two_square_king_step() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", false).unwrap();
        let mut targets = Vec::new();
        board.generate_moves_for(Square::E1.bitboard(), |moves| {
            for m in moves { targets.push(user_move(&board, m).to); }
            false
        });
        assert!(targets.contains(&Square::G1));
        assert!(targets.contains(&Square::C1));
        assert!(!targets.contains(&Square::H1));
        assert!(!targets.contains(&Square::A1));
    }
}
