//! Human-vs-human game controller.
//!
//! Owns the position, the move history, the click-to-move selection and the
//! square highlights. Board gestures come in through the `on_*` handlers, moves
//! are validated by the [`RulesEngine`], and every handler leaves the
//! highlight table consistent with the state it produced.

use cozy_chess::{Color, Square};
use log::{debug, info};

use crate::board::{CozyEngine, FenError, GameStatus, HistoryEntry, Move, Position, RulesEngine};
use crate::config::ControllerConfig;
use crate::styles::{drop_square_style, square_styling, HighlightMap, SquareStyle, POSSIBLE_MOVE};

pub struct GameController<E: RulesEngine = CozyEngine> {
    engine: E,
    config: ControllerConfig,
    position: Position,
    history: Vec<HistoryEntry>,
    selection: Option<Square>,
    square_styles: HighlightMap,
    drop_square_style: Option<SquareStyle>,
}

impl GameController<CozyEngine> {
    pub fn new(config: ControllerConfig) -> Result<Self, FenError> {
        let engine = config.engine()?;
        Ok(Self::with_engine(engine, config))
    }

    /// Throws the current game away and starts again from the configured
    /// position.
    pub fn new_game(&mut self) -> Result<(), FenError> {
        let engine = self.config.engine()?;
        *self = Self::with_engine(engine, self.config.clone());
        info!("new game from {}", self.position);
        Ok(())
    }
}

impl Default for GameController<CozyEngine> {
    fn default() -> Self { Self::with_engine(CozyEngine::startpos(), ControllerConfig::default()) }
}

impl<E: RulesEngine> GameController<E> {
    pub fn with_engine(engine: E, config: ControllerConfig) -> Self {
        let position = engine.position();
        let history = engine.history().to_vec();
        Self {
            engine,
            config,
            position,
            history,
            selection: None,
            square_styles: HighlightMap::new(),
            drop_square_style: None,
        }
    }

    pub fn position(&self) -> &Position { &self.position }

    pub fn history(&self) -> &[HistoryEntry] { &self.history }

    pub fn selection(&self) -> Option<Square> { self.selection }

    pub fn square_styles(&self) -> &HighlightMap { &self.square_styles }

    pub fn drop_square_style(&self) -> Option<SquareStyle> { self.drop_square_style }

    pub fn side_to_move(&self) -> Color { self.engine.side_to_move() }

    pub fn status(&self) -> GameStatus { self.engine.status() }

    pub fn config(&self) -> &ControllerConfig { &self.config }

    pub fn engine(&self) -> &E { &self.engine }

    /// Piece dropped from `source` onto `target`.
    ///
    /// An illegal drop changes nothing; the widget snaps the piece back. A
    /// legal one restyles the board from the selection and history as they
    /// were before the move.
    pub fn on_drop(&mut self, source: Square, target: Square) -> Option<HistoryEntry> {
        let before = self.persistent_highlight();
        let entry = self.submit(source, target)?;
        self.square_styles = before;
        Some(entry)
    }

    /// Marks `square` and every square its piece can reach. Squares without
    /// legal moves leave the current highlights alone.
    pub fn on_mouse_over_square(&mut self, square: Square) {
        let moves = self.engine.legal_moves(square);
        if moves.is_empty() { return; }
        let mut map = HighlightMap::new();
        map.set(square, POSSIBLE_MOVE);
        for mv in &moves { map.set(mv.to, POSSIBLE_MOVE); }
        map.overlay(&self.persistent_highlight());
        self.square_styles = map;
    }

    pub fn on_mouse_out_square(&mut self, _square: Square) {
        self.square_styles = self.persistent_highlight();
    }

    pub fn on_drag_over_square(&mut self, square: Square) {
        self.drop_square_style = Some(drop_square_style(square));
    }

    /// Click-to-move. The first click arms a square; the next click tries to
    /// move from it. A failed attempt re-arms on the square just clicked.
    pub fn on_square_click(&mut self, square: Square) -> Option<HistoryEntry> {
        let Some(from) = self.selection else {
            self.arm(square);
            return None;
        };
        match self.submit(from, square) {
            Some(entry) => {
                self.selection = None;
                self.square_styles.clear();
                Some(entry)
            }
            None => {
                self.arm(square);
                None
            }
        }
    }

    fn arm(&mut self, square: Square) {
        self.selection = Some(square);
        self.square_styles = self.persistent_highlight();
    }

    fn persistent_highlight(&self) -> HighlightMap { square_styling(self.selection, &self.history) }

    fn submit(&mut self, from: Square, to: Square) -> Option<HistoryEntry> {
        let mv = Move::new(from, to, Some(self.config.promotion));
        // Rejections are not reported anywhere: the gesture is simply ignored.
        let entry = self.engine.apply_move(mv).ok()?;
        self.position = self.engine.position();
        self.history = self.engine.history().to_vec();
        debug!("{:?} played {} ({}), ply {}", entry.color, entry.san, entry.as_move(), self.history.len());
        Some(entry)
    }
}
