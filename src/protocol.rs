//! Wire shapes shared with the board widget: the gestures it reports and the
//! properties it renders from.

use cozy_chess::{Color, Square};
use serde::{Deserialize, Serialize};

use crate::board::{ser_color, CozyEngine, FenError, GameStatus, HistoryEntry, Position, RulesEngine};
use crate::controller::GameController;
use crate::styles::{HighlightMap, SquareStyle};

/// A user gesture as the widget reports it, squares still as text labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gesture {
    #[serde(rename_all = "camelCase")]
    Drop { source_square: String, target_square: String },
    MouseOverSquare { square: String },
    MouseOutSquare { square: String },
    DragOverSquare { square: String },
    SquareClick { square: String },
    NewGame,
}

impl Gesture {
    pub fn from_json(line: &str) -> Result<Self, GestureError> { Ok(serde_json::from_str(line)?) }
}

#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("bad square label '{0}'")]
    BadSquare(String),
    #[error("malformed gesture: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Fen(#[from] FenError),
}

pub fn parse_square(label: &str) -> Result<Square, GestureError> {
    label.trim().to_lowercase().parse::<Square>().map_err(|_| GestureError::BadSquare(label.to_string()))
}

/// Everything the widget needs for one render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardProps<'a> {
    pub position: &'a Position,
    pub square_styles: &'a HighlightMap,
    /// `{}` until the first drag-over.
    pub drop_square_style: SquareStyle,
    pub history: &'a [HistoryEntry],
    pub status: GameStatus,
    #[serde(serialize_with = "ser_color")]
    pub turn: Color,
}

impl<E: RulesEngine> GameController<E> {
    pub fn props(&self) -> BoardProps<'_> {
        BoardProps {
            position: self.position(),
            square_styles: self.square_styles(),
            drop_square_style: self.drop_square_style().unwrap_or_default(),
            history: self.history(),
            status: self.status(),
            turn: self.side_to_move(),
        }
    }
}

impl GameController<CozyEngine> {
    /// Routes a wire gesture to its handler. Returns the history entry when
    /// the gesture produced a move.
    pub fn dispatch(&mut self, gesture: &Gesture) -> Result<Option<HistoryEntry>, GestureError> {
        let entry = match gesture {
            Gesture::Drop { source_square, target_square } => {
                self.on_drop(parse_square(source_square)?, parse_square(target_square)?)
            }
            Gesture::MouseOverSquare { square } => { self.on_mouse_over_square(parse_square(square)?); None }
            Gesture::MouseOutSquare { square } => { self.on_mouse_out_square(parse_square(square)?); None }
            Gesture::DragOverSquare { square } => { self.on_drag_over_square(parse_square(square)?); None }
            Gesture::SquareClick { square } => self.on_square_click(parse_square(square)?),
            Gesture::NewGame => { self.new_game()?; None }
        };
        Ok(entry)
    }
}
