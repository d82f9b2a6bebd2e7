// Two-player board controller: gestures in, validated moves and square styles out
pub mod board;
pub mod config;
pub mod controller;
pub mod protocol;
pub mod styles;

pub use board::{CozyEngine, GameStatus, HistoryEntry, IllegalMove, Move, Position, RulesEngine};
pub use config::{ControllerConfig, DEFAULT_PROMOTION};
pub use controller::GameController;
pub use protocol::{BoardProps, Gesture, GestureError};
