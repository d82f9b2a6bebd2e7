//! Per-square style overrides handed to the board widget.
//!
//! Every highlight the controller shows is derived here. Attribute names
//! serialize in the widget's camelCase property names; absent attributes are
//! omitted.

use cozy_chess::Square;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::board::HistoryEntry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<&'static str>,
}

const NO_STYLE: SquareStyle = SquareStyle { background: None, background_color: None, border_radius: None, box_shadow: None };

/// Armed square and the two squares of the last move.
pub const SELECTED: SquareStyle = SquareStyle { background_color: Some("rgba(255, 255, 0, 0.4)"), ..NO_STYLE };

/// Hover marker: the hovered piece and each square it can move to.
pub const POSSIBLE_MOVE: SquareStyle = SquareStyle {
    background: Some("radial-gradient(circle, #fffc00 36%, transparent 40%)"),
    border_radius: Some("50%"),
    ..NO_STYLE
};

pub const DROP_CENTER: SquareStyle = SquareStyle { background_color: Some("cornFlowerBlue"), ..NO_STYLE };

pub const DROP_EDGE: SquareStyle = SquareStyle { box_shadow: Some("inset 0 0 1px 4px rgb(255, 255, 0)"), ..NO_STYLE };

pub const CENTER_SQUARES: [Square; 4] = [Square::E4, Square::D4, Square::E5, Square::D5];

pub fn is_center_square(sq: Square) -> bool { CENTER_SQUARES.contains(&sq) }

/// Style for the square a piece is currently dragged over.
pub fn drop_square_style(sq: Square) -> SquareStyle {
    if is_center_square(sq) { DROP_CENTER } else { DROP_EDGE }
}

/// Square → style table, one slot per square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightMap {
    slots: [Option<SquareStyle>; 64],
}

impl Default for HighlightMap {
    fn default() -> Self { Self { slots: [None; 64] } }
}

impl HighlightMap {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, sq: Square) -> Option<SquareStyle> { self.slots[sq as usize] }

    pub fn set(&mut self, sq: Square, style: SquareStyle) { self.slots[sq as usize] = Some(style); }

    pub fn contains(&self, sq: Square) -> bool { self.slots[sq as usize].is_some() }

    pub fn clear(&mut self) { self.slots = [None; 64]; }

    pub fn len(&self) -> usize { self.slots.iter().filter(|s| s.is_some()).count() }

    pub fn is_empty(&self) -> bool { self.slots.iter().all(Option::is_none) }

    pub fn iter(&self) -> impl Iterator<Item = (Square, SquareStyle)> + '_ {
        Square::ALL.into_iter().filter_map(move |sq| self.slots[sq as usize].map(|s| (sq, s)))
    }

    pub fn squares(&self) -> Vec<Square> { self.iter().map(|(sq, _)| sq).collect() }

    /// Copies every entry of `top` over `self`; `top` wins where both are set.
    pub fn overlay(&mut self, top: &HighlightMap) {
        for (sq, style) in top.iter() { self.set(sq, style); }
    }
}

impl Serialize for HighlightMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (sq, style) in self.iter() {
            map.serialize_entry(&sq.to_string(), &style)?;
        }
        map.end()
    }
}

/// Persistent highlight: the armed square plus both squares of the most
/// recent move, all with [`SELECTED`].
pub fn square_styling(selection: Option<Square>, history: &[HistoryEntry]) -> HighlightMap {
    let mut map = HighlightMap::new();
    if let Some(sq) = selection { map.set(sq, SELECTED); }
    if let Some(last) = history.last() {
        map.set(last.from, SELECTED);
        map.set(last.to, SELECTED);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CozyEngine, RulesEngine};

    #[test]
    fn styling_without_selection_or_history_is_empty() {
        assert!(square_styling(None, &[]).is_empty());
    }

    #[test]
    fn styling_marks_selection_and_last_move() {
        let engine = CozyEngine::from_start_and_moves(&["e2e4", "e7e5"]).unwrap();
        let map = square_styling(Some(Square::G1), engine.history());
        assert_eq!(map.squares(), vec![Square::G1, Square::E5, Square::E7]);
        assert!(map.iter().all(|(_, s)| s == SELECTED));
    }

    #[test]
    fn selection_on_last_move_square_is_counted_once() {
        let engine = CozyEngine::from_start_and_moves(&["e2e4"]).unwrap();
        let map = square_styling(Some(Square::E4), engine.history());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn overlay_prefers_top_layer() {
        let mut base = HighlightMap::new();
        base.set(Square::A1, POSSIBLE_MOVE);
        base.set(Square::B2, POSSIBLE_MOVE);
        let mut top = HighlightMap::new();
        top.set(Square::A1, SELECTED);
        base.overlay(&top);
        assert_eq!(base.get(Square::A1), Some(SELECTED));
        assert_eq!(base.get(Square::B2), Some(POSSIBLE_MOVE));
    }

    #[test]
    fn center_squares_get_center_drop_style() {
        for sq in CENTER_SQUARES { assert_eq!(drop_square_style(sq), DROP_CENTER); }
        for sq in [Square::A1, Square::E3, Square::F5, Square::D6, Square::H8] {
            assert_eq!(drop_square_style(sq), DROP_EDGE, "{sq}");
        }
    }

    #[test]
    fn serializes_as_label_keyed_object() {
        let mut map = HighlightMap::new();
        map.set(Square::E4, SELECTED);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"e4":{"backgroundColor":"rgba(255, 255, 0, 0.4)"}}"#);
    }
}
