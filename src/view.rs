//! Board view description
//!
//! `render` turns puzzle state into a plain description of every tile. Hosts
//! apply it to whatever surface they own (DOM, terminal); nothing here touches
//! puzzle state.

use serde::{Deserialize, Serialize};

use crate::sim::{FlipFlags, Position, PuzzleState, TileKind, tick::deflection};

/// Visual class of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileClass {
    Plain,
    Red,
    Blue,
    Start,
    Goal,
}

impl TileClass {
    pub fn of(kind: TileKind) -> Self {
        match kind {
            TileKind::Red => TileClass::Red,
            TileKind::Blue => TileClass::Blue,
            TileKind::Start => TileClass::Start,
            TileKind::Goal => TileClass::Goal,
            TileKind::Empty | TileKind::Other(_) => TileClass::Plain,
        }
    }

    /// CSS class added next to `tile`, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            TileClass::Plain => None,
            TileClass::Red => Some("tile-red"),
            TileClass::Blue => Some("tile-blue"),
            TileClass::Start => Some("tile-start"),
            TileClass::Goal => Some("tile-goal"),
        }
    }

    /// Text shown inside the tile
    pub fn label(&self) -> Option<&'static str> {
        match self {
            TileClass::Start => Some("START"),
            TileClass::Goal => Some("G"),
            _ => None,
        }
    }
}

/// Direction a slope tile currently sends the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    Left,
    Right,
}

impl Slope {
    fn for_tile(kind: TileKind, flags: FlipFlags) -> Option<Self> {
        match deflection(kind, flags) {
            d if d < 0 => Some(Slope::Left),
            d if d > 0 => Some(Slope::Right),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Slope::Left => "slope-left",
            Slope::Right => "slope-right",
        }
    }
}

/// A single rendered tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub pos: Position,
    pub class: TileClass,
    pub slope: Option<Slope>,
    pub has_ball: bool,
}

impl TileView {
    /// Full CSS class list, `tile` first
    pub fn css_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["tile"];
        classes.extend(self.class.css_class());
        classes.extend(self.slope.map(|s| s.css_class()));
        classes
    }

    fn glyph(&self) -> char {
        if self.has_ball {
            return 'o';
        }
        match (self.class, self.slope) {
            (TileClass::Start, _) => 'S',
            (TileClass::Goal, _) => 'G',
            (_, Some(Slope::Left)) => '/',
            (_, Some(Slope::Right)) => '\\',
            _ => '.',
        }
    }
}

/// Whole board, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<TileView>,
}

impl BoardView {
    pub fn tile(&self, pos: Position) -> Option<&TileView> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.tiles.get(pos.row * self.cols + pos.col)
    }

    /// Position of the ball, if drawn
    pub fn ball(&self) -> Option<Position> {
        self.tiles.iter().find(|t| t.has_ball).map(|t| t.pos)
    }

    /// `grid-template-columns` value sizing the board
    pub fn grid_template_columns(&self, tile_size_px: u32) -> String {
        format!("repeat({}, {}px)", self.cols, tile_size_px)
    }

    /// One line per row: `o` ball, `/` `\` slopes, `S` start, `G` goal
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.tiles.chunks(self.cols.max(1)) {
            for tile in row {
                out.push(tile.glyph());
            }
            out.push('\n');
        }
        out
    }
}

/// Render the current board
pub fn render(state: &PuzzleState) -> BoardView {
    let tiles = state
        .grid
        .cells()
        .map(|(pos, kind)| TileView {
            pos,
            class: TileClass::of(kind),
            slope: Slope::for_tile(kind, state.flags),
            has_ball: pos == state.ball,
        })
        .collect();

    BoardView {
        rows: state.grid.rows(),
        cols: state.grid.cols(),
        tiles,
    }
}

/// Styling of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// Text for the host status area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Class attribute for the alert element
    pub fn class_name(&self) -> String {
        format!("alert {}", self.kind.as_str())
    }
}
