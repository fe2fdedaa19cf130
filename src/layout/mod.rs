//! Board geometry.
//!
//! The board is drawn from a static text template. Every tile owns three
//! marker runs in it (color band, detail row, player row); their screen
//! coordinates are found once by scanning the template and then stored in
//! tile id order so drawing a tile is a plain array lookup.

pub mod order;
pub mod template;

pub use order::{ACTUAL_TO_VISUAL, VISUAL_TO_ACTUAL, to_actual_order};
pub use template::{
    BOARD_TEMPLATE, CENTER_REGION, COLOR_MARKER, DETAIL_MARKER, PLAYER_MARKER, is_two_line,
    name_lines, render_base_board,
};

use crate::types::{NUM_TILES, Position, Size, TileId};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("expected {expected} occurrences of `{marker}` in board template, found {found}")]
    MarkerCount {
        marker: String,
        expected: usize,
        found: usize,
    },
    #[error("region `{0}` not found in board template")]
    MissingRegion(String),
    #[error("region `{name}` appears {found} times in board template")]
    DuplicateRegion { name: String, found: usize },
    #[error("unknown board template region `{0}`")]
    UnknownRegion(String),
    #[error("malformed board template token `{0}`")]
    MalformedToken(String),
    #[error("unterminated board template token at row {row}, col {col}")]
    UnterminatedToken { row: usize, col: usize },
    #[error("name `{name}` of tile {tile_id} does not fit in {width} columns")]
    NameTooWide {
        tile_id: TileId,
        name: String,
        width: usize,
    },
    #[error("expected {expected} tile names, found {found}")]
    NameCount { expected: usize, found: usize },
    #[error("board template is empty")]
    EmptyTemplate,
}

/// Finds every occurrence of `marker` in `text`, in scan order.
///
/// Rows and columns are 1-based and counted in chars, so multi-byte glyphs
/// earlier on a line do not shift later columns. Fails unless exactly
/// `expected` occurrences exist.
pub fn find_positions(
    text: &str,
    marker: &str,
    expected: usize,
) -> Result<Vec<Position>, LayoutError> {
    debug_assert!(!marker.is_empty());
    let marker: Vec<char> = marker.chars().collect();
    let chars: Vec<char> = text.chars().collect();

    let mut positions = Vec::with_capacity(expected);
    let mut row: u16 = 1;
    let mut col: u16 = 0;
    let mut idx = 0;
    while idx < chars.len() {
        if chars[idx] == '\n' {
            row += 1;
            col = 0;
            idx += 1;
            continue;
        }

        col += 1;
        if chars[idx..].starts_with(&marker) {
            positions.push(Position::new(col, row));
            idx += marker.len();
            col += marker.len() as u16 - 1;
            continue;
        }
        idx += 1;
    }

    if positions.len() != expected {
        return Err(LayoutError::MarkerCount {
            marker: marker.iter().collect(),
            expected,
            found: positions.len(),
        });
    }
    Ok(positions)
}

/// Locates the opening brace of a named `{NAME~}` region.
pub fn find_region(text: &str, name: &str) -> Result<Position, LayoutError> {
    let token = format!("{{{name}");
    match find_positions(text, &token, 1) {
        Ok(positions) => Ok(positions[0]),
        Err(LayoutError::MarkerCount { found: 0, .. }) => {
            Err(LayoutError::MissingRegion(name.to_string()))
        }
        Err(LayoutError::MarkerCount { found, .. }) => Err(LayoutError::DuplicateRegion {
            name: name.to_string(),
            found,
        }),
        Err(err) => Err(err),
    }
}

/// Width of the first line and number of lines, in chars.
pub fn measure(text: &str) -> Result<Size, LayoutError> {
    let first = text.lines().next().ok_or(LayoutError::EmptyTemplate)?;
    Ok(Size {
        width: first.chars().count() as u16,
        height: text.lines().count() as u16,
    })
}

/// Screen coordinates of every drawable region, indexed by tile id.
#[derive(Debug, Clone)]
pub struct Layout {
    colors: [Position; NUM_TILES],
    details: [Position; NUM_TILES],
    players: [Position; NUM_TILES],
    center: Position,
    size: Size,
}

impl Layout {
    pub fn resolve(template: &str) -> Result<Self, LayoutError> {
        Ok(Self {
            colors: resolve_marker(template, COLOR_MARKER)?,
            details: resolve_marker(template, DETAIL_MARKER)?,
            players: resolve_marker(template, PLAYER_MARKER)?,
            center: find_region(template, CENTER_REGION)?,
            size: measure(template)?,
        })
    }

    pub fn color_position(&self, tile_id: TileId) -> Position {
        assert_tile(tile_id);
        self.colors[tile_id]
    }

    pub fn detail_position(&self, tile_id: TileId) -> Position {
        assert_tile(tile_id);
        self.details[tile_id]
    }

    pub fn player_position(&self, tile_id: TileId) -> Position {
        assert_tile(tile_id);
        self.players[tile_id]
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

fn resolve_marker(template: &str, marker: &str) -> Result<[Position; NUM_TILES], LayoutError> {
    let found = find_positions(template, marker, NUM_TILES)?;
    let visual: [Position; NUM_TILES] =
        found
            .try_into()
            .map_err(|found: Vec<Position>| LayoutError::MarkerCount {
                marker: marker.to_string(),
                expected: NUM_TILES,
                found: found.len(),
            })?;
    Ok(to_actual_order(&visual))
}

fn assert_tile(tile_id: TileId) {
    assert!(
        tile_id < NUM_TILES,
        "tile id {tile_id} outside of board (0..{NUM_TILES})"
    );
}
