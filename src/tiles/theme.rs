use std::collections::HashMap;

use crossterm::style::{Color, ContentStyle};
use once_cell::sync::Lazy;

use super::label::Label;
use crate::types::TILE_WIDTH;

static GROUP_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("Red", Color::Red),
        ("Orange", Color::Rgb { r: 255, g: 140, b: 0 }),
        ("Yellow", Color::Yellow),
        ("Green", Color::DarkGreen),
        ("Cyan", Color::Rgb { r: 0, g: 206, b: 209 }),
        ("Blue", Color::Rgb { r: 0, g: 0, b: 128 }),
        ("Magenta", Color::Rgb { r: 255, g: 20, b: 147 }),
        ("Brown", Color::Rgb { r: 139, g: 69, b: 19 }),
        ("Gray", Color::Rgb { r: 112, g: 128, b: 144 }),
        ("White", Color::Rgb { r: 255, g: 250, b: 250 }),
        ("Purple", Color::DarkMagenta),
        ("Salmon", Color::Rgb { r: 250, g: 128, b: 114 }),
        ("Spring", Color::Rgb { r: 0, g: 255, b: 127 }),
        ("Black", Color::Black),
    ])
});

/// Background color of a group's band. Unknown groups are left uncolored.
pub fn group_color(group: &str) -> Option<Color> {
    GROUP_COLORS.get(group).copied()
}

pub fn color_band(group: &str) -> Label {
    let style = ContentStyle {
        background_color: group_color(group),
        ..ContentStyle::default()
    };
    Label::styled(style, "▔".repeat(TILE_WIDTH))
}
