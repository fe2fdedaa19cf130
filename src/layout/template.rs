use std::ops::RangeInclusive;

use super::LayoutError;
use crate::types::{NUM_TILES, TILE_WIDTH, TileId};

pub const COLOR_MARKER: &str = "CCCCCCC";
pub const DETAIL_MARKER: &str = "DDDDDDD";
pub const PLAYER_MARKER: &str = "PPPPPPP";
pub const CENTER_REGION: &str = "CENTER";

const BOTTOM_ROW: RangeInclusive<TileId> = 0..=10;
const TOP_ROW: RangeInclusive<TileId> = 20..=30;

/// Static board outline.
///
/// `CCCCCCC`, `DDDDDDD` and `PPPPPPP` mark the color band, detail row and
/// player row of each tile. Braced tokens are sized exactly like the text
/// that replaces them, so positions found in the template are also positions
/// on screen:
///
/// - `{TTLA~}`: display name of tile `TT`, line `L` (`a` or `b`), aligned
///   by `A` (`^`, `<` or `>`) across the full width of the token.
/// - `{NAME~}`: a named blank region such as the center of the board.
pub const BOARD_TEMPLATE: &str = r#"   {20a^~} {21a^~} {22a^~} {23a^~} {24a^~} {25a^~} {26a^~} {27a^~} {28a^~} {29a^~} {30a^~} 
   {20b^~} {21b^~} {22b^~} {23b^~} {24b^~} {25b^~} {26b^~} {27b^~} {28b^~} {29b^~} {30b^~} 
  |CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|
  |DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|
  |PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|
  |CCCCCCC|▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔|CCCCCCC|
  |DDDDDDD| {19a^~~~~~~~~~} | {CENTER~~~~~~~~~~~~~~~~~~~~~~~~~} | {31a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {18a^~~~~~~~~~} |                                   | {32a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {17a^~~~~~~~~~} |                                   | {33a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {16a^~~~~~~~~~} |                                   | {34a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {15a^~~~~~~~~~} |                                   | {35a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {14a^~~~~~~~~~} |                                   | {36a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {13a^~~~~~~~~~} |                                   | {37a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {12a^~~~~~~~~~} |                                   | {38a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                 |                                   |                 |PPPPPPP|
  |CCCCCCC|                 |                                   |                 |CCCCCCC|
  |DDDDDDD| {11a^~~~~~~~~~} |                                   | {39a^~~~~~~~~~} |DDDDDDD|
  |PPPPPPP|                                                                       |PPPPPPP|
  |CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|CCCCCCC|
  |DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|DDDDDDD|
  |PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|PPPPPPP|
   ▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔ 
   {10a^~} {09a^~} {08a^~} {07a^~} {06a^~} {05a^~} {04a^~} {03a^~} {02a^~} {01a^~} {00a^~} 
   {10b^~} {09b^~} {08b^~} {07b^~} {06b^~} {05b^~} {04b^~} {03b^~} {02b^~} {01b^~} {00b^~} 
"#;

/// Tiles along the top and bottom edges get two stacked name lines.
pub fn is_two_line(tile_id: TileId) -> bool {
    BOTTOM_ROW.contains(&tile_id) || TOP_ROW.contains(&tile_id)
}

/// Splits a display name over the lines available to its tile.
///
/// Only two-line tiles split, and only when the name does not fit a single
/// cell. Names without a space stay on the first line.
pub fn name_lines(display_name: &str, two_line: bool) -> [&str; 2] {
    if two_line && display_name.chars().count() > TILE_WIDTH {
        if let Some((first, second)) = display_name.split_once(' ') {
            return [first, second];
        }
    }
    [display_name, ""]
}

/// Substitutes tile names into the template and blanks every marker run.
///
/// The result is written to the terminal once; everything drawn afterwards
/// goes over it cell by cell.
pub fn render_base_board(template: &str, display_names: &[String]) -> Result<String, LayoutError> {
    if display_names.len() != NUM_TILES {
        return Err(LayoutError::NameCount {
            expected: NUM_TILES,
            found: display_names.len(),
        });
    }

    let markers: Vec<Vec<char>> = [COLOR_MARKER, DETAIL_MARKER, PLAYER_MARKER]
        .iter()
        .map(|marker| marker.chars().collect())
        .collect();

    let mut output = String::with_capacity(template.len());
    for (row_idx, line) in template.lines().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let mut col = 0;
        while col < chars.len() {
            if let Some(marker) = markers.iter().find(|m| chars[col..].starts_with(m)) {
                output.extend(std::iter::repeat(' ').take(marker.len()));
                col += marker.len();
                continue;
            }

            if chars[col] == '{' {
                let close = chars[col..]
                    .iter()
                    .position(|c| *c == '}')
                    .map(|offset| col + offset)
                    .ok_or(LayoutError::UnterminatedToken {
                        row: row_idx + 1,
                        col: col + 1,
                    })?;
                let token: String = chars[col + 1..close].iter().collect();
                let width = close - col + 1;
                output.push_str(&expand_token(&token, width, display_names)?);
                col = close + 1;
                continue;
            }

            output.push(chars[col]);
            col += 1;
        }
        output.push('\n');
    }
    Ok(output)
}

fn expand_token(token: &str, width: usize, display_names: &[String]) -> Result<String, LayoutError> {
    let malformed = || LayoutError::MalformedToken(token.to_string());
    let chars: Vec<char> = token.chars().collect();

    if !chars.first().is_some_and(|c| c.is_ascii_digit()) {
        let name: String = chars.iter().take_while(|c| c.is_ascii_uppercase()).collect();
        return match name.as_str() {
            CENTER_REGION => Ok(" ".repeat(width)),
            _ => Err(LayoutError::UnknownRegion(name)),
        };
    }

    if chars.len() < 4 || chars[4..].iter().any(|c| *c != '~') {
        return Err(malformed());
    }
    let tile_id: TileId = chars[..2]
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| malformed())?;
    let line = match chars[2] {
        'a' => 0,
        'b' => 1,
        _ => return Err(malformed()),
    };
    let display_name = display_names.get(tile_id).ok_or_else(malformed)?;
    let text = name_lines(display_name, is_two_line(tile_id))[line];
    if text.chars().count() > width {
        return Err(LayoutError::NameTooWide {
            tile_id,
            name: text.to_string(),
            width,
        });
    }

    match chars[3] {
        '^' => Ok(format!("{text:^width$}")),
        '<' => Ok(format!("{text:<width$}")),
        '>' => Ok(format!("{text:>width$}")),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_names() -> Vec<String> {
        (0..NUM_TILES).map(|id| format!("T{id}")).collect()
    }

    #[test]
    fn template_lines_share_one_width() {
        let widths: Vec<usize> = BOARD_TEMPLATE.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn short_names_stay_on_one_line() {
        assert_eq!(name_lines("B&O RR", true), ["B&O RR", ""]);
        assert_eq!(name_lines("GO", true), ["GO", ""]);
    }

    #[test]
    fn wide_names_split_on_first_space_for_edge_rows() {
        assert_eq!(name_lines("MEDIT AVE", true), ["MEDIT", "AVE"]);
        assert_eq!(name_lines("MARVIN GARDENS", true), ["MARVIN", "GARDENS"]);
        assert_eq!(name_lines("CHARLES PLACE", false), ["CHARLES PLACE", ""]);
    }

    #[test]
    fn wide_names_without_space_keep_second_line_blank() {
        assert_eq!(name_lines("BOARDWALKS", true), ["BOARDWALKS", ""]);
    }

    #[test]
    fn edge_rows_are_two_line() {
        assert!(is_two_line(0));
        assert!(is_two_line(10));
        assert!(!is_two_line(11));
        assert!(!is_two_line(19));
        assert!(is_two_line(20));
        assert!(is_two_line(30));
        assert!(!is_two_line(39));
    }

    #[test]
    fn base_board_keeps_template_geometry() {
        let rendered = render_base_board(BOARD_TEMPLATE, &numbered_names()).expect("renders");
        let template_lines: Vec<&str> = BOARD_TEMPLATE.lines().collect();
        let rendered_lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(template_lines.len(), rendered_lines.len());
        for (template, rendered) in template_lines.iter().zip(&rendered_lines) {
            assert_eq!(template.chars().count(), rendered.chars().count());
        }
        assert!(!rendered.contains(COLOR_MARKER));
        assert!(!rendered.contains(DETAIL_MARKER));
        assert!(!rendered.contains(PLAYER_MARKER));
        assert!(!rendered.contains('{'));
        assert!(rendered.contains("T39"));
    }

    #[test]
    fn side_names_are_centered() {
        let mut names = numbered_names();
        names[19] = "NEWYORK AVE".to_string();
        let rendered = render_base_board(BOARD_TEMPLATE, &names).expect("renders");
        assert!(rendered.contains("|   NEWYORK AVE   |"));
    }

    #[test]
    fn oversized_name_is_rejected() {
        let mut names = numbered_names();
        names[5] = "READINGRR".to_string();
        let err = render_base_board(BOARD_TEMPLATE, &names).unwrap_err();
        assert!(matches!(err, LayoutError::NameTooWide { tile_id: 5, .. }));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = render_base_board("{BOGUS~}\n", &numbered_names()).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownRegion(name) if name == "BOGUS"));
    }

    #[test]
    fn wrong_name_count_is_rejected() {
        let err = render_base_board(BOARD_TEMPLATE, &[]).unwrap_err();
        assert!(matches!(err, LayoutError::NameCount { found: 0, .. }));
    }
}
