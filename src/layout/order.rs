use crate::types::{NUM_TILES, TileId};

// Actual ids count from Go (0) around the board to the last tile (39).
// Visual ids count cells in the order the template is scanned: top to bottom, left to right.

/// Index is the actual tile id, value is its visual id.
pub const ACTUAL_TO_VISUAL: [usize; NUM_TILES] = [
    39, 38, 37, 36, 35, 34, 33, 32, 31, 30, 29, 27, 25, 23, 21, 19, 17, 15, 13, 11, //
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28,
];

/// Index is the visual id, value is the actual tile id.
pub const VISUAL_TO_ACTUAL: [TileId; NUM_TILES] = [
    20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 19, 31, 18, 32, 17, 33, 16, 34, 15, //
    35, 14, 36, 13, 37, 12, 38, 11, 39, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// Reorders values found in visual scan order so that index `i` belongs to tile `i`.
pub fn to_actual_order<T: Copy>(visual: &[T; NUM_TILES]) -> [T; NUM_TILES] {
    let mut actual = *visual;
    for (visual_id, value) in visual.iter().enumerate() {
        actual[VISUAL_TO_ACTUAL[visual_id]] = *value;
    }
    actual
}
