use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub type TileId = usize;
pub type PlayerId = usize;

pub const NUM_TILES: usize = 40;
pub const MAX_PLAYERS: usize = 4;

/// Printable width of every tile cell on the board.
pub const TILE_WIDTH: usize = 7;

/// Largest cost that still fits next to a two-character status glyph.
pub const MAX_COST: u32 = 9999;

/// Top-left anchored terminal coordinate. Both axes are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: u16,
    pub row: u16,
}

impl Position {
    pub const ORIGIN: Position = Position { col: 1, row: 1 };

    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }

    /// Translates a board-relative position so that `(1, 1)` lands on `origin`.
    pub fn offset_by(self, origin: Position) -> Position {
        Position {
            col: origin.col + self.col - 1,
            row: origin.row + self.row - 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::ORIGIN
    }
}

/// Character footprint of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
pub enum OwnershipStatus {
    #[default]
    Unowned,
    Owned,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    Mortgaged,
}

impl OwnershipStatus {
    pub fn is_owned(self) -> bool {
        !matches!(self, OwnershipStatus::Unowned)
    }

    /// Index into a tile's rent table, or `None` when no rent is collected.
    pub fn rent_tier(self) -> Option<usize> {
        match self {
            OwnershipStatus::Unowned | OwnershipStatus::Mortgaged => None,
            OwnershipStatus::Owned => Some(0),
            OwnershipStatus::Tier1 => Some(1),
            OwnershipStatus::Tier2 => Some(2),
            OwnershipStatus::Tier3 => Some(3),
            OwnershipStatus::Tier4 => Some(4),
            OwnershipStatus::Tier5 => Some(5),
        }
    }

    /// Glyph drawn in front of the price on a tile's detail row.
    pub fn glyph(self) -> &'static str {
        match self {
            OwnershipStatus::Unowned => "_",
            OwnershipStatus::Owned => "X",
            OwnershipStatus::Tier1 => "1H",
            OwnershipStatus::Tier2 => "2H",
            OwnershipStatus::Tier3 => "3H",
            OwnershipStatus::Tier4 => "4H",
            OwnershipStatus::Tier5 => "HT",
            OwnershipStatus::Mortgaged => "M",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum TileType {
    Street,
    Railroad,
    Utility,
    Corner,
    Chance,
    Chest,
    Tax,
}

impl TileType {
    pub fn is_ownable(self) -> bool {
        matches!(
            self,
            TileType::Street | TileType::Railroad | TileType::Utility
        )
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn statuses_escalate_in_declaration_order() {
        let statuses: Vec<_> = OwnershipStatus::iter().collect();
        let mut sorted = statuses.clone();
        sorted.sort();
        assert_eq!(statuses, sorted);
        assert!(OwnershipStatus::Owned < OwnershipStatus::Tier1);
        assert!(OwnershipStatus::Tier5 < OwnershipStatus::Mortgaged);
    }

    #[test]
    fn glyphs_leave_room_for_largest_cost() {
        let widest_cost = format!("${MAX_COST}").len();
        for status in OwnershipStatus::iter() {
            assert!(status.glyph().len() + widest_cost <= TILE_WIDTH, "{status}");
        }
    }

    #[test]
    fn only_owned_states_collect_rent() {
        assert_eq!(OwnershipStatus::Unowned.rent_tier(), None);
        assert_eq!(OwnershipStatus::Mortgaged.rent_tier(), None);
        assert_eq!(OwnershipStatus::Owned.rent_tier(), Some(0));
        assert_eq!(OwnershipStatus::Tier5.rent_tier(), Some(5));
    }

    #[test]
    fn tile_types_parse_from_config_tags() {
        assert_eq!("Street".parse::<TileType>().ok(), Some(TileType::Street));
        assert!("Jail".parse::<TileType>().is_err());
        assert!(TileType::Railroad.is_ownable());
        assert!(!TileType::Chance.is_ownable());
    }

    #[test]
    fn offset_keeps_origin_fixed() {
        let origin = Position::new(5, 3);
        assert_eq!(Position::ORIGIN.offset_by(origin), origin);
        assert_eq!(Position::new(4, 2).offset_by(origin), Position::new(8, 4));
    }
}
