use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{MAX_COST, NUM_TILES, TILE_WIDTH, TileId, TileType};

const CLASSIC_BOARD: &str = include_str!("../data/classic_board.json");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read board file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid board description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board must have exactly {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },
    #[error("tile {tile_id} has invalid display name `{name}`: {reason}")]
    InvalidName {
        tile_id: TileId,
        name: String,
        reason: &'static str,
    },
    #[error("tile {tile_id} costs {cost}, more than the 9999 a tile can display")]
    CostOutOfRange { tile_id: TileId, cost: u32 },
    #[error("tile {tile_id} is a {tile_type} and needs a cost")]
    MissingCost { tile_id: TileId, tile_type: TileType },
    #[error("tile {tile_id} has an empty rent table")]
    EmptyRent { tile_id: TileId },
    #[error("player count must be between 1 and 4, got {0}")]
    PlayerCount(usize),
    #[error("start tile {0} is not on the board")]
    StartTile(TileId),
}

/// One entry of a board description.
///
/// `rent` is indexed by tier, starting with the plain owned rent. When it is
/// left out an ownable tile charges a tenth of its cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileConfig {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub tile_type: TileType,
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<Vec<u32>>,
}

/// A validated list of exactly 40 tiles, in board order starting from Go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    tiles: Vec<TileConfig>,
}

impl BoardConfig {
    pub fn new(tiles: Vec<TileConfig>) -> Result<Self, ConfigError> {
        if tiles.len() != NUM_TILES {
            return Err(ConfigError::TileCount {
                expected: NUM_TILES,
                found: tiles.len(),
            });
        }

        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(tile_id, tile)| normalize(tile_id, tile))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tiles })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tiles: Vec<TileConfig> = serde_json::from_str(json)?;
        Self::new(tiles)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The standard Atlantic City board.
    pub fn classic() -> Result<Self, ConfigError> {
        Self::from_json(CLASSIC_BOARD)
    }

    pub fn tiles(&self) -> &[TileConfig] {
        &self.tiles
    }

    pub fn tile(&self, tile_id: TileId) -> Option<&TileConfig> {
        self.tiles.get(tile_id)
    }

    pub fn display_names(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.display_name.clone()).collect()
    }
}

fn normalize(tile_id: TileId, mut tile: TileConfig) -> Result<TileConfig, ConfigError> {
    validate_display_name(tile_id, &tile.display_name)?;

    if !tile.tile_type.is_ownable() {
        if tile.cost.is_some() || tile.rent.is_some() {
            warn!(
                tile_id,
                tile_type = %tile.tile_type,
                "ignoring cost and rent on a tile that cannot be bought"
            );
        }
        tile.cost = None;
        tile.rent = None;
        return Ok(tile);
    }

    let cost = tile.cost.ok_or(ConfigError::MissingCost {
        tile_id,
        tile_type: tile.tile_type,
    })?;
    if cost > MAX_COST {
        return Err(ConfigError::CostOutOfRange { tile_id, cost });
    }

    match &tile.rent {
        Some(rent) if rent.is_empty() => return Err(ConfigError::EmptyRent { tile_id }),
        Some(_) => {}
        None => tile.rent = Some(vec![cost / 10]),
    }
    Ok(tile)
}

fn validate_display_name(tile_id: TileId, name: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidName {
        tile_id,
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.matches(' ').count() > 1 {
        return Err(invalid("at most one space is allowed"));
    }
    if name.split(' ').any(str::is_empty) {
        return Err(invalid("space must separate two words"));
    }
    if name.split(' ').any(|word| word.chars().count() > TILE_WIDTH) {
        return Err(invalid("words are limited to 7 characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn classic_tiles() -> Vec<TileConfig> {
        BoardConfig::classic()
            .expect("embedded board is valid")
            .tiles()
            .to_vec()
    }

    #[test]
    fn classic_board_loads() {
        let board = BoardConfig::classic().unwrap();
        assert_eq!(board.tiles().len(), NUM_TILES);
        let go = board.tile(0).unwrap();
        assert_eq!(go.tile_type, TileType::Corner);
        assert_eq!(go.cost, None);

        let mediterranean = board.tile(1).unwrap();
        assert_eq!(mediterranean.display_name, "MEDIT AVE");
        assert_eq!(mediterranean.cost, Some(60));
        assert_eq!(mediterranean.rent.as_deref().map(|r| r[0]), Some(2));
    }

    #[test]
    fn loads_board_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string_pretty(&classic_tiles()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let board = BoardConfig::from_path(file.path()).unwrap();
        assert_eq!(board, BoardConfig::classic().unwrap());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.json");
        let err = BoardConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
    }

    #[test]
    fn unknown_tile_type_is_a_parse_error() {
        let json = r#"[{"name": "Jail", "display_name": "JAIL", "type": "Jail", "group": "Black"}]"#;
        assert!(matches!(
            BoardConfig::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn wrong_tile_count_is_rejected() {
        let mut tiles = classic_tiles();
        tiles.pop();
        assert!(matches!(
            BoardConfig::new(tiles),
            Err(ConfigError::TileCount {
                expected: 40,
                found: 39
            })
        ));
    }

    #[test]
    fn display_names_are_validated() {
        for bad in ["", "   ", "ONE TWO THREE", "LONGWORDS AVE", "TRAIL ", " LEAD"] {
            let mut tiles = classic_tiles();
            tiles[3].display_name = bad.to_string();
            let err = BoardConfig::new(tiles).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidName { tile_id: 3, .. }),
                "{bad:?} gave {err}"
            );
        }
    }

    #[test]
    fn ownable_tiles_need_a_displayable_cost() {
        let mut tiles = classic_tiles();
        tiles[5].cost = None;
        assert!(matches!(
            BoardConfig::new(tiles),
            Err(ConfigError::MissingCost { tile_id: 5, .. })
        ));

        let mut tiles = classic_tiles();
        tiles[39].cost = Some(10_000);
        assert!(matches!(
            BoardConfig::new(tiles),
            Err(ConfigError::CostOutOfRange {
                tile_id: 39,
                cost: 10_000
            })
        ));
    }

    #[test]
    fn rent_table_defaults_but_cannot_be_empty() {
        let mut tiles = classic_tiles();
        tiles[1].rent = None;
        let board = BoardConfig::new(tiles).unwrap();
        assert_eq!(board.tile(1).unwrap().rent, Some(vec![6]));

        let mut tiles = classic_tiles();
        tiles[1].rent = Some(Vec::new());
        assert!(matches!(
            BoardConfig::new(tiles),
            Err(ConfigError::EmptyRent { tile_id: 1 })
        ));
    }

    #[test]
    fn cost_on_event_tile_is_dropped() {
        let mut tiles = classic_tiles();
        tiles[7].cost = Some(100);
        let board = BoardConfig::new(tiles).unwrap();
        assert_eq!(board.tile(7).unwrap().cost, None);
    }
}
