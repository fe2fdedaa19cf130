use crossterm::style::ContentStyle;
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::debug;

use super::dirty::{DirtyQueues, Layer};
use super::player::{Player, Token};
use super::session::GameError;
use crate::config::BoardConfig;
use crate::layout::{BOARD_TEMPLATE, Layout, LayoutError, render_base_board};
use crate::tiles::{Label, Tile};
use crate::types::{MAX_PLAYERS, NUM_TILES, OwnershipStatus, PlayerId, Size, TileId};

type Presence = [Option<Token>; MAX_PLAYERS];

/// Everything drawn on the board: geometry, tiles, who stands where, and what
/// needs repainting.
#[derive(Debug, Clone)]
pub struct Board {
    layout: Layout,
    base: String,
    tiles: Vec<Tile>,
    presence: [Presence; NUM_TILES],
    dirty: DirtyQueues,
}

impl Board {
    pub fn new(config: &BoardConfig) -> Result<Self, LayoutError> {
        Self::with_template(config, BOARD_TEMPLATE)
    }

    pub fn with_template(config: &BoardConfig, template: &str) -> Result<Self, LayoutError> {
        let layout = Layout::resolve(template)?;
        let base = render_base_board(template, &config.display_names())?;
        let tiles = config
            .tiles()
            .iter()
            .enumerate()
            .map(|(id, tile)| Tile::new(id, tile))
            .collect();

        let mut dirty = DirtyQueues::new();
        for layer in Layer::iter() {
            dirty.push_all(layer);
        }

        Ok(Self {
            layout,
            base,
            tiles,
            presence: [[None; MAX_PLAYERS]; NUM_TILES],
            dirty,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The board text with names filled in and every dynamic cell blank.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn size(&self) -> Size {
        self.layout.size()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Panics on ids off the board; use [`Board::find_tile`] for user input.
    pub fn tile(&self, tile_id: TileId) -> &Tile {
        assert!(tile_id < NUM_TILES, "tile id {tile_id} outside of board");
        &self.tiles[tile_id]
    }

    pub fn find_tile(&self, tile_id: TileId) -> Result<&Tile, GameError> {
        self.tiles.get(tile_id).ok_or(GameError::InvalidTile(tile_id))
    }

    pub fn buy_tile(&mut self, tile_id: TileId, buyer: &mut Player) -> Result<u32, GameError> {
        let tile = self
            .tiles
            .get_mut(tile_id)
            .ok_or(GameError::InvalidTile(tile_id))?;
        let cost = tile.purchase(buyer)?;
        self.dirty.push(Layer::Detail, tile_id);
        Ok(cost)
    }

    pub fn set_ownership(
        &mut self,
        tile_id: TileId,
        status: OwnershipStatus,
        owner: Option<PlayerId>,
    ) -> Result<(), GameError> {
        let tile = self
            .tiles
            .get_mut(tile_id)
            .ok_or(GameError::InvalidTile(tile_id))?;
        tile.set_ownership(status, owner)?;
        self.dirty.push(Layer::Detail, tile_id);
        Ok(())
    }

    pub fn rent_due(&self, tile_id: TileId, visitor: PlayerId) -> u32 {
        self.tile(tile_id).rent_due(visitor)
    }

    /// Puts a player's token on their current tile, used once at setup.
    pub fn place_player_piece(&mut self, player: &Player) {
        let tile_id = player.position();
        self.presence[tile_id][player.id] = Some(player.token);
        self.dirty.push(Layer::Player, tile_id);
    }

    /// Moves a token to reflect the player's last walk. Returns whether
    /// anything changed.
    pub fn move_player_piece(&mut self, player: &mut Player) -> bool {
        let (from, to) = (player.last_position(), player.position());
        if player.movement_applied() || from == to {
            return false;
        }

        let slot = player.id;
        let marker = self.presence[from][slot].take();
        let displaced = std::mem::replace(&mut self.presence[to][slot], marker);
        self.presence[from][slot] = displaced;

        self.dirty.push(Layer::Player, from);
        self.dirty.push(Layer::Player, to);
        player.mark_moved();
        debug!(player = player.id, from, to, "moved piece");
        true
    }

    pub fn occupants(&self, tile_id: TileId) -> impl Iterator<Item = Token> + '_ {
        self.presence_slots(tile_id).iter().flatten().copied()
    }

    fn presence_slots(&self, tile_id: TileId) -> &Presence {
        assert!(tile_id < NUM_TILES, "tile id {tile_id} outside of board");
        &self.presence[tile_id]
    }

    /// One column per player slot, separated by spaces.
    pub fn presence_text(&self, tile_id: TileId) -> String {
        self.presence_slots(tile_id)
            .iter()
            .map(|slot| slot.map_or(' ', |token| token.character))
            .join(" ")
    }

    pub fn presence_label(&self, tile_id: TileId) -> Label {
        let mut label = Label::default();
        for (slot, marker) in self.presence_slots(tile_id).iter().enumerate() {
            if slot > 0 {
                label.push(ContentStyle::new(), " ");
            }
            match marker {
                Some(token) => label.push(token.style(), token.character),
                None => label.push(ContentStyle::new(), " "),
            };
        }
        label
    }

    pub fn mark_dirty(&mut self, layer: Layer, tile_id: TileId) {
        self.dirty.push(layer, tile_id);
    }

    pub fn mark_all_dirty(&mut self, layer: Layer) {
        self.dirty.push_all(layer);
    }

    pub fn pop_dirty(&mut self, layer: Layer) -> Option<TileId> {
        self.dirty.pop(layer)
    }

    pub fn dirty(&self) -> &DirtyQueues {
        &self.dirty
    }
}
