use std::collections::VecDeque;

use strum::{Display, EnumIter};

use crate::types::{NUM_TILES, TileId};

/// A visual layer of a tile that can be repainted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Layer {
    Color,
    Detail,
    Player,
}

/// Tiles waiting to be repainted, one FIFO per layer.
///
/// Game mutators push and the renderer pops. Duplicates are kept: painting a
/// tile twice gives the same screen.
#[derive(Debug, Clone, Default)]
pub struct DirtyQueues {
    color: VecDeque<TileId>,
    detail: VecDeque<TileId>,
    player: VecDeque<TileId>,
}

impl DirtyQueues {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue_mut(&mut self, layer: Layer) -> &mut VecDeque<TileId> {
        match layer {
            Layer::Color => &mut self.color,
            Layer::Detail => &mut self.detail,
            Layer::Player => &mut self.player,
        }
    }

    fn queue(&self, layer: Layer) -> &VecDeque<TileId> {
        match layer {
            Layer::Color => &self.color,
            Layer::Detail => &self.detail,
            Layer::Player => &self.player,
        }
    }

    pub fn push(&mut self, layer: Layer, tile_id: TileId) {
        assert!(tile_id < NUM_TILES, "tile id {tile_id} outside of board");
        self.queue_mut(layer).push_back(tile_id);
    }

    /// Queues every tile of the board on `layer`.
    pub fn push_all(&mut self, layer: Layer) {
        self.queue_mut(layer).extend(0..NUM_TILES);
    }

    pub fn pop(&mut self, layer: Layer) -> Option<TileId> {
        self.queue_mut(layer).pop_front()
    }

    pub fn len(&self, layer: Layer) -> usize {
        self.queue(layer).len()
    }

    pub fn is_empty(&self, layer: Layer) -> bool {
        self.queue(layer).is_empty()
    }

    pub fn pending(&self, layer: Layer) -> impl Iterator<Item = TileId> + '_ {
        self.queue(layer).iter().copied()
    }
}
