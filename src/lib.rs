#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod game;
pub mod layout;
pub mod render;
pub mod tiles;
pub mod types;

pub use config::{BoardConfig, ConfigError, TileConfig};
pub use game::{Board, GameConfig, GameError, Player, Session};
pub use layout::{Layout, LayoutError};
pub use render::{DetailMode, Renderer};
pub use tiles::{Label, Tile};
pub use types::{OwnershipStatus, Position, Size, TileId, TileType};
