pub mod board;
pub mod dirty;
pub mod player;
pub mod session;

pub use board::Board;
pub use dirty::{DirtyQueues, Layer};
pub use player::{Player, TOKENS, Token, roster};
pub use session::{GameConfig, GameError, Session, SetupError};
