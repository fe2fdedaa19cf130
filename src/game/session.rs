use std::io::{self, Write};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::info;
use uuid::Uuid;

use super::board::Board;
use super::dirty::Layer;
use super::player::{Player, roster};
use crate::config::{BoardConfig, ConfigError};
use crate::layout::LayoutError;
use crate::render::{DetailMode, Renderer};
use crate::types::{MAX_PLAYERS, NUM_TILES, OwnershipStatus, PlayerId, TileId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub num_players: usize,
    pub starting_money: i64,
    pub seed: u64,
    pub start_tile: TileId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: MAX_PLAYERS,
            starting_money: 1500,
            seed: 42,
            start_tile: 0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(ConfigError::PlayerCount(self.num_players));
        }
        if self.start_tile >= NUM_TILES {
            return Err(ConfigError::StartTile(self.start_tile));
        }
        Ok(())
    }
}

/// Rejected player actions. None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("tile {tile_id} cannot be bought")]
    NotOwnable { tile_id: TileId },
    #[error("you already own tile {tile_id}")]
    AlreadyOwned { tile_id: TileId },
    #[error("tile {tile_id} is already owned by player {owner}")]
    OwnedByOther { tile_id: TileId, owner: char },
    #[error("not enough money: need ${needed}, have ${available}")]
    InsufficientFunds { needed: u32, available: i64 },
    #[error("there is no tile {0}")]
    InvalidTile(usize),
    #[error("already rolled this turn")]
    AlreadyRolled,
    #[error("roll before ending the turn")]
    MustRollFirst,
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// One game at one terminal. Owns the board, the players and whose turn it is.
pub struct Session<W: Write> {
    pub id: Uuid,
    board: Board,
    players: Vec<Player>,
    renderer: Renderer<W>,
    rng: StdRng,
    current_player: PlayerId,
    turn: u32,
    has_rolled: bool,
    last_roll: Option<(u8, u8)>,
    detail_mode: DetailMode,
}

impl<W: Write> Session<W> {
    pub fn new(
        board_config: &BoardConfig,
        config: GameConfig,
        renderer: Renderer<W>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let mut board = Board::new(board_config)?;
        let players = roster(config.num_players, config.starting_money, config.start_tile);
        for player in &players {
            board.place_player_piece(player);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            board,
            players,
            renderer,
            rng: StdRng::seed_from_u64(config.seed),
            current_player: 0,
            turn: 0,
            has_rolled: false,
            last_roll: None,
            detail_mode: DetailMode::default(),
        })
    }

    /// Paints the first full frame. Every cell is already queued by setup.
    pub fn start(&mut self) -> io::Result<()> {
        info!(
            session = %self.id,
            players = self.players.len(),
            "session started"
        );
        self.paint_frame()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: PlayerId) -> &Player {
        &self.players[player_id]
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.last_roll
    }

    pub fn detail_mode(&self) -> DetailMode {
        self.detail_mode
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<W> {
        &mut self.renderer
    }

    /// Moves the current player by the dice, or by `steps` when given, and
    /// settles rent for the tile they land on.
    pub fn roll(&mut self, steps: Option<usize>) -> Result<String, GameError> {
        if self.has_rolled {
            return Err(GameError::AlreadyRolled);
        }

        let (steps, roll_text) = match steps {
            Some(steps) => {
                self.last_roll = None;
                (steps, format!("moved {steps}"))
            }
            None => {
                let dice = (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6));
                self.last_roll = Some(dice);
                (
                    usize::from(dice.0 + dice.1),
                    format!("rolled {}+{}", dice.0, dice.1),
                )
            }
        };
        self.has_rolled = true;

        let player = &mut self.players[self.current_player];
        player.walk(steps);
        self.board.move_player_piece(player);
        let (player_id, token, landed) = (player.id, player.token.character, player.position());

        let tile = self.board.tile(landed);
        let mut message = format!("{token} {roll_text} to {}", tile.name());
        info!(player = player_id, steps, tile = landed, "player moved");

        let rent = tile.rent_due(player_id);
        let owner = tile.owner().filter(|&owner| owner < self.players.len());
        if let (true, Some(owner)) = (rent > 0, owner) {
            self.players[player_id].withdraw(rent);
            self.players[owner].deposit(rent);
            let owner_token = self.players[owner].token.character;
            info!(payer = player_id, owner, rent, tile = landed, "rent paid");
            message.push_str(&format!(", paid ${rent} rent to {owner_token}"));
        }
        Ok(message)
    }

    /// Buys the tile the current player stands on.
    pub fn buy(&mut self) -> Result<String, GameError> {
        let player = &mut self.players[self.current_player];
        let tile_id = player.position();
        let cost = self.board.buy_tile(tile_id, player)?;
        Ok(format!(
            "{} bought {} for ${cost}",
            player.token.character,
            self.board.tile(tile_id).name()
        ))
    }

    pub fn end_turn(&mut self) -> Result<String, GameError> {
        if !self.has_rolled {
            return Err(GameError::MustRollFirst);
        }
        self.current_player = (self.current_player + 1) % self.players.len();
        self.turn += 1;
        self.has_rolled = false;
        self.last_roll = None;

        let next = self.current_player().token.character;
        info!(turn = self.turn, player = self.current_player, "turn started");
        Ok(format!("player {next}'s turn"))
    }

    /// One-line description of a tile.
    pub fn view(&self, tile_id: TileId) -> Result<String, GameError> {
        let tile = self.board.find_tile(tile_id)?;
        let mut text = format!("{tile_id}: {} ({}, {})", tile.name(), tile.tile_type(), tile.group());
        if let Some(property) = tile.property() {
            text.push_str(&format!(
                ", ${} {}, rent {}",
                property.cost,
                property.status,
                property.rent.iter().map(|r| format!("${r}")).join("/")
            ));
            if let Some(owner) = property.owner.and_then(|owner| self.players.get(owner)) {
                text.push_str(&format!(", owned by {}", owner.token.character));
            }
        }
        Ok(text)
    }

    /// Forces a tile into `status`. The owner must be seated in this session.
    pub fn set_ownership(
        &mut self,
        tile_id: TileId,
        status: OwnershipStatus,
        owner: Option<PlayerId>,
    ) -> Result<(), GameError> {
        if let Some(owner) = owner.filter(|&owner| owner >= self.players.len()) {
            return Err(GameError::InvalidArgument(format!(
                "no player {owner} in a {}-player game",
                self.players.len()
            )));
        }
        self.board.set_ownership(tile_id, status, owner)
    }

    pub fn toggle_ids(&mut self) -> String {
        self.detail_mode = self.detail_mode.toggled();
        self.board.mark_all_dirty(Layer::Detail);
        match self.detail_mode {
            DetailMode::TileIds => "showing tile ids".to_string(),
            DetailMode::Details => "showing tile details".to_string(),
        }
    }

    /// Clears the terminal and paints the whole board again.
    pub fn redraw(&mut self) -> io::Result<()> {
        for layer in Layer::iter() {
            self.board.mark_all_dirty(layer);
        }
        self.paint_frame()
    }

    fn paint_frame(&mut self) -> io::Result<()> {
        self.renderer.clear_screen()?;
        self.renderer.draw_board(&self.board)?;
        self.draw()?;
        Ok(())
    }

    /// Repaints whatever changed since the last call.
    pub fn draw(&mut self) -> io::Result<usize> {
        self.renderer.draw_all(&mut self.board, self.detail_mode)
    }

    pub fn prompt(&self) -> String {
        let player = self.current_player();
        format!("[{}] ${} > ", player.token.character, player.money)
    }

    pub fn show_prompt(&mut self) -> io::Result<()> {
        let prompt = self.prompt();
        self.renderer.draw_prompt(self.board.size(), &prompt)
    }

    pub fn show_status(&mut self, message: &str) -> io::Result<()> {
        self.renderer.draw_status(self.board.size(), message)
    }
}
