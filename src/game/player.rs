use crossterm::style::{Color, ContentStyle};

use crate::types::{MAX_PLAYERS, NUM_TILES, PlayerId, TileId};

/// A player's marker on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub character: char,
    pub color: Color,
}

impl Token {
    pub fn style(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(self.color),
            ..ContentStyle::default()
        }
    }
}

pub const TOKENS: [Token; MAX_PLAYERS] = [
    Token {
        character: 'A',
        color: Color::Blue,
    },
    Token {
        character: 'B',
        color: Color::Red,
    },
    Token {
        character: 'C',
        color: Color::Green,
    },
    Token {
        character: 'D',
        color: Color::Rgb {
            r: 255,
            g: 140,
            b: 0,
        },
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub token: Token,
    pub money: i64,
    position: TileId,
    last_position: TileId,
    movement_applied: bool,
}

impl Player {
    pub fn new(id: PlayerId, money: i64, start: TileId) -> Self {
        assert!(id < MAX_PLAYERS, "player id {id} out of range");
        assert!(start < NUM_TILES, "start tile {start} out of range");
        Self {
            id,
            token: TOKENS[id],
            money,
            position: start,
            last_position: start,
            movement_applied: true,
        }
    }

    /// Advances the player around the board. The presence grid is not touched
    /// until the move is applied by the board.
    pub fn walk(&mut self, steps: usize) {
        self.last_position = self.position;
        self.position = (self.position + steps % NUM_TILES) % NUM_TILES;
        self.movement_applied = false;
    }

    pub fn position(&self) -> TileId {
        self.position
    }

    pub fn last_position(&self) -> TileId {
        self.last_position
    }

    pub fn movement_applied(&self) -> bool {
        self.movement_applied
    }

    pub(crate) fn mark_moved(&mut self) {
        self.movement_applied = true;
    }

    pub fn deposit(&mut self, amount: u32) {
        self.money += i64::from(amount);
    }

    pub fn withdraw(&mut self, amount: u32) {
        self.money -= i64::from(amount);
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.money >= i64::from(amount)
    }
}

/// Builds the players of a session, in token order.
pub fn roster(num_players: usize, money: i64, start: TileId) -> Vec<Player> {
    TOKENS
        .iter()
        .take(num_players)
        .enumerate()
        .map(|(id, _)| Player::new(id, money, start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_nothing_pending() {
        let player = Player::new(2, 1500, 0);
        assert_eq!(player.token.character, 'C');
        assert_eq!(player.position(), 0);
        assert_eq!(player.last_position(), 0);
        assert!(player.movement_applied());
    }

    #[test]
    fn walk_records_previous_tile() {
        let mut player = Player::new(0, 1500, 5);
        player.walk(3);
        assert_eq!(player.last_position(), 5);
        assert_eq!(player.position(), 8);
        assert!(!player.movement_applied());
    }

    #[test]
    fn walk_wraps_past_go() {
        let mut player = Player::new(0, 1500, 38);
        player.walk(5);
        assert_eq!(player.position(), 3);

        player.walk(NUM_TILES * 3 + 1);
        assert_eq!(player.position(), 4);
    }

    #[test]
    fn balance_can_go_negative() {
        let mut player = Player::new(1, 10, 0);
        assert!(!player.can_afford(60));
        player.withdraw(60);
        assert_eq!(player.money, -50);
        player.deposit(75);
        assert_eq!(player.money, 25);
    }

    #[test]
    fn roster_hands_out_tokens_in_order() {
        let players = roster(3, 1500, 0);
        let tokens: String = players.iter().map(|p| p.token.character).collect();
        assert_eq!(tokens, "ABC");
        assert!(players.iter().enumerate().all(|(idx, p)| p.id == idx));
    }
}
