//! The aggregate state of one game session. All mutation flows through
//! the move processor or the registry so invariants are checked in one
//! place.

use crate::bag::TileBag;
use crate::board::Board;
use crate::letters::{Letter, Rack};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub type GameId = u64;
pub type UserId = u64;

/// Maximum number of seats at one table.
pub const MAX_PLAYERS: usize = 4;

/// Current unix time in seconds, the timestamp unit of all records.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Active,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Active => write!(f, "active"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub user_id: UserId,
    /// Seat order 0..3; seats form a gap-free prefix.
    pub seat: usize,
    pub rack: Rack,
    pub score: u32,
    pub active: bool,
}

/// A game: board, bag, seated players, turn counter and status.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,
    pub current_turn: u32,
    pub board: Board,
    pub bag: TileBag,
    pub players: Vec<PlayerSlot>,
    pub created_at: u64,
    pub finished_at: Option<u64>,
}

impl Game {
    /// A fresh waiting game with an empty board and the given bag.
    pub fn new(id: GameId, bag: TileBag) -> Game {
        Game {
            id,
            status: GameStatus::Waiting,
            current_turn: 0,
            board: Board::new(),
            bag,
            players: Vec::new(),
            created_at: now_secs(),
            finished_at: None,
        }
    }

    pub fn player(&self, user_id: UserId) -> Option<&PlayerSlot> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: UserId) -> Option<&mut PlayerSlot> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    /// The seat required to move now. Only meaningful with players seated.
    pub fn seat_to_move(&self) -> usize {
        debug_assert!(!self.players.is_empty());
        self.current_turn as usize % self.players.len()
    }

    /// Tiles across all racks, the bag and the board. Between operations
    /// this equals the tile census of the configured distribution.
    pub fn tile_census(&self) -> usize {
        let in_racks: usize = self.players.iter().map(|p| p.rack.len()).sum();
        in_racks + self.bag.len() + self.board.tile_count()
    }
}

/// One placement of the move being submitted: the wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub letter: Letter,
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub is_blank: bool,
}

/// A submitted move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Move {
    Pass,
    Exchange(Vec<Letter>),
    Place(Vec<TilePlacement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Place,
    Pass,
    Exchange,
}

/// Append-only log entry for an accepted move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub game_id: GameId,
    pub user_id: UserId,
    /// Equals `current_turn` at commit time; gap-free per game.
    pub move_number: u32,
    pub kind: MoveKind,
    /// The longest word formed, for Place moves.
    pub word: Option<String>,
    pub tiles_played: Vec<TilePlacement>,
    pub score: u32,
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::letters_from;
    use crate::tileset::{Language, TileSet};
    use anyhow::Result;

    #[test]
    fn test_new_game_census() {
        let tileset = TileSet::new(Language::En);
        let game = Game::new(1, TileBag::from_tileset(&tileset));
        assert_eq!(game.status, GameStatus::Waiting);
        assert_eq!(game.tile_census(), 100);
    }

    #[test]
    fn test_seat_rotation() -> Result<()> {
        let mut game = Game::new(1, TileBag::new());
        for (seat, user_id) in [10u64, 20, 30].iter().enumerate() {
            game.players.push(PlayerSlot {
                user_id: *user_id,
                seat,
                rack: Rack::new(),
                score: 0,
                active: true,
            });
        }
        assert_eq!(game.seat_to_move(), 0);
        game.current_turn = 4;
        assert_eq!(game.seat_to_move(), 1);
        Ok(())
    }

    #[test]
    fn test_move_serde() -> Result<()> {
        let mv = Move::Exchange(letters_from("QZ")?);
        let json = serde_json::to_string(&mv)?;
        assert_eq!(json, r#"{"kind":"exchange","data":["Q","Z"]}"#);
        assert_eq!(serde_json::from_str::<Move>(&json)?, mv);
        let pass: Move = serde_json::from_str(r#"{"kind":"pass"}"#)?;
        assert_eq!(pass, Move::Pass);
        Ok(())
    }
}
