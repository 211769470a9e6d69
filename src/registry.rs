//! Session lifecycle: games are created, joined, started and ended
//! here, and every operation on one game is serialized behind that
//! game's own lock. Operations on different games run in parallel.

use crate::bag::TileBag;
use crate::game::{Game, GameId, GameStatus, MoveRecord, PlayerSlot, UserId, MAX_PLAYERS};
use crate::game::now_secs;
use crate::letters::{Rack, RACK_SIZE};
use crate::tileset::TileSet;
use crate::Error;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A game plus its append-only move log, guarded as one unit.
#[derive(Debug)]
pub struct GameSession {
    pub game: Game,
    pub moves: Vec<MoveRecord>,
}

/// Owns all live game sessions as an arena of integer handles.
pub struct GameRegistry {
    games: DashMap<GameId, Arc<Mutex<GameSession>>>,
    next_id: AtomicU64,
    tileset: Arc<TileSet>,
}

impl GameRegistry {
    pub fn new(tileset: Arc<TileSet>) -> GameRegistry {
        GameRegistry {
            games: DashMap::new(),
            next_id: AtomicU64::new(0),
            tileset,
        }
    }

    pub fn tileset(&self) -> &TileSet {
        &self.tileset
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.games.contains_key(&game_id)
    }

    /// Create a new waiting game with an empty board and a full
    /// shuffled bag.
    pub fn create(&self) -> GameId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let game = Game::new(id, TileBag::from_tileset(&self.tileset));
        self.games
            .insert(id, Arc::new(Mutex::new(GameSession { game, moves: Vec::new() })));
        log::info!("game {} created", id);
        id
    }

    /// Run `f` with the session locked. The lock is held for the whole
    /// closure, which is what serializes per-game operations.
    pub fn with_session<T>(
        &self,
        game_id: GameId,
        f: impl FnOnce(&mut GameSession) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let session = self
            .games
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .ok_or(Error::GameNotFound(game_id))?;
        let mut guard = session.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    /// All sessions, ordered by game id.
    pub fn sessions(&self) -> Vec<(GameId, Arc<Mutex<GameSession>>)> {
        let mut sessions: Vec<_> = self
            .games
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        sessions.sort_by_key(|(id, _)| *id);
        sessions
    }

    /// Seat a user in a waiting game and deal their opening rack.
    /// Joining a game one is already seated in returns the existing
    /// seat and changes nothing.
    pub fn join(&self, game_id: GameId, user_id: UserId) -> Result<usize, Error> {
        self.with_session(game_id, |session| {
            let game = &mut session.game;
            if game.status != GameStatus::Waiting {
                return Err(Error::GameNotWaiting);
            }
            if let Some(player) = game.player(user_id) {
                return Ok(player.seat);
            }
            if game.players.len() >= MAX_PLAYERS {
                return Err(Error::GameFull);
            }
            let seat = game.players.len();
            let mut rack = Rack::new();
            for letter in game.bag.draw(RACK_SIZE) {
                rack.push(letter);
            }
            game.players.push(PlayerSlot {
                user_id,
                seat,
                rack,
                score: 0,
                active: true,
            });
            log::info!("game {}: user {} took seat {}", game_id, user_id, seat);
            Ok(seat)
        })
    }

    /// Transition a waiting game with at least two players to active.
    /// Only a seated player may start the game; seat 0 moves first.
    pub fn start(&self, game_id: GameId, user_id: UserId) -> Result<(), Error> {
        self.with_session(game_id, |session| {
            let game = &mut session.game;
            if game.player(user_id).is_none() {
                return Err(Error::PlayerNotInGame);
            }
            if game.status != GameStatus::Waiting {
                return Err(Error::GameNotWaiting);
            }
            if game.players.len() < 2 {
                return Err(Error::NotEnoughPlayers);
            }
            game.status = GameStatus::Active;
            log::info!(
                "game {}: started with {} players",
                game_id,
                game.players.len()
            );
            Ok(())
        })
    }

    /// Force-finish a game. Any seated player may end it, in any
    /// status.
    pub fn end(&self, game_id: GameId, user_id: UserId) -> Result<(), Error> {
        self.with_session(game_id, |session| {
            let game = &mut session.game;
            if game.player(user_id).is_none() {
                return Err(Error::PlayerNotInGame);
            }
            game.status = GameStatus::Finished;
            game.finished_at = Some(now_secs());
            log::info!("game {}: ended by user {}", game_id, user_id);
            Ok(())
        })
    }
}
