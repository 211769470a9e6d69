//! The command surface a transport layer (HTTP, WebSocket, CLI) drives.
//! One [`GameServer`] owns the session registry, the chat hub, the
//! lexicon and the tile distribution; every operation is addressed by
//! game id and acting user id.

use crate::engine;
use crate::game::{Game, GameId, GameStatus, Move, MoveRecord, UserId};
use crate::hub::{ChatFrame, ChatHub, ChatInbound, ChatSink, SubscriberId};
use crate::lexicon::Lexicon;
use crate::registry::GameRegistry;
use crate::store::{board_rows, CellState};
use crate::tileset::TileSet;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One player's public standing in a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub user_id: UserId,
    pub seat: usize,
    pub score: u32,
    pub active: bool,
}

/// A game as shown in listings: no board, no racks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub status: GameStatus,
    pub current_turn: u32,
    pub players: Vec<PlayerInfo>,
    pub created_at: u64,
}

/// A game as one viewer sees it: the full board, everyone's scores, the
/// viewer's own rack only, and the bag size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: GameId,
    pub status: GameStatus,
    pub current_turn: u32,
    pub players: Vec<PlayerInfo>,
    pub created_at: u64,
    pub finished_at: Option<u64>,
    pub board: Vec<Vec<Option<CellState>>>,
    pub rack: Option<Vec<String>>,
    pub remaining_tiles: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub seat: usize,
}

fn summary(game: &Game) -> GameSummary {
    GameSummary {
        id: game.id,
        status: game.status,
        current_turn: game.current_turn,
        players: game
            .players
            .iter()
            .map(|player| PlayerInfo {
                user_id: player.user_id,
                seat: player.seat,
                score: player.score,
                active: player.active,
            })
            .collect(),
        created_at: game.created_at,
    }
}

/// The server core: session registry, chat hub, lexicon, distribution.
pub struct GameServer {
    registry: GameRegistry,
    hub: ChatHub,
    lexicon: Arc<dyn Lexicon + Send + Sync>,
    tileset: Arc<TileSet>,
}

impl GameServer {
    pub fn new(tileset: TileSet, lexicon: Arc<dyn Lexicon + Send + Sync>) -> GameServer {
        let tileset = Arc::new(tileset);
        GameServer {
            registry: GameRegistry::new(tileset.clone()),
            hub: ChatHub::new(),
            lexicon,
            tileset,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn hub(&self) -> &ChatHub {
        &self.hub
    }

    /// Create a game; the creator takes seat 0 immediately.
    pub fn create_game(&self, creator: UserId) -> Result<GameSummary, Error> {
        let game_id = self.registry.create();
        self.registry.join(game_id, creator)?;
        self.registry.with_session(game_id, |session| Ok(summary(&session.game)))
    }

    /// Games that can still be watched or joined.
    pub fn list_games(&self) -> Vec<GameSummary> {
        self.registry
            .sessions()
            .into_iter()
            .filter_map(|(_, session)| {
                let guard = session.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                match guard.game.status {
                    GameStatus::Waiting | GameStatus::Active => Some(summary(&guard.game)),
                    GameStatus::Finished => None,
                }
            })
            .collect()
    }

    /// The game as `viewer` may see it.
    pub fn get_game(&self, game_id: GameId, viewer: UserId) -> Result<GameDetail, Error> {
        self.registry.with_session(game_id, |session| {
            let game = &session.game;
            let base = summary(game);
            Ok(GameDetail {
                id: base.id,
                status: base.status,
                current_turn: base.current_turn,
                players: base.players,
                created_at: base.created_at,
                finished_at: game.finished_at,
                board: board_rows(&game.board),
                rack: game
                    .player(viewer)
                    .map(|player| player.rack.iter().map(|l| l.to_string()).collect()),
                remaining_tiles: game.bag.len(),
            })
        })
    }

    pub fn join_game(&self, game_id: GameId, user_id: UserId) -> Result<SeatAssignment, Error> {
        let seat = self.registry.join(game_id, user_id)?;
        Ok(SeatAssignment { seat })
    }

    pub fn start_game(&self, game_id: GameId, user_id: UserId) -> Result<(), Error> {
        self.registry.start(game_id, user_id)
    }

    pub fn end_game(&self, game_id: GameId, user_id: UserId) -> Result<(), Error> {
        self.registry.end(game_id, user_id)
    }

    /// Apply a move and append it to the game's move log.
    pub fn make_move(
        &self,
        game_id: GameId,
        user_id: UserId,
        mv: &Move,
    ) -> Result<MoveRecord, Error> {
        self.registry.with_session(game_id, |session| {
            let record =
                engine::apply_move(&mut session.game, user_id, mv, self.lexicon.as_ref(), &self.tileset)?;
            session.moves.push(record.clone());
            Ok(record)
        })
    }

    /// The move log, ordered by move number.
    pub fn list_moves(&self, game_id: GameId) -> Result<Vec<MoveRecord>, Error> {
        self.registry
            .with_session(game_id, |session| Ok(session.moves.clone()))
    }

    /// Attach a live chat subscriber to a game.
    pub fn attach_chat(
        &self,
        game_id: GameId,
        sink: Box<dyn ChatSink>,
    ) -> Result<SubscriberId, Error> {
        if !self.registry.contains(game_id) {
            return Err(Error::GameNotFound(game_id));
        }
        Ok(self.hub.attach(game_id, sink))
    }

    pub fn detach_chat(&self, game_id: GameId, subscriber: SubscriberId) {
        self.hub.detach(game_id, subscriber);
    }

    /// Persist and broadcast a chat message on a game's channel.
    pub fn publish_chat(
        &self,
        game_id: GameId,
        inbound: &ChatInbound,
    ) -> Result<ChatFrame, Error> {
        if !self.registry.contains(game_id) {
            return Err(Error::GameNotFound(game_id));
        }
        Ok(self.hub.publish(game_id, inbound))
    }

    /// Chat history of a game, in publish order.
    pub fn chat_history(&self, game_id: GameId) -> Result<Vec<ChatFrame>, Error> {
        if !self.registry.contains(game_id) {
            return Err(Error::GameNotFound(game_id));
        }
        Ok(self.hub.history(game_id))
    }
}
