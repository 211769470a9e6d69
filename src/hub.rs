//! Per-game chat fan-out. Live subscribers attach a delivery sink under
//! a game id; published messages are persisted first and then handed to
//! every sink currently attached. One slow or dead subscriber never
//! blocks the others, and per-game publishes are serialized so every
//! subscriber observes publication order.

use crate::game::{GameId, UserId};
use crate::game::now_secs;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

pub type SubscriberId = u64;

/// Inbound chat payload from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInbound {
    pub user_id: UserId,
    pub username: String,
    pub message: String,
}

/// Outbound chat frame, also the persisted history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub id: u64,
    pub user_id: UserId,
    pub username: String,
    pub message: String,
    pub created_at: u64,
}

/// Delivery capability of one attached subscriber. Returns false when
/// the subscriber is gone; the hub swallows that and moves on.
pub trait ChatSink: Send + Sync {
    fn deliver(&self, frame: ChatFrame) -> bool;
}

impl ChatSink for Sender<ChatFrame> {
    fn deliver(&self, frame: ChatFrame) -> bool {
        self.send(frame).is_ok()
    }
}

type Subscribers = Vec<(SubscriberId, Box<dyn ChatSink>)>;

/// The per-game broadcast hub. Owned by whoever serves the game
/// sessions; never a process-global.
#[derive(Default)]
pub struct ChatHub {
    connections: DashMap<GameId, Subscribers>,
    history: DashMap<GameId, Vec<ChatFrame>>,
    next_subscriber: AtomicU64,
    next_message: AtomicU64,
}

impl ChatHub {
    pub fn new() -> ChatHub {
        ChatHub::default()
    }

    /// Register a live subscriber under a game. Returns the id to
    /// detach with.
    pub fn attach(&self, game_id: GameId, sink: Box<dyn ChatSink>) -> SubscriberId {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed) + 1;
        self.connections.entry(game_id).or_default().push((id, sink));
        id
    }

    /// Remove a subscriber; the per-game entry is dropped with its last
    /// subscriber.
    pub fn detach(&self, game_id: GameId, subscriber: SubscriberId) {
        if let Some(mut subscribers) = self.connections.get_mut(&game_id) {
            subscribers.retain(|(id, _)| *id != subscriber);
        }
        self.connections.remove_if(&game_id, |_, subs| subs.is_empty());
    }

    /// Number of subscribers currently attached to a game.
    pub fn subscriber_count(&self, game_id: GameId) -> usize {
        self.connections.get(&game_id).map_or(0, |subs| subs.len())
    }

    /// Persist a message and deliver it to everyone attached right now.
    /// Late subscribers read persisted history instead.
    pub fn publish(&self, game_id: GameId, inbound: &ChatInbound) -> ChatFrame {
        // Holding the connection entry for the whole publish serializes
        // message order per game.
        let subscribers = self.connections.entry(game_id).or_default();
        let frame = ChatFrame {
            id: self.next_message.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: inbound.user_id,
            username: inbound.username.clone(),
            message: inbound.message.clone(),
            created_at: now_secs(),
        };
        self.history
            .entry(game_id)
            .or_default()
            .push(frame.clone());
        for (subscriber, sink) in subscribers.iter() {
            if !sink.deliver(frame.clone()) {
                log::warn!(
                    "game {}: chat delivery to subscriber {} failed",
                    game_id,
                    subscriber
                );
            }
        }
        let empty = subscribers.is_empty();
        drop(subscribers);
        if empty {
            self.connections.remove_if(&game_id, |_, subs| subs.is_empty());
        }
        log::debug!("game {}: chat message {} published", game_id, frame.id);
        frame
    }

    /// The persisted messages of a game, in publish order.
    pub fn history(&self, game_id: GameId) -> Vec<ChatFrame> {
        self.history
            .get(&game_id)
            .map_or_else(Vec::new, |messages| messages.clone())
    }
}
