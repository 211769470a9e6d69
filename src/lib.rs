//! A word-placement game server core for Rust.
//! <br>
//! This crate implements the engine behind a 2–4 player crossword-style
//! board game: a 15x15 board with premium squares, language-configurable
//! tile distributions, a lexicon-checked move processor, session
//! lifecycle, and a per-game chat hub. Transport (HTTP, WebSockets),
//! authentication and durable storage live outside; the crate exposes a
//! command surface plus typed rows for the persistence boundary.
//!
//! # How to use `wordgrid`
//! Build a [`TileSet`] for the language you play in, load a [`WordList`]
//! (one word per line, several public lists exist for both shipped
//! languages), and hand both to a [`GameServer`]. Everything else —
//! seating, turn order, word validation, scoring, chat fan-out — is
//! driven through the server's methods.
//!
//! # Basic usage
//!  ```
//! use wordgrid::{GameServer, Language, Move, TileSet, WordList};
//! use std::sync::Arc;
//!
//! let lexicon = Arc::new(WordList::from_words(&["cat", "cats"]));
//! let server = GameServer::new(TileSet::new(Language::En), lexicon);
//! let game = server.create_game(1)?; // user 1 takes seat 0
//! server.join_game(game.id, 2)?;
//! server.start_game(game.id, 1)?;
//! let record = server.make_move(game.id, 1, &Move::Pass)?;
//! assert_eq!(record.move_number, 0);
//! # Ok::<(), wordgrid::Error>(())
//! ```
mod api;
mod bag;
mod board;
mod engine;
mod error;
mod game;
mod grid;
mod hub;
mod letters;
mod lexicon;
mod registry;
mod store;
mod tileset;

pub use crate::api::{GameDetail, GameServer, GameSummary, PlayerInfo, SeatAssignment};
pub use crate::bag::TileBag;
pub use crate::board::{Board, Direction, Position, BOARD_SIZE};
pub use crate::engine::apply_move;
pub use crate::error::{Error, ErrorKind};
pub use crate::game::{
    now_secs, Game, GameId, GameStatus, Move, MoveKind, MoveRecord, PlayerSlot, TilePlacement,
    UserId, MAX_PLAYERS,
};
pub use crate::grid::{standard as standard_grid, Bonus, Grid};
pub use crate::hub::{ChatFrame, ChatHub, ChatInbound, ChatSink, SubscriberId};
pub use crate::letters::{letters_from, Letter, Rack, Tile, RACK_SIZE};
pub use crate::lexicon::{Lexicon, WordList};
pub use crate::registry::{GameRegistry, GameSession};
pub use crate::store::{
    board_from_rows, board_rows, chat_row, restore, snapshot, CellState, ChatMessageRow, GameRow,
    MoveRow, PlayerRow,
};
pub use crate::tileset::{Language, TileInfo, TileSet};
