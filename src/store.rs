//! The persistence boundary. The engine runs on typed state; these rows
//! are what a repository stores, shaped like the relational schema:
//! games with JSON board/bag columns, one row per seated player, one row
//! per move, one row per chat message.

use crate::bag::TileBag;
use crate::board::{Board, Position, BOARD_SIZE};
use crate::game::{Game, GameId, GameStatus, MoveKind, MoveRecord, PlayerSlot, TilePlacement, UserId};
use crate::hub::ChatFrame;
use crate::letters::{Letter, Rack, Tile};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// One occupied board cell as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    pub letter: String,
    pub is_blank: bool,
}

/// The games table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub id: GameId,
    pub status: GameStatus,
    pub current_turn: u32,
    pub board_state: Vec<Vec<Option<CellState>>>,
    pub bag_tiles: Vec<String>,
    pub created_at: u64,
    pub finished_at: Option<u64>,
}

/// The game_players table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub game_id: GameId,
    pub user_id: UserId,
    pub seat_index: usize,
    pub score: u32,
    pub rack: Vec<String>,
    pub active: bool,
}

/// The game_moves table row; the move kind flattens into the two flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRow {
    pub game_id: GameId,
    pub user_id: UserId,
    pub move_number: u32,
    pub word: Option<String>,
    pub tiles_played: Vec<TilePlacement>,
    pub score: u32,
    pub is_pass: bool,
    pub is_exchange: bool,
    pub created_at: u64,
}

/// The chat_messages table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageRow {
    pub id: u64,
    pub game_id: GameId,
    pub user_id: UserId,
    pub message: String,
    pub created_at: u64,
}

/// Serialize board cells to the persisted row form.
pub fn board_rows(board: &Board) -> Vec<Vec<Option<CellState>>> {
    board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.as_ref().map(|tile| CellState {
                        letter: tile.letter.to_string(),
                        is_blank: tile.is_blank,
                    })
                })
                .collect()
        })
        .collect()
}

/// Rebuild a board from its persisted row form.
pub fn board_from_rows(rows: &[Vec<Option<CellState>>]) -> Result<Board, Error> {
    if rows.len() != BOARD_SIZE {
        return Err(Error::InvalidRowCount(rows.len()));
    }
    let mut board = Board::new();
    for (r, row) in rows.iter().enumerate() {
        if row.len() != BOARD_SIZE {
            return Err(Error::InvalidRowLength(row.len()));
        }
        for (c, cell) in row.iter().enumerate() {
            if let Some(cell) = cell {
                let tile = Tile {
                    letter: Letter::try_from(cell.letter.as_str())?,
                    is_blank: cell.is_blank,
                };
                board.place(Position::new(r, c), tile);
            }
        }
    }
    Ok(board)
}

/// Snapshot a game into its table rows.
pub fn snapshot(game: &Game) -> (GameRow, Vec<PlayerRow>) {
    let row = GameRow {
        id: game.id,
        status: game.status,
        current_turn: game.current_turn,
        board_state: board_rows(&game.board),
        bag_tiles: game.bag.letters().iter().map(Letter::to_string).collect(),
        created_at: game.created_at,
        finished_at: game.finished_at,
    };
    let players = game
        .players
        .iter()
        .map(|player| PlayerRow {
            game_id: game.id,
            user_id: player.user_id,
            seat_index: player.seat,
            score: player.score,
            rack: player.rack.iter().map(Letter::to_string).collect(),
            active: player.active,
        })
        .collect();
    (row, players)
}

/// Rebuild a game from its table rows.
pub fn restore(row: &GameRow, player_rows: &[PlayerRow]) -> Result<Game, Error> {
    let board = board_from_rows(&row.board_state)?;
    let bag_letters = row
        .bag_tiles
        .iter()
        .map(|label| Letter::try_from(label.as_str()))
        .collect::<Result<Vec<Letter>, Error>>()?;

    let mut players = Vec::with_capacity(player_rows.len());
    for player in player_rows {
        let rack_letters = player
            .rack
            .iter()
            .map(|label| Letter::try_from(label.as_str()))
            .collect::<Result<Vec<Letter>, Error>>()?;
        players.push(PlayerSlot {
            user_id: player.user_id,
            seat: player.seat_index,
            rack: Rack::from_letters(&rack_letters)?,
            score: player.score,
            active: player.active,
        });
    }
    players.sort_by_key(|player| player.seat);

    Ok(Game {
        id: row.id,
        status: row.status,
        current_turn: row.current_turn,
        board,
        bag: TileBag::from_letters(bag_letters),
        players,
        created_at: row.created_at,
        finished_at: row.finished_at,
    })
}

impl From<&MoveRecord> for MoveRow {
    fn from(record: &MoveRecord) -> MoveRow {
        MoveRow {
            game_id: record.game_id,
            user_id: record.user_id,
            move_number: record.move_number,
            word: record.word.clone(),
            tiles_played: record.tiles_played.clone(),
            score: record.score,
            is_pass: record.kind == MoveKind::Pass,
            is_exchange: record.kind == MoveKind::Exchange,
            created_at: record.created_at,
        }
    }
}

impl From<&MoveRow> for MoveRecord {
    fn from(row: &MoveRow) -> MoveRecord {
        let kind = if row.is_pass {
            MoveKind::Pass
        } else if row.is_exchange {
            MoveKind::Exchange
        } else {
            MoveKind::Place
        };
        MoveRecord {
            game_id: row.game_id,
            user_id: row.user_id,
            move_number: row.move_number,
            kind,
            word: row.word.clone(),
            tiles_played: row.tiles_played.clone(),
            score: row.score,
            created_at: row.created_at,
        }
    }
}

/// A chat frame as the persisted message row.
pub fn chat_row(game_id: GameId, frame: &ChatFrame) -> ChatMessageRow {
    ChatMessageRow {
        id: frame.id,
        game_id,
        user_id: frame.user_id,
        message: frame.message.clone(),
        created_at: frame.created_at,
    }
}
