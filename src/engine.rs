//! The move processor: validates a submitted move against the game
//! state, extracts and scores the words it forms, and commits the
//! resulting state transition atomically.
//!
//! Validation and word extraction run against scratch copies of the
//! board and rack; the game is only touched once every check has
//! passed, so a rejected move leaves the state exactly as it was.

use crate::board::{Board, Direction, Position, BOARD_SIZE};
use crate::game::{Game, GameStatus, Move, MoveKind, MoveRecord, TilePlacement, UserId};
use crate::game::now_secs;
use crate::grid::Bonus;
use crate::letters::{Letter, Tile, RACK_SIZE};
use crate::lexicon::Lexicon;
use crate::tileset::TileSet;
use crate::Error;

/// Flat bonus for playing all 7 rack tiles in one move.
const BINGO_BONUS: u32 = 50;

/// A word formed by the move: its cells on the tentative board and the
/// text submitted to the lexicon.
struct FormedWord {
    text: String,
    cells: Vec<(Position, Tile)>,
}

/// Apply one move for `user_id` to `game`.
///
/// On success the game has advanced one turn and the returned record
/// describes the move; on error the game is unchanged.
pub fn apply_move(
    game: &mut Game,
    user_id: UserId,
    mv: &Move,
    lexicon: &dyn Lexicon,
    tileset: &TileSet,
) -> Result<MoveRecord, Error> {
    if game.status != GameStatus::Active {
        return Err(Error::GameNotActive);
    }
    let seat = game
        .player(user_id)
        .map(|p| p.seat)
        .ok_or(Error::PlayerNotInGame)?;
    if seat != game.seat_to_move() {
        return Err(Error::NotYourTurn);
    }

    match mv {
        Move::Pass => Ok(pass(game, user_id)),
        Move::Exchange(letters) => exchange(game, user_id, letters),
        Move::Place(placements) => place(game, user_id, placements, lexicon, tileset),
    }
}

fn record(game: &Game, user_id: UserId, kind: MoveKind, score: u32) -> MoveRecord {
    MoveRecord {
        game_id: game.id,
        user_id,
        move_number: game.current_turn,
        kind,
        word: None,
        tiles_played: Vec::new(),
        score,
        created_at: now_secs(),
    }
}

fn pass(game: &mut Game, user_id: UserId) -> MoveRecord {
    let rec = record(game, user_id, MoveKind::Pass, 0);
    game.current_turn += 1;
    log::debug!("game {}: user {} passed", game.id, user_id);
    rec
}

fn exchange(game: &mut Game, user_id: UserId, letters: &[Letter]) -> Result<MoveRecord, Error> {
    if game.bag.len() < letters.len() {
        return Err(Error::NotEnoughTilesToExchange);
    }
    let mut rack = match game.player(user_id) {
        Some(player) => player.rack.clone(),
        None => return Err(Error::PlayerNotInGame),
    };
    for &letter in letters {
        if !rack.remove(letter) {
            return Err(Error::NotInRack(letter));
        }
    }

    game.bag.put_back(letters);
    for letter in game.bag.draw(letters.len()) {
        rack.push(letter);
    }
    if let Some(player) = game.player_mut(user_id) {
        player.rack = rack;
    }
    let rec = record(game, user_id, MoveKind::Exchange, 0);
    game.current_turn += 1;
    log::debug!(
        "game {}: user {} exchanged {} tiles",
        game.id,
        user_id,
        letters.len()
    );
    Ok(rec)
}

fn place(
    game: &mut Game,
    user_id: UserId,
    placements: &[TilePlacement],
    lexicon: &dyn Lexicon,
    tileset: &TileSet,
) -> Result<MoveRecord, Error> {
    if placements.is_empty() {
        return Err(Error::NoWordsFormed);
    }

    // Phase A: the rack must cover the placed letters, blanks counting
    // as the blank tile.
    let mut rack = match game.player(user_id) {
        Some(player) => player.rack.clone(),
        None => return Err(Error::PlayerNotInGame),
    };
    for placement in placements {
        if placement.letter.is_blank() {
            return Err(Error::InvalidLetter(placement.letter.to_string()));
        }
        let needed = if placement.is_blank {
            Letter::BLANK
        } else {
            placement.letter
        };
        if !rack.remove(needed) {
            return Err(Error::NotInRack(needed));
        }
    }

    // Phase B: geometry. Everything on the board, in one line.
    for placement in placements {
        if placement.row >= BOARD_SIZE || placement.col >= BOARD_SIZE {
            return Err(Error::OutOfBounds {
                row: placement.row,
                col: placement.col,
            });
        }
    }
    let dir = if placements.iter().all(|p| p.row == placements[0].row) {
        Direction::Horizontal
    } else if placements.iter().all(|p| p.col == placements[0].col) {
        Direction::Vertical
    } else {
        return Err(Error::NoWordsFormed);
    };

    // Phase C: tentative placement on a scratch board.
    let mut board = game.board.clone();
    let mut placed = Vec::with_capacity(placements.len());
    for placement in placements {
        let pos = Position::new(placement.row, placement.col);
        if !board.is_empty(pos) {
            return Err(Error::PositionOccupied {
                row: placement.row,
                col: placement.col,
            });
        }
        let tile = if placement.is_blank {
            Tile::blank_as(placement.letter)
        } else {
            Tile::new(placement.letter)
        };
        board.place(pos, tile);
        placed.push(pos);
    }
    // The span between the extreme placements must be contiguous.
    let mut lo = placed[0][dir];
    let mut hi = lo;
    for pos in &placed {
        lo = lo.min(pos[dir]);
        hi = hi.max(pos[dir]);
    }
    for k in lo..=hi {
        let mut pos = placed[0];
        pos[dir] = k;
        if board.tile_at(pos).is_none() {
            return Err(Error::NoWordsFormed);
        }
    }

    // Phase D: collect the primary word and every cross-word of
    // length >= 2.
    let mut words: Vec<FormedWord> = Vec::new();
    let primary = board.word_run(placed[0], dir);
    if primary.len() >= 2 {
        words.push(formed_word(&board, primary));
    }
    for &pos in &placed {
        let cross = board.word_run(pos, dir.perp());
        if cross.len() >= 2 {
            words.push(formed_word(&board, cross));
        }
    }
    if words.is_empty() {
        return Err(Error::NoWordsFormed);
    }

    // Phase E: every formed word must be legal.
    for word in &words {
        if !lexicon.contains(&word.text) {
            return Err(Error::InvalidWord(word.text.clone()));
        }
    }

    // Phase F: score the words; premiums count only under tiles placed
    // this turn.
    let mut score: u32 = words
        .iter()
        .map(|word| score_word(&board, word, &placed, tileset))
        .sum();
    if placements.len() == RACK_SIZE {
        score += BINGO_BONUS;
    }

    // Phase G: commit.
    game.board = board;
    for letter in game.bag.draw(placements.len()) {
        rack.push(letter);
    }
    let word = longest_word(&words);
    if let Some(player) = game.player_mut(user_id) {
        player.rack = rack;
        player.score += score;
    }
    let mut rec = record(game, user_id, MoveKind::Place, score);
    rec.word = Some(word.clone());
    rec.tiles_played = placements.to_vec();
    game.current_turn += 1;
    log::debug!(
        "game {}: user {} played \"{}\" for {} points",
        game.id,
        user_id,
        word,
        score
    );

    // Phase H: the game ends when the mover's rack and the bag are both
    // exhausted.
    let rack_empty = game.player(user_id).map_or(false, |p| p.rack.is_empty());
    if rack_empty && game.bag.is_empty() {
        game.status = GameStatus::Finished;
        game.finished_at = Some(now_secs());
        log::info!("game {} finished after move {}", game.id, rec.move_number);
    }
    Ok(rec)
}

fn formed_word(board: &Board, run: Vec<Position>) -> FormedWord {
    let text = board.word_text(&run);
    let cells = run
        .into_iter()
        .filter_map(|pos| board.tile_at(pos).map(|tile| (pos, tile)))
        .collect();
    FormedWord { text, cells }
}

fn longest_word(words: &[FormedWord]) -> String {
    words
        .iter()
        .map(|word| word.text.as_str())
        .max_by_key(|text| text.chars().count())
        .unwrap_or_default()
        .to_string()
}

fn score_word(board: &Board, word: &FormedWord, placed: &[Position], tileset: &TileSet) -> u32 {
    let mut word_points = 0;
    let mut word_multiplier = 1;
    for &(pos, tile) in &word.cells {
        let mut letter_points = if tile.is_blank {
            0
        } else {
            tileset.points(tile.letter)
        };
        if placed.contains(&pos) {
            match board.bonus_at(pos) {
                Bonus::LetterBonus(n) => letter_points *= n,
                Bonus::WordBonus(n) => word_multiplier *= n,
                Bonus::NoBonus => {}
            }
        }
        word_points += letter_points;
    }
    word_points * word_multiplier
}
