//! Drive a scripted local match against the server core: seat two
//! players, run chat traffic, exchange and pass through a few rounds,
//! then print the final state. Useful as a smoke test and as an example
//! of the command surface.

use std::convert::TryFrom;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::Arc;
use structopt::StructOpt;
use wordgrid::{ChatInbound, GameServer, Language, Letter, Move, TileSet, WordList};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "local_match",
    about = "Run a scripted match against the wordgrid server core."
)]
struct Opt {
    /// Tile distribution to play with: en or pl
    #[structopt(short, long, default_value = "en")]
    language: Language,

    /// Wordlist file, one word per line; a tiny built-in list is used
    /// if omitted
    #[structopt(short, long, parse(from_os_str))]
    wordlist: Option<PathBuf>,

    /// Number of pass rounds to play after the opening exchange
    #[structopt(long, default_value = "2")]
    rounds: u32,
}

fn main() -> Result<(), wordgrid::Error> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();
    let opt = Opt::from_args();

    let lexicon = match &opt.wordlist {
        Some(path) => WordList::from_file(&path.to_string_lossy())?,
        None => WordList::from_words(&["cat", "cats", "dog", "at", "to"]),
    };
    log::info!("lexicon loaded with {} words", lexicon.len());

    let server = GameServer::new(TileSet::new(opt.language), Arc::new(lexicon));
    let game = server.create_game(1)?;
    server.join_game(game.id, 2)?;
    server.start_game(game.id, 1)?;

    // watch the table talk
    let (tx, rx) = channel();
    let subscriber = server.attach_chat(game.id, Box::new(tx))?;
    server.publish_chat(
        game.id,
        &ChatInbound {
            user_id: 1,
            username: "ann".into(),
            message: "good luck!".into(),
        },
    )?;
    server.publish_chat(
        game.id,
        &ChatInbound {
            user_id: 2,
            username: "bob".into(),
            message: "you too".into(),
        },
    )?;
    for frame in rx.try_iter() {
        println!("[chat] {}: {}", frame.username, frame.message);
    }
    server.detach_chat(game.id, subscriber);

    // the opening player swaps the first two letters of their rack
    let detail = server.get_game(game.id, 1)?;
    let rack = detail.rack.unwrap_or_default();
    let swap: Vec<Letter> = rack
        .iter()
        .take(2)
        .filter_map(|label| Letter::try_from(label.as_str()).ok())
        .collect();
    let record = server.make_move(game.id, 1, &Move::Exchange(swap))?;
    println!("move {}: exchange, score {}", record.move_number, record.score);

    for _ in 0..opt.rounds {
        for user in [2u64, 1] {
            let record = server.make_move(game.id, user, &Move::Pass)?;
            println!(
                "move {}: user {} passes",
                record.move_number, record.user_id
            );
        }
    }

    let detail = server.get_game(game.id, 1)?;
    println!(
        "game {} is {} after {} moves, {} tiles left in the bag",
        detail.id,
        detail.status,
        detail.current_turn,
        detail.remaining_tiles
    );
    for player in &detail.players {
        println!("  seat {}: user {} has {} points", player.seat, player.user_id, player.score);
    }
    Ok(())
}
