use crate::letters::Letter;
use thiserror::Error;

/// Broad classification of an [`Error`], for mapping to a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced game does not exist.
    NotFound,
    /// The caller is not seated, or it is not their turn.
    Forbidden,
    /// The game is in the wrong status for the operation.
    Conflict,
    /// The submitted move or input is invalid.
    InvalidInput,
    /// Persistence or configuration failure.
    Internal,
}

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// The game id is unknown
    #[error("Game {0} not found")]
    GameNotFound(u64),

    /// Moves are only accepted while the game is active
    #[error("Game not active")]
    GameNotActive,

    /// Joining and starting require a waiting game
    #[error("Game already started")]
    GameNotWaiting,

    /// All four seats are taken
    #[error("Game is full")]
    GameFull,

    /// Starting needs at least two seated players
    #[error("Not enough players to start")]
    NotEnoughPlayers,

    /// The caller is not seated in this game
    #[error("Player not in game")]
    PlayerNotInGame,

    /// The acting seat is someone else's
    #[error("Not your turn")]
    NotYourTurn,

    /// The rack does not hold the letters the move needs
    #[error("Not enough {0} tiles in rack")]
    NotInRack(Letter),

    /// Attempt to place a tile on an occupied cell
    #[error("Position ({row}, {col}) already occupied")]
    PositionOccupied { row: usize, col: usize },

    /// Attempt to place a tile outside the 15x15 board
    #[error("Position ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    /// Placement geometry is broken, or no word of length >= 2 results
    #[error("No valid words formed")]
    NoWordsFormed,

    /// A formed word is missing from the lexicon
    #[error("Invalid word: {0}")]
    InvalidWord(String),

    /// The bag cannot cover the requested exchange
    #[error("Not enough tiles in bag to exchange")]
    NotEnoughTilesToExchange,

    /// A token that is not a single letter of the alphabet
    #[error("Not a valid letter: \"{0}\"")]
    InvalidLetter(String),

    /// A language tag with no shipped tile distribution
    #[error("Unknown language \"{0}\"")]
    UnknownLanguage(String),

    /// Error reading a wordlist file
    #[error("Wordfile \"{path}\" could not be read")]
    WordfileRead {
        path: String,
        source: std::io::Error,
    },

    /// Restoring a board snapshot needs 15 rows
    #[error("Invalid number of rows {0} (expect 15)")]
    InvalidRowCount(usize),

    /// Restoring a board snapshot needs 15 cells per row
    #[error("Invalid row length {0} (expect 15)")]
    InvalidRowLength(usize),

    /// Restoring a rack snapshot with more than 7 letters
    #[error("Invalid rack size {0} (expect at most 7)")]
    InvalidRackSize(usize),

    /// Error parsing a bonus cell code
    #[error("Invalid grid bonus cell: \"{0}\"")]
    GridParseError(String),
}

impl Error {
    /// The error class a transport layer should report this as.
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            GameNotFound(_) => ErrorKind::NotFound,
            PlayerNotInGame | NotYourTurn => ErrorKind::Forbidden,
            GameNotActive | GameNotWaiting | GameFull | NotEnoughPlayers => ErrorKind::Conflict,
            NotInRack(_)
            | PositionOccupied { .. }
            | OutOfBounds { .. }
            | NoWordsFormed
            | InvalidWord(_)
            | NotEnoughTilesToExchange
            | InvalidLetter(_)
            | UnknownLanguage(_) => ErrorKind::InvalidInput,
            WordfileRead { .. }
            | InvalidRowCount(_)
            | InvalidRowLength(_)
            | InvalidRackSize(_)
            | GridParseError(_) => ErrorKind::Internal,
        }
    }
}
