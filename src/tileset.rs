//! Letter distributions: how many copies of each letter exist and what
//! each is worth.

use crate::letters::Letter;
use crate::Error;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

mod en;
mod pl;

/// These languages ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// English
    En,
    /// Polish
    Pl,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Pl => write!(f, "pl"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pl" => Ok(Language::Pl),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

/// label, count, points
pub type TileInfo = (&'static str, u32, u32);

/// A tile distribution: the multiset of letters a game is played with,
/// and the point value of each. Distributions are configuration input;
/// [`TileSet::new`] loads a shipped language table and
/// [`TileSet::custom`] accepts any table.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<(Letter, u32, u32)>,
}

impl TileSet {
    /// Return a new `TileSet` for a shipped language.
    pub fn new(language: Language) -> TileSet {
        let infos = match language {
            Language::En => en::TILESET,
            Language::Pl => pl::TILESET,
        };
        // The shipped tables are static and known-valid.
        TileSet::from_infos(infos).expect("built-in tile table is valid")
    }

    /// Build a tileset from an arbitrary `(label, count, points)` table.
    pub fn custom(infos: &[TileInfo]) -> Result<TileSet, Error> {
        TileSet::from_infos(infos)
    }

    fn from_infos(infos: &[TileInfo]) -> Result<TileSet, Error> {
        let mut tiles = Vec::with_capacity(infos.len());
        for &(label, count, points) in infos {
            tiles.push((Letter::try_from(label)?, count, points));
        }
        Ok(TileSet { tiles })
    }

    /// Return the points for a letter, or 0 if not in the distribution.
    /// The blank is always worth 0.
    pub fn points(&self, letter: Letter) -> u32 {
        self.tiles
            .iter()
            .find(|&&(l, _, _)| l == letter)
            .map_or(0, |&(_, _, points)| points)
    }

    /// Return the number of copies of a letter, or 0 if not found.
    pub fn count(&self, letter: Letter) -> u32 {
        self.tiles
            .iter()
            .find(|&&(l, _, _)| l == letter)
            .map_or(0, |&(_, count, _)| count)
    }

    /// Check if the letter belongs to this distribution.
    pub fn contains(&self, letter: Letter) -> bool {
        self.tiles.iter().any(|&(l, _, _)| l == letter)
    }

    /// Iterate over `(letter, count, points)` entries.
    pub fn entries(&self) -> impl Iterator<Item = &(Letter, u32, u32)> {
        self.tiles.iter()
    }

    /// Total number of tiles in the distribution (the tile census).
    pub fn tile_count(&self) -> u32 {
        self.tiles.iter().map(|&(_, count, _)| count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn letter(s: &str) -> Letter {
        Letter::try_from(s).unwrap()
    }

    #[test]
    fn test_english_distribution() {
        let tileset = TileSet::new(Language::En);
        assert_eq!(tileset.tile_count(), 100);
        assert_eq!(tileset.count(letter("E")), 12);
        assert_eq!(tileset.points(letter("Q")), 10);
        assert_eq!(tileset.points(letter("Z")), 10);
        assert_eq!(tileset.points(Letter::BLANK), 0);
        assert_eq!(tileset.count(Letter::BLANK), 2);
    }

    #[test]
    fn test_polish_distribution() {
        let tileset = TileSet::new(Language::Pl);
        assert_eq!(tileset.tile_count(), 100);
        assert_eq!(tileset.points(letter("Ź")), 9);
        assert_eq!(tileset.points(letter("Ń")), 7);
        assert_eq!(tileset.count(letter("A")), 9);
        // no Q, V or X in the Polish set
        assert!(!tileset.contains(letter("Q")));
        assert!(!tileset.contains(letter("V")));
        assert_eq!(tileset.points(letter("X")), 0);
    }

    #[test]
    fn test_custom_distribution() -> Result<()> {
        let tileset = TileSet::custom(&[("A", 4, 1), ("B", 2, 5), ("_", 1, 0)])?;
        assert_eq!(tileset.tile_count(), 7);
        assert_eq!(tileset.points(letter("B")), 5);
        assert_eq!(tileset.count(letter("C")), 0);
        Ok(())
    }

    #[test]
    fn test_language_roundtrip() -> Result<()> {
        assert_eq!("pl".parse::<Language>()?, Language::Pl);
        assert_eq!(Language::En.to_string(), "en");
        assert!("de".parse::<Language>().is_err());
        Ok(())
    }
}
