//! Basic letter and tile types shared by the board, bag and racks.

use crate::Error;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::slice::Iter;
use tinyvec::ArrayVec;

/// Number of letters a player may hold.
pub const RACK_SIZE: usize = 7;

/// A single symbol of the configured alphabet, canonicalized to upper case.
///
/// The underscore (`"_"`) is the blank: it carries no points and may be
/// played as any chosen letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(char);

impl Letter {
    /// The blank (wildcard) letter.
    pub const BLANK: Letter = Letter('_');

    /// Check if the letter is the blank.
    pub fn is_blank(self) -> bool {
        self.0 == '_'
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Default for Letter {
    fn default() -> Self {
        Letter::BLANK
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Letter {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        if ch == '_' {
            return Ok(Letter::BLANK);
        }
        let mut upper = ch.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) if u.is_alphabetic() => Ok(Letter(u)),
            _ => Err(Error::InvalidLetter(ch.to_string())),
        }
    }
}

impl TryFrom<&str> for Letter {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Letter::try_from(ch),
            _ => Err(Error::InvalidLetter(s.to_string())),
        }
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct LetterVisitor;

impl<'de> Visitor<'de> for LetterVisitor {
    type Value = Letter;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a one-letter string")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Letter, E> {
        Letter::try_from(s).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LetterVisitor)
    }
}

/// Parse a whole string as a sequence of letters. Convenience for tests
/// and deterministic bags.
pub fn letters_from(s: &str) -> Result<Vec<Letter>, Error> {
    s.chars().map(Letter::try_from).collect()
}

/// A letter placed on the board.
///
/// `is_blank` marks tiles that originated as a blank: they play as the
/// chosen letter but score 0 forever after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub letter: Letter,
    #[serde(default)]
    pub is_blank: bool,
}

impl Tile {
    pub fn new(letter: Letter) -> Tile {
        Tile {
            letter,
            is_blank: false,
        }
    }

    pub fn blank_as(letter: Letter) -> Tile {
        Tile {
            letter,
            is_blank: true,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_blank {
            for lower in self.letter.as_char().to_lowercase() {
                write!(f, "{}", lower)?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.letter)
        }
    }
}

/// The up-to-7 letters held privately by one seated player. Duplicates
/// are permitted; removal is by multiset occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rack(ArrayVec<[Letter; RACK_SIZE]>);

impl Rack {
    pub fn new() -> Rack {
        Rack(ArrayVec::new())
    }

    /// Build a rack from letters, rejecting more than 7.
    pub fn from_letters(letters: &[Letter]) -> Result<Rack, Error> {
        if letters.len() > RACK_SIZE {
            return Err(Error::InvalidRackSize(letters.len()));
        }
        let mut rack = Rack::new();
        for &letter in letters {
            rack.0.push(letter);
        }
        Ok(rack)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<Letter> {
        self.0.iter()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Number of copies of `letter` held.
    pub fn count(&self, letter: Letter) -> usize {
        self.0.iter().filter(|&&l| l == letter).count()
    }

    /// Add a letter. The caller keeps the rack within capacity.
    pub fn push(&mut self, letter: Letter) {
        debug_assert!(self.0.len() < RACK_SIZE);
        self.0.push(letter);
    }

    /// Remove one occurrence of `letter`. Returns false if absent.
    pub fn remove(&mut self, letter: Letter) -> bool {
        match self.0.iter().position(|&l| l == letter) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_letter_canonicalization() -> Result<()> {
        assert_eq!(Letter::try_from('a')?, Letter::try_from('A')?);
        assert_eq!(Letter::try_from('ż')?.to_string(), "Ż");
        assert_eq!(Letter::try_from('_')?, Letter::BLANK);
        assert!(Letter::BLANK.is_blank());
        assert!(Letter::try_from('7').is_err());
        assert!(Letter::try_from("ab").is_err());
        Ok(())
    }

    #[test]
    fn test_letter_serde() -> Result<()> {
        let letter = Letter::try_from('ó')?;
        let json = serde_json::to_string(&letter)?;
        assert_eq!(json, "\"Ó\"");
        assert_eq!(serde_json::from_str::<Letter>(&json)?, letter);
        Ok(())
    }

    #[test]
    fn test_tile_display() -> Result<()> {
        assert_eq!(Tile::new(Letter::try_from('c')?).to_string(), "C");
        assert_eq!(Tile::blank_as(Letter::try_from('c')?).to_string(), "c");
        Ok(())
    }

    #[test]
    fn test_rack_multiset() -> Result<()> {
        let mut rack = Rack::from_letters(&letters_from("QQAB")?)?;
        assert_eq!(rack.count(Letter::try_from('Q')?), 2);
        assert!(rack.remove(Letter::try_from('Q')?));
        assert!(rack.remove(Letter::try_from('Q')?));
        assert!(!rack.remove(Letter::try_from('Q')?));
        assert_eq!(rack.len(), 2);
        Ok(())
    }

    #[test]
    fn test_rack_capacity() -> Result<()> {
        assert!(Rack::from_letters(&letters_from("ABCDEFGH")?).is_err());
        Ok(())
    }
}
