use crate::letters::Letter;
use crate::tileset::TileSet;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::convert::From;

/// The multiset of as-yet-undrawn tiles, kept as a shuffled sequence.
/// Draws pop from the end, so the effective distribution is uniform
/// without replacement.
#[derive(Debug, Clone, Default)]
pub struct TileBag {
    tiles: Vec<Letter>,
}

impl TileBag {
    pub fn new() -> TileBag {
        TileBag { tiles: Vec::new() }
    }

    /// Populate from a tile distribution and shuffle.
    pub fn from_tileset(tileset: &TileSet) -> TileBag {
        let mut tiles = Vec::with_capacity(tileset.tile_count() as usize);
        for &(letter, count, _points) in tileset.entries() {
            for _ in 0..count {
                tiles.push(letter);
            }
        }
        tiles.shuffle(&mut thread_rng());
        TileBag { tiles }
    }

    /// Build a bag with a fixed draw order: the last letter given is
    /// drawn first. No shuffle, so tests stay deterministic.
    pub fn from_letters<T: Into<Vec<Letter>>>(letters: T) -> TileBag {
        TileBag {
            tiles: letters.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// The undrawn letters in draw order, for the persistence boundary.
    /// Game logic draws; it never peeks.
    pub fn letters(&self) -> &[Letter] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove and return `min(n, remaining)` letters.
    pub fn draw(&mut self, n: usize) -> Vec<Letter> {
        let take = n.min(self.tiles.len());
        self.tiles.split_off(self.tiles.len() - take)
    }

    /// Append letters back into the bag; subsequent draws see a
    /// reshuffled sequence.
    pub fn put_back(&mut self, letters: &[Letter]) {
        self.tiles.extend_from_slice(letters);
        self.tiles.shuffle(&mut thread_rng());
    }
}

impl From<&TileSet> for TileBag {
    fn from(tileset: &TileSet) -> Self {
        TileBag::from_tileset(tileset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::letters_from;
    use crate::tileset::Language;
    use anyhow::Result;

    #[test]
    fn test_full_bag() {
        let tileset = TileSet::new(Language::En);
        let bag = TileBag::from_tileset(&tileset);
        assert_eq!(bag.len(), 100);
    }

    #[test]
    fn test_draw_order() -> Result<()> {
        let mut bag = TileBag::from_letters(letters_from("ABCDE")?);
        let drawn = bag.draw(2);
        assert_eq!(drawn, letters_from("DE")?);
        assert_eq!(bag.len(), 3);
        Ok(())
    }

    #[test]
    fn test_overdraw_returns_remaining() -> Result<()> {
        let mut bag = TileBag::from_letters(letters_from("AB")?);
        let drawn = bag.draw(7);
        assert_eq!(drawn.len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw(1).is_empty());
        Ok(())
    }

    #[test]
    fn test_put_back_keeps_census() -> Result<()> {
        let mut bag = TileBag::from_letters(letters_from("ABC")?);
        bag.put_back(&letters_from("QQ")?);
        assert_eq!(bag.len(), 5);
        let mut drawn = bag.draw(5);
        drawn.sort();
        assert_eq!(drawn, letters_from("ABCQQ")?);
        Ok(())
    }
}
