use crate::Error;
use lazy_static::lazy_static;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

const N: usize = 15;
const Q: usize = 1 + N / 2;

/// Quarter of the standard premium layout; the full grid is obtained by
/// mirroring it horizontally and vertically. The center (7,7) carries no
/// bonus and the first move is not forced through it.
const STANDARD_QUARTER_BOARD: [&str; Q] = [
    "3w -- -- 2l -- -- -- 3w",
    "-- 2w -- -- -- 3l -- --",
    "-- -- 2w -- -- -- 2l --",
    "2l -- -- 2w -- -- -- 2l",
    "-- -- -- -- 2w -- -- --",
    "-- 3l -- -- -- 3l -- --",
    "-- -- 2l -- -- -- 2l --",
    "3w -- -- 2l -- -- -- --",
];

/// A premium attached to a board cell, consumed by the first tile that
/// lands on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bonus {
    NoBonus,
    LetterBonus(u32),
    WordBonus(u32),
}

use Bonus::{LetterBonus, NoBonus, WordBonus};

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NoBonus => write!(f, "--"),
            LetterBonus(n) => write!(f, "{}l", n),
            WordBonus(n) => write!(f, "{}w", n),
        }
    }
}

impl FromStr for Bonus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(NoBonus),
            "2l" => Ok(LetterBonus(2)),
            "3l" => Ok(LetterBonus(3)),
            "2w" => Ok(WordBonus(2)),
            "3w" => Ok(WordBonus(3)),
            _ => Err(Error::GridParseError(String::from(s))),
        }
    }
}

type Inner = [[Bonus; N]; N];

/// The 15x15 premium-square overlay. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid(Inner);

impl Deref for Grid {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}

impl Grid {
    /// Get string representation of the grid cells, row by row.
    pub fn to_strings(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|row| {
                row.iter()
                    .map(Bonus::to_string)
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Create a symmetrical grid by mirroring a quarter board horizontally
/// and vertically.
fn expand_quarter_board(qb: &[&str; Q]) -> Grid {
    let mut grid: Inner = [[NoBonus; N]; N];
    for (i, row) in qb.iter().enumerate() {
        let row = row.split(' ').collect::<Vec<&str>>();
        assert!(row.len() == Q);
        for (j, c) in row.iter().enumerate() {
            let val = c.parse().unwrap();
            grid[i][j] = val;
            grid[N - i - 1][j] = val;
            grid[i][N - j - 1] = val;
            grid[N - i - 1][N - j - 1] = val;
        }
    }
    Grid(grid)
}

lazy_static! {
    static ref STANDARD: Grid = expand_quarter_board(&STANDARD_QUARTER_BOARD);
}

/// The standard premium layout.
pub fn standard() -> &'static Grid {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &Grid, bonus: Bonus) -> usize {
        grid.iter()
            .flat_map(|row| row.iter())
            .filter(|&&b| b == bonus)
            .count()
    }

    #[test]
    fn test_premium_census() {
        let grid = standard();
        assert_eq!(count(grid, WordBonus(3)), 8);
        assert_eq!(count(grid, WordBonus(2)), 16);
        assert_eq!(count(grid, LetterBonus(3)), 12);
        assert_eq!(count(grid, LetterBonus(2)), 24);
    }

    #[test]
    fn test_premium_positions() {
        let grid = standard();
        // triple words on the outer ring
        for &(r, c) in &[(0, 0), (0, 7), (0, 14), (7, 0), (7, 14), (14, 0), (14, 7), (14, 14)] {
            assert_eq!(grid[r][c], WordBonus(3), "expected 3w at ({}, {})", r, c);
        }
        // double-word diagonals, no bonus on the center
        for k in 1..=4 {
            assert_eq!(grid[k][k], WordBonus(2));
            assert_eq!(grid[k][14 - k], WordBonus(2));
            assert_eq!(grid[14 - k][k], WordBonus(2));
            assert_eq!(grid[14 - k][14 - k], WordBonus(2));
        }
        assert_eq!(grid[7][7], NoBonus);
        // spot checks from the fixed layout
        assert_eq!(grid[1][5], LetterBonus(3));
        assert_eq!(grid[9][13], LetterBonus(3));
        assert_eq!(grid[0][3], LetterBonus(2));
        assert_eq!(grid[6][12], LetterBonus(2));
        assert_eq!(grid[11][7], LetterBonus(2));
        assert_eq!(grid[14][11], LetterBonus(2));
    }

    #[test]
    fn test_cell_roundtrip() {
        for s in &["--", "2l", "3l", "2w", "3w"] {
            let bonus: Bonus = s.parse().unwrap();
            assert_eq!(&bonus.to_string(), s);
        }
        assert!("ss".parse::<Bonus>().is_err());
    }
}
