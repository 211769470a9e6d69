use crate::Error;
use std::collections::HashSet;
use std::fs::read_to_string;

/// The "is this a legal word?" capability. Total and infallible: a word
/// that cannot be answered is simply not in the lexicon.
pub trait Lexicon {
    fn contains(&self, word: &str) -> bool;
}

/// An in-memory lexicon backed by a set of upper-cased words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build a wordlist from a list of words.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> WordList {
        let words = words
            .iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        WordList { words }
    }

    /// Read a wordlist from `wordfile`, one word per line.
    ///
    /// ## Errors
    /// If the file cannot be read.
    pub fn from_file(wordfile: &str) -> Result<WordList, Error> {
        let contents = read_to_string(wordfile).map_err(|source| Error::WordfileRead {
            path: String::from(wordfile),
            source,
        })?;
        Ok(WordList::from_words(&contents.lines().collect::<Vec<_>>()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let words = WordList::from_words(&["cat", "Dog"]);
        assert_eq!(words.len(), 2);
        assert!(words.contains("CAT"));
        assert!(words.contains("cat"));
        assert!(words.contains("dOg"));
        assert!(!words.contains("cats"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let words = WordList::from_words(&["zebra", "", "  "]);
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = WordList::from_file("no/such/wordfile.txt").unwrap_err();
        assert!(err.to_string().contains("could not be read"));
    }

    #[test]
    fn test_non_ascii_words() {
        let words = WordList::from_words(&["żółw"]);
        assert!(words.contains("ŻÓŁW"));
    }
}
