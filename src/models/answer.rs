//! Option letters and letter sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Label of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// All letters in slot order.
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }

    /// Parses a letter, accepting lower case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A set of option letters.
///
/// Stored as a bitset, so iteration and formatting are always in ascending
/// order and duplicates cannot occur. Two answers are equal exactly when they
/// select the same options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnswerSet(u8);

impl AnswerSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn single(letter: Letter) -> Self {
        Self(letter.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.0 & letter.bit() != 0
    }

    pub fn insert(&mut self, letter: Letter) {
        self.0 |= letter.bit();
    }

    /// Adds the letter if absent, removes it otherwise.
    pub fn toggle(&mut self, letter: Letter) {
        self.0 ^= letter.bit();
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        Letter::ALL.into_iter().filter(|l| self.contains(*l))
    }
}

impl FromIterator<Letter> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        let mut set = Self::empty();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl FromStr for AnswerSet {
    type Err = QuizError;

    /// Parses answers like `"ACD"`, `"dc"` or `"A, C"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Letter::from_char(c).ok_or_else(|| QuizError::InvalidAnswer(s.to_string())))
            .collect()
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_keeps_sorted_and_unique() {
        let mut set = AnswerSet::empty();
        set.toggle(Letter::D);
        set.toggle(Letter::A);
        set.toggle(Letter::C);
        assert_eq!(set.to_string(), "ACD");

        set.toggle(Letter::C);
        assert_eq!(set.to_string(), "AD");
        assert_eq!(set.len(), 2);

        set.insert(Letter::A);
        assert_eq!(set.to_string(), "AD");
    }

    #[test]
    fn test_parse_any_order() {
        let set: AnswerSet = "dba".parse().unwrap();
        assert_eq!(set.to_string(), "ABD");
        assert_eq!("".parse::<AnswerSet>().unwrap(), AnswerSet::empty());
        assert_eq!("A, C".parse::<AnswerSet>().unwrap().to_string(), "AC");
    }

    #[test]
    fn test_parse_rejects_unknown_letters() {
        assert!(matches!(
            "AE".parse::<AnswerSet>(),
            Err(QuizError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let set: AnswerSet = [Letter::C, Letter::B].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "\"BC\"");
        let back: AnswerSet = serde_json::from_str("\"CB\"").unwrap();
        assert_eq!(back, set);
    }
}
