use serde::{Deserialize, Serialize};

use super::Letter;

/// Whether a question accepts one option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multiple,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Single => "Single choice",
            QuestionKind::Multiple => "Multiple choice",
        }
    }
}

/// Option texts keyed by their canonical letter. Slots may be missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTexts {
    #[serde(rename = "A", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
    #[serde(rename = "C", default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(rename = "D", default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl OptionTexts {
    pub fn get(&self, letter: Letter) -> Option<&str> {
        let slot = match letter {
            Letter::A => &self.a,
            Letter::B => &self.b,
            Letter::C => &self.c,
            Letter::D => &self.d,
        };
        slot.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Non-blank options in slot order.
    pub fn present(&self) -> impl Iterator<Item = (Letter, &str)> + '_ {
        Letter::ALL
            .into_iter()
            .filter_map(|letter| self.get(letter).map(|text| (letter, text)))
    }
}

impl FromIterator<(Letter, String)> for OptionTexts {
    fn from_iter<I: IntoIterator<Item = (Letter, String)>>(iter: I) -> Self {
        let mut options = Self::default();
        for (letter, text) in iter {
            let slot = match letter {
                Letter::A => &mut options.a,
                Letter::B => &mut options.b,
                Letter::C => &mut options.c,
                Letter::D => &mut options.d,
            };
            *slot = Some(text);
        }
        options
    }
}

/// A question as served by the quiz API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub code: String,
    pub options: OptionTexts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Set once the question has been graded correct in this session.
    #[serde(skip)]
    pub answered: bool,
}
