//! Display order of a question's options.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{AnswerSet, Letter, Question};

/// One displayed option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOption {
    pub display: Letter,
    pub canonical: Letter,
    pub text: String,
}

/// Bijection between the letters shown to the user and the letters the
/// server assigned.
///
/// The set of display letters always equals the set of canonical letters
/// present in the question; only which text sits under which label changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMapping {
    options: Vec<DisplayOption>,
}

impl DisplayMapping {
    /// Options shown under their own letters.
    pub fn identity(question: &Question) -> Self {
        let options = question
            .options
            .present()
            .map(|(letter, text)| DisplayOption {
                display: letter,
                canonical: letter,
                text: text.to_string(),
            })
            .collect();
        Self { options }
    }

    /// Options in a random order.
    ///
    /// `(letter, text)` pairs are permuted together and the present letters,
    /// in slot order, are then handed out to the permuted pairs. Identical
    /// option texts therefore never confuse the reverse lookup.
    pub fn shuffled<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let labels: Vec<Letter> = question.options.present().map(|(l, _)| l).collect();
        let mut pairs: Vec<(Letter, &str)> = question.options.present().collect();
        pairs.shuffle(rng);

        let options = labels
            .into_iter()
            .zip(pairs)
            .map(|(display, (canonical, text))| DisplayOption {
                display,
                canonical,
                text: text.to_string(),
            })
            .collect();
        Self { options }
    }

    /// Options in display order.
    pub fn options(&self) -> &[DisplayOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn canonical_of(&self, display: Letter) -> Option<Letter> {
        self.options
            .iter()
            .find(|o| o.display == display)
            .map(|o| o.canonical)
    }

    pub fn display_of(&self, canonical: Letter) -> Option<Letter> {
        self.options
            .iter()
            .find(|o| o.canonical == canonical)
            .map(|o| o.display)
    }

    /// Translates a display-space answer to the server's labels.
    /// Letters the question does not show are dropped.
    pub fn to_canonical(&self, display: AnswerSet) -> AnswerSet {
        display.iter().filter_map(|l| self.canonical_of(l)).collect()
    }

    /// Translates a server-space answer to the labels on screen.
    pub fn to_display(&self, canonical: AnswerSet) -> AnswerSet {
        canonical.iter().filter_map(|l| self.display_of(l)).collect()
    }
}
