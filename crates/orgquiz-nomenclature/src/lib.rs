//! orgquiz-nomenclature - naming flashcards.
//!
//! A [`Deck`] is drawn from uniformly. Each [`Flashcard`] can be shown as a
//! structure (to be named) or as a name (to be drawn), and always answers
//! with both the IUPAC and the common name.

use orgquiz_common::QuizError;
use orgquiz_db::NomenclatureEntry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shown in place of a missing common name.
pub const NO_COMMON_NAME: &str = "N/A";

/// What the front of a card shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// The structure, rendered as an image.
    #[default]
    Structure,
    /// A name; the user works out the structure.
    Name,
}

/// Which name a [`PromptMode::Name`] card shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    #[default]
    Iupac,
    Common,
}

/// The front of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    Structure { smiles: String },
    Name { name: String, style: NameStyle },
}

#[derive(Debug, Clone, Default)]
pub struct Deck {
    entries: Vec<NomenclatureEntry>,
}

impl Deck {
    pub fn new(entries: Vec<NomenclatureEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NomenclatureEntry] {
        &self.entries
    }

    /// One card, uniformly at random. `None` for an empty deck.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Flashcard> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.entries.len());
        debug!("Drew flashcard {} of {}", index, self.entries.len());
        self.card(index)
    }

    /// Like [`Deck::draw`], but an empty deck is an error.
    pub fn try_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Flashcard, QuizError> {
        self.draw(rng)
            .ok_or_else(|| QuizError::DataUnavailable("the nomenclature deck is empty".to_string()))
    }

    pub fn card(&self, index: usize) -> Option<Flashcard> {
        self.entries.get(index).map(|entry| Flashcard { index, entry: entry.clone() })
    }
}

/// One drawn card; `index` identifies it within its deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub index: usize,
    pub entry: NomenclatureEntry,
}

impl Flashcard {
    /// The front of the card. A common-name prompt for a compound without a
    /// common name falls back to the IUPAC name.
    pub fn prompt(&self, mode: PromptMode, style: NameStyle) -> Prompt {
        match (mode, style) {
            (PromptMode::Structure, _) => Prompt::Structure { smiles: self.entry.smiles.clone() },
            (PromptMode::Name, NameStyle::Common) if self.entry.common_name.is_some() => Prompt::Name {
                name: self.common_name().to_string(),
                style: NameStyle::Common,
            },
            (PromptMode::Name, _) => Prompt::Name {
                name: self.entry.iupac_name.clone(),
                style: NameStyle::Iupac,
            },
        }
    }

    pub fn common_name(&self) -> &str {
        self.entry.common_name.as_deref().unwrap_or(NO_COMMON_NAME)
    }

    /// `IUPAC Name: <iupac>, Common Name: <common or N/A>`
    pub fn answer(&self) -> String {
        format!("IUPAC Name: {}, Common Name: {}", self.entry.iupac_name, self.common_name())
    }
}
