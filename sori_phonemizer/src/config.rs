// Data-driven phonemizer configuration.
//
// Loaded from JSON (`from_json` / `load`); every field has a default, so an
// empty object `{}` is the standard setup: the rule-based Korean
// phonemizer with the full rule cascade. `build` turns a config plus a
// singer's alias table into a ready phonemizer.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sori_hangul::RuleSet;

use crate::error::PhonemizerError;
use crate::korean::{KoreanPhonemizer, RomanizationPhonemizer};
use crate::phonemizer::{OtoLookup, Phonemizer};
use crate::phrase::{JamoPhraseModel, PhrasePhonemizer};

/// Which phonemizer implementation to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemizerKind {
    #[default]
    Korean,
    Romanization,
    Phrase,
}

impl FromStr for PhonemizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "korean" => Ok(PhonemizerKind::Korean),
            "romanization" => Ok(PhonemizerKind::Romanization),
            "phrase" => Ok(PhonemizerKind::Phrase),
            other => Err(format!("unknown phonemizer '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonemizerConfig {
    pub phonemizer: PhonemizerKind,
    pub rules: RuleSet,
    /// Sing the lyric itself when the singer has no alias for it.
    pub fallback_to_lyric: bool,
    /// Consonant length for the phrase model, in ticks.
    pub consonant_ticks: i32,
}

impl Default for PhonemizerConfig {
    fn default() -> Self {
        PhonemizerConfig {
            phonemizer: PhonemizerKind::Korean,
            rules: RuleSet::default(),
            fallback_to_lyric: true,
            consonant_ticks: 60,
        }
    }
}

impl PhonemizerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, PhonemizerError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Construct the configured phonemizer around `singer`.
    pub fn build<S>(&self, singer: S) -> Box<dyn Phonemizer + Send>
    where
        S: OtoLookup + Send + 'static,
    {
        match self.phonemizer {
            PhonemizerKind::Korean => Box::new(
                KoreanPhonemizer::new(singer, self.rules).with_fallback(self.fallback_to_lyric),
            ),
            PhonemizerKind::Romanization => Box::new(RomanizationPhonemizer::new(singer, self.rules)),
            PhonemizerKind::Phrase => Box::new(PhrasePhonemizer::new(
                JamoPhraseModel {
                    consonant_ticks: self.consonant_ticks,
                },
                self.rules,
            )),
        }
    }
}
