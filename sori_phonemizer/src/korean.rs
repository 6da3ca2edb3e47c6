// Rule-based Korean phonemizers.
//
// `KoreanPhonemizer` rewrites each phrase through the phonological rule
// cascade during setup and then sings each rewritten syllable through the
// singer's alias table. `RomanizationPhonemizer` does the same rewrite and
// then romanizes the result, for voicebanks recorded with romanized
// aliases ("ga", "mureup").
//
// Both keep no phrase-scoped state besides a "has setup run" flag, so
// `process` is a pure function of the request.

use log::{debug, info};
use sori_hangul::{RuleSet, romanize_text};

use crate::error::PhonemizerError;
use crate::note::NoteGroup;
use crate::phonemizer::{OtoLookup, Phoneme, Phonemizer, ProcessRequest, lead_phoneme};
use crate::rewrite::rewrite_groups;

pub struct KoreanPhonemizer<S> {
    singer: S,
    rules: RuleSet,
    fallback_to_lyric: bool,
    set_up: bool,
}

impl<S: OtoLookup> KoreanPhonemizer<S> {
    pub fn new(singer: S, rules: RuleSet) -> Self {
        KoreanPhonemizer {
            singer,
            rules,
            fallback_to_lyric: true,
            set_up: false,
        }
    }

    /// Whether an unmapped lyric is emitted as-is (default) or dropped.
    pub fn with_fallback(mut self, fallback_to_lyric: bool) -> Self {
        self.fallback_to_lyric = fallback_to_lyric;
        self
    }
}

impl<S: OtoLookup> Phonemizer for KoreanPhonemizer<S> {
    fn name(&self) -> &str {
        "korean"
    }

    fn setup(&mut self, groups: &[NoteGroup]) -> Result<Vec<NoteGroup>, PhonemizerError> {
        let rewritten = rewrite_groups(groups, &self.rules);
        let changed = groups
            .iter()
            .zip(&rewritten)
            .filter(|(before, after)| before.lyric() != after.lyric())
            .count();
        info!("{}: rewrote {changed} of {} groups", self.name(), groups.len());
        self.set_up = true;
        Ok(rewritten)
    }

    fn process(&self, request: &ProcessRequest<'_>) -> Result<Vec<Phoneme>, PhonemizerError> {
        if !self.set_up {
            return Err(PhonemizerError::NotSetUp);
        }
        let group = request.group;
        Ok(lead_phoneme(&self.singer, group, group.lyric(), self.fallback_to_lyric)
            .into_iter()
            .collect())
    }

    fn cleanup(&mut self) {
        self.set_up = false;
    }
}

pub struct RomanizationPhonemizer<S> {
    singer: S,
    rules: RuleSet,
    set_up: bool,
}

impl<S: OtoLookup> RomanizationPhonemizer<S> {
    pub fn new(singer: S, rules: RuleSet) -> Self {
        RomanizationPhonemizer {
            singer,
            rules,
            set_up: false,
        }
    }
}

impl<S: OtoLookup> Phonemizer for RomanizationPhonemizer<S> {
    fn name(&self) -> &str {
        "romanization"
    }

    fn setup(&mut self, groups: &[NoteGroup]) -> Result<Vec<NoteGroup>, PhonemizerError> {
        let mut rewritten = rewrite_groups(groups, &self.rules);
        for group in &mut rewritten {
            let romanized = romanize_text(group.lyric());
            if romanized != group.lyric() {
                debug!("{:?} -> {romanized:?}", group.lyric());
                group.lead_mut().lyric = romanized;
            }
        }
        info!("{}: romanized {} groups", self.name(), rewritten.len());
        self.set_up = true;
        Ok(rewritten)
    }

    fn process(&self, request: &ProcessRequest<'_>) -> Result<Vec<Phoneme>, PhonemizerError> {
        if !self.set_up {
            return Err(PhonemizerError::NotSetUp);
        }
        let group = request.group;
        Ok(lead_phoneme(&self.singer, group, group.lyric(), true)
            .into_iter()
            .collect())
    }

    fn cleanup(&mut self) {
        self.set_up = false;
    }
}
