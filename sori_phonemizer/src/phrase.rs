// Phrase-level phonemizer backed by a `PhraseModel`.
//
// Models that infer phonemes for a whole phrase at once are too expensive
// to run per group, so this phonemizer does all inference in `setup`:
// 1. rewrite the phrase through the rule cascade
// 2. split it into contiguous runs (each group touching the next)
// 3. run the model once per run
// 4. cache each group's phonemes under its lead note's start tick, once
//    every run has succeeded; a failed setup caches nothing
//
// `process` is then a plain cache lookup. A missing key means the caller
// skipped setup for the phrase containing that note, which is reported as
// `PhonemizerError::CacheMiss` rather than papered over. `cleanup` empties
// the cache.
//
// `JamoPhraseModel` is the bundled model: one phoneme per pronounced jamo,
// with consonants given a fixed slice of the note.

use std::ops::Range;

use log::{debug, info};
use rustc_hash::FxHashMap;
use sori_hangul::{RuleSet, single_syllable};

use crate::error::PhonemizerError;
use crate::note::NoteGroup;
use crate::phonemizer::{Phoneme, Phonemizer, ProcessRequest};
use crate::rewrite::rewrite_groups;

/// Infers phonemes for one contiguous run of groups.
pub trait PhraseModel {
    /// One phoneme list per group of `run`, in order.
    fn infer(&self, run: &[NoteGroup]) -> Result<Vec<Vec<Phoneme>>, PhonemizerError>;
}

/// Index ranges of maximal runs of touching groups.
pub fn segment_runs(groups: &[NoteGroup]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for (i, pair) in groups.windows(2).enumerate() {
        if !pair[0].touches(&pair[1]) {
            runs.push(start..i + 1);
            start = i + 1;
        }
    }
    if !groups.is_empty() {
        runs.push(start..groups.len());
    }
    runs
}

/// Splits each Hangul syllable into onset, vowel and coda phonemes.
#[derive(Debug, Clone)]
pub struct JamoPhraseModel {
    /// Ticks given to an onset or coda consonant. Clamped to a third of the
    /// group so the vowel always keeps the middle.
    pub consonant_ticks: i32,
}

impl Default for JamoPhraseModel {
    fn default() -> Self {
        JamoPhraseModel {
            consonant_ticks: 60,
        }
    }
}

impl JamoPhraseModel {
    fn group_phonemes(&self, group: &NoteGroup) -> Vec<Phoneme> {
        let Some(syllable) = single_syllable(group.lyric()) else {
            return vec![Phoneme::new(group.lyric(), 0)];
        };
        let duration = group.duration();
        let consonant = self.consonant_ticks.min(duration / 3);

        let mut phonemes = Vec::with_capacity(3);
        let onset = syllable.lead.romanized();
        let vowel_offset = if onset.is_empty() {
            0
        } else {
            phonemes.push(Phoneme::new(onset, 0));
            consonant
        };
        phonemes.push(Phoneme::new(syllable.vowel.romanized(), vowel_offset));
        if let Some(tail) = syllable.tail {
            phonemes.push(Phoneme::new(tail.romanized(), duration - consonant));
        }
        phonemes
    }
}

impl PhraseModel for JamoPhraseModel {
    fn infer(&self, run: &[NoteGroup]) -> Result<Vec<Vec<Phoneme>>, PhonemizerError> {
        Ok(run.iter().map(|g| self.group_phonemes(g)).collect())
    }
}

pub struct PhrasePhonemizer<M> {
    model: M,
    rules: RuleSet,
    cache: FxHashMap<i32, Vec<Phoneme>>,
}

impl<M: PhraseModel> PhrasePhonemizer<M> {
    pub fn new(model: M, rules: RuleSet) -> Self {
        PhrasePhonemizer {
            model,
            rules,
            cache: FxHashMap::default(),
        }
    }

    /// Number of note positions currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl<M: PhraseModel> Phonemizer for PhrasePhonemizer<M> {
    fn name(&self) -> &str {
        "phrase"
    }

    fn setup(&mut self, groups: &[NoteGroup]) -> Result<Vec<NoteGroup>, PhonemizerError> {
        let rewritten = rewrite_groups(groups, &self.rules);
        let runs = segment_runs(&rewritten);
        // Nothing reaches the cache unless every run infers cleanly.
        let mut inferred: FxHashMap<i32, Vec<Phoneme>> = FxHashMap::default();
        for run in &runs {
            let slice = &rewritten[run.clone()];
            let results = self.model.infer(slice)?;
            if results.len() != slice.len() {
                return Err(PhonemizerError::Inference {
                    expected: slice.len(),
                    actual: results.len(),
                });
            }
            debug!("run {run:?}: {} groups inferred", slice.len());
            for (group, phonemes) in slice.iter().zip(results) {
                inferred.insert(group.position(), phonemes);
            }
        }
        self.cache.extend(inferred);
        info!(
            "{}: {} runs, {} positions cached",
            self.name(),
            runs.len(),
            self.cache.len()
        );
        Ok(rewritten)
    }

    fn process(&self, request: &ProcessRequest<'_>) -> Result<Vec<Phoneme>, PhonemizerError> {
        let position = request.group.position();
        self.cache
            .get(&position)
            .cloned()
            .ok_or(PhonemizerError::CacheMiss { position })
    }

    fn cleanup(&mut self) {
        self.cache.clear();
    }
}
