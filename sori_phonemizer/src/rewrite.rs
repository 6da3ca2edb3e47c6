// Note-group rewrite pass.
//
// Walks a phrase's groups once, front to back. For each group it builds the
// `SyllableContext` from the *original* lyrics (see `context.rs`), runs the
// rule cascade, and yields a copy of the group whose lead lyric is the
// recomposed pronunciation of the current syllable. Markers are dropped
// from rewritten lyrics. Groups whose lyric is not a single Hangul syllable
// come out unchanged, extenders included.
//
// The input slice is never mutated, so running the pass twice over the
// same groups yields the same lyrics.

use log::trace;
use sori_hangul::{RuleSet, compose, variate};

use crate::context::syllable_context;
use crate::note::NoteGroup;

/// Iterator over rewritten copies of a phrase's note groups.
pub struct NoteGroupRewriter<'a> {
    groups: &'a [NoteGroup],
    rules: RuleSet,
    index: usize,
}

impl<'a> NoteGroupRewriter<'a> {
    pub fn new(groups: &'a [NoteGroup], rules: RuleSet) -> Self {
        NoteGroupRewriter {
            groups,
            rules,
            index: 0,
        }
    }

    /// The pronounced lyric for `groups[index]`, or `None` to keep it as is.
    fn rewritten_lyric(&self, index: usize) -> Option<String> {
        let context = syllable_context(self.groups, index)?;
        let result = variate(&context, &self.rules);
        trace!(
            "group {index}: {:?} -> {}",
            self.groups[index].lyric(),
            result.current
        );
        Some(compose(result.current).to_string())
    }
}

impl Iterator for NoteGroupRewriter<'_> {
    type Item = NoteGroup;

    fn next(&mut self) -> Option<NoteGroup> {
        let group = self.groups.get(self.index)?;
        let mut out = group.clone();
        if let Some(lyric) = self.rewritten_lyric(self.index) {
            out.lead_mut().lyric = lyric;
        }
        self.index += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.groups.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NoteGroupRewriter<'_> {}

/// Rewrite every group of a phrase.
pub fn rewrite_groups(groups: &[NoteGroup], rules: &RuleSet) -> Vec<NoteGroup> {
    NoteGroupRewriter::new(groups, *rules).collect()
}
