// The phonemizer lifecycle and its collaborators.
//
// The editor drives every phonemizer through three calls:
// - `setup(groups)` once per phrase after any lyric change. Batch work
//   (the rule cascade, romanization, phrase-model inference) happens here.
//   It returns the rewritten groups and never touches its input, so running
//   it again on the same groups gives the same result.
// - `process(request)` per group, any number of times and in any order,
//   mapping one already-rewritten group to its phonemes.
// - `cleanup()` at the end of a session to drop phrase-scoped caches.
//
// `setup` and `cleanup` take `&mut self` while `process` takes `&self`, so
// the borrow checker already guarantees no `process` call overlaps a
// `setup` on the same phonemizer.
//
// Oto lookup (lyric -> recorded alias of the singer's voicebank) is an
// external concern; `OtoLookup` is the seam, and `OtoMap` is the in-memory
// table the CLI and tests use.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PhonemizerError;
use crate::note::{Note, NoteGroup};

/// One output unit for the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phoneme {
    /// Alias or phoneme symbol.
    pub symbol: String,
    /// Ticks relative to the start of the group's lead note.
    pub position_offset: i32,
}

impl Phoneme {
    pub fn new(symbol: impl Into<String>, position_offset: i32) -> Self {
        Phoneme {
            symbol: symbol.into(),
            position_offset,
        }
    }
}

/// Everything `process` may look at for one group.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRequest<'a> {
    pub group: &'a NoteGroup,
    /// Last note of the previous group, touching or not.
    pub prev_note: Option<&'a Note>,
    /// Lead note of the next group, touching or not.
    pub next_note: Option<&'a Note>,
    /// The previous group, only if it ends where this one starts.
    pub prev_neighbour: Option<&'a NoteGroup>,
    /// The next group, only if it starts where this one ends.
    pub next_neighbour: Option<&'a NoteGroup>,
    /// Every group before this one in the phrase.
    pub prev_groups: &'a [NoteGroup],
}

impl<'a> ProcessRequest<'a> {
    /// Build the request for `groups[index]`. Panics if `index` is out of
    /// range.
    pub fn for_index(groups: &'a [NoteGroup], index: usize) -> Self {
        let group = &groups[index];
        let prev = index.checked_sub(1).map(|i| &groups[i]);
        let next = groups.get(index + 1);
        ProcessRequest {
            group,
            prev_note: prev.map(NoteGroup::last),
            next_note: next.map(NoteGroup::lead),
            prev_neighbour: prev.filter(|p| p.touches(group)),
            next_neighbour: next.filter(|n| group.touches(n)),
            prev_groups: &groups[..index],
        }
    }
}

/// The setup / process / cleanup contract shared by every phonemizer.
pub trait Phonemizer {
    fn name(&self) -> &str;

    /// Batch pass over one phrase. Returns the groups with rewritten lead
    /// lyrics, in the same order.
    fn setup(&mut self, groups: &[NoteGroup]) -> Result<Vec<NoteGroup>, PhonemizerError>;

    /// Phonemes for one rewritten group.
    fn process(&self, request: &ProcessRequest<'_>) -> Result<Vec<Phoneme>, PhonemizerError>;

    /// Drop anything cached by `setup`.
    fn cleanup(&mut self);
}

/// Singer-side alias lookup.
pub trait OtoLookup {
    /// The alias recorded for `lyric` at `tone` in the given voice colour.
    fn try_get_mapped_oto(&self, lyric: &str, tone: i32, voice_color: Option<&str>) -> Option<String>;
}

/// In-memory alias table. Tone is ignored; voice colours select a suffix
/// appended to the alias (e.g. a sub-bank marker).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtoMap {
    #[serde(default)]
    aliases: FxHashMap<String, String>,
    #[serde(default)]
    color_suffixes: FxHashMap<String, String>,
}

impl OtoMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lyric: impl Into<String>, alias: impl Into<String>) {
        self.aliases.insert(lyric.into(), alias.into());
    }

    pub fn insert_color(&mut self, color: impl Into<String>, suffix: impl Into<String>) {
        self.color_suffixes.insert(color.into(), suffix.into());
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl OtoLookup for OtoMap {
    fn try_get_mapped_oto(&self, lyric: &str, _tone: i32, voice_color: Option<&str>) -> Option<String> {
        let alias = self.aliases.get(lyric)?;
        let suffix = voice_color
            .and_then(|c| self.color_suffixes.get(c))
            .map_or("", String::as_str);
        Some(format!("{alias}{suffix}"))
    }
}

/// Look up the alias for a group's lead lyric, honouring the lead note's
/// first phoneme override. Falls back to the lyric itself when
/// `fallback_to_lyric` is set and the singer has no mapping.
pub(crate) fn lead_phoneme<S: OtoLookup>(
    singer: &S,
    group: &NoteGroup,
    lyric: &str,
    fallback_to_lyric: bool,
) -> Option<Phoneme> {
    let lead = group.lead();
    let attribute = lead.attribute(0);
    let tone = lead.tone + attribute.map_or(0, |a| a.tone_shift);
    let color = attribute.and_then(|a| a.voice_color.as_deref());
    singer
        .try_get_mapped_oto(lyric, tone, color)
        .or_else(|| fallback_to_lyric.then(|| lyric.to_string()))
        .map(|symbol| Phoneme::new(symbol, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::PhonemeAttributeOverride;

    fn phrase() -> Vec<NoteGroup> {
        vec![
            NoteGroup::new(Note::new("가", 60, 0, 480)),
            NoteGroup::new(Note::new("나", 60, 480, 480)),
            NoteGroup::new(Note::new("다", 60, 1200, 480)),
        ]
    }

    #[test]
    fn test_request_neighbours() {
        let groups = phrase();
        let req = ProcessRequest::for_index(&groups, 1);
        assert_eq!(req.group.lyric(), "나");
        assert_eq!(req.prev_note.map(|n| n.lyric.as_str()), Some("가"));
        assert_eq!(req.next_note.map(|n| n.lyric.as_str()), Some("다"));
        assert!(req.prev_neighbour.is_some());
        // Rest before 다.
        assert!(req.next_neighbour.is_none());
        assert_eq!(req.prev_groups.len(), 1);
    }

    #[test]
    fn test_request_at_edges() {
        let groups = phrase();
        let first = ProcessRequest::for_index(&groups, 0);
        assert!(first.prev_note.is_none());
        assert!(first.prev_groups.is_empty());
        let last = ProcessRequest::for_index(&groups, 2);
        assert!(last.next_note.is_none());
        assert!(last.prev_neighbour.is_none());
    }

    #[test]
    fn test_oto_map_lookup() {
        let mut oto = OtoMap::new();
        oto.insert("가", "- ga");
        oto.insert_color("soft", "_S");
        assert_eq!(oto.try_get_mapped_oto("가", 60, None).as_deref(), Some("- ga"));
        assert_eq!(oto.try_get_mapped_oto("가", 60, Some("soft")).as_deref(), Some("- ga_S"));
        assert_eq!(oto.try_get_mapped_oto("가", 60, Some("loud")).as_deref(), Some("- ga"));
        assert!(oto.try_get_mapped_oto("나", 60, None).is_none());
        assert_eq!(oto.len(), 1);
    }

    #[test]
    fn test_lead_phoneme_uses_override_color() {
        let mut oto = OtoMap::new();
        oto.insert("가", "ga");
        oto.insert_color("soft", "_S");
        let mut note = Note::new("가", 60, 0, 480);
        note.phoneme_attributes.push(PhonemeAttributeOverride {
            index: 0,
            tone_shift: 0,
            voice_color: Some("soft".to_string()),
        });
        let group = NoteGroup::new(note);
        let phoneme = lead_phoneme(&oto, &group, "가", false).unwrap();
        assert_eq!(phoneme, Phoneme::new("ga_S", 0));
    }

    #[test]
    fn test_lead_phoneme_fallback() {
        let oto = OtoMap::new();
        let group = NoteGroup::new(Note::new("라", 60, 0, 480));
        assert_eq!(lead_phoneme(&oto, &group, "라", true), Some(Phoneme::new("라", 0)));
        assert_eq!(lead_phoneme(&oto, &group, "라", false), None);
    }

    #[test]
    fn test_oto_map_from_json() {
        let oto: OtoMap = serde_json::from_str(r#"{"aliases": {"가": "ga"}}"#).unwrap();
        assert_eq!(oto.try_get_mapped_oto("가", 0, None).as_deref(), Some("ga"));
    }
}
