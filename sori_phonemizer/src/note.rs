// Note and note-group model as handed over by the editor.
//
// A `Note` is one pitched event on the timeline. A `NoteGroup` is a lead
// note carrying the sung lyric followed by zero or more extender notes
// (lyric `+`, `+~`, `+*` or `+N`) that only prolong it. Groups are the unit
// every phonemizer works on; only the lead's lyric is ever read as text or
// rewritten.
//
// `NoteGroup` is non-empty by construction: the only ways to build one are
// `new` (a lead) and `TryFrom<Vec<Note>>`, which rejects an empty vector.
// Serde goes through the same `TryFrom`, so a group deserialized from JSON
// is guaranteed a lead too.

use serde::{Deserialize, Serialize};

use crate::error::PhonemizerError;
use crate::lyric::is_extender;

/// Per-phoneme overrides the user set on a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemeAttributeOverride {
    /// Which phoneme of the note this applies to.
    pub index: usize,
    /// Semitone offset applied before oto lookup.
    #[serde(default)]
    pub tone_shift: i32,
    /// Voice colour (sub-bank) name.
    #[serde(default)]
    pub voice_color: Option<String>,
}

/// A single note on the timeline. Positions and durations are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub lyric: String,
    /// MIDI note number.
    pub tone: i32,
    pub position: i32,
    pub duration: i32,
    #[serde(default)]
    pub phonetic_hint: Option<String>,
    #[serde(default)]
    pub phoneme_attributes: Vec<PhonemeAttributeOverride>,
}

impl Note {
    pub fn new(lyric: impl Into<String>, tone: i32, position: i32, duration: i32) -> Self {
        Note {
            lyric: lyric.into(),
            tone,
            position,
            duration,
            phonetic_hint: None,
            phoneme_attributes: Vec::new(),
        }
    }

    /// Tick at which the note stops sounding. Saturates at the ends of the
    /// tick range.
    pub fn end(&self) -> i32 {
        self.position.saturating_add(self.duration)
    }

    /// The override for phoneme `index`, if any.
    pub fn attribute(&self, index: usize) -> Option<&PhonemeAttributeOverride> {
        self.phoneme_attributes.iter().find(|a| a.index == index)
    }
}

/// A lead note plus its extender notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Note>", into = "Vec<Note>")]
pub struct NoteGroup {
    notes: Vec<Note>,
}

impl NoteGroup {
    pub fn new(lead: Note) -> Self {
        NoteGroup { notes: vec![lead] }
    }

    /// Append an extender note.
    pub fn with_extender(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn lead(&self) -> &Note {
        &self.notes[0]
    }

    pub fn lead_mut(&mut self) -> &mut Note {
        &mut self.notes[0]
    }

    /// The last note of the group (the lead if there are no extenders).
    pub fn last(&self) -> &Note {
        // Non-empty by construction.
        &self.notes[self.notes.len() - 1]
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn lyric(&self) -> &str {
        &self.lead().lyric
    }

    pub fn position(&self) -> i32 {
        self.lead().position
    }

    pub fn end(&self) -> i32 {
        self.last().end()
    }

    pub fn duration(&self) -> i32 {
        self.end().saturating_sub(self.position())
    }

    /// True when this group stops exactly where `next` starts.
    pub fn touches(&self, next: &NoteGroup) -> bool {
        self.end() == next.position()
    }
}

impl TryFrom<Vec<Note>> for NoteGroup {
    type Error = PhonemizerError;

    fn try_from(notes: Vec<Note>) -> Result<Self, Self::Error> {
        if notes.is_empty() {
            return Err(PhonemizerError::EmptyGroup);
        }
        Ok(NoteGroup { notes })
    }
}

impl From<NoteGroup> for Vec<Note> {
    fn from(group: NoteGroup) -> Vec<Note> {
        group.notes
    }
}

/// Split a track's notes into groups: every extender joins the group of
/// the note before it. Leading extenders with nothing to extend are dropped.
pub fn group_notes(notes: impl IntoIterator<Item = Note>) -> Vec<NoteGroup> {
    let mut groups: Vec<NoteGroup> = Vec::new();
    for note in notes {
        if is_extender(&note.lyric) {
            if let Some(group) = groups.last_mut() {
                group.notes.push(note);
            }
        } else {
            groups.push(NoteGroup::new(note));
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_end() {
        let note = Note::new("가", 60, 480, 240);
        assert_eq!(note.end(), 720);
    }

    #[test]
    fn test_note_end_saturates_on_huge_ticks() {
        let note: Note = serde_json::from_str(
            r#"{"lyric": "가", "tone": 60, "position": 2147483000, "duration": 5000}"#,
        )
        .unwrap();
        assert_eq!(note.end(), i32::MAX);

        let group = NoteGroup::new(Note::new("가", 60, i32::MIN, i32::MAX));
        assert_eq!(group.end(), -1);
        assert_eq!(group.duration(), i32::MAX);
        let far = NoteGroup::new(Note::new("나", 60, i32::MAX - 10, 480));
        assert!(!far.touches(&group));
    }

    #[test]
    fn test_group_spans_extenders() {
        let group = NoteGroup::new(Note::new("가", 60, 0, 480))
            .with_extender(Note::new("+", 62, 480, 240));
        assert_eq!(group.position(), 0);
        assert_eq!(group.end(), 720);
        assert_eq!(group.duration(), 720);
        assert_eq!(group.lyric(), "가");
        assert_eq!(group.last().lyric, "+");
    }

    #[test]
    fn test_touches() {
        let a = NoteGroup::new(Note::new("가", 60, 0, 480));
        let b = NoteGroup::new(Note::new("나", 60, 480, 480));
        let c = NoteGroup::new(Note::new("다", 60, 1000, 480));
        assert!(a.touches(&b));
        assert!(!b.touches(&c));
    }

    #[test]
    fn test_empty_group_rejected() {
        let err = NoteGroup::try_from(Vec::new()).unwrap_err();
        assert!(matches!(err, PhonemizerError::EmptyGroup));
    }

    #[test]
    fn test_group_deserializes_from_note_list() {
        let json = r#"[
            {"lyric": "가", "tone": 60, "position": 0, "duration": 480},
            {"lyric": "+", "tone": 60, "position": 480, "duration": 480}
        ]"#;
        let group: NoteGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.notes().len(), 2);
        assert!(serde_json::from_str::<NoteGroup>("[]").is_err());
    }

    #[test]
    fn test_group_notes_attaches_extenders() {
        let notes = vec![
            Note::new("+", 60, 0, 120),
            Note::new("무", 60, 120, 480),
            Note::new("+", 62, 600, 240),
            Note::new("+2", 64, 840, 240),
            Note::new("릎", 60, 1080, 480),
        ];
        let groups = group_notes(notes);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].notes().len(), 3);
        assert_eq!(groups[0].end(), 1080);
        assert_eq!(groups[1].lyric(), "릎");
    }

    #[test]
    fn test_attribute_lookup() {
        let mut note = Note::new("가", 60, 0, 480);
        note.phoneme_attributes.push(PhonemeAttributeOverride {
            index: 0,
            tone_shift: 2,
            voice_color: Some("soft".to_string()),
        });
        assert_eq!(note.attribute(0).map(|a| a.tone_shift), Some(2));
        assert!(note.attribute(1).is_none());
    }
}
