// Context window: which neighbours a note group's syllable may interact with.
//
// For group `i` the candidates are the lead lyrics of groups `i - 1` and
// `i + 1`. A neighbour survives only if all of these hold:
// - neither it nor the current lyric carries the `!` escape marker
// - its marker-free text is exactly one Hangul syllable
// - it touches the current group on the timeline (no rest, no overlap)
//
// The `.` marker never removes a neighbour; it only sets the matching
// `suppress_*` flag so the rule engine neutralizes that coda first. A `.`
// on the next lyric has no effect on the current syllable.
//
// Returns `None` when the current lyric itself is not a single Hangul
// syllable; such groups are passed through untouched by `rewrite.rs`.

use sori_hangul::{JamoTriple, SyllableContext};

use crate::lyric::LyricMarkers;
use crate::note::NoteGroup;

/// Build the `SyllableContext` for `groups[index]`.
pub fn syllable_context(groups: &[NoteGroup], index: usize) -> Option<SyllableContext> {
    let group = groups.get(index)?;
    let current = LyricMarkers::parse(group.lyric());
    let current_syllable = current.syllable()?;

    let prev_group = index.checked_sub(1).and_then(|i| groups.get(i));
    let next_group = groups.get(index + 1);

    let mut prev = prev_group.map(|g| LyricMarkers::parse(g.lyric()));
    let mut next = next_group.map(|g| LyricMarkers::parse(g.lyric()));

    if current.escape {
        prev = None;
        next = None;
    }
    prev = prev.filter(|m| !m.escape);
    next = next.filter(|m| !m.escape);

    let prev_syllable = prev
        .and_then(|m| m.syllable().map(|s| (s, m.boundary)))
        .filter(|_| prev_group.is_some_and(|g| g.touches(group)));
    let next_syllable: Option<JamoTriple> = next
        .and_then(|m| m.syllable())
        .filter(|_| next_group.is_some_and(|g| group.touches(g)));

    Some(SyllableContext {
        prev: prev_syllable.map(|(s, _)| s),
        current: current_syllable,
        next: next_syllable,
        suppress_prev_link: prev_syllable.is_some_and(|(_, boundary)| boundary),
        suppress_current_link: current.boundary,
    })
}
