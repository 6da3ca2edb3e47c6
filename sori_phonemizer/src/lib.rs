// Sori phonemizer: Korean lyrics on a note timeline -> singable phonemes.
//
// Takes the editor's note groups for a phrase, rewrites each Hangul lyric
// into how it is pronounced next to its neighbours (via `sori_hangul`), and
// maps the result to phonemes for the synthesizer.
//
// Architecture:
// - `note.rs`: `Note`, `NoteGroup` (lead + extenders), `group_notes`
// - `lyric.rs`: the `!` / `.` / `+` lyric marker mini-language
// - `context.rs`: per-group `SyllableContext` (escape, boundary, adjacency)
// - `rewrite.rs`: `NoteGroupRewriter`, the single forward rewrite pass
// - `phonemizer.rs`: the `Phonemizer` setup/process/cleanup contract,
//   `ProcessRequest`, `Phoneme`, and the `OtoLookup` singer seam
// - `korean.rs`: rule-based `KoreanPhonemizer` and `RomanizationPhonemizer`
// - `phrase.rs`: `PhrasePhonemizer` with per-phrase inference cached by tick
// - `config.rs`: JSON-loadable `PhonemizerConfig`
// - `song.rs`: multi-track driver used by the `phonemize` binary
// - `error.rs`: `PhonemizerError`
//
// Data flows one way: groups -> context -> rule cascade -> rewritten lyric
// -> alias lookup / phrase model -> phonemes. The only shared mutable state
// is the phrase phonemizer's cache, written in `setup(&mut self)` and read
// in `process(&self)`.

pub mod config;
pub mod context;
pub mod error;
pub mod korean;
pub mod lyric;
pub mod note;
pub mod phonemizer;
pub mod phrase;
pub mod rewrite;
pub mod song;

pub use config::{PhonemizerConfig, PhonemizerKind};
pub use error::PhonemizerError;
pub use korean::KoreanPhonemizer;
pub use note::{Note, NoteGroup, PhonemeAttributeOverride, group_notes};
pub use phonemizer::{OtoLookup, OtoMap, Phoneme, Phonemizer, ProcessRequest};
pub use rewrite::{NoteGroupRewriter, rewrite_groups};
