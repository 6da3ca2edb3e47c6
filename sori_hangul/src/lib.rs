// Hangul syllable codec and Korean phonological rewrite engine.
//
// Turns written Hangul lyrics into the syllables a Korean singer actually
// pronounces. Has no notion of notes, ticks or singers; `sori_phonemizer`
// layers the note model and phonemizer lifecycle on top of it.
//
// Architecture:
// - `jamo.rs`: The closed `Lead` / `Vowel` / `Tail` alphabets and the
//   per-consonant facts the rules query (neutralization, compound splits,
//   aspirated and tense counterparts)
// - `codec.rs`: `JamoTriple` plus `decompose` / `compose` over the Hangul
//   Syllables block
// - `phonology.rs`: `SyllableContext` -> `PhonologyResult` via the ordered
//   rule cascade, with `RuleSet` toggles
// - `romanize.rs`: Revised Romanization of jamo and syllables
//
// Every function in this crate is pure; the tables are `const` data and the
// engine keeps no state between calls, so it can be used from any number of
// threads at once.

pub mod codec;
pub mod jamo;
pub mod phonology;
pub mod romanize;

pub use codec::{CodecError, JamoTriple, compose, decompose, is_syllable, single_syllable};
pub use jamo::{Lead, Tail, Vowel};
pub use phonology::{PhonologyResult, RuleSet, SyllableContext, variate, variate_pair, variate_text};
pub use romanize::{romanize, romanize_text};
