// Syllable codec: composed Hangul code points <-> (lead, vowel, tail) triples.
//
// The Hangul Syllables block is a dense table laid out as
// `BASE + (lead * 21 + vowel) * 28 + tail`, where tail index 0 is "no coda".
// `decompose` inverts that arithmetic and `compose` applies it. With the
// typed alphabets from `jamo.rs` every `JamoTriple` is composable, so
// `compose` is total and the only failure is handing `decompose` a code
// point outside the block, which callers treat as "not Hangul" rather than
// an error worth reporting.
//
// The block upper bound is the standard U+D7A3 (= BASE + 19*21*28 - 1).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::jamo::{Lead, Tail, Vowel};

/// First code point of the Hangul Syllables block (`가`).
pub const SYLLABLE_BASE: u32 = 0xAC00;

/// Last code point of the Hangul Syllables block (`힣`).
pub const SYLLABLE_LAST: u32 = 0xD7A3;

const VOWEL_COUNT: u32 = 21;
const TAIL_COUNT: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0:?} is not a composed Hangul syllable")]
    NotASyllable(char),
}

/// A decomposed syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JamoTriple {
    pub lead: Lead,
    pub vowel: Vowel,
    pub tail: Option<Tail>,
}

impl JamoTriple {
    pub fn new(lead: Lead, vowel: Vowel, tail: Option<Tail>) -> Self {
        JamoTriple { lead, vowel, tail }
    }

    pub fn to_char(self) -> char {
        compose(self)
    }
}

impl TryFrom<char> for JamoTriple {
    type Error = CodecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        decompose(c)
    }
}

impl From<JamoTriple> for char {
    fn from(triple: JamoTriple) -> char {
        compose(triple)
    }
}

impl fmt::Display for JamoTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", compose(*self))
    }
}

pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// Split a composed syllable into its three slots.
pub fn decompose(c: char) -> Result<JamoTriple, CodecError> {
    if !is_syllable(c) {
        return Err(CodecError::NotASyllable(c));
    }
    let i = c as u32 - SYLLABLE_BASE;
    let tail_index = i % TAIL_COUNT;
    let i = (i - tail_index) / TAIL_COUNT;
    let vowel_index = i % VOWEL_COUNT;
    let lead_index = (i - vowel_index) / VOWEL_COUNT;

    // The block is exactly 19 * 21 * 28 code points, so every index above
    // is in range of its table.
    Ok(JamoTriple {
        lead: Lead::ALL[lead_index as usize],
        vowel: Vowel::ALL[vowel_index as usize],
        tail: match tail_index {
            0 => None,
            n => Some(Tail::ALL[n as usize - 1]),
        },
    })
}

/// Pack a triple back into its composed code point.
pub fn compose(triple: JamoTriple) -> char {
    let tail_index = triple.tail.map_or(0, |t| t.index() + 1);
    let code = SYLLABLE_BASE
        + (triple.lead.index() * VOWEL_COUNT + triple.vowel.index()) * TAIL_COUNT
        + tail_index;
    char::from_u32(code).expect("composed code point lies inside the Hangul Syllables block")
}

/// Decompose `text` if it is exactly one Hangul syllable.
pub fn single_syllable(text: &str) -> Option<JamoTriple> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => decompose(c).ok(),
        _ => None,
    }
}
