// Lyric marker mini-language.
//
// Users steer the phonology from the lyric text itself:
// - a leading `!` sings the syllable on its own, with no sound changes
//   crossing into or out of it
// - a trailing `.` marks a word boundary: the syllable's coda is pronounced
//   as if phrase-final, and only that result may still link forward
// - `+`, `+~`, `+*` and `+N` on a note make it an extender of the note
//   before it
//
// Parsing is kept apart from the phonology so the rule engine only ever
// sees clean syllables.

use sori_hangul::{JamoTriple, single_syllable};

const ESCAPE: char = '!';
const BOUNDARY: char = '.';

/// A lyric split into its text and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricMarkers<'a> {
    pub text: &'a str,
    /// Leading `!`.
    pub escape: bool,
    /// Trailing `.`.
    pub boundary: bool,
}

impl<'a> LyricMarkers<'a> {
    pub fn parse(lyric: &'a str) -> Self {
        let (text, escape) = match lyric.strip_prefix(ESCAPE) {
            Some(rest) => (rest, true),
            None => (lyric, false),
        };
        let (text, boundary) = match text.strip_suffix(BOUNDARY) {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        LyricMarkers {
            text,
            escape,
            boundary,
        }
    }

    /// The marker-free text, decomposed, if it is exactly one Hangul syllable.
    pub fn syllable(&self) -> Option<JamoTriple> {
        single_syllable(self.text)
    }
}

/// True for extender lyrics: `+`, `+~`, `+*`, or `+` followed by digits.
pub fn is_extender(lyric: &str) -> bool {
    match lyric.strip_prefix('+') {
        Some("" | "~" | "*") => true,
        Some(digits) => digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lyric() {
        let m = LyricMarkers::parse("가");
        assert_eq!(m.text, "가");
        assert!(!m.escape);
        assert!(!m.boundary);
        assert!(m.syllable().is_some());
    }

    #[test]
    fn test_escape_marker() {
        let m = LyricMarkers::parse("!가");
        assert_eq!(m.text, "가");
        assert!(m.escape);
        assert!(!m.boundary);
    }

    #[test]
    fn test_boundary_marker() {
        let m = LyricMarkers::parse("릎.");
        assert_eq!(m.text, "릎");
        assert!(m.boundary);
        assert!(m.syllable().is_some());
    }

    #[test]
    fn test_both_markers() {
        let m = LyricMarkers::parse("!닭.");
        assert_eq!(m.text, "닭");
        assert!(m.escape && m.boundary);
    }

    #[test]
    fn test_non_hangul_has_no_syllable() {
        assert!(LyricMarkers::parse("la").syllable().is_none());
        assert!(LyricMarkers::parse("무릎").syllable().is_none());
        assert!(LyricMarkers::parse(".").syllable().is_none());
    }

    #[test]
    fn test_extenders() {
        assert!(is_extender("+"));
        assert!(is_extender("+~"));
        assert!(is_extender("+*"));
        assert!(is_extender("+3"));
        assert!(is_extender("+12"));
        assert!(!is_extender("+a"));
        assert!(!is_extender("가"));
        assert!(!is_extender(""));
    }
}
