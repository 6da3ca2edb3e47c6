// Revised Romanization of jamo and syllables.
//
// Codas are romanized by their neutralized sound, which is how they are
// spelled in RR and also what a singer actually produces at the end of a
// note. Run the rule engine first if cross-syllable sound changes should be
// reflected (착하 -> "cha" "ka" rather than "chak" "ha").

use crate::codec::JamoTriple;
use crate::jamo::{Lead, Tail, Vowel};

impl Lead {
    /// Romanized onset; the null onset is the empty string.
    pub fn romanized(self) -> &'static str {
        match self {
            Lead::Giyeok => "g",
            Lead::SsangGiyeok => "kk",
            Lead::Nieun => "n",
            Lead::Digeut => "d",
            Lead::SsangDigeut => "tt",
            Lead::Rieul => "r",
            Lead::Mieum => "m",
            Lead::Bieup => "b",
            Lead::SsangBieup => "pp",
            Lead::Siot => "s",
            Lead::SsangSiot => "ss",
            Lead::Ieung => "",
            Lead::Jieut => "j",
            Lead::SsangJieut => "jj",
            Lead::Chieut => "ch",
            Lead::Kieuk => "k",
            Lead::Tieut => "t",
            Lead::Pieup => "p",
            Lead::Hieut => "h",
        }
    }
}

impl Vowel {
    pub fn romanized(self) -> &'static str {
        match self {
            Vowel::A => "a",
            Vowel::Ae => "ae",
            Vowel::Ya => "ya",
            Vowel::Yae => "yae",
            Vowel::Eo => "eo",
            Vowel::E => "e",
            Vowel::Yeo => "yeo",
            Vowel::Ye => "ye",
            Vowel::O => "o",
            Vowel::Wa => "wa",
            Vowel::Wae => "wae",
            Vowel::Oe => "oe",
            Vowel::Yo => "yo",
            Vowel::U => "u",
            Vowel::Wo => "wo",
            Vowel::We => "we",
            Vowel::Wi => "wi",
            Vowel::Yu => "yu",
            Vowel::Eu => "eu",
            Vowel::Ui => "ui",
            Vowel::I => "i",
        }
    }
}

impl Tail {
    /// Romanized coda, spelled by its neutralized sound.
    pub fn romanized(self) -> &'static str {
        match self.representative() {
            Tail::Giyeok => "k",
            Tail::Nieun => "n",
            Tail::Digeut => "t",
            Tail::Rieul => "l",
            Tail::Mieum => "m",
            Tail::Bieup => "p",
            _ => "ng",
        }
    }
}

/// Romanize one syllable.
pub fn romanize(triple: JamoTriple) -> String {
    let mut out = String::with_capacity(6);
    out.push_str(triple.lead.romanized());
    out.push_str(triple.vowel.romanized());
    if let Some(tail) = triple.tail {
        out.push_str(tail.romanized());
    }
    out
}

/// Romanize every Hangul syllable in `text`, leaving other characters as
/// they are.
pub fn romanize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match crate::codec::decompose(c) {
            Ok(triple) => out.push_str(&romanize(triple)),
            Err(_) => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decompose;

    #[test]
    fn test_romanize_open_syllables() {
        assert_eq!(romanize(decompose('가').unwrap()), "ga");
        assert_eq!(romanize(decompose('아').unwrap()), "a");
        assert_eq!(romanize(decompose('쮜').unwrap()), "jjwi");
    }

    #[test]
    fn test_romanize_codas_by_sound() {
        assert_eq!(romanize(decompose('닭').unwrap()), "dak");
        assert_eq!(romanize(decompose('꽃').unwrap()), "kkot");
        assert_eq!(romanize(decompose('강').unwrap()), "gang");
        assert_eq!(romanize(decompose('칼').unwrap()), "kal");
    }

    #[test]
    fn test_romanize_text_passes_other_chars() {
        assert_eq!(romanize_text("무릎 위!"), "mureup wi!");
    }

    #[test]
    fn test_every_member_has_a_romanization() {
        for &vowel in Vowel::ALL {
            assert!(!vowel.romanized().is_empty());
        }
        for &tail in Tail::ALL {
            assert!(!tail.romanized().is_empty());
        }
        let silent: Vec<Lead> = Lead::ALL
            .iter()
            .copied()
            .filter(|l| l.romanized().is_empty())
            .collect();
        assert_eq!(silent, vec![Lead::Ieung]);
    }
}
