// Closed jamo alphabets for the three syllable slots.
//
// A composed Hangul syllable is an onset (`Lead`), a nucleus (`Vowel`) and an
// optional coda (`Tail`). Each alphabet is a fieldless enum whose declaration
// order is the Unicode table order, so `index()` is the value used by the
// syllable-block arithmetic in `codec.rs`. The empty coda is not a `Tail`
// variant; it is `Option::None` at the use sites.
//
// Besides the tables, this module owns the per-consonant facts the rule
// engine in `phonology.rs` asks about: what a coda neutralizes to, how a
// compound coda splits, which onset a coda becomes when it links forward,
// and the aspirated/tense counterparts of the plain obstruent onsets.
// Keeping those as exhaustive `match`es means a missing case is a compile
// error rather than a runtime lookup miss.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! jamo_alphabet {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $ch:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in Unicode table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Position of this member in `ALL`.
            pub fn index(self) -> u32 {
                self as u32
            }

            pub fn from_index(index: u32) -> Option<Self> {
                Self::ALL.get(index as usize).copied()
            }

            /// The Hangul Compatibility Jamo grapheme for this member.
            pub fn as_char(self) -> char {
                match self {
                    $($name::$variant => $ch),+
                }
            }

            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $($ch => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_char())
            }
        }
    };
}

jamo_alphabet!(
    /// Syllable onset. `Ieung` in this slot is the null onset.
    Lead {
        Giyeok => 'ㄱ',
        SsangGiyeok => 'ㄲ',
        Nieun => 'ㄴ',
        Digeut => 'ㄷ',
        SsangDigeut => 'ㄸ',
        Rieul => 'ㄹ',
        Mieum => 'ㅁ',
        Bieup => 'ㅂ',
        SsangBieup => 'ㅃ',
        Siot => 'ㅅ',
        SsangSiot => 'ㅆ',
        Ieung => 'ㅇ',
        Jieut => 'ㅈ',
        SsangJieut => 'ㅉ',
        Chieut => 'ㅊ',
        Kieuk => 'ㅋ',
        Tieut => 'ㅌ',
        Pieup => 'ㅍ',
        Hieut => 'ㅎ',
    }
);

jamo_alphabet!(
    /// Syllable nucleus.
    Vowel {
        A => 'ㅏ',
        Ae => 'ㅐ',
        Ya => 'ㅑ',
        Yae => 'ㅒ',
        Eo => 'ㅓ',
        E => 'ㅔ',
        Yeo => 'ㅕ',
        Ye => 'ㅖ',
        O => 'ㅗ',
        Wa => 'ㅘ',
        Wae => 'ㅙ',
        Oe => 'ㅚ',
        Yo => 'ㅛ',
        U => 'ㅜ',
        Wo => 'ㅝ',
        We => 'ㅞ',
        Wi => 'ㅟ',
        Yu => 'ㅠ',
        Eu => 'ㅡ',
        Ui => 'ㅢ',
        I => 'ㅣ',
    }
);

jamo_alphabet!(
    /// Non-empty syllable coda, including the eleven compound codas.
    ///
    /// The Unicode tail table starts with "no tail" at index 0, so the
    /// block index of a `Tail` is `index() + 1`.
    Tail {
        Giyeok => 'ㄱ',
        SsangGiyeok => 'ㄲ',
        GiyeokSiot => 'ㄳ',
        Nieun => 'ㄴ',
        NieunJieut => 'ㄵ',
        NieunHieut => 'ㄶ',
        Digeut => 'ㄷ',
        Rieul => 'ㄹ',
        RieulGiyeok => 'ㄺ',
        RieulMieum => 'ㄻ',
        RieulBieup => 'ㄼ',
        RieulSiot => 'ㄽ',
        RieulTieut => 'ㄾ',
        RieulPieup => 'ㄿ',
        RieulHieut => 'ㅀ',
        Mieum => 'ㅁ',
        Bieup => 'ㅂ',
        BieupSiot => 'ㅄ',
        Siot => 'ㅅ',
        SsangSiot => 'ㅆ',
        Ieung => 'ㅇ',
        Jieut => 'ㅈ',
        Chieut => 'ㅊ',
        Kieuk => 'ㅋ',
        Tieut => 'ㅌ',
        Pieup => 'ㅍ',
        Hieut => 'ㅎ',
    }
);

impl Lead {
    /// Onset produced when an `h` sound merges into this one.
    ///
    /// `ㅅ` has no aspirated partner and surfaces tense instead.
    pub fn merged_with_h(self) -> Option<Lead> {
        match self {
            Lead::Giyeok => Some(Lead::Kieuk),
            Lead::Digeut => Some(Lead::Tieut),
            Lead::Bieup => Some(Lead::Pieup),
            Lead::Jieut => Some(Lead::Chieut),
            Lead::Siot => Some(Lead::SsangSiot),
            _ => None,
        }
    }

    /// Tense counterpart of a plain obstruent onset.
    pub fn tensed(self) -> Option<Lead> {
        match self {
            Lead::Giyeok => Some(Lead::SsangGiyeok),
            Lead::Digeut => Some(Lead::SsangDigeut),
            Lead::Bieup => Some(Lead::SsangBieup),
            Lead::Siot => Some(Lead::SsangSiot),
            Lead::Jieut => Some(Lead::SsangJieut),
            _ => None,
        }
    }

    pub fn is_plain_obstruent(self) -> bool {
        self.tensed().is_some()
    }

    pub fn is_nasal(self) -> bool {
        matches!(self, Lead::Nieun | Lead::Mieum)
    }
}

impl Tail {
    pub fn is_compound(self) -> bool {
        self.split().is_some()
    }

    /// Members of a compound coda: the one that stays in the coda and the
    /// one released into a following empty onset.
    pub fn split(self) -> Option<(Tail, Tail)> {
        match self {
            Tail::GiyeokSiot => Some((Tail::Giyeok, Tail::Siot)),
            Tail::NieunJieut => Some((Tail::Nieun, Tail::Jieut)),
            Tail::NieunHieut => Some((Tail::Nieun, Tail::Hieut)),
            Tail::RieulGiyeok => Some((Tail::Rieul, Tail::Giyeok)),
            Tail::RieulMieum => Some((Tail::Rieul, Tail::Mieum)),
            Tail::RieulBieup => Some((Tail::Rieul, Tail::Bieup)),
            Tail::RieulSiot => Some((Tail::Rieul, Tail::Siot)),
            Tail::RieulTieut => Some((Tail::Rieul, Tail::Tieut)),
            Tail::RieulPieup => Some((Tail::Rieul, Tail::Pieup)),
            Tail::RieulHieut => Some((Tail::Rieul, Tail::Hieut)),
            Tail::BieupSiot => Some((Tail::Bieup, Tail::Siot)),
            _ => None,
        }
    }

    /// The onset this coda becomes when it links into a following null
    /// onset. `None` for compounds (split first) and for `ㅇ`, which never
    /// links.
    pub fn as_lead(self) -> Option<Lead> {
        match self {
            Tail::Giyeok => Some(Lead::Giyeok),
            Tail::SsangGiyeok => Some(Lead::SsangGiyeok),
            Tail::Nieun => Some(Lead::Nieun),
            Tail::Digeut => Some(Lead::Digeut),
            Tail::Rieul => Some(Lead::Rieul),
            Tail::Mieum => Some(Lead::Mieum),
            Tail::Bieup => Some(Lead::Bieup),
            Tail::Siot => Some(Lead::Siot),
            Tail::SsangSiot => Some(Lead::SsangSiot),
            Tail::Jieut => Some(Lead::Jieut),
            Tail::Chieut => Some(Lead::Chieut),
            Tail::Kieuk => Some(Lead::Kieuk),
            Tail::Tieut => Some(Lead::Tieut),
            Tail::Pieup => Some(Lead::Pieup),
            Tail::Hieut => Some(Lead::Hieut),
            _ => None,
        }
    }

    /// Coda neutralization: the sound this coda is pronounced as at the end
    /// of a syllable with nothing to release into.
    pub fn representative(self) -> Tail {
        match self {
            Tail::Giyeok
            | Tail::SsangGiyeok
            | Tail::Kieuk
            | Tail::GiyeokSiot
            | Tail::RieulGiyeok => Tail::Giyeok,
            Tail::Nieun | Tail::NieunJieut | Tail::NieunHieut => Tail::Nieun,
            Tail::Digeut
            | Tail::Siot
            | Tail::SsangSiot
            | Tail::Jieut
            | Tail::Chieut
            | Tail::Tieut
            | Tail::Hieut => Tail::Digeut,
            Tail::Rieul
            | Tail::RieulBieup
            | Tail::RieulSiot
            | Tail::RieulTieut
            | Tail::RieulHieut => Tail::Rieul,
            Tail::Mieum | Tail::RieulMieum => Tail::Mieum,
            Tail::Bieup | Tail::Pieup | Tail::BieupSiot | Tail::RieulPieup => Tail::Bieup,
            Tail::Ieung => Tail::Ieung,
        }
    }

    /// Onset produced when this single coda merges with a following `ㅎ`.
    pub fn merged_with_h(self) -> Option<Lead> {
        match self {
            Tail::Giyeok => Some(Lead::Kieuk),
            Tail::Digeut | Tail::Siot => Some(Lead::Tieut),
            Tail::Bieup => Some(Lead::Pieup),
            Tail::Jieut => Some(Lead::Chieut),
            _ => None,
        }
    }

    /// For the `h`-family codas, what is left in the coda once the `h`
    /// has been absorbed by the next onset.
    pub fn h_residue(self) -> Option<Option<Tail>> {
        match self {
            Tail::Hieut => Some(None),
            Tail::NieunHieut => Some(Some(Tail::Nieun)),
            Tail::RieulHieut => Some(Some(Tail::Rieul)),
            _ => None,
        }
    }

    /// Compound codas that tensify a following plain obstruent even though
    /// they neutralize to a sonorant.
    pub fn tensifies_onset(self) -> bool {
        matches!(
            self,
            Tail::NieunJieut
                | Tail::RieulGiyeok
                | Tail::RieulMieum
                | Tail::RieulBieup
                | Tail::RieulSiot
                | Tail::RieulTieut
                | Tail::RieulPieup
        )
    }

    /// Neutralized stops: the codas that tensify, aspirate and nasalize.
    pub fn is_stop(self) -> bool {
        matches!(self, Tail::Giyeok | Tail::Digeut | Tail::Bieup)
    }

    /// Codas that neutralize to `ㄴ`, `ㄹ` or `ㅁ`.
    pub fn is_sonorant(self) -> bool {
        matches!(
            self.representative(),
            Tail::Nieun | Tail::Rieul | Tail::Mieum
        )
    }

    /// Codas after which an ㅎ onset is dropped rather than merged: the
    /// sonorants and ㅇ.
    pub fn silences_h_onset(self) -> bool {
        self.is_sonorant() || self == Tail::Ieung
    }

    /// Stops whose ㅎ merge yields an aspirated onset when released from a
    /// compound coda.
    pub fn is_aspiratable_stop(self) -> bool {
        matches!(
            self,
            Tail::Giyeok | Tail::Digeut | Tail::Bieup | Tail::Jieut
        )
    }
}
