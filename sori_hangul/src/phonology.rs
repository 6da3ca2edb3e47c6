// Korean phonological rewrite engine.
//
// Given a syllable and its (optional) neighbours, rewrites each syllable
// boundary into how it is actually pronounced. All of the work happens at a
// `Junction`: the coda of one syllable and the onset of the next. The rules
// run as an ordered cascade in which each step sees the previous step's
// output:
//
//   1. h onset: plain stop coda + ㅎ merges into an aspirate; ㅎ after a
//      sonorant coda goes silent
//   2. linking: a coda releases into a following null onset (compounds split)
//   3. h coda: ㅎ-family codas aspirate a following obstruent or vanish
//      before a vowel
//   4. tensification after the sonorant-final compounds
//   5. coda neutralization to the seven representative sounds
//   6. tensification after a neutralized stop
//   7. second h pass over the neutralized coda
//   8. remaining linking
//   9. nasalization of stops before nasals and ㄹ
//  10. liquidization (ㄴ next to ㄹ)
//  11. ㄹ onset after a nasal becomes ㄴ
//  12. ㄴ coda before ㄱ assimilates to ㅇ
//
// The order is load-bearing: e.g. linking must see the raw coda (옷이 ->
// 오시, not 오디) while tensification must see the neutralized one.
//
// A `SyllableContext` carries up to three syllables. The previous/current
// junction rewrites the previous coda and the current onset; the
// current/next junction rewrites the current coda and the next onset. When
// there is no next syllable the current coda is only neutralized. The
// `suppress_*` flags come from the `.` word-boundary marker: the flagged
// syllable's coda is neutralized as if phrase-final before its junction
// runs, so 릎. + 위 sounds 르뷔 instead of 르퓌.
//
// `RuleSet` turns whole rule families off without changing the order of the
// ones that remain.
//
// Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::codec::{self, JamoTriple};
use crate::jamo::{Lead, Tail};

/// Which rule families the cascade applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Release of a coda into a following null onset (steps 2, 8).
    pub linking: bool,
    /// Merging of ㅎ with a neighbouring stop (steps 1, 3, 7).
    pub aspiration: bool,
    /// Tensing of plain obstruent onsets (steps 4, 6).
    pub tensification: bool,
    /// Coda neutralization (step 5, and isolated syllables).
    pub neutralization: bool,
    /// Stops before nasals, and ㄹ after nasals (steps 9, 11).
    pub nasalization: bool,
    /// ㄴ/ㄹ assimilation (step 10).
    pub liquidization: bool,
    /// ㄴ coda before ㄱ (step 12).
    pub nasal_assimilation: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            linking: true,
            aspiration: true,
            tensification: true,
            neutralization: true,
            nasalization: true,
            liquidization: true,
            nasal_assimilation: true,
        }
    }
}

impl RuleSet {
    /// Only neutralize codas; no cross-syllable interaction at all.
    pub fn isolated() -> Self {
        RuleSet {
            linking: false,
            aspiration: false,
            tensification: false,
            neutralization: true,
            nasalization: false,
            liquidization: false,
            nasal_assimilation: false,
        }
    }
}

/// A syllable together with the neighbours allowed to affect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyllableContext {
    pub prev: Option<JamoTriple>,
    pub current: JamoTriple,
    pub next: Option<JamoTriple>,
    /// Neutralize `prev`'s coda before it meets `current`.
    pub suppress_prev_link: bool,
    /// Neutralize `current`'s coda before it meets `next`.
    pub suppress_current_link: bool,
}

impl SyllableContext {
    pub fn new(prev: Option<JamoTriple>, current: JamoTriple, next: Option<JamoTriple>) -> Self {
        SyllableContext {
            prev,
            current,
            next,
            suppress_prev_link: false,
            suppress_current_link: false,
        }
    }

    pub fn isolated(current: JamoTriple) -> Self {
        SyllableContext::new(None, current, None)
    }
}

/// The rewritten syllables of one `SyllableContext`, slot for slot.
///
/// Only the slots that touch a junction are rewritten: `prev` gets a new
/// coda, `next` gets a new onset, and `current` may get both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhonologyResult {
    pub prev: Option<JamoTriple>,
    pub current: JamoTriple,
    pub next: Option<JamoTriple>,
}

impl PhonologyResult {
    /// The present slots as triples, in order.
    pub fn to_structured(&self) -> Vec<JamoTriple> {
        self.prev
            .into_iter()
            .chain(std::iter::once(self.current))
            .chain(self.next)
            .collect()
    }

    /// The present slots recomposed into one string.
    pub fn to_merged_text(&self) -> String {
        self.to_structured().into_iter().map(codec::compose).collect()
    }
}

/// A syllable boundary: one coda (possibly empty) and the onset after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Junction {
    tail: Option<Tail>,
    lead: Lead,
}

impl Junction {
    fn h_onset(&mut self) {
        let Some(tail) = self.tail else { return };
        if self.lead != Lead::Hieut {
            return;
        }
        if let Some(aspirate) = tail.merged_with_h() {
            self.lead = aspirate;
            self.tail = None;
        } else if let Some((kept, aspirate)) = tail
            .split()
            .filter(|&(_, released)| released.is_aspiratable_stop())
            .and_then(|(kept, released)| released.merged_with_h().map(|a| (kept, a)))
        {
            self.tail = Some(kept);
            self.lead = aspirate;
        } else if tail.silences_h_onset() {
            self.lead = Lead::Ieung;
        }
    }

    fn link_before_vowel(&mut self) {
        let Some(tail) = self.tail else { return };
        if self.lead != Lead::Ieung || tail.h_residue().is_some() {
            return;
        }
        if let Some((kept, released)) = tail.split() {
            if let Some(lead) = released.as_lead() {
                self.tail = Some(kept);
                self.lead = lead;
            }
        } else if let Some(lead) = tail.as_lead() {
            self.tail = None;
            self.lead = lead;
        }
    }

    fn h_coda(&mut self) {
        let Some(tail) = self.tail else { return };
        if self.lead == Lead::Hieut {
            if let Some(aspirate) = tail.merged_with_h() {
                self.lead = aspirate;
                self.tail = None;
            }
            return;
        }
        let Some(residue) = tail.h_residue() else { return };
        if self.lead == Lead::Ieung {
            self.tail = residue;
        } else if let Some(aspirate) = self.lead.merged_with_h() {
            self.lead = aspirate;
            self.tail = residue;
        }
    }

    fn tense_after_compound(&mut self) {
        if self.tail.is_some_and(Tail::tensifies_onset) {
            if let Some(tense) = self.lead.tensed() {
                self.lead = tense;
            }
        }
    }

    fn neutralize(&mut self) {
        self.tail = self.tail.map(Tail::representative);
    }

    fn tense_after_stop(&mut self) {
        if self.tail.is_some_and(Tail::is_stop) {
            if let Some(tense) = self.lead.tensed() {
                self.lead = tense;
            }
        }
    }

    fn h_onset_after_stop(&mut self) {
        let Some(tail) = self.tail else { return };
        if self.lead != Lead::Hieut {
            return;
        }
        if tail.is_stop() {
            if let Some(aspirate) = tail.merged_with_h() {
                self.lead = aspirate;
                self.tail = None;
            }
        } else if tail.silences_h_onset() {
            self.lead = Lead::Ieung;
        }
    }

    fn link_remaining(&mut self) {
        if self.lead != Lead::Ieung {
            return;
        }
        if let Some(lead) = self.tail.and_then(Tail::as_lead) {
            self.tail = None;
            self.lead = lead;
        }
    }

    fn nasalize_coda(&mut self) {
        if !(self.lead.is_nasal() || self.lead == Lead::Rieul) {
            return;
        }
        self.tail = self.tail.map(|tail| match tail {
            Tail::Giyeok => Tail::Ieung,
            Tail::Digeut => Tail::Nieun,
            Tail::Bieup => Tail::Mieum,
            other => other,
        });
    }

    fn liquidize(&mut self) {
        match (self.tail, self.lead) {
            (Some(Tail::Nieun), Lead::Rieul) => self.tail = Some(Tail::Rieul),
            (Some(Tail::Rieul), Lead::Nieun) => self.lead = Lead::Rieul,
            _ => {}
        }
    }

    fn nasalize_liquid_onset(&mut self) {
        if self.lead == Lead::Rieul && matches!(self.tail, Some(Tail::Mieum | Tail::Ieung)) {
            self.lead = Lead::Nieun;
        }
    }

    fn assimilate_nasal(&mut self) {
        if self.tail == Some(Tail::Nieun) && self.lead == Lead::Giyeok {
            self.tail = Some(Tail::Ieung);
        }
    }

    fn cascade(mut self, rules: &RuleSet) -> Self {
        if rules.aspiration {
            self.h_onset();
        }
        if rules.linking {
            self.link_before_vowel();
        }
        if rules.aspiration {
            self.h_coda();
        }
        if rules.tensification {
            self.tense_after_compound();
        }
        if rules.neutralization {
            self.neutralize();
        }
        if rules.tensification {
            self.tense_after_stop();
        }
        if rules.aspiration {
            self.h_onset_after_stop();
        }
        if rules.linking {
            self.link_remaining();
        }
        if rules.nasalization {
            self.nasalize_coda();
        }
        if rules.liquidization {
            self.liquidize();
        }
        if rules.nasalization {
            self.nasalize_liquid_onset();
        }
        if rules.nasal_assimilation {
            self.assimilate_nasal();
        }
        self
    }
}

fn normalize_isolated(tail: Option<Tail>, rules: &RuleSet) -> Option<Tail> {
    if rules.neutralization {
        tail.map(Tail::representative)
    } else {
        tail
    }
}

/// Run the rule cascade over both junctions of `context`.
pub fn variate(context: &SyllableContext, rules: &RuleSet) -> PhonologyResult {
    let mut prev = context.prev;
    let mut current = context.current;
    let mut next = context.next;

    if let Some(prev) = prev.as_mut() {
        if context.suppress_prev_link {
            prev.tail = normalize_isolated(prev.tail, rules);
        }
        let junction = Junction {
            tail: prev.tail,
            lead: current.lead,
        }
        .cascade(rules);
        prev.tail = junction.tail;
        current.lead = junction.lead;
    }

    if context.suppress_current_link {
        current.tail = normalize_isolated(current.tail, rules);
    }

    match next.as_mut() {
        Some(next) => {
            let junction = Junction {
                tail: current.tail,
                lead: next.lead,
            }
            .cascade(rules);
            current.tail = junction.tail;
            next.lead = junction.lead;
        }
        None => current.tail = normalize_isolated(current.tail, rules),
    }

    PhonologyResult {
        prev,
        current,
        next,
    }
}

/// Rewrite two adjacent syllables, returning both.
pub fn variate_pair(first: JamoTriple, second: JamoTriple, rules: &RuleSet) -> (JamoTriple, JamoTriple) {
    let result = variate(&SyllableContext::new(None, first, Some(second)), rules);
    // `next` is always present when it was given.
    (result.current, result.next.unwrap_or(second))
}

/// Rewrite every Hangul syllable of `text` against its Hangul neighbours.
///
/// Any other character (spaces included) is copied through and breaks the
/// chain, so syllables on either side of it are treated as phrase edges.
pub fn variate_text(text: &str, rules: &RuleSet) -> String {
    let chars: Vec<char> = text.chars().collect();
    let syllables: Vec<Option<JamoTriple>> =
        chars.iter().map(|&c| codec::decompose(c).ok()).collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let Some(current) = syllables[i] else {
                return c;
            };
            let prev = i.checked_sub(1).and_then(|p| syllables[p]);
            let next = syllables.get(i + 1).copied().flatten();
            let result = variate(&SyllableContext::new(prev, current, next), rules);
            codec::compose(result.current)
        })
        .collect()
}
