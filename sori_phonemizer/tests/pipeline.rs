// End-to-end tests for the lyric pipeline.
//
// Each test builds a phrase the way the editor hands it over (note groups
// with tick positions), runs it through a phonemizer's setup/process
// lifecycle, and checks the pronounced lyrics and phonemes that come out.
// Only the public API is used.

use std::thread;

use sori_hangul::{RuleSet, variate_text};
use sori_phonemizer::phrase::{JamoPhraseModel, PhrasePhonemizer};
use sori_phonemizer::{
    KoreanPhonemizer, Note, NoteGroup, OtoMap, Phoneme, Phonemizer, PhonemizerError, ProcessRequest,
    group_notes, rewrite_groups,
};

const QUARTER: i32 = 480;

/// Back-to-back quarter notes, one per lyric.
fn legato(lyrics: &[&str]) -> Vec<NoteGroup> {
    lyrics
        .iter()
        .enumerate()
        .map(|(i, l)| NoteGroup::new(Note::new(*l, 60, i as i32 * QUARTER, QUARTER)))
        .collect()
}

fn pronounced(groups: &[NoteGroup]) -> String {
    groups.iter().map(|g| g.lyric()).collect()
}

// ---------------------------------------------------------------------------
// Rewrite semantics
// ---------------------------------------------------------------------------

#[test]
fn linking_versus_word_boundary() {
    let rules = RuleSet::default();
    let linked = rewrite_groups(&legato(&["무", "릎", "위"]), &rules);
    let bounded = rewrite_groups(&legato(&["무", "릎.", "위"]), &rules);
    assert_eq!(pronounced(&linked), "무르퓌");
    assert_eq!(pronounced(&bounded), "무르뷔");
}

#[test]
fn escaped_syllable_keeps_its_own_sound() {
    let rules = RuleSet::default();
    // 가 would normally be unaffected anyway; use onsets and codas that
    // would interact with every neighbour.
    for (prev, next) in [("착", "하"), ("닭", "이"), ("막", "론")] {
        let out = rewrite_groups(&legato(&[prev, "!하", next]), &rules);
        assert_eq!(out[1].lyric(), "하", "neighbours {prev}/{next}");
    }
    let out = rewrite_groups(&legato(&["!닭", "이"]), &rules);
    assert_eq!(out[0].lyric(), "닥");
    assert_eq!(out[1].lyric(), "이");
}

#[test]
fn rest_makes_syllables_phrase_edges() {
    let rules = RuleSet::default();
    let groups = vec![
        NoteGroup::new(Note::new("닭", 60, 0, QUARTER)),
        NoteGroup::new(Note::new("이", 60, 2 * QUARTER, QUARTER)),
    ];
    let out = rewrite_groups(&groups, &rules);
    assert_eq!(pronounced(&out), "닥이");
    assert_eq!(pronounced(&out), variate_text("닭 이", &rules).replace(' ', ""));
}

#[test]
fn extenders_follow_their_lead() {
    let notes = vec![
        Note::new("칼", 60, 0, QUARTER),
        Note::new("+", 62, QUARTER, QUARTER),
        Note::new("날", 60, 2 * QUARTER, QUARTER),
        Note::new("+~", 59, 3 * QUARTER, QUARTER),
    ];
    let groups = group_notes(notes);
    assert_eq!(groups.len(), 2);
    let out = rewrite_groups(&groups, &RuleSet::default());
    assert_eq!(pronounced(&out), "칼랄");
    assert_eq!(out[1].notes()[1].lyric, "+~");
}

#[test]
fn mixed_scripts_pass_through() {
    let out = rewrite_groups(&legato(&["la", "착", "하", "R"]), &RuleSet::default());
    let lyrics: Vec<&str> = out.iter().map(|g| g.lyric()).collect();
    assert_eq!(lyrics, vec!["la", "차", "카", "R"]);
}

// ---------------------------------------------------------------------------
// Phonemizer lifecycle
// ---------------------------------------------------------------------------

#[test]
fn korean_phonemizer_lifecycle() {
    let mut oto = OtoMap::new();
    oto.insert("만", "- man");
    oto.insert("타", "n ta");
    let mut phonemizer = KoreanPhonemizer::new(oto, RuleSet::default());

    let groups = legato(&["많", "다"]);
    let first = phonemizer.setup(&groups).unwrap();
    let again = phonemizer.setup(&groups).unwrap();
    assert_eq!(first, again);

    // Out of order is fine once set up.
    let second = phonemizer.process(&ProcessRequest::for_index(&first, 1)).unwrap();
    let first_ph = phonemizer.process(&ProcessRequest::for_index(&first, 0)).unwrap();
    assert_eq!(first_ph, vec![Phoneme::new("- man", 0)]);
    assert_eq!(second, vec![Phoneme::new("n ta", 0)]);

    phonemizer.cleanup();
    assert!(matches!(
        phonemizer.process(&ProcessRequest::for_index(&first, 0)),
        Err(PhonemizerError::NotSetUp)
    ));
}

#[test]
fn phrase_phonemizer_runs_once_per_contiguous_run() {
    let groups = vec![
        NoteGroup::new(Note::new("닭", 60, 0, QUARTER)),
        NoteGroup::new(Note::new("장", 60, QUARTER, QUARTER)),
        NoteGroup::new(Note::new("막", 60, 4 * QUARTER, QUARTER)),
        NoteGroup::new(Note::new("론", 60, 5 * QUARTER, QUARTER)),
    ];
    let mut phonemizer = PhrasePhonemizer::new(JamoPhraseModel::default(), RuleSet::default());
    let rewritten = phonemizer.setup(&groups).unwrap();
    assert_eq!(pronounced(&rewritten), "닥짱망논");

    let jang = phonemizer.process(&ProcessRequest::for_index(&rewritten, 1)).unwrap();
    assert_eq!(jang[0], Phoneme::new("jj", 0));
    let non = phonemizer.process(&ProcessRequest::for_index(&rewritten, 3)).unwrap();
    assert_eq!(non[0], Phoneme::new("n", 0));

    // A group from a phrase that was never set up.
    let stray = vec![NoteGroup::new(Note::new("가", 60, 99 * QUARTER, QUARTER))];
    assert!(matches!(
        phonemizer.process(&ProcessRequest::for_index(&stray, 0)),
        Err(PhonemizerError::CacheMiss { .. })
    ));
}

#[test]
fn process_is_safe_from_many_threads() {
    let mut phonemizer = PhrasePhonemizer::new(JamoPhraseModel::default(), RuleSet::default());
    let groups = legato(&["무", "릎", "위", "착", "하"]);
    let rewritten = phonemizer.setup(&groups).unwrap();

    let phonemizer = &phonemizer;
    let rewritten = &rewritten;
    let results: Vec<Vec<Phoneme>> = thread::scope(|s| {
        let handles: Vec<_> = (0..rewritten.len())
            .map(|i| {
                s.spawn(move || {
                    phonemizer
                        .process(&ProcessRequest::for_index(rewritten, i))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results.len(), 5);
    assert_eq!(results[2][0], Phoneme::new("p", 0));
}
