// Song-level driver: run a phonemizer over every track of a song.
//
// A `Song` is the JSON document the `phonemize` binary reads: the singer's
// alias table plus a list of tracks, each a flat list of notes. Tracks are
// independent, so they are phonemized in parallel on the rayon pool, each
// with its own phonemizer instance; within a track the usual
// setup -> process* -> cleanup sequence runs on one thread.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PhonemizerConfig;
use crate::error::PhonemizerError;
use crate::note::{Note, NoteGroup, group_notes};
use crate::phonemizer::{OtoMap, Phoneme, ProcessRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub oto: OtoMap,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub notes: Vec<Note>,
}

impl Track {
    pub fn groups(&self) -> Vec<NoteGroup> {
        group_notes(self.notes.iter().cloned())
    }
}

/// What happened to one note group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOutput {
    pub position: i32,
    pub lyric: String,
    pub pronounced: String,
    pub phonemes: Vec<Phoneme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackOutput {
    pub name: String,
    pub groups: Vec<GroupOutput>,
}

impl Song {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Phonemize one track with a fresh phonemizer.
pub fn phonemize_track(
    track: &Track,
    config: &PhonemizerConfig,
    oto: OtoMap,
) -> Result<TrackOutput, PhonemizerError> {
    let groups = track.groups();
    let mut phonemizer = config.build(oto);
    let rewritten = phonemizer.setup(&groups)?;

    let mut out = Vec::with_capacity(groups.len());
    for (index, (original, group)) in groups.iter().zip(&rewritten).enumerate() {
        let phonemes = phonemizer.process(&ProcessRequest::for_index(&rewritten, index))?;
        out.push(GroupOutput {
            position: group.position(),
            lyric: original.lyric().to_string(),
            pronounced: group.lyric().to_string(),
            phonemes,
        });
    }
    phonemizer.cleanup();
    debug!("track {:?}: {} groups", track.name, out.len());

    Ok(TrackOutput {
        name: track.name.clone(),
        groups: out,
    })
}

/// Phonemize every track of `song` in parallel, preserving track order.
pub fn phonemize_song(
    song: &Song,
    config: &PhonemizerConfig,
) -> Vec<Result<TrackOutput, PhonemizerError>> {
    song.tracks
        .par_iter()
        .map(|track| phonemize_track(track, config, song.oto.clone()))
        .collect()
}
