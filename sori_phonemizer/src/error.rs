// Error type for the phonemizer crate.
//
// Lyric problems are never errors: text that is not Hangul simply takes no
// part in the phonology. What is left are contract violations by the
// caller (processing before setup, or outside the phrase that was set up),
// phrase-model failures, and configuration/IO errors from the CLI side.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhonemizerError {
    #[error("process called before setup")]
    NotSetUp,
    #[error("no cached phonemes for the note at tick {position}; setup did not cover it")]
    CacheMiss { position: i32 },
    #[error("phrase model returned {actual} results for a run of {expected} groups")]
    Inference { expected: usize, actual: usize },
    #[error("a note group needs at least one note")]
    EmptyGroup,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
