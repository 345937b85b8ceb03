// disease-match: rank skin diseases from a recorded symptom description
//
// This is the library root. The matcher is pure text-in, scores-out; the
// other modules feed it (transcription, config) and present its results.

pub mod config;
pub mod matching;
pub mod output;
pub mod transcribe;
