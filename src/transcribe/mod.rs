// Transcription — turning a recording into text for the matcher.

pub mod traits;
pub mod whisper;
