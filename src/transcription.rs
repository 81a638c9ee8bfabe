//! Transcription Providers
//!
//! The recommend screen's voice mode turns an audio clip into text through a
//! [`TranscriptionProvider`]. Only a simulated provider ships; it never looks
//! at the audio.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::Mutex;

/// Sentences the simulated provider picks from
pub const SAMPLE_TRANSCRIPTS: [&str; 4] = [
    "I am interested in backend development, APIs, databases, and scalable systems.",
    "I want to build data pipelines, analytics, and work with machine learning models.",
    "I love building mobile apps and improving user experience and performance.",
    "I am keen on cloud engineering, DevOps, and scalable infrastructure.",
];

/// An audio file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub file_name: String,
}

impl AudioClip {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Clip named after the final component of `path`
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file_name }
    }
}

/// Errors returned by a transcription provider
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Transcription failed: {0}")]
    Failed(String),
}

/// Speech-to-text seam for the recommend screen
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Produce a transcript for `clip`, or for no clip at all
    async fn transcribe(&self, clip: Option<&AudioClip>) -> Result<String, TranscriptionError>;
}

/// Simulated provider: returns one of [`SAMPLE_TRANSCRIPTS`] at random
pub struct MockTranscriber {
    rng: Mutex<StdRng>,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of picks for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self) -> Result<&'static str, TranscriptionError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| TranscriptionError::Failed(e.to_string()))?;
        Ok(SAMPLE_TRANSCRIPTS[rng.gen_range(0..SAMPLE_TRANSCRIPTS.len())])
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscriber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcribe(&self, clip: Option<&AudioClip>) -> Result<String, TranscriptionError> {
        let sample = self.pick()?;
        let transcript = match clip {
            Some(clip) if !clip.file_name.is_empty() => {
                format!("Simulated from {}: {}", clip.file_name, sample)
            }
            _ => sample.to_string(),
        };

        tracing::debug!(
            provider = self.name(),
            has_clip = clip.is_some(),
            "Generated simulated transcript"
        );
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_picks_a_sample() {
        let provider = MockTranscriber::new();
        let transcript = provider.transcribe(None).await.unwrap();
        assert!(SAMPLE_TRANSCRIPTS.contains(&transcript.as_str()));
    }

    #[tokio::test]
    async fn test_mock_prefixes_file_name() {
        let provider = MockTranscriber::seeded(7);
        let clip = AudioClip::new("pitch.wav");
        let transcript = provider.transcribe(Some(&clip)).await.unwrap();

        let rest = transcript.strip_prefix("Simulated from pitch.wav: ").unwrap();
        assert!(SAMPLE_TRANSCRIPTS.contains(&rest));
    }

    #[tokio::test]
    async fn test_same_seed_same_sequence() {
        let a = MockTranscriber::seeded(42);
        let b = MockTranscriber::seeded(42);
        for _ in 0..8 {
            assert_eq!(
                a.transcribe(None).await.unwrap(),
                b.transcribe(None).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_unnamed_clip_has_no_prefix() {
        let provider = MockTranscriber::seeded(1);
        let transcript = provider.transcribe(Some(&AudioClip::new(""))).await.unwrap();
        assert!(SAMPLE_TRANSCRIPTS.contains(&transcript.as_str()));
    }

    #[test]
    fn test_clip_from_path() {
        let clip = AudioClip::from_path(Path::new("/home/jane/voice/intro.m4a"));
        assert_eq!(clip.file_name, "intro.m4a");
    }
}
