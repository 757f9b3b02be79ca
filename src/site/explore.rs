//! Progress through the crocodile sounds section.

use std::collections::BTreeSet;

use super::audio::AudioCue;

/// Feedback line under the progress bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encouragement {
    pub text: &'static str,
    pub color: &'static str,
    /// Bold + pulse once everything has been heard.
    pub celebrate: bool,
}

/// Distinct ambient cues played this session. Never shrinks.
#[derive(Debug, Default)]
pub struct ExplorationTracker {
    played: BTreeSet<AudioCue>,
}

impl ExplorationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time an ambient cue is recorded.
    pub fn record(&mut self, cue: AudioCue) -> bool {
        cue.is_ambient() && self.played.insert(cue)
    }

    pub fn has_played(&self, cue: AudioCue) -> bool {
        self.played.contains(&cue)
    }

    pub fn played_count(&self) -> usize {
        self.played.len()
    }

    pub fn total(&self) -> usize {
        AudioCue::AMBIENT.len()
    }

    pub fn is_complete(&self) -> bool {
        self.played_count() == self.total()
    }

    pub fn percent(&self) -> f64 {
        self.played_count() as f64 / self.total() as f64 * 100.0
    }

    pub fn counter_text(&self) -> String {
        format!("Sounds explored: {}/{}", self.played_count(), self.total())
    }

    pub fn encouragement(&self) -> Encouragement {
        match self.played_count() {
            0 => Encouragement {
                text: "Try listening to all three crocodile sounds!",
                color: "#666",
                celebrate: false,
            },
            1 => Encouragement {
                text: "Great start! Listen to the other sounds too!",
                color: "#4a7c59",
                celebrate: false,
            },
            2 => Encouragement {
                text: "Almost there! One more sound to go!",
                color: "#2d5016",
                celebrate: false,
            },
            _ => Encouragement {
                text: "🎉 Awesome! You've heard all crocodile sounds!",
                color: "#28a745",
                celebrate: true,
            },
        }
    }
}
