//! Planning feedback (warnings, notes, suggestions).
//!
//! Naming is lenient: an odd key or an unknown instrument never stops a
//! batch. Each fallback is recorded here against the folder or file that
//! triggered it, so callers can show what was guessed.

use serde::{Deserialize, Serialize};

/// One piece of feedback, attached to a folder or file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    /// Folder or file the message is about (empty for batch-wide notes).
    pub subject: String,
    pub suggestion: Option<String>,
}

impl Feedback {
    pub fn warning(message: impl Into<String>, subject: impl Into<String>) -> Self {
        Feedback {
            level: FeedbackLevel::Warning,
            message: message.into(),
            subject: subject.into(),
            suggestion: None,
        }
    }

    pub fn info(message: impl Into<String>, subject: impl Into<String>) -> Self {
        Feedback {
            level: FeedbackLevel::Info,
            message: message.into(),
            subject: subject.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackLevel {
    /// Named with a fallback that may not be what the user intended
    Warning,
    /// Informational, e.g. unmapped vocabulary used verbatim
    Info,
}

/// Collector for feedback during planning
#[derive(Debug, Default)]
pub struct FeedbackCollector {
    feedback: Vec<Feedback>,
    subject: String,
}

impl FeedbackCollector {
    pub fn new() -> Self {
        FeedbackCollector::default()
    }

    /// Set the folder or file that subsequent feedback refers to
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.feedback
            .push(Feedback::warning(message, self.subject.clone()));
    }

    pub fn warning_with_suggestion(
        &mut self,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.feedback.push(
            Feedback::warning(message, self.subject.clone()).with_suggestion(suggestion),
        );
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.feedback
            .push(Feedback::info(message, self.subject.clone()));
    }

    pub fn into_feedback(self) -> Vec<Feedback> {
        self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_builder() {
        let fb = Feedback::warning("Unrecognized key 'H'", "Song - H - 90BPM")
            .with_suggestion("Use a key like Am or F#");

        assert_eq!(fb.level, FeedbackLevel::Warning);
        assert_eq!(fb.subject, "Song - H - 90BPM");
        assert_eq!(fb.suggestion, Some("Use a key like Am or F#".to_string()));
    }

    #[test]
    fn test_feedback_collector_tracks_subject() {
        let mut collector = FeedbackCollector::new();

        collector.set_subject("Song - Bass.wav");
        collector.warning("No tempo found");
        collector.set_subject("Song - Kalimba.wav");
        collector.info("Unmapped instrument");

        let feedback = collector.into_feedback();
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].subject, "Song - Bass.wav");
        assert_eq!(feedback[1].subject, "Song - Kalimba.wav");
        assert_eq!(feedback[1].level, FeedbackLevel::Info);
    }
}
