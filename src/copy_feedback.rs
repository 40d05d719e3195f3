// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::clipboard::CopyOutcome;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct CopyFeedback {
    pub outcome: CopyOutcome,
    pub shown_at: Instant,
}

impl CopyFeedback {
    pub fn new(outcome: CopyOutcome, shown_at: Instant) -> Self {
        Self { outcome, shown_at }
    }

    // with failure reporting off the confirmation is always positive
    pub fn is_positive(&self, report_failures: bool) -> bool {
        !report_failures || self.outcome.is_success()
    }

    pub fn message(&self, report_failures: bool) -> &'static str {
        if self.is_positive(report_failures) {
            "Copied!"
        } else {
            "Copy failed"
        }
    }

    pub fn is_expired(&self, now: Instant, duration: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_expires_only_after_duration() {
        let shown_at = Instant::now();
        let feedback = CopyFeedback::new(CopyOutcome::Copied, shown_at);
        let duration = Duration::from_millis(2000);

        assert!(!feedback.is_expired(shown_at, duration));
        assert!(!feedback.is_expired(shown_at + Duration::from_millis(1999), duration));
        assert!(feedback.is_expired(shown_at + Duration::from_millis(2000), duration));
        assert!(feedback.is_expired(shown_at + Duration::from_secs(5), duration));
    }

    #[test]
    fn test_failed_copy_is_reported_when_enabled() {
        let feedback = CopyFeedback::new(CopyOutcome::Failed, Instant::now());

        assert_eq!(feedback.message(true), "Copy failed");
        assert!(!feedback.is_positive(true));
    }

    #[test]
    fn test_failed_copy_shows_success_when_reporting_disabled() {
        let feedback = CopyFeedback::new(CopyOutcome::Failed, Instant::now());

        assert_eq!(feedback.message(false), "Copied!");
    }

    #[test]
    fn test_fallback_copy_counts_as_success() {
        let feedback = CopyFeedback::new(CopyOutcome::CopiedWithFallback, Instant::now());

        assert_eq!(feedback.message(true), "Copied!");
    }
}
