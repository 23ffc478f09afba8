use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Receives human-readable status text. Must not block.
pub trait StatusSink: Send + Sync {
    fn report(&self, text: &str);
}

/// Forwards status text to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn report(&self, text: &str) {
        for line in text.lines() {
            info!(target: "tilesnap::status", "{}", line);
        }
    }
}

#[derive(Debug, Default)]
struct FeedState {
    text: String,
    last_report: Option<DateTime<Utc>>,
    total_reports: u64,
}

/// Status label text. A message arriving shortly after the previous one is
/// appended on a new line so that the press and its outcome are shown
/// together; otherwise the text is replaced.
#[derive(Debug)]
pub struct StatusFeed {
    coalesce_within: Duration,
    state: Mutex<FeedState>,
}

impl StatusFeed {
    pub const DEFAULT_COALESCE_MS: i64 = 100;

    pub fn new(coalesce_within: Duration) -> Self {
        Self {
            coalesce_within,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Record `text` as if reported at `at`
    pub fn report_at(&self, text: &str, at: DateTime<Utc>) {
        let mut state = self.lock();
        let coalesce = state
            .last_report
            .map(|last| at - last <= self.coalesce_within)
            .unwrap_or(false);

        if coalesce && !state.text.is_empty() {
            state.text.push('\n');
            state.text.push_str(text);
        } else {
            state.text = text.to_string();
        }
        state.last_report = Some(at);
        state.total_reports += 1;
    }

    /// Current label text
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn total_reports(&self) -> u64 {
        self.lock().total_reports
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatusFeed {
    fn default() -> Self {
        Self::new(Duration::milliseconds(Self::DEFAULT_COALESCE_MS))
    }
}

impl StatusSink for StatusFeed {
    fn report(&self, text: &str) {
        self.report_at(text, Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_close_together_are_appended() {
        let feed = StatusFeed::default();
        let start = Utc::now();
        feed.report_at("Pressed key: Ctrl+Alt+Shift+G", start);
        feed.report_at("App moved to: 0, 0", start + Duration::milliseconds(20));

        assert_eq!(feed.text(), "Pressed key: Ctrl+Alt+Shift+G\nApp moved to: 0, 0");
        assert_eq!(feed.total_reports(), 2);
    }

    #[test]
    fn test_messages_far_apart_replace_the_text() {
        let feed = StatusFeed::new(Duration::milliseconds(100));
        let start = Utc::now();
        feed.report_at("first", start);
        feed.report_at("second", start + Duration::seconds(2));

        assert_eq!(feed.text(), "second");
    }

    #[test]
    fn test_tracing_sink_accepts_multiline_text() {
        TracingStatusSink.report("Monitor res: 1920x1080\nApp moved to: 0, 0");
    }
}
