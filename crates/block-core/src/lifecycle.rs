//! Preview lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle phases for a block preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Preview became active; the first fetch is issued immediately.
    Activated,
    /// A fetch was issued with the given token.
    FetchIssued(u64),
    /// The fetch with the given token settled and mutated state.
    FetchResolved(u64),
    /// A superseded fetch settled and its outcome was discarded.
    FetchDiscarded(u64),
    /// Preview was torn down; later resolutions are discarded.
    Deactivated,
}

/// Timing context for fetch observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Mark a fetch as issued.
    pub fn mark_fetch_issued(&mut self, token: u64) {
        self.mark(&format!("fetch_{}_issued", token));
    }

    /// Mark a fetch as settled.
    pub fn mark_fetch_settled(&mut self, token: u64) {
        self.mark(&format!("fetch_{}_settled", token));
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the offset of a named mark from start.
    pub fn offset(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Get time from start until the first fetch settled.
    pub fn time_to_first_render(&self) -> Option<Duration> {
        self.marks
            .iter()
            .filter(|(k, _)| k.starts_with("fetch_") && k.ends_with("_settled"))
            .map(|(_, t)| t.duration_since(self.start))
            .min()
    }

    /// Get issue-to-settle timing for a fetch token.
    pub fn fetch_timing(&self, token: u64) -> Option<Duration> {
        let issued = self.marks.get(&format!("fetch_{}_issued", token))?;
        let settled = self.marks.get(&format!("fetch_{}_settled", token))?;
        Some(settled.duration_since(*issued))
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer trait for lifecycle events.
pub trait LifecycleObserver: Send + Sync {
    /// Called when a lifecycle phase occurs.
    fn on_phase(&self, phase: LifecyclePhase, elapsed: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    // === TimingContext Tests ===

    #[test]
    fn test_timing_fetch_marks() {
        let mut timing = TimingContext::new();
        timing.mark_fetch_issued(1);
        timing.mark_fetch_settled(1);

        assert!(timing.offset("fetch_1_issued").is_some());
        assert!(timing.fetch_timing(1).is_some());
        assert!(timing.fetch_timing(2).is_none());
    }

    #[test]
    fn test_time_to_first_render() {
        let mut timing = TimingContext::new();
        assert!(timing.time_to_first_render().is_none());

        timing.mark_fetch_issued(1);
        assert!(timing.time_to_first_render().is_none());

        timing.mark_fetch_settled(1);
        timing.mark_fetch_settled(2);
        let first = timing.time_to_first_render().unwrap();
        assert!(first <= timing.elapsed());
    }

    #[test]
    fn test_offset_unknown_mark() {
        let timing = TimingContext::new();
        assert!(timing.offset("missing").is_none());
    }
}
