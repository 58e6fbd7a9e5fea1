//! Token usage tracking for a session.

use crate::TokenUsage;

/// Tracks cumulative token usage and call outcomes.
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    /// Total usage across all successful calls.
    total: TokenUsage,
    /// Number of API calls made, successful or not.
    call_count: u64,
    /// Number of calls that ended in the fallback reply.
    failure_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from a successful API call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;
    }

    /// Record a call that produced no usable reply.
    pub fn record_failure(&mut self) {
        self.call_count += 1;
        self.failure_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
