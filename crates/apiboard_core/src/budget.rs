use std::time::{Duration, Instant};

pub const HOUR: Duration = Duration::from_secs(60 * 60);

/// Client-side mirror of an upstream call quota.
///
/// The window opens on the first consumption (or forced exhaustion) and the
/// full allowance comes back once it has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBudget {
    limit: u32,
    remaining: u32,
    window: Duration,
    window_started: Option<Instant>,
}

impl CallBudget {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            remaining: limit,
            window,
            window_started: None,
        }
    }

    pub fn hourly(limit: u32) -> Self {
        Self::new(limit, HOUR)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Calls left at `now`, accounting for an elapsed window.
    pub fn remaining_at(&self, now: Instant) -> u32 {
        if self.window_elapsed(now) {
            self.limit
        } else {
            self.remaining
        }
    }

    pub fn is_exhausted_at(&self, now: Instant) -> bool {
        self.remaining_at(now) == 0
    }

    pub(crate) fn refresh(&mut self, now: Instant) {
        if self.window_elapsed(now) {
            self.remaining = self.limit;
            self.window_started = None;
        }
    }

    pub(crate) fn consume(&mut self, now: Instant) {
        self.refresh(now);
        self.remaining = self.remaining.saturating_sub(1);
        self.window_started.get_or_insert(now);
    }

    pub(crate) fn exhaust(&mut self, now: Instant) {
        self.refresh(now);
        self.remaining = 0;
        self.window_started.get_or_insert(now);
    }

    fn window_elapsed(&self, now: Instant) -> bool {
        self.window_started
            .is_some_and(|started| now.saturating_duration_since(started) >= self.window)
    }

    pub(crate) fn exhausted_message(&self) -> String {
        format!(
            "Call limit reached ({} per {}). Try again later.",
            self.limit,
            describe_window(self.window)
        )
    }
}

fn describe_window(window: Duration) -> String {
    let secs = window.as_secs();
    match secs {
        3600 => "hour".to_string(),
        s if s > 3600 && s % 3600 == 0 => format!("{} hours", s / 3600),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{s} seconds"),
    }
}
