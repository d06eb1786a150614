//! Navigation progress indicator state.
//!
//! The bar only appears when a loading phase has been pending for at least
//! [`SHOW_DELAY_MS`], so fast transitions never flash it. Timing is pure
//! (caller supplies "now") so the show/hide rules are testable natively.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

/// How long a loading phase must stay pending before the bar is shown.
pub const SHOW_DELAY_MS: f64 = 300.0;

/// Show-delay state for the progress indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressState {
    /// Timestamp (ms) at which the current loading phase began, if any.
    pub pending_since: Option<f64>,
    /// Whether the bar is currently shown.
    pub visible: bool,
}

impl ProgressState {
    /// A loading phase began. Repeated starts keep the original timestamp.
    pub fn loading_started(&mut self, now_ms: f64) {
        if self.pending_since.is_none() {
            self.pending_since = Some(now_ms);
        }
    }

    /// The loading phase ended; the bar hides immediately.
    pub fn loading_stopped(&mut self) {
        *self = Self::default();
    }

    /// Re-evaluate visibility at `now_ms` and return it.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if let Some(since) = self.pending_since {
            if now_ms - since >= SHOW_DELAY_MS {
                self.visible = true;
            }
        }
        self.visible
    }
}
