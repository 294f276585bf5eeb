//! Scroll stabilization state machine
//!
//! Fed one document height per scroll round. Stops after enough consecutive
//! rounds without growth, or at the round cap so infinite-scroll pages still
//! terminate.

use crate::config::ConvergenceSettings;

/// Outcome of one observed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollVerdict {
    /// Keep scrolling
    Continue,
    /// Height held for the required number of rounds
    Stable,
    /// Round cap hit before the height settled
    RoundCapReached,
}

#[derive(Debug, Clone)]
pub struct ScrollStabilizer {
    max_height: f64,
    stable_rounds: u32,
    rounds: u32,
    tolerance_px: f64,
    stable_rounds_required: u32,
    max_rounds: u32,
}

impl ScrollStabilizer {
    #[must_use]
    pub fn new(initial_height: f64, settings: &ConvergenceSettings) -> Self {
        Self::with_limits(
            initial_height,
            settings.height_tolerance_px,
            settings.stable_rounds_required,
            settings.max_scroll_rounds,
        )
    }

    #[must_use]
    pub fn with_limits(
        initial_height: f64,
        tolerance_px: f64,
        stable_rounds_required: u32,
        max_rounds: u32,
    ) -> Self {
        Self {
            max_height: if initial_height.is_finite() { initial_height } else { 0.0 },
            stable_rounds: 0,
            rounds: 0,
            tolerance_px,
            stable_rounds_required: stable_rounds_required.max(1),
            max_rounds: max_rounds.max(1),
        }
    }

    /// Record the height reached by one full scroll pass
    pub fn observe(&mut self, height: f64) -> ScrollVerdict {
        self.rounds += 1;

        if height > self.max_height + self.tolerance_px {
            self.max_height = height;
            self.stable_rounds = 0;
        } else {
            self.stable_rounds += 1;
        }

        if self.stable_rounds >= self.stable_rounds_required {
            ScrollVerdict::Stable
        } else if self.rounds >= self.max_rounds {
            ScrollVerdict::RoundCapReached
        } else {
            ScrollVerdict::Continue
        }
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn stable_rounds(&self) -> u32 {
        self.stable_rounds
    }
}
