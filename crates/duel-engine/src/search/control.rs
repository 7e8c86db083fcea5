//! Search control: the wall-clock deadline and its safety margin.

use std::time::{Duration, Instant};

/// Point in time by which a move must be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }
}

/// Decides when a search must stop expanding nodes.
///
/// The search stops once the time left before the deadline drops below the
/// safety margin, leaving the margin for unwinding and reporting the move.
/// An unlimited control never stops.
#[derive(Debug, Clone)]
pub struct SearchControl {
    deadline: Option<Deadline>,
    margin: Duration,
    start: Instant,
}

impl SearchControl {
    /// Control for a search that must finish `margin` before `deadline`.
    pub fn new(deadline: Deadline, margin: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            margin,
            start: Instant::now(),
        }
    }

    /// Control without time pressure.
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            margin: Duration::ZERO,
            start: Instant::now(),
        }
    }

    /// Whether the remaining time has fallen to the safety margin.
    pub fn out_of_time(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline.remaining() <= self.margin)
    }

    /// Usable time left above the safety margin, `None` when unlimited.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.remaining().saturating_sub(self.margin))
    }

    /// Elapsed time since this control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Control limited to `percent` of the usable time left.
    ///
    /// The slice never outlives the parent: its deadline lies at or before
    /// the parent's and it keeps the same margin.
    pub fn slice(&self, percent: u8) -> SearchControl {
        let Some(usable) = self.remaining() else {
            return SearchControl::unlimited();
        };
        let share = usable.mul_f64(f64::from(percent.min(100)) / 100.0);
        SearchControl {
            deadline: Some(Deadline::after(share + self.margin)),
            margin: self.margin,
            start: Instant::now(),
        }
    }
}
