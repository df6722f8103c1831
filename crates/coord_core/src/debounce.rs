use std::time::Duration;

/// Timer the runtime must schedule on behalf of a [`Debounced`] value.
///
/// Only the most recently issued generation can ever be applied; older
/// timers that still fire are ignored by [`Debounced::elapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    pub generation: u64,
    pub delay: Duration,
}

/// A value that follows its source only after the source has been quiet for
/// the requested delay.
///
/// The struct holds no clock. `push` hands back a [`DebounceTimer`] and the
/// owner reports the fired timer through `elapse`. Every push restarts the
/// timer (last write wins), so the delay may change from one push to the
/// next without ever producing two live timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    output: T,
    pending: Option<(u64, T)>,
    generation: u64,
    torn_down: bool,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T) -> Self {
        Self {
            output: initial,
            pending: None,
            generation: 0,
            torn_down: false,
        }
    }

    /// Current debounced output.
    pub fn value(&self) -> &T {
        &self.output
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Generation of the pending timer, if any.
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|(generation, _)| *generation)
    }

    /// Records a new source value and restarts the quiet period.
    pub fn push(&mut self, value: T, delay: Duration) -> Option<DebounceTimer> {
        if self.torn_down {
            return None;
        }
        self.generation += 1;
        self.pending = Some((self.generation, value));
        Some(DebounceTimer {
            generation: self.generation,
            delay,
        })
    }

    /// Applies a fired timer. Returns the new output when it differs from
    /// the previous one.
    pub fn elapse(&mut self, generation: u64) -> Option<T> {
        if self.torn_down || self.pending_generation() != Some(generation) {
            return None;
        }
        let (_, value) = self.pending.take()?;
        if value == self.output {
            return None;
        }
        self.output = value.clone();
        Some(value)
    }

    /// Sets the output directly and drops any pending timer.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.output = value;
    }

    /// Cancels the pending timer and stops accepting new ones.
    ///
    /// Returns true when a timer was pending.
    pub fn teardown(&mut self) -> bool {
        self.torn_down = true;
        self.pending.take().is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
