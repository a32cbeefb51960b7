/// Quiet-period timer that holds the most recent pending value.
///
/// Each [`queue`](Self::queue) replaces the pending value and restarts the
/// quiet period, so a burst of edits produces a single ready value once
/// `delay_ms` passes without another edit. Time is supplied by the caller
/// as milliseconds since an arbitrary epoch.
#[derive(Debug, Clone)]
pub struct Coalescer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Coalescer<T> {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period at `now_ms`.
    pub fn queue(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Take the pending value once the quiet period has elapsed.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<T> {
        let (_, queued_at) = self.pending.as_ref()?;
        if now_ms.saturating_sub(*queued_at) >= self.delay_ms {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Take the pending value immediately, ignoring the quiet period.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes ready, if any.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, queued_at)| queued_at.saturating_add(self.delay_ms))
    }
}
