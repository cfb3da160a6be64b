use std::time::Duration;

/// Trailing-edge rate limiter driven by caller-supplied timestamps.
///
/// The first event, or one arriving after `delay` has passed since the last
/// firing, goes through at once. Events inside the window replace whatever
/// is pending and push the deadline to `now + delay`; `poll` releases the
/// newest one when that deadline passes.
#[derive(Debug)]
pub struct Throttle<T> {
    delay: Duration,
    last: Option<Duration>,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    at: Duration,
    deadline: Duration,
    value: T,
}

impl<T> Throttle<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: None,
            pending: None,
        }
    }

    pub fn push(&mut self, now: Duration, value: T) -> Option<T> {
        match self.last {
            Some(last) if now < last + self.delay => {
                self.pending = Some(Pending {
                    at: now,
                    deadline: now + self.delay,
                    value,
                });
                None
            }
            _ => {
                self.last = Some(now);
                Some(value)
            }
        }
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        let pending = self.pending.take()?;
        self.last = Some(pending.at);
        Some(pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending event, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
