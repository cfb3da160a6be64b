use std::time::Duration;

/// Ticket for one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's once-per-refresh callback source.
///
/// After `request_frame` the host calls back into the controller with the
/// returned handle and a monotonic timestamp.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame pacing: turns display refreshes into moves at most every `speed`.
#[derive(Debug)]
pub struct AnimationDriver {
    speed: Duration,
    pending: Option<FrameHandle>,
    anchor: Option<Duration>,
}

impl AnimationDriver {
    pub fn new(speed: Duration) -> Self {
        Self {
            speed,
            pending: None,
            anchor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns false when already running.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Returns false when already stopped.
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };
        scheduler.cancel_frame(handle);
        self.anchor = None;
        true
    }

    /// Handles a delivered frame and says whether a tick is due.
    ///
    /// The first frame after a tick only sets the anchor, so the gap is
    /// measured from the frame following a tick. Frames for a handle other
    /// than the pending one are ignored and not rescheduled.
    pub fn on_frame<F: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut F,
        handle: FrameHandle,
        timestamp: Duration,
    ) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        let anchor = *self.anchor.get_or_insert(timestamp);
        let due = timestamp.saturating_sub(anchor) >= self.speed;
        if due {
            self.anchor = None;
        }
        self.pending = Some(scheduler.request_frame());
        due
    }
}
