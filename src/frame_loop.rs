//! Frame loop: the Stopped/Running state machine and the scheduler it drives.
//!
//! The loop never blocks. It asks a [`FrameScheduler`] for the next display
//! frame and is told, via [`FrameLoop::begin_frame`], when that frame arrives.
//! In the browser the scheduler is `requestAnimationFrame`; tests use
//! [`ManualScheduler`] and fire frames by hand.

#[cfg(test)]
#[path = "frame_loop_test.rs"]
mod frame_loop_test;

/// Opaque id of a requested frame, as returned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Source of display-synchronized frame callbacks.
pub trait FrameScheduler {
    /// Request a callback on the next frame. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Loop state. `Running` carries the outstanding frame request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running(Option<FrameHandle>),
}

/// Start/stop guard around a [`FrameScheduler`].
///
/// At most one frame is ever outstanding, so start/stop can be called from
/// any event handler without double-scheduling.
#[derive(Debug, Default)]
pub struct FrameLoop<S> {
    scheduler: S,
    state: LoopState,
}

impl<S: FrameScheduler> FrameLoop<S> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self { scheduler, state: LoopState::Stopped }
    }

    /// Begin running. No-op if already running.
    ///
    /// Returns `true` if the loop transitioned to `Running`.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        match self.scheduler.request_frame() {
            Some(handle) => {
                self.state = LoopState::Running(Some(handle));
                log::debug!("frame loop: started");
                true
            }
            None => {
                log::warn!("frame loop: scheduler refused first frame");
                false
            }
        }
    }

    /// Stop running and cancel the outstanding frame. No-op if stopped.
    ///
    /// Returns `true` if the loop transitioned to `Stopped`.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            LoopState::Stopped => false,
            LoopState::Running(pending) => {
                if let Some(handle) = pending {
                    self.scheduler.cancel_frame(handle);
                }
                log::debug!("frame loop: stopped");
                true
            }
        }
    }

    /// Called when a scheduled frame fires. Returns `true` if the frame
    /// should be processed, consuming the outstanding request.
    pub fn begin_frame(&mut self) -> bool {
        match &mut self.state {
            LoopState::Running(pending @ Some(_)) => {
                *pending = None;
                true
            }
            _ => false,
        }
    }

    /// Request the next frame after one has been processed.
    ///
    /// Does nothing when stopped or when a request is already outstanding.
    /// A refused request stops the loop.
    pub fn schedule_next(&mut self) {
        let LoopState::Running(None) = self.state else {
            return;
        };
        match self.scheduler.request_frame() {
            Some(handle) => self.state = LoopState::Running(Some(handle)),
            None => {
                log::warn!("frame loop: scheduler refused next frame; stopping");
                self.state = LoopState::Stopped;
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// A scheduler driven by hand.
///
/// Holds at most one pending frame; [`ManualScheduler::fire`] consumes it the
/// way a display refresh would.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    requests: usize,
    cancels: usize,
    refuse: bool,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending frame, if any, as if the display just refreshed.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total frames requested so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Total cancellations so far.
    #[must_use]
    pub fn cancels(&self) -> usize {
        self.cancels
    }

    /// Make subsequent requests fail, as a host without frame support would.
    pub fn set_refuse(&mut self, refuse: bool) {
        self.refuse = refuse;
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.refuse {
            return None;
        }
        self.next_id += 1;
        self.requests += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancels += 1;
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
