//! Self-rescheduling draw cycle for one chart instance.
//!
//! The loop only decides *whether* another cycle may be scheduled; the
//! scheduling itself is done by the view (on the next display frame), which
//! keeps the cadence vsync-paced and this state machine testable.

use crate::performance::PerformanceMonitor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable cancellation flag shared between a loop and its owner.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Scheduled,
    Drawing,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleReport {
    pub elapsed: Duration,
    /// Whether the next cycle was scheduled.
    pub rescheduled: bool,
}

impl CycleReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// `Idle -> Scheduled -> Drawing -> Scheduled -> ...`, until cancelled.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    token: CancellationToken,
    cycles: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            state: LoopState::Idle,
            token,
            cycles: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == LoopState::Cancelled || self.token.is_cancelled()
    }

    /// Schedules the first cycle. Returns `false` if the loop is already
    /// running or was cancelled.
    pub fn start(&mut self) -> bool {
        if self.is_cancelled() {
            self.state = LoopState::Cancelled;
            return false;
        }
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Scheduled;
        true
    }

    /// Enters a scheduled cycle. `false` means the cycle must not draw.
    pub fn begin_cycle(&mut self) -> bool {
        if self.is_cancelled() {
            self.state = LoopState::Cancelled;
            return false;
        }
        if self.state != LoopState::Scheduled {
            return false;
        }
        self.state = LoopState::Drawing;
        true
    }

    /// Leaves the drawing state. Returns whether the next cycle may be
    /// scheduled; the token is checked here, before rescheduling.
    pub fn finish_cycle(&mut self) -> bool {
        if self.state == LoopState::Drawing {
            self.cycles += 1;
        }
        if self.is_cancelled() {
            self.state = LoopState::Cancelled;
            return false;
        }
        self.state = LoopState::Scheduled;
        true
    }

    /// One full cycle around `draw`: times it and feeds the monitor.
    /// `None` when the cycle did not run.
    pub fn run_cycle<T>(
        &mut self,
        monitor: &PerformanceMonitor,
        draw: impl FnOnce() -> T,
    ) -> Option<(T, CycleReport)> {
        if !self.begin_cycle() {
            return None;
        }
        let started = Instant::now();
        let output = draw();
        let elapsed = started.elapsed();
        let report = CycleReport {
            elapsed,
            rescheduled: false,
        };
        monitor.record_render_time(report.elapsed_ms());
        monitor.update_frame();
        let rescheduled = self.finish_cycle();
        tracing::trace!(elapsed_ms = report.elapsed_ms(), rescheduled, "render cycle");
        Some((
            output,
            CycleReport {
                rescheduled,
                ..report
            },
        ))
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
        self.state = LoopState::Cancelled;
    }
}
