//! Frame-rate and render-time measurement.
//!
//! One monitor is shared by every chart on a dashboard, so the frame count
//! (and therefore FPS) is global to the dashboard rather than per chart.

use crate::data_types::PerformanceSnapshot;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessExt, System, SystemExt};

/// Render durations kept for the rolling mean.
pub const RENDER_TIME_WINDOW: usize = 60;
/// Published FPS never exceeds this.
pub const FPS_CAP: u32 = 60;
/// FPS samples kept for the overlay history.
pub const FPS_HISTORY_LEN: usize = 60;
/// Minimum interval over which frames are counted.
pub const FPS_INTERVAL: Duration = Duration::from_millis(1000);

/// Overlay colour band for a frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpsLevel {
    Good,
    Fair,
    Poor,
}

impl FpsLevel {
    pub fn of(fps: f64) -> Self {
        if fps >= 55.0 {
            Self::Good
        } else if fps >= 30.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Best-effort resident memory of the current process.
pub struct MemoryProbe {
    system: System,
    pid: Option<Pid>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                tracing::debug!("memory usage unavailable: {err}");
                None
            }
        };
        Self {
            system: System::new(),
            pid,
        }
    }

    /// Megabytes in use, or 0 when the platform cannot tell.
    pub fn usage_mb(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };
        if !self.system.refresh_process(pid) {
            return 0;
        }
        self.system
            .process(pid)
            .map(|p| p.memory() / (1024 * 1024))
            .unwrap_or(0)
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

struct MonitorState {
    frame_count: u32,
    window_start: Instant,
    fps: u32,
    render_times: VecDeque<f64>,
    data_point_count: usize,
    latest: PerformanceSnapshot,
    fps_history: VecDeque<u32>,
}

/// Turns frame ticks and render durations into [`PerformanceSnapshot`]s.
///
/// Feed it with [`update_frame`](Self::update_frame) and
/// [`record_render_time`](Self::record_render_time) from render cycles and
/// call [`sample`](Self::sample) once per second.
pub struct PerformanceMonitor {
    state: Mutex<MonitorState>,
    memory: Mutex<Option<MemoryProbe>>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_probe(Some(MemoryProbe::new()), Instant::now())
    }

    /// Reports 0 MB memory. Timing starts at `start`.
    pub fn without_memory_probe(start: Instant) -> Self {
        Self::with_probe(None, start)
    }

    fn with_probe(probe: Option<MemoryProbe>, start: Instant) -> Self {
        Self {
            state: Mutex::new(MonitorState {
                frame_count: 0,
                window_start: start,
                fps: FPS_CAP,
                render_times: VecDeque::with_capacity(RENDER_TIME_WINDOW),
                data_point_count: 0,
                latest: PerformanceSnapshot::default(),
                fps_history: VecDeque::with_capacity(FPS_HISTORY_LEN),
            }),
            memory: Mutex::new(probe),
        }
    }

    /// Counts one rendered frame.
    pub fn update_frame(&self) {
        self.update_frame_at(Instant::now());
    }

    /// Counts one frame at `now`. Once at least a second has passed since
    /// the last measurement, FPS is recomputed and the counter restarts.
    pub fn update_frame_at(&self, now: Instant) {
        let mut state = self.state.lock();
        state.frame_count += 1;
        let elapsed = now.saturating_duration_since(state.window_start);
        if elapsed >= FPS_INTERVAL {
            let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
            state.fps = (state.frame_count as f64 * 1000.0 / elapsed_ms).round() as u32;
            state.frame_count = 0;
            state.window_start = now;
        }
    }

    pub fn record_render_time(&self, ms: f64) {
        let mut state = self.state.lock();
        if state.render_times.len() == RENDER_TIME_WINDOW {
            state.render_times.pop_front();
        }
        state.render_times.push_back(ms);
    }

    pub fn set_data_point_count(&self, count: usize) {
        self.state.lock().data_point_count = count;
    }

    /// Last measured FPS, uncapped.
    pub fn raw_fps(&self) -> u32 {
        self.state.lock().fps
    }

    /// Builds a fresh snapshot without publishing it.
    pub fn snapshot(&self) -> PerformanceSnapshot {
        let memory_usage_mb = self
            .memory
            .lock()
            .as_mut()
            .map(MemoryProbe::usage_mb)
            .unwrap_or(0);
        let state = self.state.lock();
        Self::build_snapshot(&state, memory_usage_mb)
    }

    /// Builds a snapshot, publishes it as [`latest`](Self::latest) and adds
    /// its FPS to the history.
    pub fn sample(&self) -> PerformanceSnapshot {
        let snapshot = self.snapshot();
        let mut state = self.state.lock();
        state.latest = snapshot;
        if state.fps_history.len() == FPS_HISTORY_LEN {
            state.fps_history.pop_front();
        }
        state.fps_history.push_back(snapshot.fps);
        tracing::trace!(?snapshot, "performance sampled");
        snapshot
    }

    pub fn latest(&self) -> PerformanceSnapshot {
        self.state.lock().latest
    }

    pub fn fps_history(&self) -> Vec<u32> {
        self.state.lock().fps_history.iter().copied().collect()
    }

    /// Mean of the FPS history to one decimal; the latest FPS when the
    /// history is empty.
    pub fn average_fps(&self) -> f64 {
        let state = self.state.lock();
        if state.fps_history.is_empty() {
            return state.latest.fps as f64;
        }
        let sum: u64 = state.fps_history.iter().map(|&f| f as u64).sum();
        let mean = sum as f64 / state.fps_history.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    fn build_snapshot(state: &MonitorState, memory_usage_mb: u64) -> PerformanceSnapshot {
        let render_time_ms = if state.render_times.is_empty() {
            0.0
        } else {
            let mean = state.render_times.iter().sum::<f64>() / state.render_times.len() as f64;
            (mean * 100.0).round() / 100.0
        };
        PerformanceSnapshot {
            fps: state.fps.min(FPS_CAP),
            memory_usage_mb,
            render_time_ms,
            data_point_count: state.data_point_count,
        }
    }
}
