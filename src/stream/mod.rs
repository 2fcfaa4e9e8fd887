//! Live data stream: a bounded buffer fed by a background producer.
//!
//! Two threads back a [`DataStream`]: the producer, which owns the sample
//! generator, and the controller, which is the only writer of the buffer.
//! Readers take the buffer's read lock and only ever see committed
//! mutations.

pub mod buffer;
pub mod controller;
pub mod generator;
pub mod producer;
pub mod protocol;

pub use buffer::{
    AppendOutcome, GrowOutcome, ShrinkOutcome, StreamBuffer, DEFAULT_GROW_INCREMENT,
    DEFAULT_MAX_POINTS,
};
pub use controller::{ResponseOutcome, StreamCommand, StreamController};
pub use generator::{generate_initial_dataset, now_ms, SampleGenerator, SAMPLE_INTERVAL_MS};
pub use producer::{ProducerHandle, ProducerState};
pub use protocol::{ProducerRequest, ProducerResponse, Tagged};

use crate::aggregation::AggregationPeriod;
use crate::config::StreamConfig;
use crate::data_types::DataPoint;
use crossbeam_channel::{after, never, select, tick, unbounded, Receiver, Sender};
use eyre::WrapErr;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Aggregation result computed off the controller thread.
#[derive(Clone, Debug)]
pub struct AggregateSnapshot {
    pub period: AggregationPeriod,
    /// Buffer revision the result was computed from.
    pub revision: u64,
    pub data: Arc<Vec<DataPoint>>,
}

/// State shared between the controller thread and readers.
#[derive(Debug)]
pub struct StreamShared {
    pub buffer: RwLock<StreamBuffer>,
    pub streaming: AtomicBool,
    pub epoch: AtomicU64,
    pub aggregation: RwLock<AggregationPeriod>,
    pub aggregate: RwLock<Option<AggregateSnapshot>>,
}

impl StreamShared {
    pub fn new(max_points: usize) -> Self {
        Self {
            buffer: RwLock::new(StreamBuffer::new(max_points)),
            streaming: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            aggregation: RwLock::new(AggregationPeriod::None),
            aggregate: RwLock::new(None),
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    /// Latest offloaded aggregation for `period`, if one was published.
    pub fn aggregate_for(&self, period: AggregationPeriod) -> Option<AggregateSnapshot> {
        self.aggregate
            .read()
            .as_ref()
            .filter(|snapshot| snapshot.period == period)
            .cloned()
    }
}

/// Handle to a running stream.
///
/// Commands are fire-and-forget and applied in order by the controller
/// thread. Dropping the handle stops both threads.
pub struct DataStream {
    shared: Arc<StreamShared>,
    commands: Sender<StreamCommand>,
    worker: Option<JoinHandle<()>>,
    initial_count: usize,
    grow_increment: usize,
}

impl DataStream {
    pub fn spawn(config: &StreamConfig) -> eyre::Result<Self> {
        let shared = Arc::new(StreamShared::new(config.max_points));

        let producer = ProducerHandle::spawn(ProducerState::new(
            SampleGenerator::from_optional_seed(config.seed),
        ))?;
        let mut controller = StreamController::new(
            shared.clone(),
            SampleGenerator::from_optional_seed(config.seed.map(|s| s.wrapping_add(1))),
        );
        for request in controller.start(config.initial_count) {
            producer.send(request);
        }

        let (command_tx, command_rx) = unbounded();
        let timing = WorkerTiming {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            auto_start_delay: Duration::from_millis(config.auto_start_delay_ms),
        };
        let worker = thread::Builder::new()
            .name("stream-controller".into())
            .spawn(move || run_controller(controller, producer, command_rx, timing))
            .wrap_err("failed to spawn stream controller thread")?;

        tracing::info!(
            initial_count = config.initial_count,
            max_points = config.max_points,
            "data stream spawned"
        );

        Ok(Self {
            shared,
            commands: command_tx,
            worker: Some(worker),
            initial_count: config.initial_count,
            grow_increment: config.grow_increment,
        })
    }

    pub fn shared(&self) -> &Arc<StreamShared> {
        &self.shared
    }

    /// Read access to the buffer. Hold it only for the duration of a read.
    pub fn buffer(&self) -> RwLockReadGuard<'_, StreamBuffer> {
        self.shared.buffer.read()
    }

    pub fn is_streaming(&self) -> bool {
        self.shared.is_streaming()
    }

    pub fn aggregation(&self) -> AggregationPeriod {
        *self.shared.aggregation.read()
    }

    pub fn set_streaming(&self, on: bool) {
        self.send(StreamCommand::SetStreaming(on));
    }

    pub fn toggle_streaming(&self) {
        self.send(StreamCommand::ToggleStreaming);
    }

    /// Grows by the configured increment.
    pub fn grow(&self) {
        self.grow_by(self.grow_increment);
    }

    pub fn grow_by(&self, n: usize) {
        self.send(StreamCommand::Grow(n));
    }

    pub fn shrink(&self) {
        self.send(StreamCommand::Shrink);
    }

    /// Resets to the configured initial size.
    pub fn reset(&self) {
        self.reset_to(self.initial_count);
    }

    pub fn reset_to(&self, count: usize) {
        self.send(StreamCommand::Reset(count));
    }

    pub fn set_aggregation(&self, period: AggregationPeriod) {
        self.send(StreamCommand::SetAggregation(period));
    }

    fn send(&self, command: StreamCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("stream controller is gone, command dropped");
        }
    }
}

impl Drop for DataStream {
    fn drop(&mut self) {
        if self.commands.send(StreamCommand::Shutdown).is_err() {
            tracing::warn!("stream controller already stopped");
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("stream controller thread panicked");
            }
        }
        tracing::info!("data stream shut down");
    }
}

struct WorkerTiming {
    tick_interval: Duration,
    auto_start_delay: Duration,
}

fn run_controller(
    mut controller: StreamController,
    producer: ProducerHandle,
    commands: Receiver<StreamCommand>,
    timing: WorkerTiming,
) {
    let ticker = tick(timing.tick_interval);
    let auto_start = after(timing.auto_start_delay);
    let idle_ticks = never();
    let idle_responses = never();
    let mut producer_alive = true;

    loop {
        // Stopping swaps the ticker out, so no tick is delivered after stop.
        let ticks = if controller.is_streaming() {
            &ticker
        } else {
            &idle_ticks
        };
        let responses = if producer_alive {
            producer.responses()
        } else {
            &idle_responses
        };

        let requests = select! {
            recv(commands) -> command => match command {
                Ok(StreamCommand::Shutdown) | Err(_) => break,
                Ok(command) => controller.handle_command(command),
            },
            recv(responses) -> response => match response {
                Ok(response) => controller.handle_response(response).1,
                Err(_) => {
                    tracing::warn!("producer disconnected, responses ignored");
                    producer_alive = false;
                    Vec::new()
                }
            },
            recv(ticks) -> _ => controller.on_tick(),
            recv(auto_start) -> _ => controller.on_auto_start(),
        };

        for request in requests {
            producer.send(request);
        }
    }

    controller.handle_command(StreamCommand::Shutdown);
    tracing::debug!("stream controller stopped");
}
