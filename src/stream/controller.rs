use super::buffer::{AppendOutcome, GrowOutcome, ShrinkOutcome};
use super::generator::SampleGenerator;
use super::protocol::{ProducerRequest, ProducerResponse, Tagged};
use super::{AggregateSnapshot, StreamShared};
use crate::aggregation::AggregationPeriod;
use crate::data_types::DataPoint;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// User-issued mutations, applied strictly in the order received.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamCommand {
    SetStreaming(bool),
    ToggleStreaming,
    Grow(usize),
    Shrink,
    Reset(usize),
    SetAggregation(AggregationPeriod),
    Shutdown,
}

/// What happened to a producer response.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseOutcome {
    /// Initial batch installed.
    Initialized { len: usize },
    Appended(AppendOutcome),
    /// Aggregation result published.
    Published { revision: u64 },
    /// Tagged with a superseded epoch, or no longer wanted.
    Stale,
}

/// Single writer of the stream buffer.
///
/// Holds no channels: every entry point returns the producer requests to
/// send, already tagged with the current epoch, so the state machine can be
/// driven directly in tests.
pub struct StreamController<R = StdRng> {
    shared: Arc<StreamShared>,
    generator: SampleGenerator<R>,
    epoch: u64,
    /// Epoch of the outstanding `GENERATE_INITIAL`. Only a reset replaces
    /// it, so stopping the stream never drops the first batch.
    initial_epoch: Option<u64>,
    streaming: bool,
    auto_start_pending: bool,
    point_in_flight: bool,
    aggregate_in_flight: bool,
    aggregate_dirty: bool,
    aggregation: AggregationPeriod,
}

impl<R: Rng> StreamController<R> {
    pub fn new(shared: Arc<StreamShared>, generator: SampleGenerator<R>) -> Self {
        Self {
            shared,
            generator,
            epoch: 0,
            initial_epoch: None,
            streaming: false,
            auto_start_pending: true,
            point_in_flight: false,
            aggregate_in_flight: false,
            aggregate_dirty: false,
            aggregation: AggregationPeriod::None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn point_in_flight(&self) -> bool {
        self.point_in_flight
    }

    pub fn shared(&self) -> &Arc<StreamShared> {
        &self.shared
    }

    /// Requests the first batch.
    pub fn start(&mut self, initial_count: usize) -> Vec<Tagged<ProducerRequest>> {
        vec![self.request_initial(initial_count)]
    }

    pub fn handle_command(&mut self, command: StreamCommand) -> Vec<Tagged<ProducerRequest>> {
        tracing::trace!(?command, "stream command");
        match command {
            StreamCommand::SetStreaming(on) => {
                self.auto_start_pending = false;
                self.set_streaming(on);
                Vec::new()
            }
            StreamCommand::ToggleStreaming => {
                self.auto_start_pending = false;
                self.set_streaming(!self.streaming);
                Vec::new()
            }
            StreamCommand::Grow(n) => self.grow(n),
            StreamCommand::Shrink => self.shrink(),
            StreamCommand::Reset(count) => self.reset(count),
            StreamCommand::SetAggregation(period) => self.set_aggregation(period),
            StreamCommand::Shutdown => {
                self.set_streaming(false);
                Vec::new()
            }
        }
    }

    /// Fixed-cadence tick. Asks for the next point unless one is already on
    /// its way.
    pub fn on_tick(&mut self) -> Vec<Tagged<ProducerRequest>> {
        if !self.streaming || self.point_in_flight {
            return Vec::new();
        }
        let last = self.shared.buffer.read().last_timestamp();
        let Some(last_timestamp) = last else {
            tracing::trace!("tick on empty buffer ignored");
            return Vec::new();
        };
        self.point_in_flight = true;
        vec![self.tag(ProducerRequest::GeneratePoint { last_timestamp })]
    }

    /// One-shot delayed start; ignored once the caller has chosen a state.
    pub fn on_auto_start(&mut self) -> Vec<Tagged<ProducerRequest>> {
        if self.auto_start_pending {
            self.auto_start_pending = false;
            tracing::info!("streaming auto-started");
            self.set_streaming(true);
        }
        Vec::new()
    }

    pub fn handle_response(
        &mut self,
        response: Tagged<ProducerResponse>,
    ) -> (ResponseOutcome, Vec<Tagged<ProducerRequest>>) {
        let Tagged { epoch, message } = response;
        // Aggregation results are matched by revision, not epoch.
        let message = match message {
            ProducerResponse::Aggregated {
                data,
                period_ms,
                revision,
            } => return self.publish_aggregate(data, period_ms, revision),
            ProducerResponse::InitialData { data, .. } => {
                let outcome = self.install_initial(epoch, data);
                let requests = match outcome {
                    ResponseOutcome::Initialized { .. } => self.after_mutation(),
                    _ => Vec::new(),
                };
                return (outcome, requests);
            }
            other => other,
        };

        if epoch != self.epoch {
            tracing::debug!(
                epoch,
                current = self.epoch,
                kind = message.kind(),
                "stale producer response discarded"
            );
            return (ResponseOutcome::Stale, Vec::new());
        }

        match message {
            ProducerResponse::NewPoint { point, total_count } => {
                self.point_in_flight = false;
                if !self.streaming {
                    return (ResponseOutcome::Stale, Vec::new());
                }
                let outcome = self.shared.buffer.write().push(point);
                tracing::trace!(?outcome, producer_total = total_count, "point applied");
                if !outcome.is_appended() {
                    tracing::debug!(?outcome, "point not appended");
                    return (ResponseOutcome::Appended(outcome), Vec::new());
                }
                (ResponseOutcome::Appended(outcome), self.after_mutation())
            }
            ProducerResponse::InitialData { .. } | ProducerResponse::Aggregated { .. } => {
                (ResponseOutcome::Stale, Vec::new())
            }
        }
    }

    fn install_initial(&mut self, epoch: u64, data: Vec<DataPoint>) -> ResponseOutcome {
        if self.initial_epoch != Some(epoch) {
            tracing::debug!(
                epoch,
                expected = ?self.initial_epoch,
                "stale initial batch discarded"
            );
            return ResponseOutcome::Stale;
        }
        self.initial_epoch = None;
        let len = {
            let mut buffer = self.shared.buffer.write();
            buffer.replace(data);
            buffer.len()
        };
        // Drop results computed from the previous contents.
        *self.shared.aggregate.write() = None;
        ResponseOutcome::Initialized { len }
    }

    fn set_streaming(&mut self, on: bool) {
        if self.streaming == on {
            return;
        }
        self.streaming = on;
        self.shared.streaming.store(on, Ordering::Release);
        if !on {
            // Anything still in flight belongs to the old run.
            self.advance_epoch();
        }
        tracing::info!(streaming = on, "streaming state changed");
    }

    fn grow(&mut self, n: usize) -> Vec<Tagged<ProducerRequest>> {
        let outcome = self.shared.buffer.write().grow(&mut self.generator, n);
        match outcome {
            GrowOutcome::Grown { .. } => {
                // The pending point would extend a timestamp that is no
                // longer the newest.
                if self.point_in_flight {
                    self.advance_epoch();
                }
                self.after_mutation()
            }
            GrowOutcome::NothingToGrow => Vec::new(),
        }
    }

    fn shrink(&mut self) -> Vec<Tagged<ProducerRequest>> {
        let outcome = self.shared.buffer.write().shrink();
        match outcome {
            ShrinkOutcome::Shrunk { .. } => self.after_mutation(),
            ShrinkOutcome::NothingToShrink => Vec::new(),
        }
    }

    fn reset(&mut self, count: usize) -> Vec<Tagged<ProducerRequest>> {
        self.auto_start_pending = false;
        self.set_streaming(false);
        self.advance_epoch();
        tracing::debug!(count, epoch = self.epoch, "stream reset requested");
        vec![self.request_initial(count)]
    }

    fn request_initial(&mut self, count: usize) -> Tagged<ProducerRequest> {
        self.initial_epoch = Some(self.epoch);
        self.tag(ProducerRequest::GenerateInitial { count })
    }

    fn set_aggregation(&mut self, period: AggregationPeriod) -> Vec<Tagged<ProducerRequest>> {
        if self.aggregation == period {
            return Vec::new();
        }
        self.aggregation = period;
        *self.shared.aggregation.write() = period;
        if period.period_ms().is_none() {
            *self.shared.aggregate.write() = None;
            self.aggregate_dirty = false;
            return Vec::new();
        }
        self.request_aggregate()
    }

    fn after_mutation(&mut self) -> Vec<Tagged<ProducerRequest>> {
        if self.aggregation.period_ms().is_none() {
            return Vec::new();
        }
        self.request_aggregate()
    }

    fn request_aggregate(&mut self) -> Vec<Tagged<ProducerRequest>> {
        let Some(period_ms) = self.aggregation.period_ms() else {
            return Vec::new();
        };
        if self.aggregate_in_flight {
            self.aggregate_dirty = true;
            return Vec::new();
        }
        let (data, revision) = {
            let buffer = self.shared.buffer.read();
            if buffer.is_empty() {
                return Vec::new();
            }
            (buffer.to_vec(), buffer.revision())
        };
        self.aggregate_in_flight = true;
        self.aggregate_dirty = false;
        vec![self.tag(ProducerRequest::Aggregate {
            data,
            period_ms,
            revision,
        })]
    }

    fn publish_aggregate(
        &mut self,
        data: Vec<DataPoint>,
        period_ms: i64,
        revision: u64,
    ) -> (ResponseOutcome, Vec<Tagged<ProducerRequest>>) {
        self.aggregate_in_flight = false;
        let follow_up = if self.aggregate_dirty {
            self.request_aggregate()
        } else {
            Vec::new()
        };
        if self.aggregation.period_ms() != Some(period_ms) {
            return (ResponseOutcome::Stale, follow_up);
        }
        *self.shared.aggregate.write() = Some(AggregateSnapshot {
            period: self.aggregation,
            revision,
            data: Arc::new(data),
        });
        (ResponseOutcome::Published { revision }, follow_up)
    }

    fn advance_epoch(&mut self) {
        self.epoch += 1;
        self.point_in_flight = false;
        self.shared.epoch.store(self.epoch, Ordering::Release);
    }

    fn tag(&self, request: ProducerRequest) -> Tagged<ProducerRequest> {
        Tagged::new(self.epoch, request)
    }
}
