use super::generator::{now_ms, SampleGenerator};
use super::protocol::{ProducerRequest, ProducerResponse, Tagged};
use crate::aggregation;
use crossbeam_channel::{unbounded, Receiver, Sender};
use eyre::WrapErr;
use rand::rngs::StdRng;
use rand::Rng;
use std::thread::{self, JoinHandle};

/// Everything the producer owns. Handed to the producer thread by value;
/// nothing else can reach it.
pub struct ProducerState<R = StdRng> {
    generator: SampleGenerator<R>,
    emitted: u64,
}

impl<R: Rng> ProducerState<R> {
    pub fn new(generator: SampleGenerator<R>) -> Self {
        Self {
            generator,
            emitted: 0,
        }
    }

    /// Points produced since the last initial batch, including it.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn handle(&mut self, request: ProducerRequest) -> ProducerResponse {
        self.handle_at(request, now_ms())
    }

    /// Like [`ProducerState::handle`] with an explicit clock.
    pub fn handle_at(&mut self, request: ProducerRequest, now_ms: i64) -> ProducerResponse {
        match request {
            ProducerRequest::GenerateInitial { count } => {
                let data = self.generator.generate_initial(count, now_ms);
                self.emitted = count as u64;
                ProducerResponse::InitialData {
                    data,
                    total_count: self.emitted,
                }
            }
            ProducerRequest::GeneratePoint { last_timestamp } => {
                let point = self.generator.generate_next(last_timestamp);
                self.emitted += 1;
                ProducerResponse::NewPoint {
                    point,
                    total_count: self.emitted,
                }
            }
            ProducerRequest::Aggregate {
                data,
                period_ms,
                revision,
            } => ProducerResponse::Aggregated {
                data: aggregation::aggregate(&data, period_ms),
                period_ms,
                revision,
            },
        }
    }
}

/// Owning handle to the producer thread.
///
/// Dropping it closes the request channel and joins the thread.
pub struct ProducerHandle {
    requests: Option<Sender<Tagged<ProducerRequest>>>,
    responses: Receiver<Tagged<ProducerResponse>>,
    thread: Option<JoinHandle<()>>,
}

impl ProducerHandle {
    pub fn spawn<R>(state: ProducerState<R>) -> eyre::Result<Self>
    where
        R: Rng + Send + 'static,
    {
        let (request_tx, request_rx) = unbounded::<Tagged<ProducerRequest>>();
        let (response_tx, response_rx) = unbounded::<Tagged<ProducerResponse>>();

        let thread = thread::Builder::new()
            .name("stream-producer".into())
            .spawn(move || run(state, request_rx, response_tx))
            .wrap_err("failed to spawn producer thread")?;

        tracing::info!("producer ready");
        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            thread: Some(thread),
        })
    }

    /// Queues a request. Returns `false` when the producer is gone.
    pub fn send(&self, request: Tagged<ProducerRequest>) -> bool {
        let Some(tx) = &self.requests else {
            return false;
        };
        match tx.send(request) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(kind = err.0.message.kind(), "producer unavailable, request dropped");
                false
            }
        }
    }

    pub fn responses(&self) -> &Receiver<Tagged<ProducerResponse>> {
        &self.responses
    }
}

impl Drop for ProducerHandle {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("producer thread panicked");
            }
        }
    }
}

fn run<R: Rng>(
    mut state: ProducerState<R>,
    requests: Receiver<Tagged<ProducerRequest>>,
    responses: Sender<Tagged<ProducerResponse>>,
) {
    for request in requests.iter() {
        tracing::trace!(epoch = request.epoch, kind = request.message.kind(), "producer request");
        let response = request.map(|r| state.handle(r));
        if responses.send(response).is_err() {
            break;
        }
    }
    tracing::debug!("producer stopped");
}
