use gpui_stream_dashboard::aggregation::AggregationPeriod;
use gpui_stream_dashboard::config::StreamConfig;
use gpui_stream_dashboard::stream::{
    AppendOutcome, DataStream, ProducerHandle, ProducerRequest, ProducerResponse, ProducerState,
    ResponseOutcome, SampleGenerator, StreamCommand, StreamController, StreamShared, Tagged,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const NOW: i64 = 1_700_000_000_000;

struct Harness {
    controller: StreamController,
    producer: ProducerState,
}

impl Harness {
    fn new(max_points: usize) -> Self {
        Self {
            controller: StreamController::new(
                Arc::new(StreamShared::new(max_points)),
                SampleGenerator::from_seed(1),
            ),
            producer: ProducerState::new(SampleGenerator::from_seed(2)),
        }
    }

    fn respond(&mut self, request: Tagged<ProducerRequest>) -> Tagged<ProducerResponse> {
        let producer = &mut self.producer;
        request.map(|r| producer.handle_at(r, NOW))
    }

    fn deliver(&mut self, request: Tagged<ProducerRequest>) -> ResponseOutcome {
        let response = self.respond(request);
        self.controller.handle_response(response).0
    }

    fn started(max_points: usize, count: usize) -> Self {
        let mut harness = Self::new(max_points);
        let mut requests = harness.controller.start(count);
        assert_eq!(requests.len(), 1);
        let outcome = harness.deliver(requests.remove(0));
        assert_eq!(outcome, ResponseOutcome::Initialized { len: count });
        harness
    }

    fn len(&self) -> usize {
        self.controller.shared().buffer.read().len()
    }
}

#[test]
fn test_reset_supersedes_in_flight_initial() {
    let mut h = Harness::new(100);
    let first = h.controller.start(10).remove(0);
    let stale = h.respond(first);

    let mut requests = h.controller.handle_command(StreamCommand::Reset(20));
    assert_eq!(requests.len(), 1);
    assert!(requests[0].epoch > stale.epoch);

    assert_eq!(h.controller.handle_response(stale).0, ResponseOutcome::Stale);
    assert_eq!(h.len(), 0);

    assert_eq!(
        h.deliver(requests.remove(0)),
        ResponseOutcome::Initialized { len: 20 }
    );
    assert_eq!(h.controller.shared().buffer.read().total_count(), 20);
}

#[test]
fn test_reset_discards_in_flight_point() {
    let mut h = Harness::started(100, 10);
    h.controller.on_auto_start();
    let tick = h.controller.on_tick().remove(0);
    let pending = h.respond(tick);

    let mut requests = h.controller.handle_command(StreamCommand::Reset(5));
    assert!(!h.controller.is_streaming(), "reset halts streaming");
    assert_eq!(h.controller.handle_response(pending).0, ResponseOutcome::Stale);
    assert_eq!(h.len(), 10);

    h.deliver(requests.remove(0));
    assert_eq!(h.len(), 5);
}

#[test]
fn test_stop_cancels_in_flight_point() {
    let mut h = Harness::started(100, 10);
    h.controller.on_auto_start();
    assert!(h.controller.is_streaming());
    assert!(h.controller.shared().is_streaming());

    let tick = h.controller.on_tick().remove(0);
    let pending = h.respond(tick);
    h.controller.handle_command(StreamCommand::SetStreaming(false));

    assert_eq!(h.controller.handle_response(pending).0, ResponseOutcome::Stale);
    assert_eq!(h.len(), 10);
    assert!(h.controller.on_tick().is_empty(), "no tick after stop");
}

#[test]
fn test_stop_keeps_pending_initial_batch() {
    let mut h = Harness::new(100);
    let initial = h.controller.start(10).remove(0);

    h.controller.handle_command(StreamCommand::SetStreaming(true));
    h.controller.handle_command(StreamCommand::SetStreaming(false));
    assert!(h.controller.epoch() > initial.epoch);

    assert_eq!(h.deliver(initial), ResponseOutcome::Initialized { len: 10 });
    assert_eq!(h.len(), 10);

    h.controller.handle_command(StreamCommand::SetStreaming(true));
    assert_eq!(h.controller.on_tick().len(), 1);
}

#[test]
fn test_grow_keeps_pending_reset_batch() {
    let mut h = Harness::started(100, 10);
    let reset = h.controller.handle_command(StreamCommand::Reset(20)).remove(0);

    h.controller.handle_command(StreamCommand::SetStreaming(true));
    let tick = h.controller.on_tick().remove(0);
    let pending = h.respond(tick);
    h.controller.handle_command(StreamCommand::Grow(5));
    assert_eq!(h.controller.handle_response(pending).0, ResponseOutcome::Stale);

    assert_eq!(h.deliver(reset), ResponseOutcome::Initialized { len: 20 });
    assert_eq!(h.controller.shared().buffer.read().total_count(), 20);
}

#[test]
fn test_initial_batch_applied_once() {
    let mut h = Harness::new(100);
    let initial = h.controller.start(10).remove(0);
    let response = h.respond(initial);

    assert_eq!(
        h.controller.handle_response(response.clone()).0,
        ResponseOutcome::Initialized { len: 10 }
    );
    assert_eq!(h.controller.handle_response(response).0, ResponseOutcome::Stale);
}

#[test]
fn test_single_point_in_flight() {
    let mut h = Harness::started(100, 10);
    h.controller.on_auto_start();

    let first = h.controller.on_tick();
    assert_eq!(first.len(), 1);
    assert!(h.controller.point_in_flight());
    assert!(h.controller.on_tick().is_empty());
    assert!(h.controller.on_tick().is_empty());

    let outcome = h.deliver(first.into_iter().next().unwrap());
    assert_eq!(outcome, ResponseOutcome::Appended(AppendOutcome::Appended));
    assert_eq!(h.len(), 11);
    assert_eq!(h.controller.shared().buffer.read().last_timestamp(), Some(NOW));

    assert_eq!(h.controller.on_tick().len(), 1);
}

#[test]
fn test_streaming_appends_in_order() {
    let mut h = Harness::started(15, 10);
    h.controller.on_auto_start();
    for _ in 0..20 {
        let request = h.controller.on_tick().remove(0);
        assert!(h.deliver(request) != ResponseOutcome::Stale);
    }
    let buffer = h.controller.shared().buffer.read();
    assert_eq!(buffer.len(), 15);
    assert_eq!(buffer.total_count(), 30);
    let stamps: Vec<i64> = buffer.iter().map(|p| p.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[1] - w[0] == 100));
}

#[test]
fn test_grow_supersedes_in_flight_point() {
    let mut h = Harness::started(100, 10);
    h.controller.on_auto_start();
    let tick = h.controller.on_tick().remove(0);
    let pending = h.respond(tick);

    h.controller.handle_command(StreamCommand::Grow(5));
    assert_eq!(h.len(), 15);
    assert_eq!(h.controller.handle_response(pending).0, ResponseOutcome::Stale);
    assert_eq!(h.len(), 15);
    assert_eq!(h.controller.on_tick().len(), 1);
}

#[test]
fn test_auto_start_respects_explicit_choice() {
    let mut h = Harness::started(100, 10);
    h.controller.handle_command(StreamCommand::SetStreaming(false));
    h.controller.on_auto_start();
    assert!(!h.controller.is_streaming());

    h.controller.handle_command(StreamCommand::ToggleStreaming);
    assert!(h.controller.is_streaming());
    h.controller.handle_command(StreamCommand::SetStreaming(true));
    assert!(h.controller.is_streaming());
}

#[test]
fn test_shrink_and_empty_signals() {
    let mut h = Harness::new(100);
    assert!(h.controller.handle_command(StreamCommand::Grow(5)).is_empty());
    assert!(h.controller.handle_command(StreamCommand::Shrink).is_empty());
    assert_eq!(h.len(), 0);

    let mut h = Harness::started(100, 10);
    h.controller.handle_command(StreamCommand::Shrink);
    assert_eq!(h.len(), 5);
}

#[test]
fn test_offloaded_aggregation_published_by_revision() {
    let mut h = Harness::started(1_000, 600);
    let mut requests = h
        .controller
        .handle_command(StreamCommand::SetAggregation(AggregationPeriod::OneMinute));
    assert_eq!(requests.len(), 1);
    let revision = h.controller.shared().buffer.read().revision();
    match &requests[0].message {
        ProducerRequest::Aggregate {
            period_ms,
            revision: r,
            data,
        } => {
            assert_eq!(*period_ms, 60_000);
            assert_eq!(*r, revision);
            assert_eq!(data.len(), 600);
        }
        other => panic!("unexpected request {other:?}"),
    }

    // Aggregates survive an epoch change.
    h.controller.handle_command(StreamCommand::SetStreaming(true));
    h.controller.handle_command(StreamCommand::SetStreaming(false));

    let outcome = h.deliver(requests.remove(0));
    assert_eq!(outcome, ResponseOutcome::Published { revision });
    let snapshot = h
        .controller
        .shared()
        .aggregate_for(AggregationPeriod::OneMinute)
        .expect("published aggregate");
    let expected = h.controller.shared().buffer.read().aggregated(60_000);
    assert_eq!(*snapshot.data, expected);
    assert!(h
        .controller
        .shared()
        .aggregate_for(AggregationPeriod::OneHour)
        .is_none());
}

#[test]
fn test_aggregation_coalesces_while_in_flight() {
    let mut h = Harness::started(1_000, 100);
    let mut first = h
        .controller
        .handle_command(StreamCommand::SetAggregation(AggregationPeriod::OneMinute));
    assert_eq!(first.len(), 1);

    assert!(h.controller.handle_command(StreamCommand::Grow(10)).is_empty());
    assert!(h.controller.handle_command(StreamCommand::Grow(10)).is_empty());

    let response = h.respond(first.remove(0));
    let (outcome, follow_up) = h.controller.handle_response(response);
    assert!(matches!(outcome, ResponseOutcome::Published { .. }));
    assert_eq!(follow_up.len(), 1, "one refresh for the coalesced mutations");

    h.controller
        .handle_command(StreamCommand::SetAggregation(AggregationPeriod::None));
    assert!(h
        .controller
        .shared()
        .aggregate_for(AggregationPeriod::OneMinute)
        .is_none());
}

#[test]
fn test_protocol_wire_shape() {
    let request = ProducerRequest::GeneratePoint {
        last_timestamp: 1_000,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "GENERATE_POINT", "payload": {"lastTimestamp": 1000}})
    );

    let json = serde_json::json!({"type": "GENERATE_INITIAL", "payload": {"count": 3}});
    let parsed: ProducerRequest = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, ProducerRequest::GenerateInitial { count: 3 });

    let mut producer = ProducerState::new(SampleGenerator::from_seed(9));
    let response = producer.handle_at(ProducerRequest::GenerateInitial { count: 2 }, NOW);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "INITIAL_DATA");
    assert_eq!(json["totalCount"], 2);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));

    let response = producer.handle_at(ProducerRequest::GeneratePoint { last_timestamp: NOW }, NOW);
    assert_eq!(response.kind(), "NEW_POINT");
    assert_eq!(producer.emitted(), 3);
}

#[test]
fn test_producer_thread_round_trip() {
    let handle = ProducerHandle::spawn(ProducerState::new(SampleGenerator::from_seed(4))).unwrap();
    assert!(handle.send(Tagged::new(3, ProducerRequest::GenerateInitial { count: 25 })));
    assert!(handle.send(Tagged::new(
        3,
        ProducerRequest::GeneratePoint {
            last_timestamp: 500
        }
    )));

    let first = handle
        .responses()
        .recv_timeout(Duration::from_secs(5))
        .unwrap();
    assert_eq!(first.epoch, 3);
    match first.message {
        ProducerResponse::InitialData { data, total_count } => {
            assert_eq!(data.len(), 25);
            assert_eq!(total_count, 25);
        }
        other => panic!("unexpected response {other:?}"),
    }

    let second = handle
        .responses()
        .recv_timeout(Duration::from_secs(5))
        .unwrap();
    match second.message {
        ProducerResponse::NewPoint { point, total_count } => {
            assert_eq!(point.timestamp, 600);
            assert_eq!(total_count, 26);
        }
        other => panic!("unexpected response {other:?}"),
    }
}

fn wait_for(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn test_data_stream_end_to_end() {
    let config = StreamConfig {
        initial_count: 1_000,
        max_points: 5_000,
        tick_interval_ms: 10,
        auto_start_delay_ms: 60_000,
        grow_increment: 500,
        seed: Some(7),
    };
    let stream = DataStream::spawn(&config).unwrap();
    let timeout = Duration::from_secs(5);

    assert!(wait_for(timeout, || stream.buffer().len() == 1_000));
    assert!(!stream.is_streaming());

    stream.grow();
    assert!(wait_for(timeout, || stream.buffer().len() == 1_500));
    assert_eq!(stream.buffer().total_count(), 1_500);

    stream.shrink();
    assert!(wait_for(timeout, || stream.buffer().len() == 750));

    stream.set_streaming(true);
    assert!(wait_for(timeout, || stream.buffer().len() >= 755));
    stream.set_streaming(false);
    assert!(wait_for(timeout, || !stream.is_streaming()));

    stream.reset();
    assert!(wait_for(timeout, || {
        let buffer = stream.buffer();
        buffer.len() == 1_000 && buffer.total_count() == 1_000
    }));
    let settled = stream.buffer().revision();
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(stream.buffer().revision(), settled, "no ticks once stopped");
}
