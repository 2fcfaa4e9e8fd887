//! Messages exchanged with the background producer.
//!
//! The JSON shape matches the worker protocol of the web dashboard:
//! requests are `{"type": ..., "payload": {...}}`, responses carry their
//! fields next to `type`.

use crate::data_types::DataPoint;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProducerRequest {
    GenerateInitial {
        count: usize,
    },
    #[serde(rename_all = "camelCase")]
    GeneratePoint {
        last_timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    Aggregate {
        data: Vec<DataPoint>,
        period_ms: i64,
        /// Buffer revision `data` was copied from.
        #[serde(default)]
        revision: u64,
    },
}

impl ProducerRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GenerateInitial { .. } => "GENERATE_INITIAL",
            Self::GeneratePoint { .. } => "GENERATE_POINT",
            Self::Aggregate { .. } => "AGGREGATE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProducerResponse {
    #[serde(rename_all = "camelCase")]
    InitialData {
        data: Vec<DataPoint>,
        total_count: u64,
    },
    #[serde(rename_all = "camelCase")]
    NewPoint {
        point: DataPoint,
        total_count: u64,
    },
    #[serde(rename_all = "camelCase")]
    Aggregated {
        data: Vec<DataPoint>,
        #[serde(default)]
        period_ms: i64,
        #[serde(default)]
        revision: u64,
    },
}

impl ProducerResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitialData { .. } => "INITIAL_DATA",
            Self::NewPoint { .. } => "NEW_POINT",
            Self::Aggregated { .. } => "AGGREGATED",
        }
    }
}

/// Envelope correlating a response with the stream generation that asked
/// for it. A reset or stop moves the consumer to a new epoch, after which
/// replies to older point requests are ignored. An initial batch is only
/// superseded by a reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tagged<T> {
    pub epoch: u64,
    pub message: T,
}

impl<T> Tagged<T> {
    pub fn new(epoch: u64, message: T) -> Self {
        Self { epoch, message }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Tagged<U> {
        Tagged {
            epoch: self.epoch,
            message: f(self.message),
        }
    }
}
