//! Real-time streaming data dashboard for GPUI.
//!
//! A background producer feeds a bounded [`stream::StreamBuffer`]; each
//! mounted [`ChartView`] downsamples, projects and draws it once per display
//! frame while a shared [`performance::PerformanceMonitor`] tracks cost.

pub mod aggregation;
pub mod chart_view;
pub mod config;
pub mod dashboard;
pub mod data_types;
pub mod decimation;
pub mod performance;
pub mod pipeline;
pub mod plot_types;
pub mod render_loop;
pub mod rendering;
pub mod scales;
#[cfg(feature = "server")]
pub mod server;
pub mod stream;
pub mod table;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use aggregation::{aggregate, AggregationPeriod};
pub use chart_view::{init, ChartView};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use data_types::{Category, ChartBounds, DataPoint, PlotDataSource, TimeRange};
pub use performance::PerformanceMonitor;
pub use plot_types::{ChartKind, ChartPlot, PlotRenderer};
pub use stream::{DataStream, StreamBuffer};
