//! Level-of-detail reduction applied before projection.
//!
//! The only strategy is stride sampling: keep every n-th point. It bounds the
//! per-frame cost regardless of buffer size but is not a statistically
//! faithful reduction; peaks that fall between strides are not drawn.

pub mod stride;

pub use stride::{downsample, downsample_iter, stride_for};
