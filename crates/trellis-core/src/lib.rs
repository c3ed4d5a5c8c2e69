#![forbid(unsafe_code)]

//! Core: geometry primitives and the logging facade shared by Trellis crates.

pub mod geometry;
pub mod logging;

pub use geometry::{Axis, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
