#![forbid(unsafe_code)]

//! Core: geometry, input events, drag gesture recognition, easing, logging.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod semantic_event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
