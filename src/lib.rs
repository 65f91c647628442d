//! signal-scope: live signal scope core.
//!
//! The crate turns a stream of backend frames (time-domain samples plus a
//! spectrum) into backend-neutral render scenes, and keeps two independently
//! zoomable axes plus a modal analysis drill-down in sync with pointer input.

pub mod api;
pub mod channel;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ScopeEngine, ScopeEngineConfig};
pub use channel::{FrameChannel, Subscription};
pub use error::{ScopeError, ScopeResult};
