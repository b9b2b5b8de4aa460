//! Library exports for the fingerpaint drawing session.
//!
//! Exposes the gesture recognizer, the canvas engine, and the configuration
//! data structures so that detector bridges and tools (e.g. the schema dumper)
//! can share validation logic and serialization code with the main binary.

pub mod app;
pub mod backend;
pub mod capture;
pub mod config;
pub mod draw;
pub mod gesture;
pub mod input;
pub mod util;

pub use app::App;
pub use config::Config;
