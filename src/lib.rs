pub mod classifier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod handler;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod tracing;
pub mod upstream;
pub mod utils;

pub use engine::*;
pub use error::*;

pub use crate::tracing::setup_tracing;

// Test utilities - only compiled during testing
#[cfg(test)]
pub mod test_utils;
