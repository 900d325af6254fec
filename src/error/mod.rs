pub mod aggregate;
pub mod config;
pub mod handler;
pub mod upstream;

pub use aggregate::AggregateError;
pub use anyhow::anyhow;
pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use config::ConfigError;
pub use handler::HandlerError;
pub use upstream::UpstreamError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
    ($err:expr) => {
        anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
    };
}
