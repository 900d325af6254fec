pub mod poller;
pub mod seen;
pub mod shutdown;

pub use poller::PollEvent;
pub use poller::PollerCommand;
pub use poller::PollerOperator;
pub use seen::SeenSet;
pub use shutdown::ShutdownSignal;
