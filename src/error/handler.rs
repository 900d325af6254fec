use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Failed to send command to poller: {0}")]
    SendPollerCommandError(String),
    #[error("Failed to start server: {0}")]
    ServerStartError(String),
}
