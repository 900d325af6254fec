use tokio_util::sync::CancellationToken;

/// Process-wide stop flag. Waiters that arrive after `shutdown` return
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub async fn wait_for_shutdown(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn late_waiter_sees_shutdown() {
        let signal = ShutdownSignal::new();
        signal.clone().shutdown();
        tokio::time::timeout(Duration::from_millis(50), signal.wait_for_shutdown()).await.unwrap();
    }
}
