use crate::errors::{AppError, Result};
use crate::models::SwapRequest;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Carries out an accepted swap request.
#[async_trait]
pub trait SwapExecutor: Send + Sync {
    async fn execute(&self, request: &SwapRequest) -> Result<()>;
}

/// Nothing is sent anywhere: waits `delay`, then succeeds or fails as configured.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    delay: Duration,
    should_fail: bool,
}

impl SimulatedExecutor {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration, should_fail: bool) -> Self {
        Self { delay, should_fail }
    }

    /// Resolves without waiting.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, false)
    }

    /// Rejects without waiting.
    pub fn rejecting() -> Self {
        Self::new(Duration::ZERO, true)
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, false)
    }
}

#[async_trait]
impl SwapExecutor for SimulatedExecutor {
    async fn execute(&self, request: &SwapRequest) -> Result<()> {
        debug!(
            source = request.source_symbol().unwrap_or_default(),
            dest = request.dest_symbol().unwrap_or_default(),
            amount = %request.source_amount,
            delay_ms = self.delay.as_millis() as u64,
            "[SUBMIT] simulating swap"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.should_fail {
            return Err(AppError::SwapFailed("simulated rejection".into()));
        }
        Ok(())
    }
}
