// Probe Port - single fallible existence check driven by the poller

use super::community_source::ProbeError;
use async_trait::async_trait;

/// A single existence check against a remote service
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns `Ok(true)` iff the target exists and is enabled
    async fn check(&self, target_name: &str) -> Result<bool, ProbeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Probe that replays a fixed script of outcomes
    ///
    /// Once the script is exhausted every further call returns `Ok(false)`.
    pub struct ScriptedProbe {
        script: Mutex<VecDeque<Result<bool, ProbeError>>>,
        calls: AtomicU32,
        latency: Duration,
    }

    impl ScriptedProbe {
        pub fn new(script: Vec<Result<bool, ProbeError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
                latency: Duration::ZERO,
            }
        }

        /// Probe that never finds the target
        pub fn always_false() -> Self {
            Self::new(Vec::new())
        }

        /// Probe that returns `true` on the given 1-based attempt
        pub fn true_on_attempt(attempt: u32) -> Self {
            let mut script = vec![Ok(false); attempt.saturating_sub(1) as usize];
            script.push(Ok(true));
            Self::new(script)
        }

        /// Simulate a slow remote call
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        async fn check(&self, _target_name: &str) -> Result<bool, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(false))
        }
    }
}
