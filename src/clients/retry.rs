//! Rate-limit retry decisions and the sleep abstraction used to wait them out.
//!
//! The runner never sleeps directly: it asks [`RateLimitPolicy::decide`] what
//! to do with a 429 and hands any wait to a [`Sleeper`]. Production code uses
//! [`TokioSleeper`]; tests inject a sleeper that records the requested delays
//! and returns immediately.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::http_response::RateLimitSignal;

/// Something that can suspend the current task for a given duration.
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    /// Waits for `duration` to elapse.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What to do after a 429 response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RateLimitDecision {
    /// Wait for the given duration, then re-execute the whole request.
    RetryAfter(Duration),
    /// Give up and report the limit to the caller.
    Fail {
        /// Seconds the server asked the client to wait.
        retry_after: f64,
    },
}

/// How a runner reacts to rate limiting.
///
/// There is no retry cap and no backoff: the wait is exactly what the server
/// advertised, and waiting continues until a non-429 response arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RateLimitPolicy {
    /// Wait out every advertised window and retry (default).
    #[default]
    Wait,
    /// Fail on the first 429.
    FailFast,
}

impl RateLimitPolicy {
    /// Maps the `fail_on_limit_reached` flag to a policy.
    #[must_use]
    pub const fn from_fail_on_limit_reached(fail: bool) -> Self {
        if fail {
            Self::FailFast
        } else {
            Self::Wait
        }
    }

    /// Decides how to handle one rate-limit signal.
    #[must_use]
    pub fn decide(self, signal: RateLimitSignal) -> RateLimitDecision {
        match self {
            Self::Wait => RateLimitDecision::RetryAfter(signal.delay()),
            Self::FailFast => RateLimitDecision::Fail {
                retry_after: signal.retry_after,
            },
        }
    }
}
