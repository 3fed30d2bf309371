//! Interceptor chain
//!
//! Interceptors wrap every call an [`HttpClient`](super::HttpClient) makes.
//! Each link receives the request and a [`Next`] handle for the rest of the
//! chain; the last link executes the request and applies the response
//! filter, so interceptors see the filtered outcome (a 503 arrives as a
//! [`ClientError::Status`], not as a response).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Request, Response};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::error::ClientError;
use super::response_filter::ResponseFilter;

/// Middleware around a single HTTP call
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Handle `request`, usually by calling `next.run` one or more times
    async fn intercept(&self, request: Request, next: Next<'_>) -> Result<Response, ClientError>;
}

/// The remainder of an interceptor chain
#[derive(Clone, Copy)]
pub struct Next<'a> {
    client: &'a reqwest::Client,
    filter: &'a ResponseFilter,
    chain: &'a [Arc<dyn Interceptor>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        client: &'a reqwest::Client,
        filter: &'a ResponseFilter,
        chain: &'a [Arc<dyn Interceptor>],
    ) -> Self {
        Self {
            client,
            filter,
            chain,
        }
    }

    /// Run the rest of the chain
    pub async fn run(self, request: Request) -> Result<Response, ClientError> {
        match self.chain.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    chain: rest,
                    ..self
                };
                head.intercept(request, next).await
            }
            None => {
                let method = request.method().clone();
                let url = request.url().to_string();
                let result = self
                    .client
                    .execute(request)
                    .await
                    .map_err(|source| ClientError::Transport {
                        method,
                        url,
                        source,
                    });
                (self.filter)(result)
            }
        }
    }
}

/// Backoff settings for [`RetryInterceptor`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Fraction of the delay added or removed at random
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff starting at `base_delay_ms`
    pub fn exponential(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            ..Default::default()
        }
    }

    /// Fixed delay between attempts
    pub fn linear(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms: delay_ms,
            max_delay_ms: delay_ms,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }

    /// Delay to wait after the given (zero-based) failed attempt
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let base_delay = self.base_delay_ms as f64;
        let delay = base_delay * self.backoff_multiplier.powi(attempt as i32);
        let delay = delay.min(self.max_delay_ms as f64);

        let jitter = delay * self.jitter_factor * (rand::random::<f64>() - 0.5);
        let final_delay = (delay + jitter).max(0.0) as u64;

        Duration::from_millis(final_delay)
    }
}

/// Retries transport failures, 5xx and 429 responses
#[derive(Debug, Clone, Default)]
pub struct RetryInterceptor {
    policy: RetryPolicy,
}

impl RetryInterceptor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl Interceptor for RetryInterceptor {
    async fn intercept(&self, request: Request, next: Next<'_>) -> Result<Response, ClientError> {
        let max_attempts = self.policy.max_attempts;
        for attempt in 0..max_attempts {
            let attempt_request = request.try_clone().ok_or_else(|| {
                ClientError::Contract("request body cannot be replayed for retry".to_string())
            })?;

            match next.run(attempt_request).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                    let delay = self.policy.calculate_delay(attempt);
                    warn!(
                        url = %request.url(),
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }

        Err(ClientError::Contract(
            "retry interceptor made no attempts".to_string(),
        ))
    }
}

/// Logs method, url, outcome and latency of every call at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInterceptor;

#[async_trait]
impl Interceptor for TracingInterceptor {
    async fn intercept(&self, request: Request, next: Next<'_>) -> Result<Response, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();
        let start = Instant::now();

        let result = next.run(request).await;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                elapsed_ms,
                "request completed"
            ),
            Err(err) => debug!(%method, %url, elapsed_ms, error = %err, "request failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy() {
        let policy = RetryPolicy::exponential(3, 100);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 100);

        let delay1 = policy.calculate_delay(0);
        let delay2 = policy.calculate_delay(1);
        assert!(delay2 > delay1);
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy {
            jitter_factor: 0.0,
            ..RetryPolicy::exponential(10, 1000)
        };
        assert_eq!(policy.calculate_delay(8), Duration::from_millis(5000));
    }

    #[test]
    fn test_linear_policy_has_fixed_delay() {
        let policy = RetryPolicy::linear(4, 250);
        assert_eq!(policy.calculate_delay(0), Duration::from_millis(250));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(250));
    }
}
