//! Retry Policy - 限流退避重试
//!
//! 所有生成调用统一经过此策略，调用方自身不做重试。
//! 只有限流错误会重试，其余错误立即返回。

use std::future::Future;
use std::time::Duration;

use crate::application::ports::GenerationError;

/// 默认最大重试次数
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// 默认首次退避时间
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(2000);

/// 指数退避重试策略（每次翻倍，无抖动）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// 第 `retry` 次重试（从 0 开始）前的等待时间
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }

    /// 执行操作，被限流时退避重试
    ///
    /// 退避期间只挂起当前任务，不阻塞其他生成任务
    // TODO: add jitter to the backoff once the generator backend supports concurrent retries
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, GenerationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        let mut retries = 0u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() && retries < self.max_retries => {
                    let delay = self.backoff_delay(retries);
                    retries += 1;
                    tracing::warn!(
                        attempt = retries,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Rate limit hit, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    if err.is_rate_limited() {
                        tracing::warn!(
                            retries = retries,
                            error = %err,
                            "Rate limit retries exhausted"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn counting_operation(
        calls: Arc<AtomicU32>,
        fail_with: impl Fn(u32) -> Option<GenerationError>,
    ) -> impl FnMut() -> std::future::Ready<Result<&'static str, GenerationError>> {
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(match fail_with(call) {
                Some(err) => Err(err),
                None => Ok("ok"),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_rate_limit_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let operation = counting_operation(calls.clone(), |call| {
            (call <= 2).then(|| GenerationError::RateLimited("429".to_string()))
        });

        let started = Instant::now();
        let result = RetryPolicy::default().run(operation).await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() >= Duration::from_millis(2000 + 4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_rate_limit_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let operation =
            counting_operation(calls.clone(), |_| Some(GenerationError::failed("boom")));

        let started = Instant::now();
        let result = RetryPolicy::default().run(operation).await;

        assert_eq!(result, Err(GenerationError::failed("boom")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_exhausts_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let operation = counting_operation(calls.clone(), |_| {
            Some(GenerationError::from_status(429, "Too Many Requests"))
        });

        let started = Instant::now();
        let result = RetryPolicy::default().run(operation).await;

        assert!(matches!(result, Err(GenerationError::RateLimited(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(started.elapsed() >= Duration::from_millis(2000 + 4000 + 8000));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(800));
    }
}
