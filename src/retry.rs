//! Retry policy and backoff delay source

use std::time::Duration;
use async_trait::async_trait;
use log::debug;

/// Retry policy for transient failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy
{   /// Total attempts, including the first one; never zero
    max_attempts: usize
  , backoff_multiplier: u32
  , initial_delay: Duration
}

impl RetryPolicy
{   /// Create a new retry policy
    pub fn new(
      max_attempts: usize
    , backoff_multiplier: u32
    , initial_delay: Duration
    ) -> Self
    {   RetryPolicy
        {   max_attempts: max_attempts.max(1)
          , backoff_multiplier
          , initial_delay
        }
    }

    pub fn max_attempts(&self) -> usize
    {   self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration
    {   self.initial_delay
    }

    /// Delay to wait before 1-indexed `attempt`.
    /// The first attempt is never delayed.
    pub fn delay_before_attempt(
      &self
    , attempt: usize
    ) -> Option<Duration>
    {   if attempt < 2
        {   return None;
        }
        let exponent = u32::try_from(attempt - 2)
          .unwrap_or(u32::MAX);
        let delay = self.backoff_multiplier
          .checked_pow(exponent)
          .and_then(|factor| self.initial_delay.checked_mul(factor))
          .unwrap_or(Duration::MAX);
        debug!("Backoff before attempt {}: {:?}", attempt, delay);
        Some(delay)
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::new(3, 2, Duration::from_secs(2))
    }
}

/// Source of backoff delays.
/// Swapped for a recording clock in tests.
#[async_trait]
pub trait Sleeper: Send + Sync
{   async fn sleep(&self, delay: Duration);
}

/// Suspends the current task on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper
{   async fn sleep(&self, delay: Duration)
    {   tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn default_policy_doubles_from_two_seconds()
    {   let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.initial_delay(), Duration::from_secs(2));
        assert_eq!(policy.delay_before_attempt(1), None);
        assert_eq!(
          policy.delay_before_attempt(2)
        , Some(Duration::from_secs(2))
        );
        assert_eq!(
          policy.delay_before_attempt(3)
        , Some(Duration::from_secs(4))
        );
        assert_eq!(
          policy.delay_before_attempt(4)
        , Some(Duration::from_secs(8))
        );
    }

    #[test]
    fn huge_attempt_numbers_saturate()
    {   let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before_attempt(200), Some(Duration::MAX));
    }

    #[test]
    fn zero_attempts_is_clamped_to_one()
    {   assert_eq!(
          RetryPolicy::new(0, 2, Duration::from_millis(1)).max_attempts()
        , 1
        );
    }
}
