//! Retrying invocation of a text-generation service

use async_trait::async_trait;
use log::{debug, error, warn};
use crate::classify::{classify, ErrorKind};
use crate::config::GenerationConfig;
use crate::error::Error;
use crate::request::InvocationResult;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// A remote text-generation backend.
///
/// `Ok(None)` means the service answered but gave no usable text.
#[async_trait]
pub trait GenerationService: Send + Sync
{   async fn generate(
      &self
    , prompt: &str
    , config: &GenerationConfig
    ) -> Result<Option<String>, Error>;
}

#[async_trait]
impl<S> GenerationService for std::sync::Arc<S>
where S: GenerationService + ?Sized
{   async fn generate(
      &self
    , prompt: &str
    , config: &GenerationConfig
    ) -> Result<Option<String>, Error>
    {   (**self).generate(prompt, config).await
    }
}

/// Calls a [`GenerationService`], retrying transient failures
pub struct Invoker<S, Z = TokioSleeper>
{   service: S
  , sleeper: Z
  , policy: RetryPolicy
  , generation: GenerationConfig
}

impl<S> Invoker<S, TokioSleeper>
where S: GenerationService
{   /// Invoker with the default policy, sampling and tokio timer
    pub fn new(service: S) -> Self
    {   Invoker
        {   service
          , sleeper: TokioSleeper
          , policy: RetryPolicy::default()
          , generation: GenerationConfig::default()
        }
    }
}

impl<S, Z> Invoker<S, Z>
where S: GenerationService
    , Z: Sleeper
{   pub fn with_policy(mut self, policy: RetryPolicy) -> Self
    {   self.policy = policy;
        self
    }

    /// Replace the delay source
    pub fn with_sleeper<Z2: Sleeper>(self, sleeper: Z2) -> Invoker<S, Z2>
    {   Invoker
        {   service: self.service
          , sleeper
          , policy: self.policy
          , generation: self.generation
        }
    }

    /// Send `prompt`, retrying transient failures with backoff.
    ///
    /// Never errors: fatal failures return at once, transient ones
    /// return after the last attempt with the attempt count in the
    /// message.
    pub async fn invoke(&self, prompt: &str) -> InvocationResult
    {   let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;
        loop
        {   debug!("Invoking generation, attempt {}/{}", attempt, max_attempts);

            let err = match self.service
              .generate(prompt, &self.generation)
              .await
            {   Ok(Some(text)) if !text.is_empty() => {
                  debug!("Received {} bytes on attempt {}", text.len(), attempt);
                  return InvocationResult::Success(text);
                }
              , Ok(_) => Error::EmptyResponse
              , Err(e) => e
            };

            match classify(&err)
            {   ErrorKind::Fatal => {
                  error!("Fatal error on attempt {}: {}", attempt, err);
                  return InvocationResult::Failure
                  {   kind: ErrorKind::Fatal
                    , message: format!("API request failed: {}", err)
                  };
                }
              , ErrorKind::Transient if attempt >= max_attempts => {
                  error!(
                    "Giving up after {} attempts: {}",
                    max_attempts, err
                  );
                  return InvocationResult::Failure
                  {   kind: ErrorKind::Transient
                    , message: exhausted_message(max_attempts, &err)
                  };
                }
              , ErrorKind::Transient => {
                  attempt += 1;
                  let delay = self.policy
                    .delay_before_attempt(attempt)
                    .unwrap_or_default();
                  warn!(
                    "Transient error (attempt {}/{}): {}. Retrying in {:?}",
                    attempt - 1, max_attempts, err, delay
                  );
                  self.sleeper.sleep(delay).await;
                }
            }
        }
    }
}

fn exhausted_message(attempts: usize, last: &Error) -> String
{   format!(
      "Failed to get response after {} attempts. \
       Please check your internet connection and try again. \
       Last error: {}",
      attempts, last
    )
}
