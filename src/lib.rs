pub mod error;
pub mod classify;
pub mod config;
pub mod retry;
pub mod request;
pub mod invoker;
pub mod normalize;
pub mod providers;
pub mod client;

pub use classify::ErrorKind;
pub use client::GuidanceBackend;
pub use config::{GenerationConfig, ProviderConfig};
pub use error::Error;
pub use invoker::{GenerationService, Invoker};
pub use normalize::normalize;
pub use request::InvocationResult;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};

/*

guidance-core: resilient calls to a text-generation API, plus the
cleanup of whatever markup comes back.

  caller -> Invoker::invoke -> InvocationResult::normalized -> caller

guidance-core/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and backend channel types
│   ├── error.rs        # Error enum
│   ├── classify.rs     # Transient/fatal classification
│   ├── config.rs       # Provider and sampling configuration
│   ├── retry.rs        # Retry policy, backoff sleeper
│   ├── request.rs      # InvocationResult
│   ├── invoker.rs      # Retry loop over a GenerationService
│   ├── normalize.rs    # Markup stripping
│   ├── client.rs       # Channel-driven backend task
│   ├── providers/
│   │   ├── mod.rs
│   │   └── gemini.rs   # Gemini generateContent client
│   └── bin/
│       └── guidance.rs # Command line front end
└── tests/

*/

/// BACKEND API INTERFACE:

// ===== SendPrompt =====

pub type SendPromptReply = InvocationResult;
pub type SendPromptReplySender
  = tokio::sync::mpsc::UnboundedSender<SendPromptReply>;

pub struct SendPromptArgs
{   pub prompt: String
  , pub reply: SendPromptReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== GuidanceHand (sender side) =====

pub struct GuidanceHand
{   pub send_prompt_tx
      : tokio::sync::mpsc::UnboundedSender<SendPromptArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== GuidanceFoot (receiver side) =====

pub struct GuidanceFoot
{   pub send_prompt_rx
      : tokio::sync::mpsc::UnboundedReceiver<SendPromptArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
