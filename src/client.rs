use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::invoker::{GenerationService, Invoker};
use crate::retry::Sleeper;
use crate::GuidanceFoot;

/// Public API for the guidance backend - owns the task
pub struct GuidanceBackend
{   hand: crate::GuidanceHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl GuidanceBackend
{   /// Create and spawn a new backend around `invoker`.
    /// Returns immediately - spawns background task
    pub fn new<S, Z>(invoker: Invoker<S, Z>) -> Self
    where S: GenerationService + 'static
        , Z: Sleeper + 'static
    {   debug!("Creating GuidanceBackend with task ownership");

        let (send_prompt_tx, send_prompt_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::GuidanceHand
        {   send_prompt_tx
          , kill_process_tx
        };

        let foot = crate::GuidanceFoot
        {   send_prompt_rx
          , kill_process_rx
        };

        let invoker = Arc::new(invoker);
        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, invoker).await
        });

        GuidanceBackend
        {   hand
          , _task_handle
        }
    }

    /// Send a prompt - returns almost immediately.
    /// The reply carries normalized text on success.
    pub async fn send_prompt(
      &self
    , prompt: String
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SendPromptReply>,
        crate::error::Error
      >
    {   debug!("send_prompt queuing command ({} bytes)", prompt.len());
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SendPromptArgs
        {   prompt
          , reply: reply_tx
        };

        self.hand.send_prompt_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down GuidanceBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // The loop answers before it exits; a dropped reply means
        // the task already died
        match reply_rx.recv().await
        {   Some(result) => {
              debug!("Backend shutdown confirmed");
              result
            }
          , None => {
              error!("Backend task ended without confirming shutdown");
              Err(crate::error::Error::Other(
                "Backend task ended without confirming shutdown"
                  .to_string()
              ))
            }
        }
    }
}

/// Main backend event loop
///
/// tokio::select! only queues work: each prompt gets its own task,
/// since invocations share no state and may sit in backoff for
/// seconds.
async fn run_backend_loop<S, Z>(
  foot: crate::GuidanceFoot
, invoker: Arc<Invoker<S, Z>>
)
where S: GenerationService + 'static
    , Z: Sleeper + 'static
{   debug!("Starting GuidanceBackend event loop");
    let GuidanceFoot
    {   mut send_prompt_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = send_prompt_rx.recv() => {
          debug!("Received SendPrompt");
          let invoker = Arc::clone(&invoker);
          tokio::spawn(async move {
            let result = invoker
              .invoke(&cmd.prompt)
              .await
              .normalized();
            let _ = cmd.reply.send(result);
          });
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("GuidanceBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
