#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use guidance_core::{Error, GenerationConfig, GenerationService, Sleeper};

/// One scripted reply from the fake service
pub type Reply = Result<Option<String>, Error>;

/// Replays a fixed script of replies and counts calls.
/// Once the script runs out the last reply repeats.
#[derive(Clone)]
pub struct ScriptedService
{   script: Arc<Mutex<VecDeque<Reply>>>
  , last: Arc<Mutex<Option<Reply>>>
  , calls: Arc<Mutex<Vec<String>>>
}

impl ScriptedService
{   pub fn new(script: Vec<Reply>) -> Self
    {   ScriptedService
        {   script: Arc::new(Mutex::new(script.into()))
          , last: Arc::new(Mutex::new(None))
          , calls: Arc::new(Mutex::new(Vec::new()))
        }
    }

    pub fn always(reply: Reply) -> Self
    {   ScriptedService::new(vec![reply])
    }

    pub fn call_count(&self) -> usize
    {   self.calls.lock().len()
    }

    pub fn prompts(&self) -> Vec<String>
    {   self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl GenerationService for ScriptedService
{   async fn generate(
      &self
    , prompt: &str
    , _config: &GenerationConfig
    ) -> Result<Option<String>, Error>
    {   self.calls.lock().push(prompt.to_string());
        let next = self.script.lock().pop_front();
        match next
        {   Some(reply) => {
              *self.last.lock() = Some(reply.clone());
              reply
            }
          , None => self.last
              .lock()
              .clone()
              .unwrap_or(Err(Error::Other("script empty".into())))
        }
    }
}

/// Records requested delays instead of sleeping
#[derive(Clone, Default)]
pub struct RecordingSleeper
{   delays: Arc<Mutex<Vec<Duration>>>
}

impl RecordingSleeper
{   pub fn delays(&self) -> Vec<Duration>
    {   self.delays.lock().clone()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper
{   async fn sleep(&self, delay: Duration)
    {   self.delays.lock().push(delay);
    }
}

pub fn init_logging()
{   let _ = env_logger::builder().is_test(true).try_init();
}
