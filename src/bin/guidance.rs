//! Send one prompt to Gemini and print the cleaned-up answer.
//!
//! The prompt comes from the command line arguments, or stdin when
//! none are given. Configuration is read from the environment (and
//! `.env`): see `ProviderConfig::from_env`.

use std::io::Read;
use std::process::ExitCode;
use log::{error, info};
use guidance_core::providers::GeminiClient;
use guidance_core::{InvocationResult, Invoker, ProviderConfig};

#[tokio::main]
async fn main() -> ExitCode
{   env_logger::init();

    let prompt = match read_prompt()
    {   Ok(p) if !p.trim().is_empty() => p
      , Ok(_) => {
          eprintln!("usage: guidance <prompt...>  (or pipe the prompt on stdin)");
          return ExitCode::from(2);
        }
      , Err(e) => {
          eprintln!("Failed to read prompt: {}", e);
          return ExitCode::from(2);
        }
    };

    let client = match ProviderConfig::from_env()
      .and_then(GeminiClient::new)
    {   Ok(c) => c
      , Err(e) => {
          error!("Configuration error: {}", e);
          eprintln!("Error: {}", e);
          return ExitCode::from(2);
        }
    };
    info!("API key loaded, using model {}", client.model());

    match Invoker::new(client).invoke(&prompt).await.normalized()
    {   InvocationResult::Success(text) => {
          println!("{}", text);
          ExitCode::SUCCESS
        }
      , InvocationResult::Failure { kind, message } => {
          error!("Invocation failed ({:?})", kind);
          eprintln!(
            "Error: {}\n\nPlease try again later or check your internet connection.",
            message
          );
          ExitCode::FAILURE
        }
    }
}

fn read_prompt() -> std::io::Result<String>
{   let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty()
    {   return Ok(args.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
