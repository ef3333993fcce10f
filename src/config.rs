//! Configuration for the Gemini provider and generation sampling

use serde::{Deserialize, Serialize};
use log::{debug, error};
use crate::error::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Prefix every Google AI Studio key carries
const API_KEY_PREFIX: &str = "AIza";

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig
{   pub temperature: f32
  , pub top_p: f32
  , pub top_k: u32
}

impl Default for GenerationConfig
{   fn default() -> Self
    {   GenerationConfig
        {   temperature: 0.7
          , top_p: 0.8
          , top_k: 40
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// Gemini API key
    pub api_key: String
  , /// Model name, e.g. "gemini-2.5-flash"
    pub model: String
  , /// API base URL
    pub api_base: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   api_key: String::new()
          , model: DEFAULT_MODEL.to_string()
          , api_base: DEFAULT_API_BASE.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
        }
    }
}

impl ProviderConfig
{   /// Build a config with the given key and default everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self
    {   ProviderConfig
        {   api_key: api_key.into()
          , ..ProviderConfig::default()
        }
    }

    /// Load from the environment, reading `.env` first if present.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL`, `GEMINI_API_BASE`
    /// and `GEMINI_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self, Error>
    {   if let Ok(path) = dotenvy::dotenv()
        {   debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, then validate
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where F: Fn(&str) -> Option<String>
    {   let defaults = ProviderConfig::default();
        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS")
        {   Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
              error!("Bad GEMINI_TIMEOUT_SECS: {}", e);
              Error::InvalidConfiguration(
                format!("GEMINI_TIMEOUT_SECS '{}': {}", raw, e)
              )
            })?
          , None => defaults.timeout_secs
        };

        let config = ProviderConfig
        {   api_key: lookup("GEMINI_API_KEY")
              .map(|k| k.trim().to_string())
              .unwrap_or_default()
          , model: lookup("GEMINI_MODEL")
              .filter(|m| !m.trim().is_empty())
              .unwrap_or(defaults.model)
          , api_base: lookup("GEMINI_API_BASE")
              .filter(|b| !b.trim().is_empty())
              .unwrap_or(defaults.api_base)
          , timeout_secs
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can never produce a request
    pub fn validate(&self) -> Result<(), Error>
    {   if self.api_key.is_empty()
        {   error!("GEMINI_API_KEY not set");
            return Err(Error::MissingApiKey(
              "GEMINI_API_KEY".to_string()
            ));
        }
        if !self.api_key.starts_with(API_KEY_PREFIX)
        {   error!("GEMINI_API_KEY has unexpected format");
            return Err(Error::InvalidApiKey(format!(
              "Gemini API keys should start with '{}'",
              API_KEY_PREFIX
            )));
        }
        if self.timeout_secs == 0
        {   return Err(Error::InvalidConfiguration(
              "request time limit must be at least one second"
                .to_string()
            ));
        }
        if self.model.is_empty()
        {   return Err(Error::InvalidConfiguration(
              "model name is empty".to_string()
            ));
        }
        Ok(())
    }
}
