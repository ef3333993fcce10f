use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use log::{debug, trace, error};
use crate::config::{GenerationConfig, ProviderConfig};
use crate::error::Error;
use crate::invoker::GenerationService;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>
  , #[serde(default)]
    pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
  , pub generation_config: GenerationConfig
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate
{   #[serde(default)]
    pub content: Option<Content>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Google's error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope
{   pub error: ErrorBody
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody
{   #[serde(default)]
    pub code: Option<u16>
  , #[serde(default)]
    pub message: String
  , #[serde(default)]
    pub status: Option<String>
}

impl GenerateContentResponse
{   /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String>
    {   let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts
          .iter()
          .filter_map(|p| p.text.as_deref())
          .collect();
        if text.is_empty()
        {   None
        } else
        {   Some(text)
        }
    }
}

// ===== Gemini Client =====

/// Gemini `generateContent` client
pub struct GeminiClient
{   config: ProviderConfig
  , http_client: reqwest::Client
}

impl GeminiClient
{   /// Build a client; the config is validated first
    pub fn new(config: ProviderConfig) -> Result<Self, Error>
    {   debug!("Creating GeminiClient for model: {}", config.model);
        config.validate()?;
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            Error::InvalidConfiguration(e.to_string())
          })?;
        Ok(GeminiClient
        {   config
          , http_client
        })
    }

    pub fn model(&self) -> &str
    {   &self.config.model
    }

    fn endpoint(&self) -> String
    {   format!(
          "{}/models/{}:generateContent",
          self.config.api_base.trim_end_matches('/'),
          self.config.model
        )
    }

    async fn handle_generate(
      &self
    , prompt: &str
    , generation: &GenerationConfig
    ) -> Result<Option<String>, Error>
    {   let request = GenerateContentRequest
        {   contents: vec![
              Content
              {   role: Some("user".to_string())
                , parts: vec![Part { text: Some(prompt.to_string()) }]
              }
            ]
          , generation_config: *generation
        };

        trace!("Gemini request: {:?}", request);

        let response = self.http_client
          .post(self.endpoint())
          .header("x-goog-api-key", self.config.api_key.as_str())
          .json(&request)
          .send()
          .await
          .map_err(transport_error)?;

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Gemini API error {}: {}", status, body);
            return Err(status_error(status.as_u16(), &body));
        }

        // Body reads share the client deadline; keep their signal
        let body = response.bytes().await.map_err(transport_error)?;

        let reply: GenerateContentResponse
          = serde_json::from_slice(&body).map_err(|e| {
            error!("Parse error: {}", e);
            Error::ParseError(e.to_string())
          })?;

        if let Some(reason) = reply.candidates
          .first()
          .and_then(|c| c.finish_reason.as_deref())
        {   debug!("Gemini finish reason: {}", reason);
        }

        Ok(reply.text())
    }
}

#[async_trait]
impl GenerationService for GeminiClient
{   async fn generate(
      &self
    , prompt: &str
    , config: &GenerationConfig
    ) -> Result<Option<String>, Error>
    {   self.handle_generate(prompt, config).await
    }
}

/// Map a reqwest failure onto the structured variants it signals
fn transport_error(e: reqwest::Error) -> Error
{   error!("HTTP error: {}", e);
    if e.is_timeout()
    {   Error::Timeout
    } else if e.is_connect()
    {   Error::Connection(e.to_string())
    } else
    {   Error::HttpError(e.to_string())
    }
}

/// Map a non-success HTTP reply, preferring Google's status field
pub fn status_error(code: u16, body: &str) -> Error
{   let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let google_status = parsed
      .as_ref()
      .and_then(|env| env.error.status.clone())
      .unwrap_or_default();
    let message = parsed
      .map(|env| env.error.message)
      .filter(|m| !m.is_empty())
      .unwrap_or_else(|| body.to_string());

    match (code, google_status.as_str())
    {   (503, _) | (_, "UNAVAILABLE") => {
          Error::ServiceUnavailable(message)
        }
      , (504, _) | (_, "DEADLINE_EXCEEDED") => Error::Timeout
      , _ => Error::ApiError
        {   status: code
          , message
        }
    }
}
