use std::fmt;

/// Error type for every failure the invoker can observe.
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// No API key configured
    MissingApiKey(String)
  , /// API key present but malformed
    InvalidApiKey(String)
  , /// Transport failed before a response arrived
    HttpError(String)
  , /// Could not reach the remote host
    Connection(String)
  , /// Request or remote deadline elapsed
    Timeout
  , /// Remote service reported itself unavailable (503)
    ServiceUnavailable(String)
  , /// Remote service rejected the request
    ApiError
    {   status: u16
      , message: String
    }
  , /// Failed to decode the response body
    ParseError(String)
  , /// Remote service answered without usable text
    EmptyResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(name) => {
              write!(f, "Missing API key: {} is not set", name)
            }
          , Error::InvalidApiKey(reason) => {
              write!(f, "Invalid API key format: {}", reason)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Connection(msg) => {
              write!(f, "Failed to connect: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::ServiceUnavailable(msg) => {
              write!(f, "Service unavailable: {}", msg)
            }
          , Error::ApiError { status, message } => {
              write!(f, "API error ({}): {}", status, message)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::EmptyResponse => {
              write!(f, "Empty response from API")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
