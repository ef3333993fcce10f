//! Transient/fatal classification of invocation errors
//!
//! Single source of truth for the retry decision. Structured variants
//! are checked first; anything else falls back to scanning the error
//! message for known network/availability keywords. Unknown errors are
//! fatal.

use serde::{Deserialize, Serialize};
use log::trace;
use crate::error::Error;

/// Message fragments that mark an error as retryable.
/// Matched case-insensitively against the error's display text.
pub const TRANSIENT_KEYWORDS: &[&str] = &[
  "timeout"
, "503"
, "failed to connect"
, "socket"
, "connection"
, "network"
, "unavailable"
, "deadline exceeded"
];

/// Handling policy for a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind
{   /// Worth retrying after a delay
    Transient
  , /// Never retried
    Fatal
}

impl ErrorKind
{   pub fn is_transient(&self) -> bool
    {   matches!(self, ErrorKind::Transient)
    }
}

/// Map an error to exactly one [`ErrorKind`].
pub fn classify(err: &Error) -> ErrorKind
{   let kind = match err
    {   Error::Timeout
      | Error::Connection(_)
      | Error::ServiceUnavailable(_)
      | Error::EmptyResponse => ErrorKind::Transient
      , other => classify_message(&other.to_string())
    };
    trace!("Classified {:?} as {:?}", err, kind);
    kind
}

/// Keyword scan used for errors without a structured signal.
pub fn classify_message(message: &str) -> ErrorKind
{   let lowered = message.to_lowercase();
    if TRANSIENT_KEYWORDS.iter().any(|k| lowered.contains(k))
    {   ErrorKind::Transient
    } else
    {   ErrorKind::Fatal
    }
}
