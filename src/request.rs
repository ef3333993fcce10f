//! Outcome of a single invocation

use serde::{Deserialize, Serialize};
use crate::classify::ErrorKind;

/// Either the generated text or a terminal failure description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationResult
{   Success(String)
  , Failure
    {   kind: ErrorKind
      , message: String
    }
}

impl InvocationResult
{   pub fn is_success(&self) -> bool
    {   matches!(self, InvocationResult::Success(_))
    }

    pub fn text(&self) -> Option<&str>
    {   match self
        {   InvocationResult::Success(text) => Some(text.as_str())
          , InvocationResult::Failure { .. } => None
        }
    }

    /// Failure kind, if this is a failure
    pub fn kind(&self) -> Option<ErrorKind>
    {   match self
        {   InvocationResult::Success(_) => None
          , InvocationResult::Failure { kind, .. } => Some(*kind)
        }
    }

    /// Run the success text through [`crate::normalize::normalize`].
    /// Failures pass through untouched.
    pub fn normalized(self) -> Self
    {   match self
        {   InvocationResult::Success(text) => {
              InvocationResult::Success(
                crate::normalize::normalize(&text)
              )
            }
          , failure => failure
        }
    }

    pub fn into_result(self) -> Result<String, String>
    {   match self
        {   InvocationResult::Success(text) => Ok(text)
          , InvocationResult::Failure { message, .. } => Err(message)
        }
    }
}
