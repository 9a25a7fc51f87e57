//! Default error type for producers.
//!
//! Producers pick their own error type through the `Err` parameter of
//! [`Observable`](crate::observable::Observable) and
//! [`SharedObservable`](crate::shared::SharedObservable). When a producer only
//! needs to report a message, [`ProducerError`] is the default.

use thiserror::Error;

/// A producer failure carrying the message the producer reported.
///
/// ```rust
/// use observe::prelude::*;
///
/// let err = ProducerError::from("fatal crash");
/// assert_eq!(err.to_string(), "fatal crash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{message}")]
pub struct ProducerError {
  message: String,
}

impl ProducerError {
  pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }

  pub fn message(&self) -> &str { &self.message }
}

impl From<&str> for ProducerError {
  fn from(message: &str) -> Self { Self::new(message) }
}

impl From<String> for ProducerError {
  fn from(message: String) -> Self { Self::new(message) }
}
