//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Asynchronous variant
#[cfg(feature = "tokio-scheduler")]
pub use tokio_util::sync::CancellationToken;

#[cfg(feature = "tokio-scheduler")]
pub use crate::shared::SharedObservable;
pub use crate::{
  error::ProducerError,
  observable::Observable,
  observer::Subscriber,
  subscription::{SharedSubscription, Subscription},
};
