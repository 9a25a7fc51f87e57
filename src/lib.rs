//! # observe: a minimal push-based Observable
//!
//! An [`Observable`] wraps a producer function and runs it lazily, once per
//! subscription. The producer pushes zero or more values and then either
//! completes or fails; each event reaches the callbacks bound in the
//! caller's [`Subscription`].
//!
//! ```rust
//! use observe::prelude::*;
//!
//! let observable = Observable::new(|subscriber: &mut dyn Subscriber<i32>| {
//!   subscriber.next(1);
//!   subscriber.next(2);
//!   subscriber.next(3);
//!   subscriber.complete();
//!   Ok::<(), ProducerError>(())
//! });
//!
//! let mut numbers = vec![];
//! let mut done = false;
//! observable.subscribe(
//!   Subscription::new().on_next(|n| numbers.push(n)).on_complete(|| done = true),
//! );
//! assert_eq!(numbers, vec![1, 2, 3]);
//! assert!(done);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Runs the producer inline, on the subscribing thread |
//! | [`SharedObservable`] | Runs the producer on a dedicated tokio dispatch loop |
//! | [`Subscriber`] | What a producer sees: `next` and `complete` |
//! | [`Subscription`] / [`SharedSubscription`] | Optional `next`, `error` and `complete` callbacks |
//! | [`ProducerError`] | Default producer failure type |
//!
//! A producer fails by returning `Err`. The error goes to the `error`
//! callback; when none is bound, the failure is discarded.
//!
//! ## Feature Flags
//!
//! - **`tokio-scheduler`** (default): the asynchronous [`SharedObservable`]
//!
//! [`Observable`]: observable::Observable
//! [`SharedObservable`]: shared::SharedObservable
//! [`Subscriber`]: observer::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`SharedSubscription`]: subscription::SharedSubscription
//! [`ProducerError`]: error::ProducerError

pub mod error;
pub mod observable;
pub mod observer;
pub mod prelude;
#[cfg(feature = "tokio-scheduler")]
pub mod shared;
pub mod subscription;

pub use prelude::*;
