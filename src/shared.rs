//! Asynchronous Observable backed by a dedicated dispatch loop.
//!
//! [`SharedObservable::new`] spawns exactly one background task per
//! observable. Callers hand subscriptions to that task through a rendezvous
//! queue and the task runs the producer for each of them, one at a time, in
//! arrival order.
//!
//! ## Lifecycle
//!
//! ```text
//! running ──(scope cancelled | every handle dropped)──> stopped
//! ```
//!
//! Once stopped the loop never restarts. A hand-off attempted after that point
//! never completes; [`SharedObservable::subscribe`] only returns when the
//! caller's own token fires.
//!
//! ## Cancellation is best-effort
//!
//! Cancellation is checked before a hand-off (caller side) and at the top of
//! every loop iteration (loop side). A hand-off racing either check may be
//! dropped silently or accepted and serviced; which one wins is unspecified.
//! Dropped hand-offs produce no callback at all, neither `error` nor
//! `complete`. A caller that gave up while the loop was busy with another
//! subscription is never serviced: the loop skips any hand-off whose caller
//! is no longer waiting for it.
//!
//! ## Producer panics
//!
//! A panicking producer stops the dispatch loop for good, exactly like a
//! cancelled scope: [`SharedObservable::is_stopped`] turns true and later
//! hand-offs never complete. The panic is caught and logged at `warn` level.

use std::{
  fmt::{Debug, Formatter},
  panic::AssertUnwindSafe,
};

use futures::{future, FutureExt};
use tokio::sync::{mpsc, oneshot};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{debug, debug_span, trace, warn, Instrument};

use crate::{
  error::ProducerError,
  observable::drive,
  observer::Subscriber,
  subscription::{SharedSubscription, SubscriberAdapter},
};

/// A subscriber in transit to the dispatch loop, with the signal the loop
/// fires once it has taken it.
struct HandOff<Item, Err> {
  subscriber: SubscriberAdapter<SharedSubscription<Item, Err>>,
  accepted: oneshot::Sender<()>,
}

/// An Observable whose producer runs on its own background task.
///
/// Clones share the same dispatch loop. A producer that panics stops the loop
/// permanently; see the module docs.
///
/// ```rust
/// use observe::prelude::*;
/// use tokio::sync::mpsc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scope = CancellationToken::new();
/// let observable = SharedObservable::new(scope.clone(), |subscriber: &mut dyn Subscriber<i32>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
///   Ok::<(), ProducerError>(())
/// });
///
/// let (tx, mut rx) = mpsc::unbounded_channel();
/// let subscription = SharedSubscription::new().on_next(move |v| {
///   let _ = tx.send(v);
/// });
/// observable.subscribe(&CancellationToken::new(), subscription).await;
///
/// assert_eq!(rx.recv().await, Some(1));
/// assert_eq!(rx.recv().await, Some(2));
///
/// scope.cancel();
/// observable.stopped().await;
/// # }
/// ```
pub struct SharedObservable<Item, Err = ProducerError> {
  requests: mpsc::Sender<HandOff<Item, Err>>,
  dispatch: TaskTracker,
}

impl<Item, Err> SharedObservable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Create the observable and start its dispatch loop, bound to `scope`.
  ///
  /// # Panics
  ///
  /// Panics when called outside a tokio runtime.
  pub fn new<F>(scope: CancellationToken, producer: F) -> Self
  where
    F: Fn(&mut dyn Subscriber<Item>) -> Result<(), Err> + Send + 'static,
  {
    // Capacity one plus the acceptance signal gives rendezvous semantics.
    let (requests, queue) = mpsc::channel(1);
    let dispatch = TaskTracker::new();
    let running = AssertUnwindSafe(dispatch_loop(scope, queue, producer))
      .catch_unwind()
      .map(|exit| {
        if exit.is_err() {
          warn!("producer panicked, dispatch loop stopped");
        }
      });
    dispatch.spawn(running.instrument(debug_span!("dispatch_loop")));
    dispatch.close();

    Self { requests, dispatch }
  }

  /// Hand `subscription` to the dispatch loop.
  ///
  /// Returns once the loop has taken the subscription, not when the producer
  /// has finished; results flow through the callbacks. If `token` is already
  /// cancelled, or fires before the loop takes the subscription, the hand-off
  /// is dropped without invoking any callback.
  pub async fn subscribe(
    &self,
    token: &CancellationToken,
    subscription: SharedSubscription<Item, Err>,
  ) {
    if token.is_cancelled() {
      debug!("subscribe token already cancelled, dropping hand-off");
      return;
    }

    let subscriber = SubscriberAdapter::new(subscription);
    tokio::select! {
      biased;
      _ = token.cancelled() => debug!("subscribe token cancelled before hand-off was accepted"),
      _ = self.hand_off(subscriber) => {}
    }
  }

  async fn hand_off(&self, subscriber: SubscriberAdapter<SharedSubscription<Item, Err>>) {
    let (accepted, acceptance) = oneshot::channel();
    let sent = self.requests.send(HandOff { subscriber, accepted }).await;
    if sent.is_err() || acceptance.await.is_err() {
      // The loop has stopped and nothing will ever take this hand-off.
      future::pending::<()>().await;
    }
  }
}

impl<Item, Err> SharedObservable<Item, Err> {
  /// Whether the dispatch loop has exited.
  pub fn is_stopped(&self) -> bool { self.dispatch.is_empty() }

  /// Wait until the dispatch loop has exited.
  pub async fn stopped(&self) { self.dispatch.wait().await }
}

impl<Item, Err> Clone for SharedObservable<Item, Err> {
  fn clone(&self) -> Self {
    Self { requests: self.requests.clone(), dispatch: self.dispatch.clone() }
  }
}

impl<Item, Err> Debug for SharedObservable<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SharedObservable").field("stopped", &self.is_stopped()).finish()
  }
}

async fn dispatch_loop<F, Item, Err>(
  scope: CancellationToken,
  mut queue: mpsc::Receiver<HandOff<Item, Err>>,
  producer: F,
) where
  F: Fn(&mut dyn Subscriber<Item>) -> Result<(), Err>,
{
  debug!("dispatch loop started");
  loop {
    tokio::select! {
      biased;
      _ = scope.cancelled() => {
        debug!("scope cancelled, dispatch loop stopping");
        break;
      }
      request = queue.recv() => match request {
        Some(HandOff { mut subscriber, accepted }) => {
          // The caller dropped its acceptance signal, so it stopped waiting.
          if accepted.send(()).is_err() {
            trace!("caller abandoned hand-off, skipping subscription");
            continue;
          }
          trace!("servicing subscription");
          drive(&producer, &mut subscriber);
        }
        None => {
          debug!("all observable handles dropped, dispatch loop stopping");
          break;
        }
      },
    }
  }
}
