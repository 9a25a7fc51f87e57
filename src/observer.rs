//! Producer-facing capability and the adapter-side observer.
//!
//! A producer only ever sees a [`Subscriber`]: it can push values with
//! `next` and signal normal termination with `complete`. Failure is not part
//! of that capability; a producer fails by returning `Err` and the
//! observable routes it to the bound `error` callback through [`Observer`].

// ============================================================================
// Subscriber Trait
// ============================================================================

/// The handle a producer receives for one subscription.
///
/// Every call is forwarded immediately and in order to the callbacks the
/// caller bound at subscribe time. Calls whose callback slot is unset are
/// no-ops.
///
/// ```rust
/// use observe::prelude::*;
///
/// fn countdown(subscriber: &mut dyn Subscriber<u32>) -> Result<(), ProducerError> {
///   for n in (1..=3).rev() {
///     subscriber.next(n);
///   }
///   subscriber.complete();
///   Ok(())
/// }
///
/// let observable = Observable::new(countdown);
/// let mut seen = vec![];
/// observable.subscribe(Subscription::new().on_next(|n| seen.push(n)));
/// assert_eq!(seen, vec![3, 2, 1]);
/// ```
pub trait Subscriber<Item> {
  /// Deliver one value to the subscription's `next` callback.
  fn next(&mut self, value: Item);

  /// Signal normal termination to the subscription's `complete` callback.
  fn complete(&mut self);
}

// ============================================================================
// Observer Trait
// ============================================================================

/// Adapter side of a subscription: a [`Subscriber`] that can also be told
/// about a producer failure.
///
/// Only the observables call `error`, after the producer has returned.
pub(crate) trait Observer<Item, Err>: Subscriber<Item> {
  fn error(&mut self, err: Err);

  /// Whether an `error` callback is bound. An unbound slot means failures are
  /// discarded.
  fn handles_error(&self) -> bool;
}
