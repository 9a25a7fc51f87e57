//! Subscription value objects: the callbacks a caller binds to one producer
//! invocation.
//!
//! Two flavours mirror the two observables:
//!
//! | Type | Callbacks | Used by |
//! |------|-----------|---------|
//! | [`Subscription`] | `FnMut + 'a`, may borrow | [`Observable`](crate::observable::Observable) |
//! | [`SharedSubscription`] | `FnMut + Send + 'static` | [`SharedObservable`](crate::shared::SharedObservable) |
//!
//! All three slots are optional. An unset slot turns the matching event into a
//! no-op. In particular an unset `error` slot means producer failures are
//! silently discarded.

use std::fmt::{Debug, Formatter};

use crate::{
  error::ProducerError,
  observer::{Observer, Subscriber},
};

/// Wraps a subscription and implements the producer-facing [`Subscriber`] on
/// top of its optional callback slots.
pub(crate) struct SubscriberAdapter<S>(S);

impl<S> SubscriberAdapter<S> {
  #[inline]
  pub(crate) fn new(subscription: S) -> Self { Self(subscription) }
}

/// Generates a subscription type, its builder API and the adapter impls.
///
/// `$lf` is the optional callback lifetime and `$bound` the extra bounds every
/// callback must satisfy.
macro_rules! impl_subscription {
  (
    $(#[$meta:meta])*
    $name:ident<$($lf:lifetime)?>, bound = [$($bound:tt)*]
  ) => {
    $(#[$meta])*
    pub struct $name<$($lf,)? Item, Err = ProducerError> {
      next: Option<Box<dyn FnMut(Item) $($bound)*>>,
      error: Option<Box<dyn FnMut(Err) $($bound)*>>,
      complete: Option<Box<dyn FnMut() $($bound)*>>,
    }

    impl<$($lf,)? Item, Err> $name<$($lf,)? Item, Err> {
      /// A subscription with every slot unset.
      pub fn new() -> Self { Self { next: None, error: None, complete: None } }

      /// Bind the callback invoked for every emitted value.
      pub fn on_next<F>(mut self, next: F) -> Self
      where
        F: FnMut(Item) $($bound)*,
      {
        self.next = Some(Box::new(next));
        self
      }

      /// Bind the callback invoked when the producer fails.
      pub fn on_error<F>(mut self, error: F) -> Self
      where
        F: FnMut(Err) $($bound)*,
      {
        self.error = Some(Box::new(error));
        self
      }

      /// Bind the callback invoked when the producer signals completion.
      pub fn on_complete<F>(mut self, complete: F) -> Self
      where
        F: FnMut() $($bound)*,
      {
        self.complete = Some(Box::new(complete));
        self
      }

      #[inline]
      pub fn has_next(&self) -> bool { self.next.is_some() }

      #[inline]
      pub fn has_error(&self) -> bool { self.error.is_some() }

      #[inline]
      pub fn has_complete(&self) -> bool { self.complete.is_some() }
    }

    impl<$($lf,)? Item, Err> Default for $name<$($lf,)? Item, Err> {
      fn default() -> Self { Self::new() }
    }

    impl<$($lf,)? Item, Err> Debug for $name<$($lf,)? Item, Err> {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!($name))
          .field("next", &self.has_next())
          .field("error", &self.has_error())
          .field("complete", &self.has_complete())
          .finish()
      }
    }

    impl<$($lf,)? Item, Err> Subscriber<Item> for SubscriberAdapter<$name<$($lf,)? Item, Err>> {
      #[inline]
      fn next(&mut self, value: Item) {
        if let Some(next) = self.0.next.as_mut() {
          next(value);
        }
      }

      #[inline]
      fn complete(&mut self) {
        if let Some(complete) = self.0.complete.as_mut() {
          complete();
        }
      }
    }

    impl<$($lf,)? Item, Err> Observer<Item, Err> for SubscriberAdapter<$name<$($lf,)? Item, Err>> {
      #[inline]
      fn error(&mut self, err: Err) {
        if let Some(error) = self.0.error.as_mut() {
          error(err);
        }
      }

      #[inline]
      fn handles_error(&self) -> bool { self.0.has_error() }
    }
  };
}

impl_subscription!(
  /// Callbacks for one subscription to a synchronous
  /// [`Observable`](crate::observable::Observable).
  ///
  /// Callbacks may borrow from the caller's stack, since the synchronous
  /// observable delivers every event before `subscribe` returns.
  ///
  /// ```rust
  /// use observe::prelude::*;
  ///
  /// let mut total = 0;
  /// let mut done = false;
  /// Observable::new(|subscriber: &mut dyn Subscriber<i32>| -> Result<(), ProducerError> {
  ///   subscriber.next(20);
  ///   subscriber.next(22);
  ///   subscriber.complete();
  ///   Ok(())
  /// })
  /// .subscribe(Subscription::new().on_next(|v| total += v).on_complete(|| done = true));
  ///
  /// assert_eq!(total, 42);
  /// assert!(done);
  /// ```
  Subscription<'a>, bound = [+ 'a]
);

impl_subscription!(
  /// Callbacks for one subscription to a
  /// [`SharedObservable`](crate::shared::SharedObservable).
  ///
  /// The dispatch loop runs the producer on its own task, so callbacks must be
  /// `Send` and own everything they touch.
  SharedSubscription<>, bound = [+ Send + 'static]
);
