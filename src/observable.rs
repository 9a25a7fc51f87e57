//! Synchronous Observable.
//!
//! Each [`Observable::subscribe`] is a fresh, self-contained run of the
//! producer on the caller's thread. Nothing is persisted between
//! subscriptions.

use std::{
  fmt::{Debug, Formatter},
  marker::PhantomData,
};

use tracing::trace;

use crate::{
  error::ProducerError,
  observer::{Observer, Subscriber},
  subscription::{SubscriberAdapter, Subscription},
};

/// An object wrapping a producer function, offered for repeated subscription.
///
/// The producer runs once per `subscribe`, in full, before `subscribe`
/// returns. Values it emits reach `next` as they are emitted; if it returns
/// `Err`, the error reaches `error` after every earlier event.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use observe::prelude::*;
///
/// let numbers = Observable::new(|subscriber: &mut dyn Subscriber<i32>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.next(3);
///   subscriber.complete();
///   Ok::<(), ProducerError>(())
/// });
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let seen_c = seen.clone();
/// numbers.subscribe(Subscription::new().on_next(move |v| seen_c.borrow_mut().push(v)));
/// assert_eq!(*seen.borrow(), vec![1, 2, 3]);
/// ```
pub struct Observable<F, Item, Err = ProducerError> {
  producer: F,
  _marker: PhantomData<fn(Item) -> Err>,
}

impl<F, Item, Err> Observable<F, Item, Err>
where
  F: Fn(&mut dyn Subscriber<Item>) -> Result<(), Err>,
{
  pub fn new(producer: F) -> Self { Self { producer, _marker: PhantomData } }

  /// Run the producer once for `subscription`, blocking until it returns.
  ///
  /// A producer error is delivered to `error`. When no `error` callback is
  /// bound the failure is discarded and never surfaces as a panic.
  pub fn subscribe(&self, subscription: Subscription<'_, Item, Err>) {
    let mut subscriber = SubscriberAdapter::new(subscription);
    drive(&self.producer, &mut subscriber);
  }
}

impl<F: Clone, Item, Err> Clone for Observable<F, Item, Err> {
  fn clone(&self) -> Self { Self { producer: self.producer.clone(), _marker: PhantomData } }
}

impl<F, Item, Err> Debug for Observable<F, Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Observable").finish_non_exhaustive()
  }
}

/// Invoke `producer` once against `observer`, routing a returned error to the
/// observer's `error` slot.
pub(crate) fn drive<P, O, Item, Err>(producer: &P, observer: &mut O)
where
  P: Fn(&mut dyn Subscriber<Item>) -> Result<(), Err>,
  O: Observer<Item, Err>,
{
  let subscriber: &mut dyn Subscriber<Item> = observer;
  if let Err(err) = producer(subscriber) {
    if !observer.handles_error() {
      trace!("producer failed with no error callback bound, discarding");
    }
    observer.error(err);
  }
}
