//! Integration tests for observe
//!
//! Exercises both observables through the public prelude only.

use std::{cell::RefCell, rc::Rc};
#[cfg(feature = "tokio-scheduler")]
use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use observe::prelude::*;

fn count_to_three(subscriber: &mut dyn Subscriber<i32>) -> Result<(), ProducerError> {
  subscriber.next(1);
  subscriber.next(2);
  subscriber.next(3);

  subscriber.complete();
  Ok(())
}

fn fatal_crash(_: &mut dyn Subscriber<i32>) -> Result<(), ProducerError> {
  Err(ProducerError::new("fatal crash"))
}

#[test]
fn test_observable() {
  let numbers = Rc::new(RefCell::new(Vec::new()));
  let done = Rc::new(RefCell::new(false));

  let observable = Observable::new(count_to_three);
  observable.subscribe(
    Subscription::new()
      .on_next({
        let numbers = numbers.clone();
        move |n| numbers.borrow_mut().push(n)
      })
      .on_complete({
        let done = done.clone();
        move || *done.borrow_mut() = true
      }),
  );

  assert_eq!(*numbers.borrow(), vec![1, 2, 3]);
  assert!(*done.borrow(), "subscription completion should set done to true");
}

#[test]
fn test_observable_error() {
  let mut err_msg = String::new();
  let mut numbers = Vec::new();
  let mut done = false;

  Observable::new(fatal_crash).subscribe(
    Subscription::new()
      .on_next(|n| numbers.push(n))
      .on_error(|err: ProducerError| err_msg = err.to_string())
      .on_complete(|| done = true),
  );

  assert_eq!(err_msg, "fatal crash");
  assert!(numbers.is_empty());
  assert!(!done);
}

#[test]
fn test_observable_is_reusable_and_cloneable() {
  let observable = Observable::new(count_to_three);
  let copy = observable.clone();

  let mut first = vec![];
  let mut second = vec![];
  observable.subscribe(Subscription::new().on_next(|n| first.push(n)));
  copy.subscribe(Subscription::new().on_next(|n| second.push(n)));

  assert_eq!(first, vec![1, 2, 3]);
  assert_eq!(first, second);
}

#[test]
fn test_unbound_callbacks_are_safe() {
  Observable::new(count_to_three).subscribe(Subscription::new());
  Observable::new(fatal_crash).subscribe(Subscription::new().on_next(|_| {}));
}

#[cfg(feature = "tokio-scheduler")]
#[tokio::test]
async fn test_shared_observable() {
  let ctx = CancellationToken::new();
  let numbers = Arc::new(Mutex::new(Vec::new()));
  let (done_tx, done_rx) = tokio::sync::oneshot::channel();
  let mut done_tx = Some(done_tx);

  let observable = SharedObservable::new(ctx.clone(), count_to_three);
  observable
    .subscribe(
      &ctx,
      SharedSubscription::new()
        .on_next({
          let numbers = numbers.clone();
          move |n| numbers.lock().unwrap().push(n)
        })
        .on_complete(move || {
          if let Some(done) = done_tx.take() {
            let _ = done.send(());
          }
        }),
    )
    .await;

  tokio::time::timeout(Duration::from_secs(5), done_rx)
    .await
    .expect("completion never arrived")
    .expect("subscription dropped without completing");
  assert_eq!(*numbers.lock().unwrap(), vec![1, 2, 3]);

  ctx.cancel();
  observable.stopped().await;
}

#[cfg(feature = "tokio-scheduler")]
#[tokio::test]
async fn test_shared_observable_error() {
  let ctx = CancellationToken::new();
  let (err_tx, mut err_rx) = tokio::sync::mpsc::unbounded_channel();

  let observable = SharedObservable::new(ctx.clone(), fatal_crash);
  observable
    .subscribe(
      &ctx,
      SharedSubscription::new().on_error(move |err: ProducerError| {
        let _ = err_tx.send(err.to_string());
      }),
    )
    .await;

  let err_msg = tokio::time::timeout(Duration::from_secs(5), err_rx.recv())
    .await
    .expect("error never arrived");
  assert_eq!(err_msg.as_deref(), Some("fatal crash"));
  // Exactly one error: the channel closes once the subscription is released.
  assert_eq!(err_rx.recv().await, None);

  ctx.cancel();
}

#[cfg(feature = "tokio-scheduler")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shared_observable_stops_with_its_scope() {
  let ctx = CancellationToken::new();
  let runs = Arc::new(Mutex::new(0));
  let observable = SharedObservable::new(ctx.child_token(), {
    let runs = runs.clone();
    move |_: &mut dyn Subscriber<i32>| -> Result<(), ProducerError> {
      *runs.lock().unwrap() += 1;
      Ok(())
    }
  });

  ctx.cancel();
  tokio::time::timeout(Duration::from_secs(5), observable.stopped())
    .await
    .expect("dispatch loop outlived its scope");

  let caller = CancellationToken::new();
  let pending = observable.subscribe(&caller, SharedSubscription::new());
  assert!(tokio::time::timeout(Duration::from_millis(50), pending).await.is_err());
  assert_eq!(*runs.lock().unwrap(), 0);
}
