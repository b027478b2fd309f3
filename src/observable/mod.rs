//! The `observable` module provides `Observable`, a cold and synchronous source
//! of values that can be subscribed to any number of times.

use std::rc::Rc;

use tracing::{trace, warn};

use crate::errors::{ObservableError, ProducerError};
use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, Teardown, Unsubscribeable,
};

type Producer<T, E> = Rc<dyn Fn(&mut Subscriber<T, E>) -> Result<Teardown, ProducerError>>;

/// The `Observable` struct represents a source of values that can be observed.
///
/// An `Observable` only describes how to produce values. Nothing happens until
/// it is subscribed to, and every subscription runs the producer again from the
/// start with its own `Subscriber`.
///
/// # Example: custom synchronous `Observable`
///
/// The producer runs inside `subscribe`, so this blocks until all ten values
/// have been emitted.
///
/// ```
/// use rxlite::{Observable, Observer, ObserverHandlers, Subscribeable, Teardown};
///
/// // Create a custom observable that emits values from 1 to 10.
/// let emit_10_observable = Observable::<u32, ()>::new(|subscriber| {
///     for i in 1..=10 {
///         // Stop early if a handler cancelled the subscription.
///         if subscriber.is_unsubscribed() {
///             break;
///         }
///         subscriber.next(i);
///     }
///     subscriber.complete();
///
///     // Nothing to clean up.
///     Teardown::Nil
/// });
///
/// let handlers = ObserverHandlers::<u32, ()>::new()
///     .on_next(|v| println!("Emitted {}", v))
///     .on_complete(|| println!("Completed"));
///
/// emit_10_observable.subscribe(handlers).unwrap();
/// ```
///
/// # Example: emitting a fixed sequence
///
/// ```
/// use rxlite::{Observable, ObserverHandlers, Subscribeable, Unsubscribeable};
///
/// let observable = Observable::<_, String>::from(["GET", "POST"]);
///
/// let subscription = observable
///     .subscribe(ObserverHandlers::new().on_next(|method: &str| println!("{method}")))
///     .unwrap();
///
/// // Already complete, so this only confirms the subscription is released.
/// subscription.unsubscribe();
/// assert!(subscription.is_closed());
/// ```
pub struct Observable<T, E> {
    producer: Producer<T, E>,
}

impl<T: 'static, E: 'static> Observable<T, E> {
    /// Creates a new `Observable` with the provided producer.
    ///
    /// The producer receives the `Subscriber` for one subscription, emits into it
    /// and returns the [`Teardown`] to run when that subscription ends.
    pub fn new(producer: impl Fn(&mut Subscriber<T, E>) -> Teardown + 'static) -> Self {
        Self::try_new(move |subscriber| Ok(producer(subscriber)))
    }

    /// Creates a new `Observable` whose producer may fail.
    ///
    /// An `Err` from the producer is handed back to the caller of `subscribe` as
    /// [`ObservableError::Producer`].
    pub fn try_new(
        producer: impl Fn(&mut Subscriber<T, E>) -> Result<Teardown, ProducerError> + 'static,
    ) -> Self {
        Observable {
            producer: Rc::new(producer),
        }
    }

    /// Creates an `Observable` that emits each of `values` in order and then
    /// completes.
    ///
    /// The values are captured once and cloned out on every subscription, so
    /// each subscriber sees the whole sequence.
    #[allow(clippy::should_implement_trait)]
    pub fn from<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();

        Observable::new(move |subscriber| {
            for value in &values {
                if subscriber.is_unsubscribed() {
                    break;
                }
                subscriber.next(value.clone());
            }
            subscriber.complete();

            Teardown::from_fn(|| trace!("unsubscribed from sequence"))
        })
    }

    /// Creates an `Observable` that completes without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Observable::new(|subscriber| {
            subscriber.complete();
            Teardown::Nil
        })
    }

    /// Creates an `Observable` that immediately ends with `err`.
    pub fn throw_error(err: E) -> Self
    where
        E: Clone,
    {
        Observable::new(move |subscriber| {
            subscriber.error(err.clone());
            Teardown::Nil
        })
    }
}

impl<T, E> Clone for Observable<T, E> {
    fn clone(&self) -> Self {
        Observable {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T, E> Subscribeable for Observable<T, E> {
    type ObsType = T;
    type ErrType = E;

    fn subscribe_with(&self, mut s: Subscriber<T, E>) -> Result<Subscription, ObservableError> {
        let subscription = s.subscription();
        trace!("subscribing");

        match (self.producer)(&mut s) {
            Ok(teardown) => {
                trace!(?teardown, closed = s.is_unsubscribed(), "producer returned");
                s.attach_teardown(teardown);
                Ok(subscription)
            }
            Err(source) => {
                warn!(error = %source, "producer failed, abandoning subscription");
                s.unsubscribe();
                Err(ObservableError::producer(source))
            }
        }
    }
}
