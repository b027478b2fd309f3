use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use tracing::{debug, trace};

use crate::errors::ObservableError;
use crate::observer::Observer;

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by an observable stream.
pub trait Subscribeable {
    /// The type of items emitted by the observable stream.
    type ObsType;

    /// The type of the payload delivered through the `error` channel.
    type ErrType;

    /// Subscribes an already constructed `Subscriber`.
    ///
    /// Use this when a handler needs to cancel the subscription it belongs to:
    /// take a handle with [`Subscriber::subscription`] before passing the
    /// subscriber in.
    ///
    /// # Errors
    ///
    /// Returns [`ObservableError::Producer`] if the producer fails before it
    /// hands back its teardown.
    fn subscribe_with(
        &self,
        s: Subscriber<Self::ObsType, Self::ErrType>,
    ) -> Result<Subscription, ObservableError>;

    /// Subscribes to the observable stream with the given set of handlers.
    ///
    /// The producer runs synchronously, so every value the source has to offer
    /// has been delivered by the time this returns. The returned `Subscription`
    /// can still be used to release the subscription explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ObservableError::Producer`] if the producer fails before it
    /// hands back its teardown. No terminal handler is called in that case.
    fn subscribe(
        &self,
        handlers: ObserverHandlers<Self::ObsType, Self::ErrType>,
    ) -> Result<Subscription, ObservableError> {
        self.subscribe_with(Subscriber::new(handlers))
    }
}

/// A trait for types that can be unsubscribed, releasing the resources held by
/// the subscription and stopping further deliveries.
pub trait Unsubscribeable {
    /// Ends the subscription.
    ///
    /// Calling this more than once is harmless: only the first call changes
    /// state and runs the teardown.
    fn unsubscribe(&self);
}

type NextFn<T> = Box<dyn FnMut(T)>;
type ErrorFn<E> = Box<dyn FnMut(E)>;
type CompleteFn = Box<dyn FnMut()>;

/// The callbacks a subscriber supplies. Each one is optional.
///
/// ```
/// use rxlite::ObserverHandlers;
///
/// let handlers = ObserverHandlers::<u32, String>::new()
///     .on_next(|v| println!("Emitted {v}"))
///     .on_complete(|| println!("Completed"));
/// # drop(handlers);
/// ```
pub struct ObserverHandlers<T, E> {
    next_fn: Option<NextFn<T>>,
    error_fn: Option<ErrorFn<E>>,
    complete_fn: Option<CompleteFn>,
}

impl<T, E> ObserverHandlers<T, E> {
    /// Creates a handler set with no callbacks. Add them with `on_next`,
    /// `on_error` and `on_complete`.
    #[must_use]
    pub fn new() -> Self {
        ObserverHandlers {
            next_fn: None,
            error_fn: None,
            complete_fn: None,
        }
    }

    /// Creates a handler set with all three callbacks.
    #[must_use]
    pub fn with(
        next_fn: impl FnMut(T) + 'static,
        error_fn: impl FnMut(E) + 'static,
        complete_fn: impl FnMut() + 'static,
    ) -> Self {
        ObserverHandlers {
            next_fn: Some(Box::new(next_fn)),
            error_fn: Some(Box::new(error_fn)),
            complete_fn: Some(Box::new(complete_fn)),
        }
    }

    /// Set the function called for every emitted value.
    #[must_use]
    pub fn on_next(mut self, next_fn: impl FnMut(T) + 'static) -> Self {
        self.next_fn = Some(Box::new(next_fn));
        self
    }

    /// Set the function called when the stream ends with an error.
    ///
    /// Without it, stream errors are dropped silently; the subscription still
    /// ends.
    #[must_use]
    pub fn on_error(mut self, error_fn: impl FnMut(E) + 'static) -> Self {
        self.error_fn = Some(Box::new(error_fn));
        self
    }

    /// Set the function called when the stream completes.
    #[must_use]
    pub fn on_complete(mut self, complete_fn: impl FnMut() + 'static) -> Self {
        self.complete_fn = Some(Box::new(complete_fn));
        self
    }
}

impl<T, E> Default for ObserverHandlers<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for ObserverHandlers<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverHandlers")
            .field("next", &self.next_fn.is_some())
            .field("error", &self.error_fn.is_some())
            .field("complete", &self.complete_fn.is_some())
            .finish()
    }
}

/// Cleanup handed back by a producer, run once when its subscription ends.
///
/// When the subscription ends through `error` or `complete`, the teardown runs
/// after the terminal handler returns, and also if that handler panics.
pub enum Teardown {
    /// Nothing to release.
    Nil,

    /// Cleanup defined by a function.
    Logic(Box<dyn FnOnce()>),

    /// If one subscription depends on another. Wrapped subscription's unsubscribe
    /// will be called upon unsubscribing.
    Wrapped(Subscription),
}

impl Teardown {
    /// Wraps a cleanup closure.
    pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
        Teardown::Logic(Box::new(f))
    }

    fn run(self) {
        match self {
            Teardown::Nil => (),
            Teardown::Logic(fnc) => fnc(),
            Teardown::Wrapped(subscription) => subscription.unsubscribe(),
        }
    }
}

impl<F: FnOnce() + 'static> From<F> for Teardown {
    fn from(f: F) -> Self {
        Teardown::Logic(Box::new(f))
    }
}

impl From<Subscription> for Teardown {
    fn from(subscription: Subscription) -> Self {
        Teardown::Wrapped(subscription)
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Teardown::Nil => f.write_str("Nil"),
            Teardown::Logic(_) => f.write_str("Logic(..)"),
            Teardown::Wrapped(s) => f.debug_tuple("Wrapped").field(s).finish(),
        }
    }
}

// Lifecycle state shared by a subscriber and every handle onto it.
#[derive(Default)]
struct Lifecycle {
    unsubscribed: Cell<bool>,
    teardown: RefCell<Option<Teardown>>,
}

impl Lifecycle {
    /// Flips to unsubscribed. Returns `false` if another call got there first.
    fn terminate(&self) -> bool {
        !self.unsubscribed.replace(true)
    }

    fn release(&self) {
        // Take it out of the slot first; the teardown may call back into us.
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            trace!(?teardown, "running teardown");
            teardown.run();
        }
    }

    fn close(&self) {
        if self.terminate() {
            trace!("unsubscribed");
            self.release();
        }
    }

    fn attach(&self, teardown: Teardown) {
        if self.unsubscribed.get() {
            // The producer already ended the stream before returning.
            teardown.run();
        } else {
            *self.teardown.borrow_mut() = Some(teardown);
        }
    }
}

// Runs the teardown on drop, so a panicking terminal handler still releases.
struct ReleaseOnDrop<'a>(&'a Lifecycle);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// The observer a producer emits into.
///
/// Created by `subscribe` around the caller's [`ObserverHandlers`]. It forwards
/// values until the stream errors, completes or is unsubscribed, and drops
/// everything after that.
pub struct Subscriber<T, E> {
    handlers: ObserverHandlers<T, E>,
    lifecycle: Rc<Lifecycle>,
}

impl<T, E> Subscriber<T, E> {
    /// Creates an active subscriber around `handlers`.
    ///
    /// `subscribe` does this for you; build one directly when a handler needs a
    /// [`Subscription`] onto itself before the producer starts.
    #[must_use]
    pub fn new(handlers: ObserverHandlers<T, E>) -> Self {
        Subscriber {
            handlers,
            lifecycle: Rc::default(),
        }
    }

    /// Returns `true` once the subscription has ended. Producers emitting long
    /// sequences should check this between emissions.
    ///
    /// ```text
    /// Observable::new(|subscriber| {
    ///     for v in source {
    ///         if subscriber.is_unsubscribed() { break; }
    ///         subscriber.next(v);
    ///     }
    ///     // ...
    /// });
    /// ```
    #[must_use]
    pub fn is_unsubscribed(&self) -> bool {
        self.lifecycle.unsubscribed.get()
    }

    /// Returns a handle onto this subscriber's subscription.
    #[must_use]
    pub fn subscription(&self) -> Subscription {
        Subscription {
            lifecycle: Rc::clone(&self.lifecycle),
        }
    }

    pub(crate) fn attach_teardown(&self, teardown: Teardown) {
        self.lifecycle.attach(teardown);
    }
}

impl<T, E> Observer for Subscriber<T, E> {
    type NextFnType = T;
    type ErrorFnType = E;

    fn next(&mut self, v: Self::NextFnType) {
        if self.is_unsubscribed() {
            return;
        }
        if let Some(nfn) = &mut self.handlers.next_fn {
            (nfn)(v);
        }
    }

    fn error(&mut self, e: Self::ErrorFnType) {
        if !self.lifecycle.terminate() {
            return;
        }
        debug!("subscriber errored");
        let _release = ReleaseOnDrop(&self.lifecycle);
        if let Some(efn) = &mut self.handlers.error_fn {
            (efn)(e);
        }
    }

    fn complete(&mut self) {
        if !self.lifecycle.terminate() {
            return;
        }
        debug!("subscriber completed");
        let _release = ReleaseOnDrop(&self.lifecycle);
        if let Some(cfn) = &mut self.handlers.complete_fn {
            (cfn)();
        }
    }
}

impl<T, E> Unsubscribeable for Subscriber<T, E> {
    fn unsubscribe(&self) {
        self.lifecycle.close();
    }
}

impl<T, E> fmt::Debug for Subscriber<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("handlers", &self.handlers)
            .field("unsubscribed", &self.is_unsubscribed())
            .finish()
    }
}

/// Handle onto a running subscription, used to cancel it.
///
/// Clones refer to the same subscription.
#[derive(Clone)]
pub struct Subscription {
    lifecycle: Rc<Lifecycle>,
}

impl Subscription {
    /// Returns `true` once the subscription has ended, whether through an
    /// error, completion or an explicit `unsubscribe`.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lifecycle.unsubscribed.get()
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(&self) {
        self.lifecycle.close();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
