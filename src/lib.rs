//! `rxlite` is a minimal push-based reactive stream for synchronous event-driven
//! code.
//!
//! An [`Observable`] describes how to produce a sequence of values. Subscribing
//! to it with a set of [`ObserverHandlers`] runs its producer to completion on
//! the caller's thread, delivering every value to the `next` handler and ending
//! with at most one `error` or `complete`. The returned [`Subscription`] can be
//! used to cancel the stream, which also runs the producer's [`Teardown`].
//!
//! ```
//! use rxlite::{Observable, ObserverHandlers, Subscribeable, Unsubscribeable};
//!
//! let requests = Observable::<_, String>::from(["GET /user", "POST /user"]);
//!
//! let subscription = requests
//!     .subscribe(
//!         ObserverHandlers::new()
//!             .on_next(|req: &str| println!("handling {req}"))
//!             .on_error(|e: String| eprintln!("{e}"))
//!             .on_complete(|| println!("done")),
//!     )
//!     .unwrap();
//!
//! subscription.unsubscribe();
//! ```
//!
//! Observables are cold: each `subscribe` call runs the producer again with its
//! own subscriber, so the same observable can be replayed any number of times.
//! Everything here is single-threaded; the types are not `Send`.

mod errors;
mod observable;
pub mod observer;
mod subscription;

pub use errors::*;
pub use observable::*;
pub use observer::Observer;
pub use subscription::subscribe;
pub use subscription::subscribe::{
    ObserverHandlers, Subscribeable, Subscriber, Subscription, Teardown, Unsubscribeable,
};
