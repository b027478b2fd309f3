//! Provides structures and traits related to subscription management.
//!
//! This module includes `ObserverHandlers` and `Subscriber` for handling observed
//! values, errors and completion, `Subscription` for cancelling a running
//! subscription, and `Teardown` for the cleanup a producer hands back.
pub mod subscribe;
