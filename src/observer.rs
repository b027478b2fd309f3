/// Receiver side of a subscription.
///
/// Implemented by [`Subscriber`](crate::subscribe::Subscriber), which is what a
/// producer receives when an observable is subscribed to.
pub trait Observer {
    type NextFnType;
    type ErrorFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn error(&mut self, _: Self::ErrorFnType);
    fn complete(&mut self);
}
