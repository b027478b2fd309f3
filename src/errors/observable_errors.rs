use thiserror::Error;

/// Boxed error a fallible producer returns instead of a teardown.
pub type ProducerError = Box<dyn std::error::Error>;

/// Failure of a subscription attempt itself.
///
/// This is distinct from a stream-level error, which is delivered to the
/// subscriber's `error` handler as an ordinary terminal event. An
/// `ObservableError` means the producer gave up before handing back its
/// teardown, so no terminal callback has been delivered.
#[derive(Debug, Error)]
pub enum ObservableError {
    /// The producer returned an error while running.
    #[error("observable producer failed")]
    Producer {
        #[source]
        source: ProducerError,
    },

    /// A producer failed with a plain description.
    #[error("{0}")]
    Message(String),
}

impl ObservableError {
    /// Shorthand for `ObservableError::Message`.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn producer(source: ProducerError) -> Self {
        Self::Producer { source }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn producer_error_keeps_source() {
        let inner = ObservableError::message("socket closed");
        let err = ObservableError::producer(Box::new(inner));

        assert_eq!(err.to_string(), "observable producer failed");
        let source = err.source().expect("producer error should carry a source");
        assert_eq!(source.to_string(), "socket closed");
    }

    #[test]
    fn message_has_no_source() {
        let err = ObservableError::message("bad input");
        assert_eq!(err.to_string(), "bad input");
        assert!(err.source().is_none());
    }
}
