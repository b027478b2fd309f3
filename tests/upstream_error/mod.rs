use thiserror::Error;

/// The service a request was meant for could not be reached.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("upstream {host} unavailable")]
pub struct UpstreamUnavailable {
    pub host: &'static str,
}
