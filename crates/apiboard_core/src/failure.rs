use std::fmt;

/// Structured reason a fetch failed, as seen by the widget layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Transport failure: connection refused, DNS, TLS, timeout.
    Network(String),
    /// Upstream answered with a non-2xx status.
    HttpStatus(u16),
    /// Upstream refused the call because its quota is spent.
    RateLimited,
    /// Upstream answered 2xx but the body carried an application error.
    Upstream(String),
    /// Anything else: malformed body, bad URL, oversized response.
    Unknown(String),
}

impl FetchFailure {
    /// Human readable message shown in place of widget content.
    pub fn user_message(&self) -> String {
        match self {
            FetchFailure::Network(detail) => {
                format!("Could not reach the service. Check your connection ({detail}).")
            }
            FetchFailure::HttpStatus(code) => format!("Request failed with HTTP status {code}."),
            FetchFailure::RateLimited => {
                "The service rate limit was reached. Try again in an hour.".to_string()
            }
            FetchFailure::Upstream(message) => format!("The service reported an error: {message}"),
            FetchFailure::Unknown(detail) => format!("Unexpected error: {detail}"),
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FetchFailure::RateLimited)
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network(detail) => write!(f, "network failure: {detail}"),
            FetchFailure::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailure::RateLimited => write!(f, "rate limited"),
            FetchFailure::Upstream(message) => write!(f, "upstream error: {message}"),
            FetchFailure::Unknown(detail) => write!(f, "unknown failure: {detail}"),
        }
    }
}
