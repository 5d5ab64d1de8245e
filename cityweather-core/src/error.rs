use thiserror::Error;

use crate::service::Service;

/// Failure kinds for a single pipeline run.
///
/// The first four are the pipeline's own taxonomy; `Io` covers the
/// transcript writer, which the orchestrator owns.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP call never produced a usable response: transport error,
    /// timeout, non-success status, or a lost stage worker.
    #[error("{service} request failed: {detail}")]
    RequestFailed { service: Service, detail: String },

    /// The service answered, but the body did not match its documented
    /// shape. Also raised when the daily parallel arrays disagree on
    /// length, which would otherwise cross-mix days silently.
    #[error("could not decode {service} response: {detail}")]
    DecodeFailed { service: Service, detail: String },

    /// The geocoder had no candidates for the query.
    #[error("no geocoding results for \"{query}\"")]
    NotFound { query: String },

    /// A daily forecast entry carried a date that is not YYYY-MM-DD.
    #[error("invalid calendar date \"{date}\"")]
    ParseError { date: String },

    /// Writing the run transcript failed.
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
