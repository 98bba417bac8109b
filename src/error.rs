//! Unified error type for freshcritic.
//!
//! All failure modes of the enrichment core funnel into [`Error`].
//! Cancellation is deliberately its own variant: a cancelled attempt is not a
//! failed attempt and must never be reported (or logged) as one.

/// Error type covering catalog access and refresh orchestration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or failed mid-flight.
    #[error("catalog request failed: {source}")]
    Http {
        /// The underlying transport error.
        #[from]
        source: reqwest::Error,
    },

    /// The remote service answered with a non-success status.
    #[error("catalog returned {status} for {url}")]
    Status {
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
        /// The request URL, with query parameters.
        url: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode {what}: {source}")]
    Decode {
        /// What was being decoded (e.g. "search results").
        what: &'static str,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },

    /// A review carried a date string the service should never produce.
    #[error("unparseable review date {value:?}")]
    InvalidReviewDate {
        /// The offending wire value.
        value: String,
    },

    /// Title search paged past the defensive ceiling without terminating.
    #[error("title search for {title:?} exhausted {pages} pages without terminating")]
    SearchExhausted {
        /// The title that was being searched.
        title: String,
        /// How many pages were fetched before giving up.
        pages: u32,
    },

    /// The caller's cancellation token fired while waiting for a request
    /// slot or during the round trip. No refresh state was committed.
    #[error("refresh attempt cancelled")]
    Cancelled,
}

impl Error {
    /// True for failures a later refresh cycle may retry; false for
    /// cancellation, which is not a failure at all.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Error::Cancelled)
    }
}

/// Result type alias using the freshcritic [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_not_transient() {
        assert!(!Error::Cancelled.is_transient());
        assert!(Error::SearchExhausted {
            title: "Brazil".into(),
            pages: 10,
        }
        .is_transient());
    }

    #[test]
    fn display_carries_context() {
        let err = Error::SearchExhausted {
            title: "Brazil".into(),
            pages: 10,
        };
        assert!(err.to_string().contains("Brazil"));
        assert!(err.to_string().contains("10"));
    }
}
