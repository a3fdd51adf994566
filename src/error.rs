// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A composite error type for errors that can occur while interacting with Twitter.

use std::fmt;

use serde::Deserialize;

/// Convenient alias to a Result containing this crate's [`Error`].
///
/// [`Error`]: enum.Error.html
pub type Result<T> = std::result::Result<T, Error>;

/// Represents the set of errors that can occur while calling the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The response from Twitter was formatted incorrectly or in an unexpected manner. The enclosed
    /// values are an explanation of what went wrong and, if available, the body that failed to
    /// parse.
    #[error("Invalid response received: {0}")]
    InvalidResponse(&'static str, Option<String>),
    /// The response from Twitter was missing an expected value. The enclosed value is the name of
    /// the field that was missing.
    #[error("Value missing from response: {0}")]
    MissingValue(&'static str),
    /// Twitter returned an error payload alongside the response. The enclosed values are the
    /// headers of the response, so rate-limit information is still available, and the decoded
    /// error list.
    #[error("Errors returned by Twitter: {1}")]
    ApiError(crate::common::Headers, ApiErrors),
    /// The rate limit for this endpoint has been reached. The enclosed value is the UTC Unix
    /// timestamp at which the rate-limit window resets.
    #[error("Rate limit reached, hold until {0}")]
    RateLimit(i32),
    /// An attempted media upload failed during server-side processing. The enclosed value is the
    /// error reported by the processing pipeline.
    #[error("Media processing error: {0}")]
    MediaError(MediaError),
    /// The response from Twitter gave a status code that was neither a success nor something this
    /// crate could decode an error payload from.
    #[error("Error status received: {0}")]
    BadStatus(hyper::StatusCode),
    /// The network session encountered an error while sending the request or reading the response.
    #[error("Network error: {0}")]
    NetError(#[from] hyper::Error),
    /// The request could not be assembled into a valid HTTP message.
    #[error("HTTP error: {0}")]
    HttpError(#[from] hyper::http::Error),
    /// An error occurred while reading or writing data outside the network session.
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    /// An error occurred while deserializing a JSON response body.
    #[error("JSON deserialize error: {0}")]
    DeserializeError(#[from] serde_json::Error),
    /// A rate-limit header could not be parsed as a number.
    #[error("Header could not be parsed: {0}")]
    HeaderParseError(#[from] std::num::ParseIntError),
}

/// Represents the collection of error payloads Twitter can attach to a response.
///
/// Twitter reports errors as a list, even when only one error occurred. `errors` preserves that
/// list; the `Display` implementation prints each entry on its own line.
#[derive(Debug, Deserialize)]
pub struct ApiErrors {
    /// The list of errors returned in the payload.
    pub errors: Vec<ApiErrorCode>,
}

impl ApiErrors {
    /// Returns whether any error in the payload carries the given error code.
    pub fn has_code(&self, code: i32) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", e)?;
            first = false;
        }
        Ok(())
    }
}

/// Represents a single error payload returned with an erroneous API call.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ApiErrorCode {
    /// The numeric error code. Twitter's error codes are distinct from HTTP status codes; the full
    /// list is in their API documentation.
    pub code: i32,
    /// The error message accompanying the code.
    pub message: String,
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}: {}", self.code, self.message)
    }
}

/// An error reported by the media upload processing pipeline.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MediaError {
    /// A numeric error code assigned to the error.
    pub code: i32,
    /// A short name given to the error.
    pub name: String,
    /// The full text of the error message.
    pub message: String,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (#{}): {}", self.name, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_payload() {
        let payload = r#"{"errors":[{"code":34,"message":"Sorry, that page does not exist"}]}"#;
        let errors: ApiErrors = serde_json::from_str(payload).unwrap();

        assert_eq!(errors.errors.len(), 1);
        assert!(errors.has_code(34));
        assert!(!errors.has_code(88));
        assert_eq!(errors.errors[0].message, "Sorry, that page does not exist");
    }
}
