// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Infrastructure types that package rate-limit information alongside responses from Twitter.

use std::iter::FromIterator;
use std::vec;

use hyper::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ApiErrors, Error, Result};

use super::Headers;

/// Rate-limit information parsed out of the `X-Rate-Limit-*` headers of a response.
///
/// Not every response carries these headers; any missing value is represented as `-1`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// The rate limit ceiling for the given request.
    pub limit: i32,
    /// The number of requests left for the 15-minute window.
    pub remaining: i32,
    /// The UTC Unix timestamp at which the rate window resets.
    pub reset: i32,
}

impl RateLimit {
    pub(crate) fn from_headers(headers: &Headers) -> Result<RateLimit> {
        Ok(RateLimit {
            limit: rate_limit_header(headers, "x-rate-limit-limit")?,
            remaining: rate_limit_header(headers, "x-rate-limit-remaining")?,
            reset: rate_limit_header(headers, "x-rate-limit-reset")?,
        })
    }
}

fn rate_limit_header(headers: &Headers, name: &'static str) -> Result<i32> {
    let val = headers.get(name).map(|v| v.to_str());
    match val {
        Some(Ok(s)) => Ok(s.parse::<i32>()?),
        Some(Err(_)) => Err(Error::MissingValue(name)),
        None => Ok(-1),
    }
}

/// A helper struct to wrap response data with accompanying rate-limit information.
///
/// This is returned by every method that calls the API, so that the rate-limit status of the
/// relevant endpoint is always at hand.
#[derive(Debug)]
pub struct Response<T> {
    /// The rate-limit headers returned with this response.
    pub rate_limit_status: RateLimit,
    /// The decoded response from the request.
    pub response: T,
}

impl<T> Response<T> {
    pub(crate) fn new(rate_limit_status: RateLimit, response: T) -> Response<T> {
        Response {
            rate_limit_status,
            response,
        }
    }

    /// Convert this `Response` into one holding the output of the given function, carrying the
    /// rate-limit information across.
    pub fn map<F, U>(self, fun: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            rate_limit_status: self.rate_limit_status,
            response: fun(self.response),
        }
    }
}

/// Iterator returned by calling `.into_iter()` on a `Response<Vec<T>>`.
///
/// Each item is wrapped in its own `Response`, duplicating the rate-limit information of the
/// parent so it stays available however the collection is consumed.
pub struct ResponseIter<T> {
    rate_limit_status: RateLimit,
    resp_iter: vec::IntoIter<T>,
}

impl<T> Iterator for ResponseIter<T> {
    type Item = Response<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.resp_iter
            .next()
            .map(|resp| Response::new(self.rate_limit_status, resp))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.resp_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for ResponseIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.resp_iter
            .next_back()
            .map(|resp| Response::new(self.rate_limit_status, resp))
    }
}

impl<T> ExactSizeIterator for ResponseIter<T> {
    fn len(&self) -> usize {
        self.resp_iter.len()
    }
}

impl<T> IntoIterator for Response<Vec<T>> {
    type Item = Response<T>;
    type IntoIter = ResponseIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        ResponseIter {
            rate_limit_status: self.rate_limit_status,
            resp_iter: self.response.into_iter(),
        }
    }
}

impl<T> FromIterator<Response<T>> for Response<Vec<T>> {
    /// Collects a sequence of responses into one, keeping the most pessimistic set of rate-limit
    /// headers seen: the latest reset time, or at equal reset times the lowest remaining count.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Response<T>>,
    {
        let mut resp = Response::new(
            RateLimit {
                limit: -1,
                remaining: -1,
                reset: -1,
            },
            Vec::new(),
        );

        for item in iter {
            let status = item.rate_limit_status;
            if status.reset > resp.rate_limit_status.reset {
                resp.rate_limit_status = status;
            } else if status.reset == resp.rate_limit_status.reset
                && status.remaining < resp.rate_limit_status.remaining
            {
                resp.rate_limit_status = status;
            }
            resp.response.push(item.response);
        }

        resp
    }
}

/// Checks the given response body for an error payload, then the status code for failure.
///
/// Twitter attaches structured error payloads to non-success responses, and those are more useful
/// than the bare status code, so the body is probed first. An error payload with code 88 and a
/// reset header becomes the dedicated `RateLimit` variant.
pub(crate) fn inspect_response(status: StatusCode, headers: &Headers, body: &[u8]) -> Result<()> {
    if let Ok(errors) = serde_json::from_slice::<ApiErrors>(body) {
        if errors.has_code(88) {
            if let Ok(limit) = RateLimit::from_headers(headers) {
                if limit.reset != -1 {
                    return Err(Error::RateLimit(limit.reset));
                }
            }
        }
        return Err(Error::ApiError(headers.clone(), errors));
    }

    if !status.is_success() {
        return Err(Error::BadStatus(status));
    }

    Ok(())
}

/// Deserializes the given (already-inspected) response body into the target type, packaging the
/// rate-limit headers alongside it.
pub(crate) fn deserialize_response<T: DeserializeOwned>(
    headers: &Headers,
    body: &[u8],
) -> Result<Response<T>> {
    let parsed = serde_json::from_slice::<T>(body)?;
    Ok(Response::new(RateLimit::from_headers(headers)?, parsed))
}

/// Builds an empty `Response` from a set of headers.
///
/// A couple of endpoints return rate-limit information that is worth keeping even when the body
/// reports an error (list membership checks), and a few return no body at all (media APPEND, DM
/// read receipts); this covers both.
pub(crate) fn rate_headers(headers: &Headers) -> Result<Response<()>> {
    Ok(Response::new(RateLimit::from_headers(headers)?, ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers_with_rate(limit: &str, remaining: &str, reset: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-rate-limit-limit", HeaderValue::from_str(limit).unwrap());
        headers.insert("x-rate-limit-remaining", HeaderValue::from_str(remaining).unwrap());
        headers.insert("x-rate-limit-reset", HeaderValue::from_str(reset).unwrap());
        headers
    }

    #[test]
    fn rate_limit_from_headers() {
        let headers = headers_with_rate("180", "179", "1471720949");
        let limit = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(limit.limit, 180);
        assert_eq!(limit.remaining, 179);
        assert_eq!(limit.reset, 1471720949);

        let limit = RateLimit::from_headers(&Headers::new()).unwrap();
        assert_eq!(limit.limit, -1);
    }

    #[test]
    fn error_payload_beats_status() {
        let body = br#"{"errors":[{"code":34,"message":"Sorry, that page does not exist"}]}"#;
        let err = inspect_response(StatusCode::NOT_FOUND, &Headers::new(), body).unwrap_err();
        match err {
            Error::ApiError(_, errors) => assert!(errors.has_code(34)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rate_limit_error() {
        let headers = headers_with_rate("15", "0", "1471720949");
        let body = br#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#;
        let err = inspect_response(StatusCode::TOO_MANY_REQUESTS, &headers, body).unwrap_err();
        match err {
            Error::RateLimit(reset) => assert_eq!(reset, 1471720949),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn plain_bad_status() {
        let err = inspect_response(StatusCode::INTERNAL_SERVER_ERROR, &Headers::new(), b"oops")
            .unwrap_err();
        match err {
            Error::BadStatus(status) => assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn collect_keeps_worst_rate_limit() {
        let mk = |remaining, reset| {
            Response::new(
                RateLimit {
                    limit: 15,
                    remaining,
                    reset,
                },
                (),
            )
        };
        let collected: Response<Vec<()>> = vec![mk(10, 100), mk(3, 100), mk(7, 100)]
            .into_iter()
            .collect();
        assert_eq!(collected.rate_limit_status.remaining, 3);
        assert_eq!(collected.response.len(), 3);
    }
}
