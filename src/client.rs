// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The client type that all endpoint calls go through.
//!
//! A [`Client`] pairs a [`Token`] with the transport that executes requests, and hands out one
//! lightweight handle per resource group (`client.statuses()`, `client.lists()`, and so on). The
//! handles share the client's internals, so they can be created freely and moved into tasks.
//!
//! [`Client`]: struct.Client.html
//! [`Token`]: enum.Token.html
//!
//! The transport itself sits behind the [`RequestSender`] trait. By default that is a `hyper`
//! client with the TLS stack selected by this crate's cargo features, but anything that can
//! execute an `http::Request<Body>` can be plugged in instead, which is also how this crate's own
//! tests run every endpoint against a recording transport.
//!
//! [`RequestSender`]: trait.RequestSender.html

use std::sync::Arc;

use futures::future::BoxFuture;
use hyper::{Body, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{sign, Token};
use crate::common::*;
use crate::error::Result;

use crate::account::Account;
use crate::blocks::Blocks;
use crate::direct::DirectMessages;
use crate::favorites::Favorites;
use crate::followers::Followers;
use crate::friendships::Friendships;
use crate::geo::Geo;
use crate::help::Help;
use crate::lists::Lists;
use crate::media::Media;
use crate::mutes::Mutes;
use crate::saved_searches::SavedSearches;
use crate::search::Search;
use crate::statuses::Statuses;
use crate::trends::Trends;
use crate::users::Users;

/// The boundary between endpoint wrappers and the HTTP transport.
///
/// Implementations take a fully-assembled, already-signed request and execute it. The default is
/// [`HttpSender`]; tests (or embedders with their own connection management) can supply anything
/// else via [`Client::with_sender`].
///
/// [`HttpSender`]: struct.HttpSender.html
/// [`Client::with_sender`]: struct.Client.html#method.with_sender
pub trait RequestSender: Send + Sync {
    /// Executes the given request, resolving to the response with its body left unread.
    fn send(&self, req: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>>;
}

/// The default [`RequestSender`]: a `hyper` client over the TLS connector selected by cargo
/// features (`native_tls` by default, or one of the `rustls` variants).
///
/// [`RequestSender`]: trait.RequestSender.html
pub struct HttpSender {
    client: hyper::Client<Connector>,
}

#[cfg(feature = "native_tls")]
type Connector = hyper_tls::HttpsConnector<hyper::client::HttpConnector>;
#[cfg(all(feature = "hyper-rustls", not(feature = "native_tls")))]
type Connector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

impl HttpSender {
    /// Creates a sender with a fresh connection pool.
    pub fn new() -> HttpSender {
        #[cfg(feature = "native_tls")]
        let connector = hyper_tls::HttpsConnector::new();
        #[cfg(all(
            feature = "hyper-rustls",
            not(feature = "native_tls"),
            not(feature = "rustls_webpki")
        ))]
        let connector = hyper_rustls::HttpsConnector::with_native_roots();
        #[cfg(all(feature = "rustls_webpki", not(feature = "native_tls")))]
        let connector = hyper_rustls::HttpsConnector::with_webpki_roots();

        HttpSender {
            client: hyper::Client::builder().build(connector),
        }
    }
}

impl Default for HttpSender {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSender for HttpSender {
    fn send(&self, req: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>> {
        let resp = self.client.request(req);
        Box::pin(async move { Ok(resp.await?) })
    }
}

// Used by the token-negotiation flow, which runs before any `Client` exists.
pub(crate) async fn default_send(req: Request<Body>) -> Result<(Headers, Vec<u8>)> {
    read_response(HttpSender::new().send(req)).await
}

async fn read_response(
    resp: BoxFuture<'static, Result<hyper::Response<Body>>>,
) -> Result<(Headers, Vec<u8>)> {
    let (parts, body) = resp.await?.into_parts();
    let body = hyper::body::to_bytes(body).await?;
    inspect_response(parts.status, &parts.headers, &body)?;
    Ok((parts.headers, body.to_vec()))
}

/// The shared internals behind a `Client` and its handles: the credential plus the transport.
pub(crate) struct Core {
    pub(crate) token: Token,
    sender: Box<dyn RequestSender>,
}

impl Core {
    /// Executes the given signed request, inspects it for error payloads, and hands back the
    /// headers with the raw body.
    pub(crate) async fn raw(&self, req: Request<Body>) -> Result<(Headers, Vec<u8>)> {
        read_response(self.sender.send(req)).await
    }

    /// Executes the given signed request and deserializes the JSON response.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        req: Request<Body>,
    ) -> Result<Response<T>> {
        let (headers, body) = self.raw(req).await?;
        deserialize_response(&headers, &body)
    }

    /// Signed GET with a JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ParamList>,
    ) -> Result<Response<T>> {
        self.request(sign::get(url, &self.token, params)?).await
    }

    /// Signed form POST with a JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ParamList>,
    ) -> Result<Response<T>> {
        self.request(sign::post(url, &self.token, params)?).await
    }

    /// Signed POST carrying a JSON body, with a JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<Response<T>> {
        self.request(sign::post_json(url, &self.token, body)?).await
    }

    /// Signed form POST for endpoints that return no body worth decoding; the rate-limit headers
    /// are still captured.
    pub(crate) async fn post_empty(
        &self,
        url: &str,
        params: Option<&ParamList>,
    ) -> Result<Response<()>> {
        let (headers, _) = self.raw(sign::post(url, &self.token, params)?).await?;
        rate_headers(&headers)
    }

    /// Signed DELETE for the endpoints that use it; no body is decoded.
    pub(crate) async fn delete_empty(
        &self,
        url: &str,
        params: Option<&ParamList>,
    ) -> Result<Response<()>> {
        let (headers, _) = self.raw(sign::delete(url, &self.token, params)?).await?;
        rate_headers(&headers)
    }

    /// Same as `post_empty`, for a JSON request body.
    pub(crate) async fn post_json_empty(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<Response<()>> {
        let (headers, _) = self
            .raw(sign::post_json(url, &self.token, body)?)
            .await?;
        rate_headers(&headers)
    }
}

/// A handle to the Twitter API, scoped to one credential.
///
/// All endpoint calls flow through a `Client`: construct one with a [`Token`], then pick the
/// resource group and the method for the endpoint:
///
/// ```rust,no_run
/// # use roost::{Client, Token};
/// # #[tokio::main]
/// # async fn main() {
/// # let token: Token = unimplemented!();
/// let client = Client::new(token);
/// let rustlang = client.users().show("rustlang").await.unwrap();
/// println!("{} (@{})", rustlang.response.name, rustlang.response.screen_name);
/// # }
/// ```
///
/// Every method performs a single HTTP round trip (the cursored collections one per page) and is
/// cancel-on-drop: dropping the returned future or stream aborts the in-flight request and
/// prevents any further page fetches.
#[derive(Clone)]
pub struct Client {
    core: Arc<Core>,
}

impl Client {
    /// Creates a `Client` using the default `hyper`-based transport.
    pub fn new(token: Token) -> Client {
        Client::with_sender(token, HttpSender::new())
    }

    /// Creates a `Client` over a caller-supplied transport.
    pub fn with_sender(token: Token, sender: impl RequestSender + 'static) -> Client {
        Client {
            core: Arc::new(Core {
                token,
                sender: Box::new(sender),
            }),
        }
    }

    /// The token this client signs requests with.
    pub fn token(&self) -> &Token {
        &self.core.token
    }

    /// Account settings and profile management.
    pub fn account(&self) -> Account {
        Account::new(self.core.clone())
    }

    /// Blocking and unblocking accounts.
    pub fn blocks(&self) -> Blocks {
        Blocks::new(self.core.clone())
    }

    /// Direct messages.
    pub fn direct_messages(&self) -> DirectMessages {
        DirectMessages::new(self.core.clone())
    }

    /// Liking tweets and listing liked tweets.
    pub fn favorites(&self) -> Favorites {
        Favorites::new(self.core.clone())
    }

    /// The accounts following a user.
    pub fn followers(&self) -> Followers {
        Followers::new(self.core.clone())
    }

    /// Following, unfollowing, and inspecting relationships between accounts.
    pub fn friendships(&self) -> Friendships {
        Friendships::new(self.core.clone())
    }

    /// Places and geocoding.
    pub fn geo(&self) -> Geo {
        Geo::new(self.core.clone())
    }

    /// Service configuration, supported languages, legal text, and rate-limit status.
    pub fn help(&self) -> Help {
        Help::new(self.core.clone())
    }

    /// List management, membership, and subscriptions.
    pub fn lists(&self) -> Lists {
        Lists::new(self.core.clone())
    }

    /// Media uploads.
    pub fn media(&self) -> Media {
        Media::new(self.core.clone())
    }

    /// Muting and unmuting accounts.
    pub fn mutes(&self) -> Mutes {
        Mutes::new(self.core.clone())
    }

    /// Saved search queries.
    pub fn saved_searches(&self) -> SavedSearches {
        SavedSearches::new(self.core.clone())
    }

    /// Searching tweets.
    pub fn search(&self) -> Search {
        Search::new(self.core.clone())
    }

    /// Posting, deleting, and reading tweets and timelines.
    pub fn statuses(&self) -> Statuses {
        Statuses::new(self.core.clone())
    }

    /// Trending topics by location.
    pub fn trends(&self) -> Trends {
        Trends::new(self.core.clone())
    }

    /// Looking up and searching for user accounts.
    pub fn users(&self) -> Users {
        Users::new(self.core.clone())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording transport, so endpoint methods can be checked for the exact path, verb, and
    //! parameter set they emit.

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use futures::future::BoxFuture;
    use hyper::{Body, Method, Request, StatusCode};

    use crate::auth::{KeyPair, Token};
    use crate::error::Result;

    use super::{Client, RequestSender};

    /// One request as seen by the mock transport, with its parameters decoded from wherever they
    /// were carried (query string or form body).
    pub(crate) struct SentRequest {
        pub method: Method,
        pub path: String,
        pub params: HashMap<String, String>,
        /// A raw JSON request body, for the endpoints that send one instead of form parameters.
        pub json: Option<String>,
    }

    impl SentRequest {
        pub(crate) fn param(&self, key: &str) -> Option<&str> {
            self.params.get(key).map(|s| s.as_str())
        }

        pub(crate) fn json_body(&self) -> serde_json::Value {
            serde_json::from_str(self.json.as_ref().expect("request carried no JSON body"))
                .unwrap()
        }
    }

    #[derive(Clone, Default)]
    pub(crate) struct MockSender {
        queue: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
        log: Arc<Mutex<Vec<SentRequest>>>,
    }

    impl MockSender {
        pub(crate) fn new() -> MockSender {
            MockSender::default()
        }

        /// Queues a `200 OK` response with the given body for the next request.
        pub(crate) fn reply(&self, body: &str) -> &Self {
            self.reply_with(StatusCode::OK, body)
        }

        pub(crate) fn reply_with(&self, status: StatusCode, body: &str) -> &Self {
            self.queue
                .lock()
                .unwrap()
                .push_back((status, body.to_string()));
            self
        }

        pub(crate) fn sent(&self) -> Vec<SentRequest> {
            std::mem::take(&mut *self.log.lock().unwrap())
        }

        /// The single request a one-call test is expected to have made.
        pub(crate) fn sent_once(&self) -> SentRequest {
            let mut sent = self.sent();
            assert_eq!(sent.len(), 1, "expected exactly one request");
            sent.pop().unwrap()
        }
    }

    fn decode_params(input: &str, params: &mut HashMap<String, String>) {
        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let mut halves = pair.splitn(2, '=');
            let key = halves.next().unwrap_or_default();
            let value = halves.next().unwrap_or_default();
            let decode = |s: &str| {
                percent_encoding::percent_decode_str(s)
                    .decode_utf8_lossy()
                    .into_owned()
            };
            params.insert(decode(key), decode(value));
        }
    }

    impl RequestSender for MockSender {
        fn send(&self, req: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>> {
            let queue = self.queue.clone();
            let log = self.log.clone();
            Box::pin(async move {
                let (parts, body) = req.into_parts();
                let body = hyper::body::to_bytes(body).await?;

                let mut params = HashMap::new();
                let mut json = None;
                if let Some(query) = parts.uri.query() {
                    decode_params(query, &mut params);
                }
                let is_form = parts
                    .headers
                    .get(hyper::header::CONTENT_TYPE)
                    .map(|ct| ct == "application/x-www-form-urlencoded")
                    .unwrap_or(false);
                if is_form {
                    decode_params(std::str::from_utf8(&body).unwrap(), &mut params);
                } else if !body.is_empty() {
                    json = Some(String::from_utf8_lossy(&body).into_owned());
                }

                log.lock().unwrap().push(SentRequest {
                    path: format!(
                        "{}{}",
                        parts.uri.scheme_str().map(|s| format!("{}://", s)).unwrap_or_default(),
                        parts
                            .uri
                            .authority()
                            .map(|a| format!("{}{}", a, parts.uri.path()))
                            .unwrap_or_else(|| parts.uri.path().to_string())
                    ),
                    method: parts.method,
                    params,
                    json,
                });

                let (status, body) = queue
                    .lock()
                    .unwrap()
                    .pop_front()
                    .expect("mock transport ran out of queued responses");
                let resp = hyper::Response::builder()
                    .status(status)
                    .header("x-rate-limit-limit", "180")
                    .header("x-rate-limit-remaining", "179")
                    .header("x-rate-limit-reset", "1471720949")
                    .body(Body::from(body))
                    .unwrap();
                Ok(resp)
            })
        }
    }

    /// A client over a fresh mock transport, plus a handle to the transport for assertions.
    pub(crate) fn mock_client() -> (Client, MockSender) {
        let sender = MockSender::new();
        let token = Token::Access {
            consumer: KeyPair::new("consumer", "consumer secret"),
            access: KeyPair::new("access", "access secret"),
        };
        (Client::with_sender(token, sender.clone()), sender)
    }

}

#[cfg(test)]
mod tests {
    use hyper::{Method, StatusCode};

    use super::testing::mock_client;
    use crate::error::Error;

    #[tokio::test]
    async fn get_maps_path_and_params() {
        let (client, mock) = mock_client();
        mock.reply(crate::common::tests::load_file("sample_payloads/user.json").as_str());

        client.users().show("rustlang").await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.path, "https://api.twitter.com/1.1/users/show.json");
        assert_eq!(sent.param("screen_name"), Some("rustlang"));
    }

    #[tokio::test]
    async fn rate_limit_headers_are_captured() {
        let (client, mock) = mock_client();
        mock.reply(crate::common::tests::load_file("sample_payloads/user.json").as_str());

        let resp = client.users().show(783214).await.unwrap();
        assert_eq!(resp.rate_limit_status.limit, 180);
        assert_eq!(resp.rate_limit_status.remaining, 179);
    }

    #[tokio::test]
    async fn error_payloads_become_api_errors() {
        let (client, mock) = mock_client();
        mock.reply_with(
            StatusCode::NOT_FOUND,
            r#"{"errors":[{"code":34,"message":"Sorry, that page does not exist"}]}"#,
        );

        let err = client.users().show("nobody").await.unwrap_err();
        match err {
            Error::ApiError(_, errors) => assert!(errors.has_code(34)),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
