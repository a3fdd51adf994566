// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types and functions used to authenticate calls to Twitter.
//!
//! Every call to the API needs a [`Token`]: either an OAuth 1.0a consumer/access key-pair
//! combination that represents a user who has authorized your app, or an app-only Bearer token.
//! The functions in this module negotiate those tokens with Twitter. Once you have one, hand it to
//! [`Client::new`] and call endpoints through the resource handles.
//!
//! [`Token`]: enum.Token.html
//! [`Client::new`]: ../struct.Client.html#method.new
//!
//! The access-token "three-legged" dance goes like this:
//!
//! 1. [`request_token`] with your consumer keys (and a callback URL, or `"oob"` for the PIN
//!    flow) to get a temporary request token.
//! 2. Send the user to [`authorize_url`] (or [`authenticate_url`] for "Sign in with Twitter")
//!    and receive the verifier from the callback or PIN.
//! 3. [`access_token`] with all of the above to obtain the final `Token`, along with the ID and
//!    screen name of the user who authorized you.
//!
//! Bearer tokens skip the dance entirely: [`bearer_token`] exchanges your consumer keys for an
//! app-only token with higher rate limits and no user context.
//!
//! [`request_token`]: fn.request_token.html
//! [`authorize_url`]: fn.authorize_url.html
//! [`authenticate_url`]: fn.authenticate_url.html
//! [`access_token`]: fn.access_token.html
//! [`bearer_token`]: fn.bearer_token.html

use hyper::Method;
use serde::Deserialize;

use crate::common::*;
use crate::error::{Error, Result};
use crate::{client, links};

pub(crate) mod sign;

pub(crate) use self::sign::RequestBuilder;

/// A key/secret pair representing the app or the user half of an OAuth 1.0a credential.
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// A key used to identify an application or user.
    pub key: CowStr,
    /// A private key used to sign messages from an application or user.
    pub secret: CowStr,
}

impl KeyPair {
    /// Creates a KeyPair with the given key and secret.
    pub fn new(key: impl Into<CowStr>, secret: impl Into<CowStr>) -> KeyPair {
        KeyPair {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// A token that can be used to sign requests to Twitter.
///
/// Conceptually, an `Access` token represents one user's authorization of your app: all calls are
/// made, and rate-limited, on that user's behalf. A `Bearer` token represents just your app, with
/// no user context; endpoints that act on "the authenticated user" will reject it.
#[derive(Debug, Clone)]
pub enum Token {
    /// An OAuth 1.0a access token, combining the keys of the app and of the user authorizing it.
    Access {
        /// The consumer key identifying the application.
        consumer: KeyPair,
        /// The access key identifying the user.
        access: KeyPair,
    },
    /// An OAuth 2.0 Bearer token, representing an application without user context.
    Bearer(String),
}

/// With the given consumer keys, ask Twitter for a request token to begin the authorization flow.
///
/// `callback` is the URL Twitter will redirect the user to afterwards, or `"oob"` to use the
/// PIN-based flow.
pub async fn request_token(con_token: &KeyPair, callback: impl Into<String>) -> Result<KeyPair> {
    let req = RequestBuilder::new(Method::POST, links::auth::REQUEST_TOKEN)
        .oauth_callback(callback.into())
        .sign_keys(con_token, None)?;

    let (_, body) = client::default_send(req).await?;
    let body = std::str::from_utf8(&body)
        .map_err(|_| Error::InvalidResponse("request token response was not utf-8", None))?;

    let pair = urlencoded_keys(body);
    Ok(KeyPair::new(
        pair("oauth_token").ok_or(Error::MissingValue("oauth_token"))?,
        pair("oauth_token_secret").ok_or(Error::MissingValue("oauth_token_secret"))?,
    ))
}

/// With the given request token, return a URL that a user can navigate to to authorize your app.
pub fn authorize_url(request_token: &KeyPair) -> String {
    let mut url = url::Url::parse(links::auth::AUTHORIZE).unwrap();
    url.query_pairs_mut()
        .append_pair("oauth_token", &request_token.key);
    url.into()
}

/// With the given request token, return a URL for the "Sign in with Twitter" flow.
///
/// This is the same as [`authorize_url`], except that a user who has already accepted your app is
/// redirected immediately instead of being asked again. Your app must have "Sign in with Twitter"
/// enabled for this URL to work.
///
/// [`authorize_url`]: fn.authorize_url.html
pub fn authenticate_url(request_token: &KeyPair) -> String {
    let mut url = url::Url::parse(links::auth::AUTHENTICATE).unwrap();
    url.query_pairs_mut()
        .append_pair("oauth_token", &request_token.key);
    url.into()
}

/// With the given consumer keys, request token, and verifier, ask Twitter for the final access
/// token.
///
/// On success, this returns the assembled `Token` along with the numeric ID and screen name of the
/// user who authorized the app.
pub async fn access_token(
    con_token: KeyPair,
    request_token: &KeyPair,
    verifier: impl Into<String>,
) -> Result<(Token, u64, String)> {
    let req = RequestBuilder::new(Method::POST, links::auth::ACCESS_TOKEN)
        .oauth_verifier(verifier.into())
        .sign_keys(&con_token, Some(request_token))?;

    let (_, body) = client::default_send(req).await?;
    let body = std::str::from_utf8(&body)
        .map_err(|_| Error::InvalidResponse("access token response was not utf-8", None))?;

    let pair = urlencoded_keys(body);
    let access = KeyPair::new(
        pair("oauth_token").ok_or(Error::MissingValue("oauth_token"))?,
        pair("oauth_token_secret").ok_or(Error::MissingValue("oauth_token_secret"))?,
    );
    let user_id = pair("user_id")
        .ok_or(Error::MissingValue("user_id"))?
        .parse::<u64>()?;
    let screen_name = pair("screen_name").ok_or(Error::MissingValue("screen_name"))?;

    Ok((
        Token::Access {
            consumer: con_token,
            access,
        },
        user_id,
        screen_name,
    ))
}

#[derive(Deserialize)]
struct BearerResponse {
    access_token: String,
}

/// With the given consumer keys, request an app-only Bearer token.
pub async fn bearer_token(con_token: &KeyPair) -> Result<Token> {
    let params = ParamList::new().add_param("grant_type", "client_credentials");
    let req = RequestBuilder::new(Method::POST, links::auth::BEARER_TOKEN)
        .form_params(&params)
        .consumer_bearer(con_token)?;

    let (_, body) = client::default_send(req).await?;
    let decoded: BearerResponse = serde_json::from_slice(&body)?;
    Ok(Token::Bearer(decoded.access_token))
}

/// Invalidate the given Bearer token using the consumer keys that created it.
///
/// Passing an `Access` token here returns an error without making a network call.
pub async fn invalidate_bearer(con_token: &KeyPair, token: &Token) -> Result<()> {
    let bearer = match token {
        Token::Bearer(b) => b,
        Token::Access { .. } => {
            return Err(Error::InvalidResponse(
                "only bearer tokens can be invalidated",
                None,
            ))
        }
    };

    let params = ParamList::new().add_param("access_token", bearer.clone());
    let req = RequestBuilder::new(Method::POST, links::auth::INVALIDATE_BEARER)
        .form_params(&params)
        .consumer_bearer(con_token)?;

    client::default_send(req).await?;
    Ok(())
}

// Twitter's token endpoints respond with urlencoded bodies, not JSON.
fn urlencoded_keys(body: &str) -> impl Fn(&str) -> Option<String> + '_ {
    move |key: &str| {
        body.split('&').find_map(|pair| {
            let mut halves = pair.splitn(2, '=');
            match (halves.next(), halves.next()) {
                (Some(k), Some(v)) if k == key => Some(v.to_string()),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_body_lookup() {
        let body = "oauth_token=abcd&oauth_token_secret=efgh&user_id=24&screen_name=twitterapi";
        let pair = urlencoded_keys(body);

        assert_eq!(pair("oauth_token").as_deref(), Some("abcd"));
        assert_eq!(pair("user_id").as_deref(), Some("24"));
        assert_eq!(pair("missing"), None);
    }

    #[test]
    fn authorize_urls() {
        let request_token = KeyPair::new("abcd", "");
        assert_eq!(
            authorize_url(&request_token),
            "https://api.twitter.com/oauth/authorize?oauth_token=abcd"
        );
        assert_eq!(
            authenticate_url(&request_token),
            "https://api.twitter.com/oauth/authenticate?oauth_token=abcd"
        );
    }
}
