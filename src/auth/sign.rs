// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Request assembly and OAuth signing.
//!
//! Everything that goes over the wire is built here: the parameters are folded into a query
//! string or form body, and the whole request is signed into an `Authorization` header. The
//! signature scheme is OAuth 1.0a with HMAC-SHA1, which signs the method, the URL, and every
//! parameter, so the parameter set handed to the signer must be exactly the set that is sent.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac, NewMac};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Method, Request};
use rand::Rng;
use sha1::Sha1;

use crate::common::*;
use crate::error::Result;

use super::{KeyPair, Token};

/// An `oauth_callback` or `oauth_verifier` parameter attached during the token-negotiation flow.
/// Regular API calls carry neither.
#[derive(Clone, Debug)]
enum FlowParam {
    Callback(String),
    Verifier(String),
    None,
}

impl FlowParam {
    fn as_callback(&self) -> Option<&str> {
        match self {
            FlowParam::Callback(c) => Some(c),
            _ => None,
        }
    }

    fn as_verifier(&self) -> Option<&str> {
        match self {
            FlowParam::Verifier(v) => Some(v),
            _ => None,
        }
    }
}

/// Assembles a single signed request: verb, URL, parameters, body, and authorization.
pub(crate) struct RequestBuilder<'a> {
    base_uri: &'a str,
    method: Method,
    params: Option<ParamList>,
    query: Option<String>,
    body: Option<(Body, &'static str)>,
    flow: FlowParam,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(method: Method, base_uri: &'a str) -> Self {
        RequestBuilder {
            base_uri,
            method,
            params: None,
            query: None,
            body: None,
            flow: FlowParam::None,
        }
    }

    /// Appends the given parameters to the URL as a query string. They are also folded into the
    /// signature.
    pub(crate) fn query_params(mut self, params: &ParamList) -> Self {
        self.merge_params(params);
        self.query = Some(params.to_urlencoded());
        self
    }

    /// Sends the given parameters as an `application/x-www-form-urlencoded` body. They are also
    /// folded into the signature.
    pub(crate) fn form_params(mut self, params: &ParamList) -> Self {
        self.merge_params(params);
        self.body = Some((
            Body::from(params.to_urlencoded()),
            "application/x-www-form-urlencoded",
        ));
        self
    }

    /// Sends the given value as a JSON body. JSON bodies are *not* part of the OAuth signature;
    /// only endpoints that document a JSON request body accept this.
    pub(crate) fn json_body(mut self, body: &impl serde::Serialize) -> Result<Self> {
        let rendered = serde_json::to_string(body)?;
        self.body = Some((Body::from(rendered), "application/json; charset=UTF-8"));
        Ok(self)
    }

    pub(crate) fn oauth_callback(mut self, callback: String) -> Self {
        self.flow = FlowParam::Callback(callback);
        self
    }

    pub(crate) fn oauth_verifier(mut self, verifier: String) -> Self {
        self.flow = FlowParam::Verifier(verifier);
        self
    }

    /// Signs the request with the given token and assembles it.
    pub(crate) fn sign_token(self, token: &Token) -> Result<Request<Body>> {
        match token {
            Token::Access { consumer, access } => self.sign_keys(consumer, Some(access)),
            Token::Bearer(bearer) => {
                let authorization = format!("Bearer {}", bearer);
                self.assemble(authorization)
            }
        }
    }

    /// Signs the request with explicit consumer (and optionally token) keys. Used during the
    /// token-negotiation flow, where no complete `Token` exists yet.
    pub(crate) fn sign_keys(self, consumer: &KeyPair, token: Option<&KeyPair>) -> Result<Request<Body>> {
        let header = OAuthHeader::sign(
            &self.method,
            self.base_uri,
            self.params.as_ref(),
            &self.flow,
            consumer,
            token,
        );
        self.assemble(header.to_string())
    }

    /// Attaches the Basic authorization derived from the consumer keys. Only the bearer-token
    /// endpoints accept this scheme.
    pub(crate) fn consumer_bearer(self, consumer: &KeyPair) -> Result<Request<Body>> {
        let encoded = base64::encode(&format!("{}:{}", consumer.key, consumer.secret));
        self.assemble(format!("Basic {}", encoded))
    }

    fn merge_params(&mut self, params: &ParamList) {
        match self.params {
            Some(ref mut mine) => mine.combine(params.clone()),
            None => self.params = Some(params.clone()),
        }
    }

    fn assemble(self, authorization: String) -> Result<Request<Body>> {
        let full_url = match self.query {
            Some(query) => format!("{}?{}", self.base_uri, query),
            None => self.base_uri.to_string(),
        };

        let request = Request::builder()
            .method(self.method)
            .uri(full_url)
            .header(AUTHORIZATION, authorization);

        let request = match self.body {
            Some((body, content)) => request.header(CONTENT_TYPE, content).body(body)?,
            None => request.body(Body::empty())?,
        };

        Ok(request)
    }
}

/// A signed OAuth `Authorization` header. The `Display` impl renders it in the header format the
/// server expects.
struct OAuthHeader {
    params: BTreeMap<&'static str, Cow<'static, str>>,
}

impl OAuthHeader {
    /// Derives the HMAC-SHA1 signature over the given request per the OAuth 1.0a spec: a sorted,
    /// percent-encoded query of all parameters (call parameters and `oauth_*` parameters alike),
    /// prefixed by the percent-encoded method and URL.
    fn sign(
        method: &Method,
        uri: &str,
        params: Option<&ParamList>,
        flow: &FlowParam,
        consumer: &KeyPair,
        token: Option<&KeyPair>,
    ) -> OAuthHeader {
        let timestamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(dur) => dur,
            Err(err) => err.duration(),
        }
        .as_secs();
        let nonce = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(32)
            .map(char::from)
            .collect::<String>();

        let signable = params
            .cloned()
            .unwrap_or_default()
            .add_param("oauth_consumer_key", consumer.key.clone())
            .add_param("oauth_nonce", nonce.clone())
            .add_param("oauth_signature_method", "HMAC-SHA1")
            .add_param("oauth_timestamp", timestamp.to_string())
            .add_param("oauth_version", "1.0")
            .add_opt_param("oauth_token", token.map(|k| k.key.clone()))
            .add_opt_param("oauth_callback", flow.as_callback().map(|s| s.to_string()))
            .add_opt_param("oauth_verifier", flow.as_verifier().map(|s| s.to_string()));

        let mut query = signable
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>();
        query.sort();
        let query = query.join("&");

        let base = format!(
            "{}&{}&{}",
            percent_encode(method.as_str()),
            percent_encode(uri),
            percent_encode(&query)
        );
        let signing_key = format!(
            "{}&{}",
            percent_encode(&consumer.secret),
            percent_encode(token.map(|k| k.secret.as_ref()).unwrap_or(""))
        );

        // HMAC-SHA1 accepts keys of any length
        let mut digest =
            Hmac::<Sha1>::new_from_slice(signing_key.as_bytes()).expect("invalid HMAC key length");
        digest.update(base.as_bytes());
        let signature = base64::encode(digest.finalize().into_bytes());

        let mut header_params: BTreeMap<&'static str, Cow<'static, str>> = BTreeMap::new();
        header_params.insert("oauth_consumer_key", consumer.key.clone());
        header_params.insert("oauth_nonce", nonce.into());
        header_params.insert("oauth_signature", signature.into());
        header_params.insert("oauth_signature_method", "HMAC-SHA1".into());
        header_params.insert("oauth_timestamp", timestamp.to_string().into());
        header_params.insert("oauth_version", "1.0".into());
        if let Some(token) = token {
            header_params.insert("oauth_token", token.key.clone());
        }
        match flow {
            FlowParam::Callback(c) => {
                header_params.insert("oauth_callback", c.clone().into());
            }
            FlowParam::Verifier(v) => {
                header_params.insert("oauth_verifier", v.clone().into());
            }
            FlowParam::None => (),
        }

        OAuthHeader {
            params: header_params,
        }
    }
}

impl fmt::Display for OAuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OAuth ")?;

        let mut first = true;
        for (k, v) in &self.params {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}=\"{}\"", k, percent_encode(v))?;
        }

        Ok(())
    }
}

/// Assemble a signed GET request to the given URL with the given parameters.
pub(crate) fn get(uri: &str, token: &Token, params: Option<&ParamList>) -> Result<Request<Body>> {
    let mut request = RequestBuilder::new(Method::GET, uri);
    if let Some(params) = params {
        request = request.query_params(params);
    }
    request.sign_token(token)
}

/// Assemble a signed POST request to the given URL, with the given parameters as its form body.
pub(crate) fn post(uri: &str, token: &Token, params: Option<&ParamList>) -> Result<Request<Body>> {
    let mut request = RequestBuilder::new(Method::POST, uri);
    if let Some(params) = params {
        request = request.form_params(params);
    }
    request.sign_token(token)
}

/// Assemble a signed DELETE request to the given URL with the given parameters.
///
/// Only a couple of endpoints (the DM events API) use the DELETE verb; parameters travel in the
/// query string as with GET.
pub(crate) fn delete(uri: &str, token: &Token, params: Option<&ParamList>) -> Result<Request<Body>> {
    let mut request = RequestBuilder::new(Method::DELETE, uri);
    if let Some(params) = params {
        request = request.query_params(params);
    }
    request.sign_token(token)
}

/// Assemble a signed POST request to the given URL with the given JSON body.
///
/// Endpoints with JSON request bodies don't fold any parameters into the OAuth signature; take
/// care if the endpoint you're calling lists query parameters as part of its contract.
pub(crate) fn post_json(
    uri: &str,
    token: &Token,
    body: &impl serde::Serialize,
) -> Result<Request<Body>> {
    RequestBuilder::new(Method::POST, uri)
        .json_body(body)?
        .sign_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_header(req: &Request<Body>) -> &str {
        req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap()
    }

    #[test]
    fn consumer_bearer_header() {
        let consumer = KeyPair::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "L8qq9PZyRg6ieKGEKhZolGC0vJWLw8iEJ88DRdyOg",
        );
        let req = RequestBuilder::new(Method::POST, "https://api.twitter.com/oauth2/token")
            .consumer_bearer(&consumer)
            .unwrap();

        assert_eq!(
            auth_header(&req),
            "Basic eHZ6MWV2RlM0d0VFUFRHRUZQSEJvZzpMOHFxOVBaeVJnNmllS0dFS2hab2xHQzB2SldMdzhpRUo4OERSZHlPZw=="
        );
    }

    #[test]
    fn signed_get_has_oauth_header() {
        let token = Token::Access {
            consumer: KeyPair::new("consumer", "consumer_secret"),
            access: KeyPair::new("access", "access_secret"),
        };
        let params = ParamList::new().add_param("id", "12345");
        let req = get("https://api.twitter.com/1.1/statuses/show.json", &token, Some(&params))
            .unwrap();

        assert_eq!(req.method(), Method::GET);
        assert_eq!(
            req.uri().to_string(),
            "https://api.twitter.com/1.1/statuses/show.json?id=12345"
        );
        let header = auth_header(&req);
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"consumer\""));
        assert!(header.contains("oauth_token=\"access\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_signature="));
    }

    #[test]
    fn bearer_token_skips_signing() {
        let token = Token::Bearer("AAAA".to_string());
        let req = get("https://api.twitter.com/1.1/users/show.json", &token, None).unwrap();
        assert_eq!(auth_header(&req), "Bearer AAAA");
    }

    #[test]
    fn post_carries_form_body() {
        let token = Token::Bearer("AAAA".to_string());
        let params = ParamList::new().add_param("status", "hello world");
        let req = post("https://api.twitter.com/1.1/statuses/update.json", &token, Some(&params))
            .unwrap();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }
}
