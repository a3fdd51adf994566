// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Miscellaneous service-level information: configuration, languages, legal text, and the
//! client's standing against the rate limits.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::entities::MediaSizes;
use crate::error::Result;
use crate::links;

/// Service-wide configuration values: upload limits, URL lengths, and reserved usernames.
///
/// Twitter recommends loading this about once a day and treating the values as static in
/// between.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// The character count a media attachment deducts from a tweet.
    pub characters_reserved_per_media: u32,
    /// The maximum size of an uploaded photo, in bytes.
    pub photo_size_limit: u64,
    /// The sizes a tweeted photo is rendered at.
    pub photo_sizes: MediaSizes,
    /// The character count a `t.co`-wrapped link occupies.
    pub short_url_length: u32,
    /// The character count a `t.co`-wrapped HTTPS link occupies.
    pub short_url_length_https: u32,
    /// The character limit for a direct message.
    pub dm_text_character_limit: u32,
    /// Top-level URL path segments that can never be usernames.
    pub non_username_paths: Vec<String>,
}

/// A language supported by the service, for use in `lang` parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    /// The BCP 47 code for the language.
    pub code: String,
    /// The English name of the language.
    pub name: String,
    /// The production status of the language's support.
    pub status: String,
}

/// The authenticated credential's standing against the rate limits, per endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitStatus {
    /// Which credential the report applies to.
    pub rate_limit_context: RateLimitContext,
    /// Per-endpoint windows, grouped by resource family and keyed by endpoint path (like
    /// `/statuses/home_timeline`).
    pub resources: HashMap<String, HashMap<String, RateLimitWindow>>,
}

/// The credential a [`RateLimitStatus`] was computed for.
///
/// [`RateLimitStatus`]: struct.RateLimitStatus.html
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitContext {
    /// The (abbreviated) access token the report applies to.
    pub access_token: String,
}

/// One endpoint's rate-limit window.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitWindow {
    /// The call ceiling for the current window.
    pub limit: i32,
    /// The calls remaining in the current window.
    pub remaining: i32,
    /// The UTC Unix timestamp at which the window resets.
    pub reset: i32,
}

#[derive(Deserialize)]
struct PrivacyEnvelope {
    privacy: String,
}

#[derive(Deserialize)]
struct TosEnvelope {
    tos: String,
}

/// Handle for the service-information endpoints.
pub struct Help {
    core: Arc<Core>,
}

impl Help {
    pub(crate) fn new(core: Arc<Core>) -> Help {
        Help { core }
    }

    /// Load the current service configuration.
    pub async fn configuration(&self) -> Result<Response<Configuration>> {
        self.core.get(links::help::CONFIGURATION, None).await
    }

    /// Load the languages the service supports.
    pub async fn languages(&self) -> Result<Response<Vec<Language>>> {
        self.core.get(links::help::LANGUAGES, None).await
    }

    /// Load the service's privacy policy, as plain text.
    pub async fn privacy(&self) -> Result<Response<String>> {
        let resp: Response<PrivacyEnvelope> = self.core.get(links::help::PRIVACY, None).await?;
        Ok(resp.map(|envelope| envelope.privacy))
    }

    /// Load the service's terms of service, as plain text.
    pub async fn tos(&self) -> Result<Response<String>> {
        let resp: Response<TosEnvelope> = self.core.get(links::help::TOS, None).await?;
        Ok(resp.map(|envelope| envelope.tos))
    }

    /// Load the client's current rate-limit standing across every endpoint family.
    ///
    /// Individual responses already carry their own endpoint's window in
    /// [`Response::rate_limit_status`]; this call is for surveying everything at once without
    /// spending calls against the endpoints themselves.
    ///
    /// [`Response::rate_limit_status`]: ../struct.Response.html#structfield.rate_limit_status
    pub async fn rate_limit_status(&self) -> Result<Response<RateLimitStatus>> {
        self.core.get(links::help::RATE_LIMIT_STATUS, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[test]
    fn parse_configuration() {
        let content = load_file("sample_payloads/configuration.json");
        let config: Configuration = serde_json::from_str(&content).unwrap();

        assert_eq!(config.characters_reserved_per_media, 24);
        assert_eq!(config.short_url_length, 23);
        assert_eq!(config.photo_sizes.thumb.w, 150);
        assert!(config.non_username_paths.contains(&"oauth".to_string()));
    }

    #[test]
    fn parse_rate_limit_status() {
        let content = load_file("sample_payloads/rate_limit_status.json");
        let status: RateLimitStatus = serde_json::from_str(&content).unwrap();

        let window = &status.resources["statuses"]["/statuses/home_timeline"];
        assert_eq!(window.limit, 15);
        assert_eq!(window.remaining, 14);
        assert_eq!(status.rate_limit_context.access_token, "786491-24zE");
    }

    #[tokio::test]
    async fn legal_text_unwraps_the_envelope() {
        let (client, mock) = mock_client();
        mock.reply(r#"{"privacy": "Twitter respects your privacy."}"#);

        let privacy = client.help().privacy().await.unwrap();
        assert_eq!(privacy.response, "Twitter respects your privacy.");

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/help/privacy.json");
    }

    #[tokio::test]
    async fn rate_limit_status_is_a_plain_get() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/rate_limit_status.json"));

        client.help().rate_limit_status().await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(
            sent.path,
            "https://api.twitter.com/1.1/application/rate_limit_status.json"
        );
        assert_eq!(sent.method, hyper::Method::GET);
    }
}
