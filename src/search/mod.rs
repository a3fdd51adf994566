// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for searching for tweets.
//!
//! Searching starts with [`Search::tweets`], which hands back a builder for the optional
//! parameters of the query. `call` executes it:
//!
//! ```rust,no_run
//! # use roost::Client;
//! # #[tokio::main]
//! # async fn main() {
//! # let client: Client = unimplemented!();
//! use roost::search::ResultType;
//!
//! let search = client
//!     .search()
//!     .tweets("rocket launch")
//!     .result_type(ResultType::Recent)
//!     .count(50)
//!     .call()
//!     .await
//!     .unwrap();
//!
//! for tweet in &search.response.statuses {
//!     println!("{}", tweet.text);
//! }
//! # }
//! ```
//!
//! The result keeps the query parameters around, so [`SearchResult::older`] and
//! [`SearchResult::newer`] can re-run the same search windowed past either end of the tweets
//! already seen.
//!
//! Note that the standard search index only reaches back about a week; this is a sampled search
//! over recent tweets, not an archive lookup.
//!
//! [`Search::tweets`]: struct.Search.html#method.tweets
//! [`SearchResult::older`]: struct.SearchResult.html#method.older
//! [`SearchResult::newer`]: struct.SearchResult.html#method.newer

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::statuses::Tweet;

/// Handle for the tweet-search endpoint.
pub struct Search {
    core: Arc<Core>,
}

impl Search {
    pub(crate) fn new(core: Arc<Core>) -> Search {
        Search { core }
    }

    /// Begin building a search with the given query. See [the API documentation][search-ops] for
    /// the query operators the endpoint understands.
    ///
    /// [search-ops]: https://developer.twitter.com/en/docs/tweets/search/guides/standard-operators
    pub fn tweets(&self, query: impl Into<CowStr>) -> SearchBuilder {
        SearchBuilder {
            core: self.core.clone(),
            params: SearchParams {
                query: query.into(),
                lang: None,
                result_type: None,
                count: None,
                until: None,
                geocode: None,
                since_id: None,
                max_id: None,
            },
        }
    }
}

/// Which classes of tweet a search should return.
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ResultType {
    /// Return only the most recent tweets matching the query.
    #[display(fmt = "recent")]
    Recent,
    /// Return only the most popular tweets matching the query.
    #[display(fmt = "popular")]
    Popular,
    /// A mix of recent and popular tweets.
    #[display(fmt = "mixed")]
    Mixed,
}

/// A radius around a coordinate, for geocoded searches.
#[derive(Debug, Copy, Clone)]
pub enum Distance {
    /// A radius given in miles.
    Miles(f32),
    /// A radius given in kilometers.
    Kilometers(f32),
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Distance::Miles(radius) => write!(f, "{}mi", radius),
            Distance::Kilometers(radius) => write!(f, "{}km", radius),
        }
    }
}

#[derive(Clone)]
struct SearchParams {
    query: CowStr,
    lang: Option<CowStr>,
    result_type: Option<ResultType>,
    count: Option<u32>,
    until: Option<(u32, u32, u32)>,
    geocode: Option<(f64, f64, Distance)>,
    since_id: Option<u64>,
    max_id: Option<u64>,
}

impl SearchParams {
    fn to_params(&self) -> ParamList {
        ParamList::new()
            .extended_tweets()
            .add_param("q", self.query.clone())
            .add_opt_param("lang", self.lang.clone())
            .add_opt_param("result_type", self.result_type.map_string())
            .add_opt_param("count", self.count.map_string())
            .add_opt_param(
                "until",
                self.until.map(|(y, m, d)| format!("{}-{:02}-{:02}", y, m, d)),
            )
            .add_opt_param(
                "geocode",
                self.geocode
                    .map(|(lat, long, radius)| format!("{},{},{}", lat, long, radius)),
            )
            .add_opt_param("since_id", self.since_id.map_string())
            .add_opt_param("max_id", self.max_id.map_string())
    }
}

#[derive(Deserialize)]
struct RawSearch {
    statuses: Vec<Tweet>,
    search_metadata: SearchMetadata,
}

/// An in-progress tweet search.
#[must_use = "search builders do nothing unless `call`ed"]
pub struct SearchBuilder {
    core: Arc<Core>,
    params: SearchParams,
}

impl SearchBuilder {
    /// Restrict matches to tweets the server detected as the given ISO 639-1 language.
    pub fn lang(mut self, lang: impl Into<CowStr>) -> Self {
        self.params.lang = Some(lang.into());
        self
    }

    /// What classes of tweet to return. Defaults to `Mixed` server-side.
    pub fn result_type(mut self, result_type: ResultType) -> Self {
        self.params.result_type = Some(result_type);
        self
    }

    /// How many tweets to return, at most 100. Defaults to 15 server-side.
    pub fn count(mut self, count: u32) -> Self {
        self.params.count = Some(count);
        self
    }

    /// Only return tweets created before the given date (year, month, day).
    ///
    /// Keep in mind that the search index only reaches back about a week, so dates older than
    /// that return nothing.
    pub fn until(mut self, year: u32, month: u32, day: u32) -> Self {
        self.params.until = Some((year, month, day));
        self
    }

    /// Restrict matches to tweets located within the given radius of the given coordinate.
    ///
    /// Location is preferentially taken from each tweet's own geotag, falling back to the
    /// author's profile location.
    pub fn geocode(mut self, latitude: f64, longitude: f64, radius: Distance) -> Self {
        self.params.geocode = Some((latitude, longitude, radius));
        self
    }

    /// Only return tweets with IDs strictly greater than the given ID.
    pub fn since_tweet(mut self, since_id: u64) -> Self {
        self.params.since_id = Some(since_id);
        self
    }

    /// Only return tweets with IDs no greater than the given ID.
    pub fn max_tweet(mut self, max_id: u64) -> Self {
        self.params.max_id = Some(max_id);
        self
    }

    /// Executes the search.
    pub async fn call(self) -> Result<Response<SearchResult>> {
        let SearchBuilder { core, params } = self;
        let resp: Response<RawSearch> = core
            .get(links::search::TWEETS, Some(&params.to_params()))
            .await?;

        Ok(resp.map(|raw| SearchResult {
            core,
            params,
            statuses: raw.statuses,
            search_metadata: raw.search_metadata,
        }))
    }
}

/// One page of search results, paired with the query that produced it.
pub struct SearchResult {
    core: Arc<Core>,
    params: SearchParams,
    /// The tweets that matched the query.
    pub statuses: Vec<Tweet>,
    /// Search metadata returned alongside the matches.
    pub search_metadata: SearchMetadata,
}

impl SearchResult {
    /// Re-run this search, windowed to tweets strictly older than everything in this page.
    pub async fn older(&self) -> Result<Response<SearchResult>> {
        let mut params = self.params.clone();
        params.since_id = None;
        params.max_id = self.statuses.iter().map(|t| t.id).min().map(|id| id - 1);

        SearchBuilder {
            core: self.core.clone(),
            params,
        }
        .call()
        .await
    }

    /// Re-run this search, windowed to tweets strictly newer than everything in this page.
    pub async fn newer(&self) -> Result<Response<SearchResult>> {
        let mut params = self.params.clone();
        params.max_id = None;
        params.since_id = self.statuses.iter().map(|t| t.id).max();

        SearchBuilder {
            core: self.core.clone(),
            params,
        }
        .call()
        .await
    }
}

/// The metadata block the search endpoint attaches to each page of results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMetadata {
    /// The largest tweet ID in this page.
    pub max_id: u64,
    /// The `since_id` the query ran with.
    pub since_id: u64,
    /// How long the query took server-side, in seconds.
    pub completed_in: f64,
    /// The query text, as the server normalized it.
    pub query: String,
    /// The number of results requested.
    pub count: u32,
    /// A prebuilt query-string for the next (older) page of results, if the server believes there
    /// is one.
    pub next_results: Option<String>,
    /// A prebuilt query-string that refreshes this search from the newest end.
    pub refresh_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn query_parameters_map_through() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/search.json"));

        client
            .search()
            .tweets("rocket launch")
            .lang("en")
            .result_type(ResultType::Recent)
            .count(50)
            .geocode(37.7821, -122.4, Distance::Kilometers(25.0))
            .call()
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/search/tweets.json");
        assert_eq!(sent.param("q"), Some("rocket launch"));
        assert_eq!(sent.param("lang"), Some("en"));
        assert_eq!(sent.param("result_type"), Some("recent"));
        assert_eq!(sent.param("count"), Some("50"));
        assert_eq!(sent.param("geocode"), Some("37.7821,-122.4,25km"));
        assert_eq!(sent.param("until"), None);
    }

    #[tokio::test]
    async fn older_windows_below_the_loaded_page() {
        let (client, mock) = mock_client();
        let payload = load_file("sample_payloads/search.json");
        mock.reply(&payload).reply(&payload);

        let page = client.search().tweets("rust").call().await.unwrap();
        assert_eq!(page.response.statuses.len(), 2);
        page.response.older().await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[1].param("q"), Some("rust"));
        // smallest ID in the fixture is 850006245121695744
        assert_eq!(sent[1].param("max_id"), Some("850006245121695743"));
        assert_eq!(sent[1].param("since_id"), None);
    }

    #[tokio::test]
    async fn metadata_is_decoded() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/search.json"));

        let page = client.search().tweets("rust").call().await.unwrap();
        let meta = &page.response.search_metadata;
        assert_eq!(meta.query, "rust");
        assert_eq!(meta.count, 15);
        assert!(meta.next_results.is_some());
    }
}
