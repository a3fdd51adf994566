// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with trending topics.
//!
//! Trends are keyed by [Yahoo! WOEIDs][woeid]; use [`Trends::available`] or [`Trends::closest`]
//! to find the WOEID for a location, then [`Trends::place`] to load its trends. The WOEID `1`
//! refers to the whole world.
//!
//! [woeid]: https://en.wikipedia.org/wiki/WOEID
//! [`Trends::available`]: struct.Trends.html#method.available
//! [`Trends::closest`]: struct.Trends.html#method.closest
//! [`Trends::place`]: struct.Trends.html#method.place

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;

/// A location that trend information is available for.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendLocation {
    /// The name of this location.
    pub name: String,
    /// The name of the country this location is in, if applicable.
    pub country: Option<String>,
    /// The two-letter country code for this location, if applicable.
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    /// The WOEID of this location's parent. Zero for the worldwide location.
    #[serde(rename = "parentid")]
    pub parent_id: Option<u64>,
    /// The kind of location this is.
    #[serde(rename = "placeType")]
    pub place_type: LocationType,
    /// The WOEID used to key trend queries for this location.
    pub woeid: u32,
}

/// The kind of location a [`TrendLocation`] describes.
///
/// [`TrendLocation`]: struct.TrendLocation.html
#[derive(Debug, Clone, Deserialize)]
pub struct LocationType {
    /// A numeric code for this location kind.
    pub code: u32,
    /// The name of this location kind, like `Country` or `Town`.
    pub name: String,
}

/// A trending topic in some location.
#[derive(Debug, Clone, Deserialize)]
pub struct Trend {
    /// The topic as displayed to users.
    pub name: String,
    /// The query parameter that searches for this topic.
    pub query: String,
    /// A search URL for this topic.
    pub url: String,
    /// The number of tweets on this topic over the trailing 24 hours, if the server computed one.
    pub tweet_volume: Option<u64>,
}

/// One location's trends, with the timestamps they were computed at.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendList {
    /// The trending topics, ordered most-popular first.
    pub trends: Vec<Trend>,
    /// When this list was computed.
    pub as_of: DateTime<Utc>,
    /// When this list was first created.
    pub created_at: DateTime<Utc>,
    /// The locations this list applies to.
    pub locations: Vec<TrendListLocation>,
}

/// The abbreviated location reference attached to a [`TrendList`].
///
/// [`TrendList`]: struct.TrendList.html
#[derive(Debug, Clone, Deserialize)]
pub struct TrendListLocation {
    /// The name of the location.
    pub name: String,
    /// The location's WOEID.
    pub woeid: u32,
}

/// Handle for the trends endpoints.
pub struct Trends {
    core: Arc<Core>,
}

impl Trends {
    pub(crate) fn new(core: Arc<Core>) -> Trends {
        Trends { core }
    }

    /// Returns every location that Twitter tracks trending topics for.
    pub async fn available(&self) -> Result<Response<Vec<TrendLocation>>> {
        self.core.get(links::trends::AVAILABLE, None).await
    }

    /// Returns the tracked locations closest to the given coordinate.
    pub async fn closest(&self, latitude: f64, longitude: f64) -> Result<Response<Vec<TrendLocation>>> {
        let params = ParamList::new()
            .add_param("lat", latitude.to_string())
            .add_param("long", longitude.to_string());
        self.core.get(links::trends::CLOSEST, Some(&params)).await
    }

    /// Returns the trending topics for the given WOEID. With `exclude_hashtags`, topics that are
    /// hashtags are filtered out.
    ///
    /// The server always returns exactly one `TrendList` for this call, but wraps it in an array;
    /// the array is passed along as-is.
    pub async fn place(
        &self,
        woeid: u32,
        exclude_hashtags: bool,
    ) -> Result<Response<Vec<TrendList>>> {
        let params = ParamList::new()
            .add_param("id", woeid.to_string())
            .add_opt_param("exclude", if exclude_hashtags { Some("hashtags") } else { None });
        self.core.get(links::trends::PLACE, Some(&params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[test]
    fn parse_trend_list() {
        let content = load_file("sample_payloads/trends.json");
        let lists: Vec<TrendList> = serde_json::from_str(&content).unwrap();

        assert_eq!(lists.len(), 1);
        let list = &lists[0];
        assert_eq!(list.trends.len(), 2);
        assert_eq!(list.trends[0].name, "#ChainedToTheRhythm");
        assert_eq!(list.trends[0].tweet_volume, Some(48857));
        assert_eq!(list.trends[1].tweet_volume, None);
        assert_eq!(list.locations[0].woeid, 1);
        assert_eq!(list.as_of.to_rfc3339(), "2017-02-08T16:18:18+00:00");
    }

    #[tokio::test]
    async fn place_params() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/trends.json"));

        client.trends().place(2487956, true).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/trends/place.json");
        assert_eq!(sent.param("id"), Some("2487956"));
        assert_eq!(sent.param("exclude"), Some("hashtags"));
    }
}
