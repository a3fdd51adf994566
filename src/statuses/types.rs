// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::entities::{HashtagEntity, MediaEntity, MentionEntity, UrlEntity};
use crate::geo::Place;
use crate::users::TwitterUser;

/// Represents a single status update.
///
/// The fields split up by context. The basics (`text`, `id`, `created_at`, `user`, the counts)
/// are always present. The perspective-based fields (`favorited`, `retweeted`,
/// `current_user_retweet`) are `Option`s because they depend on there being an authenticated user
/// to have a perspective. The reply/retweet/quote families are only present when the tweet in
/// question actually is one.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    /// UTC timestamp from when the tweet was posted.
    #[serde(deserialize_with = "crate::common::deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    /// If the authenticated user has retweeted this tweet, contains the ID of the retweet.
    #[serde(default, deserialize_with = "deserialize_id_envelope")]
    pub current_user_retweet: Option<u64>,
    /// The codepoint range of the portion of `text` that is "display text": the tweet without any
    /// leading reply mentions or trailing attachment link.
    pub display_text_range: Option<(usize, usize)>,
    /// Link, hashtag, and user mention information extracted from the tweet text.
    pub entities: TweetEntities,
    /// "Extended" media information, if the tweet has attached media. When this is present it
    /// carries the full media list; the `media` inside `entities` only ever holds the first
    /// attachment.
    pub extended_entities: Option<ExtendedTweetEntities>,
    /// "Approximately" the number of times this tweet has been liked by users.
    #[serde(default)]
    pub favorite_count: i32,
    /// Indicates whether the authenticated user has liked this tweet.
    pub favorited: Option<bool>,
    /// Numeric ID for this tweet.
    pub id: u64,
    /// If the tweet is a reply, contains the screen name of the user that was replied to.
    pub in_reply_to_screen_name: Option<String>,
    /// If the tweet is a reply, contains the ID of the tweet that was replied to.
    pub in_reply_to_status_id: Option<u64>,
    /// If the tweet is a reply, contains the ID of the user that was replied to.
    pub in_reply_to_user_id: Option<u64>,
    /// A BCP 47 language tag the server detected for the tweet text, or `und` if it could not be
    /// detected.
    pub lang: Option<String>,
    /// The geolocation this tweet was tagged with, as (latitude, longitude), if applicable.
    #[serde(default, deserialize_with = "deserialize_coordinates")]
    pub coordinates: Option<(f64, f64)>,
    /// The place this tweet is associated with, if present.
    pub place: Option<Place>,
    /// Whether a link in this tweet (or the attached media) has been flagged as potentially
    /// sensitive content.
    pub possibly_sensitive: Option<bool>,
    /// If this tweet quotes another, contains the quoted tweet's ID.
    pub quoted_status_id: Option<u64>,
    /// If this tweet quotes another, contains the quoted tweet.
    pub quoted_status: Option<Box<Tweet>>,
    /// The number of times this tweet has been retweeted.
    #[serde(default)]
    pub retweet_count: i32,
    /// Indicates whether the authenticated user has retweeted this tweet.
    pub retweeted: Option<bool>,
    /// If this tweet is a retweet, contains the original tweet.
    pub retweeted_status: Option<Box<Tweet>>,
    /// The application that posted this tweet. Not present when loaded through a Bearer token.
    pub source: Option<TweetSource>,
    /// The text of the tweet.
    #[serde(rename = "full_text", alias = "text")]
    pub text: String,
    /// Whether this tweet was truncated to fit the legacy 140-character limit. Always false for
    /// tweets loaded in the extended mode this crate requests.
    #[serde(default)]
    pub truncated: bool,
    /// The user who posted this tweet. Not present when this tweet is itself embedded inside a
    /// user object.
    pub user: Option<Box<TwitterUser>>,
    /// If present and true, this tweet has been withheld due to a DMCA complaint.
    #[serde(default)]
    pub withheld_copyright: bool,
    /// If present, the countries this tweet has been withheld from.
    pub withheld_in_countries: Option<Vec<String>>,
    /// If present, indicates whether the entire user or just this status is being withheld.
    pub withheld_scope: Option<String>,
}

/// Container for URL, hashtag, mention, and media information associated with a tweet.
///
/// If a tweet has no hashtags, symbols, URLs, or mentions, the corresponding vectors are empty,
/// not absent.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetEntities {
    /// Collection of hashtags parsed from the tweet.
    pub hashtags: Vec<HashtagEntity>,
    /// Collection of financial symbols ("cashtags") parsed from the tweet.
    #[serde(default)]
    pub symbols: Vec<HashtagEntity>,
    /// Collection of URLs parsed from the tweet.
    pub urls: Vec<UrlEntity>,
    /// Collection of user mentions parsed from the tweet.
    pub user_mentions: Vec<MentionEntity>,
    /// If the tweet has attached media, the first attachment. The full set is in the tweet's
    /// `extended_entities`.
    pub media: Option<Vec<MediaEntity>>,
}

/// Container for the full list of media attached to a tweet.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedTweetEntities {
    /// Collection of media attached to the tweet.
    pub media: Vec<MediaEntity>,
}

/// The app from which a tweet was posted.
///
/// The API serves this as an HTML anchor tag; the `Deserialize` impl splits it into the link
/// target and the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetSource {
    /// The name of the app, as displayed to clients.
    pub name: String,
    /// The URL of the app's homepage.
    pub url: String,
}

impl<'de> Deserialize<'de> for TweetSource {
    fn deserialize<D>(deser: D) -> Result<TweetSource, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deser)?;
        Ok(parse_anchor(&raw).unwrap_or(TweetSource {
            name: raw,
            url: String::new(),
        }))
    }
}

// `<a href="URL" rel="nofollow">NAME</a>`, or occasionally a bare name with no anchor.
fn parse_anchor(raw: &str) -> Option<TweetSource> {
    let href_start = raw.find("href=\"")? + "href=\"".len();
    let href_len = raw[href_start..].find('"')?;
    let name_start = raw.find('>')? + 1;
    let name_len = raw[name_start..].find('<')?;

    Some(TweetSource {
        name: raw[name_start..name_start + name_len].to_string(),
        url: raw[href_start..href_start + href_len].to_string(),
    })
}

// `{"id": 1234, "id_str": "1234"}`, for the retweet reference on `current_user_retweet`.
fn deserialize_id_envelope<'de, D>(deser: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct IDEnvelope {
        id: u64,
    }
    Ok(Option::<IDEnvelope>::deserialize(deser)?.map(|e| e.id))
}

// GeoJSON point: `{"type": "Point", "coordinates": [long, lat]}`. Note the field order on the
// wire is (longitude, latitude), flipped from how the rest of the API writes coordinates.
fn deserialize_coordinates<'de, D>(deser: D) -> Result<Option<(f64, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct GeoPoint {
        coordinates: (f64, f64),
    }
    Ok(Option::<GeoPoint>::deserialize(deser)?.map(|point| {
        let (long, lat) = point.coordinates;
        (lat, long)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn parse_tweet() {
        let content = load_file("sample_payloads/tweet.json");
        let tweet: Tweet = serde_json::from_str(&content).unwrap();

        assert_eq!(tweet.id, 850007368138018817);
        assert_eq!(
            tweet.text,
            "Today we're sharing our vision for the future of the Twitter API platform"
        );
        assert_eq!(tweet.created_at.to_rfc3339(), "2017-04-06T15:24:15+00:00");
        assert_eq!(tweet.retweet_count, 284);
        assert_eq!(tweet.favorited, Some(false));
        assert_eq!(tweet.user.as_ref().unwrap().screen_name, "TwitterDev");
        assert_eq!(tweet.entities.hashtags.len(), 0);
        assert_eq!(tweet.entities.urls[0].display_url, "cards.twitter.com/cards/18ce53wg…");

        let source = tweet.source.unwrap();
        assert_eq!(source.name, "Twitter Web Client");
        assert_eq!(source.url, "http://twitter.com");
    }

    #[test]
    fn parse_reply_tweet() {
        let content = load_file("sample_payloads/tweet_reply.json");
        let tweet: Tweet = serde_json::from_str(&content).unwrap();

        assert_eq!(tweet.in_reply_to_screen_name.as_deref(), Some("TwitterDev"));
        assert_eq!(tweet.in_reply_to_status_id, Some(850007368138018817));
        assert_eq!(tweet.coordinates, Some((37.7821, -122.4))); // (lat, long)
        assert_eq!(tweet.display_text_range, Some((11, 59)));
        assert_eq!(tweet.entities.user_mentions[0].screen_name, "TwitterDev");
    }

    #[test]
    fn source_anchor_parsing() {
        let parsed: TweetSource = serde_json::from_str(
            r#""<a href=\"http://itunes.apple.com/us/app/twitter/id409789998?mt=12\" rel=\"nofollow\">Twitter for Mac</a>""#,
        )
        .unwrap();
        assert_eq!(parsed.name, "Twitter for Mac");
        assert_eq!(parsed.url, "http://itunes.apple.com/us/app/twitter/id409789998?mt=12");

        let bare: TweetSource = serde_json::from_str(r#""web""#).unwrap();
        assert_eq!(bare.name, "web");
        assert_eq!(bare.url, "");
    }
}
