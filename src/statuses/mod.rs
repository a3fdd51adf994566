// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with tweets and timelines.
//!
//! The [`Statuses`] handle carries everything that loads or manipulates individual tweets, plus
//! the timeline endpoints. Posting goes through [`DraftTweet`], which collects the optional
//! parameters of `statuses/update` before the call; reading feeds goes through [`Timeline`],
//! which tracks the `since_id`/`max_id` window of what has already been loaded.
//!
//! Searching for tweets is *not* here; that is the [`Search`] handle.
//!
//! [`Statuses`]: struct.Statuses.html
//! [`DraftTweet`]: struct.DraftTweet.html
//! [`Timeline`]: struct.Timeline.html
//! [`Search`]: ../search/struct.Search.html

use std::sync::Arc;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::error::Result;
use crate::links;
use crate::users::UserID;

mod types;

pub use self::types::*;

/// Handle for the tweet and timeline endpoints.
pub struct Statuses {
    core: Arc<Core>,
}

impl Statuses {
    pub(crate) fn new(core: Arc<Core>) -> Statuses {
        Statuses { core }
    }

    /// Lookup a single tweet by its numeric ID.
    pub async fn show(&self, id: u64) -> Result<Response<Tweet>> {
        let params = ParamList::new()
            .extended_tweets()
            .add_param("id", id.to_string())
            .add_param("include_ext_alt_text", "true");
        self.core.get(links::statuses::SHOW, Some(&params)).await
    }

    /// Lookup the given set of tweet IDs, up to 100 at a time.
    ///
    /// IDs that could not be loaded (deleted tweets, protected accounts) are silently dropped
    /// from the result.
    pub async fn lookup<I: IntoIterator<Item = u64>>(&self, ids: I) -> Result<Response<Vec<Tweet>>> {
        let id_param = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let params = ParamList::new().extended_tweets().add_param("id", id_param);
        self.core.post(links::statuses::LOOKUP, Some(&params)).await
    }

    /// Post the given draft as a new tweet.
    ///
    /// On success, the future yields the freshly-posted tweet.
    pub async fn update(&self, draft: &DraftTweet) -> Result<Response<Tweet>> {
        let params = draft.to_params();
        self.core.post(links::statuses::UPDATE, Some(&params)).await
    }

    /// Delete the given tweet. The authenticated user must have posted it (or it must be a
    /// retweet by them).
    ///
    /// On success, the future yields the deleted tweet.
    pub async fn delete(&self, id: u64) -> Result<Response<Tweet>> {
        let url = format!("{}/{}.json", links::statuses::DELETE_STEM, id);
        let params = ParamList::new().extended_tweets();
        self.core.post(&url, Some(&params)).await
    }

    /// Retweet the given tweet as the authenticated user.
    ///
    /// On success, the future yields the new retweet.
    pub async fn retweet(&self, id: u64) -> Result<Response<Tweet>> {
        let url = format!("{}/{}.json", links::statuses::RETWEET_STEM, id);
        let params = ParamList::new().extended_tweets();
        self.core.post(&url, Some(&params)).await
    }

    /// Remove the authenticated user's retweet of the given tweet. The ID can be either of the
    /// original tweet or of the retweet itself.
    ///
    /// On success, the future yields the original tweet.
    pub async fn unretweet(&self, id: u64) -> Result<Response<Tweet>> {
        let url = format!("{}/{}.json", links::statuses::UNRETWEET_STEM, id);
        let params = ParamList::new().extended_tweets();
        self.core.post(&url, Some(&params)).await
    }

    /// Lookup the most recent retweets of the given tweet, at most `count` of them (capped at 100
    /// by the endpoint).
    pub async fn retweets_of(&self, id: u64, count: u32) -> Result<Response<Vec<Tweet>>> {
        let url = format!("{}/{}.json", links::statuses::RETWEETS_OF_STEM, id);
        let params = ParamList::new()
            .extended_tweets()
            .add_param("count", count.to_string());
        self.core.get(&url, Some(&params)).await
    }

    /// Lookup the IDs of users who have retweeted the given tweet, as a cursored stream. A single
    /// page loads up to 100 IDs.
    pub fn retweeters_of(&self, id: u64) -> cursor::CursorIter<cursor::IDCursor> {
        let params = ParamList::new().add_param("id", id.to_string());
        cursor::CursorIter::new(
            links::statuses::RETWEETERS_OF,
            self.core.clone(),
            Some(params),
            Some(100),
        )
    }

    /// The authenticated user's home timeline: the tweets and retweets posted by them and the
    /// accounts they follow. Defaults to 20 tweets per page, at most 200.
    pub fn home_timeline(&self) -> Timeline {
        Timeline::new(links::statuses::HOME_TIMELINE, None, self.core.clone())
    }

    /// The tweets mentioning the authenticated user. Defaults to 20 tweets per page, at most 200.
    pub fn mentions_timeline(&self) -> Timeline {
        Timeline::new(links::statuses::MENTIONS_TIMELINE, None, self.core.clone())
    }

    /// The tweets posted by the given account. Defaults to 20 tweets per page, at most 200.
    ///
    /// `with_replies` and `with_rts` control whether the account's replies and retweets are
    /// included.
    pub fn user_timeline(
        &self,
        acct: impl Into<UserID>,
        with_replies: bool,
        with_rts: bool,
    ) -> Timeline {
        let params = ParamList::new()
            .add_user_param(acct.into())
            .add_param("exclude_replies", (!with_replies).to_string())
            .add_param("include_rts", with_rts.to_string());
        Timeline::new(links::statuses::USER_TIMELINE, Some(params), self.core.clone())
    }

    /// The authenticated user's tweets that have been retweeted by others. Defaults to 20 tweets
    /// per page, at most 100.
    pub fn retweets_of_me(&self) -> Timeline {
        Timeline::new(links::statuses::RETWEETS_OF_ME, None, self.core.clone())
    }
}

/// Represents an in-progress tweet before it is sent.
///
/// Assemble the optional parameters with the builder methods, then hand the draft to
/// [`Statuses::update`]:
///
/// ```rust,no_run
/// # use roost::Client;
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// use roost::statuses::DraftTweet;
///
/// let draft = DraftTweet::new("Hey Twitter!").coordinates(37.7821, -122.4, true);
/// let posted = client.statuses().update(&draft).await.unwrap();
/// # }
/// ```
///
/// [`Statuses::update`]: struct.Statuses.html#method.update
#[derive(Debug, Clone)]
pub struct DraftTweet {
    /// The text of the draft.
    pub text: CowStr,
    /// The ID of the tweet this draft replies to, if any.
    pub in_reply_to: Option<u64>,
    /// Whether to automatically fill reply mentions from the tweet being replied to.
    pub auto_populate_reply_metadata: Option<bool>,
    /// User IDs to exclude from the automatically-populated reply mentions.
    pub exclude_reply_user_ids: Option<Vec<u64>>,
    /// A URL to attach to the tweet (a tweet permalink or DM deep link) without counting against
    /// the character limit.
    pub attachment_url: Option<CowStr>,
    /// The (latitude, longitude) to tag the tweet with, and whether to resolve it to a display
    /// coordinate.
    pub coordinates: Option<(f64, f64, bool)>,
    /// The ID of the place to tag the tweet with.
    pub place_id: Option<CowStr>,
    /// IDs of previously-uploaded media to attach, at most four.
    pub media_ids: Option<Vec<u64>>,
    /// Whether the attached media should be marked as sensitive content.
    pub possibly_sensitive: Option<bool>,
}

impl DraftTweet {
    /// Creates a new draft with the given text.
    pub fn new(text: impl Into<CowStr>) -> DraftTweet {
        DraftTweet {
            text: text.into(),
            in_reply_to: None,
            auto_populate_reply_metadata: None,
            exclude_reply_user_ids: None,
            attachment_url: None,
            coordinates: None,
            place_id: None,
            media_ids: None,
            possibly_sensitive: None,
        }
    }

    /// Marks this draft as a reply to the given tweet.
    ///
    /// For the reply to thread, the text must mention the replied-to user, or
    /// `auto_populate_reply_metadata` must be set.
    pub fn in_reply_to(self, in_reply_to: u64) -> Self {
        DraftTweet {
            in_reply_to: Some(in_reply_to),
            ..self
        }
    }

    /// When replying, asks the server to fill in the leading mentions from the original tweet.
    /// The mentions then don't count against the character limit.
    pub fn auto_populate_reply_metadata(self, auto_populate: bool) -> Self {
        DraftTweet {
            auto_populate_reply_metadata: Some(auto_populate),
            ..self
        }
    }

    /// Excludes the given user IDs from the auto-populated reply mentions.
    pub fn exclude_reply_user_ids(self, user_ids: impl Into<Vec<u64>>) -> Self {
        DraftTweet {
            exclude_reply_user_ids: Some(user_ids.into()),
            ..self
        }
    }

    /// Attaches the given quoted-tweet permalink or DM deep link to the draft.
    pub fn attachment_url(self, url: impl Into<CowStr>) -> Self {
        DraftTweet {
            attachment_url: Some(url.into()),
            ..self
        }
    }

    /// Tags the draft with the given coordinate. With `display` set, the tweet shows a pin on a
    /// map in clients.
    pub fn coordinates(self, latitude: f64, longitude: f64, display: bool) -> Self {
        DraftTweet {
            coordinates: Some((latitude, longitude, display)),
            ..self
        }
    }

    /// Tags the draft with the given place. A place tag set this way takes precedence over any
    /// coordinate tag when clients render the tweet.
    pub fn place_id(self, place_id: impl Into<CowStr>) -> Self {
        DraftTweet {
            place_id: Some(place_id.into()),
            ..self
        }
    }

    /// Attaches the given uploaded media to the draft. The endpoint accepts at most four images,
    /// or one GIF or video.
    pub fn media_ids(self, media_ids: impl Into<Vec<u64>>) -> Self {
        DraftTweet {
            media_ids: Some(media_ids.into()),
            ..self
        }
    }

    /// Marks the attached media as sensitive content.
    pub fn possibly_sensitive(self, sensitive: bool) -> Self {
        DraftTweet {
            possibly_sensitive: Some(sensitive),
            ..self
        }
    }

    fn to_params(&self) -> ParamList {
        ParamList::new()
            .extended_tweets()
            .add_param("status", self.text.clone())
            .add_opt_param("in_reply_to_status_id", self.in_reply_to.map_string())
            .add_opt_param(
                "auto_populate_reply_metadata",
                self.auto_populate_reply_metadata.map_string(),
            )
            .add_opt_param(
                "exclude_reply_user_ids",
                self.exclude_reply_user_ids.as_ref().map(|ids| {
                    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
                }),
            )
            .add_opt_param("attachment_url", self.attachment_url.clone())
            .add_opt_param("lat", self.coordinates.map(|(lat, _, _)| lat.to_string()))
            .add_opt_param("long", self.coordinates.map(|(_, long, _)| long.to_string()))
            .add_opt_param(
                "display_coordinates",
                self.coordinates.map(|(_, _, display)| display.to_string()),
            )
            .add_opt_param("place_id", self.place_id.clone())
            .add_opt_param(
                "media_ids",
                self.media_ids.as_ref().map(|ids| {
                    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
                }),
            )
            .add_opt_param("possibly_sensitive", self.possibly_sensitive.map_string())
    }
}

/// Helper struct to navigate timeline-shaped collections of tweets by tracking the IDs already
/// loaded.
///
/// Timelines are ordered newest-first and keyed by tweet ID, so paging works by ID windows rather
/// than cursors: [`start`] loads the newest page, [`older`] asks for tweets strictly older than
/// everything seen, and [`newer`] for tweets strictly newer. The loaded window is tracked in
/// `max_id`/`min_id` automatically; [`reset`] clears it.
///
/// ```rust,no_run
/// # use roost::Client;
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// let mut home = client.statuses().home_timeline().with_page_size(50);
///
/// let newest = home.start().await.unwrap();
/// for tweet in &newest.response {
///     println!("<@{}> {}", tweet.user.as_ref().unwrap().screen_name, tweet.text);
/// }
///
/// // ...later, after some scrolling:
/// let previous_page = home.older().await.unwrap();
/// # }
/// ```
///
/// [`start`]: #method.start
/// [`older`]: #method.older
/// [`newer`]: #method.newer
/// [`reset`]: #method.reset
pub struct Timeline {
    link: &'static str,
    core: Arc<Core>,
    params_base: Option<ParamList>,
    /// The number of tweets loaded per call. Defaults to 20; endpoint-specific maximums apply
    /// (200 for most timelines, 100 for `retweets_of_me`).
    pub count: i32,
    /// The largest tweet ID loaded so far; the lower bound for [`newer`](#method.newer).
    pub max_id: Option<u64>,
    /// The smallest tweet ID loaded so far; the upper bound for [`older`](#method.older).
    pub min_id: Option<u64>,
}

impl Timeline {
    pub(crate) fn new(
        link: &'static str,
        params_base: Option<ParamList>,
        core: Arc<Core>,
    ) -> Timeline {
        Timeline {
            link,
            core,
            params_base,
            count: 20,
            max_id: None,
            min_id: None,
        }
    }

    /// Builder function to set the page size.
    pub fn with_page_size(self, page_size: i32) -> Timeline {
        Timeline {
            count: page_size,
            ..self
        }
    }

    /// Clears the tracked ID window on this timeline.
    pub fn reset(&mut self) {
        self.max_id = None;
        self.min_id = None;
    }

    /// Clears the tracked IDs and loads the newest page of the timeline.
    pub async fn start(&mut self) -> Result<Response<Vec<Tweet>>> {
        self.reset();
        self.load(None, None).await
    }

    /// Loads the page of tweets older than everything loaded so far.
    pub async fn older(&mut self) -> Result<Response<Vec<Tweet>>> {
        let max_id = self.min_id.map(|id| id - 1);
        self.load(None, max_id).await
    }

    /// Loads the page of tweets newer than everything loaded so far.
    pub async fn newer(&mut self) -> Result<Response<Vec<Tweet>>> {
        let since_id = self.max_id;
        self.load(since_id, None).await
    }

    /// Loads one page with an explicit ID window, without touching the tracked state: tweets with
    /// IDs strictly greater than `since_id` and no greater than `max_id`.
    pub async fn call(
        &self,
        since_id: Option<u64>,
        max_id: Option<u64>,
    ) -> Result<Response<Vec<Tweet>>> {
        let params = self
            .params_base
            .clone()
            .unwrap_or_default()
            .extended_tweets()
            .add_param("count", self.count.to_string())
            .add_opt_param("since_id", since_id.map_string())
            .add_opt_param("max_id", max_id.map_string());
        self.core.get(self.link, Some(&params)).await
    }

    async fn load(
        &mut self,
        since_id: Option<u64>,
        max_id: Option<u64>,
    ) -> Result<Response<Vec<Tweet>>> {
        let resp = self.call(since_id, max_id).await?;

        // timelines are served newest-first
        if let Some(first) = resp.response.first() {
            if Some(first.id) > self.max_id || self.max_id.is_none() {
                self.max_id = Some(first.id);
            }
        }
        if let Some(last) = resp.response.last() {
            if Some(last.id) < self.min_id || self.min_id.is_none() {
                self.min_id = Some(last.id);
            }
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    use super::DraftTweet;

    #[tokio::test]
    async fn update_posts_draft_params() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/tweet.json"));

        let draft = DraftTweet::new("Hey Twitter!")
            .in_reply_to(850007368138018817)
            .auto_populate_reply_metadata(true)
            .media_ids(vec![710511363345354753, 710511363345354754]);
        client.statuses().update(&draft).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "https://api.twitter.com/1.1/statuses/update.json");
        assert_eq!(sent.param("status"), Some("Hey Twitter!"));
        assert_eq!(sent.param("in_reply_to_status_id"), Some("850007368138018817"));
        assert_eq!(sent.param("auto_populate_reply_metadata"), Some("true"));
        assert_eq!(
            sent.param("media_ids"),
            Some("710511363345354753,710511363345354754")
        );
        // not set on the draft, so not sent
        assert_eq!(sent.param("possibly_sensitive"), None);
        assert_eq!(sent.param("lat"), None);
    }

    #[tokio::test]
    async fn path_parameter_endpoints() {
        let (client, mock) = mock_client();
        let tweet = load_file("sample_payloads/tweet.json");
        mock.reply(&tweet).reply(&tweet).reply(&tweet);

        client.statuses().delete(123).await.unwrap();
        client.statuses().retweet(456).await.unwrap();
        client.statuses().unretweet(789).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].path, "https://api.twitter.com/1.1/statuses/destroy/123.json");
        assert_eq!(sent[1].path, "https://api.twitter.com/1.1/statuses/retweet/456.json");
        assert_eq!(sent[2].path, "https://api.twitter.com/1.1/statuses/unretweet/789.json");
        assert!(sent.iter().all(|req| req.method == Method::POST));
    }

    #[tokio::test]
    async fn timeline_tracks_id_window() {
        let (client, mock) = mock_client();
        let tweets = load_file("sample_payloads/timeline.json");
        mock.reply(&tweets).reply("[]");

        let mut timeline = client.statuses().home_timeline().with_page_size(2);
        let page = timeline.start().await.unwrap();

        assert_eq!(page.response.len(), 2);
        assert_eq!(timeline.max_id, Some(850007368138018817));
        assert_eq!(timeline.min_id, Some(850006245121695744));

        timeline.older().await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].param("count"), Some("2"));
        assert_eq!(sent[0].param("max_id"), None);
        assert_eq!(
            sent[1].param("max_id"),
            Some("850006245121695743"),
            "older() asks below the smallest loaded ID"
        );
        assert_eq!(sent[1].param("since_id"), None);
    }

    #[tokio::test]
    async fn user_timeline_params() {
        let (client, mock) = mock_client();
        mock.reply("[]");

        client
            .statuses()
            .user_timeline("rustlang", false, true)
            .start()
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/statuses/user_timeline.json");
        assert_eq!(sent.param("screen_name"), Some("rustlang"));
        assert_eq!(sent.param("exclude_replies"), Some("true"));
        assert_eq!(sent.param("include_rts"), Some("true"));
    }
}
