// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with direct messages.
//!
//! Note that direct message access requires a permissions level above regular read/write access:
//! the app must be configured with "read, write, and direct message" permissions to use any
//! method in this module, even the read-only ones.
//!
//! The events API underneath serves *both* sides of every conversation in one feed, newest
//! first, paged by an opaque string cursor. [`DmTimeline`] walks that feed; sorting messages into
//! conversations is left to the caller.
//!
//! [`DmTimeline`]: struct.DmTimeline.html

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::entities::{HashtagEntity, MediaEntity, MentionEntity, UrlEntity};
use crate::error::Result;
use crate::links;

mod raw;

/// Represents a single direct message.
#[derive(Debug)]
pub struct DirectMessage {
    /// Numeric ID for this DM.
    pub id: u64,
    /// UTC timestamp from when this DM was sent.
    pub created_at: DateTime<Utc>,
    /// The text of the DM.
    pub text: String,
    /// Link, hashtag, and user mention information parsed out of the DM text.
    pub entities: DMEntities,
    /// An image, GIF, or video attachment, if present.
    pub attachment: Option<MediaEntity>,
    /// The ID of the user who sent the DM.
    pub sender_id: u64,
    /// The ID of the user who received the DM.
    pub recipient_id: u64,
    /// The app the DM was sent with. Only available for messages sent by the authenticated user.
    pub source_app: Option<AppInfo>,
}

/// Container for URL, hashtag, and mention information associated with a direct message.
///
/// A DM can contain nearly every entity a tweet can, except that attached media is not listed
/// here: a DM carries at most one attachment, surfaced in the `attachment` field of
/// [`DirectMessage`] instead.
///
/// [`DirectMessage`]: struct.DirectMessage.html
#[derive(Debug, Deserialize)]
pub struct DMEntities {
    /// Collection of hashtags parsed from the DM.
    pub hashtags: Vec<HashtagEntity>,
    /// Collection of financial symbols ("cashtags") parsed from the DM.
    #[serde(default)]
    pub symbols: Vec<HashtagEntity>,
    /// Collection of URLs parsed from the DM.
    pub urls: Vec<UrlEntity>,
    /// Collection of user mentions parsed from the DM.
    pub user_mentions: Vec<MentionEntity>,
}

/// A client application, as referenced by a direct message's `source_app`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    /// Numeric ID of the app, serialized as a string.
    pub id: String,
    /// The display name of the app.
    pub name: String,
    /// The app's homepage.
    pub url: String,
}

/// Handle for the direct message endpoints.
pub struct DirectMessages {
    core: Arc<Core>,
}

impl DirectMessages {
    pub(crate) fn new(core: Arc<Core>) -> DirectMessages {
        DirectMessages { core }
    }

    /// The authenticated user's direct messages — sent *and* received — as a [`DmTimeline`]
    /// paging newest-first.
    ///
    /// [`DmTimeline`]: struct.DmTimeline.html
    pub fn list(&self) -> DmTimeline {
        DmTimeline::new(self.core.clone())
    }

    /// Lookup a single DM by its numeric ID.
    pub async fn show(&self, id: u64) -> Result<Response<DirectMessage>> {
        let params = ParamList::new().add_param("id", id.to_string());
        let resp: Response<serde_json::Value> =
            self.core.get(links::direct::SHOW, Some(&params)).await?;
        convert_single(resp)
    }

    /// Send a new direct message to the given user ID, optionally attaching a piece of
    /// previously-uploaded media.
    ///
    /// On success, the future yields the sent message. There is no counterpart to `UserID` here:
    /// the events API only accepts numeric recipient IDs.
    pub async fn send(
        &self,
        recipient_id: u64,
        text: impl Into<CowStr>,
        media_id: Option<u64>,
    ) -> Result<Response<DirectMessage>> {
        let message_data = match media_id {
            Some(media_id) => serde_json::json!({
                "text": text.into(),
                "attachment": {
                    "type": "media",
                    "media": { "id": media_id }
                }
            }),
            None => serde_json::json!({ "text": text.into() }),
        };
        let body = serde_json::json!({
            "event": {
                "type": "message_create",
                "message_create": {
                    "target": { "recipient_id": recipient_id.to_string() },
                    "message_data": message_data
                }
            }
        });

        let resp: Response<serde_json::Value> =
            self.core.post_json(links::direct::NEW, &body).await?;
        convert_single(resp)
    }

    /// Delete the given DM from the authenticated user's views.
    ///
    /// The message is only removed from the authenticated user's side of the conversation; the
    /// other participant keeps their copy.
    pub async fn delete(&self, id: u64) -> Result<Response<()>> {
        let params = ParamList::new().add_param("id", id.to_string());
        self.core.delete_empty(links::direct::DESTROY, Some(&params)).await
    }

    /// Mark the conversation with the given user as read, up to the given message.
    pub async fn mark_read(&self, last_read_event_id: u64, recipient_id: u64) -> Result<Response<()>> {
        let params = ParamList::new()
            .add_param("last_read_event_id", last_read_event_id.to_string())
            .add_param("recipient_id", recipient_id.to_string());
        self.core.post_empty(links::direct::MARK_READ, Some(&params)).await
    }

    /// Display a typing indicator to the given user for a few seconds.
    pub async fn indicate_typing(&self, recipient_id: u64) -> Result<Response<()>> {
        let params = ParamList::new().add_param("recipient_id", recipient_id.to_string());
        self.core
            .post_empty(links::direct::INDICATE_TYPING, Some(&params))
            .await
    }
}

fn convert_single(resp: Response<serde_json::Value>) -> Result<Response<DirectMessage>> {
    let rate_limit_status = resp.rate_limit_status;
    let envelope: raw::SingleEvent = serde_json::from_value(resp.response)?;
    let dm = envelope.event.into_dm(&envelope.apps)?;
    Ok(Response::new(rate_limit_status, dm))
}

/// Helper struct to navigate the DM feed, tracking the opaque string cursor between pages.
///
/// Unlike the numeric-cursor collections, the events API signals the end of the feed by omitting
/// the cursor from the final page. [`next_page`] yields `Ok(None)` at that point; alternatively,
/// [`into_stream`] turns the whole feed into a `Stream` of pages.
///
/// [`next_page`]: #method.next_page
/// [`into_stream`]: #method.into_stream
pub struct DmTimeline {
    core: Arc<Core>,
    /// The number of messages to request per page. The default is 20; the maximum is 50.
    pub count: u32,
    /// The cursor for the next page, as reported by the most recent call. `None` either before
    /// the first page loads or after the final page.
    pub next_cursor: Option<String>,
    /// Whether any page has been loaded yet.
    pub loaded: bool,
}

impl DmTimeline {
    fn new(core: Arc<Core>) -> DmTimeline {
        DmTimeline {
            core,
            count: 20,
            next_cursor: None,
            loaded: false,
        }
    }

    /// Builder function to set the page size.
    pub fn with_page_size(self, count: u32) -> DmTimeline {
        DmTimeline { count, ..self }
    }

    /// Clears the saved cursor information on this timeline.
    pub fn reset(&mut self) {
        self.next_cursor = None;
        self.loaded = false;
    }

    /// Loads the next page of messages, or `None` if the feed is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Response<Vec<DirectMessage>>>> {
        if self.loaded && self.next_cursor.is_none() {
            return Ok(None);
        }

        let params = ParamList::new()
            .add_param("count", self.count.to_string())
            .add_opt_param("cursor", self.next_cursor.clone());
        let resp: Response<serde_json::Value> =
            self.core.get(links::direct::LIST, Some(&params)).await?;

        let rate_limit_status = resp.rate_limit_status;
        let cursor: raw::EventCursor = serde_json::from_value(resp.response)?;

        self.loaded = true;
        self.next_cursor = cursor.next_cursor;

        let mut messages = Vec::with_capacity(cursor.events.len());
        for event in cursor.events {
            messages.push(event.into_dm(&cursor.apps)?);
        }

        Ok(Some(Response::new(rate_limit_status, messages)))
    }

    /// Converts this timeline into a `Stream` of pages, ending when the server stops returning
    /// cursors.
    pub fn into_stream(self) -> impl Stream<Item = Result<Response<Vec<DirectMessage>>>> {
        futures::stream::try_unfold(self, |mut timeline| async move {
            Ok(timeline
                .next_page()
                .await?
                .map(|page| (page, timeline)))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn show_converts_the_event_envelope() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/dm_event.json"));

        let dm = client.direct_messages().show(866942987565846596).await.unwrap();

        assert_eq!(dm.response.id, 866942987565846596);
        assert_eq!(dm.response.text, "Hello there, check https://t.co/AOl2wvbmtn out");
        assert_eq!(dm.response.sender_id, 623265148);
        assert_eq!(dm.response.recipient_id, 20536157);
        assert_eq!(dm.response.source_app.as_ref().unwrap().name, "Fine example app");
        // the codepoint indices on the wire become byte offsets
        let url = &dm.response.entities.urls[0];
        assert_eq!(
            &dm.response.text[url.range.0..url.range.1],
            "https://t.co/AOl2wvbmtn"
        );
    }

    #[tokio::test]
    async fn send_builds_the_event_body() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/dm_event.json"));

        client
            .direct_messages()
            .send(20536157, "Hello there, check https://t.co/AOl2wvbmtn out", None)
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/direct_messages/events/new.json");
        let body = sent.json_body();
        assert_eq!(body["event"]["type"], "message_create");
        assert_eq!(
            body["event"]["message_create"]["target"]["recipient_id"],
            "20536157"
        );
        assert!(body["event"]["message_create"]["message_data"]["attachment"].is_null());
    }

    #[tokio::test]
    async fn timeline_stops_when_the_cursor_disappears() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/dm_list.json"))
            .reply(r#"{"events": []}"#);

        let pages: Vec<_> = client
            .direct_messages()
            .list()
            .into_stream()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].response.len(), 1);
        assert!(pages[1].response.is_empty());

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].param("cursor"), None);
        assert_eq!(sent[1].param("cursor"), Some("NDUzNDUzEGUzNQ"));
    }

    #[tokio::test]
    async fn delete_uses_the_delete_verb() {
        let (client, mock) = mock_client();
        mock.reply_with(hyper::StatusCode::NO_CONTENT, "");

        client.direct_messages().delete(866942987565846596).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, hyper::Method::DELETE);
        assert_eq!(sent.param("id"), Some("866942987565846596"));
    }
}
