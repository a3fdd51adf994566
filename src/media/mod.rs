// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functionality to upload images, GIFs, and videos that can be attached to tweets.
//!
//! Media is uploaded separately from the act of posting the tweet itself: upload first, then
//! reference the resulting ID in a [`DraftTweet`] (or a direct message). Uploads always go
//! through the chunked protocol — an INIT call, APPEND calls of at most a megabyte each, and a
//! FINALIZE call:
//!
//! ```rust,no_run
//! # use roost::Client;
//! # #[tokio::main]
//! # async fn main() {
//! # let client: Client = unimplemented!();
//! use roost::media::{media_types, MediaCategory};
//! use roost::statuses::DraftTweet;
//!
//! let image = vec![]; // pretend an image was loaded here
//! let handle = client
//!     .media()
//!     .upload(&image, media_types::image_png(), MediaCategory::Image)
//!     .await
//!     .unwrap();
//!
//! let draft = DraftTweet::new("Check out this cute cat!").media_ids(vec![handle.response.id]);
//! client.statuses().update(&draft).await.unwrap();
//! # }
//! ```
//!
//! Videos and GIFs are processed asynchronously on the server after FINALIZE; use
//! [`Media::wait_for_processing`] to block until the upload is usable.
//!
//! [`DraftTweet`]: ../statuses/struct.DraftTweet.html
//! [`Media::wait_for_processing`]: struct.Media.html#method.wait_for_processing

use std::sync::Arc;
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::client::Core;
use crate::common::*;
use crate::error::{Error, Result};
use crate::links;

/// Convenience functions for the media types Twitter is known to accept.
pub mod media_types {
    use mime::{self, Mime};

    /// PNG images.
    pub fn image_png() -> Mime {
        mime::IMAGE_PNG
    }

    /// JPG images.
    pub fn image_jpg() -> Mime {
        mime::IMAGE_JPEG
    }

    /// WEBP images.
    pub fn image_webp() -> Mime {
        "image/webp".parse().unwrap()
    }

    /// Animated GIF images.
    pub fn image_gif() -> Mime {
        mime::IMAGE_GIF
    }

    /// MP4 videos.
    pub fn video_mp4() -> Mime {
        "video/mp4".parse().unwrap()
    }
}

/// The category of an upload, which decides its size ceiling and whether the server processes it
/// asynchronously.
#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MediaCategory {
    /// A static image. Up to four can be attached to a single tweet.
    #[display(fmt = "tweet_image")]
    Image,
    /// An animated GIF.
    #[display(fmt = "tweet_gif")]
    Gif,
    /// A video.
    #[display(fmt = "tweet_video")]
    Video,
}

/// An uploaded piece of media, as referenced in later calls.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaHandle {
    /// The ID to reference this media with, e.g. in [`DraftTweet::media_ids`].
    ///
    /// [`DraftTweet::media_ids`]: ../statuses/struct.DraftTweet.html#method.media_ids
    #[serde(rename = "media_id")]
    pub id: u64,
    /// The number of seconds (from when the response was received) this handle stays usable.
    // absent on failed uploads, where 0 is a reasonable reading
    #[serde(rename = "expires_after_secs", default)]
    pub expires_after: u64,
    /// Server-side processing state, for the categories that process asynchronously. `None`
    /// means the media is ready as-is.
    #[serde(rename = "processing_info")]
    pub progress: Option<ProgressInfo>,
}

/// Server-side processing state of an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressInfo {
    /// Processing has not begun. Contains the number of seconds to wait before checking again.
    Pending(u64),
    /// The media is being processed. Contains the number of seconds to wait before checking
    /// again.
    InProgress(u64),
    /// Processing failed. Contains the error reported by the pipeline.
    Failed(crate::error::MediaError),
    /// Processing finished; the media can be used in other calls.
    Success,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawProgressTag {
    Pending,
    InProgress,
    Failed,
    Succeeded,
}

#[derive(Debug, Deserialize)]
struct RawProgressInfo {
    state: RawProgressTag,
    check_after_secs: Option<u64>,
    error: Option<crate::error::MediaError>,
}

impl<'de> Deserialize<'de> for ProgressInfo {
    fn deserialize<D>(deser: D) -> std::result::Result<ProgressInfo, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProgressInfo::deserialize(deser)?;
        let check_after = raw
            .check_after_secs
            .ok_or_else(|| D::Error::custom("missing field: check_after_secs"));
        Ok(match raw.state {
            RawProgressTag::Pending => ProgressInfo::Pending(check_after?),
            RawProgressTag::InProgress => ProgressInfo::InProgress(check_after?),
            RawProgressTag::Succeeded => ProgressInfo::Success,
            RawProgressTag::Failed => {
                let err = raw
                    .error
                    .ok_or_else(|| D::Error::custom("missing field: error"))?;
                ProgressInfo::Failed(err)
            }
        })
    }
}

// APPEND chunks must stay under 5MB; 1MB keeps each request comfortably small even after the
// base64 expansion.
const CHUNK_SIZE: usize = 1024 * 1024;

/// Handle for the media upload endpoints.
pub struct Media {
    core: Arc<Core>,
}

impl Media {
    pub(crate) fn new(core: Arc<Core>) -> Media {
        Media { core }
    }

    /// Upload the given data as one piece of media, through the chunked INIT/APPEND/FINALIZE
    /// protocol.
    ///
    /// For the `Gif` and `Video` categories the returned handle usually carries a `progress`
    /// state, meaning the server is still transcoding; follow up with [`wait_for_processing`]
    /// before attaching the media anywhere.
    ///
    /// [`wait_for_processing`]: #method.wait_for_processing
    pub async fn upload(
        &self,
        data: &[u8],
        media_type: mime::Mime,
        category: MediaCategory,
    ) -> Result<Response<MediaHandle>> {
        let params = ParamList::new()
            .add_param("command", "INIT")
            .add_param("total_bytes", data.len().to_string())
            .add_param("media_type", media_type.to_string())
            .add_param("media_category", category.to_string());
        let init: Response<MediaHandle> =
            self.core.post(links::media::UPLOAD, Some(&params)).await?;
        let media_id = init.response.id;

        for (index, chunk) in data.chunks(CHUNK_SIZE).enumerate() {
            let params = ParamList::new()
                .add_param("command", "APPEND")
                .add_param("media_id", media_id.to_string())
                .add_param("media_data", base64::encode(chunk))
                .add_param("segment_index", index.to_string());
            // APPEND returns 2xx with no body
            self.core.post_empty(links::media::UPLOAD, Some(&params)).await?;
        }

        let params = ParamList::new()
            .add_param("command", "FINALIZE")
            .add_param("media_id", media_id.to_string());
        self.core.post(links::media::UPLOAD, Some(&params)).await
    }

    /// Check the processing state of a previously-uploaded piece of media.
    pub async fn status(&self, media_id: u64) -> Result<Response<MediaHandle>> {
        let params = ParamList::new()
            .add_param("command", "STATUS")
            .add_param("media_id", media_id.to_string());
        self.core.get(links::media::UPLOAD, Some(&params)).await
    }

    /// Poll the processing state of an upload until it reaches a terminal state.
    ///
    /// Resolves with the final handle once processing succeeds (or if the media needed no
    /// processing at all), sleeping between checks for however long the server asks. A failed
    /// processing run resolves to [`Error::MediaError`].
    ///
    /// [`Error::MediaError`]: ../error/enum.Error.html#variant.MediaError
    pub async fn wait_for_processing(&self, handle: Response<MediaHandle>) -> Result<Response<MediaHandle>> {
        let mut current = handle;
        loop {
            let delay = match current.response.progress {
                None | Some(ProgressInfo::Success) => return Ok(current),
                Some(ProgressInfo::Failed(err)) => return Err(Error::MediaError(err)),
                Some(ProgressInfo::Pending(secs)) | Some(ProgressInfo::InProgress(secs)) => secs,
            };

            tokio::time::sleep(Duration::from_secs(delay)).await;
            current = self.status(current.response.id).await?;
        }
    }

    /// Attach alt text to a previously-uploaded piece of media. Must be done before the media is
    /// referenced by a tweet.
    pub async fn set_alt_text(&self, media_id: u64, alt_text: &str) -> Result<Response<()>> {
        let body = serde_json::json!({
            "media_id": media_id.to_string(),
            "alt_text": { "text": alt_text }
        });
        self.core.post_json_empty(links::media::METADATA, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    fn load_media(path: &str) -> MediaHandle {
        serde_json::from_str(&load_file(path)).unwrap()
    }

    #[test]
    fn parse_media() {
        let media = load_media("sample_payloads/media.json");
        assert_eq!(media.id, 710511363345354753);
        assert_eq!(media.expires_after, 86400);
        assert!(media.progress.is_none());
    }

    #[test]
    fn parse_media_pending() {
        let media = load_media("sample_payloads/media_pending.json");
        assert_eq!(media.expires_after, 86400);
        assert_eq!(media.progress, Some(ProgressInfo::Pending(5)));
    }

    #[test]
    fn parse_media_in_progress() {
        let media = load_media("sample_payloads/media_in_progress.json");
        assert_eq!(media.progress, Some(ProgressInfo::InProgress(10)));
    }

    #[test]
    fn parse_media_fail() {
        let media = load_media("sample_payloads/media_fail.json");
        assert_eq!(media.expires_after, 0);
        match media.progress {
            Some(ProgressInfo::Failed(error)) => assert_eq!(
                error,
                crate::error::MediaError {
                    code: 1,
                    name: "InvalidMedia".to_string(),
                    message: "Unsupported video format".to_string(),
                }
            ),
            other => panic!("unexpected progress: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_walks_the_chunk_protocol() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/media.json"))
            .reply("") // APPEND has no body
            .reply(&load_file("sample_payloads/media.json"));

        let data = vec![0u8; 600];
        let handle = client
            .media()
            .upload(&data, media_types::image_png(), MediaCategory::Image)
            .await
            .unwrap();
        assert_eq!(handle.response.id, 710511363345354753);

        let sent = mock.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].param("command"), Some("INIT"));
        assert_eq!(sent[0].param("total_bytes"), Some("600"));
        assert_eq!(sent[0].param("media_type"), Some("image/png"));
        assert_eq!(sent[0].param("media_category"), Some("tweet_image"));
        assert_eq!(sent[1].param("command"), Some("APPEND"));
        assert_eq!(sent[1].param("segment_index"), Some("0"));
        assert_eq!(
            sent[1].param("media_data"),
            Some(base64::encode(&data).as_str())
        );
        assert_eq!(sent[2].param("command"), Some("FINALIZE"));
        assert!(sent
            .iter()
            .all(|req| req.path == "https://upload.twitter.com/1.1/media/upload.json"));
    }

    #[tokio::test]
    async fn alt_text_is_a_json_body() {
        let (client, mock) = mock_client();
        mock.reply("");

        client
            .media()
            .set_alt_text(710511363345354753, "A cat, mid-yawn")
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://upload.twitter.com/1.1/media/metadata/create.json");
        let body = sent.json_body();
        assert_eq!(body["media_id"], "710511363345354753");
        assert_eq!(body["alt_text"]["text"], "A cat, mid-yawn");
    }
}
