// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Data structures containing extracted URL, mention, tag, and media information.
//!
//! These structures are meant to be input into a text-replacement routine: every entity carries a
//! `range`, the codepoint offsets of the substring it was parsed from, so a renderer can swap in
//! display URLs, link mentions, or attach media where the text references it.

use serde::Deserialize;

/// Represents an entity extracted from a given text.
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagEntity {
    /// The character positions in the companion text the entity was extracted from.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// The text of the entity, without the leading `#` or `$` character.
    pub text: String,
}

/// Represents a web link extracted from a given text.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    /// A truncated URL meant to be displayed inline with the text.
    pub display_url: String,
    /// The URL the short link resolves to.
    pub expanded_url: Option<String>,
    /// The character positions in the companion text the URL was extracted from.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// The `t.co` URL as it appears in the text.
    pub url: String,
}

/// Represents a user mention extracted from a given text.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionEntity {
    /// Numeric ID of the mentioned user.
    pub id: u64,
    /// The character positions in the companion text the mention was extracted from.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// Display name of the mentioned user.
    pub name: String,
    /// Screen name of the mentioned user, without the leading `@` character.
    pub screen_name: String,
}

/// Represents a piece of media attached to a tweet or direct message.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntity {
    /// A shortened URL to display to clients.
    pub display_url: String,
    /// An expanded version of `display_url`, linking to the media display page.
    pub expanded_url: String,
    /// Numeric ID of the media.
    pub id: u64,
    /// The character positions in the companion text the media URL was extracted from.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// An HTTPS URL pointing directly to the uploaded media.
    pub media_url_https: String,
    /// Various sizes available for the media file.
    pub sizes: MediaSizes,
    /// For media attached to retweets, the ID of the original tweet the media was attached to.
    pub source_status_id: Option<u64>,
    /// The type of media being represented.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// The `t.co` link as it appears in the text.
    pub url: String,
    /// Information used to display the attached video, if present.
    pub video_info: Option<VideoInfo>,
    /// Media alt text, if present.
    #[serde(rename = "ext_alt_text")]
    pub alt_text: Option<String>,
}

/// Represents the types of media that can be attached to a tweet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// A static image.
    Photo,
    /// A video.
    Video,
    /// An animated GIF, delivered as a looping video without audio.
    #[serde(rename = "animated_gif")]
    Gif,
}

/// Represents the available sizes for a piece of attached media.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct MediaSizes {
    /// Information for a thumbnail-sized version.
    pub thumb: MediaSize,
    /// Information for a small-sized version.
    pub small: MediaSize,
    /// Information for a medium-sized version.
    pub medium: MediaSize,
    /// Information for a large-sized version.
    pub large: MediaSize,
}

/// Represents how a piece of media was resized to fit a given dimension set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// The media was resized to fit one dimension, keeping its aspect ratio.
    Fit,
    /// The media was cropped to fit a specific resolution.
    Crop,
}

/// Represents one available size for a piece of media.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct MediaSize {
    /// Width of the media, in pixels.
    pub w: usize,
    /// Height of the media, in pixels.
    pub h: usize,
    /// How the media was resized to this dimension set.
    pub resize: ResizeMode,
}

/// Represents metadata specific to videos.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    /// The aspect ratio of the video.
    pub aspect_ratio: (usize, usize),
    /// The duration of the video, in milliseconds. Not present for GIFs.
    pub duration_millis: Option<u64>,
    /// Information about the available encodings of the video.
    pub variants: Vec<VideoVariant>,
}

/// Represents one encoding of a video.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoVariant {
    /// The bitrate of this encoding. Present for GIFs, but should be ignored there.
    pub bitrate: Option<u64>,
    /// The MIME type of this encoding.
    #[serde(deserialize_with = "crate::common::deserialize_mime")]
    pub content_type: mime::Mime,
    /// The URL of the video stream in this encoding.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_media_entity() {
        let payload = r#"{
            "display_url": "pic.twitter.com/rJC5Pxsu",
            "expanded_url": "http://twitter.com/yunorno/status/114080493036773378/photo/1",
            "id": 114080493040967680,
            "indices": [175, 195],
            "media_url_https": "https://pbs.twimg.com/media/rJC5Pxsu.jpg",
            "sizes": {
                "thumb": {"h": 150, "resize": "crop", "w": 150},
                "large": {"h": 626, "resize": "fit", "w": 1024},
                "medium": {"h": 367, "resize": "fit", "w": 600},
                "small": {"h": 208, "resize": "fit", "w": 340}
            },
            "type": "photo",
            "url": "http://t.co/rJC5Pxsu"
        }"#;

        let media: MediaEntity = serde_json::from_str(payload).unwrap();
        assert_eq!(media.media_type, MediaType::Photo);
        assert_eq!(media.range, (175, 195));
        assert_eq!(media.sizes.thumb.resize, ResizeMode::Crop);
        assert_eq!(media.sizes.large.w, 1024);
        assert!(media.video_info.is_none());
        assert!(media.source_status_id.is_none());
    }
}
