// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wire-format shapes for the DM events API.
//!
//! The events API wraps every message in an event envelope, serializes every number as a string,
//! and reports entity ranges in codepoints. The types here mirror that wire shape exactly; the
//! conversion into the public [`DirectMessage`] happens in `into_dm`.
//!
//! [`DirectMessage`]: ../struct.DirectMessage.html

use std::collections::HashMap;

use chrono::TimeZone;
use serde::Deserialize;

use crate::common::{codepoints_to_bytes, deser_from_string};
use crate::entities::MediaEntity;
use crate::error::{Error, Result};

use super::{AppInfo, DMEntities, DirectMessage};

/// The envelope around a single event, as returned by `events/show` and `events/new`.
#[derive(Debug, Deserialize)]
pub(crate) struct SingleEvent {
    pub event: RawEvent,
    #[serde(default)]
    pub apps: HashMap<String, AppInfo>,
}

/// The envelope around a page of events, as returned by `events/list`.
#[derive(Debug, Deserialize)]
pub(crate) struct EventCursor {
    pub events: Vec<RawEvent>,
    #[serde(default)]
    pub apps: HashMap<String, AppInfo>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    #[serde(deserialize_with = "deser_from_string")]
    pub id: u64,
    #[serde(deserialize_with = "deser_from_string")]
    pub created_timestamp: i64,
    pub message_create: RawMessageCreate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMessageCreate {
    pub target: RawTarget,
    #[serde(deserialize_with = "deser_from_string")]
    pub sender_id: u64,
    pub source_app_id: Option<String>,
    pub message_data: RawMessageData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTarget {
    #[serde(deserialize_with = "deser_from_string")]
    pub recipient_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMessageData {
    pub text: String,
    pub entities: DMEntities,
    pub attachment: Option<RawAttachment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAttachment {
    pub media: MediaEntity,
}

impl RawEvent {
    /// Converts the event into a `DirectMessage`, resolving the sending app against the given
    /// apps table and rewriting entity ranges from codepoints to byte offsets.
    pub(crate) fn into_dm(self, apps: &HashMap<String, AppInfo>) -> Result<DirectMessage> {
        let RawMessageCreate {
            target,
            sender_id,
            source_app_id,
            message_data,
        } = self.message_create;

        let source_app = source_app_id.map(|id| {
            apps.get(&id).cloned().unwrap_or(AppInfo {
                id,
                name: String::new(),
                url: String::new(),
            })
        });

        let created_at = chrono::Utc
            .timestamp_millis_opt(self.created_timestamp)
            .single()
            .ok_or(Error::InvalidResponse(
                "DM event carried an out-of-range timestamp",
                None,
            ))?;

        let mut entities = message_data.entities;
        let text = &message_data.text;
        for entity in &mut entities.hashtags {
            codepoints_to_bytes(&mut entity.range, text);
        }
        for entity in &mut entities.symbols {
            codepoints_to_bytes(&mut entity.range, text);
        }
        for entity in &mut entities.urls {
            codepoints_to_bytes(&mut entity.range, text);
        }
        for entity in &mut entities.user_mentions {
            codepoints_to_bytes(&mut entity.range, text);
        }
        let mut attachment = message_data.attachment.map(|a| a.media);
        if let Some(media) = attachment.as_mut() {
            codepoints_to_bytes(&mut media.range, text);
        }

        Ok(DirectMessage {
            id: self.id,
            created_at,
            text: message_data.text,
            entities,
            attachment,
            sender_id,
            recipient_id: target.recipient_id,
            source_app,
        })
    }
}
