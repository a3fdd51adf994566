// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A library for interacting with Twitter's v1.1 API.
//!
//! Everything starts with a [`Token`] and a [`Client`]. Negotiate the token once (see the [`auth`]
//! module for the full flow), build a `Client` from it, and the endpoints hang off the client's
//! resource handles — one handle per API family, one method per endpoint:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! let con_token = roost::KeyPair::new("consumer key", "consumer secret");
//! let access_token = roost::KeyPair::new("access key", "access secret");
//! let token = roost::Token::Access {
//!     consumer: con_token,
//!     access: access_token,
//! };
//! let client = roost::Client::new(token);
//!
//! let rustlang = client.users().show("rustlang").await.unwrap();
//! println!("{} (@{})", rustlang.response.name, rustlang.response.screen_name);
//! # }
//! ```
//!
//! [`Token`]: enum.Token.html
//! [`Client`]: struct.Client.html
//! [`auth`]: auth/index.html
//!
//! ## Response envelopes
//!
//! Every call resolves to a [`Response`], which pairs the deserialized payload with the
//! rate-limit headers of the call that produced it, so client code can always tell how close it
//! is to a limit without extra bookkeeping.
//!
//! [`Response`]: struct.Response.html
//!
//! ## Paging
//!
//! Endpoints that return more than a page of data come back as lazy pagers instead of plain
//! futures, each matching how its endpoint actually pages:
//!
//! * [`CursorIter`] for the numeric-cursor collections (followers, friends, blocks, mutes, list
//!   members...) — a `Stream` that follows the server's `next_cursor` tokens until the terminal
//!   zero.
//! * [`Timeline`] for the ID-windowed tweet feeds (home/mentions/user timelines, favorites, list
//!   statuses) — explicit `start`/`older`/`newer` paging.
//! * [`DmTimeline`] for the direct-message feed, which pages by opaque string cursor.
//! * Search results page through [`SearchResult::older`]/[`SearchResult::newer`].
//!
//! [`CursorIter`]: cursor/struct.CursorIter.html
//! [`Timeline`]: statuses/struct.Timeline.html
//! [`DmTimeline`]: direct/struct.DmTimeline.html
//! [`SearchResult::older`]: search/struct.SearchResult.html#method.older
//! [`SearchResult::newer`]: search/struct.SearchResult.html#method.newer
//!
//! ## Cancellation
//!
//! Futures and streams here are cancel-on-drop: dropping one aborts its in-flight HTTP request
//! and prevents any further page loads. There is no separate cancellation handle.
//!
//! ## TLS
//!
//! The `native_tls` feature (default) terminates TLS through the platform's native stack;
//! switching to the `rustls` or `rustls_webpki` features swaps in rustls with native or bundled
//! roots respectively.

#![warn(missing_docs)]

pub mod account;
pub mod auth;
pub mod blocks;
mod client;
pub mod common;
pub mod cursor;
pub mod direct;
pub mod entities;
pub mod error;
pub mod favorites;
pub mod followers;
pub mod friendships;
pub mod geo;
pub mod help;
mod links;
pub mod lists;
pub mod media;
pub mod mutes;
pub mod saved_searches;
pub mod search;
pub mod statuses;
pub mod trends;
pub mod users;

pub use crate::auth::{KeyPair, Token};
pub use crate::client::{Client, HttpSender, RequestSender};
pub use crate::common::{ParamList, RateLimit, Response};
pub use crate::error::{Error, Result};
