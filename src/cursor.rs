// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types and traits to navigate cursored collections.
//!
//! Much of this module is an implementation detail; the intended entry point is [`CursorIter`],
//! which the cursored endpoint methods return and which can be consumed as a `Stream`. The page
//! types are public so that the output of those methods is fully nameable, and so that manual
//! paging stays possible.
//!
//! [`CursorIter`]: struct.CursorIter.html

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::lists::List;
use crate::users::TwitterUser;

/// Trait to generalize over paginated views of API results.
///
/// Types that implement `Cursor` are the single-page views the server actually returns; they are
/// loaded behind the scenes by [`CursorIter`]'s `Stream` implementation, and surface directly when
/// paging manually through [`CursorIter::call`].
///
/// [`CursorIter`]: struct.CursorIter.html
/// [`CursorIter::call`]: struct.CursorIter.html#method.call
pub trait Cursor {
    /// What type is being returned by the API call?
    type Item;

    /// Returns a numeric reference to the previous page of results.
    fn previous_cursor_id(&self) -> i64;
    /// Returns a numeric reference to the next page of results.
    fn next_cursor_id(&self) -> i64;
    /// Consumes the cursor and returns the collection of results from inside.
    fn into_inner(self) -> Vec<Self::Item>;
}

/// Represents a single-page view into a list of users.
#[derive(Debug, Deserialize)]
pub struct UserCursor {
    /// Numeric reference to the previous page of results.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results.
    pub next_cursor: i64,
    /// The list of users in this page of results.
    pub users: Vec<TwitterUser>,
}

impl Cursor for UserCursor {
    type Item = TwitterUser;

    fn previous_cursor_id(&self) -> i64 {
        self.previous_cursor
    }

    fn next_cursor_id(&self) -> i64 {
        self.next_cursor
    }

    fn into_inner(self) -> Vec<Self::Item> {
        self.users
    }
}

/// Represents a single-page view into a list of numeric IDs.
#[derive(Debug, Deserialize)]
pub struct IDCursor {
    /// Numeric reference to the previous page of results.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results.
    pub next_cursor: i64,
    /// The list of IDs in this page of results.
    pub ids: Vec<u64>,
}

impl Cursor for IDCursor {
    type Item = u64;

    fn previous_cursor_id(&self) -> i64 {
        self.previous_cursor
    }

    fn next_cursor_id(&self) -> i64 {
        self.next_cursor
    }

    fn into_inner(self) -> Vec<Self::Item> {
        self.ids
    }
}

/// Represents a single-page view into a list of lists.
#[derive(Debug, Deserialize)]
pub struct ListCursor {
    /// Numeric reference to the previous page of results.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results.
    pub next_cursor: i64,
    /// The lists in this page of results.
    pub lists: Vec<List>,
}

impl Cursor for ListCursor {
    type Item = List;

    fn previous_cursor_id(&self) -> i64 {
        self.previous_cursor
    }

    fn next_cursor_id(&self) -> i64 {
        self.next_cursor
    }

    fn into_inner(self) -> Vec<Self::Item> {
        self.lists
    }
}

type PageFuture<T> = Pin<Box<dyn Future<Output = Result<Response<T>>> + Send>>;

/// Represents a paginated list of results, such as the users who follow a specific user or the
/// lists they own.
///
/// This struct is returned by the cursored endpoint methods and implements `Stream`, loading
/// pages lazily as they are consumed:
///
/// ```rust,no_run
/// # use roost::{Client, Token};
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// use futures::TryStreamExt;
///
/// let mut followers = client.followers().list("rustlang");
/// while let Some(user) = followers.try_next().await.unwrap() {
///     println!("{}", user.response.screen_name);
/// }
/// # }
/// ```
///
/// The stream yields `Result<Response<T::Item>, Error>`, so network and rate-limit errors pass
/// directly through as items. An error does not advance the cursor: polling the stream again
/// retries the same page, which means you can wait out a rate limit and resume in place.
///
/// ## Manual paging
///
/// The stream hides when the network calls happen. To control them yourself, use [`call`] to load
/// one page at a time, then copy the returned `next_cursor`/`previous_cursor` back into the
/// struct to move around:
///
/// ```rust,no_run
/// # use roost::{Client, Token};
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// let mut pager = client.followers().list("rustlang").with_page_size(20);
/// let page = pager.call().await.unwrap();
///
/// for user in &page.response.users {
///     println!("{} (@{})", user.name, user.screen_name);
/// }
///
/// pager.next_cursor = page.response.next_cursor;
/// let next_page = pager.call().await.unwrap();
/// # }
/// ```
///
/// [`call`]: #method.call
#[must_use = "cursor iterators are lazy and do nothing unless consumed"]
pub struct CursorIter<T>
where
    T: Cursor + DeserializeOwned,
{
    link: &'static str,
    core: Arc<Core>,
    params_base: Option<ParamList>,
    /// The number of results returned in one network call.
    ///
    /// Certain endpoints set their own minimums and maximums for this value, and some do not
    /// allow the page size to be changed at all; refer to the individual methods' documentation
    /// for specifics.
    pub page_size: Option<i32>,
    /// Numeric reference to the previous page of results. A value of zero indicates that the
    /// current page is the first page of the cursor.
    ///
    /// This is set automatically by the `Stream` implementation; it is exposed for manual paging.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results. A value of zero indicates that the current
    /// page is the last page of the cursor.
    ///
    /// This is set automatically by the `Stream` implementation; it is exposed for manual paging.
    pub next_cursor: i64,
    loader: Option<PageFuture<T>>,
    iter: Option<ResponseIter<T::Item>>,
}

impl<T> CursorIter<T>
where
    T: Cursor + DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        link: &'static str,
        core: Arc<Core>,
        params_base: Option<ParamList>,
        page_size: Option<i32>,
    ) -> CursorIter<T> {
        CursorIter {
            link,
            core,
            params_base,
            page_size,
            previous_cursor: -1,
            next_cursor: -1,
            loader: None,
            iter: None,
        }
    }

    /// Sets the number of results returned in a single network call.
    ///
    /// If the underlying endpoint does not accept a page size, this is a no-op. Calling this
    /// function clears any results that were already loaded.
    pub fn with_page_size(self, page_size: i32) -> CursorIter<T> {
        if self.page_size.is_some() {
            CursorIter {
                page_size: Some(page_size),
                previous_cursor: -1,
                next_cursor: -1,
                loader: None,
                iter: None,
                ..self
            }
        } else {
            self
        }
    }

    /// Loads the page the current `next_cursor` refers to.
    ///
    /// This is what the `Stream` implementation drives; it is exposed for manual paging.
    pub fn call(&self) -> impl Future<Output = Result<Response<T>>> + Send + 'static {
        let params = self
            .params_base
            .clone()
            .unwrap_or_default()
            .add_param("cursor", self.next_cursor.to_string())
            .add_opt_param("count", self.page_size.map_string());
        let core = self.core.clone();
        let link = self.link;

        async move { core.get(link, Some(&params)).await }
    }
}

impl<T> Stream for CursorIter<T>
where
    T: Cursor + DeserializeOwned + Send + Unpin + 'static,
    T::Item: Unpin,
{
    type Item = Result<Response<T::Item>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(fut) = self.loader.as_mut() {
                let resp = match fut.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(resp) => resp,
                };
                self.loader = None;

                let resp = match resp {
                    Ok(resp) => resp,
                    // the cursor state is untouched here, so the next poll retries this page
                    Err(e) => return Poll::Ready(Some(Err(e))),
                };

                self.previous_cursor = resp.response.previous_cursor_id();
                self.next_cursor = resp.response.next_cursor_id();

                let mut iter = resp.map(|page| page.into_inner()).into_iter();
                let first = iter.next();
                self.iter = Some(iter);

                return Poll::Ready(first.map(Ok));
            }

            if let Some(results) = self.iter.as_mut() {
                if let Some(item) = results.next() {
                    return Poll::Ready(Some(Ok(item)));
                }
                if self.next_cursor == 0 {
                    return Poll::Ready(None);
                }
            }

            let fut = self.call();
            self.loader = Some(Box::pin(fut));
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use crate::client::testing::mock_client;

    const PAGE_ONE: &str = r#"{
        "previous_cursor": 0,
        "next_cursor": 1374004777531007833,
        "ids": [101, 102, 103]
    }"#;
    const PAGE_TWO: &str = r#"{
        "previous_cursor": -1374004777531007833,
        "next_cursor": 0,
        "ids": [104]
    }"#;

    #[tokio::test]
    async fn pages_walk_in_order_and_stop_at_zero() {
        let (client, mock) = mock_client();
        mock.reply(PAGE_ONE).reply(PAGE_TWO);

        let ids: Vec<u64> = client
            .followers()
            .ids("rustlang")
            .try_collect::<Vec<_>>()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.response)
            .collect();

        assert_eq!(ids, vec![101, 102, 103, 104]);

        let sent = mock.sent();
        assert_eq!(sent.len(), 2, "terminal cursor should stop the stream");
        assert_eq!(sent[0].param("cursor"), Some("-1"));
        assert_eq!(sent[0].param("screen_name"), Some("rustlang"));
        assert_eq!(
            sent[1].param("cursor"),
            Some("1374004777531007833"),
            "server cursor must be passed back verbatim"
        );
    }

    #[tokio::test]
    async fn dropping_the_stream_stops_paging() {
        let (client, mock) = mock_client();
        mock.reply(PAGE_ONE).reply(PAGE_TWO);

        {
            let mut stream = client.followers().ids("rustlang");
            let first = stream.try_next().await.unwrap();
            assert_eq!(first.map(|r| r.response), Some(101));
        }

        // one page was fetched, then the stream was dropped before the cursor ran dry
        assert_eq!(mock.sent().len(), 1);
    }

    #[tokio::test]
    async fn page_size_applies_when_supported() {
        let (client, mock) = mock_client();
        mock.reply(PAGE_TWO);

        let _ = client
            .followers()
            .ids("rustlang")
            .with_page_size(5000)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();

        assert_eq!(mock.sent_once().param("count"), Some("5000"));
    }

    #[tokio::test]
    async fn page_size_ignored_when_unsupported() {
        let (client, mock) = mock_client();
        mock.reply(r#"{"previous_cursor": 0, "next_cursor": 0, "users": []}"#);

        let _ = client
            .blocks()
            .list()
            .with_page_size(20)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();

        assert_eq!(mock.sent_once().param("count"), None);
    }
}
