// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for pulling user information from Twitter.
//!
//! Everything in here acts on users in some way, whether looking up user information or searching
//! for accounts. The actions on the *relationship* between accounts (following, blocking, muting)
//! live on their own handles: [`Friendships`], [`Followers`], [`Blocks`], and [`Mutes`].
//!
//! [`Friendships`]: ../friendships/struct.Friendships.html
//! [`Followers`]: ../followers/struct.Followers.html
//! [`Blocks`]: ../blocks/struct.Blocks.html
//! [`Mutes`]: ../mutes/struct.Mutes.html
//!
//! ## `UserID`
//!
//! Every method that acts on a specific account takes `impl Into<UserID>`, so that a numeric ID,
//! a `&str`/`String` screen name, or an explicit [`UserID`] can all be handed in directly. The
//! lookup methods that take collections accept mixed collections of all of these.
//!
//! [`UserID`]: enum.UserID.html

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;

mod types;

pub use self::types::*;

/// Convenient handle to refer to an account, whether you know its numeric ID or its screen name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserID {
    /// Referring via the account's numeric ID.
    ID(u64),
    /// Referring via the account's screen name.
    ScreenName(CowStr),
}

impl From<u64> for UserID {
    fn from(id: u64) -> UserID {
        UserID::ID(id)
    }
}

impl From<&u64> for UserID {
    fn from(id: &u64) -> UserID {
        UserID::ID(*id)
    }
}

impl<'a> From<&'a str> for UserID {
    fn from(name: &'a str) -> UserID {
        UserID::ScreenName(name.to_string().into())
    }
}

impl From<String> for UserID {
    fn from(name: String) -> UserID {
        UserID::ScreenName(name.into())
    }
}

impl From<&String> for UserID {
    fn from(name: &String) -> UserID {
        UserID::ScreenName(name.clone().into())
    }
}

impl From<&UserID> for UserID {
    fn from(id: &UserID) -> UserID {
        id.clone()
    }
}

/// Handle for the user-lookup endpoints.
pub struct Users {
    core: Arc<Core>,
}

impl Users {
    pub(crate) fn new(core: Arc<Core>) -> Users {
        Users { core }
    }

    /// Lookup user information for a single account.
    pub async fn show(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.get(links::users::SHOW, Some(&params)).await
    }

    /// Lookup profile information for several accounts in one call.
    ///
    /// The collection can mix numeric IDs and screen names freely; up to 100 accounts can be
    /// requested at once.
    pub async fn lookup<T, I>(&self, accts: I) -> Result<Response<Vec<TwitterUser>>>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let (id_param, name_param) = multiple_names_param(accts);
        let params = ParamList::new()
            .extended_tweets()
            .add_param("user_id", id_param)
            .add_param("screen_name", name_param);
        self.core.post(links::users::LOOKUP, Some(&params)).await
    }

    /// Lookup users based on the given search term.
    ///
    /// This returns a lazy stream over the accounts matched; unlike the cursored collections, the
    /// search endpoint pages by page number, and only the first 1000 results are reachable. Pages
    /// default to 10 users each; the maximum is 20.
    pub fn search(&self, query: impl Into<CowStr>) -> UserSearch {
        UserSearch::new(self.core.clone(), query.into())
    }

    /// Block the given account and report it for spam.
    ///
    /// On success, the future yields the reported user.
    pub async fn report_spam(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::users::REPORT_SPAM, Some(&params)).await
    }
}

type PageFuture = Pin<Box<dyn Future<Output = Result<Response<Vec<TwitterUser>>>> + Send>>;

/// Represents an active user search, as a stream over matching accounts.
///
/// The `users/search` endpoint is paged by page *number* rather than by cursor tokens, so this
/// type exists separately from [`CursorIter`]; the stream ends when the server returns an empty
/// page. Use [`with_page_size`] before consuming it to change how many accounts are loaded per
/// call.
///
/// [`CursorIter`]: ../cursor/struct.CursorIter.html
/// [`with_page_size`]: #method.with_page_size
#[must_use = "streams are lazy and do nothing unless consumed"]
pub struct UserSearch {
    core: Arc<Core>,
    query: CowStr,
    /// The current page of results being served out of the stream.
    pub page_num: i32,
    /// The number of accounts loaded per call. Defaults to 10; the endpoint accepts up to 20.
    pub page_size: i32,
    loader: Option<PageFuture>,
    iter: Option<ResponseIter<TwitterUser>>,
}

impl UserSearch {
    fn new(core: Arc<Core>, query: CowStr) -> UserSearch {
        UserSearch {
            core,
            query,
            page_num: 1,
            page_size: 10,
            loader: None,
            iter: None,
        }
    }

    /// Sets the page size used for the search query.
    ///
    /// Calling this will invalidate any current search results, making the next `poll` call
    /// return results from the first page.
    pub fn with_page_size(self, page_size: i32) -> UserSearch {
        UserSearch {
            page_num: 1,
            page_size,
            loader: None,
            iter: None,
            ..self
        }
    }

    /// Loads the given page of results for this search.
    pub fn call(&self, page_num: i32) -> impl Future<Output = Result<Response<Vec<TwitterUser>>>> + Send + 'static {
        let params = ParamList::new()
            .extended_tweets()
            .add_param("q", self.query.clone())
            .add_param("page", page_num.to_string())
            .add_param("count", self.page_size.to_string());
        let core = self.core.clone();

        async move { core.get(links::users::SEARCH, Some(&params)).await }
    }
}

impl Stream for UserSearch {
    type Item = Result<Response<TwitterUser>>;

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
                    Err(e) => return Poll::Ready(Some(Err(e))),
                };

                self.page_num += 1;

                let mut iter = resp.into_iter();
                let first = iter.next();
                self.iter = Some(iter);

                // an empty page is the only end-of-results signal this endpoint gives
                return Poll::Ready(first.map(Ok));
            }

            if let Some(results) = self.iter.as_mut() {
                if let Some(user) = results.next() {
                    return Poll::Ready(Some(Ok(user)));
                }
            }

            let fut = self.call(self.page_num);
            self.loader = Some(Box::pin(fut));
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn lookup_mixes_ids_and_names() {
        let (client, mock) = mock_client();
        mock.reply(&format!("[{}]", load_file("sample_payloads/user.json")));

        let accts: Vec<crate::users::UserID> =
            vec![783214.into(), "rustlang".into(), 6253282.into()];
        client.users().lookup(accts).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "https://api.twitter.com/1.1/users/lookup.json");
        assert_eq!(sent.param("user_id"), Some("783214,6253282"));
        assert_eq!(sent.param("screen_name"), Some("rustlang"));
        assert_eq!(sent.param("tweet_mode"), Some("extended"));
    }

    #[tokio::test]
    async fn search_pages_until_empty() {
        let (client, mock) = mock_client();
        let user = load_file("sample_payloads/user.json");
        mock.reply(&format!("[{}]", user)).reply("[]");

        let found: Vec<_> = client
            .users()
            .search("rust")
            .try_collect()
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].param("q"), Some("rust"));
        assert_eq!(sent[0].param("page"), Some("1"));
        assert_eq!(sent[0].param("count"), Some("10"));
        assert_eq!(sent[1].param("page"), Some("2"));
    }
}
