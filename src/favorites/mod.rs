// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Liking tweets and listing liked tweets.

use std::sync::Arc;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::statuses::{Timeline, Tweet};
use crate::users::UserID;

/// Handle for the favorites endpoints.
pub struct Favorites {
    core: Arc<Core>,
}

impl Favorites {
    pub(crate) fn new(core: Arc<Core>) -> Favorites {
        Favorites { core }
    }

    /// The tweets liked by the given account, as a [`Timeline`]. Defaults to 20 tweets per page;
    /// the maximum is 200.
    ///
    /// [`Timeline`]: ../statuses/struct.Timeline.html
    pub fn list(&self, acct: impl Into<UserID>) -> Timeline {
        let params = ParamList::new().add_user_param(acct.into());
        Timeline::new(links::favorites::LIST, Some(params), self.core.clone())
    }

    /// Like the given tweet as the authenticated user.
    ///
    /// On success, the future yields the liked tweet.
    pub async fn create(&self, id: u64) -> Result<Response<Tweet>> {
        let params = ParamList::new()
            .extended_tweets()
            .add_param("id", id.to_string());
        self.core.post(links::favorites::CREATE, Some(&params)).await
    }

    /// Remove the authenticated user's like of the given tweet.
    ///
    /// On success, the future yields the formerly-liked tweet.
    pub async fn destroy(&self, id: u64) -> Result<Response<Tweet>> {
        let params = ParamList::new()
            .extended_tweets()
            .add_param("id", id.to_string());
        self.core.post(links::favorites::DESTROY, Some(&params)).await
    }
}

#[cfg(test)]
mod tests {
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn like_and_unlike() {
        let (client, mock) = mock_client();
        let tweet = load_file("sample_payloads/tweet.json");
        mock.reply(&tweet).reply(&tweet);

        client.favorites().create(850007368138018817).await.unwrap();
        client.favorites().destroy(850007368138018817).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].path, "https://api.twitter.com/1.1/favorites/create.json");
        assert_eq!(sent[0].param("id"), Some("850007368138018817"));
        assert_eq!(sent[1].path, "https://api.twitter.com/1.1/favorites/destroy.json");
    }

    #[tokio::test]
    async fn liked_list_is_a_timeline() {
        let (client, mock) = mock_client();
        mock.reply("[]");

        client.favorites().list("rustlang").start().await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.path, "https://api.twitter.com/1.1/favorites/list.json");
        assert_eq!(sent.param("screen_name"), Some("rustlang"));
    }
}
