// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Following, unfollowing, and inspecting the relationships between accounts.

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::error::Result;
use crate::links;
use crate::users::{RelationLookup, Relationship, TwitterUser, UserID};

/// Handle for the friend-graph endpoints.
pub struct Friendships {
    core: Arc<Core>,
}

impl Friendships {
    pub(crate) fn new(core: Arc<Core>) -> Friendships {
        Friendships { core }
    }

    /// Follow the given account, and set whether device notifications should be enabled.
    ///
    /// On success, the future yields the followed user. Following a protected account queues a
    /// follow request instead, and still yields the user.
    ///
    /// Calling this for an account the user already follows may return an error, or ("for
    /// performance reasons") may return success without changing any settings.
    pub async fn create(
        &self,
        acct: impl Into<UserID>,
        notifications: bool,
    ) -> Result<Response<TwitterUser>> {
        let params = ParamList::new()
            .extended_tweets()
            .add_user_param(acct.into())
            .add_param("follow", notifications.to_string());
        self.core.post(links::friendships::CREATE, Some(&params)).await
    }

    /// Unfollow the given account.
    ///
    /// On success, the future yields the unfollowed user. Calling this for an account the user
    /// doesn't follow returns success without changing anything.
    pub async fn destroy(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::friendships::DESTROY, Some(&params)).await
    }

    /// Update notification settings and retweet visibility for the given (already-followed)
    /// account.
    ///
    /// Calling this for an account the user does not follow will not make them follow it; passing
    /// `Some(true)` for `notifications` or `Some(false)` for `retweets` in that state returns an
    /// error.
    pub async fn update(
        &self,
        acct: impl Into<UserID>,
        notifications: Option<bool>,
        retweets: Option<bool>,
    ) -> Result<Response<Relationship>> {
        let params = ParamList::new()
            .add_user_param(acct.into())
            .add_opt_param("device", notifications.map_string())
            .add_opt_param("retweets", retweets.map_string());
        let resp: Response<RelationshipEnvelope> =
            self.core.post(links::friendships::UPDATE, Some(&params)).await?;
        Ok(resp.map(|envelope| envelope.relationship))
    }

    /// Lookup the relationship settings between two arbitrary accounts.
    pub async fn show(
        &self,
        from: impl Into<UserID>,
        to: impl Into<UserID>,
    ) -> Result<Response<Relationship>> {
        let params = match from.into() {
            UserID::ID(id) => ParamList::new().add_param("source_id", id.to_string()),
            UserID::ScreenName(name) => ParamList::new().add_param("source_screen_name", name),
        };
        let params = match to.into() {
            UserID::ID(id) => params.add_param("target_id", id.to_string()),
            UserID::ScreenName(name) => params.add_param("target_screen_name", name),
        };

        let resp: Response<RelationshipEnvelope> =
            self.core.get(links::friendships::SHOW, Some(&params)).await?;
        Ok(resp.map(|envelope| envelope.relationship))
    }

    /// Lookup the connections between the authenticated user and the given accounts, up to 100 at
    /// a time.
    pub async fn lookup<T, I>(&self, accts: I) -> Result<Response<Vec<RelationLookup>>>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let (id_param, name_param) = multiple_names_param(accts);
        let params = ParamList::new()
            .add_param("user_id", id_param)
            .add_param("screen_name", name_param);
        self.core.get(links::friendships::LOOKUP, Some(&params)).await
    }

    /// The IDs of users with a pending follow request to the authenticated protected account, as
    /// a cursored stream. The page size cannot be changed.
    pub fn incoming(&self) -> cursor::CursorIter<cursor::IDCursor> {
        cursor::CursorIter::new(links::friendships::INCOMING, self.core.clone(), None, None)
    }

    /// The IDs of protected users the authenticated user has a pending follow request with, as a
    /// cursored stream. The page size cannot be changed.
    pub fn outgoing(&self) -> cursor::CursorIter<cursor::IDCursor> {
        cursor::CursorIter::new(links::friendships::OUTGOING, self.core.clone(), None, None)
    }

    /// The IDs of users the authenticated user has disabled retweets from.
    ///
    /// Use [`update`] to change the setting for a specific account.
    ///
    /// [`update`]: #method.update
    pub async fn no_retweets_ids(&self) -> Result<Response<Vec<u64>>> {
        self.core.get(links::friendships::NO_RETWEETS_IDS, None).await
    }

    /// The IDs of users the given account follows ("friends" in API terms), as a cursored stream.
    /// Defaults to 500 IDs per page; the maximum is 5000.
    pub fn friends_ids(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::IDCursor> {
        let params = ParamList::new().add_user_param(acct.into());
        cursor::CursorIter::new(
            links::friendships::FRIENDS_IDS,
            self.core.clone(),
            Some(params),
            Some(500),
        )
    }

    /// The users the given account follows, as a cursored stream of full user objects. Defaults
    /// to 20 users per page; the maximum is 200.
    pub fn friends_list(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        cursor::CursorIter::new(
            links::friendships::FRIENDS_LIST,
            self.core.clone(),
            Some(params),
            Some(20),
        )
    }
}

// friendships/show and friendships/update nest their payload under a "relationship" key.
#[derive(Deserialize)]
struct RelationshipEnvelope {
    relationship: Relationship,
}

#[cfg(test)]
mod tests {
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn create_maps_follow_param() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/user.json"));

        client.friendships().create("rustlang", true).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "https://api.twitter.com/1.1/friendships/create.json");
        assert_eq!(sent.param("screen_name"), Some("rustlang"));
        assert_eq!(sent.param("follow"), Some("true"));
    }

    #[tokio::test]
    async fn show_distinguishes_source_and_target() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/relationship.json"));

        let rel = client.friendships().show("bert", 1234).await.unwrap();
        assert_eq!(rel.response.source.screen_name, "bert");

        let sent = mock.sent_once();
        assert_eq!(sent.param("source_screen_name"), Some("bert"));
        assert_eq!(sent.param("target_id"), Some("1234"));
    }

    #[tokio::test]
    async fn update_omits_unset_options() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/relationship.json"));

        client
            .friendships()
            .update("ernie", Some(true), None)
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.param("device"), Some("true"));
        assert_eq!(sent.param("retweets"), None);
    }
}
