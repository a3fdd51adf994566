// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The accounts following a given user.

use std::sync::Arc;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::links;
use crate::users::UserID;

/// Handle for the follower-listing endpoints.
pub struct Followers {
    core: Arc<Core>,
}

impl Followers {
    pub(crate) fn new(core: Arc<Core>) -> Followers {
        Followers { core }
    }

    /// The IDs of the users following the given account, as a cursored stream. Defaults to 500
    /// IDs per page; the maximum is 5000.
    ///
    /// Loading only the IDs returns far more accounts per page than [`list`], which is the better
    /// deal when paging deep into a large follower set without needing profile data.
    ///
    /// [`list`]: #method.list
    pub fn ids(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::IDCursor> {
        let params = ParamList::new().add_user_param(acct.into());
        cursor::CursorIter::new(links::followers::IDS, self.core.clone(), Some(params), Some(500))
    }

    /// The users following the given account, as a cursored stream of full user objects. Defaults
    /// to 20 users per page; the maximum is 200.
    pub fn list(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        cursor::CursorIter::new(links::followers::LIST, self.core.clone(), Some(params), Some(20))
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use crate::client::testing::mock_client;

    #[tokio::test]
    async fn ids_paths_and_default_page_size() {
        let (client, mock) = mock_client();
        mock.reply(r#"{"previous_cursor": 0, "next_cursor": 0, "ids": []}"#);

        let _ = client
            .followers()
            .ids(783214)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/followers/ids.json");
        assert_eq!(sent.param("user_id"), Some("783214"));
        assert_eq!(sent.param("count"), Some("500"));
    }
}
