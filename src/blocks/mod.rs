// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Blocking and unblocking accounts.
//!
//! Blocking an account prevents it from following, mentioning, or otherwise interacting with the
//! authenticated user. Blocking also implicitly unfollows, in both directions.

use std::sync::Arc;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::error::Result;
use crate::links;
use crate::users::{TwitterUser, UserID};

/// Handle for the block-management endpoints.
pub struct Blocks {
    core: Arc<Core>,
}

impl Blocks {
    pub(crate) fn new(core: Arc<Core>) -> Blocks {
        Blocks { core }
    }

    /// The users blocked by the authenticated user, as a cursored stream.
    ///
    /// The blocks list does not allow its page size to be changed; `with_page_size` on the
    /// returned stream is a no-op.
    pub fn list(&self) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets();
        cursor::CursorIter::new(links::blocks::LIST, self.core.clone(), Some(params), None)
    }

    /// The IDs of the users blocked by the authenticated user, as a cursored stream. The page
    /// size cannot be changed here either.
    pub fn ids(&self) -> cursor::CursorIter<cursor::IDCursor> {
        cursor::CursorIter::new(links::blocks::IDS, self.core.clone(), None, None)
    }

    /// Block the given account.
    ///
    /// On success, the future yields the blocked user.
    pub async fn create(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::blocks::CREATE, Some(&params)).await
    }

    /// Unblock the given account.
    ///
    /// On success, the future yields the unblocked user.
    pub async fn destroy(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::blocks::DESTROY, Some(&params)).await
    }
}

#[cfg(test)]
mod tests {
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn create_and_destroy_paths() {
        let (client, mock) = mock_client();
        let user = load_file("sample_payloads/user.json");
        mock.reply(&user).reply(&user);

        client.blocks().create(12345).await.unwrap();
        client.blocks().destroy(12345).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].path, "https://api.twitter.com/1.1/blocks/create.json");
        assert_eq!(sent[1].path, "https://api.twitter.com/1.1/blocks/destroy.json");
        assert_eq!(sent[0].param("user_id"), Some("12345"));
    }
}
