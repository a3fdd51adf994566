// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Muting and unmuting accounts.
//!
//! Muting hides an account's tweets from the authenticated user's timelines without unfollowing
//! or notifying it.

use std::sync::Arc;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::error::Result;
use crate::links;
use crate::users::{TwitterUser, UserID};

/// Handle for the mute-management endpoints.
pub struct Mutes {
    core: Arc<Core>,
}

impl Mutes {
    pub(crate) fn new(core: Arc<Core>) -> Mutes {
        Mutes { core }
    }

    /// The users muted by the authenticated user, as a cursored stream. The page size cannot be
    /// changed.
    pub fn list(&self) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets();
        cursor::CursorIter::new(links::mutes::LIST, self.core.clone(), Some(params), None)
    }

    /// The IDs of the users muted by the authenticated user, as a cursored stream. The page size
    /// cannot be changed.
    pub fn ids(&self) -> cursor::CursorIter<cursor::IDCursor> {
        cursor::CursorIter::new(links::mutes::IDS, self.core.clone(), None, None)
    }

    /// Mute the given account.
    ///
    /// On success, the future yields the muted user.
    pub async fn create(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::mutes::CREATE, Some(&params)).await
    }

    /// Unmute the given account.
    ///
    /// On success, the future yields the unmuted user.
    pub async fn destroy(&self, acct: impl Into<UserID>) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets().add_user_param(acct.into());
        self.core.post(links::mutes::DESTROY, Some(&params)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[tokio::test]
    async fn mute_paths() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/user.json"));

        client.mutes().create("loudaccount").await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/mutes/users/create.json");
        assert_eq!(sent.param("screen_name"), Some("loudaccount"));
    }
}
