// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with lists.
//!
//! A list is a curated set of accounts whose tweets can be read as one feed. Lists are referenced
//! through [`ListID`]: either the list's numeric ID, or the owner plus the list's "slug" (the
//! name as it appears in the list's URL). Both are accepted everywhere a list is named.
//!
//! [`ListID`]: enum.ListID.html

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::cursor;
use crate::error::{Error, Result};
use crate::links;
use crate::statuses::Timeline;
use crate::users::{TwitterUser, UserID};

/// Convenient handle to refer to a list, either by its numeric ID or by its owner and slug.
#[derive(Debug, Clone)]
pub enum ListID {
    /// Referring via the list's owner and its slug.
    Slug(UserID, CowStr),
    /// Referring via the list's numeric ID.
    ID(u64),
}

impl ListID {
    /// Make a new `ListID` from the given owner and list slug.
    pub fn from_slug(owner: impl Into<UserID>, slug: impl Into<CowStr>) -> ListID {
        ListID::Slug(owner.into(), slug.into())
    }

    /// Make a new `ListID` from the given list ID.
    pub fn from_id(id: u64) -> ListID {
        ListID::ID(id)
    }
}

impl From<u64> for ListID {
    fn from(id: u64) -> ListID {
        ListID::ID(id)
    }
}

/// Represents the metadata for a list.
#[derive(Debug, Clone, Deserialize)]
pub struct List {
    /// The name of the list.
    pub name: String,
    /// The user who created the list.
    pub user: Box<TwitterUser>,
    /// The "slug" of the list, as used in its URL.
    pub slug: String,
    /// The numeric ID of the list.
    pub id: u64,
    /// The number of accounts subscribed to the list.
    pub subscriber_count: u64,
    /// The number of accounts on the list.
    pub member_count: u64,
    /// The full name of the list, in `@owner/slug` form.
    pub full_name: String,
    /// The description of the list, as entered by its creator.
    pub description: String,
    /// The relative URL path of the list.
    pub uri: String,
    /// UTC timestamp of when the list was created.
    #[serde(deserialize_with = "crate::common::deserialize_datetime")]
    pub created_at: DateTime<Utc>,
}

/// A set of changes to apply to a list's metadata with [`Lists::update`].
///
/// [`Lists::update`]: struct.Lists.html#method.update
#[derive(Debug, Clone, Default)]
pub struct ListUpdate {
    /// A new name for the list, if set.
    pub name: Option<CowStr>,
    /// Whether the list should be public, if set.
    pub public: Option<bool>,
    /// A new description for the list, if set.
    pub description: Option<CowStr>,
}

impl ListUpdate {
    /// Begins an empty update. Applying it without setting anything is a no-op on the server.
    pub fn new() -> ListUpdate {
        ListUpdate::default()
    }

    /// Renames the list.
    pub fn name(self, name: impl Into<CowStr>) -> ListUpdate {
        ListUpdate {
            name: Some(name.into()),
            ..self
        }
    }

    /// Changes whether the list is public.
    pub fn public(self, public: bool) -> ListUpdate {
        ListUpdate {
            public: Some(public),
            ..self
        }
    }

    /// Replaces the list's description.
    pub fn description(self, description: impl Into<CowStr>) -> ListUpdate {
        ListUpdate {
            description: Some(description.into()),
            ..self
        }
    }

    fn to_params(&self) -> ParamList {
        ParamList::new()
            .add_opt_param("name", self.name.clone())
            .add_opt_param("mode", self.public.map(|p| if p { "public" } else { "private" }))
            .add_opt_param("description", self.description.clone())
    }
}

/// Handle for the list endpoints.
pub struct Lists {
    core: Arc<Core>,
}

impl Lists {
    pub(crate) fn new(core: Arc<Core>) -> Lists {
        Lists { core }
    }

    /// Look up the lists the given account is subscribed to, including the ones they created, up
    /// to 100 of them.
    ///
    /// With `owned_first`, the account's own lists sort before their subscriptions.
    pub async fn list(
        &self,
        acct: impl Into<UserID>,
        owned_first: bool,
    ) -> Result<Response<Vec<List>>> {
        let params = ParamList::new()
            .add_user_param(acct.into())
            .add_param("reverse", owned_first.to_string());
        self.core.get(links::lists::LIST, Some(&params)).await
    }

    /// Look up information for a single list.
    pub async fn show(&self, list: ListID) -> Result<Response<List>> {
        let params = ParamList::new().add_list_param(list);
        self.core.get(links::lists::SHOW, Some(&params)).await
    }

    /// The tweets posted by the members of the given list, as a [`Timeline`].
    ///
    /// [`Timeline`]: ../statuses/struct.Timeline.html
    pub fn statuses(&self, list: ListID, with_rts: bool) -> Timeline {
        let params = ParamList::new()
            .add_list_param(list)
            .add_param("include_rts", with_rts.to_string());
        Timeline::new(links::lists::STATUSES, Some(params), self.core.clone())
    }

    /// The lists owned by the given account, as a cursored stream. Defaults to 20 lists per page;
    /// the maximum is 1000.
    pub fn ownerships(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::ListCursor> {
        let params = ParamList::new().add_user_param(acct.into());
        cursor::CursorIter::new(links::lists::OWNERSHIPS, self.core.clone(), Some(params), Some(20))
    }

    /// The lists the given account subscribes to (not including ones they own), as a cursored
    /// stream. Defaults to 20 lists per page; the maximum is 1000.
    pub fn subscriptions(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::ListCursor> {
        let params = ParamList::new().add_user_param(acct.into());
        cursor::CursorIter::new(
            links::lists::SUBSCRIPTIONS,
            self.core.clone(),
            Some(params),
            Some(20),
        )
    }

    /// The lists the given account has been added to, as a cursored stream. Defaults to 20 lists
    /// per page; the maximum is 1000.
    pub fn memberships(&self, acct: impl Into<UserID>) -> cursor::CursorIter<cursor::ListCursor> {
        let params = ParamList::new().add_user_param(acct.into());
        cursor::CursorIter::new(links::lists::MEMBERSHIPS, self.core.clone(), Some(params), Some(20))
    }

    /// The members of the given list, as a cursored stream. Defaults to 20 users per page; the
    /// maximum is 5000.
    pub fn members(&self, list: ListID) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets().add_list_param(list);
        cursor::CursorIter::new(links::lists::MEMBERS, self.core.clone(), Some(params), Some(20))
    }

    /// Check whether the given account is a member of the given list.
    ///
    /// The server reports a non-member through an error payload, so this method swallows that
    /// specific error; the rate-limit headers are preserved either way.
    pub async fn is_member(&self, acct: impl Into<UserID>, list: ListID) -> Result<Response<bool>> {
        let params = ParamList::new()
            .add_list_param(list)
            .add_user_param(acct.into());
        let result: Result<Response<TwitterUser>> =
            self.core.get(links::lists::MEMBERS_SHOW, Some(&params)).await;

        match result {
            Ok(resp) => Ok(resp.map(|_| true)),
            Err(Error::ApiError(ref headers, ref errors)) if errors.has_code(109) => {
                Ok(rate_headers(headers)?.map(|()| false))
            }
            Err(e) => Err(e),
        }
    }

    /// The subscribers of the given list, as a cursored stream. Defaults to 20 users per page;
    /// the maximum is 5000.
    pub fn subscribers(&self, list: ListID) -> cursor::CursorIter<cursor::UserCursor> {
        let params = ParamList::new().extended_tweets().add_list_param(list);
        cursor::CursorIter::new(links::lists::SUBSCRIBERS, self.core.clone(), Some(params), Some(20))
    }

    /// Check whether the given account subscribes to the given list.
    ///
    /// As with [`is_member`], a negative answer arrives as an error payload and is translated
    /// back into `false` here.
    ///
    /// [`is_member`]: #method.is_member
    pub async fn is_subscriber(
        &self,
        acct: impl Into<UserID>,
        list: ListID,
    ) -> Result<Response<bool>> {
        let params = ParamList::new()
            .add_list_param(list)
            .add_user_param(acct.into());
        let result: Result<Response<TwitterUser>> = self
            .core
            .get(links::lists::SUBSCRIBERS_SHOW, Some(&params))
            .await;

        match result {
            Ok(resp) => Ok(resp.map(|_| true)),
            Err(Error::ApiError(ref headers, ref errors)) if errors.has_code(109) => {
                Ok(rate_headers(headers)?.map(|()| false))
            }
            Err(e) => Err(e),
        }
    }

    /// Create a new list for the authenticated user. The name may be 25 characters at most.
    ///
    /// On success, the future yields the new list.
    pub async fn create(
        &self,
        name: impl Into<CowStr>,
        public: bool,
        description: Option<impl Into<CowStr>>,
    ) -> Result<Response<List>> {
        let params = ParamList::new()
            .add_param("name", name.into())
            .add_param("mode", if public { "public" } else { "private" })
            .add_opt_param("description", description.map(Into::into));
        self.core.post(links::lists::CREATE, Some(&params)).await
    }

    /// Apply the given metadata changes to the given list. The authenticated user must own the
    /// list.
    pub async fn update(&self, list: ListID, update: &ListUpdate) -> Result<Response<List>> {
        let params = update.to_params().add_list_param(list);
        self.core.post(links::lists::UPDATE, Some(&params)).await
    }

    /// Delete the given list. The authenticated user must own it.
    ///
    /// On success, the future yields the deleted list.
    pub async fn delete(&self, list: ListID) -> Result<Response<List>> {
        let params = ParamList::new().add_list_param(list);
        self.core.post(links::lists::DESTROY, Some(&params)).await
    }

    /// Add the given account to the given list. Lists hold at most 5000 members.
    ///
    /// On success, the future yields the updated list.
    pub async fn add_member(
        &self,
        list: ListID,
        acct: impl Into<UserID>,
    ) -> Result<Response<List>> {
        let params = ParamList::new()
            .add_list_param(list)
            .add_user_param(acct.into());
        self.core.post(links::lists::MEMBERS_CREATE, Some(&params)).await
    }

    /// Add up to 100 accounts to the given list in one call.
    ///
    /// Accounts that cannot be added (suspended, or that have blocked the list owner) are skipped
    /// silently; adding past the 5000-member ceiling fails as a whole.
    pub async fn add_member_list<T, I>(&self, list: ListID, accts: I) -> Result<Response<List>>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let (id_param, name_param) = multiple_names_param(accts);
        let params = ParamList::new()
            .add_list_param(list)
            .add_param("user_id", id_param)
            .add_param("screen_name", name_param);
        self.core
            .post(links::lists::MEMBERS_CREATE_ALL, Some(&params))
            .await
    }

    /// Remove the given account from the given list.
    ///
    /// On success, the future yields the updated list.
    pub async fn remove_member(
        &self,
        list: ListID,
        acct: impl Into<UserID>,
    ) -> Result<Response<List>> {
        let params = ParamList::new()
            .add_list_param(list)
            .add_user_param(acct.into());
        self.core
            .post(links::lists::MEMBERS_DESTROY, Some(&params))
            .await
    }

    /// Remove up to 100 accounts from the given list in one call.
    pub async fn remove_member_list<T, I>(&self, list: ListID, accts: I) -> Result<Response<List>>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let (id_param, name_param) = multiple_names_param(accts);
        let params = ParamList::new()
            .add_list_param(list)
            .add_param("user_id", id_param)
            .add_param("screen_name", name_param);
        self.core
            .post(links::lists::MEMBERS_DESTROY_ALL, Some(&params))
            .await
    }

    /// Subscribe the authenticated user to the given list.
    ///
    /// On success, the future yields the list.
    pub async fn subscribe(&self, list: ListID) -> Result<Response<List>> {
        let params = ParamList::new().add_list_param(list);
        self.core
            .post(links::lists::SUBSCRIBERS_CREATE, Some(&params))
            .await
    }

    /// Unsubscribe the authenticated user from the given list.
    ///
    /// On success, the future yields the list.
    pub async fn unsubscribe(&self, list: ListID) -> Result<Response<List>> {
        let params = ParamList::new().add_list_param(list);
        self.core
            .post(links::lists::SUBSCRIBERS_DESTROY, Some(&params))
            .await
    }
}

#[cfg(test)]
mod tests {
    use hyper::{Method, StatusCode};

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    use super::ListID;

    #[test]
    fn parse_list() {
        let content = load_file("sample_payloads/list.json");
        let list: super::List = serde_json::from_str(&content).unwrap();

        assert_eq!(list.id, 84839422);
        assert_eq!(list.slug, "official-twitter-accts");
        assert_eq!(list.full_name, "@twitter/official-twitter-accts");
        assert_eq!(list.member_count, 20);
        assert_eq!(list.user.screen_name, "twitter");
    }

    #[tokio::test]
    async fn slug_ids_expand_to_owner_params() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/list.json"));

        client
            .lists()
            .show(ListID::from_slug("twitter", "official-twitter-accts"))
            .await
            .unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/lists/show.json");
        assert_eq!(sent.param("owner_screen_name"), Some("twitter"));
        assert_eq!(sent.param("slug"), Some("official-twitter-accts"));
        assert_eq!(sent.param("list_id"), None);
    }

    #[tokio::test]
    async fn numeric_ids_stay_numeric() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/list.json"));

        client.lists().show(ListID::from_id(84839422)).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.param("list_id"), Some("84839422"));
        assert_eq!(sent.param("slug"), None);
    }

    #[tokio::test]
    async fn member_maintenance_verbs() {
        let (client, mock) = mock_client();
        let list = load_file("sample_payloads/list.json");
        mock.reply(&list).reply(&list);

        client
            .lists()
            .add_member(ListID::from_id(84839422), "rustlang")
            .await
            .unwrap();
        let accts: Vec<crate::users::UserID> = vec!["rustlang".into(), 4567.into()];
        client
            .lists()
            .add_member_list(ListID::from_id(84839422), accts)
            .await
            .unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].path, "https://api.twitter.com/1.1/lists/members/create.json");
        assert_eq!(
            sent[1].path,
            "https://api.twitter.com/1.1/lists/members/create_all.json"
        );
        assert_eq!(sent[1].param("screen_name"), Some("rustlang"));
        assert_eq!(sent[1].param("user_id"), Some("4567"));
    }

    #[tokio::test]
    async fn non_membership_is_false_not_an_error() {
        let (client, mock) = mock_client();
        mock.reply_with(
            StatusCode::NOT_FOUND,
            r#"{"errors":[{"code":109,"message":"The specified user is not a member of this list."}]}"#,
        );

        let is_member = client
            .lists()
            .is_member("rustlang", ListID::from_id(84839422))
            .await
            .unwrap();

        assert!(!is_member.response);
        // the rate-limit headers from the error response are preserved
        assert_eq!(is_member.rate_limit_status.limit, 180);
    }

    #[tokio::test]
    async fn membership_is_true() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/user.json"));

        let is_member = client
            .lists()
            .is_member("twitter", ListID::from_id(84839422))
            .await
            .unwrap();
        assert!(is_member.response);
    }
}
