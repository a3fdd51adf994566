// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Saved search queries on the authenticated user's account.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;

/// A search query saved to the authenticated user's account.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedSearch {
    /// UTC timestamp of when the query was saved.
    #[serde(deserialize_with = "crate::common::deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    /// Numeric ID for this saved search.
    pub id: u64,
    /// The name of the saved search, as displayed in clients. The server sets this to the query
    /// text on creation.
    pub name: String,
    /// The search query itself.
    pub query: String,
}

/// Handle for the saved search endpoints.
pub struct SavedSearches {
    core: Arc<Core>,
}

impl SavedSearches {
    pub(crate) fn new(core: Arc<Core>) -> SavedSearches {
        SavedSearches { core }
    }

    /// The authenticated user's saved searches. Accounts hold at most 25 of them.
    pub async fn list(&self) -> Result<Response<Vec<SavedSearch>>> {
        self.core.get(links::saved_searches::LIST, None).await
    }

    /// Look up a single saved search by its ID.
    pub async fn show(&self, id: u64) -> Result<Response<SavedSearch>> {
        let url = format!("{}/{}.json", links::saved_searches::SHOW_STEM, id);
        self.core.get(&url, None).await
    }

    /// Save the given query to the authenticated user's account.
    ///
    /// On success, the future yields the new saved search.
    pub async fn create(&self, query: impl Into<CowStr>) -> Result<Response<SavedSearch>> {
        let params = ParamList::new().add_param("query", query.into());
        self.core.post(links::saved_searches::CREATE, Some(&params)).await
    }

    /// Delete the given saved search.
    ///
    /// On success, the future yields the deleted saved search.
    pub async fn destroy(&self, id: u64) -> Result<Response<SavedSearch>> {
        let url = format!("{}/{}.json", links::saved_searches::DESTROY_STEM, id);
        self.core.post(&url, None).await
    }
}

#[cfg(test)]
mod tests {
    use hyper::Method;

    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[test]
    fn parse_saved_search() {
        let content = load_file("sample_payloads/saved_search.json");
        let search: super::SavedSearch = serde_json::from_str(&content).unwrap();

        assert_eq!(search.id, 9569704);
        assert_eq!(search.query, "@rustlang");
        assert_eq!(search.name, "@rustlang");
    }

    #[tokio::test]
    async fn create_and_destroy() {
        let (client, mock) = mock_client();
        let search = load_file("sample_payloads/saved_search.json");
        mock.reply(&search).reply(&search);

        client.saved_searches().create("@rustlang").await.unwrap();
        client.saved_searches().destroy(9569704).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].path, "https://api.twitter.com/1.1/saved_searches/create.json");
        assert_eq!(sent[0].param("query"), Some("@rustlang"));
        assert_eq!(
            sent[1].path,
            "https://api.twitter.com/1.1/saved_searches/destroy/9569704.json"
        );
    }
}
