// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::entities::UrlEntity;
use crate::statuses::Tweet;

/// Represents a Twitter user account.
///
/// The fields mirror the user object the API serves. Many are perspective-dependent (they change
/// based on the authenticated user making the call) or only appear in certain contexts; those are
/// all `Option`s.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    /// Indicates this user has an account with "contributor mode" enabled.
    #[serde(default)]
    pub contributors_enabled: bool,
    /// The UTC timestamp for when this user account was created.
    #[serde(deserialize_with = "crate::common::deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    /// When true, indicates that this user has not altered the theme or background of their
    /// profile.
    #[serde(default)]
    pub default_profile: bool,
    /// When true, indicates that the user has not uploaded their own avatar.
    #[serde(default)]
    pub default_profile_image: bool,
    /// The user-defined string describing their account.
    pub description: Option<String>,
    /// Link information that has been parsed out of the `url` or `description` fields given by
    /// the user.
    pub entities: Option<UserEntities>,
    /// The number of tweets this user has liked. Yes, the field name is a museum piece.
    #[serde(default)]
    pub favourites_count: i32,
    /// Indicates whether the authenticated user has issued a follow request to this protected
    /// account.
    pub follow_request_sent: Option<bool>,
    /// The number of followers this account has.
    #[serde(default)]
    pub followers_count: i32,
    /// The number of users this account follows.
    #[serde(default)]
    pub friends_count: i32,
    /// Indicates whether this user has enabled their tweets to carry geographic information.
    #[serde(default)]
    pub geo_enabled: bool,
    /// Unique identifier for this user.
    pub id: u64,
    /// Indicates whether this user participates in Twitter's translator community.
    #[serde(default)]
    pub is_translator: bool,
    /// Language code this account registered with, if the server reports one.
    pub lang: Option<String>,
    /// The number of public lists this user is a member of.
    #[serde(default)]
    pub listed_count: i32,
    /// The user-defined location string of this account. Not necessarily a parseable place.
    pub location: Option<String>,
    /// The display name of this account.
    pub name: String,
    /// A URL pointing to the banner image of this account, if one is set.
    pub profile_banner_url: Option<String>,
    /// An HTTPS URL pointing to the avatar of this account.
    pub profile_image_url_https: String,
    /// Indicates whether this account's tweets are restricted to its followers.
    pub protected: bool,
    /// The handle of this account, without the leading `@`.
    pub screen_name: String,
    /// The most recent tweet of this account, if the context loads one.
    pub status: Option<Box<Tweet>>,
    /// The number of tweets (and retweets) posted by this account.
    #[serde(default)]
    pub statuses_count: i32,
    /// A URL provided by this account in association with their profile.
    pub url: Option<String>,
    /// Indicates this account has been verified.
    pub verified: bool,
    /// When present, the countries this account has been withheld from.
    pub withheld_in_countries: Option<Vec<String>>,
    /// When present, describes whether the account or its tweets are being withheld.
    pub withheld_scope: Option<String>,
}

/// Container for URL entity information that may be paired with a user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntities {
    /// URL information parsed from the user's `description`.
    pub description: UserEntityDetail,
    /// URL information parsed from the user's `url`, if present.
    pub url: Option<UserEntityDetail>,
}

/// Holder for a list of URL entities in part of a user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntityDetail {
    /// The URL entities parsed from the field in question.
    pub urls: Vec<UrlEntity>,
}

/// Detailed relationship information between the authenticated user's perspective ("source") and
/// another account ("target"), as returned by `friendships/show`.
#[derive(Debug, Deserialize)]
pub struct Relationship {
    /// The "source" account; when the call is authenticated, the authenticated user.
    pub source: RelationSource,
    /// The "target" account the source is being compared to.
    pub target: RelationTarget,
}

/// The source (perspective) half of a [`Relationship`].
///
/// [`Relationship`]: struct.Relationship.html
#[derive(Debug, Deserialize)]
pub struct RelationSource {
    /// Numeric ID of the source account.
    pub id: u64,
    /// Screen name of the source account.
    pub screen_name: String,
    /// Whether the source follows the target.
    pub following: bool,
    /// Whether the target follows the source.
    pub followed_by: bool,
    /// Whether the source can send a direct message to the target.
    pub can_dm: bool,
    /// Whether the source is blocking the target. Only populated when the call is authenticated
    /// as the source.
    pub blocking: Option<bool>,
    /// Whether the target has blocked the source.
    pub blocked_by: Option<bool>,
    /// Whether the source has muted the target.
    pub muting: Option<bool>,
    /// Whether the source has asked to see the target's retweets.
    pub want_retweets: Option<bool>,
    /// Whether the source has device notifications enabled for the target.
    pub notifications_enabled: Option<bool>,
    /// Whether the source has marked the target as spam.
    pub marked_spam: Option<bool>,
    /// Whether the source has elected to see all replies by the target.
    pub all_replies: Option<bool>,
}

/// The target half of a [`Relationship`].
///
/// [`Relationship`]: struct.Relationship.html
#[derive(Debug, Deserialize)]
pub struct RelationTarget {
    /// Numeric ID of the target account.
    pub id: u64,
    /// Screen name of the target account.
    pub screen_name: String,
    /// Whether the target follows the source.
    pub following: bool,
    /// Whether the source follows the target.
    pub followed_by: bool,
}

/// The summary connection set between the authenticated user and another account, as returned per
/// account by `friendships/lookup`.
#[derive(Debug, Deserialize)]
pub struct RelationLookup {
    /// The display name of the target account.
    pub name: String,
    /// The screen name of the target account.
    pub screen_name: String,
    /// Numeric ID of the target account.
    pub id: u64,
    /// The connections between the authenticated user and the target.
    pub connections: Vec<Connection>,
}

/// One connection between the authenticated user and another account.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// The authenticated user follows the target.
    Following,
    /// The authenticated user has sent a follow request to the target.
    FollowingRequested,
    /// The target follows the authenticated user.
    FollowedBy,
    /// The authenticated user is blocking the target.
    Blocking,
    /// The authenticated user has muted the target.
    Muting,
    /// There is no connection between the accounts.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn parse_user() {
        let content = load_file("sample_payloads/user.json");
        let user: TwitterUser = serde_json::from_str(&content).unwrap();

        assert_eq!(user.id, 783214);
        assert_eq!(user.screen_name, "twitter");
        assert_eq!(user.name, "Twitter");
        assert!(!user.protected);
        assert!(user.verified);
        assert_eq!(user.followers_count, 57814457);
        assert_eq!(
            user.created_at.to_rfc3339(),
            "2007-02-20T14:35:54+00:00"
        );
        assert!(user.status.is_none());
        let entities = user.entities.unwrap();
        assert_eq!(entities.url.unwrap().urls[0].display_url, "about.twitter.com");
    }

    #[test]
    fn parse_relationship() {
        let content = load_file("sample_payloads/relationship.json");
        #[derive(Deserialize)]
        struct Envelope {
            relationship: Relationship,
        }
        let rel = serde_json::from_str::<Envelope>(&content).unwrap().relationship;

        assert_eq!(rel.source.screen_name, "bert");
        assert_eq!(rel.target.screen_name, "ernie");
        assert!(rel.source.following);
        assert!(!rel.target.following);
        assert_eq!(rel.source.want_retweets, Some(true));
    }

    #[test]
    fn parse_relation_lookup() {
        let content = load_file("sample_payloads/relation_lookup.json");
        let lookup: Vec<RelationLookup> = serde_json::from_str(&content).unwrap();

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup[0].screen_name, "andypiper");
        assert_eq!(
            lookup[0].connections,
            vec![Connection::Following, Connection::FollowedBy]
        );
        assert_eq!(lookup[1].connections, vec![Connection::None]);
    }
}
