//! Endpoint URLs, collected in one place, grouped by resource.

pub mod auth {
    pub const REQUEST_TOKEN: &str = "https://api.twitter.com/oauth/request_token";
    pub const ACCESS_TOKEN: &str = "https://api.twitter.com/oauth/access_token";
    pub const AUTHORIZE: &str = "https://api.twitter.com/oauth/authorize";
    pub const AUTHENTICATE: &str = "https://api.twitter.com/oauth/authenticate";
    pub const BEARER_TOKEN: &str = "https://api.twitter.com/oauth2/token";
    pub const INVALIDATE_BEARER: &str = "https://api.twitter.com/oauth2/invalidate_token";
}

pub mod account {
    pub const VERIFY_CREDENTIALS: &str =
        "https://api.twitter.com/1.1/account/verify_credentials.json";
    pub const SETTINGS: &str = "https://api.twitter.com/1.1/account/settings.json";
    pub const UPDATE_PROFILE: &str = "https://api.twitter.com/1.1/account/update_profile.json";
    pub const UPDATE_PROFILE_IMAGE: &str =
        "https://api.twitter.com/1.1/account/update_profile_image.json";
    pub const UPDATE_PROFILE_BANNER: &str =
        "https://api.twitter.com/1.1/account/update_profile_banner.json";
    pub const REMOVE_PROFILE_BANNER: &str =
        "https://api.twitter.com/1.1/account/remove_profile_banner.json";
    pub const PROFILE_BANNER: &str = "https://api.twitter.com/1.1/users/profile_banner.json";
}

pub mod users {
    pub const LOOKUP: &str = "https://api.twitter.com/1.1/users/lookup.json";
    pub const SHOW: &str = "https://api.twitter.com/1.1/users/show.json";
    pub const SEARCH: &str = "https://api.twitter.com/1.1/users/search.json";
    pub const REPORT_SPAM: &str = "https://api.twitter.com/1.1/users/report_spam.json";
}

pub mod friendships {
    pub const CREATE: &str = "https://api.twitter.com/1.1/friendships/create.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/friendships/destroy.json";
    pub const UPDATE: &str = "https://api.twitter.com/1.1/friendships/update.json";
    pub const SHOW: &str = "https://api.twitter.com/1.1/friendships/show.json";
    pub const LOOKUP: &str = "https://api.twitter.com/1.1/friendships/lookup.json";
    pub const INCOMING: &str = "https://api.twitter.com/1.1/friendships/incoming.json";
    pub const OUTGOING: &str = "https://api.twitter.com/1.1/friendships/outgoing.json";
    pub const NO_RETWEETS_IDS: &str =
        "https://api.twitter.com/1.1/friendships/no_retweets/ids.json";
    pub const FRIENDS_IDS: &str = "https://api.twitter.com/1.1/friends/ids.json";
    pub const FRIENDS_LIST: &str = "https://api.twitter.com/1.1/friends/list.json";
}

pub mod followers {
    pub const IDS: &str = "https://api.twitter.com/1.1/followers/ids.json";
    pub const LIST: &str = "https://api.twitter.com/1.1/followers/list.json";
}

pub mod blocks {
    pub const LIST: &str = "https://api.twitter.com/1.1/blocks/list.json";
    pub const IDS: &str = "https://api.twitter.com/1.1/blocks/ids.json";
    pub const CREATE: &str = "https://api.twitter.com/1.1/blocks/create.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/blocks/destroy.json";
}

pub mod mutes {
    pub const LIST: &str = "https://api.twitter.com/1.1/mutes/users/list.json";
    pub const IDS: &str = "https://api.twitter.com/1.1/mutes/users/ids.json";
    pub const CREATE: &str = "https://api.twitter.com/1.1/mutes/users/create.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/mutes/users/destroy.json";
}

pub mod statuses {
    pub const SHOW: &str = "https://api.twitter.com/1.1/statuses/show.json";
    pub const LOOKUP: &str = "https://api.twitter.com/1.1/statuses/lookup.json";
    pub const UPDATE: &str = "https://api.twitter.com/1.1/statuses/update.json";
    pub const DELETE_STEM: &str = "https://api.twitter.com/1.1/statuses/destroy";
    pub const RETWEET_STEM: &str = "https://api.twitter.com/1.1/statuses/retweet";
    pub const UNRETWEET_STEM: &str = "https://api.twitter.com/1.1/statuses/unretweet";
    pub const RETWEETS_OF_STEM: &str = "https://api.twitter.com/1.1/statuses/retweets";
    pub const RETWEETERS_OF: &str = "https://api.twitter.com/1.1/statuses/retweeters/ids.json";
    pub const HOME_TIMELINE: &str = "https://api.twitter.com/1.1/statuses/home_timeline.json";
    pub const MENTIONS_TIMELINE: &str =
        "https://api.twitter.com/1.1/statuses/mentions_timeline.json";
    pub const USER_TIMELINE: &str = "https://api.twitter.com/1.1/statuses/user_timeline.json";
    pub const RETWEETS_OF_ME: &str = "https://api.twitter.com/1.1/statuses/retweets_of_me.json";
}

pub mod favorites {
    pub const LIST: &str = "https://api.twitter.com/1.1/favorites/list.json";
    pub const CREATE: &str = "https://api.twitter.com/1.1/favorites/create.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/favorites/destroy.json";
}

pub mod search {
    pub const TWEETS: &str = "https://api.twitter.com/1.1/search/tweets.json";
}

pub mod lists {
    pub const LIST: &str = "https://api.twitter.com/1.1/lists/list.json";
    pub const SHOW: &str = "https://api.twitter.com/1.1/lists/show.json";
    pub const STATUSES: &str = "https://api.twitter.com/1.1/lists/statuses.json";
    pub const OWNERSHIPS: &str = "https://api.twitter.com/1.1/lists/ownerships.json";
    pub const SUBSCRIPTIONS: &str = "https://api.twitter.com/1.1/lists/subscriptions.json";
    pub const MEMBERSHIPS: &str = "https://api.twitter.com/1.1/lists/memberships.json";
    pub const CREATE: &str = "https://api.twitter.com/1.1/lists/create.json";
    pub const UPDATE: &str = "https://api.twitter.com/1.1/lists/update.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/lists/destroy.json";
    pub const MEMBERS: &str = "https://api.twitter.com/1.1/lists/members.json";
    pub const MEMBERS_SHOW: &str = "https://api.twitter.com/1.1/lists/members/show.json";
    pub const MEMBERS_CREATE: &str = "https://api.twitter.com/1.1/lists/members/create.json";
    pub const MEMBERS_CREATE_ALL: &str =
        "https://api.twitter.com/1.1/lists/members/create_all.json";
    pub const MEMBERS_DESTROY: &str = "https://api.twitter.com/1.1/lists/members/destroy.json";
    pub const MEMBERS_DESTROY_ALL: &str =
        "https://api.twitter.com/1.1/lists/members/destroy_all.json";
    pub const SUBSCRIBERS: &str = "https://api.twitter.com/1.1/lists/subscribers.json";
    pub const SUBSCRIBERS_SHOW: &str = "https://api.twitter.com/1.1/lists/subscribers/show.json";
    pub const SUBSCRIBERS_CREATE: &str =
        "https://api.twitter.com/1.1/lists/subscribers/create.json";
    pub const SUBSCRIBERS_DESTROY: &str =
        "https://api.twitter.com/1.1/lists/subscribers/destroy.json";
}

pub mod direct {
    pub const LIST: &str = "https://api.twitter.com/1.1/direct_messages/events/list.json";
    pub const SHOW: &str = "https://api.twitter.com/1.1/direct_messages/events/show.json";
    pub const NEW: &str = "https://api.twitter.com/1.1/direct_messages/events/new.json";
    pub const DESTROY: &str = "https://api.twitter.com/1.1/direct_messages/events/destroy.json";
    pub const MARK_READ: &str = "https://api.twitter.com/1.1/direct_messages/mark_read.json";
    pub const INDICATE_TYPING: &str =
        "https://api.twitter.com/1.1/direct_messages/indicate_typing.json";
}

pub mod geo {
    pub const SHOW_STEM: &str = "https://api.twitter.com/1.1/geo/id";
    pub const REVERSE_GEOCODE: &str = "https://api.twitter.com/1.1/geo/reverse_geocode.json";
    pub const SEARCH: &str = "https://api.twitter.com/1.1/geo/search.json";
}

pub mod trends {
    pub const AVAILABLE: &str = "https://api.twitter.com/1.1/trends/available.json";
    pub const CLOSEST: &str = "https://api.twitter.com/1.1/trends/closest.json";
    pub const PLACE: &str = "https://api.twitter.com/1.1/trends/place.json";
}

pub mod saved_searches {
    pub const LIST: &str = "https://api.twitter.com/1.1/saved_searches/list.json";
    pub const SHOW_STEM: &str = "https://api.twitter.com/1.1/saved_searches/show";
    pub const CREATE: &str = "https://api.twitter.com/1.1/saved_searches/create.json";
    pub const DESTROY_STEM: &str = "https://api.twitter.com/1.1/saved_searches/destroy";
}

pub mod media {
    pub const UPLOAD: &str = "https://upload.twitter.com/1.1/media/upload.json";
    pub const METADATA: &str = "https://upload.twitter.com/1.1/media/metadata/create.json";
}

pub mod help {
    pub const CONFIGURATION: &str = "https://api.twitter.com/1.1/help/configuration.json";
    pub const LANGUAGES: &str = "https://api.twitter.com/1.1/help/languages.json";
    pub const PRIVACY: &str = "https://api.twitter.com/1.1/help/privacy.json";
    pub const TOS: &str = "https://api.twitter.com/1.1/help/tos.json";
    pub const RATE_LIMIT_STATUS: &str =
        "https://api.twitter.com/1.1/application/rate_limit_status.json";
}
