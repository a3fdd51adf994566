// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The authenticated user's own account: settings and profile management.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::users::TwitterUser;

/// The authenticated user's account settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    /// Whether the account may only be messaged by accounts it follows (`"following"`) or by
    /// anyone (`"all"`).
    pub allow_dms_from: Option<String>,
    /// Whether the account can be found by its email address.
    #[serde(default)]
    pub discoverable_by_email: bool,
    /// Whether the account attaches location data to its tweets by default.
    #[serde(default)]
    pub geo_enabled: bool,
    /// The display language selected for the account.
    pub language: String,
    /// Whether the account's tweets are restricted to its followers.
    pub protected: bool,
    /// The account's screen name.
    pub screen_name: String,
    /// The account's "sleep time": the hours during which push notifications are suppressed.
    pub sleep_time: SleepTime,
    /// The time zone selected for the account.
    pub time_zone: TimeZoneInfo,
    /// The locations the account has chosen to pull trending topics from.
    #[serde(default)]
    pub trend_location: Vec<TrendSetting>,
}

/// The window of hours during which push notifications are suppressed.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepTime {
    /// Whether the sleep window is enabled at all.
    pub enabled: bool,
    /// The hour (0-23, local to the account's time zone) the window begins.
    pub start_time: Option<u32>,
    /// The hour the window ends.
    pub end_time: Option<u32>,
}

/// An account's selected time zone.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeZoneInfo {
    /// The display name of the time zone.
    pub name: String,
    /// The "Olson"/IANA name of the time zone, like `America/Los_Angeles`.
    pub tzinfo_name: String,
    /// The offset from UTC, in seconds.
    pub utc_offset: i32,
}

/// A trend location saved in the account settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendSetting {
    /// The name of the location.
    pub name: String,
    /// The location's WOEID, usable with the trends endpoints.
    pub woeid: u32,
}

/// A set of changes to apply to the account settings with [`Account::update_settings`].
///
/// [`Account::update_settings`]: struct.Account.html#method.update_settings
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    /// Enables or disables sleep time.
    pub sleep_time_enabled: Option<bool>,
    /// The hour (0-23) the sleep window should begin.
    pub start_sleep_time: Option<u32>,
    /// The hour (0-23) the sleep window should end.
    pub end_sleep_time: Option<u32>,
    /// A new time zone, by IANA name.
    pub time_zone: Option<CowStr>,
    /// A new default trend location, by WOEID.
    pub trend_location_woeid: Option<u32>,
    /// A new display language, by ISO 639-1 code.
    pub lang: Option<CowStr>,
}

impl SettingsUpdate {
    /// Begins an empty update. Applying it without setting anything is a no-op on the server.
    pub fn new() -> SettingsUpdate {
        SettingsUpdate::default()
    }

    /// Enables or disables the sleep-time window.
    pub fn sleep_time_enabled(self, enabled: bool) -> Self {
        SettingsUpdate {
            sleep_time_enabled: Some(enabled),
            ..self
        }
    }

    /// Sets the sleep window, as beginning and ending hours (0-23).
    pub fn sleep_time(self, start: u32, end: u32) -> Self {
        SettingsUpdate {
            start_sleep_time: Some(start),
            end_sleep_time: Some(end),
            ..self
        }
    }

    /// Sets the account time zone, by IANA name.
    pub fn time_zone(self, tz: impl Into<CowStr>) -> Self {
        SettingsUpdate {
            time_zone: Some(tz.into()),
            ..self
        }
    }

    /// Sets the default trend location, by WOEID.
    pub fn trend_location(self, woeid: u32) -> Self {
        SettingsUpdate {
            trend_location_woeid: Some(woeid),
            ..self
        }
    }

    /// Sets the display language, by ISO 639-1 code.
    pub fn lang(self, lang: impl Into<CowStr>) -> Self {
        SettingsUpdate {
            lang: Some(lang.into()),
            ..self
        }
    }

    fn to_params(&self) -> ParamList {
        ParamList::new()
            .add_opt_param("sleep_time_enabled", self.sleep_time_enabled.map_string())
            .add_opt_param("start_sleep_time", self.start_sleep_time.map_string())
            .add_opt_param("end_sleep_time", self.end_sleep_time.map_string())
            .add_opt_param("time_zone", self.time_zone.clone())
            .add_opt_param("trend_location_woeid", self.trend_location_woeid.map_string())
            .add_opt_param("lang", self.lang.clone())
    }
}

/// A set of changes to apply to the user's profile with [`Account::update_profile`].
///
/// [`Account::update_profile`]: struct.Account.html#method.update_profile
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// A new display name, at most 50 characters.
    pub name: Option<CowStr>,
    /// A new profile URL.
    pub url: Option<CowStr>,
    /// A new location string, at most 30 characters.
    pub location: Option<CowStr>,
    /// A new profile description, at most 160 characters.
    pub description: Option<CowStr>,
    /// A new color for links in the profile, as a hex triplet like `3B94D9`.
    pub profile_link_color: Option<CowStr>,
}

impl ProfileUpdate {
    /// Begins an empty update.
    pub fn new() -> ProfileUpdate {
        ProfileUpdate::default()
    }

    /// Sets the display name.
    pub fn name(self, name: impl Into<CowStr>) -> Self {
        ProfileUpdate {
            name: Some(name.into()),
            ..self
        }
    }

    /// Sets the profile URL.
    pub fn url(self, url: impl Into<CowStr>) -> Self {
        ProfileUpdate {
            url: Some(url.into()),
            ..self
        }
    }

    /// Sets the location string.
    pub fn location(self, location: impl Into<CowStr>) -> Self {
        ProfileUpdate {
            location: Some(location.into()),
            ..self
        }
    }

    /// Sets the profile description.
    pub fn description(self, description: impl Into<CowStr>) -> Self {
        ProfileUpdate {
            description: Some(description.into()),
            ..self
        }
    }

    /// Sets the profile link color, as a hex triplet.
    pub fn profile_link_color(self, color: impl Into<CowStr>) -> Self {
        ProfileUpdate {
            profile_link_color: Some(color.into()),
            ..self
        }
    }

    fn to_params(&self) -> ParamList {
        ParamList::new()
            .add_opt_param("name", self.name.clone())
            .add_opt_param("url", self.url.clone())
            .add_opt_param("location", self.location.clone())
            .add_opt_param("description", self.description.clone())
            .add_opt_param("profile_link_color", self.profile_link_color.clone())
    }
}

/// The banner image of a profile, in every size the server renders.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileBanner {
    /// The available renditions, keyed by names like `web`, `mobile_retina`, or `1500x500`.
    pub sizes: HashMap<String, BannerSize>,
}

/// One rendition of a profile banner.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerSize {
    /// Height in pixels.
    pub h: u32,
    /// Width in pixels.
    pub w: u32,
    /// Where to load this rendition from.
    pub url: String,
}

/// Handle for the account endpoints.
pub struct Account {
    core: Arc<Core>,
}

impl Account {
    pub(crate) fn new(core: Arc<Core>) -> Account {
        Account { core }
    }

    /// Verify that the client's token is still valid, returning the user it belongs to.
    pub async fn verify_credentials(&self) -> Result<Response<TwitterUser>> {
        let params = ParamList::new().extended_tweets();
        self.core
            .get(links::account::VERIFY_CREDENTIALS, Some(&params))
            .await
    }

    /// Load the authenticated user's account settings.
    pub async fn settings(&self) -> Result<Response<AccountSettings>> {
        self.core.get(links::account::SETTINGS, None).await
    }

    /// Apply the given settings changes, returning the settings as they stand afterwards.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Response<AccountSettings>> {
        let params = update.to_params();
        self.core.post(links::account::SETTINGS, Some(&params)).await
    }

    /// Apply the given profile changes, returning the updated user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Response<TwitterUser>> {
        let params = update.to_params().extended_tweets();
        self.core.post(links::account::UPDATE_PROFILE, Some(&params)).await
    }

    /// Replace the authenticated user's avatar with the given image, handed over as raw bytes
    /// (PNG, JPG, or GIF, at most 700KB).
    ///
    /// On success, the future yields the updated user.
    pub async fn update_profile_image(&self, image: &[u8]) -> Result<Response<TwitterUser>> {
        let params = ParamList::new()
            .extended_tweets()
            .add_param("image", base64::encode(image));
        self.core
            .post(links::account::UPDATE_PROFILE_IMAGE, Some(&params))
            .await
    }

    /// Replace the authenticated user's profile banner with the given image.
    ///
    /// `width`, `height`, `offset_left`, and `offset_top` crop the uploaded image; either pass
    /// all four or none.
    pub async fn update_profile_banner(
        &self,
        banner: &[u8],
        crop: Option<BannerCrop>,
    ) -> Result<Response<()>> {
        let params = ParamList::new().add_param("banner", base64::encode(banner));
        let params = match crop {
            Some(crop) => params
                .add_param("width", crop.width.to_string())
                .add_param("height", crop.height.to_string())
                .add_param("offset_left", crop.offset_left.to_string())
                .add_param("offset_top", crop.offset_top.to_string()),
            None => params,
        };
        self.core
            .post_empty(links::account::UPDATE_PROFILE_BANNER, Some(&params))
            .await
    }

    /// Remove the authenticated user's profile banner.
    pub async fn remove_profile_banner(&self) -> Result<Response<()>> {
        self.core
            .post_empty(links::account::REMOVE_PROFILE_BANNER, None)
            .await
    }

    /// Load the profile banner renditions for the given user.
    pub async fn profile_banner(
        &self,
        acct: impl Into<crate::users::UserID>,
    ) -> Result<Response<ProfileBanner>> {
        let params = ParamList::new().add_user_param(acct.into());
        self.core.get(links::account::PROFILE_BANNER, Some(&params)).await
    }
}

/// The crop window for an uploaded profile banner, in pixels of the uploaded image.
#[derive(Debug, Copy, Clone)]
pub struct BannerCrop {
    /// Width of the cropped region.
    pub width: u32,
    /// Height of the cropped region.
    pub height: u32,
    /// Distance of the crop from the left edge.
    pub offset_left: u32,
    /// Distance of the crop from the top edge.
    pub offset_top: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[test]
    fn parse_settings() {
        let content = load_file("sample_payloads/settings.json");
        let settings: AccountSettings = serde_json::from_str(&content).unwrap();

        assert_eq!(settings.screen_name, "theSeanCook");
        assert_eq!(settings.language, "en");
        assert!(settings.sleep_time.enabled);
        assert_eq!(settings.sleep_time.start_time, Some(22));
        assert_eq!(settings.time_zone.tzinfo_name, "America/New_York");
        assert_eq!(settings.trend_location[0].woeid, 23424977);
    }

    #[tokio::test]
    async fn settings_update_only_sends_what_changed() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/settings.json"));

        let update = SettingsUpdate::new().sleep_time(22, 8).lang("en");
        client.account().update_settings(&update).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/account/settings.json");
        assert_eq!(sent.param("start_sleep_time"), Some("22"));
        assert_eq!(sent.param("end_sleep_time"), Some("8"));
        assert_eq!(sent.param("lang"), Some("en"));
        assert_eq!(sent.param("time_zone"), None);
        assert_eq!(sent.param("sleep_time_enabled"), None);
    }

    #[tokio::test]
    async fn profile_image_is_base64() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/user.json"));

        client.account().update_profile_image(&[1, 2, 3, 4]).await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(sent.param("image"), Some(base64::encode(&[1u8, 2, 3, 4]).as_str()));
    }
}
