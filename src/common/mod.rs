// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Basic building blocks shared by every endpoint module.
//!
//! Everything in here is infrastructure the resource handles glob-import: the `ParamList`
//! collection that requests are assembled from, the percent-encoding routine Twitter requires,
//! the `Response` envelope with rate-limit headers, and a handful of serde glue functions for
//! formats Twitter uses everywhere (timestamps, MIME types, numbers-as-strings).

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::TimeZone;
use hyper::header::{HeaderMap, HeaderValue};
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

mod response;

pub use self::response::*;

use crate::lists::ListID;
use crate::users::UserID;

/// A set of headers returned with a response.
pub type Headers = HeaderMap<HeaderValue>;

/// Alias for the owned-or-borrowed strings parameters are stored as.
pub type CowStr = Cow<'static, str>;

/// Represents a list of parameters to a Twitter API call.
///
/// This type wraps a `HashMap<Cow<'static, str>, Cow<'static, str>>` to collect the key/value
/// pairs that are sent with a request, either as a query string or as a form body. The `Cow` keeps
/// string literals allocation-free while still accepting owned `String`s.
///
/// The adder functions follow a builder pattern, so a `ParamList` can be assembled in one
/// statement:
///
/// ```
/// use roost::ParamList;
///
/// // Looking up the user `@rustlang` with `GET users/show`:
/// let params = ParamList::new()
///     .extended_tweets()
///     .add_user_param("rustlang".into());
/// ```
#[derive(Debug, Clone, Default, derive_more::Deref, derive_more::DerefMut, derive_more::From)]
pub struct ParamList(HashMap<CowStr, CowStr>);

impl ParamList {
    /// Creates a new, empty `ParamList`.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Adds the `tweet_mode=extended` parameter to this `ParamList`.
    ///
    /// Without this parameter Twitter serves tweets in the legacy format, with text truncated past
    /// 140 characters. The `Deserialize` impl for `Tweet` (and anything containing one) expects
    /// the extended format, so every endpoint that can return tweets sets this.
    pub fn extended_tweets(self) -> Self {
        self.add_param("tweet_mode", "extended")
    }

    /// Adds the given key/value parameter to this `ParamList`.
    pub fn add_param(mut self, key: impl Into<CowStr>, value: impl Into<CowStr>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Adds the given key/value parameter to this `ParamList` only if the given value is `Some`.
    pub fn add_opt_param(self, key: impl Into<CowStr>, value: Option<impl Into<CowStr>>) -> Self {
        match value {
            Some(val) => self.add_param(key, val),
            None => self,
        }
    }

    /// Adds the given key/value to this `ParamList` by mutating it in place, rather than consuming
    /// it as in `add_param`.
    pub fn add_param_ref(&mut self, key: impl Into<CowStr>, value: impl Into<CowStr>) {
        self.0.insert(key.into(), value.into());
    }

    /// Adds the given `UserID` to this `ParamList`, as either a `user_id` or `screen_name`
    /// parameter as appropriate.
    pub fn add_user_param(self, id: UserID) -> Self {
        match id {
            UserID::ID(id) => self.add_param("user_id", id.to_string()),
            UserID::ScreenName(name) => self.add_param("screen_name", name),
        }
    }

    /// Adds the given `ListID` to this `ParamList`, as either a `list_id` parameter or a
    /// `slug` with its accompanying `owner_id`/`owner_screen_name`, as appropriate.
    pub fn add_list_param(mut self, list: ListID) -> Self {
        match list {
            ListID::Slug(owner, name) => {
                match owner {
                    UserID::ID(id) => self.add_param_ref("owner_id", id.to_string()),
                    UserID::ScreenName(owner_name) => {
                        self.add_param_ref("owner_screen_name", owner_name)
                    }
                }
                self.add_param("slug", name)
            }
            ListID::ID(id) => self.add_param("list_id", id.to_string()),
        }
    }

    /// Merge the parameters from the given `ParamList` into this one.
    pub(crate) fn combine(&mut self, other: ParamList) {
        self.0.extend(other.0);
    }

    /// Renders this `ParamList` as an `application/x-www-form-urlencoded` string, with all keys
    /// and values percent-encoded according to Twitter's requirements.
    pub fn to_urlencoded(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// Helper trait to stringify the contents of an Option
pub(crate) trait MapString {
    fn map_string(&self) -> Option<String>;
}

impl<T: std::fmt::Display> MapString for Option<T> {
    fn map_string(&self) -> Option<String> {
        self.as_ref().map(|v| v.to_string())
    }
}

/// Splits a collection of account references into the comma-separated `user_id` and `screen_name`
/// strings the lookup endpoints expect. The two styles can be mixed in one call.
pub(crate) fn multiple_names_param<T, I>(accts: I) -> (String, String)
where
    T: Into<UserID>,
    I: IntoIterator<Item = T>,
{
    let mut ids = Vec::new();
    let mut names = Vec::new();

    for x in accts {
        match x.into() {
            UserID::ID(id) => ids.push(id.to_string()),
            UserID::ScreenName(name) => names.push(name.to_string()),
        }
    }

    (ids.join(","), names.join(","))
}

/// Translates a pair of codepoint offsets into byte offsets usable to slice the given string.
///
/// Twitter reports entity ranges in codepoints; Rust slices in bytes. This rewrites the range in
/// place.
pub(crate) fn codepoints_to_bytes(&mut (ref mut start, ref mut end): &mut (usize, usize), text: &str) {
    let mut byte_start = *start;
    let mut byte_end = *end;
    for (ch_offset, (by_offset, _)) in text.char_indices().enumerate() {
        if ch_offset == *start {
            byte_start = by_offset;
        } else if ch_offset == *end {
            byte_end = by_offset;
        }
    }
    *start = byte_start;
    if text.chars().count() == *end {
        *end = text.len()
    } else {
        *end = byte_end
    }
}

/// Deserializes a timestamp in Twitter's `created_at` format into a UTC `DateTime`.
pub(crate) fn deserialize_datetime<'de, D>(
    ser: D,
) -> Result<chrono::DateTime<chrono::Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(ser)?;
    let date = (chrono::Utc)
        .datetime_from_str(&s, "%a %b %d %T %z %Y")
        .map_err(|e| D::Error::custom(e))?;
    Ok(date)
}

pub(crate) fn deserialize_mime<'de, D>(ser: D) -> Result<mime::Mime, D::Error>
where
    D: Deserializer<'de>,
{
    let str = String::deserialize(ser)?;
    str.parse().map_err(|e| D::Error::custom(e))
}

/// Deserializes any `FromStr` type out of a JSON string. The DM endpoints hand back IDs and
/// timestamps as strings, so this gets used all over that module.
pub(crate) fn deser_from_string<'de, D, T>(ser: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let str = String::deserialize(ser)?;
    str.parse().map_err(|e| D::Error::custom(e))
}

/// Percent-encodes the given string based on the Twitter API specification.
///
/// Twitter bases its encoding scheme on RFC 3986, Section 2.1: every *byte* that is not an ASCII
/// number or letter, or one of `-`, `.`, `_`, `~`, must be replaced with a percent sign and the
/// byte value in hexadecimal. This encoding is load-bearing for OAuth: the signature base string
/// must be encoded exactly this way or the server will reject the signature.
pub fn percent_encode(src: &str) -> PercentEncode {
    lazy_static::lazy_static! {
        static ref ENCODER: AsciiSet = percent_encoding::NON_ALPHANUMERIC
            .remove(b'-')
            .remove(b'.')
            .remove(b'_')
            .remove(b'~');
    }
    utf8_percent_encode(src, &*ENCODER)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;

    pub(crate) fn load_file(path: &str) -> String {
        let mut file = File::open(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn percent_encode_reserved() {
        assert_eq!(
            percent_encode("Ladies + Gentlemen").to_string(),
            "Ladies%20%2B%20Gentlemen"
        );
        assert_eq!(percent_encode("Dogs, Cats & Mice").to_string(), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("abc-._~XYZ09").to_string(), "abc-._~XYZ09");
    }

    #[test]
    fn param_list_urlencoded() {
        let params = ParamList::new().add_param("q", "rust lang");
        assert_eq!(params.to_urlencoded(), "q=rust%20lang");

        let params = params.add_opt_param("count", None::<String>);
        assert_eq!(params.len(), 1);

        let params = params.add_opt_param("count", Some("20"));
        assert_eq!(params.get("count").map(|v| v.as_ref()), Some("20"));
    }

    #[test]
    fn user_and_list_params() {
        let params = ParamList::new().add_user_param(1234.into());
        assert_eq!(params.get("user_id").map(|v| v.as_ref()), Some("1234"));

        let params = ParamList::new().add_user_param("rustlang".into());
        assert_eq!(params.get("screen_name").map(|v| v.as_ref()), Some("rustlang"));

        let params = ParamList::new().add_list_param(ListID::from_slug("rustlang", "compiler-team"));
        assert_eq!(params.get("owner_screen_name").map(|v| v.as_ref()), Some("rustlang"));
        assert_eq!(params.get("slug").map(|v| v.as_ref()), Some("compiler-team"));
        assert!(params.get("list_id").is_none());
    }

    #[test]
    fn codepoint_ranges() {
        let unicode = "frônt Iñtërnâtiônàližætiøn ënd";
        let mut range = (6, 26);
        codepoints_to_bytes(&mut range, unicode);
        assert_eq!(&unicode[range.0..range.1], "Iñtërnâtiônàližætiøn");

        let mut range = (6, 30);
        codepoints_to_bytes(&mut range, unicode);
        assert_eq!(&unicode[range.0..range.1], "Iñtërnâtiônàližætiøn ënd");
    }
}
