// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with the places that tweets can be tagged with.
//!
//! A [`Place`] is Twitter's handle to a named location: anything from a single point of interest
//! to a whole country. Tweets carry them in their `place` field; the methods here look places up
//! by ID, by coordinate, or by free-form query, mainly so that a place ID can be attached to a
//! [`DraftTweet`].
//!
//! [`Place`]: struct.Place.html
//! [`DraftTweet`]: ../statuses/struct.DraftTweet.html

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::client::Core;
use crate::common::*;
use crate::error::Result;
use crate::links;

/// Represents a named location.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    /// Alphanumeric ID of the location.
    pub id: String,
    /// Short human-readable name of this place.
    pub name: String,
    /// Full human-readable name of this place.
    pub full_name: String,
    /// Name of the country containing this place.
    pub country: String,
    /// Shortened country code representing the country containing this place.
    pub country_code: String,
    /// The type of location this place represents.
    pub place_type: PlaceType,
    /// If present, the country or administrative region that contains this place.
    pub contained_within: Option<Vec<Place>>,
    /// A bounding box of latitude/longitude coordinates that encloses this place.
    pub bounding_box: Option<BoundingBox>,
    /// Source-specific extra information about this place.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// A bounding polygon around a place, in GeoJSON form.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundingBox {
    /// The polygon rings; each vertex is a (longitude, latitude) pair, per GeoJSON convention.
    pub coordinates: Vec<Vec<(f64, f64)>>,
}

/// Represents the type of region a place describes.
///
/// The `Display` impl renders the string the API uses for the `granularity` parameter, so the
/// enum doubles as the input to [`ReverseGeocode::granularity`].
///
/// [`ReverseGeocode::granularity`]: struct.ReverseGeocode.html#method.granularity
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    /// A single point of interest, like a landmark or business.
    #[serde(rename = "poi")]
    #[display(fmt = "poi")]
    POI,
    /// A neighborhood within a city.
    #[display(fmt = "neighborhood")]
    Neighborhood,
    /// A city.
    #[display(fmt = "city")]
    City,
    /// An administrative region, like a state or province.
    #[display(fmt = "admin")]
    Admin,
    /// A country.
    #[display(fmt = "country")]
    Country,
}

/// A distance measurement for the `accuracy` parameter of the geo queries.
#[derive(Debug, Copy, Clone)]
pub enum Accuracy {
    /// A distance in meters.
    Meters(f64),
    /// A distance in feet.
    Feet(f64),
}

/// The `Display` impl renders the parameter the way the API expects: meters carry no unit suffix,
/// feet are marked with `ft`.
impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Accuracy::Meters(dist) => write!(f, "{}", dist),
            Accuracy::Feet(dist) => write!(f, "{}ft", dist),
        }
    }
}

// both geo lookup endpoints wrap their results the same way
#[derive(Deserialize)]
struct PlacesEnvelope {
    result: PlacesInner,
}

#[derive(Deserialize)]
struct PlacesInner {
    places: Vec<Place>,
}

/// Handle for the place endpoints.
pub struct Geo {
    core: Arc<Core>,
}

impl Geo {
    pub(crate) fn new(core: Arc<Core>) -> Geo {
        Geo { core }
    }

    /// Look up more complete information for the given place ID.
    pub async fn show(&self, place_id: &str) -> Result<Response<Place>> {
        let url = format!("{}/{}.json", links::geo::SHOW_STEM, place_id);
        self.core.get(&url, None).await
    }

    /// Begin a reverse-geocode query for places containing the given coordinate.
    ///
    /// Finish the query with [`ReverseGeocode::call`]:
    ///
    /// ```rust,no_run
    /// # use roost::Client;
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let client: Client = unimplemented!();
    /// use roost::geo::PlaceType;
    ///
    /// let places = client
    ///     .geo()
    ///     .reverse_geocode(51.507222, -0.1275)
    ///     .granularity(PlaceType::City)
    ///     .call()
    ///     .await
    ///     .unwrap();
    /// # }
    /// ```
    ///
    /// [`ReverseGeocode::call`]: struct.ReverseGeocode.html#method.call
    pub fn reverse_geocode(&self, latitude: f64, longitude: f64) -> ReverseGeocode {
        ReverseGeocode {
            core: self.core.clone(),
            latitude,
            longitude,
            accuracy: None,
            granularity: None,
            max_results: None,
        }
    }

    /// Begin a free-form place search. At least one of [`query`], [`point`], or [`ip`] must be
    /// set before calling.
    ///
    /// [`query`]: struct.PlaceSearch.html#method.query
    /// [`point`]: struct.PlaceSearch.html#method.point
    /// [`ip`]: struct.PlaceSearch.html#method.ip
    pub fn search(&self) -> PlaceSearch {
        PlaceSearch {
            core: self.core.clone(),
            query: None,
            point: None,
            ip: None,
            accuracy: None,
            granularity: None,
            max_results: None,
            contained_within: None,
        }
    }
}

/// An in-progress `geo/reverse_geocode` query.
#[must_use = "query builders do nothing unless `call`ed"]
pub struct ReverseGeocode {
    core: Arc<Core>,
    latitude: f64,
    longitude: f64,
    accuracy: Option<Accuracy>,
    granularity: Option<PlaceType>,
    max_results: Option<u32>,
}

impl ReverseGeocode {
    /// A hint on the "region" to search within, as a radius around the coordinate. Defaults to
    /// zero meters server-side.
    pub fn accuracy(self, accuracy: Accuracy) -> Self {
        ReverseGeocode {
            accuracy: Some(accuracy),
            ..self
        }
    }

    /// The granularity of place to return. Defaults to `Neighborhood` server-side.
    pub fn granularity(self, granularity: PlaceType) -> Self {
        ReverseGeocode {
            granularity: Some(granularity),
            ..self
        }
    }

    /// A hint on how many results to return.
    pub fn max_results(self, max_results: u32) -> Self {
        ReverseGeocode {
            max_results: Some(max_results),
            ..self
        }
    }

    /// Executes the query.
    pub async fn call(self) -> Result<Response<Vec<Place>>> {
        let params = ParamList::new()
            .add_param("lat", self.latitude.to_string())
            .add_param("long", self.longitude.to_string())
            .add_opt_param("accuracy", self.accuracy.map_string())
            .add_opt_param("granularity", self.granularity.map_string())
            .add_opt_param("max_results", self.max_results.map_string());

        let resp: Response<PlacesEnvelope> =
            self.core.get(links::geo::REVERSE_GEOCODE, Some(&params)).await?;
        Ok(resp.map(|envelope| envelope.result.places))
    }
}

/// An in-progress `geo/search` query.
#[must_use = "query builders do nothing unless `call`ed"]
pub struct PlaceSearch {
    core: Arc<Core>,
    query: Option<CowStr>,
    point: Option<(f64, f64)>,
    ip: Option<CowStr>,
    accuracy: Option<Accuracy>,
    granularity: Option<PlaceType>,
    max_results: Option<u32>,
    contained_within: Option<CowStr>,
}

impl PlaceSearch {
    /// Free-form text to match place names against.
    pub fn query(self, query: impl Into<CowStr>) -> Self {
        PlaceSearch {
            query: Some(query.into()),
            ..self
        }
    }

    /// A (latitude, longitude) coordinate to search around.
    pub fn point(self, latitude: f64, longitude: f64) -> Self {
        PlaceSearch {
            point: Some((latitude, longitude)),
            ..self
        }
    }

    /// An IP address to geolocate and search around.
    pub fn ip(self, ip: impl Into<CowStr>) -> Self {
        PlaceSearch {
            ip: Some(ip.into()),
            ..self
        }
    }

    /// A hint on the "region" to search within, as a radius around the given coordinate.
    pub fn accuracy(self, accuracy: Accuracy) -> Self {
        PlaceSearch {
            accuracy: Some(accuracy),
            ..self
        }
    }

    /// The granularity of place to return.
    pub fn granularity(self, granularity: PlaceType) -> Self {
        PlaceSearch {
            granularity: Some(granularity),
            ..self
        }
    }

    /// A hint on how many results to return.
    pub fn max_results(self, max_results: u32) -> Self {
        PlaceSearch {
            max_results: Some(max_results),
            ..self
        }
    }

    /// Restricts results to places contained within the given place ID.
    pub fn contained_within(self, place_id: impl Into<CowStr>) -> Self {
        PlaceSearch {
            contained_within: Some(place_id.into()),
            ..self
        }
    }

    /// Executes the query.
    pub async fn call(self) -> Result<Response<Vec<Place>>> {
        let params = ParamList::new()
            .add_opt_param("query", self.query)
            .add_opt_param("lat", self.point.map(|(lat, _)| lat.to_string()))
            .add_opt_param("long", self.point.map(|(_, long)| long.to_string()))
            .add_opt_param("ip", self.ip)
            .add_opt_param("accuracy", self.accuracy.map_string())
            .add_opt_param("granularity", self.granularity.map_string())
            .add_opt_param("max_results", self.max_results.map_string())
            .add_opt_param("contained_within", self.contained_within);

        let resp: Response<PlacesEnvelope> =
            self.core.get(links::geo::SEARCH, Some(&params)).await?;
        Ok(resp.map(|envelope| envelope.result.places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::mock_client;
    use crate::common::tests::load_file;

    #[test]
    fn parse_place() {
        let content = load_file("sample_payloads/place.json");
        let place: Place = serde_json::from_str(&content).unwrap();

        assert_eq!(place.id, "df51dec6f4ee2b2c");
        assert_eq!(place.full_name, "Presidio, San Francisco");
        assert_eq!(place.place_type, PlaceType::Neighborhood);
        assert_eq!(place.country_code, "US");
        let bbox = place.bounding_box.unwrap();
        assert_eq!(bbox.coordinates[0][0], (-122.4871579, 37.7868719));
    }

    #[test]
    fn accuracy_rendering() {
        assert_eq!(Accuracy::Meters(50.0).to_string(), "50");
        assert_eq!(Accuracy::Feet(100.0).to_string(), "100ft");
    }

    #[tokio::test]
    async fn reverse_geocode_params() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/geo_search.json"));

        let places = client
            .geo()
            .reverse_geocode(37.7821, -122.4)
            .granularity(PlaceType::City)
            .accuracy(Accuracy::Meters(500.0))
            .call()
            .await
            .unwrap();
        assert_eq!(places.response.len(), 1);

        let sent = mock.sent_once();
        assert_eq!(sent.path, "https://api.twitter.com/1.1/geo/reverse_geocode.json");
        assert_eq!(sent.param("lat"), Some("37.7821"));
        assert_eq!(sent.param("long"), Some("-122.4"));
        assert_eq!(sent.param("granularity"), Some("city"));
        assert_eq!(sent.param("accuracy"), Some("500"));
        assert_eq!(sent.param("max_results"), None);
    }

    #[tokio::test]
    async fn show_substitutes_the_place_id() {
        let (client, mock) = mock_client();
        mock.reply(&load_file("sample_payloads/place.json"));

        client.geo().show("df51dec6f4ee2b2c").await.unwrap();

        let sent = mock.sent_once();
        assert_eq!(
            sent.path,
            "https://api.twitter.com/1.1/geo/id/df51dec6f4ee2b2c.json"
        );
    }
}
