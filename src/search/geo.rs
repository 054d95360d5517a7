//! Geographic point filter

use crate::search::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, SearchError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(SearchError::Parse(format!("Latitude out of range: {}", lat)));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(SearchError::Parse(format!("Longitude out of range: {}", lon)));
        }
        Ok(Self { lat, lon })
    }
}

/// Parses `"lat,lon"`
impl FromStr for GeoPoint {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SearchError::Parse(format!(
                "Expected a point as \"lat,lon\", got \"{}\"",
                s
            )));
        };

        let parse = |value: &str, name: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|e| SearchError::Parse(format!("Invalid {} \"{}\": {}", name, value, e)))
        };

        GeoPoint::new(parse(lat, "latitude")?, parse(lon, "longitude")?)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// "Point lies within the shapes stored in `field`".
///
/// Shape evaluation happens in the store; this only describes the test.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPredicate {
    pub field: String,
    pub point: GeoPoint,
}

impl GeoPredicate {
    pub fn new(field: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            field: field.into(),
            point,
        }
    }

    /// Renders a `geo_shape` intersection clause. GeoJSON orders coordinates lon, lat.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "geo_shape": {
                self.field.as_str(): {
                    "shape": {
                        "type": "point",
                        "coordinates": [self.point.lon, self.point.lat],
                    },
                    "relation": "intersects",
                }
            }
        })
    }
}
