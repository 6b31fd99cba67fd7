// src/models.rs

use crate::error::ZurichError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a parking spot. The dataset has used both strings and integers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum SpotId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotId::Number(n) => write!(f, "{}", n),
            SpotId::Text(s) => f.write_str(s),
        }
    }
}

/// A GeoJSON `FeatureCollection` as returned by the WFS endpoint.
/// Features are kept raw and mapped one by one.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Value>,
}

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawProperties {
    id: SpotId,
}

#[derive(Deserialize)]
struct RawGeometry {
    // [longitude, latitude, optional altitude]
    coordinates: Vec<f64>,
}

/// A single disabled parking spot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisabledParking {
    spot_id: SpotId,
    longitude: f64,
    latitude: f64,
}

impl DisabledParking {
    /// Builds a `DisabledParking` from one GeoJSON feature.
    ///
    /// # Arguments
    /// * `feature`: a feature object with `properties.id` and `geometry.coordinates`.
    ///
    /// # Returns
    /// The mapped record, or `ZurichError::JsonError` if the feature is missing
    /// one of those members or has the wrong shape.
    pub fn from_feature(feature: &Value) -> Result<Self, ZurichError> {
        let raw = RawFeature::deserialize(feature)?;
        let (longitude, latitude) = match raw.geometry.coordinates[..] {
            [longitude, latitude, ..] => (longitude, latitude),
            ref short => {
                return Err(ZurichError::JsonError(serde::de::Error::invalid_length(
                    short.len(),
                    &"at least two coordinates",
                )))
            }
        };
        Ok(DisabledParking {
            spot_id: raw.properties.id,
            longitude,
            latitude,
        })
    }

    pub fn spot_id(&self) -> &SpotId {
        &self.spot_id
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl TryFrom<&Value> for DisabledParking {
    type Error = ZurichError;

    fn try_from(feature: &Value) -> Result<Self, Self::Error> {
        DisabledParking::from_feature(feature)
    }
}
