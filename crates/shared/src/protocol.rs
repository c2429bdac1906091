//! Wire types for the OSRM-style `route/v1` HTTP API.

use serde::Deserialize;

use crate::domain::{GeoPoint, Route};

pub const DEFAULT_PROFILE: &str = "driving";

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub profile: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl RouteRequest {
    pub fn new(profile: impl Into<String>, origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            profile: profile.into(),
            origin,
            destination,
        }
    }

    /// `route/v1/{profile}/{lon},{lat};{lon},{lat}`
    pub fn path(&self) -> String {
        let [origin_lon, origin_lat] = self.origin.to_lon_lat();
        let [dest_lon, dest_lat] = self.destination.to_lon_lat();
        format!(
            "route/v1/{}/{origin_lon},{origin_lat};{dest_lon},{dest_lat}",
            self.profile
        )
    }

    /// Full-resolution GeoJSON geometry; [`LineStringGeometry`] only parses that form.
    pub fn query(&self) -> [(&'static str, &'static str); 2] {
        [("overview", "full"), ("geometries", "geojson")]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteCandidate {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    pub geometry: LineStringGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineStringGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl LineStringGeometry {
    /// Returns `None` if any vertex is outside WGS84 bounds or not finite.
    pub fn to_route(&self) -> Option<Route> {
        self.coordinates
            .iter()
            .map(|pair| {
                let point = GeoPoint::from_lon_lat(*pair);
                point.is_valid().then_some(point)
            })
            .collect::<Option<Vec<_>>>()
            .map(Route::new)
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
