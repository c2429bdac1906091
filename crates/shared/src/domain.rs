use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DESTINATION: GeoPoint = GeoPoint {
    latitude: -23.54,
    longitude: -46.36,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Routing services (OSRM, GeoJSON) order coordinates longitude first.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<GeoPoint>);

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub point: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Fix {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            point,
            accuracy_m: None,
            timestamp: None,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
