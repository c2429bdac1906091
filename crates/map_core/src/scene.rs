//! Render model derived from a [`PresentationState`] snapshot.
//!
//! Drawing tiles, markers and lines belongs to the map surface; this module only decides what
//! that surface should show.

use serde::Serialize;
use shared::domain::GeoPoint;

use crate::session::PresentationState;

pub const INITIAL_LATITUDE_DELTA: f64 = 0.0922;
pub const INITIAL_LONGITUDE_DELTA: f64 = 0.0421;
pub const ROUTE_STROKE_WIDTH: f32 = 4.0;
pub const ROUTE_STROKE_COLOR: &str = "blue";
pub const MARKER_ICON_SIZE: u32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub center: GeoPoint,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Destination,
    CurrentPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub coordinate: GeoPoint,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub icon_color: &'static str,
    pub icon_size: u32,
}

impl Marker {
    fn destination(coordinate: GeoPoint) -> Self {
        Self {
            kind: MarkerKind::Destination,
            coordinate,
            title: "Destination",
            description: "Arrival point",
            icon: "flag",
            icon_color: "green",
            icon_size: MARKER_ICON_SIZE,
        }
    }

    fn current_position(coordinate: GeoPoint) -> Self {
        Self {
            kind: MarkerKind::CurrentPosition,
            coordinate,
            title: "You are here",
            description: "Current location",
            icon: "map-marker",
            icon_color: "red",
            icon_size: MARKER_ICON_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub coordinates: Vec<GeoPoint>,
    pub stroke_width: f32,
    pub stroke_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub initial_region: Region,
    pub shows_user_location: bool,
    pub shows_my_location_button: bool,
    pub markers: Vec<Marker>,
    pub polyline: Option<Polyline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Scene {
    Loading,
    Error { message: String },
    Map(MapView),
}

impl Scene {
    pub fn from_state(state: &PresentationState, destination: GeoPoint) -> Self {
        if let Some(error) = &state.error {
            return Scene::Error {
                message: error.to_string(),
            };
        }

        let Some(position) = state.position else {
            return Scene::Loading;
        };

        let polyline = (!state.route.is_empty()).then(|| Polyline {
            coordinates: state.route.points().to_vec(),
            stroke_width: ROUTE_STROKE_WIDTH,
            stroke_color: ROUTE_STROKE_COLOR,
        });

        Scene::Map(MapView {
            initial_region: Region {
                center: position,
                latitude_delta: INITIAL_LATITUDE_DELTA,
                longitude_delta: INITIAL_LONGITUDE_DELTA,
            },
            shows_user_location: true,
            shows_my_location_button: true,
            markers: vec![
                Marker::destination(destination),
                Marker::current_position(position),
            ],
            polyline,
        })
    }
}

#[cfg(test)]
#[path = "tests/scene_tests.rs"]
mod tests;
