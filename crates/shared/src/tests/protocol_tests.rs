use super::*;

#[test]
fn request_path_orders_longitude_before_latitude() {
    let request = RouteRequest::new(
        DEFAULT_PROFILE,
        GeoPoint::new(-23.55, -46.63),
        GeoPoint::new(-23.54, -46.36),
    );
    assert_eq!(
        request.path(),
        "route/v1/driving/-46.63,-23.55;-46.36,-23.54"
    );
    assert_eq!(
        request.query(),
        [("overview", "full"), ("geometries", "geojson")]
    );
}

#[test]
fn parses_first_route_geometry_in_order() {
    let raw = r#"{
        "code": "Ok",
        "routes": [
            {"distance": 31000.5, "duration": 2400.0, "geometry": {"type": "LineString", "coordinates": [[-46.63,-23.55],[-46.50,-23.50],[-46.36,-23.54]]}},
            {"geometry": {"coordinates": [[0.0, 0.0]]}}
        ],
        "waypoints": []
    }"#;
    let response: RouteResponse = serde_json::from_str(raw).expect("parse");
    assert_eq!(response.code.as_deref(), Some("Ok"));
    assert_eq!(response.routes.len(), 2);

    let route = response.routes[0].geometry.to_route().expect("valid geometry");
    assert_eq!(
        route.points(),
        &[
            GeoPoint::new(-23.55, -46.63),
            GeoPoint::new(-23.50, -46.50),
            GeoPoint::new(-23.54, -46.36),
        ]
    );
}

#[test]
fn empty_object_parses_to_no_routes() {
    let response: RouteResponse = serde_json::from_str("{}").expect("parse");
    assert!(response.routes.is_empty());
}

#[test]
fn wrong_coordinate_shapes_are_rejected() {
    assert!(serde_json::from_str::<RouteResponse>(
        r#"{"routes":[{"geometry":{"coordinates":[[1.0]]}}]}"#
    )
    .is_err());
    assert!(serde_json::from_str::<RouteResponse>(
        r#"{"routes":[{"geometry":{"coordinates":[["a","b"]]}}]}"#
    )
    .is_err());
    assert!(serde_json::from_str::<RouteResponse>(r#"{"routes":[{}]}"#).is_err());
    assert!(serde_json::from_str::<RouteResponse>(r#"{"routes":"none"}"#).is_err());
}

#[test]
fn out_of_range_vertex_invalidates_geometry() {
    let geometry = LineStringGeometry {
        coordinates: vec![[-46.63, -23.55], [-23.55, -146.63]],
    };
    assert!(geometry.to_route().is_none());
}
