use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use map_core::{
    FixedLocationProvider, HttpRouteResolver, MapSession, Scene, SessionPhase,
};
use shared::{
    domain::{GeoPoint, PermissionStatus},
    error::ErrorKind,
};
use tokio::net::TcpListener;

const ORIGIN: GeoPoint = GeoPoint::new(-23.55, -46.63);
const DESTINATION: GeoPoint = GeoPoint::new(-23.54, -46.36);

async fn spawn_fixed_routing_server(body: &'static str) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/route/v1/driving/:coordinates",
        get(move || async move { (StatusCode::OK, body) }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn scenario_route_found_renders_polyline() {
    let base_url = spawn_fixed_routing_server(
        r#"{"routes":[{"geometry":{"coordinates":[[-46.63,-23.55],[-46.50,-23.50],[-46.36,-23.54]]}}]}"#,
    )
    .await;
    let session = MapSession::new(
        Arc::new(FixedLocationProvider::new(ORIGIN)),
        Arc::new(HttpRouteResolver::new(&base_url).expect("resolver")),
        DESTINATION,
    );

    let state = session.run().await;

    assert_eq!(state.phase, SessionPhase::RouteReady);
    assert_eq!(state.position, Some(ORIGIN));
    assert_eq!(state.error, None);
    assert_eq!(
        state.route.points(),
        &[
            GeoPoint::new(-23.55, -46.63),
            GeoPoint::new(-23.50, -46.50),
            GeoPoint::new(-23.54, -46.36),
        ]
    );

    let Scene::Map(view) = Scene::from_state(&state, session.destination()) else {
        panic!("expected map scene");
    };
    assert_eq!(
        view.polyline.expect("polyline").coordinates,
        state.route.points().to_vec()
    );
}

#[tokio::test]
async fn scenario_no_route_keeps_map_without_error() {
    let base_url = spawn_fixed_routing_server(r#"{"routes":[]}"#).await;
    let session = MapSession::new(
        Arc::new(FixedLocationProvider::new(ORIGIN)),
        Arc::new(HttpRouteResolver::new(&base_url).expect("resolver")),
        DESTINATION,
    );

    let state = session.run().await;

    assert_eq!(state.phase, SessionPhase::RouteEmpty);
    assert_eq!(state.position, Some(ORIGIN));
    assert_eq!(state.error, None);
    assert!(state.route.is_empty());

    let Scene::Map(view) = Scene::from_state(&state, session.destination()) else {
        panic!("expected map scene");
    };
    assert!(view.polyline.is_none());
    assert_eq!(view.markers.len(), 2);
}

#[tokio::test]
async fn scenario_permission_denied_shows_error() {
    let base_url = spawn_fixed_routing_server(r#"{"routes":[]}"#).await;
    let session = MapSession::new(
        Arc::new(FixedLocationProvider::new(ORIGIN).with_permission(PermissionStatus::Denied)),
        Arc::new(HttpRouteResolver::new(&base_url).expect("resolver")),
        DESTINATION,
    );

    let state = session.run().await;

    assert_eq!(state.position, None);
    assert_eq!(state.error, Some(ErrorKind::PermissionDenied));
    assert!(state.route.is_empty());
    assert_eq!(
        Scene::from_state(&state, session.destination()),
        Scene::Error {
            message: "permission denied".to_string()
        }
    );
}
