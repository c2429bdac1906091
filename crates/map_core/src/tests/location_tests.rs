use super::*;

#[tokio::test]
async fn missing_provider_denies_and_has_no_fix() {
    let provider = MissingLocationProvider;
    assert_eq!(provider.request_permission().await, PermissionStatus::Denied);
    assert!(matches!(
        provider.current_position().await,
        Err(SensorError::Unavailable(_))
    ));
}

#[tokio::test]
async fn fixed_provider_reports_configured_point_with_timestamp() {
    let provider = FixedLocationProvider::new(GeoPoint::new(-23.55, -46.63)).with_accuracy(12.5);

    assert_eq!(provider.request_permission().await, PermissionStatus::Granted);
    let fix = provider.current_position().await.expect("fix");
    assert_eq!(fix.point, GeoPoint::new(-23.55, -46.63));
    assert_eq!(fix.accuracy_m, Some(12.5));
    assert!(fix.timestamp.is_some());
}

#[tokio::test]
async fn fixed_provider_can_simulate_denied_permission() {
    let provider = FixedLocationProvider::new(GeoPoint::new(0.0, 0.0))
        .with_permission(PermissionStatus::Denied);
    assert_eq!(provider.request_permission().await, PermissionStatus::Denied);
}

#[tokio::test]
async fn fixed_provider_rejects_out_of_range_point() {
    let provider = FixedLocationProvider::new(GeoPoint::new(123.0, -46.63));
    assert!(matches!(
        provider.current_position().await,
        Err(SensorError::InvalidCoordinates(_))
    ));
}
