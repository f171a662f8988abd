use super::*;

#[test]
fn position_error_reason_maps_known_codes() {
    assert_eq!(position_error_reason(1), "permission denied");
    assert_eq!(position_error_reason(2), "position unavailable");
    assert_eq!(position_error_reason(3), "timed out");
    assert_eq!(position_error_reason(0), "unknown geolocation error");
}

#[tokio::test]
async fn fixed_geolocator_returns_configured_position() {
    let here = Coordinates { latitude: 20.2961, longitude: 85.8245 };
    let geo = FixedGeolocator::new(Some(here));
    assert_eq!(geo.current_position().await, Ok(here));
}

#[tokio::test]
async fn fixed_geolocator_without_position_is_unavailable() {
    let geo = FixedGeolocator::new(None);
    let err = geo.current_position().await.unwrap_err();
    assert!(matches!(err, ClientError::CapabilityUnavailable(_)));
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn browser_geolocator_is_unavailable_natively() {
    let err = BrowserGeolocator.current_position().await.unwrap_err();
    assert!(matches!(err, ClientError::CapabilityUnavailable(_)));
}
