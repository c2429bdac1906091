use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::{Fix, GeoPoint, PermissionStatus},
    error::SensorError,
};

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;
    async fn current_position(&self) -> Result<Fix, SensorError>;
}

pub struct MissingLocationProvider;

#[async_trait]
impl LocationProvider for MissingLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn current_position(&self) -> Result<Fix, SensorError> {
        Err(SensorError::Unavailable(
            "no location backend configured".to_string(),
        ))
    }
}

/// Reports a pre-configured fix, e.g. coordinates passed on the command line.
pub struct FixedLocationProvider {
    permission: PermissionStatus,
    fix: Fix,
}

impl FixedLocationProvider {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fix: Fix::at(point),
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.fix.accuracy_m = Some(accuracy_m);
        self
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<Fix, SensorError> {
        if !self.fix.point.is_valid() {
            return Err(SensorError::InvalidCoordinates(format!(
                "lat={} lon={}",
                self.fix.point.latitude, self.fix.point.longitude
            )));
        }

        let mut fix = self.fix.clone();
        fix.timestamp.get_or_insert_with(Utc::now);
        Ok(fix)
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
