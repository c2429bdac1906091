use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{GeoPoint, PermissionStatus, Route},
    error::ErrorKind,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{info, warn};

use crate::{location::LocationProvider, resolver::RouteResolver};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Init,
    AwaitingPermission,
    Denied,
    AwaitingFix,
    SensorFailed,
    AwaitingRoute,
    RouteReady,
    RouteEmpty,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionPhase::Denied
                | SessionPhase::SensorFailed
                | SessionPhase::RouteReady
                | SessionPhase::RouteEmpty
        )
    }
}

/// Snapshot handed to the rendering layer. `position` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PresentationState {
    pub phase: SessionPhase,
    pub position: Option<GeoPoint>,
    pub error: Option<ErrorKind>,
    pub route: Route,
}

struct SessionInner {
    state: PresentationState,
    started: bool,
}

pub struct MapSession {
    location: Arc<dyn LocationProvider>,
    resolver: Arc<dyn RouteResolver>,
    destination: GeoPoint,
    inner: Mutex<SessionInner>,
    events: broadcast::Sender<PresentationState>,
}

impl MapSession {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        resolver: Arc<dyn RouteResolver>,
        destination: GeoPoint,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            location,
            resolver,
            destination,
            inner: Mutex::new(SessionInner {
                state: PresentationState::default(),
                started: false,
            }),
            events,
        })
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    pub async fn snapshot(&self) -> PresentationState {
        self.inner.lock().await.state.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PresentationState> {
        self.events.subscribe()
    }

    pub fn start(self: &Arc<Self>) -> JoinHandle<PresentationState> {
        let session = Arc::clone(self);
        tokio::spawn(async move { session.run().await })
    }

    /// Drives acquisition and routing once; later calls return the current snapshot untouched.
    pub async fn run(&self) -> PresentationState {
        {
            let mut guard = self.inner.lock().await;
            if guard.started {
                warn!("session: run requested twice; ignoring");
                return guard.state.clone();
            }
            guard.started = true;
        }

        self.publish(|state| state.phase = SessionPhase::AwaitingPermission)
            .await;

        if self.location.request_permission().await == PermissionStatus::Denied {
            info!("session: location permission denied");
            return self
                .publish(|state| {
                    state.phase = SessionPhase::Denied;
                    state.error = Some(ErrorKind::PermissionDenied);
                })
                .await;
        }

        self.publish(|state| state.phase = SessionPhase::AwaitingFix)
            .await;

        let fix = match self.location.current_position().await {
            Ok(fix) if fix.point.is_valid() => fix,
            Ok(fix) => {
                warn!(
                    "session: discarding invalid fix lat={} lon={}",
                    fix.point.latitude, fix.point.longitude
                );
                return self.fail_sensor().await;
            }
            Err(err) => {
                warn!(error = %err, "session: position acquisition failed");
                return self.fail_sensor().await;
            }
        };

        info!(
            "session: fix acquired lat={} lon={} accuracy_m={:?}",
            fix.point.latitude, fix.point.longitude, fix.accuracy_m
        );
        self.publish(|state| {
            state.phase = SessionPhase::AwaitingRoute;
            state.position = Some(fix.point);
        })
        .await;

        let route = self
            .resolver
            .resolve_route(fix.point, self.destination)
            .await;

        self.publish(move |state| {
            state.phase = if route.is_empty() {
                SessionPhase::RouteEmpty
            } else {
                SessionPhase::RouteReady
            };
            state.route = route;
        })
        .await
    }

    async fn fail_sensor(&self) -> PresentationState {
        self.publish(|state| {
            state.phase = SessionPhase::SensorFailed;
            state.error = Some(ErrorKind::SensorUnavailable);
        })
        .await
    }

    async fn publish(&self, update: impl FnOnce(&mut PresentationState)) -> PresentationState {
        let mut guard = self.inner.lock().await;
        let mut next = guard.state.clone();
        update(&mut next);
        guard.state = next.clone();
        let _ = self.events.send(next.clone());
        next
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
