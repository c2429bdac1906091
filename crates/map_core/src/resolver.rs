use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{GeoPoint, Route},
    protocol::{RouteRequest, RouteResponse, DEFAULT_PROFILE},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_ROUTING_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_ROUTING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("invalid routing endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("failed to build routing http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("routing request timed out")]
    Timeout,
    #[error("routing request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("routing service returned status {0}")]
    Status(u16),
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("no route found (code={code:?} message={message:?})")]
    NoRoute {
        code: Option<String>,
        message: Option<String>,
    },
}

impl RoutingError {
    fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Timeout
        } else {
            RoutingError::Transport(err)
        }
    }
}

/// Best-effort: failures are logged and degrade to an empty [`Route`].
#[async_trait]
pub trait RouteResolver: Send + Sync {
    async fn resolve_route(&self, origin: GeoPoint, destination: GeoPoint) -> Route;
}

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub base_url: String,
    pub profile: String,
    pub timeout: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTING_URL.into(),
            profile: DEFAULT_PROFILE.into(),
            timeout: DEFAULT_ROUTING_TIMEOUT,
        }
    }
}

pub struct HttpRouteResolver {
    http: Client,
    base_url: Url,
    profile: String,
}

impl HttpRouteResolver {
    pub fn new(base_url: &str) -> Result<Self, RoutingError> {
        Self::with_options(ResolverOptions {
            base_url: base_url.to_string(),
            ..ResolverOptions::default()
        })
    }

    pub fn with_options(options: ResolverOptions) -> Result<Self, RoutingError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(RoutingError::Client)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&options.base_url)?,
            profile: options.profile,
        })
    }

    pub fn endpoint(&self, request: &RouteRequest) -> Result<Url, RoutingError> {
        let mut url = self.base_url.join(&request.path())?;
        url.query_pairs_mut().extend_pairs(request.query());
        Ok(url)
    }

    pub async fn try_resolve_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, RoutingError> {
        let request = RouteRequest::new(self.profile.as_str(), origin, destination);
        let url = self.endpoint(&request)?;
        debug!(%url, "routing: requesting route");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(RoutingError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(RoutingError::from_request)?;
        parse_route_response(&body)
    }
}

#[async_trait]
impl RouteResolver for HttpRouteResolver {
    async fn resolve_route(&self, origin: GeoPoint, destination: GeoPoint) -> Route {
        match self.try_resolve_route(origin, destination).await {
            Ok(route) => {
                info!("routing: resolved route points={}", route.len());
                route
            }
            Err(err) => {
                warn!(error = %err, "routing: falling back to empty route");
                Route::empty()
            }
        }
    }
}

pub fn parse_route_response(body: &str) -> Result<Route, RoutingError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|err| RoutingError::Malformed(err.to_string()))?;

    let Some(first) = response.routes.first() else {
        return Err(RoutingError::NoRoute {
            code: response.code,
            message: response.message,
        });
    };

    debug!(
        distance_m = ?first.distance,
        duration_s = ?first.duration,
        candidates = response.routes.len(),
        "routing: taking first candidate"
    );

    first
        .geometry
        .to_route()
        .ok_or_else(|| RoutingError::Malformed("geometry vertex out of range".to_string()))
}

fn normalize_base_url(raw: &str) -> Result<Url, RoutingError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
