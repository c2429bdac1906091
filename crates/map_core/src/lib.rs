pub mod location;
pub mod resolver;
pub mod scene;
pub mod session;

pub use location::{FixedLocationProvider, LocationProvider, MissingLocationProvider};
pub use resolver::{
    HttpRouteResolver, ResolverOptions, RouteResolver, RoutingError, DEFAULT_ROUTING_TIMEOUT,
    DEFAULT_ROUTING_URL,
};
pub use scene::Scene;
pub use session::{MapSession, PresentationState, SessionPhase};
