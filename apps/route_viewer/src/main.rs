use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use map_core::{FixedLocationProvider, HttpRouteResolver, MapSession, PresentationState, Scene};
use shared::domain::{GeoPoint, PermissionStatus};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Show the driving route from a position to the fixed destination")]
struct Args {
    /// Latitude of the current position.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude of the current position.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    #[arg(long)]
    accuracy_m: Option<f64>,
    /// Simulate the user refusing location access.
    #[arg(long)]
    deny_permission: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    routing_url: Option<String>,
    /// Print each scene as JSON instead of a one-line summary.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(routing_url) = args.routing_url {
        settings.routing_url = routing_url;
    }
    info!(
        routing_url = %settings.routing_url,
        profile = %settings.routing_profile,
        "route viewer starting"
    );

    let mut location = FixedLocationProvider::new(GeoPoint::new(args.lat, args.lon));
    if let Some(accuracy_m) = args.accuracy_m {
        location = location.with_accuracy(accuracy_m);
    }
    if args.deny_permission {
        location = location.with_permission(PermissionStatus::Denied);
    }

    let resolver = HttpRouteResolver::with_options(settings.resolver_options())
        .context("failed to configure routing client")?;

    let session = MapSession::new(Arc::new(location), Arc::new(resolver), settings.destination);
    let mut events = session.subscribe_events();
    let pipeline = session.start();

    loop {
        match events.recv().await {
            Ok(state) => {
                render(&state, session.destination(), args.json)?;
                if state.phase.is_terminal() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "render: dropped intermediate snapshots");
            }
            Err(RecvError::Closed) => break,
        }
    }

    let final_state = pipeline.await.context("session task panicked")?;
    info!(phase = ?final_state.phase, "route viewer finished");
    Ok(())
}

fn render(state: &PresentationState, destination: GeoPoint, json: bool) -> Result<()> {
    let scene = Scene::from_state(state, destination);
    if json {
        println!("{}", serde_json::to_string(&scene)?);
        return Ok(());
    }

    match scene {
        Scene::Loading => println!("[{:?}] locating...", state.phase),
        Scene::Error { message } => println!("[{:?}] error: {message}", state.phase),
        Scene::Map(view) => {
            let center = view.initial_region.center;
            let route = match &view.polyline {
                Some(line) => format!("{} points", line.coordinates.len()),
                None => "none".to_string(),
            };
            println!(
                "[{:?}] map center={},{} destination={},{} route={route}",
                state.phase,
                center.latitude,
                center.longitude,
                destination.latitude,
                destination.longitude
            );
        }
    }
    Ok(())
}
