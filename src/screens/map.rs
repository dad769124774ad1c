use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{
    DynGeolocator, DynMapCanvas, DynNavigator, DynRouteStore, DynRoutingControl, DynToasts,
    LineStyle, RouteEvent,
};
use crate::entities::Position;
use crate::external::waqi;
use crate::pollution;
use crate::routeinfo;

pub const DEFAULT_VIEW: Position = Position {
    latitude: 51.505,
    longitude: -0.09,
};
pub const DEFAULT_ZOOM: u8 = 13;

/// Fixed run destination shown on the map.
pub const DESTINATION: Position = Position {
    latitude: 44.66,
    longitude: 20.92,
};

/// The map screen: current position, route to the fixed destination,
/// air-quality circles, and a saveable route summary.
///
/// Every collaborator is injected, so the screen runs headless against the
/// simulation or against test doubles.
pub struct MapScreen {
    geolocator: DynGeolocator,
    canvas: DynMapCanvas,
    routing: DynRoutingControl,
    store: DynRouteStore,
    toasts: DynToasts,
    navigator: DynNavigator,
    aqi: waqi::Client,
    stations: Vec<String>,
    route_info: Arc<Mutex<Option<String>>>,
}

impl MapScreen {
    pub fn new(
        geolocator: DynGeolocator,
        canvas: DynMapCanvas,
        routing: DynRoutingControl,
        store: DynRouteStore,
        toasts: DynToasts,
        navigator: DynNavigator,
        aqi: waqi::Client,
    ) -> Self {
        Self {
            geolocator,
            canvas,
            routing,
            store,
            toasts,
            navigator,
            aqi,
            stations: pollution::DEFAULT_STATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            route_info: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_stations(mut self, stations: Vec<String>) -> Self {
        self.stations = stations;
        self
    }

    /// Screen entry: map setup and the pollution overlay run as two
    /// cooperating futures on the same event loop.
    #[tracing::instrument(skip(self))]
    pub async fn enter(&self) {
        tokio::join!(self.init_map(), self.fetch_pollution_data());
    }

    async fn init_map(&self) {
        self.canvas.set_view(DEFAULT_VIEW, DEFAULT_ZOOM);

        match self.geolocator.current_position().await {
            Ok(position) => {
                self.canvas.set_view(position, DEFAULT_ZOOM);
                self.canvas.add_marker(position, "Your Location");
                self.init_routing(position);
            }
            Err(err) => {
                // degraded mode: default view, no routing
                tracing::error!("error getting user location: {}", err);
            }
        }
    }

    fn init_routing(&self, start: Position) {
        // subscribe first so an immediately-resolved route is not missed
        let events = self.routing.subscribe();
        self.routing.init([start, DESTINATION], LineStyle::default());

        let routing = self.routing.clone();
        let canvas = self.canvas.clone();
        let route_info = self.route_info.clone();

        tokio::spawn(async move {
            while let Ok(RouteEvent::RoutesFound) = events.recv().await {
                refresh_route_info(&routing, &canvas, &route_info).await;
            }
        });
    }

    async fn fetch_pollution_data(&self) {
        pollution::fetch_and_annotate(&self.aqi, &self.stations, self.canvas.as_ref()).await;
    }

    /// Derive and store the route summary from the resolved waypoints.
    #[tracing::instrument(skip(self))]
    pub async fn on_routes_found(&self) {
        refresh_route_info(&self.routing, &self.canvas, &self.route_info).await;
    }

    /// Point the route at a new destination. The start waypoint is kept.
    #[tracing::instrument(skip(self))]
    pub fn update_route(&self, destination: Position) {
        if let Some([start, _]) = self.routing.waypoints() {
            self.routing.set_waypoints([start, destination]);
        }
    }

    pub async fn route_info(&self) -> Option<String> {
        self.route_info.lock().await.clone()
    }

    /// Persist the current route summary. On failure the summary is kept so
    /// the user can retry.
    #[tracing::instrument(skip(self))]
    pub async fn save_route(&self) {
        let summary = self.route_info.lock().await.clone();

        if let Some(summary) = summary {
            match self.store.save_route(&summary).await {
                Ok(()) => {
                    tracing::info!("route saved successfully");
                    self.toasts.show("Route saved successfully");
                }
                Err(err) => {
                    tracing::error!("error saving route: {}", err);
                    self.toasts.show("Error saving route");
                }
            }
        }
    }

    pub fn back(&self) {
        self.navigator.back();
    }
}

async fn refresh_route_info(
    routing: &DynRoutingControl,
    canvas: &DynMapCanvas,
    route_info: &Mutex<Option<String>>,
) {
    if let Some([start, end]) = routing.waypoints() {
        let info = routeinfo::summarize(canvas.as_ref(), start, end);
        *route_info.lock().await = Some(info);
    }
}
