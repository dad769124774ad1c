//! Headless stand-ins for the device-bound collaborators, plus a scenario
//! runner. The same fakes back the unit and integration tests.

use async_channel::{Receiver, Sender};
use rand_distr::{Distribution, Normal};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{
    Circle, DynRouteStore, Geolocator, LineStyle, MapCanvas, Navigator, RouteEvent,
    RoutingControl, Toasts,
};
use crate::entities::Position;
use crate::error::{geolocation_error, Error};
use crate::external::waqi;
use crate::screens::{MapScreen, MyRunsScreen, DEFAULT_VIEW};

/// Single-shot position source with gaussian GPS noise around a base point.
pub struct SimGeolocator {
    base: Position,
    available: bool,
}

impl SimGeolocator {
    pub fn new(base: Position) -> Self {
        Self {
            base,
            available: true,
        }
    }

    /// A geolocator that always fails, for exercising the degraded path.
    pub fn unavailable() -> Self {
        Self {
            base: DEFAULT_VIEW,
            available: false,
        }
    }
}

#[async_trait::async_trait]
impl Geolocator for SimGeolocator {
    async fn current_position(&self) -> Result<Position, Error> {
        if !self.available {
            return Err(geolocation_error());
        }

        // ~50m of jitter in degrees
        let noise = Normal::new(0.0, 0.0005).unwrap();
        let mut rng = rand::thread_rng();

        Ok(Position::new(
            self.base.latitude + noise.sample(&mut rng),
            self.base.longitude + noise.sample(&mut rng),
        ))
    }
}

/// Recording map surface. Draw calls are logged and kept for inspection.
pub struct ConsoleCanvas {
    view: Mutex<Option<(Position, u8)>>,
    markers: Mutex<Vec<(Position, String)>>,
    circles: Mutex<Vec<Circle>>,
    live: AtomicBool,
}

impl ConsoleCanvas {
    pub fn new() -> Self {
        Self {
            view: Mutex::new(None),
            markers: Mutex::new(Vec::new()),
            circles: Mutex::new(Vec::new()),
            live: AtomicBool::new(true),
        }
    }

    /// Mark the surface dead, as when the user navigates away.
    pub fn tear_down(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    pub fn view(&self) -> Option<(Position, u8)> {
        *self.view.lock().unwrap()
    }

    pub fn markers(&self) -> Vec<(Position, String)> {
        self.markers.lock().unwrap().clone()
    }

    pub fn circles(&self) -> Vec<Circle> {
        self.circles.lock().unwrap().clone()
    }
}

impl Default for ConsoleCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MapCanvas for ConsoleCanvas {
    fn set_view(&self, center: Position, zoom: u8) {
        tracing::info!(
            "map view: ({}, {}) zoom {}",
            center.latitude,
            center.longitude,
            zoom
        );
        *self.view.lock().unwrap() = Some((center, zoom));
    }

    fn add_marker(&self, at: Position, label: &str) {
        tracing::info!("marker '{}' at ({}, {})", label, at.latitude, at.longitude);
        self.markers.lock().unwrap().push((at, label.to_string()));
    }

    fn draw_circle(&self, circle: Circle) {
        tracing::info!(
            "{} circle r={}m at ({}, {}): {}",
            circle.color,
            circle.radius_meters,
            circle.center.latitude,
            circle.center.longitude,
            circle.popup
        );
        self.circles.lock().unwrap().push(circle);
    }

    fn distance_between(&self, a: Position, b: Position) -> f64 {
        a.distance_to(b)
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Routing engine that resolves a route the moment waypoints are set.
pub struct SimRoutingControl {
    waypoints: Mutex<Option<[Position; 2]>>,
    subscribers: Mutex<Vec<Sender<RouteEvent>>>,
}

impl SimRoutingControl {
    pub fn new() -> Self {
        Self {
            waypoints: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn emit_routes_found(&self) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.try_send(RouteEvent::RoutesFound).is_ok());
    }
}

impl Default for SimRoutingControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingControl for SimRoutingControl {
    fn init(&self, waypoints: [Position; 2], style: LineStyle) {
        tracing::info!("routing initialized, line {} @ {}", style.color, style.opacity);
        *self.waypoints.lock().unwrap() = Some(waypoints);
        self.emit_routes_found();
    }

    fn waypoints(&self) -> Option<[Position; 2]> {
        *self.waypoints.lock().unwrap()
    }

    fn set_waypoints(&self, waypoints: [Position; 2]) {
        *self.waypoints.lock().unwrap() = Some(waypoints);
        self.emit_routes_found();
    }

    fn subscribe(&self) -> Receiver<RouteEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}

pub struct ConsoleToasts {
    shown: AtomicUsize,
}

impl ConsoleToasts {
    pub fn new() -> Self {
        Self {
            shown: AtomicUsize::new(0),
        }
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleToasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts for ConsoleToasts {
    fn show(&self, message: &str) {
        tracing::info!("toast: {}", message);
        self.shown.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn back(&self) {
        tracing::info!("navigating back");
    }
}

/// Run one full scenario: enter the map screen, wait for the route to
/// resolve, save the summary, then list it on the runs screen.
#[tracing::instrument(skip(store))]
pub async fn run(store: DynRouteStore) {
    let canvas = Arc::new(ConsoleCanvas::new());
    let toasts = Arc::new(ConsoleToasts::new());
    let navigator = Arc::new(ConsoleNavigator);

    let aqi = match waqi::Client::from_env() {
        Ok(client) => client,
        Err(_) => {
            tracing::warn!("WAQI_API_TOKEN not set, falling back to the public demo token");
            waqi::Client::new(waqi::DEFAULT_API_BASE.into(), "demo".into())
        }
    };

    let screen = MapScreen::new(
        Arc::new(SimGeolocator::new(DEFAULT_VIEW)),
        canvas.clone(),
        Arc::new(SimRoutingControl::new()),
        store.clone(),
        toasts.clone(),
        navigator.clone(),
        aqi,
    );

    screen.enter().await;

    // let the routes-found listener settle
    tokio::time::sleep(Duration::from_millis(100)).await;

    match screen.route_info().await {
        Some(info) => tracing::info!("route info: {}", info),
        None => tracing::warn!("no route resolved"),
    }

    screen.save_route().await;
    screen.back();
    canvas.tear_down();

    let my_runs = MyRunsScreen::new(store, toasts, navigator);
    my_runs.enter().await;

    for route in my_runs.routes().await {
        tracing::info!("saved run {}: {}", route.saved_at, route.summary);
    }

    my_runs.back();
}
