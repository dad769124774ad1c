use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

use aerorun::api::{DynRouteStore, Geolocator, RouteStore, RoutingControl};
use aerorun::entities::{Position, SavedRoute};
use aerorun::error::{database_error, Error};
use aerorun::external::waqi;
use aerorun::screens::{MapScreen, MyRunsScreen, DEFAULT_VIEW, DEFAULT_ZOOM, DESTINATION};
use aerorun::simulation::{
    ConsoleCanvas, ConsoleNavigator, ConsoleToasts, SimGeolocator, SimRoutingControl,
};
use aerorun::store::MemoryRouteStore;

struct FixedGeolocator(Position);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Position, Error> {
        Ok(self.0)
    }
}

struct FailingStore;

#[async_trait]
impl RouteStore for FailingStore {
    async fn save_route(&self, _summary: &str) -> Result<(), Error> {
        Err(database_error("save failed"))
    }

    async fn all_routes(&self) -> Result<BoxStream<'static, Vec<SavedRoute>>, Error> {
        Err(database_error("list failed"))
    }
}

struct World {
    canvas: Arc<ConsoleCanvas>,
    routing: Arc<SimRoutingControl>,
    toasts: Arc<ConsoleToasts>,
    screen: MapScreen,
}

fn world(geolocator: Arc<dyn Geolocator + Send + Sync>, store: DynRouteStore) -> World {
    let canvas = Arc::new(ConsoleCanvas::new());
    let routing = Arc::new(SimRoutingControl::new());
    let toasts = Arc::new(ConsoleToasts::new());

    // never contacted: the screens under test carry an empty station list
    let aqi = waqi::Client::new("http://127.0.0.1:9".into(), "unused".into());

    let screen = MapScreen::new(
        geolocator,
        canvas.clone(),
        routing.clone(),
        store,
        toasts.clone(),
        Arc::new(ConsoleNavigator),
        aqi,
    )
    .with_stations(Vec::new());

    World {
        canvas,
        routing,
        toasts,
        screen,
    }
}

fn expected_summary(start: Position, end: Position) -> String {
    let distance = start.distance_to(end);
    let minutes = (distance / 2.0 / 60.0).round() as i64;
    format!("{:.2} meters, {} min", distance, minutes)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn entering_centers_on_user_and_resolves_a_route() {
    let start = Position::new(51.5, -0.09);
    let w = world(
        Arc::new(FixedGeolocator(start)),
        Arc::new(MemoryRouteStore::new()),
    );

    w.screen.enter().await;
    settle().await;

    assert_eq!(w.canvas.view(), Some((start, DEFAULT_ZOOM)));

    let markers = w.canvas.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].0, start);
    assert_eq!(markers[0].1, "Your Location");

    assert_eq!(w.routing.waypoints(), Some([start, DESTINATION]));
    assert_eq!(
        w.screen.route_info().await,
        Some(expected_summary(start, DESTINATION))
    );
}

#[tokio::test]
async fn geolocation_failure_degrades_quietly() {
    let w = world(
        Arc::new(SimGeolocator::unavailable()),
        Arc::new(MemoryRouteStore::new()),
    );

    w.screen.enter().await;
    settle().await;

    assert_eq!(w.canvas.view(), Some((DEFAULT_VIEW, DEFAULT_ZOOM)));
    assert!(w.canvas.markers().is_empty());
    assert_eq!(w.routing.waypoints(), None);
    assert_eq!(w.screen.route_info().await, None);
    assert_eq!(w.toasts.shown(), 0);
}

#[tokio::test]
async fn replacing_destination_keeps_the_start_point() {
    let start = Position::new(51.5, -0.09);
    let w = world(
        Arc::new(FixedGeolocator(start)),
        Arc::new(MemoryRouteStore::new()),
    );

    w.screen.enter().await;
    settle().await;

    let new_destination = Position::new(48.85, 2.35);
    w.screen.update_route(new_destination);
    settle().await;

    assert_eq!(w.routing.waypoints(), Some([start, new_destination]));
    assert_eq!(
        w.screen.route_info().await,
        Some(expected_summary(start, new_destination))
    );
}

#[tokio::test]
async fn saving_persists_the_current_summary() {
    let start = Position::new(51.5, -0.09);
    let store = Arc::new(MemoryRouteStore::new());
    let w = world(Arc::new(FixedGeolocator(start)), store.clone());

    w.screen.enter().await;
    settle().await;
    w.screen.save_route().await;

    assert_eq!(w.toasts.shown(), 1);

    let mut feed = store.all_routes().await.unwrap();
    let routes = feed.next().await.unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].summary, expected_summary(start, DESTINATION));
}

#[tokio::test]
async fn failed_save_keeps_the_summary_for_retry() {
    let start = Position::new(51.5, -0.09);
    let w = world(Arc::new(FixedGeolocator(start)), Arc::new(FailingStore));

    w.screen.enter().await;
    settle().await;
    w.screen.save_route().await;

    // error surfaced, summary retained
    assert_eq!(w.toasts.shown(), 1);
    assert_eq!(
        w.screen.route_info().await,
        Some(expected_summary(start, DESTINATION))
    );
}

#[tokio::test]
async fn saving_without_a_route_does_nothing() {
    let store = Arc::new(MemoryRouteStore::new());
    let w = world(Arc::new(SimGeolocator::unavailable()), store.clone());

    w.screen.enter().await;
    settle().await;
    w.screen.save_route().await;

    assert_eq!(w.toasts.shown(), 0);

    let mut feed = store.all_routes().await.unwrap();
    assert!(feed.next().await.unwrap().is_empty());
}

#[tokio::test]
async fn my_runs_screen_follows_the_store() {
    let store = Arc::new(MemoryRouteStore::new());
    store.save_route("100.00 meters, 1 min").await.unwrap();

    let screen = MyRunsScreen::new(
        store.clone(),
        Arc::new(ConsoleToasts::new()),
        Arc::new(ConsoleNavigator),
    );

    screen.enter().await;
    assert_eq!(screen.routes().await.len(), 1);

    store.save_route("200.00 meters, 2 min").await.unwrap();
    settle().await;

    let routes = screen.routes().await;
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[1].summary, "200.00 meters, 2 min");
}

#[tokio::test]
async fn my_runs_screen_surfaces_listing_errors() {
    let toasts = Arc::new(ConsoleToasts::new());
    let screen = MyRunsScreen::new(Arc::new(FailingStore), toasts.clone(), Arc::new(ConsoleNavigator));

    screen.enter().await;

    assert_eq!(toasts.shown(), 1);
    assert!(screen.routes().await.is_empty());
}
