use async_channel::Receiver;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

use crate::entities::{Position, SavedRoute};
use crate::error::Error;

/// Notification emitted by the routing engine. It carries no payload; the
/// listener reads the resolved endpoints back off the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteEvent {
    RoutesFound,
}

#[derive(Clone, Debug)]
pub struct LineStyle {
    pub color: String,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#00FF00".into(),
            opacity: 0.7,
        }
    }
}

/// A filled-circle annotation with a label popup.
#[derive(Clone, Debug)]
pub struct Circle {
    pub center: Position,
    pub color: &'static str,
    pub radius_meters: f64,
    pub popup: String,
}

/// Single-shot current-position source.
#[async_trait]
pub trait Geolocator {
    async fn current_position(&self) -> Result<Position, Error>;
}

/// The tile-map surface. Also supplies the geometry utility the route
/// summary is derived with.
pub trait MapCanvas {
    fn set_view(&self, center: Position, zoom: u8);
    fn add_marker(&self, at: Position, label: &str);
    fn draw_circle(&self, circle: Circle);
    fn distance_between(&self, a: Position, b: Position) -> f64;

    /// False once the surface has been torn down. Late-arriving callbacks
    /// must not draw on a dead canvas.
    fn is_live(&self) -> bool;
}

/// The path-finding engine. Holds exactly two waypoints once initialized.
pub trait RoutingControl {
    fn init(&self, waypoints: [Position; 2], style: LineStyle);
    fn waypoints(&self) -> Option<[Position; 2]>;
    fn set_waypoints(&self, waypoints: [Position; 2]);
    fn subscribe(&self) -> Receiver<RouteEvent>;
}

/// Remote store for route summaries. `all_routes` is a live feed: it yields
/// the current list on subscribe and a fresh list after every save.
#[async_trait]
pub trait RouteStore {
    async fn save_route(&self, summary: &str) -> Result<(), Error>;
    async fn all_routes(&self) -> Result<BoxStream<'static, Vec<SavedRoute>>, Error>;
}

pub trait Toasts {
    fn show(&self, message: &str);
}

pub trait Navigator {
    fn back(&self);
}

pub type DynGeolocator = Arc<dyn Geolocator + Send + Sync>;
pub type DynMapCanvas = Arc<dyn MapCanvas + Send + Sync>;
pub type DynRoutingControl = Arc<dyn RoutingControl + Send + Sync>;
pub type DynRouteStore = Arc<dyn RouteStore + Send + Sync>;
pub type DynToasts = Arc<dyn Toasts + Send + Sync>;
pub type DynNavigator = Arc<dyn Navigator + Send + Sync>;
