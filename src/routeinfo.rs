use crate::api::MapCanvas;
use crate::entities::Position;

/// Assumed travel speed for the time estimate, in meters per second.
pub const ASSUMED_SPEED_MPS: f64 = 2.0;

/// Build the display summary for a resolved route.
///
/// Distance is the straight line between the two endpoints, not the routed
/// path length; the estimate divides it by the fixed speed and rounds to
/// whole minutes.
pub fn summarize(canvas: &dyn MapCanvas, start: Position, end: Position) -> String {
    let distance = canvas.distance_between(start, end);
    let minutes = (distance / ASSUMED_SPEED_MPS / 60.0).round() as i64;

    format!("{:.2} meters, {} min", distance, minutes)
}
