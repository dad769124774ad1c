use crate::api::MapCanvas;
use crate::entities::StationReading;
use crate::external::waqi;
use crate::overlay;

/// Monitoring stations queried on screen entry.
pub const DEFAULT_STATIONS: [&str; 3] = ["@14566", "@9257", "@9259"];

/// Query each station in order, one request at a time, and draw a circle
/// per successful reading.
///
/// The loop is deliberately sequential so circles appear in list order. A
/// failed station is logged and skipped; it never halts the remaining
/// stations. Returns the readings that were drawn, in draw order.
#[tracing::instrument(skip(client, canvas))]
pub async fn fetch_and_annotate(
    client: &waqi::Client,
    stations: &[String],
    canvas: &dyn MapCanvas,
) -> Vec<StationReading> {
    let mut readings = Vec::new();

    for station in stations {
        match client.station_reading(station).await {
            Ok(reading) => {
                if canvas.is_live() {
                    overlay::annotate(canvas, &reading);
                }
                readings.push(reading);
            }
            Err(err) => {
                tracing::error!("error fetching pollution data for {}: {}", station, err);
            }
        }
    }

    readings
}
