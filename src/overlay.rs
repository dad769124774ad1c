use crate::api::{Circle, MapCanvas};
use crate::entities::StationReading;

/// Visual severity tier for an AQI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
}

impl Severity {
    /// Ordered range match over the AQI scale. Boundary values (50, 100,
    /// 150) belong to the lower tier.
    pub fn from_aqi(aqi: i64) -> Self {
        match aqi {
            i64::MIN..=50 => Severity::Good,
            51..=100 => Severity::Moderate,
            101..=150 => Severity::UnhealthyForSensitive,
            _ => Severity::Unhealthy,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Good => "green",
            Severity::Moderate => "yellow",
            Severity::UnhealthyForSensitive => "orange",
            Severity::Unhealthy => "red",
        }
    }

    pub fn radius_meters(&self) -> f64 {
        match self {
            Severity::Good => 300.0,
            Severity::Moderate => 400.0,
            Severity::UnhealthyForSensitive => 500.0,
            Severity::Unhealthy => 600.0,
        }
    }
}

/// Draw one filled circle for a station reading. No dedup: calling twice
/// for the same station draws two overlapping circles.
pub fn annotate(canvas: &dyn MapCanvas, reading: &StationReading) {
    let severity = Severity::from_aqi(reading.aqi);

    canvas.draw_circle(Circle {
        center: reading.position,
        color: severity.color(),
        radius_meters: severity.radius_meters(),
        popup: format!("{}: AQI {}", reading.name, reading.aqi),
    });
}
