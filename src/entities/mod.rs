mod position;
mod route;
mod station;

pub use position::Position;
pub use route::SavedRoute;
pub use station::StationReading;
