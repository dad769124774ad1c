mod map;
mod my_runs;

pub use map::{MapScreen, DEFAULT_VIEW, DEFAULT_ZOOM, DESTINATION};
pub use my_runs::MyRunsScreen;
