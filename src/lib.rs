pub mod api;
pub mod db;
pub mod entities;
pub mod error;
pub mod external;
pub mod overlay;
pub mod pollution;
pub mod routeinfo;
pub mod screens;
pub mod simulation;
pub mod store;
