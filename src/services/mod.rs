pub mod trip_service;

pub use trip_service::*;
