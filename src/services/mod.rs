pub mod directions;
pub mod gpx;
pub mod route_generator;
