pub mod bike;
pub mod coordinates;
pub mod ring;
pub mod route;
pub mod template;

pub use bike::{BikeCatalog, BikeCategory, BikeProfile};
pub use coordinates::GeoPoint;
pub use ring::CoordinateRing;
pub use route::{PlannedRoute, RideMetadata, RidePlan, RoutingOptions};
pub use template::{RouteTemplate, TemplateCatalog};
