// Domain layer: value types, the flight catalog, and ports to the outside world.

pub mod model;
pub mod ports;
