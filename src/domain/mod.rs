// Domain layer: course models and the ports the loader depends on.

pub mod model;
pub mod ports;
