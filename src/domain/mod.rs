// Domain layer: core models and ports (interfaces).

pub mod gateway;
pub mod model;
pub mod ports;
