// Domain layer: core models and ports (interfaces). No framework types in here.

pub mod model;
pub mod ports;
