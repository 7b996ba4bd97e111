// Domain layer: dataset model and the ports the session and engine depend on.

pub mod model;
pub mod ports;
