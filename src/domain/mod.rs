// Domain layer: PESEL value types, batch reports and ports (interfaces).

pub mod model;
pub mod ports;
