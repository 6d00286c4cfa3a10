// Domain layer: catalog models and the ports the poller talks through.

pub mod model;
pub mod ports;
