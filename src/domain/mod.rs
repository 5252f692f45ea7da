// Domain layer: lookup records, outcomes and the ports the core depends on.

pub mod model;
pub mod ports;
