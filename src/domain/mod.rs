// Domain layer: the changelog/feed models and the ports the pipeline talks through.

pub mod model;
pub mod ports;
