// Domain layer: core models and ports (interfaces). No HTTP or rendering
// concerns here; adapters implement the ports against real services.

pub mod model;
pub mod ports;
