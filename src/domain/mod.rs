// Domain layer: core models, the role vocabulary and ports (interfaces).

pub mod model;
pub mod ports;
pub mod vocabulary;
