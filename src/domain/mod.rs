// Domain layer: recipe types, application state, events and ports.

pub mod events;
pub mod model;
pub mod ports;
pub mod state;
