// Adapters layer: concrete implementations of the domain ports.

pub mod commands;
pub mod http;
pub mod storage;
pub mod terminal;
