pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{
    http::ForkifyClient,
    storage::{LocalStorage, MemoryStorage},
};
pub use core::{
    app::App,
    controller::{Controller, Views},
    model::RecipeModel,
};
pub use utils::error::{RecipeError, Result};
