pub mod args;
pub mod chart;
pub mod commands;
mod config;
mod error;
pub mod event;
pub mod model;
pub mod render;
pub mod store;
mod utils;
pub mod view;

#[cfg(test)]
mod test;

pub use config::{default_config_path, Config};
pub use error::Error;
pub use error::Result;
pub use store::Store;
pub use view::View;
