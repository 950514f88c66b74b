pub mod config;
pub mod server;

pub use config::{Config, ConfigError};

#[cfg(test)]
mod tests;
