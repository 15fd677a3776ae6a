mod config;

pub use config::{ConfigError, StrataConfig};
