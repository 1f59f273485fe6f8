// Configuration module
//
// This module contains the runtime configuration handed to the identity loader and the engine:
// - types: The configuration struct and log level
// - validator: Startup validation of the configuration

pub mod types;
pub mod validator;

pub use types::{LogLevel, ProxyConfig};
pub use validator::ConfigError;
