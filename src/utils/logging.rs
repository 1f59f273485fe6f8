use crate::config::LogLevel;
use log::LevelFilter;
use pretty_env_logger::env_logger::{Builder, WriteStyle};

/// Build the process logger for the chosen level.
///
/// Timestamps are only shown at debug level. `plain` disables colors.
fn logger_builder(level: LogLevel, plain: bool) -> Builder {
    let mut builder = pretty_env_logger::env_logger::builder();
    builder
        .filter_level(level.into())
        .filter_module("hyper", LevelFilter::Info)
        .write_style(if plain { WriteStyle::Never } else { WriteStyle::Auto });
    if level.is_debug() {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None);
    }
    builder
}

pub fn init_logging(level: LogLevel, plain: bool) {
    logger_builder(level, plain).init();
}
