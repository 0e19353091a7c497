use std::process::ExitCode;

use fixtura_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use fixtura_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

fn main() -> ExitCode {
    // Logging is best-effort here: a broken config file still leaves the
    // config command able to report what went wrong.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    fixtura_cli::run()
}
