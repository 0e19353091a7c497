use std::env;

use fixtura_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.push(render_line(
        "quoting.default_tax_rate",
        &config.quoting.default_tax_rate.to_string(),
        "FIXTURA_TAX_RATE",
    ));
    lines.push(render_line(
        "quoting.default_currency",
        &config.quoting.default_currency,
        "FIXTURA_CURRENCY",
    ));
    lines.push(render_line(
        "quoting.validity_days",
        &config.quoting.validity_days.to_string(),
        "FIXTURA_VALIDITY_DAYS",
    ));
    lines.push(render_line("logging.level", &config.logging.level, "FIXTURA_LOG_LEVEL"));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        "FIXTURA_LOG_FORMAT",
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, env_var: &str) -> String {
    let source = if env::var(env_var).is_ok() { format!("env:{env_var}") } else { "file|default".to_string() };
    format!("  {key} = {value} ({source})")
}
