use std::process::ExitCode;

use log::{error, info, warn};

use rustynet_headers::config::HeadersConfig;

const DEFAULT_CONFIG: &str = "headers.toml";

fn main() -> ExitCode {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    // the log level lives in the config, so report load failures after init
    let (config, load_error) = match HeadersConfig::load(&path) {
        Ok(config) => (config, None),
        Err(err) => (HeadersConfig::default(), Some(err)),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();
    if let Some(err) = load_error {
        warn!("Fail to load {}: {err}", path);
        warn!("Fall back to default config");
    }

    let headers = match config.build_headers() {
        Ok(headers) => headers,
        Err(err) => {
            error!("Invalid headers in {}: {err}", path);
            return ExitCode::FAILURE;
        }
    };

    info!("Loaded {} header names from {}", headers.len(), path);
    for (name, value) in &headers {
        println!("{name}: {value}");
    }
    ExitCode::SUCCESS
}
