use crate::config::Config;
use pig_model::{LoadedPackage, PackageLimits, read_package_from_path};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Diagnostics go to stderr so stdout carries only the report.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("error: invalid --log-level `{level}`: {e}");
            std::process::exit(2);
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn load_config_or_exit(explicit: Option<&str>) -> Config {
    Config::load(explicit).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

pub fn load_package_or_exit(path: &str, limits: PackageLimits) -> LoadedPackage {
    read_package_from_path(path, limits).unwrap_or_else(|e| {
        eprintln!("error: failed to load {path}: {e}");
        std::process::exit(1);
    })
}

pub fn print_json_or_exit(payload: &Value, what: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|e| {
        eprintln!("error: failed to render {what} payload: {e}");
        std::process::exit(2);
    });
    println!("{rendered}");
}
