use std::env;
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);

/// Initializes logging based on the DEPINSIM_LOGGING environment variable.
/// - If DEPINSIM_LOGGING=true, logging is enabled and a tracing subscriber is installed
///   (filtered by RUST_LOG, `info` when unset).
/// - If DEPINSIM_LOGGING=false or not set, logging is disabled.
/// - If DEPINSIM_LOG_FILE names a path, events go to that file instead of stdout.
/// - To enable logging in tests, run: DEPINSIM_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    let enabled = match env::var("DEPINSIM_LOGGING") {
        Ok(value) => match value.as_str() {
            "true" => true,
            "false" => false,
            other => {
                eprintln!("DEPINSIM_LOGGING must be 'true' or 'false' (got '{}'), logging disabled", other);
                false
            }
        },
        Err(_) => false,
    };
    ENABLE_LOGGING.store(enabled, Ordering::SeqCst);

    if !enabled {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    // A subscriber may already be installed by the embedding application
    let installed = match env::var("DEPINSIM_LOG_FILE") {
        Ok(path) => match File::create(&path) {
            Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
            Err(e) => {
                eprintln!("Could not open log file {}: {}, logging to stdout", path, e);
                builder.try_init()
            }
        },
        Err(_) => builder.try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Enables or disables prefixed logging without touching the environment
pub fn set_enabled(enabled: bool) {
    ENABLE_LOGGING.store(enabled, Ordering::SeqCst);
}

pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn log(prefix: &str, message: &str) {
    if is_enabled() {
        tracing::info!("[{}]   {}", prefix, message);
    }
}
