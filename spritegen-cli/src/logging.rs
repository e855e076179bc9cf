// spritegen-cli/src/logging.rs
//
// LOGGING: env_logger initialization
//
// The application uses env_logger with the RUST_LOG environment variable:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug: Detailed debugging information, including the exact
//   ffmpeg invocation and generation state transitions

use env_logger::Env;

/// Initializes the global logger. Must be called once, before any log output.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
