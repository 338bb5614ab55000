//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! - **Structured logging** with `tracing` crate
//! - **Configurable log levels** via `RUST_LOG` environment variable
//! - **Compact format** by default, `pretty` for multi-line output
//! - Logs go to stderr so they never interleave with REPL output on stdout
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started`, `Shutdown`
//! - **Membership**: `Joined`, `Left`, `Reaped closed client` with user, room and client id
//! - **Traffic**: `Message`, `Direct message`, `List users` at debug level
//! - **Dropped requests**: `Request dropped` at warn level, with the reason
//!
//! ## Usage Examples
//!
//! ```bash
//! # Membership changes only
//! RUST_LOG=info cargo run -- demo
//!
//! # Every request, including the full command sent by each session
//! RUST_LOG=debug cargo run -- demo
//!
//! # Filter to the hub
//! RUST_LOG=chat_hub::hub_actor=debug cargo run -- demo
//! ```
//!
//! **With `RUST_LOG=info`** the demo prints:
//!
//! ```text
//! INFO Actor started actor_type="ChatHub"
//! INFO Chat hub started, waiting for clients default_room=general max_history=20
//! INFO Joined user=alice room=general client=client-2
//! INFO Joined user=bob room=general client=client-3
//! INFO Left user=alice room=general client=client-2
//! ```

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Initializes the global subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset (e.g. `"info"`).
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_tracing(format: LogFormat, default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
