//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, wallet, client, transaction modules
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (stderr)
//! ```
//!
//! Results meant for the user go to stdout through the binaries;
//! diagnostics go through `tracing` to stderr.

pub mod logging;
