//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → loader.rs (read variables once at start-up)
//!     → validation.rs (parse & semantic checks, all errors collected)
//!     → ReaderConfig / WriterConfig (validated, immutable)
//!     → passed by reference to client and signer construction
//! ```
//!
//! # Design Decisions
//! - Config is an explicit value, never read from ambient globals after load
//! - Lookup is injectable so tests never touch the process environment
//! - Private keys are held only in `SignerConfig` and never logged

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_dotenv, load_reader_config, load_writer_config, reader_config_from, writer_config_from};
pub use schema::{ChainConfig, ReaderConfig, SignerConfig, WriterConfig};
