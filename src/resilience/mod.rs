//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote call (eth_call, eth_sendRawTransaction, receipt lookup):
//!     → timeouts.rs (enforce per-call deadline)
//!     → failure surfaces to the caller unchanged (no retry)
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline
//! - Timeouts are classified as network errors

pub mod timeouts;

pub use timeouts::with_deadline;
