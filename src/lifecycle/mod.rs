//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast to scraper + metrics endpoint
//!     → scraper drains its in-flight cycle, then exits
//!     → exposition server stops accepting, then exits
//! ```
//!
//! # Design Decisions
//! - Shutdown is cooperative: the scraper observes the signal only between
//!   cycles, never mid-cycle
//! - The process waits on every task's join handle, so termination is never
//!   observed before in-flight work completes

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
