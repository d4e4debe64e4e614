//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//!     → handed to the scraper and metrics endpoint at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults so a minimal (or absent) config file works
//! - Validation separates syntactic (serde) from semantic checks
//! - CLI flags override file values before validation runs

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BurrowConfig;
pub use schema::ExporterConfig;
pub use schema::ObservabilityConfig;
pub use schema::ScrapeConfig;
