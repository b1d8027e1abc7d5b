//! # Configuration System
//!
//! Configuration inputs for the Pandal Navigator Atlas migration check.
//!
//! This crate provides:
//! - An immutable snapshot of the environment (process + dotenv file)
//! - Audit profiles: which variables to check and which one is the
//!   migration target's connection string
//! - Profile file loading (TOML/YAML)
//! - Audit evaluation: presence, redaction, verdict and connection-string
//!   heuristics
//!
//! Nothing here prints; rendering belongs to the CLI.

pub mod audit;
pub mod file_loader;
pub mod loader;
pub mod profile;

pub use audit::{
    AuditReport, CheckEntry, CheckSpec, ConnectionStringReport, NOT_SET, VerdictSummary, audit,
    inspect_connection_string, preview
};
pub use file_loader::{ProfileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{DEFAULT_ENV_FILE, EnvSnapshot, load_snapshot};
pub use profile::{AuditProfile, CheckDefinition, MigrationTarget};
pub use validator::Validate;
