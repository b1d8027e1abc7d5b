//! Shared test fixtures for the Atlas tooling workspace.
//!
//! Provides a single, shared MongoDB testcontainer (port 27017) per test
//! process. The fixture is lazily initialized and cleaned up when the
//! process exits. When Docker is unavailable the fixture resolves to `None`
//! and callers skip.

mod fixtures;

pub use fixtures::*;
