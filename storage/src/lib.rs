//! # Storage Layer
//!
//! Connectivity probing for the data store the application migrates to.
//!
//! The probe goes through the [`Connector`] seam so the MongoDB driver can
//! be swapped for an in-process fake in tests.

pub mod mongo;
pub mod probe;

pub use mongo::{MongoConnection, MongoConnector};
pub use probe::{Connection, ConnectionProbeResult, Connector, probe_connection};
