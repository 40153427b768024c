//! # dbsource
//!
//! Unified datasource abstraction across heterogeneous database engines
//! (MySQL, PostgreSQL, Hive, Spark SQL, ClickHouse, Oracle, SQL Server,
//! DB2, Presto):
//!
//! - **Validation** of raw connection parameters, reporting every offending
//!   field at once
//! - **Normalized descriptors** with a lossless persisted JSON form
//! - **Connection URLs** rendered per engine grammar
//! - **Cache keys**: deterministic, password-free unique ids for external
//!   pooling layers
//! - **Table discovery** over an externally provided connection, with
//!   guaranteed cursor/statement/connection release
//!
//! This crate never opens sockets itself: the physical connection layer
//! plugs in through [`introspect::ConnectionProvider`].
//!
//! ## Example
//!
//! ```rust
//! use dbsource::{Dispatcher, EngineKind, RawParams};
//!
//! fn main() -> dbsource::Result<()> {
//!     let params = RawParams::new(
//!         EngineKind::Mysql,
//!         "db.internal",
//!         3306,
//!         "reporting",
//!         "alice",
//!         "secret",
//!     );
//!     Dispatcher::validate(&params)?;
//!
//!     let descriptor = Dispatcher::build_descriptor(&params)?;
//!     assert_eq!(descriptor.url()?, "mysql://db.internal:3306/reporting");
//!     assert_eq!(
//!         Dispatcher::unique_id(&descriptor, EngineKind::Mysql)?,
//!         "mysql@alice@mysql://db.internal:3306/reporting",
//!     );
//!     Ok(())
//! }
//! ```

pub mod capability;
pub mod descriptor;
pub mod dispatch;
pub mod engine;
pub mod engines;
pub mod error;
pub mod identifier;
pub mod introspect;
pub mod params;
pub mod profiles;

// Re-exports for convenient access
pub use capability::Capability;
pub use descriptor::{
    ClusterDescriptor, ConnectionDescriptor, HostPort, OracleDescriptor, ServerDescriptor,
};
pub use dispatch::Dispatcher;
pub use engine::EngineKind;
pub use engines::CapabilityImpl;
pub use error::{DataSourceError, FieldViolation, Result, ValidationErrors};
pub use introspect::{
    list_tables, ConnectionProvider, MetaConnection, MetaStatement, TableCursor, TableScan,
};
pub use params::{OracleConnectMode, RawParams};
pub use profiles::Profiles;
