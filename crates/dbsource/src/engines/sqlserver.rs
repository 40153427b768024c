//! SQL Server engine capability.
//!
//! SQL Server's grammar carries the database as a `;databaseName=` property
//! rather than a path segment.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, semicolon_suffix, server_descriptor};

/// SQL Server capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerCapability;

impl Capability for SqlServerCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::SqlServer
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::SqlServer, params, &mut errors);
        validate_common(params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::SqlServer(server_descriptor(params)))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::SqlServer(d) => Ok(format!(
                "sqlserver://{}:{};databaseName={}{}",
                d.host,
                d.port,
                d.database,
                semicolon_suffix(&d.extra)
            )),
            other => Err(engine_mismatch(EngineKind::SqlServer, other)),
        }
    }
}
