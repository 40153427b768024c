//! DB2 engine capability.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, query_suffix, server_descriptor};

/// DB2 capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Db2Capability;

impl Capability for Db2Capability {
    fn engine(&self) -> EngineKind {
        EngineKind::Db2
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::Db2, params, &mut errors);
        validate_common(params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Db2(server_descriptor(params)))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Db2(d) => Ok(format!(
                "db2://{}:{}/{}{}",
                d.host,
                d.port,
                d.database,
                query_suffix(&d.extra)
            )),
            other => Err(engine_mismatch(EngineKind::Db2, other)),
        }
    }

    /// DB2's catalog stores unquoted identifiers in uppercase.
    fn normalize_owner(&self, user: &str) -> String {
        user.to_uppercase()
    }
}
