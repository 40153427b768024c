//! Presto engine capability.
//!
//! The database field names a catalog; an optional schema can ride along in
//! the extras as `schema=...` the way Presto clients expect.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, query_suffix, server_descriptor};

/// Presto capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrestoCapability;

impl Capability for PrestoCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Presto
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::Presto, params, &mut errors);
        validate_common(params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Presto(server_descriptor(params)))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Presto(d) => Ok(format!(
                "presto://{}:{}/{}{}",
                d.host,
                d.port,
                d.database,
                query_suffix(&d.extra)
            )),
            other => Err(engine_mismatch(EngineKind::Presto, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_with_schema_extra() {
        let cap = PrestoCapability;
        let params = RawParams::new(
            EngineKind::Presto,
            "presto.internal",
            8080,
            "hive",
            "analyst",
            "pw",
        )
        .with_extra("schema", "default");
        let descriptor = cap.build_descriptor(&params).unwrap();
        assert_eq!(
            cap.build_url(&descriptor).unwrap(),
            "presto://presto.internal:8080/hive?schema=default"
        );
    }
}
