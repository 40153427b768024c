//! ClickHouse engine capability.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, query_suffix, server_descriptor};

/// ClickHouse capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickhouseCapability;

impl Capability for ClickhouseCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Clickhouse
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::Clickhouse, params, &mut errors);
        validate_common(params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Clickhouse(server_descriptor(params)))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Clickhouse(d) => Ok(format!(
                "clickhouse://{}:{}/{}{}",
                d.host,
                d.port,
                d.database,
                query_suffix(&d.extra)
            )),
            other => Err(engine_mismatch(EngineKind::Clickhouse, other)),
        }
    }
}
