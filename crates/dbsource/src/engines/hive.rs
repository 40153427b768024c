//! Hive engine capability.
//!
//! Hive addresses a HiveServer2 cluster: the host field is a comma-separated
//! `host[:port]` list and the URL uses the `hive2://` grammar with
//! `;`-joined session properties.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::{ClusterDescriptor, ConnectionDescriptor};
use crate::engine::EngineKind;
use crate::error::{DataSourceError, Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, parse_node, semicolon_suffix};

/// Hive capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiveCapability;

/// Shared by Hive and Spark, which both speak the HiveServer2 protocol.
pub(crate) fn validate_cluster(
    expected: EngineKind,
    params: &RawParams,
    errors: &mut ValidationErrors,
) {
    validate_engine_matches(expected, params, errors);
    validate_common(params, errors);
    // The common host check does not understand the list syntax; re-check
    // each entry here. Whitespace inside entries was already flagged.
    if !params.host.is_empty() && !params.host.chars().any(char::is_whitespace) {
        for entry in params.host.split(',') {
            if let Err(problem) = parse_node(entry, params.port) {
                errors.push("host", problem);
            }
        }
    }
}

pub(crate) fn cluster_descriptor(params: &RawParams) -> Result<ClusterDescriptor> {
    let nodes = params
        .host
        .split(',')
        .map(|entry| parse_node(entry, params.port))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|problem| DataSourceError::config(format!("invalid host list: {problem}")))?;
    Ok(ClusterDescriptor {
        nodes,
        database: params.database.clone(),
        user: params.user.clone(),
        password: params.password.clone(),
        extra: params.extra.clone(),
    })
}

pub(crate) fn cluster_url(d: &ClusterDescriptor) -> String {
    format!("hive2://{}/{}{}", d.address(), d.database, semicolon_suffix(&d.extra))
}

impl Capability for HiveCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Hive
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_cluster(EngineKind::Hive, params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Hive(cluster_descriptor(params)?))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Hive(d) => Ok(cluster_url(d)),
            other => Err(engine_mismatch(EngineKind::Hive, other)),
        }
    }
}
