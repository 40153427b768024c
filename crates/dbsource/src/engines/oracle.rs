//! Oracle engine capability.
//!
//! Oracle instances are addressed either by service name or by SID, and the
//! two render differently: `oracle://host:port/service` vs
//! `oracle://host:port:SID`. The connect mode is therefore a required input
//! and survives the persisted round trip.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::{ConnectionDescriptor, OracleDescriptor};
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::{OracleConnectMode, RawParams};

use super::common::{engine_mismatch, query_suffix};

/// Oracle capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleCapability;

impl Capability for OracleCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Oracle
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::Oracle, params, &mut errors);
        validate_common(params, &mut errors);
        if params.connect_mode.is_none() {
            errors.push(
                "connect_mode",
                "connect mode (service_name or sid) is required",
            );
        }
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        // validate() guarantees the mode is present
        let connect = params.connect_mode.unwrap_or(OracleConnectMode::ServiceName);
        Ok(ConnectionDescriptor::Oracle(OracleDescriptor {
            host: params.host.clone(),
            port: params.port,
            connect,
            database: params.database.clone(),
            user: params.user.clone(),
            password: params.password.clone(),
            extra: params.extra.clone(),
        }))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Oracle(d) => {
                let base = match d.connect {
                    OracleConnectMode::ServiceName => {
                        format!("oracle://{}:{}/{}", d.host, d.port, d.database)
                    }
                    OracleConnectMode::Sid => {
                        format!("oracle://{}:{}:{}", d.host, d.port, d.database)
                    }
                };
                Ok(format!("{}{}", base, query_suffix(&d.extra)))
            }
            other => Err(engine_mismatch(EngineKind::Oracle, other)),
        }
    }

    /// Oracle's catalog stores unquoted identifiers in uppercase.
    fn normalize_owner(&self, user: &str) -> String {
        user.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceError;

    fn params(mode: OracleConnectMode) -> RawParams {
        RawParams::new(
            EngineKind::Oracle,
            "ora.internal",
            1521,
            "ORCL",
            "scott",
            "tiger",
        )
        .with_connect_mode(mode)
    }

    #[test]
    fn test_service_name_url() {
        let cap = OracleCapability;
        let descriptor = cap
            .build_descriptor(&params(OracleConnectMode::ServiceName))
            .unwrap();
        assert_eq!(
            cap.build_url(&descriptor).unwrap(),
            "oracle://ora.internal:1521/ORCL"
        );
    }

    #[test]
    fn test_sid_url() {
        let cap = OracleCapability;
        let descriptor = cap.build_descriptor(&params(OracleConnectMode::Sid)).unwrap();
        assert_eq!(
            cap.build_url(&descriptor).unwrap(),
            "oracle://ora.internal:1521:ORCL"
        );
    }

    #[test]
    fn test_connect_mode_is_required() {
        let cap = OracleCapability;
        let mut p = params(OracleConnectMode::Sid);
        p.connect_mode = None;
        let err = cap.validate(&p).unwrap_err();
        match err {
            DataSourceError::Validation(errors) => {
                assert!(errors.fields().contains(&"connect_mode"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_connect_mode_survives_round_trip() {
        let cap = OracleCapability;
        let descriptor = cap.build_descriptor(&params(OracleConnectMode::Sid)).unwrap();
        let json = descriptor.to_json().unwrap();
        let back = cap.build_raw_params(&json).unwrap();
        assert_eq!(back.connect_mode, Some(OracleConnectMode::Sid));
    }

    #[test]
    fn test_owner_is_uppercased() {
        let cap = OracleCapability;
        assert_eq!(cap.normalize_owner("scott"), "SCOTT");
    }
}
