//! MySQL engine capability.
//!
//! Beyond the common field checks, MySQL rejects extra properties that turn
//! the client into a file-access or multi-statement vector
//! (`allowLoadLocalInfile` and friends): a stored datasource must not be able
//! to re-enable them.

use crate::capability::{validate_common, validate_engine_matches, Capability};
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::{engine_mismatch, query_suffix, server_descriptor};

/// Extra properties that must never reach the rendered URL.
const UNSAFE_PROPERTIES: &[&str] = &[
    "allowLoadLocalInfile",
    "allowLocalInfile",
    "allowUrlInLocalInfile",
    "autoDeserialize",
    "allowMultiQueries",
];

/// MySQL capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlCapability;

impl Capability for MysqlCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Mysql
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_engine_matches(EngineKind::Mysql, params, &mut errors);
        validate_common(params, &mut errors);
        for key in params.extra.keys() {
            if UNSAFE_PROPERTIES.iter().any(|p| p.eq_ignore_ascii_case(key)) {
                errors.push(
                    format!("extra.{key}"),
                    "file-access and multi-statement properties are not allowed",
                );
            }
        }
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Mysql(server_descriptor(params)))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Mysql(d) => Ok(format!(
                "mysql://{}:{}/{}{}",
                d.host,
                d.port,
                d.database,
                query_suffix(&d.extra)
            )),
            other => Err(engine_mismatch(EngineKind::Mysql, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceError;

    fn params() -> RawParams {
        RawParams::new(
            EngineKind::Mysql,
            "db.internal",
            3306,
            "reporting",
            "alice",
            "secret",
        )
    }

    #[test]
    fn test_build_url() {
        let cap = MysqlCapability;
        let descriptor = cap.build_descriptor(&params()).unwrap();
        assert_eq!(
            cap.build_url(&descriptor).unwrap(),
            "mysql://db.internal:3306/reporting"
        );
    }

    #[test]
    fn test_build_url_appends_extras_as_query_pairs() {
        let cap = MysqlCapability;
        let descriptor = cap
            .build_descriptor(&params().with_extra("useSSL", "false"))
            .unwrap();
        assert_eq!(
            cap.build_url(&descriptor).unwrap(),
            "mysql://db.internal:3306/reporting?useSSL=false"
        );
    }

    #[test]
    fn test_validate_rejects_unsafe_properties() {
        let cap = MysqlCapability;
        let bad = params()
            .with_extra("allowLoadLocalInfile", "true")
            .with_extra("allowmultiqueries", "true");
        let err = cap.validate(&bad).unwrap_err();
        match err {
            DataSourceError::Validation(errors) => {
                let fields = errors.fields();
                assert!(fields.contains(&"extra.allowLoadLocalInfile"));
                assert!(fields.contains(&"extra.allowmultiqueries"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_unique_id_excludes_password() {
        let cap = MysqlCapability;
        let descriptor = cap.build_descriptor(&params()).unwrap();
        let id = cap.unique_id(&descriptor).unwrap();
        assert_eq!(id, "mysql@alice@mysql://db.internal:3306/reporting");
        assert!(!id.contains("secret"));
    }

    #[test]
    fn test_build_url_rejects_foreign_descriptor() {
        let cap = MysqlCapability;
        let pg = crate::engines::postgres::PostgresCapability;
        let descriptor = pg
            .build_descriptor(&RawParams::new(
                EngineKind::Postgres,
                "h",
                5432,
                "d",
                "u",
                "p",
            ))
            .unwrap();
        assert!(matches!(
            cap.build_url(&descriptor),
            Err(DataSourceError::Config(_))
        ));
    }
}
