//! Spark SQL engine capability.
//!
//! The Spark thrift server speaks the HiveServer2 protocol, so the address
//! and URL handling are shared with [`hive`](super::hive); only the engine
//! tag differs, which keeps Spark descriptors and cache keys distinct from
//! Hive ones.

use crate::capability::Capability;
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{Result, ValidationErrors};
use crate::params::RawParams;

use super::common::engine_mismatch;
use super::hive::{cluster_descriptor, cluster_url, validate_cluster};

/// Spark SQL capability implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkCapability;

impl Capability for SparkCapability {
    fn engine(&self) -> EngineKind {
        EngineKind::Spark
    }

    fn validate(&self, params: &RawParams) -> Result<()> {
        let mut errors = ValidationErrors::new();
        validate_cluster(EngineKind::Spark, params, &mut errors);
        errors.into_result()
    }

    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor> {
        self.validate(params)?;
        Ok(ConnectionDescriptor::Spark(cluster_descriptor(params)?))
    }

    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        match descriptor {
            ConnectionDescriptor::Spark(d) => Ok(cluster_url(d)),
            other => Err(engine_mismatch(EngineKind::Spark, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_uses_hive2_grammar_with_its_own_identity() {
        let cap = SparkCapability;
        let params = RawParams::new(
            EngineKind::Spark,
            "ts1:10000",
            10000,
            "lake",
            "etl",
            "pw",
        );
        let descriptor = cap.build_descriptor(&params).unwrap();
        assert_eq!(cap.build_url(&descriptor).unwrap(), "hive2://ts1:10000/lake");
        assert_eq!(
            cap.unique_id(&descriptor).unwrap(),
            "spark@etl@hive2://ts1:10000/lake"
        );
    }

    #[test]
    fn test_spark_descriptor_is_not_a_hive_descriptor() {
        let spark = SparkCapability;
        let params = RawParams::new(
            EngineKind::Spark,
            "ts1:10000",
            10000,
            "lake",
            "etl",
            "pw",
        );
        let descriptor = spark.build_descriptor(&params).unwrap();
        let hive = super::super::hive::HiveCapability;
        assert!(hive.build_url(&descriptor).is_err());
    }
}
