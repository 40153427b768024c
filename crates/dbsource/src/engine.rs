//! The closed set of supported database engines.

use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;

/// Identifier for a supported database engine.
///
/// The set is closed and fixed at build time: every variant has exactly one
/// [`Capability`](crate::capability::Capability) implementation, and values
/// outside the set are rejected at the string boundary by [`FromStr`] with
/// [`DataSourceError::UnsupportedEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Mysql,
    Postgres,
    Hive,
    Spark,
    Clickhouse,
    Oracle,
    SqlServer,
    Db2,
    Presto,
}

impl EngineKind {
    /// Every supported engine, in declaration order.
    pub const ALL: [EngineKind; 9] = [
        EngineKind::Mysql,
        EngineKind::Postgres,
        EngineKind::Hive,
        EngineKind::Spark,
        EngineKind::Clickhouse,
        EngineKind::Oracle,
        EngineKind::SqlServer,
        EngineKind::Db2,
        EngineKind::Presto,
    ];

    /// Canonical lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Mysql => "mysql",
            EngineKind::Postgres => "postgres",
            EngineKind::Hive => "hive",
            EngineKind::Spark => "spark",
            EngineKind::Clickhouse => "clickhouse",
            EngineKind::Oracle => "oracle",
            EngineKind::SqlServer => "sqlserver",
            EngineKind::Db2 => "db2",
            EngineKind::Presto => "presto",
        }
    }

    /// Default server port for the engine.
    pub fn default_port(&self) -> u16 {
        match self {
            EngineKind::Mysql => 3306,
            EngineKind::Postgres => 5432,
            EngineKind::Hive => 10000,
            EngineKind::Spark => 10000,
            EngineKind::Clickhouse => 8123,
            EngineKind::Oracle => 1521,
            EngineKind::SqlServer => 1433,
            EngineKind::Db2 => 50000,
            EngineKind::Presto => 8080,
        }
    }

    /// Whether connection addresses are a multi-node `host:port` list rather
    /// than a single host.
    pub fn is_clustered(&self) -> bool {
        matches!(self, EngineKind::Hive | EngineKind::Spark)
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = DataSourceError;

    /// Parse an engine name, accepting the common aliases seen in stored
    /// configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(EngineKind::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(EngineKind::Postgres),
            "hive" | "hive2" => Ok(EngineKind::Hive),
            "spark" | "sparksql" | "spark-sql" => Ok(EngineKind::Spark),
            "clickhouse" => Ok(EngineKind::Clickhouse),
            "oracle" => Ok(EngineKind::Oracle),
            "sqlserver" | "mssql" | "sql_server" => Ok(EngineKind::SqlServer),
            "db2" => Ok(EngineKind::Db2),
            "presto" | "trino" => Ok(EngineKind::Presto),
            other => Err(DataSourceError::UnsupportedEngine(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_all_lists_every_engine_once() {
        let mut seen = std::collections::BTreeSet::new();
        for kind in EngineKind::ALL {
            assert!(seen.insert(kind), "duplicate engine {kind}");
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for kind in EngineKind::ALL {
            assert_eq!(EngineKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!(EngineKind::from_str("postgresql").unwrap(), EngineKind::Postgres);
        assert_eq!(EngineKind::from_str("pg").unwrap(), EngineKind::Postgres);
        assert_eq!(EngineKind::from_str("mssql").unwrap(), EngineKind::SqlServer);
        assert_eq!(EngineKind::from_str("MariaDB").unwrap(), EngineKind::Mysql);
        assert_eq!(EngineKind::from_str("hive2").unwrap(), EngineKind::Hive);
        assert_eq!(EngineKind::from_str("trino").unwrap(), EngineKind::Presto);
    }

    #[test]
    fn test_from_str_rejects_unknown_engine() {
        let err = EngineKind::from_str("mongodb").unwrap_err();
        assert!(matches!(err, DataSourceError::UnsupportedEngine(ref name) if name == "mongodb"));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for kind in EngineKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: EngineKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(EngineKind::Mysql.default_port(), 3306);
        assert_eq!(EngineKind::Postgres.default_port(), 5432);
        assert_eq!(EngineKind::Hive.default_port(), 10000);
        assert_eq!(EngineKind::Db2.default_port(), 50000);
    }

    #[test]
    fn test_clustered_engines() {
        assert!(EngineKind::Hive.is_clustered());
        assert!(EngineKind::Spark.is_clustered());
        assert!(!EngineKind::Mysql.is_clustered());
        assert!(!EngineKind::Oracle.is_clustered());
    }
}
