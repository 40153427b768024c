//! Normalized, engine-tagged connection descriptors.
//!
//! A [`ConnectionDescriptor`] is what a capability produces from
//! [`RawParams`](crate::params::RawParams) and what the external connection
//! provider consumes. The JSON form produced by [`ConnectionDescriptor::to_json`]
//! is the persisted shape: parsing it back through the same engine's
//! capability is lossless.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::engine::EngineKind;
use crate::engines::CapabilityImpl;
use crate::error::{DataSourceError, Result};
use crate::params::{OracleConnectMode, RawParams};

/// One node of a clustered engine address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPort {
    pub host: String,
    pub port: u16,
}

impl HostPort {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl std::fmt::Display for HostPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Descriptor shape shared by single-server engines.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl std::fmt::Debug for ServerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Descriptor shape for multi-node engines (Hive, Spark).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescriptor {
    pub nodes: Vec<HostPort>,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ClusterDescriptor {
    /// Render the node list as `host:port,host:port`.
    pub fn address(&self) -> String {
        self.nodes
            .iter()
            .map(HostPort::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Debug for ClusterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterDescriptor")
            .field("nodes", &self.nodes)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Descriptor shape for Oracle, which distinguishes service-name and SID
/// addressing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleDescriptor {
    pub host: String,
    pub port: u16,
    pub connect: OracleConnectMode,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl std::fmt::Debug for OracleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connect", &self.connect)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Engine-normalized connection information.
///
/// One variant per engine kind; the `engine` tag is embedded in the JSON
/// form, so a stored descriptor can never be replayed against the wrong
/// capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "lowercase")]
pub enum ConnectionDescriptor {
    Mysql(ServerDescriptor),
    Postgres(ServerDescriptor),
    Hive(ClusterDescriptor),
    Spark(ClusterDescriptor),
    Clickhouse(ServerDescriptor),
    Oracle(OracleDescriptor),
    SqlServer(ServerDescriptor),
    Db2(ServerDescriptor),
    Presto(ServerDescriptor),
}

impl ConnectionDescriptor {
    /// The engine kind that produced (and may interpret) this descriptor.
    pub fn engine(&self) -> EngineKind {
        match self {
            ConnectionDescriptor::Mysql(_) => EngineKind::Mysql,
            ConnectionDescriptor::Postgres(_) => EngineKind::Postgres,
            ConnectionDescriptor::Hive(_) => EngineKind::Hive,
            ConnectionDescriptor::Spark(_) => EngineKind::Spark,
            ConnectionDescriptor::Clickhouse(_) => EngineKind::Clickhouse,
            ConnectionDescriptor::Oracle(_) => EngineKind::Oracle,
            ConnectionDescriptor::SqlServer(_) => EngineKind::SqlServer,
            ConnectionDescriptor::Db2(_) => EngineKind::Db2,
            ConnectionDescriptor::Presto(_) => EngineKind::Presto,
        }
    }

    pub fn user(&self) -> &str {
        match self {
            ConnectionDescriptor::Mysql(d)
            | ConnectionDescriptor::Postgres(d)
            | ConnectionDescriptor::Clickhouse(d)
            | ConnectionDescriptor::SqlServer(d)
            | ConnectionDescriptor::Db2(d)
            | ConnectionDescriptor::Presto(d) => &d.user,
            ConnectionDescriptor::Hive(d) | ConnectionDescriptor::Spark(d) => &d.user,
            ConnectionDescriptor::Oracle(d) => &d.user,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            ConnectionDescriptor::Mysql(d)
            | ConnectionDescriptor::Postgres(d)
            | ConnectionDescriptor::Clickhouse(d)
            | ConnectionDescriptor::SqlServer(d)
            | ConnectionDescriptor::Db2(d)
            | ConnectionDescriptor::Presto(d) => &d.password,
            ConnectionDescriptor::Hive(d) | ConnectionDescriptor::Spark(d) => &d.password,
            ConnectionDescriptor::Oracle(d) => &d.password,
        }
    }

    pub fn database(&self) -> &str {
        match self {
            ConnectionDescriptor::Mysql(d)
            | ConnectionDescriptor::Postgres(d)
            | ConnectionDescriptor::Clickhouse(d)
            | ConnectionDescriptor::SqlServer(d)
            | ConnectionDescriptor::Db2(d)
            | ConnectionDescriptor::Presto(d) => &d.database,
            ConnectionDescriptor::Hive(d) | ConnectionDescriptor::Spark(d) => &d.database,
            ConnectionDescriptor::Oracle(d) => &d.database,
        }
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        match self {
            ConnectionDescriptor::Mysql(d)
            | ConnectionDescriptor::Postgres(d)
            | ConnectionDescriptor::Clickhouse(d)
            | ConnectionDescriptor::SqlServer(d)
            | ConnectionDescriptor::Db2(d)
            | ConnectionDescriptor::Presto(d) => &d.extra,
            ConnectionDescriptor::Hive(d) | ConnectionDescriptor::Spark(d) => &d.extra,
            ConnectionDescriptor::Oracle(d) => &d.extra,
        }
    }

    /// Render the engine-specific connection URL.
    pub fn url(&self) -> Result<String> {
        CapabilityImpl::for_engine(self.engine()).build_url(self)
    }

    /// Deterministic, password-free pooling/cache key.
    pub fn unique_id(&self) -> Result<String> {
        CapabilityImpl::for_engine(self.engine()).unique_id(self)
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the persisted JSON form.
    ///
    /// Malformed input is a `Config` error, never a raw parsing failure.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DataSourceError::config(format!("malformed connection descriptor: {e}")))
    }

    /// Reconstruct editable raw parameters, for re-editing stored
    /// configuration in a UI. Cluster hosts come back in the normalized
    /// `host:port,host:port` form.
    pub fn to_raw_params(&self) -> RawParams {
        let engine = self.engine();
        match self {
            ConnectionDescriptor::Mysql(d)
            | ConnectionDescriptor::Postgres(d)
            | ConnectionDescriptor::Clickhouse(d)
            | ConnectionDescriptor::SqlServer(d)
            | ConnectionDescriptor::Db2(d)
            | ConnectionDescriptor::Presto(d) => RawParams {
                engine,
                host: d.host.clone(),
                port: d.port,
                database: d.database.clone(),
                user: d.user.clone(),
                password: d.password.clone(),
                connect_mode: None,
                extra: d.extra.clone(),
            },
            ConnectionDescriptor::Hive(d) | ConnectionDescriptor::Spark(d) => RawParams {
                engine,
                host: d.address(),
                port: d
                    .nodes
                    .first()
                    .map(|n| n.port)
                    .unwrap_or_else(|| engine.default_port()),
                database: d.database.clone(),
                user: d.user.clone(),
                password: d.password.clone(),
                connect_mode: None,
                extra: d.extra.clone(),
            },
            ConnectionDescriptor::Oracle(d) => RawParams {
                engine,
                host: d.host.clone(),
                port: d.port,
                database: d.database.clone(),
                user: d.user.clone(),
                password: d.password.clone(),
                connect_mode: Some(d.connect),
                extra: d.extra.clone(),
            },
        }
    }
}
