//! Raw, user-supplied connection parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::EngineKind;
use crate::error::{DataSourceError, Result};

/// How an Oracle instance is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleConnectMode {
    /// Connect via service name (`host:port/service`).
    ServiceName,
    /// Connect via system identifier (`host:port:SID`).
    Sid,
}

/// Connection parameters as collected from a configuration UI or file.
///
/// This is the input side of the layer: transient, created per call, and
/// consumed by the matching engine capability. For cluster engines
/// (Hive/Spark) `host` may be a comma-separated `host[:port]` list; entries
/// without an explicit port fall back to `port`.
///
/// `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    /// Engine kind.
    pub engine: EngineKind,

    /// Host, or comma-separated host list for cluster engines.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Database name (catalog for Presto, service name or SID for Oracle).
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Oracle connect mode; required for Oracle, ignored elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_mode: Option<OracleConnectMode>,

    /// Free-form engine properties appended to the rendered URL.
    /// Ordered so rendering is deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl RawParams {
    /// Create parameters with the common fields; extras and the Oracle
    /// connect mode default to empty.
    pub fn new(
        engine: EngineKind,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
            connect_mode: None,
            extra: BTreeMap::new(),
        }
    }

    /// Add one extra property.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Set the Oracle connect mode.
    pub fn with_connect_mode(mut self, mode: OracleConnectMode) -> Self {
        self.connect_mode = Some(mode);
        self
    }

    /// Build parameters from a `host:port` address as used by the table
    /// scanner. Cluster engines keep the address verbatim as the host list;
    /// other engines split off the port, falling back to the engine default
    /// when the address has none.
    pub fn from_address(
        engine: EngineKind,
        address: &str,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let (host, port) = if engine.is_clustered() {
            (address.to_string(), engine.default_port())
        } else {
            match address.rsplit_once(':') {
                Some((host, port)) => {
                    let port = port.parse::<u16>().map_err(|_| {
                        DataSourceError::config(format!(
                            "invalid address '{}': port must be a number in 1-65535",
                            address
                        ))
                    })?;
                    (host.to_string(), port)
                }
                None => (address.to_string(), engine.default_port()),
            }
        };
        Ok(Self::new(engine, host, port, database, user, password))
    }
}

impl std::fmt::Debug for RawParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawParams")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("connect_mode", &self.connect_mode)
            .field("extra", &self.extra)
            .finish()
    }
}
