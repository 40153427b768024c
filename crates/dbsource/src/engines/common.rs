//! Helpers shared across engine capability implementations.

use std::collections::BTreeMap;

use crate::descriptor::{ConnectionDescriptor, HostPort, ServerDescriptor};
use crate::engine::EngineKind;
use crate::error::DataSourceError;
use crate::params::RawParams;

/// Render extras as a `?k=v&k=v` query suffix, or nothing when empty.
pub(crate) fn query_suffix(extra: &BTreeMap<String, String>) -> String {
    if extra.is_empty() {
        return String::new();
    }
    let pairs = extra
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{pairs}")
}

/// Render extras as a `;k=v;k=v` suffix, or nothing when empty.
pub(crate) fn semicolon_suffix(extra: &BTreeMap<String, String>) -> String {
    extra
        .iter()
        .map(|(k, v)| format!(";{k}={v}"))
        .collect::<Vec<_>>()
        .join("")
}

/// Copy validated raw parameters into the single-server descriptor shape.
pub(crate) fn server_descriptor(params: &RawParams) -> ServerDescriptor {
    ServerDescriptor {
        host: params.host.clone(),
        port: params.port,
        database: params.database.clone(),
        user: params.user.clone(),
        password: params.password.clone(),
        extra: params.extra.clone(),
    }
}

/// Parse one `host[:port]` entry of a cluster host list.
///
/// Entries without a port use `fallback_port`. Returns a problem description
/// on malformed entries so validation can accumulate them per entry.
pub(crate) fn parse_node(entry: &str, fallback_port: u16) -> Result<HostPort, String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err("empty host entry".to_string());
    }
    match entry.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() {
                return Err(format!("'{entry}' is missing a host"));
            }
            let port = port
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| format!("'{entry}' has an invalid port"))?;
            Ok(HostPort::new(host, port))
        }
        None => Ok(HostPort::new(entry, fallback_port)),
    }
}

/// Config error for a descriptor handed to the wrong engine's capability.
pub(crate) fn engine_mismatch(expected: EngineKind, got: &ConnectionDescriptor) -> DataSourceError {
    DataSourceError::config(format!(
        "descriptor for engine '{}' handed to the '{}' capability",
        got.engine(),
        expected
    ))
}
