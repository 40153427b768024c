//! The per-engine capability contract.
//!
//! This module defines the [`Capability`] trait that every engine module
//! under [`engines`](crate::engines) implements, plus the field validators
//! shared across engines.
//!
//! # Design Patterns
//!
//! - **Strategy**: each engine supplies its own validation rules and URL
//!   grammar behind one uniform contract
//! - **Template Method**: persisted-form parsing, raw-param reconstruction,
//!   and unique-id derivation have default implementations built from the
//!   engine-specific primitives

use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::error::{DataSourceError, Result, ValidationErrors};
use crate::identifier;
use crate::params::RawParams;

/// Per-engine connection handling: validation, descriptor construction,
/// URL rendering, and cache-key derivation.
///
/// Implementations are stateless zero-sized types, safe for unsynchronized
/// concurrent use.
pub trait Capability: Send + Sync {
    /// The engine kind this capability serves.
    fn engine(&self) -> EngineKind;

    /// Check raw parameters for missing or malformed fields.
    ///
    /// Collects every violation rather than stopping at the first, and
    /// performs no I/O.
    fn validate(&self, params: &RawParams) -> Result<()>;

    /// Normalize validated parameters into this engine's descriptor shape.
    ///
    /// Validation runs first; structural failures on input that passed
    /// validation surface as `Config` errors. No I/O.
    fn build_descriptor(&self, params: &RawParams) -> Result<ConnectionDescriptor>;

    /// Render the engine-specific connection URL.
    ///
    /// Pure and deterministic in the descriptor; never embeds credentials.
    /// A descriptor produced by a different engine's capability is a
    /// `Config` error.
    fn build_url(&self, descriptor: &ConnectionDescriptor) -> Result<String>;

    /// Parse a descriptor from its persisted JSON form.
    ///
    /// Accepts exactly the shape this capability serializes; a descriptor
    /// tagged with a different engine is rejected.
    fn parse_descriptor(&self, json: &str) -> Result<ConnectionDescriptor> {
        let descriptor = ConnectionDescriptor::from_json(json)?;
        self.check_engine(&descriptor)?;
        Ok(descriptor)
    }

    /// Reconstruct editable raw parameters from the persisted JSON form.
    fn build_raw_params(&self, json: &str) -> Result<RawParams> {
        Ok(self.parse_descriptor(json)?.to_raw_params())
    }

    /// Deterministic pooling/cache key: `engine@user@url`.
    ///
    /// A pure function of the engine kind and the descriptor's non-secret
    /// fields; the password never appears.
    fn unique_id(&self, descriptor: &ConnectionDescriptor) -> Result<String> {
        let url = self.build_url(descriptor)?;
        Ok(format!("{}@{}@{}", self.engine(), descriptor.user(), url))
    }

    /// Fold a username to the identifier case the engine's metadata catalog
    /// uses for table owners.
    fn normalize_owner(&self, user: &str) -> String {
        user.to_string()
    }

    /// Reject descriptors produced by a different engine's capability.
    fn check_engine(&self, descriptor: &ConnectionDescriptor) -> Result<()> {
        if descriptor.engine() == self.engine() {
            Ok(())
        } else {
            Err(DataSourceError::config(format!(
                "descriptor for engine '{}' handed to the '{}' capability",
                descriptor.engine(),
                self.engine()
            )))
        }
    }
}

/// Checks shared by every engine: host/port/database/user presence and
/// URL-safety, and extra-property key/value hygiene.
pub(crate) fn validate_common(params: &RawParams, errors: &mut ValidationErrors) {
    if params.host.is_empty() {
        errors.push("host", "host is required");
    } else if params.host.chars().any(char::is_whitespace) {
        errors.push("host", "host must not contain whitespace");
    }

    if params.port == 0 {
        errors.push("port", "port must be in 1-65535");
    }

    if let Some(problem) = identifier::check_url_safe(&params.database) {
        errors.push("database", format!("database {}", problem));
    }

    if let Some(problem) = identifier::check_url_safe(&params.user) {
        errors.push("user", format!("user {}", problem));
    }

    for (key, value) in &params.extra {
        if key.is_empty() || key.contains(['=', '&', ';', '?']) {
            errors.push(format!("extra.{key}"), "property key is not URL-safe");
        } else if value.contains(['&', ';']) {
            errors.push(format!("extra.{key}"), "property value is not URL-safe");
        }
    }
}

/// Reject parameters whose engine kind does not match the capability
/// handling them.
pub(crate) fn validate_engine_matches(
    expected: EngineKind,
    params: &RawParams,
    errors: &mut ValidationErrors,
) {
    if params.engine != expected {
        errors.push(
            "engine",
            format!("expected engine '{}', got '{}'", expected, params.engine),
        );
    }
}
