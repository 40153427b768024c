//! Uniform entry points over the engine capabilities.
//!
//! [`Dispatcher`] resolves the capability for an engine kind and forwards
//! the uniform operations to it, so callers never touch a concrete engine
//! module. Every operation is config-time only: no I/O happens here.

use std::str::FromStr;

use tracing::debug;

use crate::capability::Capability;
use crate::descriptor::ConnectionDescriptor;
use crate::engine::EngineKind;
use crate::engines::CapabilityImpl;
use crate::error::Result;
use crate::params::RawParams;

/// Stateless facade over the per-engine capabilities.
///
/// All capabilities are immutable zero-sized singletons, so the dispatcher
/// itself carries no state and every operation is an associated function.
pub struct Dispatcher;

impl Dispatcher {
    /// Resolve the capability for an engine kind.
    pub fn capability(kind: EngineKind) -> CapabilityImpl {
        CapabilityImpl::for_engine(kind)
    }

    /// Resolve the capability for an engine name, failing with
    /// `UnsupportedEngine` for anything outside the closed set.
    pub fn capability_for_name(name: &str) -> Result<CapabilityImpl> {
        Ok(Self::capability(EngineKind::from_str(name)?))
    }

    /// Validate raw parameters without performing any I/O.
    ///
    /// Reports every offending field, not just the first.
    pub fn validate(params: &RawParams) -> Result<()> {
        Self::capability(params.engine).validate(params)
    }

    /// Validate raw parameters and normalize them into the engine's
    /// descriptor shape. Validation failures are reported before any
    /// construction happens.
    pub fn build_descriptor(params: &RawParams) -> Result<ConnectionDescriptor> {
        let descriptor = Self::capability(params.engine).build_descriptor(params)?;
        debug!("built connection descriptor: {:?}", descriptor);
        Ok(descriptor)
    }

    /// Deserialize a stored descriptor, rejecting payloads tagged with a
    /// different engine than the caller expects.
    pub fn descriptor_from_json(kind: EngineKind, json: &str) -> Result<ConnectionDescriptor> {
        Self::capability(kind).parse_descriptor(json)
    }

    /// Reconstruct editable raw parameters from a stored descriptor, for
    /// re-editing in a configuration UI.
    pub fn raw_params_from_json(kind: EngineKind, json: &str) -> Result<RawParams> {
        Self::capability(kind).build_raw_params(json)
    }

    /// Render the engine-specific connection URL for a descriptor.
    pub fn build_url(kind: EngineKind, descriptor: &ConnectionDescriptor) -> Result<String> {
        Self::capability(kind).build_url(descriptor)
    }

    /// Derive the deterministic, password-free pooling/cache key.
    pub fn unique_id(descriptor: &ConnectionDescriptor, kind: EngineKind) -> Result<String> {
        Self::capability(kind).unique_id(descriptor)
    }
}
