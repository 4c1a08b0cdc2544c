// crates/infratest-core/src/interfaces/mod.rs
// ============================================================================
// Module: Infratest Interfaces
// Description: Engine-agnostic boundaries for provisioning and probing.
// Purpose: Define the contract surfaces the scenario runner drives.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the scenario runner talks to a provisioning engine
//! and an endpoint probe without embedding engine-specific details. Staging
//! produces an exclusively owned handle; the handle applies, exposes outputs,
//! and destroys. Implementations must fail closed: a reported-successful
//! apply with a missing endpoint output is an error, not a pass.
//!
//! Security posture: engine outputs and probe responses are untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::core::naming::DeploymentName;
use crate::core::report::ScenarioErrorKind;
use crate::core::scenario::DeploymentParams;
use crate::core::scenario::MinTlsVersion;

// ============================================================================
// SECTION: Provisioning Boundary
// ============================================================================

/// Request to stage one template copy bound to one deployment.
///
/// # Invariants
/// - `params` already contains the empty-string logging sentinels when the
///   scenario disables logging; engines never synthesize parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    /// Template directory to copy.
    pub template_dir: PathBuf,
    /// Deployment name the staged copy belongs to.
    pub deployment: DeploymentName,
    /// Variable and environment mappings bound to the deployment.
    pub params: DeploymentParams,
}

/// Template staging errors.
#[derive(Debug, Error)]
pub enum StageError {
    /// Template source missing or unreadable.
    #[error("template source unavailable at `{path}`: {reason}")]
    SourceUnavailable {
        /// Template path that could not be read.
        path: String,
        /// Underlying failure.
        reason: String,
    },
    /// Copying the template into the isolated workspace failed.
    #[error("template staging failed at `{path}`: {reason}")]
    CopyFailed {
        /// Path that failed to copy.
        path: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Apply errors.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The engine process could not be launched at all.
    #[error("provisioning engine could not be launched: {0}")]
    Launch(String),
    /// The engine ran and reported failure.
    #[error("apply failed: {0}")]
    Failed(String),
}

/// Output read errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The named output is absent or empty after a successful apply.
    #[error("output `{0}` missing from apply result")]
    Missing(String),
    /// The output listing could not be read or parsed.
    #[error("output `{name}` unreadable: {reason}")]
    Unreadable {
        /// Output name requested.
        name: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Destroy errors.
#[derive(Debug, Error)]
pub enum DestroyError {
    /// The engine process could not be launched at all.
    #[error("provisioning engine could not be launched: {0}")]
    Launch(String),
    /// The engine ran and reported failure.
    #[error("destroy failed: {0}")]
    Failed(String),
}

/// Exclusively owned staged deployment.
///
/// One handle belongs to exactly one scenario invocation. Destroy is
/// best-effort and must be safe to call after a failed apply.
pub trait ProvisionHandle {
    /// Applies the staged template with its bound parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when the engine cannot run or reports failure.
    fn apply(&mut self) -> Result<(), ApplyError>;

    /// Reads a named output from the applied deployment.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when the output is absent or unreadable.
    fn read_output(&self, name: &str) -> Result<String, OutputError>;

    /// Destroys the deployment's resources.
    ///
    /// # Errors
    ///
    /// Returns [`DestroyError`] when the engine cannot run or reports failure.
    fn destroy(&mut self) -> Result<(), DestroyError>;
}

/// Engine capable of staging templates into provisioning handles.
pub trait ProvisionEngine {
    /// Stages an isolated copy of the template and binds the parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] when the copy cannot be created.
    fn stage(&self, request: StageRequest) -> Result<Box<dyn ProvisionHandle>, StageError>;
}

// ============================================================================
// SECTION: Probing Boundary
// ============================================================================

/// One bounded-retry probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Full URL to request.
    pub url: String,
    /// HTTP status treated as success.
    pub expected_status: u16,
    /// Substring the response body must contain.
    pub body_substring: String,
    /// Attempt budget before the probe gives up.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
    /// Minimum TLS protocol version.
    pub min_tls: MinTlsVersion,
}

/// Successful probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Attempts consumed, including the successful one.
    pub attempts: u32,
}

/// Probe errors.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request could not be attempted at all (bad URL, refused scheme).
    #[error("probe request invalid: {0}")]
    Invalid(String),
    /// Every attempt in the budget failed.
    #[error("probe exhausted after {attempts} attempts: {last_failure}")]
    Exhausted {
        /// Attempts consumed.
        attempts: u32,
        /// Failure observed on the final attempt.
        last_failure: String,
    },
}

/// Bounded-retry endpoint probe.
pub trait EndpointProbe {
    /// Probes the URL until it matches expectations or the budget runs out.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the request is invalid or every attempt
    /// in the budget fails.
    fn probe(&self, request: &ProbeRequest) -> Result<ProbeOutcome, ProbeError>;
}

// ============================================================================
// SECTION: Scenario Errors
// ============================================================================

/// Fatal scenario failure, classified by pipeline step.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Template staging failed before any cloud resources existed.
    #[error(transparent)]
    Staging(#[from] StageError),
    /// Apply failed beyond the permitted one-shot reapply.
    #[error(transparent)]
    Apply(#[from] ApplyError),
    /// Endpoint output absent or unreadable after a successful apply.
    #[error(transparent)]
    OutputMissing(#[from] OutputError),
    /// Probe never satisfied within its attempt budget.
    #[error(transparent)]
    ProbeExhausted(#[from] ProbeError),
    /// Teardown failed; reported without changing the verdict.
    #[error(transparent)]
    Destroy(#[from] DestroyError),
}

impl ScenarioError {
    /// Returns the stable classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> ScenarioErrorKind {
        match self {
            Self::Staging(_) => ScenarioErrorKind::Staging,
            Self::Apply(_) => ScenarioErrorKind::Apply,
            Self::OutputMissing(_) => ScenarioErrorKind::OutputMissing,
            Self::ProbeExhausted(_) => ScenarioErrorKind::ProbeExhausted,
            Self::Destroy(_) => ScenarioErrorKind::Destroy,
        }
    }
}
