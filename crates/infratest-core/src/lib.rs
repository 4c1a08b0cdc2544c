// crates/infratest-core/src/lib.rs
// ============================================================================
// Module: Infratest Core
// Description: Scenario model, boundary traits, and the scenario runner.
// Purpose: Define the provisioning verification contract independent of any engine.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate defines the scenario model for end-to-end infrastructure
//! verification: deployment naming, scenario parameters, the provisioning and
//! probing boundary traits, and the runner that drives one scenario from
//! staging through guaranteed teardown. All engine and network access happens
//! behind the boundary traits; this crate performs no I/O of its own.
//! Invariants:
//! - Deployment names are unique per generator invocation.
//! - Teardown runs on every exit path once a provisioning handle exists.
//! - A scenario verdict is determined before teardown and never rewritten by it.
//!
//! Security posture: engine outputs and probe responses are untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::naming::DeploymentName;
pub use core::naming::DeploymentNameGenerator;
pub use core::report::CleanupRecord;
pub use core::report::FailureRecord;
pub use core::report::ScenarioErrorKind;
pub use core::report::ScenarioReport;
pub use core::report::StepRecord;
pub use core::report::StepStage;
pub use core::report::StepStatus;
pub use core::report::Verdict;
pub use core::scenario::AccessLogMode;
pub use core::scenario::ApplyPolicy;
pub use core::scenario::DeploymentParams;
pub use core::scenario::MinTlsVersion;
pub use core::scenario::ParamValue;
pub use core::scenario::ProbePolicy;
pub use core::scenario::ProbeScheme;
pub use core::scenario::ScenarioSpec;
pub use interfaces::ApplyError;
pub use interfaces::DestroyError;
pub use interfaces::EndpointProbe;
pub use interfaces::OutputError;
pub use interfaces::ProbeError;
pub use interfaces::ProbeOutcome;
pub use interfaces::ProbeRequest;
pub use interfaces::ProvisionEngine;
pub use interfaces::ProvisionHandle;
pub use interfaces::ScenarioError;
pub use interfaces::StageError;
pub use interfaces::StageRequest;
pub use runtime::runner::ScenarioRunner;
