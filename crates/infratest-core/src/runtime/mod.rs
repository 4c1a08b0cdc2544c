// crates/infratest-core/src/runtime/mod.rs
// ============================================================================
// Module: Infratest Runtime
// Description: Scenario execution.
// Purpose: Drive one scenario through the boundary traits with guaranteed teardown.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime owns scenario execution: sequencing the pipeline steps,
//! honoring the apply policy, and guaranteeing teardown once a provisioning
//! handle exists.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use runner::ScenarioRunner;
