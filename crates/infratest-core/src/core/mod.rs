// crates/infratest-core/src/core/mod.rs
// ============================================================================
// Module: Core Scenario Model
// Description: Naming, scenario definitions, and report types.
// Purpose: Group the engine-independent data model for verification scenarios.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! The core model covers everything a scenario needs before any engine is
//! involved: unique deployment naming, the scenario definition with its
//! parameter derivation rules, and the report types that capture what a run
//! did. Nothing in this module performs I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod naming;
pub mod report;
pub mod scenario;
