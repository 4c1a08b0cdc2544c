// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Infratest system-tests.
// Purpose: Provide scenario harnesses, engine stubs, and artifact utilities.
// Dependencies: system-tests, infratest-core, infratest-terraform
// ============================================================================

//! ## Overview
//! Shared helpers for Infratest system-tests.
//! Purpose: Provide scenario harnesses, engine stubs, and artifact utilities.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - Hermetic suites never contact real cloud endpoints.
//!
//! Security posture: system-test inputs are untrusted; see `Docs/security/threat_model.md`.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
#[cfg(unix)]
pub mod terraform_stub;
