// crates/infratest-http/src/lib.rs
// ============================================================================
// Module: Infratest HTTP
// Description: Blocking HTTP endpoint probe.
// Purpose: Decide endpoint health with bounded retries over TLS.
// Dependencies: infratest-core, reqwest, url
// ============================================================================

//! ## Overview
//! This crate implements the endpoint probe boundary with a blocking HTTP
//! client. A probe issues bounded GET attempts against a deployed endpoint,
//! treating connection errors, wrong statuses, and wrong bodies alike as
//! retryable until the attempt budget runs out.
//! Invariants:
//! - Cleartext `http://` requests are refused unless explicitly enabled.
//! - Response bodies are read through a hard byte cap.
//!
//! Security posture: probed endpoints are untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod probe;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use probe::HttpProbe;
pub use probe::HttpProbeConfig;
