// crates/infratest-aws/src/lib.rs
// ============================================================================
// Module: Infratest AWS
// Description: AWS account queries backing scenario parameters.
// Purpose: Resolve region facts, such as availability zones, before staging.
// Dependencies: aws-config, aws-sdk-ec2, thiserror
// ============================================================================

//! ## Overview
//! This crate holds the harness's direct AWS SDK usage. Scenario parameters
//! that depend on account or region facts are resolved here, ahead of
//! provisioning, so the engine receives concrete values.
//! Invariants:
//! - Zone listings are sorted by name before any selection happens.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod zones;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use zones::ZoneError;
pub use zones::availability_zones;
pub use zones::leading_zones;
