// crates/infratest-terraform/src/lib.rs
// ============================================================================
// Module: Infratest Terraform
// Description: Terraform implementation of the provisioning boundary.
// Purpose: Stage templates into isolated copies and drive the Terraform CLI.
// Dependencies: infratest-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! This crate implements the provisioning boundary over the Terraform CLI.
//! Staging copies a template tree into a private temporary directory (local
//! engine state excluded), and the driver runs `init`, `apply`, `destroy`,
//! and `output -json` against that copy with the deployment's variable and
//! environment mappings. Every invocation is region-scoped through the
//! environment; nothing is shared between staged copies.
//! Invariants:
//! - A staged copy never inherits `.terraform/` or state files.
//! - Apply and destroy always receive the same variable mapping.
//!
//! Security posture: CLI output is untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod driver;
pub mod options;
pub mod stage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use driver::TerraformCli;
pub use driver::TerraformDeployment;
pub use options::var_arguments;
pub use stage::StagedTemplate;
