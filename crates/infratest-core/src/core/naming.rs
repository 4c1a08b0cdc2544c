// crates/infratest-core/src/core/naming.rs
// ============================================================================
// Module: Deployment Naming
// Description: Unique per-invocation deployment name generation.
// Purpose: Prevent cloud resource collisions between concurrent scenarios.
// Dependencies: rand, serde
// ============================================================================

//! ## Overview
//! Every scenario invocation provisions real cloud resources, and several of
//! them (log buckets in particular) live in flat, account-wide or global
//! namespaces. This module issues deployment names that are unique per
//! invocation: a fixed prefix, a per-generator boot identifier drawn from OS
//! entropy, and a monotonically increasing sequence number. Names stay within
//! bucket naming rules (lowercase alphanumerics and hyphens) and leave room
//! for derived suffixes.
//! Invariants:
//! - No two names issued by one generator are equal.
//! - Issued names match `^[a-z][a-z0-9-]*$` and never exceed 40 characters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default prefix for issued deployment names.
const DEFAULT_NAME_PREFIX: &str = "infratest";

// ============================================================================
// SECTION: Deployment Name
// ============================================================================

/// Unique name for one provisioned deployment.
///
/// The name prefixes every cloud resource a scenario creates, so it must be
/// usable wherever the strictest naming rules apply.
///
/// # Invariants
/// - Lowercase alphanumerics and hyphens only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentName(String);

impl DeploymentName {
    /// Creates a deployment name from a raw value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeploymentName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Deployment Name Generator
// ============================================================================

/// Issues unique deployment names for scenario invocations.
///
/// # Invariants
/// - Sequence numbers start at 1 and increase monotonically.
/// - The boot identifier is drawn from OS entropy once per generator.
#[derive(Debug)]
pub struct DeploymentNameGenerator {
    /// Fixed name prefix.
    prefix: &'static str,
    /// Random per-generator component isolating concurrent processes.
    boot_id: u64,
    /// Monotonic sequence counter.
    counter: AtomicU64,
}

impl DeploymentNameGenerator {
    /// Creates a generator with the default `infratest` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_NAME_PREFIX)
    }

    /// Creates a generator with a custom lowercase prefix.
    #[must_use]
    pub fn with_prefix(prefix: &'static str) -> Self {
        let mut bytes = [0_u8; 8];
        OsRng.fill_bytes(&mut bytes);
        Self {
            prefix,
            boot_id: u64::from_be_bytes(bytes),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next unique deployment name.
    #[must_use]
    pub fn issue(&self) -> DeploymentName {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        DeploymentName(format!(
            "{}-{:016x}-{:08x}",
            self.prefix, self.boot_id, sequence
        ))
    }
}

impl Default for DeploymentNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}
