// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. Unset values fall back to the
//! defaults a workspace checkout expects, keeping the hermetic suites runnable
//! with no environment at all.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Region scenarios target when no override is set.
const DEFAULT_REGION: &str = "us-west-2";

/// Template directory relative to the system-tests crate root.
const DEFAULT_TEMPLATE_DIR: &str = "../deployments/simple";

/// Engine binary resolved through `PATH` when no override is set.
const DEFAULT_TERRAFORM_BIN: &str = "terraform";

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional target region override.
    Region,
    /// Optional template directory override.
    TemplateDir,
    /// Optional run root override for artifacts.
    RunRoot,
    /// Optional Terraform binary override.
    TerraformBin,
    /// Enable suites that provision real infrastructure
    /// (`true`/`false` or `1`/`0`).
    Live,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "INFRATEST_SYSTEM_TEST_REGION",
            Self::TemplateDir => "INFRATEST_SYSTEM_TEST_TEMPLATE_DIR",
            Self::RunRoot => "INFRATEST_SYSTEM_TEST_RUN_ROOT",
            Self::TerraformBin => "INFRATEST_SYSTEM_TEST_TERRAFORM_BIN",
            Self::Live => "INFRATEST_SYSTEM_TEST_LIVE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Target region for live scenarios.
    pub region: String,
    /// Template directory scenarios stage from.
    pub template_dir: PathBuf,
    /// Optional run root override for artifacts.
    pub run_root: Option<PathBuf>,
    /// Terraform binary path or name.
    pub terraform_bin: PathBuf,
    /// Whether live provisioning suites may run.
    pub live: bool,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_owned(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            run_root: None,
            terraform_bin: PathBuf::from(DEFAULT_TERRAFORM_BIN),
            live: false,
        }
    }
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid boolean value).
    pub fn load() -> Result<Self, String> {
        let region = read_env_nonempty(SystemTestEnv::Region.as_str())?
            .unwrap_or_else(|| DEFAULT_REGION.to_owned());
        let template_dir = read_env_nonempty(SystemTestEnv::TemplateDir.as_str())?
            .map_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR), PathBuf::from);
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let terraform_bin = read_env_nonempty(SystemTestEnv::TerraformBin.as_str())?
            .map_or_else(|| PathBuf::from(DEFAULT_TERRAFORM_BIN), PathBuf::from);
        let live = parse_bool_env(
            SystemTestEnv::Live.as_str(),
            read_env_nonempty(SystemTestEnv::Live.as_str())?,
        )?;
        Ok(Self {
            region,
            template_dir,
            run_root,
            terraform_bin,
            live,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a boolean environment variable with permissive defaults.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
