// crates/infratest-core/src/core/scenario.rs
// ============================================================================
// Module: Scenario Definitions
// Description: Scenario variants, probe policy, and parameter derivation.
// Purpose: Describe what one verification scenario deploys and expects.
// Dependencies: crate::core::naming
// ============================================================================

//! ## Overview
//! A [`ScenarioSpec`] captures everything one scenario needs before runtime:
//! the template to deploy, the target region and zones, the access-log
//! variant, the apply policy, and the probe expectations. Parameter
//! derivation follows one rule throughout: logging parameters are always
//! present in the variable mapping, with empty strings acting as the
//! "disabled" sentinel the template understands.
//! Invariants:
//! - `logs_bucket` and `logs_prefix` are always supplied, never omitted.
//! - The one-shot reapply policy is armed only by logging-enabled variants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::naming::DeploymentName;

// ============================================================================
// SECTION: Parameter Names
// ============================================================================

/// Template variable carrying the unique deployment name.
pub const VAR_TEST_NAME: &str = "test_name";

/// Template variable carrying the target region.
pub const VAR_REGION: &str = "region";

/// Template variable carrying the ordered availability zone list.
pub const VAR_VPC_AZS: &str = "vpc_azs";

/// Template variable carrying the access log bucket name (empty = disabled).
pub const VAR_LOGS_BUCKET: &str = "logs_bucket";

/// Template variable carrying the access log key prefix (empty = none).
pub const VAR_LOGS_PREFIX: &str = "logs_prefix";

/// Environment variable scoping engine invocations to the target region.
pub const ENV_AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Output name exposing the public endpoint of the deployed service.
pub const DEFAULT_ENDPOINT_OUTPUT: &str = "dns_endpoint";

// ============================================================================
// SECTION: Probe Defaults
// ============================================================================

/// Default number of probe attempts before giving up.
pub const DEFAULT_PROBE_ATTEMPTS: u32 = 10;

/// Default delay between probe attempts.
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_secs(10);

/// Default HTTP status the probe expects.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// Default substring the probe expects in the response body.
pub const DEFAULT_EXPECTED_BODY: &str = "Hello, world!";

// ============================================================================
// SECTION: Access Log Variants
// ============================================================================

/// Access-log parameter variant for one scenario.
///
/// The bucket decides whether logging is enabled; the prefix only shapes
/// where delivered logs land. Disabled variants still supply both parameters
/// as empty-string sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLogMode {
    /// Both logging parameters carry empty disabled sentinels.
    Disabled,
    /// Per-deployment bucket with an `alb/<name>` key prefix.
    PrefixedBucket,
    /// Per-deployment bucket delivering to the bucket root.
    BucketRoot,
    /// Prefix populated while the bucket sentinel stays empty; logging off.
    PrefixWithoutBucket,
}

impl AccessLogMode {
    /// Returns whether this variant actually enables log delivery.
    #[must_use]
    pub const fn logging_enabled(self) -> bool {
        matches!(self, Self::PrefixedBucket | Self::BucketRoot)
    }

    /// Derives the `logs_bucket` value for a deployment name.
    #[must_use]
    pub fn bucket_value(self, name: &DeploymentName) -> String {
        match self {
            Self::Disabled | Self::PrefixWithoutBucket => String::new(),
            Self::PrefixedBucket | Self::BucketRoot => format!("{}-logs", name.as_str()),
        }
    }

    /// Derives the `logs_prefix` value for a deployment name.
    #[must_use]
    pub fn prefix_value(self, name: &DeploymentName) -> String {
        match self {
            Self::Disabled | Self::BucketRoot => String::new(),
            Self::PrefixedBucket | Self::PrefixWithoutBucket => {
                format!("alb/{}", name.as_str())
            }
        }
    }
}

// ============================================================================
// SECTION: Apply Policy
// ============================================================================

/// Apply policy for one scenario.
///
/// `ReapplyOnce` exists for a single documented provider inconsistency hit by
/// logging-enabled deployments; it is a one-shot branch, not a retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyPolicy {
    /// One apply attempt; any failure is fatal.
    Strict,
    /// One extra apply attempt after a first failure, then fatal.
    ReapplyOnce,
}

impl ApplyPolicy {
    /// Returns whether a failed first apply earns one more attempt.
    #[must_use]
    pub const fn allows_reapply(self) -> bool {
        matches!(self, Self::ReapplyOnce)
    }
}

// ============================================================================
// SECTION: Probe Policy
// ============================================================================

/// URL scheme the probe uses when building the endpoint URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeScheme {
    /// TLS endpoint; the only scheme used against real deployments.
    Https,
    /// Plain HTTP; accepted only by probes that explicitly opt in.
    Http,
}

impl ProbeScheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// Minimum TLS protocol version the probe accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinTlsVersion {
    /// TLS 1.2 floor.
    Tls12,
    /// TLS 1.3 floor.
    Tls13,
}

/// Probe expectations for one scenario.
///
/// # Invariants
/// - `max_attempts` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePolicy {
    /// Scheme used to build the endpoint URL.
    pub scheme: ProbeScheme,
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

impl ProbePolicy {
    /// Builds the probe URL for a deployed endpoint address.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}://{}/", self.scheme.as_str(), endpoint)
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            scheme: ProbeScheme::Https,
            expected_status: DEFAULT_EXPECTED_STATUS,
            body_substring: DEFAULT_EXPECTED_BODY.to_owned(),
            max_attempts: DEFAULT_PROBE_ATTEMPTS,
            retry_delay: DEFAULT_PROBE_DELAY,
            min_tls: MinTlsVersion::Tls12,
        }
    }
}

// ============================================================================
// SECTION: Scenario Specification
// ============================================================================

/// Complete definition of one verification scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpec {
    /// Human-readable scenario label used in reports.
    pub label: String,
    /// Template directory the scenario stages and applies.
    pub template_dir: PathBuf,
    /// Target region.
    pub region: String,
    /// Ordered availability zones supplied to the template.
    pub zones: Vec<String>,
    /// Access-log parameter variant.
    pub access_logs: AccessLogMode,
    /// Apply policy; derived from the variant at construction.
    pub apply_policy: ApplyPolicy,
    /// Probe expectations.
    pub probe: ProbePolicy,
    /// Name of the output holding the deployed endpoint address.
    pub endpoint_output: String,
}

impl ScenarioSpec {
    /// Creates a scenario with default probe expectations.
    ///
    /// Logging-enabled variants arm the one-shot reapply workaround; all
    /// other variants apply strictly.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        template_dir: impl Into<PathBuf>,
        region: impl Into<String>,
        zones: Vec<String>,
        access_logs: AccessLogMode,
    ) -> Self {
        let apply_policy = if access_logs.logging_enabled() {
            ApplyPolicy::ReapplyOnce
        } else {
            ApplyPolicy::Strict
        };
        Self {
            label: label.into(),
            template_dir: template_dir.into(),
            region: region.into(),
            zones,
            access_logs,
            apply_policy,
            probe: ProbePolicy::default(),
            endpoint_output: DEFAULT_ENDPOINT_OUTPUT.to_owned(),
        }
    }

    /// Builds the full parameter mapping for a deployment name.
    ///
    /// Logging parameters are always present; disabled variants supply empty
    /// strings rather than omitting the keys.
    #[must_use]
    pub fn parameters(&self, name: &DeploymentName) -> DeploymentParams {
        let mut vars = BTreeMap::new();
        vars.insert(
            VAR_TEST_NAME.to_owned(),
            ParamValue::Text(name.as_str().to_owned()),
        );
        vars.insert(VAR_REGION.to_owned(), ParamValue::Text(self.region.clone()));
        vars.insert(VAR_VPC_AZS.to_owned(), ParamValue::List(self.zones.clone()));
        vars.insert(
            VAR_LOGS_BUCKET.to_owned(),
            ParamValue::Text(self.access_logs.bucket_value(name)),
        );
        vars.insert(
            VAR_LOGS_PREFIX.to_owned(),
            ParamValue::Text(self.access_logs.prefix_value(name)),
        );
        let mut env = BTreeMap::new();
        env.insert(ENV_AWS_DEFAULT_REGION.to_owned(), self.region.clone());
        DeploymentParams { vars, env }
    }
}

// ============================================================================
// SECTION: Deployment Parameters
// ============================================================================

/// One template variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain string value.
    Text(String),
    /// Ordered list of string values.
    List(Vec<String>),
}

/// Variable and environment mappings bound to one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeploymentParams {
    /// Template variables keyed by name.
    pub vars: BTreeMap<String, ParamValue>,
    /// Environment variables for engine invocations.
    pub env: BTreeMap<String, String>,
}
