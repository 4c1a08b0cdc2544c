// crates/infratest-core/src/core/report.rs
// ============================================================================
// Module: Scenario Reports
// Description: Structured record of one scenario run.
// Purpose: Capture steps, verdict, and cleanup outcome for artifact persistence.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ScenarioReport`] is the complete record of one scenario invocation:
//! which steps ran, how many attempts each took, the verdict, and the
//! teardown outcome. The verdict is computed from the provisioning and probe
//! steps alone; cleanup is recorded alongside it and never rewrites it.
//! Reports serialize to stable snake_case JSON for artifact persistence and
//! render to Markdown for human review.
//! Invariants:
//! - `verdict` reflects steps up to and including the probe; never teardown.
//! - `failure` is present exactly when `verdict` is `Failed`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Wall-clock milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| {
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    })
}

// ============================================================================
// SECTION: Step Records
// ============================================================================

/// Pipeline step a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStage {
    /// Template staging into an isolated copy.
    Staging,
    /// Apply of the staged template.
    Apply,
    /// Endpoint output read.
    ReadOutput,
    /// Bounded HTTP probe.
    Probe,
}

impl StepStage {
    /// Returns the stage as a stable lowercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Apply => "apply",
            Self::ReadOutput => "read_output",
            Self::Probe => "probe",
        }
    }
}

/// Outcome of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step completed successfully.
    Passed,
    /// Step failed and aborted the scenario.
    Failed,
}

impl StepStatus {
    /// Returns the status as a stable lowercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Record of one executed pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Pipeline step.
    pub stage: StepStage,
    /// Step outcome.
    pub status: StepStatus,
    /// Attempts consumed (apply may take 2, probe up to its budget).
    pub attempts: u32,
    /// Step duration in milliseconds.
    pub duration_ms: u64,
    /// Optional human-readable detail (endpoint value, first-failure note).
    pub detail: Option<String>,
}

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Stable classification of scenario failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioErrorKind {
    /// Template staging failed before any cloud resources existed.
    Staging,
    /// Apply failed beyond the permitted one-shot reapply.
    Apply,
    /// Endpoint output absent or unreadable after a successful apply.
    OutputMissing,
    /// Probe never satisfied within its attempt budget.
    ProbeExhausted,
    /// Teardown failed; reported without changing the verdict.
    Destroy,
}

impl ScenarioErrorKind {
    /// Returns the kind as a stable lowercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Apply => "apply",
            Self::OutputMissing => "output_missing",
            Self::ProbeExhausted => "probe_exhausted",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for ScenarioErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Verdict and Cleanup
// ============================================================================

/// Scenario verdict derived from the provisioning and probe steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every step up to and including the probe succeeded.
    Passed,
    /// A step failed; `failure` names the cause.
    Failed,
}

impl Verdict {
    /// Returns the verdict as a stable lowercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Failure cause attached to a failed verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Stable failure classification.
    pub kind: ScenarioErrorKind,
    /// Rendered failure message.
    pub message: String,
}

/// Teardown outcome, tracked separately from the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRecord {
    /// Whether destroy was invoked at all.
    pub invoked: bool,
    /// Whether destroy completed without error.
    pub completed: bool,
    /// Rendered destroy error, when one occurred.
    pub error: Option<String>,
}

impl CleanupRecord {
    /// Cleanup never ran; only valid when staging failed first.
    #[must_use]
    pub const fn not_invoked() -> Self {
        Self {
            invoked: false,
            completed: false,
            error: None,
        }
    }

    /// Cleanup ran and completed.
    #[must_use]
    pub const fn completed() -> Self {
        Self {
            invoked: true,
            completed: true,
            error: None,
        }
    }

    /// Cleanup ran and failed.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            invoked: true,
            completed: false,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// SECTION: Scenario Report
// ============================================================================

/// Complete record of one scenario invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario label.
    pub scenario: String,
    /// Unique deployment name the invocation used.
    pub deployment_name: String,
    /// Target region.
    pub region: String,
    /// Wall-clock start, milliseconds since the Unix epoch.
    pub started_at_ms: u64,
    /// Wall-clock finish, milliseconds since the Unix epoch.
    pub finished_at_ms: u64,
    /// Executed steps in order.
    pub steps: Vec<StepRecord>,
    /// Scenario verdict from the provisioning and probe steps.
    pub verdict: Verdict,
    /// Failure cause, present exactly when the verdict is failed.
    pub failure: Option<FailureRecord>,
    /// Teardown outcome.
    pub cleanup: CleanupRecord,
}

impl ScenarioReport {
    /// Returns whether the scenario verdict is a pass.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed)
    }

    /// Returns a one-line failure summary when the verdict is failed.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        self.failure
            .as_ref()
            .map(|failure| format!("{}: {}", failure.kind, failure.message))
    }

    /// Renders the report as a Markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut body = String::new();
        body.push_str("# Scenario Summary\n\n");
        body.push_str(&format!("- Scenario: {}\n", self.scenario));
        body.push_str(&format!("- Deployment: {}\n", self.deployment_name));
        body.push_str(&format!("- Region: {}\n", self.region));
        body.push_str(&format!("- Verdict: {}\n", self.verdict.as_str()));
        if let Some(summary) = self.failure_summary() {
            body.push_str(&format!("- Failure: {summary}\n"));
        }
        body.push_str(&format!("- Cleanup: {}\n", self.cleanup_summary()));
        body.push_str(&format!(
            "- Duration: {} ms\n",
            self.finished_at_ms.saturating_sub(self.started_at_ms)
        ));
        body.push_str("\n## Steps\n\n");
        for step in &self.steps {
            body.push_str(&format!(
                "- {}: {} ({} attempt{}, {} ms)",
                step.stage.as_str(),
                step.status.as_str(),
                step.attempts,
                if step.attempts == 1 { "" } else { "s" },
                step.duration_ms
            ));
            if let Some(detail) = &step.detail {
                body.push_str(&format!(" {detail}"));
            }
            body.push('\n');
        }
        body
    }

    /// Renders the cleanup outcome as a short token.
    fn cleanup_summary(&self) -> String {
        if !self.cleanup.invoked {
            return "not invoked".to_owned();
        }
        if self.cleanup.completed {
            return "completed".to_owned();
        }
        match &self.cleanup.error {
            Some(error) => format!("failed: {error}"),
            None => "failed".to_owned(),
        }
    }
}
