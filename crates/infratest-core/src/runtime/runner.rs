// crates/infratest-core/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Sequential per-scenario pipeline with guaranteed teardown.
// Purpose: Stage, apply, read the endpoint, probe, and always destroy.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! One [`ScenarioRunner`] drives one scenario at a time through the boundary
//! traits: stage an isolated template copy, apply it (with the one-shot
//! reapply branch when the scenario arms it), read the endpoint output, probe
//! the endpoint, and destroy the deployment. Steps are strictly sequential.
//! Teardown runs on every exit path once staging has produced a handle:
//! explicitly through the destroy guard on ordinary control flow, and through
//! the guard's `Drop` as a backstop on unwinding.
//! Invariants:
//! - Destroy is invoked exactly once per handle.
//! - The verdict is fixed before teardown runs and is never rewritten by it.
//! - A failed first apply earns a second attempt only under `ReapplyOnce`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use crate::core::naming::DeploymentNameGenerator;
use crate::core::report::CleanupRecord;
use crate::core::report::FailureRecord;
use crate::core::report::ScenarioReport;
use crate::core::report::StepRecord;
use crate::core::report::StepStage;
use crate::core::report::StepStatus;
use crate::core::report::Verdict;
use crate::core::report::now_ms;
use crate::core::scenario::ScenarioSpec;
use crate::interfaces::EndpointProbe;
use crate::interfaces::OutputError;
use crate::interfaces::ProbeError;
use crate::interfaces::ProbeRequest;
use crate::interfaces::ProvisionEngine;
use crate::interfaces::ProvisionHandle;
use crate::interfaces::ScenarioError;
use crate::interfaces::StageRequest;

// ============================================================================
// SECTION: Destroy Guard
// ============================================================================

/// Owns a provisioning handle and guarantees its teardown.
///
/// Ordinary control flow calls [`DestroyGuard::destroy_now`] so the outcome
/// lands in the report. `Drop` is the backstop for unwinding; its result
/// cannot be reported and is discarded.
struct DestroyGuard {
    /// Handle owning the staged deployment.
    handle: Box<dyn ProvisionHandle>,
    /// Whether an explicit destroy already ran.
    destroyed: bool,
}

impl DestroyGuard {
    /// Wraps a freshly staged handle.
    fn new(handle: Box<dyn ProvisionHandle>) -> Self {
        Self {
            handle,
            destroyed: false,
        }
    }

    /// Returns the guarded handle for pipeline steps.
    fn handle_mut(&mut self) -> &mut dyn ProvisionHandle {
        self.handle.as_mut()
    }

    /// Destroys the deployment and records the outcome.
    fn destroy_now(&mut self) -> CleanupRecord {
        self.destroyed = true;
        match self.handle.destroy() {
            Ok(()) => CleanupRecord::completed(),
            Err(error) => CleanupRecord::failed(error.to_string()),
        }
    }
}

impl Drop for DestroyGuard {
    fn drop(&mut self) {
        if !self.destroyed {
            let _ = self.handle.destroy();
        }
    }
}

// ============================================================================
// SECTION: Scenario Runner
// ============================================================================

/// Drives scenarios through a provisioning engine and an endpoint probe.
///
/// # Invariants
/// - Each run issues a fresh deployment name; names are never reused.
#[derive(Debug)]
pub struct ScenarioRunner<E, P> {
    /// Provisioning engine implementation.
    engine: E,
    /// Endpoint probe implementation.
    probe: P,
    /// Deployment name source shared by this runner's invocations.
    names: DeploymentNameGenerator,
}

impl<E: ProvisionEngine, P: EndpointProbe> ScenarioRunner<E, P> {
    /// Creates a runner with a fresh name generator.
    #[must_use]
    pub fn new(engine: E, probe: P) -> Self {
        Self {
            engine,
            probe,
            names: DeploymentNameGenerator::new(),
        }
    }

    /// Creates a runner with a caller-supplied name generator.
    #[must_use]
    pub fn with_names(engine: E, probe: P, names: DeploymentNameGenerator) -> Self {
        Self {
            engine,
            probe,
            names,
        }
    }

    /// Runs one scenario to completion and reports what happened.
    ///
    /// The report's verdict covers staging through probing; teardown is
    /// recorded separately and never changes the verdict.
    pub fn run(&self, scenario: &ScenarioSpec) -> ScenarioReport {
        let started_at_ms = now_ms();
        let deployment = self.names.issue();
        let mut steps = Vec::new();

        let staged = {
            let request = StageRequest {
                template_dir: scenario.template_dir.clone(),
                deployment: deployment.clone(),
                params: scenario.parameters(&deployment),
            };
            let started = Instant::now();
            match self.engine.stage(request) {
                Ok(handle) => {
                    steps.push(step(StepStage::Staging, StepStatus::Passed, 1, started, None));
                    Ok(handle)
                }
                Err(error) => {
                    let detail = error.to_string();
                    steps.push(step(
                        StepStage::Staging,
                        StepStatus::Failed,
                        1,
                        started,
                        Some(detail),
                    ));
                    Err(ScenarioError::Staging(error))
                }
            }
        };

        let (outcome, cleanup) = match staged {
            Ok(handle) => {
                let mut guard = DestroyGuard::new(handle);
                let outcome = self.drive(guard.handle_mut(), scenario, &mut steps);
                let cleanup = guard.destroy_now();
                (outcome, cleanup)
            }
            Err(error) => (Err(error), CleanupRecord::not_invoked()),
        };

        let (verdict, failure) = match outcome {
            Ok(()) => (Verdict::Passed, None),
            Err(error) => (
                Verdict::Failed,
                Some(FailureRecord {
                    kind: error.kind(),
                    message: error.to_string(),
                }),
            ),
        };

        ScenarioReport {
            scenario: scenario.label.clone(),
            deployment_name: deployment.as_str().to_owned(),
            region: scenario.region.clone(),
            started_at_ms,
            finished_at_ms: now_ms(),
            steps,
            verdict,
            failure,
            cleanup,
        }
    }

    /// Runs apply, output read, and probe against a staged handle.
    fn drive(
        &self,
        handle: &mut dyn ProvisionHandle,
        scenario: &ScenarioSpec,
        steps: &mut Vec<StepRecord>,
    ) -> Result<(), ScenarioError> {
        self.apply_step(handle, scenario, steps)?;
        let endpoint = Self::output_step(handle, scenario, steps)?;
        self.probe_step(&endpoint, scenario, steps)
    }

    /// Applies the staged template, honoring the scenario's apply policy.
    fn apply_step(
        &self,
        handle: &mut dyn ProvisionHandle,
        scenario: &ScenarioSpec,
        steps: &mut Vec<StepRecord>,
    ) -> Result<(), ScenarioError> {
        let started = Instant::now();
        match handle.apply() {
            Ok(()) => {
                steps.push(step(StepStage::Apply, StepStatus::Passed, 1, started, None));
                Ok(())
            }
            Err(first_error) if scenario.apply_policy.allows_reapply() => {
                // One extra attempt covers the documented access-log delivery
                // inconsistency in the provider; a second failure is fatal.
                match handle.apply() {
                    Ok(()) => {
                        steps.push(step(
                            StepStage::Apply,
                            StepStatus::Passed,
                            2,
                            started,
                            Some(format!(
                                "first apply failed, succeeded on reapply: {first_error}"
                            )),
                        ));
                        Ok(())
                    }
                    Err(second_error) => {
                        steps.push(step(
                            StepStage::Apply,
                            StepStatus::Failed,
                            2,
                            started,
                            Some(format!("first failure: {first_error}")),
                        ));
                        Err(ScenarioError::Apply(second_error))
                    }
                }
            }
            Err(error) => {
                steps.push(step(
                    StepStage::Apply,
                    StepStatus::Failed,
                    1,
                    started,
                    Some(error.to_string()),
                ));
                Err(ScenarioError::Apply(error))
            }
        }
    }

    /// Reads the endpoint output and rejects empty values.
    fn output_step(
        handle: &dyn ProvisionHandle,
        scenario: &ScenarioSpec,
        steps: &mut Vec<StepRecord>,
    ) -> Result<String, ScenarioError> {
        let started = Instant::now();
        let read = handle.read_output(&scenario.endpoint_output).and_then(|value| {
            if value.trim().is_empty() {
                Err(OutputError::Missing(scenario.endpoint_output.clone()))
            } else {
                Ok(value)
            }
        });
        match read {
            Ok(endpoint) => {
                steps.push(step(
                    StepStage::ReadOutput,
                    StepStatus::Passed,
                    1,
                    started,
                    Some(endpoint.clone()),
                ));
                Ok(endpoint)
            }
            Err(error) => {
                steps.push(step(
                    StepStage::ReadOutput,
                    StepStatus::Failed,
                    1,
                    started,
                    Some(error.to_string()),
                ));
                Err(ScenarioError::OutputMissing(error))
            }
        }
    }

    /// Probes the deployed endpoint within the scenario's budget.
    fn probe_step(
        &self,
        endpoint: &str,
        scenario: &ScenarioSpec,
        steps: &mut Vec<StepRecord>,
    ) -> Result<(), ScenarioError> {
        let started = Instant::now();
        let request = ProbeRequest {
            url: scenario.probe.url_for(endpoint),
            expected_status: scenario.probe.expected_status,
            body_substring: scenario.probe.body_substring.clone(),
            max_attempts: scenario.probe.max_attempts,
            retry_delay: scenario.probe.retry_delay,
            min_tls: scenario.probe.min_tls,
        };
        match self.probe.probe(&request) {
            Ok(outcome) => {
                steps.push(step(
                    StepStage::Probe,
                    StepStatus::Passed,
                    outcome.attempts,
                    started,
                    None,
                ));
                Ok(())
            }
            Err(error) => {
                let attempts = match &error {
                    ProbeError::Exhausted { attempts, .. } => *attempts,
                    ProbeError::Invalid(_) => 0,
                };
                steps.push(step(
                    StepStage::Probe,
                    StepStatus::Failed,
                    attempts,
                    started,
                    Some(error.to_string()),
                ));
                Err(ScenarioError::ProbeExhausted(error))
            }
        }
    }
}

// ============================================================================
// SECTION: Step Helpers
// ============================================================================

/// Builds a step record with its measured duration.
fn step(
    stage: StepStage,
    status: StepStatus,
    attempts: u32,
    started: Instant,
    detail: Option<String>,
) -> StepRecord {
    StepRecord {
        stage,
        status,
        attempts,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        detail,
    }
}
