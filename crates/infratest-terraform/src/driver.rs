// crates/infratest-terraform/src/driver.rs
// ============================================================================
// Module: Terraform Driver
// Description: Terraform CLI engine and deployment handle.
// Purpose: Run init, apply, destroy, and output reads against staged copies.
// Dependencies: infratest-core, serde_json
// ============================================================================

//! ## Overview
//! [`TerraformCli`] implements the provisioning engine boundary by launching
//! the Terraform binary as a subprocess. Staging produces a
//! [`TerraformDeployment`] handle that owns its staged copy and bound
//! parameters. `init -input=false` runs at the start of every apply, so a
//! reapply after the one-shot workaround re-initializes too; destroy
//! re-supplies the same variables and environment as apply. Failure messages
//! carry the tail of the CLI's stderr, bounded so a runaway plan diff cannot
//! flood a report.
//! Invariants:
//! - Handles never share staged copies.
//! - Apply and destroy receive identical variable and environment mappings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use infratest_core::ApplyError;
use infratest_core::DeploymentParams;
use infratest_core::DestroyError;
use infratest_core::OutputError;
use infratest_core::ProvisionEngine;
use infratest_core::ProvisionHandle;
use infratest_core::StageError;
use infratest_core::StageRequest;

use crate::options::var_arguments;
use crate::stage::StagedTemplate;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Longest stderr tail carried into a failure message.
const MAX_FAILURE_SNIPPET: usize = 2_048;

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Terraform CLI provisioning engine.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    /// Terraform binary path or name resolved through `PATH`.
    binary: PathBuf,
}

impl TerraformCli {
    /// Creates an engine resolving `terraform` through `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("terraform"),
        }
    }

    /// Creates an engine using an explicit binary path.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TerraformCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvisionEngine for TerraformCli {
    fn stage(&self, request: StageRequest) -> Result<Box<dyn ProvisionHandle>, StageError> {
        let staged = StagedTemplate::stage(&request.template_dir)?;
        Ok(Box::new(TerraformDeployment {
            binary: self.binary.clone(),
            staged,
            params: request.params,
        }))
    }
}

// ============================================================================
// SECTION: Deployment Handle
// ============================================================================

/// One staged Terraform deployment with its bound parameters.
#[derive(Debug)]
pub struct TerraformDeployment {
    /// Terraform binary path.
    binary: PathBuf,
    /// Staged template copy this deployment owns.
    staged: StagedTemplate,
    /// Variable and environment mappings bound at staging.
    params: DeploymentParams,
}

impl TerraformDeployment {
    /// Runs the Terraform binary in the staged copy with the bound env.
    fn run(&self, args: &[String]) -> Result<CommandOutput, String> {
        run_engine(&self.binary, self.staged.path(), &self.params.env, args)
    }

    /// Builds the argument vector for a subcommand plus the bound variables.
    fn args_with_vars(&self, head: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = head.iter().map(|&arg| arg.to_owned()).collect();
        args.extend(var_arguments(&self.params.vars));
        args
    }
}

impl ProvisionHandle for TerraformDeployment {
    fn apply(&mut self) -> Result<(), ApplyError> {
        let init_args = vec![
            "init".to_owned(),
            "-input=false".to_owned(),
            "-no-color".to_owned(),
        ];
        let init = self.run(&init_args).map_err(ApplyError::Launch)?;
        if !init.ok {
            return Err(ApplyError::Failed(failure_summary("init", &init)));
        }
        let apply_args =
            self.args_with_vars(&["apply", "-input=false", "-auto-approve", "-no-color"]);
        let apply = self.run(&apply_args).map_err(ApplyError::Launch)?;
        if !apply.ok {
            return Err(ApplyError::Failed(failure_summary("apply", &apply)));
        }
        Ok(())
    }

    fn read_output(&self, name: &str) -> Result<String, OutputError> {
        let args = vec![
            "output".to_owned(),
            "-no-color".to_owned(),
            "-json".to_owned(),
        ];
        let unreadable = |reason: String| OutputError::Unreadable {
            name: name.to_owned(),
            reason,
        };
        let output = self.run(&args).map_err(unreadable)?;
        if !output.ok {
            return Err(unreadable(failure_summary("output", &output)));
        }
        let listing: serde_json::Value =
            serde_json::from_str(&output.stdout).map_err(|error| unreadable(error.to_string()))?;
        let entry = listing
            .get(name)
            .ok_or_else(|| OutputError::Missing(name.to_owned()))?;
        let value = entry
            .get("value")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| unreadable("value is not a string".to_owned()))?;
        Ok(value.to_owned())
    }

    fn destroy(&mut self) -> Result<(), DestroyError> {
        let args = self.args_with_vars(&["destroy", "-auto-approve", "-input=false", "-no-color"]);
        let destroy = self.run(&args).map_err(DestroyError::Launch)?;
        if !destroy.ok {
            return Err(DestroyError::Failed(failure_summary("destroy", &destroy)));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Subprocess Plumbing
// ============================================================================

/// Captured result of one CLI invocation.
struct CommandOutput {
    /// Whether the process exited successfully.
    ok: bool,
    /// Exit code, when the platform reports one.
    code: Option<i32>,
    /// Captured standard output.
    stdout: String,
    /// Captured standard error.
    stderr: String,
}

/// Launches the engine binary and captures its output.
fn run_engine(
    binary: &Path,
    dir: &Path,
    env: &BTreeMap<String, String>,
    args: &[String],
) -> Result<CommandOutput, String> {
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .envs(env)
        .output()
        .map_err(|error| format!("failed to launch `{}`: {error}", binary.display()))?;
    Ok(CommandOutput {
        ok: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Renders a bounded failure message for one failed subcommand.
fn failure_summary(operation: &str, output: &CommandOutput) -> String {
    let code = output
        .code
        .map_or_else(|| "terminated by signal".to_owned(), |code| code.to_string());
    let detail = if output.stderr.trim().is_empty() {
        &output.stdout
    } else {
        &output.stderr
    };
    format!(
        "terraform {operation} exited with {code}: {}",
        tail(detail.trim(), MAX_FAILURE_SNIPPET)
    )
}

/// Returns the trailing `max` bytes of a message on a char boundary.
fn tail(text: &str, max: usize) -> &str {
    let mut start = text.len().saturating_sub(max);
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start ..]
}

// ============================================================================
// SECTION: Tests
// ============================================================================
