// system-tests/tests/helpers/terraform_stub.rs
// ============================================================================
// Module: Terraform Stub
// Description: Scripted engine stand-in for hermetic pipeline tests.
// Purpose: Exercise the full scenario pipeline without cloud access.
// Dependencies: std, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Installs a shell script that answers `init`, `apply`, `output`, and
//! `destroy` the way the real engine binary would, following a scripted plan.
//! Every control path and the invocation log live inside the stub's own
//! workspace, so concurrent tests never share state through the process
//! environment.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

/// Script template with `@`-delimited slots for workspace paths and the plan.
const SCRIPT_TEMPLATE: &str = r#"#!/bin/sh
# Engine stand-in: records invocations and follows a scripted plan.
log="@LOG@"
count_file="@COUNT@"
printf '%s\n' "$*" >> "$log"
printf '%s\n' "${AWS_DEFAULT_REGION:-}" > "@REGION@"
case "$1" in
  init)
    if [ "@INIT_EXIT@" -ne 0 ]; then
      echo "Error: backend initialization failed" >&2
      exit "@INIT_EXIT@"
    fi
    ;;
  apply)
    count=0
    if [ -f "$count_file" ]; then
      count=$(cat "$count_file")
    fi
    count=$((count + 1))
    printf '%s' "$count" > "$count_file"
    if [ "$count" -le "@APPLY_FAILURES@" ]; then
      echo "Error: access log delivery rejected by the load balancer service" >&2
      exit 1
    fi
    ;;
  output)
    cat "@OUTPUTS@"
    ;;
  destroy)
    if [ "@DESTROY_EXIT@" -ne 0 ]; then
      echo "Error: dependency violation while destroying network interfaces" >&2
      exit "@DESTROY_EXIT@"
    fi
    ;;
esac
exit 0
"#;

/// Scripted behavior for one stub install.
#[derive(Debug, Clone)]
pub struct StubPlan {
    /// JSON document served for `output -json`.
    pub outputs: String,
    /// Number of leading apply invocations that fail before applies succeed.
    pub apply_failures: u32,
    /// Whether `init` fails.
    pub fail_init: bool,
    /// Whether `destroy` fails.
    pub fail_destroy: bool,
}

impl Default for StubPlan {
    fn default() -> Self {
        Self {
            outputs: "{}".to_owned(),
            apply_failures: 0,
            fail_init: false,
            fail_destroy: false,
        }
    }
}

/// Builds an output listing exposing `dns_endpoint` with the given address.
pub fn endpoint_outputs(endpoint: &str) -> String {
    serde_json::json!({
        "dns_endpoint": {
            "sensitive": false,
            "type": "string",
            "value": endpoint,
        }
    })
    .to_string()
}

/// Installed stub engine with its private workspace.
#[derive(Debug)]
pub struct StubTerraform {
    workspace: TempDir,
    binary: PathBuf,
    log: PathBuf,
    region: PathBuf,
}

impl StubTerraform {
    /// Installs the stub script configured for the given plan.
    pub fn install(plan: &StubPlan) -> io::Result<Self> {
        let workspace = TempDir::new()?;
        let log = workspace.path().join("invocations.log");
        let count = workspace.path().join("apply.count");
        let outputs = workspace.path().join("outputs.json");
        let region = workspace.path().join("observed.region");
        fs::write(&outputs, &plan.outputs)?;
        let script = SCRIPT_TEMPLATE
            .replace("@LOG@", &log.display().to_string())
            .replace("@COUNT@", &count.display().to_string())
            .replace("@OUTPUTS@", &outputs.display().to_string())
            .replace("@REGION@", &region.display().to_string())
            .replace("@INIT_EXIT@", if plan.fail_init { "1" } else { "0" })
            .replace("@APPLY_FAILURES@", &plan.apply_failures.to_string())
            .replace("@DESTROY_EXIT@", if plan.fail_destroy { "1" } else { "0" });
        let binary = workspace.path().join("terraform");
        fs::write(&binary, script)?;
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))?;
        Ok(Self {
            workspace,
            binary,
            log,
            region,
        })
    }

    /// Returns the path to the stub binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Returns recorded invocations, one argv line each, oldest first.
    pub fn invocations(&self) -> io::Result<Vec<String>> {
        Ok(self.invocation_log()?.lines().map(str::to_owned).collect())
    }

    /// Returns the raw invocation log text.
    pub fn invocation_log(&self) -> io::Result<String> {
        if !self.log.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.log)
    }

    /// Returns the subcommand of each recorded invocation, oldest first.
    pub fn subcommands(&self) -> io::Result<Vec<String>> {
        Ok(self
            .invocations()?
            .iter()
            .filter_map(|line| line.split_whitespace().next().map(str::to_owned))
            .collect())
    }

    /// Returns the region the stub last observed in its environment.
    pub fn observed_region(&self) -> io::Result<String> {
        if !self.region.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(&self.region)?.trim().to_owned())
    }
}
