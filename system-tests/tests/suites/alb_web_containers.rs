// system-tests/tests/suites/alb_web_containers.rs
// ============================================================================
// Module: ALB Web Containers Tests
// Description: Live provisioning coverage for the access-log variants.
// Purpose: Verify each variant deploys, serves traffic, and tears down.
// Dependencies: system-tests helpers
// ============================================================================

//! Live provisioning tests for the four access-log variants.
//!
//! These tests provision real cloud resources and run only when the
//! environment enables live mode; otherwise they return immediately.

use helpers::artifacts::TestReporter;
use helpers::harness::live_scenario;
use helpers::harness::resolve_zones;
use helpers::harness::run_scenario;
use infratest_core::AccessLogMode;
use infratest_http::HttpProbe;
use infratest_terraform::TerraformCli;
use system_tests::config::SystemTestConfig;

use crate::helpers;

/// Stages, applies, probes, and destroys one access-log variant.
async fn verify_variant(
    test_name: &str,
    access_logs: AccessLogMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SystemTestConfig::load()?;
    if !config.live {
        return Ok(());
    }
    let mut reporter = TestReporter::new(test_name)?;
    let zones = resolve_zones(&config).await?;
    let scenario = live_scenario(&config, test_name, zones, access_logs);
    let engine = TerraformCli::with_binary(config.terraform_bin.clone());

    let report = run_scenario(engine, HttpProbe::default(), scenario).await?;

    reporter.artifacts().write_report("scenario_report", &report)?;

    let mut notes = vec![format!(
        "deployment {} in {}",
        report.deployment_name, report.region
    )];
    if let Some(summary) = report.failure_summary() {
        notes.push(summary);
    }
    if let Some(error) = &report.cleanup.error {
        notes.push(format!("teardown failed: {error}"));
    }
    let artifacts = vec![
        "summary.json".to_string(),
        "summary.md".to_string(),
        "scenario_report.json".to_string(),
        "scenario_report.md".to_string(),
    ];

    if !report.passed() {
        reporter.finish("fail", notes, artifacts)?;
        drop(reporter);
        return Err(report
            .failure_summary()
            .unwrap_or_else(|| "scenario failed without a recorded cause".to_owned())
            .into());
    }
    if !report.cleanup.completed {
        reporter.finish("fail", notes, artifacts)?;
        drop(reporter);
        return Err("teardown failed after a passing verdict".into());
    }
    reporter.finish("pass", notes, artifacts)?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn alb_serves_hello_world_without_access_logs() -> Result<(), Box<dyn std::error::Error>> {
    verify_variant(
        "alb_serves_hello_world_without_access_logs",
        AccessLogMode::Disabled,
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn alb_serves_hello_world_with_prefixed_access_logs()
-> Result<(), Box<dyn std::error::Error>> {
    verify_variant(
        "alb_serves_hello_world_with_prefixed_access_logs",
        AccessLogMode::PrefixedBucket,
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn alb_serves_hello_world_with_bucket_root_access_logs()
-> Result<(), Box<dyn std::error::Error>> {
    verify_variant(
        "alb_serves_hello_world_with_bucket_root_access_logs",
        AccessLogMode::BucketRoot,
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn alb_treats_prefix_without_bucket_as_logging_disabled()
-> Result<(), Box<dyn std::error::Error>> {
    verify_variant(
        "alb_treats_prefix_without_bucket_as_logging_disabled",
        AccessLogMode::PrefixWithoutBucket,
    )
    .await
}
