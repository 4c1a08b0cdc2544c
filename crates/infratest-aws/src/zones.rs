// crates/infratest-aws/src/zones.rs
// ============================================================================
// Module: Availability Zones
// Description: Region zone discovery for network template parameters.
// Purpose: Resolve the sorted available-zone list a deployment spreads over.
// Dependencies: aws-config, aws-sdk-ec2, thiserror
// ============================================================================

//! ## Overview
//! Templates that build subnets need concrete availability zone names.
//! [`availability_zones`] queries EC2 for zones in the `available` state and
//! returns them sorted by name, so zone selection is deterministic for a
//! given region snapshot. [`leading_zones`] then picks the subnet spread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::Filter;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Zone discovery errors.
#[derive(Debug, Error)]
pub enum ZoneError {
    /// The zone listing call failed.
    #[error("describe availability zones failed: {0}")]
    Describe(String),
    /// The region reported no available zones.
    #[error("region `{0}` has no available zones")]
    NoZones(String),
}

// ============================================================================
// SECTION: Zone Discovery
// ============================================================================

/// Lists available zone names for a region, sorted ascending.
///
/// # Errors
///
/// Returns [`ZoneError`] when the listing call fails or comes back empty.
pub async fn availability_zones(region: &str) -> Result<Vec<String>, ZoneError> {
    let shared_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await;
    let client = Client::new(&shared_config);
    let response = client
        .describe_availability_zones()
        .filters(
            Filter::builder()
                .name("state")
                .values("available")
                .build(),
        )
        .send()
        .await
        .map_err(|error| ZoneError::Describe(error.to_string()))?;

    let mut names: Vec<String> = response
        .availability_zones()
        .iter()
        .filter_map(|zone| zone.zone_name().map(ToOwned::to_owned))
        .collect();
    names.sort();
    if names.is_empty() {
        return Err(ZoneError::NoZones(region.to_owned()));
    }
    Ok(names)
}

/// Returns the first `count` zones of a sorted listing.
///
/// A short listing is returned whole; deployments degrade to fewer subnets
/// rather than failing on small regions.
#[must_use]
pub fn leading_zones(names: &[String], count: usize) -> Vec<String> {
    names.iter().take(count).cloned().collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
