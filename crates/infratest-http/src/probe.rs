// crates/infratest-http/src/probe.rs
// ============================================================================
// Module: HTTP Endpoint Probe
// Description: Bounded-retry blocking GET probe with TLS floor enforcement.
// Purpose: Decide whether a deployed endpoint serves the expected response.
// Dependencies: infratest-core, reqwest, url
// ============================================================================

//! ## Overview
//! [`HttpProbe`] drives the probe boundary with `reqwest`'s blocking client.
//! Each probe parses and validates the URL once, builds one client honoring
//! the TLS floor, then issues up to `max_attempts` GET requests with a fixed
//! delay between attempts. Any transport error, status mismatch, or body
//! mismatch counts as one failed attempt; only the final attempt's failure is
//! reported when the budget is exhausted.
//! Invariants:
//! - The delay runs between attempts, never after the last one.
//! - A reported outcome counts the successful attempt itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::thread;
use std::time::Duration;

use infratest_core::EndpointProbe;
use infratest_core::MinTlsVersion;
use infratest_core::ProbeError;
use infratest_core::ProbeOutcome;
use infratest_core::ProbeRequest;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// HTTP probe configuration.
///
/// # Invariants
///
/// - `allow_http = false` blocks cleartext `http://` URLs.
/// - `max_response_bytes` is enforced as a hard upper bound on response
///   bodies.
/// - `timeout` applies to each attempt's full request lifecycle.
#[derive(Debug, Clone)]
pub struct HttpProbeConfig {
    /// Permit cleartext `http://` URLs.
    pub allow_http: bool,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Maximum response body size in bytes.
    pub max_response_bytes: usize,
    /// User agent header sent with each request.
    pub user_agent: String,
}

impl Default for HttpProbeConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout: Duration::from_secs(10),
            max_response_bytes: 64 * 1024,
            user_agent: "infratest/0.1".to_owned(),
        }
    }
}

// ============================================================================
// SECTION: Probe
// ============================================================================

/// Blocking HTTP probe.
#[derive(Debug, Clone, Default)]
pub struct HttpProbe {
    /// Probe configuration.
    config: HttpProbeConfig,
}

impl HttpProbe {
    /// Creates a probe with the given configuration.
    #[must_use]
    pub const fn new(config: HttpProbeConfig) -> Self {
        Self { config }
    }

    /// Builds the blocking client for one probe invocation.
    fn build_client(&self, min_tls: MinTlsVersion) -> Result<Client, ProbeError> {
        let version = match min_tls {
            MinTlsVersion::Tls12 => reqwest::tls::Version::TLS_1_2,
            MinTlsVersion::Tls13 => reqwest::tls::Version::TLS_1_3,
        };
        Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.clone())
            .redirect(Policy::none())
            .min_tls_version(version)
            .build()
            .map_err(|error| ProbeError::Invalid(format!("http client build failed: {error}")))
    }

    /// Runs one GET attempt and checks status and body expectations.
    fn attempt(&self, client: &Client, request: &ProbeRequest) -> Result<(), String> {
        let mut response = client
            .get(&request.url)
            .send()
            .map_err(|error| format!("request failed: {error}"))?;
        let status = response.status().as_u16();
        if status != request.expected_status {
            return Err(format!(
                "unexpected status {status}, wanted {}",
                request.expected_status
            ));
        }
        let body = read_body_limited(&mut response, self.config.max_response_bytes)?;
        let text = String::from_utf8_lossy(&body);
        if !text.contains(&request.body_substring) {
            return Err(format!(
                "body does not contain `{}`",
                request.body_substring
            ));
        }
        Ok(())
    }
}

impl EndpointProbe for HttpProbe {
    fn probe(&self, request: &ProbeRequest) -> Result<ProbeOutcome, ProbeError> {
        let url = Url::parse(&request.url).map_err(|error| {
            ProbeError::Invalid(format!("invalid url `{}`: {error}", request.url))
        })?;
        validate_scheme(&url, &self.config)?;
        let client = self.build_client(request.min_tls)?;

        let mut last_failure = String::from("no attempts were made");
        for attempt in 1 ..= request.max_attempts {
            if attempt > 1 {
                thread::sleep(request.retry_delay);
            }
            match self.attempt(&client, request) {
                Ok(()) => return Ok(ProbeOutcome { attempts: attempt }),
                Err(failure) => last_failure = failure,
            }
        }
        Err(ProbeError::Exhausted {
            attempts: request.max_attempts,
            last_failure,
        })
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates URL scheme and credential policy.
fn validate_scheme(url: &Url, config: &HttpProbeConfig) -> Result<(), ProbeError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        other => {
            return Err(ProbeError::Invalid(format!(
                "unsupported url scheme `{other}`"
            )));
        }
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ProbeError::Invalid(
            "url credentials are not allowed".to_owned(),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Body Reading
// ============================================================================

/// Reads the response body while enforcing a byte limit.
fn read_body_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, String> {
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| "size limit exceeds u64".to_owned())?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err("response exceeds size limit".to_owned());
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|error| format!("failed to read response: {error}"))?;
    if buf.len() > max_bytes {
        return Err("response exceeds size limit".to_owned());
    }
    Ok(buf)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
